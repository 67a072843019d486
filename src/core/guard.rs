//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the instance context and the
//! event payload. They decide whether a transition may fire without
//! producing side effects, so they can be evaluated speculatively by
//! introspection (`can_fire`) as often as needed.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// Guards are evaluated before any action runs. The predicate must be
/// deterministic for a given context and payload and thread-safe
/// (`Send + Sync`). Cloning a guard is cheap; clones share the predicate.
///
/// # Example
///
/// ```rust
/// use fsmate::core::Guard;
///
/// struct Counter {
///     value: u32,
/// }
///
/// let below_limit = Guard::new(|ctx: &Counter, step: &u32| ctx.value + step <= 10);
///
/// assert!(below_limit.check(&Counter { value: 3 }, &4));
/// assert!(!below_limit.check(&Counter { value: 8 }, &4));
/// ```
pub struct Guard<C, P = ()> {
    predicate: Arc<dyn Fn(&C, &P) -> bool + Send + Sync>,
}

impl<C, P> Guard<C, P> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &P) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Create a guard that only inspects the context.
    pub fn on_context<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::new(move |ctx, _payload| predicate(ctx))
    }

    /// Create a guard that only inspects the payload.
    pub fn on_payload<F>(predicate: F) -> Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self::new(move |_ctx, payload| predicate(payload))
    }

    /// Check if the guard allows the transition.
    ///
    /// This evaluates the predicate without any side effects.
    pub fn check(&self, context: &C, payload: &P) -> bool {
        (self.predicate)(context, payload)
    }
}

impl<C, P> Clone for Guard<C, P> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C, P> fmt::Debug for Guard<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
