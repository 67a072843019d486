//! Builder API for ergonomic machine construction.
//!
//! Definitions are built in two phases: builders collect states,
//! transitions and hooks, then a single validation pass produces an
//! immutable [`MachineDefinition`](crate::machine::MachineDefinition).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::ValidationError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State};
use crate::machine::TransitionDescriptor;

/// Create an unconditional transition without actions.
///
/// # Example
///
/// ```
/// use fsmate::builder::simple_transition;
/// use fsmate::machine::TransitionDescriptor;
/// use fsmate::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
///     final: [End]
/// }
///
/// let transition: TransitionDescriptor<MyState, &str, ()> =
///     simple_transition(MyState::Start, "finish", MyState::End);
/// assert!(!transition.is_guarded());
/// ```
pub fn simple_transition<S, E, C, P>(from: S, event: E, to: S) -> TransitionDescriptor<S, E, C, P>
where
    S: State,
    E: Event,
{
    TransitionDescriptor {
        from,
        event,
        to,
        guards: Vec::new(),
        actions: Vec::new(),
    }
}

/// Create a transition with a single guard predicate.
///
/// # Example
///
/// ```
/// use fsmate::builder::guarded_transition;
/// use fsmate::machine::TransitionDescriptor;
/// use fsmate::state_enum;
///
/// state_enum! {
///     enum MyState {
///         Start,
///         Middle,
///     }
/// }
///
/// let transition: TransitionDescriptor<MyState, &str, u32, bool> =
///     guarded_transition(MyState::Start, "advance", MyState::Middle, |_, ready: &bool| *ready);
/// assert!(transition.guards_pass(&0, &true));
/// assert!(!transition.guards_pass(&0, &false));
/// ```
pub fn guarded_transition<S, E, C, P, F>(
    from: S,
    event: E,
    to: S,
    guard: F,
) -> TransitionDescriptor<S, E, C, P>
where
    S: State,
    E: Event,
    F: Fn(&C, &P) -> bool + Send + Sync + 'static,
{
    TransitionDescriptor {
        from,
        event,
        to,
        guards: vec![Guard::new(guard)],
        actions: Vec::new(),
    }
}
