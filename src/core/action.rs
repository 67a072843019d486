//! Side-effecting callbacks executed while committing a transition.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a failing action.
///
/// Carries a human-readable message and, optionally, the underlying error
/// that caused the failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl ActionError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_source<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The transition an action is running for.
///
/// Borrowed from the dispatcher for the duration of one callback. Hooks
/// shared by several states use it to tell which transition fired.
pub struct TransitionInfo<'a, S, E> {
    pub from: &'a S,
    pub to: &'a S,
    pub event: &'a E,
}

impl<S: PartialEq, E> TransitionInfo<'_, S, E> {
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

impl<S, E> Clone for TransitionInfo<'_, S, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E> Copy for TransitionInfo<'_, S, E> {}

impl<S: fmt::Debug, E: fmt::Debug> fmt::Debug for TransitionInfo<'_, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionInfo")
            .field("from", self.from)
            .field("to", self.to)
            .field("event", self.event)
            .finish()
    }
}

type ActionFn<S, E, C, P> = Arc<
    dyn Fn(&mut C, &P, &TransitionInfo<'_, S, E>) -> Result<(), ActionError> + Send + Sync,
>;

/// A side-effecting callback run as part of a transition.
///
/// Actions receive mutable access to the instance context and the event
/// payload; [`Action::with_transition`] callbacks also see the source,
/// target and event. Returning an error aborts the dispatch; the instance
/// keeps its previous state and context.
///
/// # Example
///
/// ```rust
/// use fsmate::core::{Action, TransitionInfo};
///
/// let record: Action<&'static str, &'static str, Vec<String>, u32> =
///     Action::<&'static str, &'static str, Vec<String>, u32>::with_transition(|log, value, t| {
///         log.push(format!("{} -> {}: {value}", t.from, t.to));
///         Ok(())
///     })
///     .with_name("record");
///
/// let mut log = Vec::new();
/// let info = TransitionInfo { from: &"idle", to: &"busy", event: &"start" };
/// record.run(&mut log, &7, &info).unwrap();
/// assert_eq!(log, vec!["idle -> busy: 7"]);
/// assert_eq!(record.name(), Some("record"));
/// ```
pub struct Action<S, E, C, P = ()> {
    name: Option<Arc<str>>,
    callback: ActionFn<S, E, C, P>,
}

impl<S, E, C, P> Action<S, E, C, P> {
    /// Create an anonymous action that also receives the transition.
    pub fn with_transition<F>(callback: F) -> Self
    where
        F: Fn(&mut C, &P, &TransitionInfo<'_, S, E>) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: None,
            callback: Arc::new(callback),
        }
    }

    /// Create an anonymous action.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut C, &P) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::with_transition(move |ctx, payload, _| callback(ctx, payload))
    }

    /// Create an action with a name used in logs and diagnostics.
    pub fn named<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut C, &P) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::new(callback).with_name(name)
    }

    /// Create an action that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&mut C, &P) + Send + Sync + 'static,
    {
        Self::new(move |ctx, payload| {
            callback(ctx, payload);
            Ok(())
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Arc::from(name.into()));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Run the action against a context.
    pub fn run(
        &self,
        context: &mut C,
        payload: &P,
        transition: &TransitionInfo<'_, S, E>,
    ) -> Result<(), ActionError> {
        (self.callback)(context, payload, transition)
    }
}

impl<S, E, C, P> Clone for Action<S, E, C, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<S, E, C, P> fmt::Debug for Action<S, E, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    type Simple<C> = Action<&'static str, &'static str, C>;

    const START: TransitionInfo<'static, &'static str, &'static str> = TransitionInfo {
        from: &"idle",
        to: &"busy",
        event: &"start",
    };

    #[test]
    fn action_mutates_context() {
        let action: Action<&str, &str, u32, u32> =
            Action::infallible(|count: &mut u32, step: &u32| *count += step);
        let mut count = 1;

        action.run(&mut count, &2, &START).unwrap();
        action.run(&mut count, &2, &START).unwrap();

        assert_eq!(count, 5);
    }

    #[test]
    fn failing_action_reports_message() {
        let action: Simple<()> = Action::new(|_, _| Err("motor jammed".into()));

        let err = action.run(&mut (), &(), &START).unwrap_err();

        assert_eq!(err.message(), "motor jammed");
        assert_eq!(err.to_string(), "motor jammed");
        assert!(err.source().is_none());
    }

    #[test]
    fn action_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = ActionError::with_source("write failed", io);

        assert_eq!(err.to_string(), "write failed");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn named_action_exposes_name() {
        let action: Simple<()> = Action::named("beep", |_, _| Ok(()));
        let anonymous: Simple<()> = Action::new(|_, _| Ok(()));

        assert_eq!(action.name(), Some("beep"));
        assert_eq!(action.clone().name(), Some("beep"));
        assert_eq!(anonymous.name(), None);
    }

    #[test]
    fn transition_aware_action_sees_endpoints() {
        let action: Simple<Vec<String>> = Simple::<Vec<String>>::with_transition(|log, _, t| {
            log.push(format!("{}-{}->{}", t.from, t.event, t.to));
            Ok(())
        });
        let mut log = Vec::new();

        action.run(&mut log, &(), &START).unwrap();
        let stay = TransitionInfo {
            from: &"busy",
            to: &"busy",
            event: &"tick",
        };
        action.run(&mut log, &(), &stay).unwrap();

        assert_eq!(log, vec!["idle-start->busy", "busy-tick->busy"]);
        assert!(!START.is_self_transition());
        assert!(stay.is_self_transition());
    }
}
