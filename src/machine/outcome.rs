//! Results reported by the dispatcher.

use crate::core::{ActionError, Event, State};
use std::fmt;
use thiserror::Error;

/// Why an event did not cause a transition.
///
/// Rejections are expected outcomes, not failures: the instance is left
/// exactly as it was and no callback has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No transition leaves the current state on this event.
    NoMatchingTransition,
    /// Candidates exist, but every one of them had a guard returning false.
    AllGuardsFailed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingTransition => f.write_str("no matching transition"),
            Self::AllGuardsFailed => f.write_str("all guards failed"),
        }
    }
}

/// Successful result of a dispatch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome<S: State> {
    /// The transition was committed.
    Accepted { from: S, to: S },
    /// The event was ignored; nothing changed.
    Rejected(Rejection),
}

impl<S: State> TransitionOutcome<S> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The state committed by an accepted transition.
    pub fn target(&self) -> Option<&S> {
        match self {
            Self::Accepted { to, .. } => Some(to),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            Self::Accepted { .. } => None,
        }
    }
}

/// Stage of a transition an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Exit hook of the source state.
    Exit,
    /// Action attached to the transition itself.
    Transition,
    /// Entry hook of the target state.
    Entry,
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit"),
            Self::Transition => f.write_str("transition"),
            Self::Entry => f.write_str("entry"),
        }
    }
}

/// Errors that abort a dispatch.
///
/// The instance keeps its pre-dispatch state and context, so dispatching
/// the same event again is always safe.
#[derive(Debug, Error)]
pub enum DispatchError<S: State, E: Event> {
    /// An action returned an error. `index` is the action's position in
    /// the executed sequence (exit hooks, transition actions, entry hooks).
    #[error(
        "{phase} action #{index} failed on '{}' --{}--> '{}': {source}",
        .from.name(),
        .event.name(),
        .to.name()
    )]
    ActionFailed {
        from: S,
        to: S,
        event: E,
        phase: ActionPhase,
        index: usize,
        action: Option<String>,
        #[source]
        source: ActionError,
    },
}

impl<S: State, E: Event> DispatchError<S, E> {
    /// Position of the failing action in the executed sequence.
    pub fn action_index(&self) -> usize {
        match self {
            Self::ActionFailed { index, .. } => *index,
        }
    }

    pub fn phase(&self) -> ActionPhase {
        match self {
            Self::ActionFailed { phase, .. } => *phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;
    use std::error::Error;

    state_enum! {
        enum Door {
            Closed,
            Open,
        }
    }

    #[test]
    fn outcome_accessors() {
        let accepted = TransitionOutcome::Accepted {
            from: Door::Closed,
            to: Door::Open,
        };
        let rejected: TransitionOutcome<Door> =
            TransitionOutcome::Rejected(Rejection::AllGuardsFailed);

        assert!(accepted.is_accepted());
        assert_eq!(accepted.target(), Some(&Door::Open));
        assert_eq!(accepted.rejection(), None);
        assert!(rejected.is_rejected());
        assert_eq!(rejected.target(), None);
        assert_eq!(rejected.rejection(), Some(Rejection::AllGuardsFailed));
    }

    #[test]
    fn dispatch_error_names_the_transition() {
        let err: DispatchError<Door, &'static str> = DispatchError::ActionFailed {
            from: Door::Closed,
            to: Door::Open,
            event: "push",
            phase: ActionPhase::Transition,
            index: 1,
            action: None,
            source: ActionError::new("motor jammed"),
        };

        assert_eq!(
            err.to_string(),
            "transition action #1 failed on 'Closed' --push--> 'Open': motor jammed"
        );
        assert_eq!(err.action_index(), 1);
        assert_eq!(err.phase(), ActionPhase::Transition);
        assert_eq!(err.source().unwrap().to_string(), "motor jammed");
    }

    #[test]
    fn rejection_display() {
        assert_eq!(
            Rejection::NoMatchingTransition.to_string(),
            "no matching transition"
        );
        assert_eq!(Rejection::AllGuardsFailed.to_string(), "all guards failed");
    }
}
