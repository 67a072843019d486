//! Per-instance record of committed transitions.
//!
//! Histories are values: recording returns a new history and leaves the
//! old one intact. Instances append to theirs in place, bounded by the
//! definition's configured limit.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use fsmate::core::StateTransition;
/// use fsmate::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum TaskState {
///         Pending,
///         Running,
///     }
/// }
///
/// let transition = StateTransition {
///     from: TaskState::Pending,
///     to: TaskState::Running,
///     event: "start".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.event, "start");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// Source state
    pub from: S,
    /// Target state
    pub to: S,
    /// Name of the event that triggered the transition
    pub event: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. `record_bounded` additionally drops the oldest
/// entries so that at most `limit` records are kept.
///
/// # Example
///
/// ```rust
/// use fsmate::core::{StateHistory, StateTransition};
/// use fsmate::state_enum;
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase {
///         One,
///         Two,
///         Three,
///     }
/// }
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Phase::One,
///         to: Phase::Two,
///         event: "next".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Phase::Two,
///         to: Phase::Three,
///         event: "next".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&Phase::One, &Phase::Two, &Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Append `transition`, returning the extended history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push_back(transition);
        Self { transitions }
    }

    /// Record a transition keeping at most `limit` entries, oldest first out.
    ///
    /// A limit of zero yields an empty history.
    pub fn record_bounded(&self, transition: StateTransition<S>, limit: usize) -> Self {
        let mut next = self.clone();
        next.push_bounded(transition, limit);
        next
    }

    /// In-place form of [`record_bounded`](Self::record_bounded).
    pub(crate) fn push_bounded(&mut self, transition: StateTransition<S>, limit: usize) {
        self.transitions.push_back(transition);
        self.truncate_to(limit);
    }

    /// Drop the oldest records until at most `limit` remain.
    pub(crate) fn truncate_to(&mut self, limit: usize) {
        let excess = self.transitions.len().saturating_sub(limit);
        self.transitions.drain(..excess);
    }

    /// States traversed, oldest first.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the oldest and newest retained records.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// Iterate over all retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
