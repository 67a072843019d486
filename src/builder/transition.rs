//! Builder for constructing transition descriptors.

use crate::builder::error::ValidationError;
use crate::core::{Action, ActionError, Event, Guard, State, TransitionInfo};
use crate::machine::TransitionDescriptor;

/// Builder for constructing transitions with a fluent API.
///
/// A builder with several source states (`from_any`) produces one
/// descriptor per source, in the order the sources were given.
pub struct TransitionBuilder<S: State, E: Event, C, P = ()> {
    from: Vec<S>,
    event: Option<E>,
    to: Option<S>,
    guards: Vec<Guard<C, P>>,
    actions: Vec<Action<S, E, C, P>>,
}

impl<S: State, E: Event, C, P> TransitionBuilder<S, E, C, P> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: Vec::new(),
            event: None,
            to: None,
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from.push(state);
        self
    }

    /// Add several source states at once.
    pub fn from_any<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.from.extend(states);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Append a guard.
    pub fn guard(mut self, guard: Guard<C, P>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Append a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C, &P) -> bool + Send + Sync + 'static,
    {
        self.guards.push(Guard::new(predicate));
        self
    }

    /// Append an action.
    pub fn action(mut self, action: Action<S, E, C, P>) -> Self {
        self.actions.push(action);
        self
    }

    /// Append an action using a closure.
    pub fn run<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut C, &P) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.actions.push(Action::new(callback));
        self
    }

    /// Append an action that also receives the firing transition.
    ///
    /// Useful with [`from_any`](Self::from_any), where one action serves
    /// several sources.
    pub fn run_with<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut C, &P, &TransitionInfo<'_, S, E>) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        self.actions.push(Action::with_transition(callback));
        self
    }

    /// Build the descriptors, one per source state.
    pub fn build(self) -> Result<Vec<TransitionDescriptor<S, E, C, P>>, ValidationError> {
        if self.from.is_empty() {
            return Err(ValidationError::MissingFromState);
        }
        let event = self.event.ok_or(ValidationError::MissingEvent)?;
        let to = self.to.ok_or(ValidationError::MissingToState)?;

        let guards = self.guards;
        let actions = self.actions;
        Ok(self
            .from
            .into_iter()
            .map(|from| TransitionDescriptor {
                from,
                event: event.clone(),
                to: to.clone(),
                guards: guards.clone(),
                actions: actions.clone(),
            })
            .collect())
    }
}

impl<S: State, E: Event, C, P> Default for TransitionBuilder<S, E, C, P> {
    fn default() -> Self {
        Self::new()
    }
}
