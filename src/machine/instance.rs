//! Running machine instances.

use crate::core::{Event, State, StateHistory, StateTransition};
use crate::machine::definition::MachineDefinition;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Mutable cursor over a shared [`MachineDefinition`].
///
/// An instance owns its context exclusively and only the dispatcher moves
/// its current state. Dispatching requires `&mut self`, so concurrent
/// dispatches on one instance must be serialized by the owner (for example
/// behind a `Mutex`).
pub struct MachineInstance<S: State, E: Event, C, P = ()> {
    pub(crate) id: Uuid,
    pub(crate) definition: Arc<MachineDefinition<S, E, C, P>>,
    pub(crate) current: S,
    pub(crate) context: C,
    pub(crate) history: StateHistory<S>,
    pub(crate) created_at: DateTime<Utc>,
}

impl<S: State, E: Event, C, P> MachineInstance<S, E, C, P> {
    /// Create an instance in the definition's initial state.
    ///
    /// No entry hooks run for the initial state.
    pub fn new(definition: Arc<MachineDefinition<S, E, C, P>>, context: C) -> Self {
        let current = definition.initial().clone();
        Self {
            id: Uuid::new_v4(),
            definition,
            current,
            context,
            history: StateHistory::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get current state (pure).
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if the instance is in a final state (pure).
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn definition(&self) -> &Arc<MachineDefinition<S, E, C, P>> {
        &self.definition
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Committed transitions, oldest first, bounded by the configured limit.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn record(&mut self, from: S, event: &E) {
        let transition = StateTransition {
            from,
            to: self.current.clone(),
            event: event.name().to_string(),
            timestamp: Utc::now(),
        };
        let limit = self.definition.config().history_limit;
        self.history.push_bounded(transition, limit);
    }
}

impl<S: State, E: Event, C: fmt::Debug, P> fmt::Debug for MachineInstance<S, E, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineInstance")
            .field("id", &self.id)
            .field("current", &self.current)
            .field("context", &self.context)
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{simple_transition, MachineBuilder};
    use crate::state_enum;

    state_enum! {
        enum Lamp {
            Off,
            On,
            Broken,
        }
        final: [Broken]
        error: [Broken]
    }

    fn lamp() -> Arc<MachineDefinition<Lamp, &'static str, u32>> {
        Arc::new(
            MachineBuilder::new()
                .states([Lamp::Off, Lamp::On, Lamp::Broken])
                .initial(Lamp::Off)
                .add_transition(simple_transition(Lamp::Off, "toggle", Lamp::On))
                .add_transition(simple_transition(Lamp::On, "toggle", Lamp::Off))
                .history_limit(2)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn new_instance_starts_at_initial_state() {
        let instance = MachineInstance::new(lamp(), 0);

        assert_eq!(instance.current_state(), &Lamp::Off);
        assert!(!instance.is_final());
        assert!(instance.history().is_empty());
        assert_eq!(*instance.context(), 0);
    }

    #[test]
    fn instances_have_distinct_ids() {
        let definition = lamp();
        let a = MachineInstance::new(Arc::clone(&definition), 0);
        let b = MachineInstance::new(definition, 0);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn context_is_owned_by_instance() {
        let mut instance = MachineInstance::new(lamp(), 1);
        *instance.context_mut() += 41;

        assert_eq!(instance.into_context(), 42);
    }

    #[test]
    fn record_respects_history_limit() {
        let mut instance = MachineInstance::new(lamp(), 0);
        for _ in 0..3 {
            let from = instance.current.clone();
            instance.current = Lamp::On;
            instance.record(from, &"toggle");
        }

        assert_eq!(instance.history().len(), 2);
        assert_eq!(instance.history().last().unwrap().event, "toggle");
    }

    #[test]
    fn history_grows_in_place_up_to_limit() {
        let mut instance = MachineInstance::new(lamp(), 0);
        for _ in 0..3 {
            instance.fire(&"toggle").unwrap();
        }

        assert_eq!(
            instance.history().get_path(),
            vec![&Lamp::On, &Lamp::Off, &Lamp::On]
        );
    }
}
