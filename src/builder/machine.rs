//! Builder for constructing machine definitions.

use crate::builder::error::ValidationError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Action, Event, State};
use crate::machine::{
    Hooks, MachineConfig, MachineDefinition, StateRegistry, TransitionDescriptor, TransitionTable,
};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

/// Builder collecting the parts of a machine definition.
///
/// Nothing is checked until [`build`](Self::build) or
/// [`validate`](Self::validate) runs a single validation pass over
/// everything collected.
pub struct MachineBuilder<S: State, E: Event, C, P = ()> {
    states: Vec<S>,
    initial: Option<S>,
    transitions: Vec<TransitionDescriptor<S, E, C, P>>,
    hooks: Hooks<S, E, C, P>,
    config: MachineConfig,
}

impl<S: State, E: Event, C, P> MachineBuilder<S, E, C, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            transitions: Vec::new(),
            hooks: Hooks::default(),
            config: MachineConfig::default(),
        }
    }

    /// Declare a state.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder is incomplete.
    pub fn transition(
        mut self,
        builder: TransitionBuilder<S, E, C, P>,
    ) -> Result<Self, ValidationError> {
        self.transitions.extend(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDescriptor<S, E, C, P>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = TransitionDescriptor<S, E, C, P>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Run `action` whenever a transition enters `state`.
    pub fn on_enter(mut self, state: S, action: Action<S, E, C, P>) -> Self {
        self.hooks.entry.push((state, action));
        self
    }

    /// Run `action` whenever a transition leaves `state`.
    pub fn on_exit(mut self, state: S, action: Action<S, E, C, P>) -> Self {
        self.hooks.exit.push((state, action));
        self
    }

    /// Run `action` on entering any state, after that state's own entry hooks.
    pub fn on_enter_any(mut self, action: Action<S, E, C, P>) -> Self {
        self.hooks.enter_any.push(action);
        self
    }

    /// Run `action` on leaving any state, after that state's own exit hooks.
    pub fn on_exit_any(mut self, action: Action<S, E, C, P>) -> Self {
        self.hooks.exit_any.push(action);
        self
    }

    /// Run `action` on every committed transition, after the transition's
    /// own actions.
    pub fn on_transition(mut self, action: Action<S, E, C, P>) -> Self {
        self.hooks.on_transition.push(action);
        self
    }

    /// Keep at most `limit` history records per instance.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Disable history recording.
    pub fn without_history(self) -> Self {
        self.history_limit(0)
    }

    /// Every problem with the collected parts, in declaration order.
    fn problems(&self) -> Vec<ValidationError> {
        let declared: HashSet<&S> = self.states.iter().collect();
        let mut problems = Vec::new();

        match &self.initial {
            None => problems.push(ValidationError::MissingInitialState),
            Some(initial) if !declared.contains(initial) => {
                problems.push(ValidationError::UnknownInitialState {
                    state: initial.name().to_string(),
                });
            }
            Some(_) => {}
        }

        let mut unguarded: HashSet<(&S, &E)> = HashSet::new();
        for transition in &self.transitions {
            for endpoint in [&transition.from, &transition.to] {
                if !declared.contains(endpoint) {
                    problems.push(ValidationError::DanglingTransition {
                        from: transition.from.name().to_string(),
                        event: transition.event.name().to_string(),
                        to: transition.to.name().to_string(),
                        missing: endpoint.name().to_string(),
                    });
                    break;
                }
            }

            if !transition.is_guarded() && !unguarded.insert((&transition.from, &transition.event))
            {
                problems.push(ValidationError::DuplicateUnguardedTransition {
                    from: transition.from.name().to_string(),
                    event: transition.event.name().to_string(),
                });
            }
        }

        for (state, _) in self.hooks.entry.iter().chain(&self.hooks.exit) {
            if !declared.contains(state) {
                problems.push(ValidationError::UnknownHookState {
                    state: state.name().to_string(),
                });
            }
        }

        problems
    }

    /// Check the collected parts, accumulating every problem found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ValidationError>> {
        let checks: Vec<Validation<(), NonEmptyVec<ValidationError>>> = self
            .problems()
            .into_iter()
            .map(Validation::fail)
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the definition.
    /// Returns the first problem found if the parts are invalid.
    pub fn build(self) -> Result<MachineDefinition<S, E, C, P>, ValidationError> {
        if let Some(problem) = self.problems().into_iter().next() {
            debug!(error = %problem, "machine definition rejected");
            return Err(problem);
        }

        let initial = self.initial.ok_or(ValidationError::MissingInitialState)?;
        let registry = StateRegistry::new(self.states);
        let table = TransitionTable::new(self.transitions, self.hooks);
        debug!(
            states = registry.len(),
            transitions = table.len(),
            initial = initial.name(),
            "machine definition built"
        );

        Ok(MachineDefinition::from_parts(
            registry,
            initial,
            table,
            self.config,
        ))
    }
}

impl<S: State, E: Event, C, P> Default for MachineBuilder<S, E, C, P> {
    fn default() -> Self {
        Self::new()
    }
}
