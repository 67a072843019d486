//! Immutable, shareable machine blueprint.

use crate::builder::{MachineBuilder, ValidationError};
use crate::core::{Event, State};
use crate::machine::instance::MachineInstance;
use crate::machine::registry::StateRegistry;
use crate::machine::table::{TransitionDescriptor, TransitionTable};
use std::fmt;
use std::sync::Arc;

/// Number of transitions an instance remembers unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Settings shared by every instance of a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of history records kept per instance.
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Validated set of states, transitions and hooks.
///
/// A definition is immutable once built and is `Send + Sync` whenever its
/// state and event types are, so it can be wrapped in an `Arc` and shared by
/// any number of instances across threads.
pub struct MachineDefinition<S: State, E: Event, C, P = ()> {
    registry: StateRegistry<S>,
    initial: S,
    table: TransitionTable<S, E, C, P>,
    config: MachineConfig,
}

impl<S: State, E: Event, C, P> MachineDefinition<S, E, C, P> {
    pub(crate) fn from_parts(
        registry: StateRegistry<S>,
        initial: S,
        table: TransitionTable<S, E, C, P>,
        config: MachineConfig,
    ) -> Self {
        Self {
            registry,
            initial,
            table,
            config,
        }
    }

    /// Start a builder.
    pub fn builder() -> MachineBuilder<S, E, C, P> {
        MachineBuilder::new()
    }

    /// Validate and build a definition from its three essential parts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsmate::builder::simple_transition;
    /// use fsmate::machine::MachineDefinition;
    /// use fsmate::state_enum;
    ///
    /// state_enum! {
    ///     enum Light {
    ///         Red,
    ///         Green,
    ///     }
    /// }
    ///
    /// let definition = MachineDefinition::<Light, &str, ()>::build(
    ///     [Light::Red, Light::Green],
    ///     Light::Red,
    ///     vec![
    ///         simple_transition(Light::Red, "go", Light::Green),
    ///         simple_transition(Light::Green, "stop", Light::Red),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(definition.initial(), &Light::Red);
    /// ```
    pub fn build<I, T>(states: I, initial: S, transitions: T) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        T: IntoIterator<Item = TransitionDescriptor<S, E, C, P>>,
    {
        MachineBuilder::new()
            .states(states)
            .initial(initial)
            .transitions(transitions)
            .build()
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[S] {
        self.registry.states()
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.registry.contains(state)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn table(&self) -> &TransitionTable<S, E, C, P> {
        &self.table
    }

    /// All transitions leaving `state`.
    pub fn transitions_from<'a>(
        &'a self,
        state: &S,
    ) -> impl Iterator<Item = &'a TransitionDescriptor<S, E, C, P>> + 'a {
        self.table.transitions_from(state)
    }

    /// Create an instance bound to this definition.
    pub fn instantiate(self: &Arc<Self>, context: C) -> MachineInstance<S, E, C, P> {
        MachineInstance::new(Arc::clone(self), context)
    }
}

impl<S: State, E: Event, C, P> fmt::Debug for MachineDefinition<S, E, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineDefinition")
            .field("states", &self.registry.states())
            .field("initial", &self.initial)
            .field("transitions", &self.table.len())
            .field("config", &self.config)
            .finish()
    }
}
