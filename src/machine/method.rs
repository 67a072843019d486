//! Behavior selected by an instance's current state.
//!
//! A [`StateMethod`] holds one handler per state plus a fallback. Calling it
//! runs the handler registered for the instance's current state, or the
//! fallback when the state has none. Handlers receive the instance mutably
//! and may dispatch events themselves.

use crate::builder::ValidationError;
use crate::core::{Event, State};
use crate::machine::definition::MachineDefinition;
use crate::machine::instance::MachineInstance;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type Handler<S, E, C, P, A, R> =
    Arc<dyn Fn(&mut MachineInstance<S, E, C, P>, A) -> R + Send + Sync>;

/// Collects overloads before they are checked against a definition.
pub struct StateMethodBuilder<S: State, E: Event, C, P, A, R> {
    fallback: Handler<S, E, C, P, A, R>,
    overloads: Vec<(Vec<S>, Handler<S, E, C, P, A, R>)>,
}

impl<S: State, E: Event, C, P, A, R> StateMethodBuilder<S, E, C, P, A, R> {
    /// Register `handler` for every state in `states`.
    pub fn overload<I, F>(mut self, states: I, handler: F) -> Self
    where
        I: IntoIterator<Item = S>,
        F: Fn(&mut MachineInstance<S, E, C, P>, A) -> R + Send + Sync + 'static,
    {
        self.overloads
            .push((states.into_iter().collect(), Arc::new(handler)));
        self
    }

    /// Check every overloaded state against `definition`.
    ///
    /// Fails on states the definition does not declare and on states
    /// overloaded more than once.
    pub fn build(
        self,
        definition: &MachineDefinition<S, E, C, P>,
    ) -> Result<StateMethod<S, E, C, P, A, R>, ValidationError> {
        let mut handlers = HashMap::new();
        for (states, handler) in self.overloads {
            for state in states {
                if !definition.contains_state(&state) {
                    return Err(ValidationError::UnknownOverloadState {
                        state: state.name().to_string(),
                    });
                }
                if handlers.contains_key(&state) {
                    return Err(ValidationError::DuplicateOverload {
                        state: state.name().to_string(),
                    });
                }
                handlers.insert(state, Arc::clone(&handler));
            }
        }

        Ok(StateMethod {
            handlers,
            fallback: self.fallback,
        })
    }
}

/// State-dependent behavior with a fallback.
///
/// # Example
///
/// ```rust
/// use fsmate::builder::{simple_transition, MachineBuilder};
/// use fsmate::machine::{MachineInstance, StateMethod};
/// use fsmate::state_enum;
/// use std::sync::Arc;
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Opening,
///     }
/// }
///
/// type DoorInstance = MachineInstance<Door, &'static str, u32>;
///
/// let definition = Arc::new(
///     MachineBuilder::<Door, &'static str, u32>::new()
///         .states([Door::Closed, Door::Opening])
///         .initial(Door::Closed)
///         .add_transition(simple_transition(Door::Closed, "open", Door::Opening))
///         .build()
///         .unwrap(),
/// );
///
/// let push_button = StateMethod::builder(|door: &mut DoorInstance, ()| {
///     *door.context_mut() += 1;
///     "beep"
/// })
/// .overload([Door::Closed], |door: &mut DoorInstance, ()| {
///     door.fire(&"open").unwrap();
///     "opening"
/// })
/// .build(&definition)
/// .unwrap();
///
/// let mut door = MachineInstance::new(definition, 0);
/// assert_eq!(push_button.call(&mut door, ()), "opening");
/// assert_eq!(push_button.call(&mut door, ()), "beep");
/// assert_eq!(*door.context(), 1);
/// ```
pub struct StateMethod<S: State, E: Event, C, P, A, R> {
    handlers: HashMap<S, Handler<S, E, C, P, A, R>>,
    fallback: Handler<S, E, C, P, A, R>,
}

impl<S: State, E: Event, C, P, A, R> StateMethod<S, E, C, P, A, R> {
    /// Start a builder with the handler used for states without overloads.
    pub fn builder<F>(fallback: F) -> StateMethodBuilder<S, E, C, P, A, R>
    where
        F: Fn(&mut MachineInstance<S, E, C, P>, A) -> R + Send + Sync + 'static,
    {
        StateMethodBuilder {
            fallback: Arc::new(fallback),
            overloads: Vec::new(),
        }
    }

    /// Run the handler for the instance's current state.
    pub fn call(&self, instance: &mut MachineInstance<S, E, C, P>, args: A) -> R {
        let handler = match self.handlers.get(instance.current_state()) {
            Some(handler) => handler,
            None => {
                trace!(state = instance.current_state().name(), "using fallback handler");
                &self.fallback
            }
        };
        handler(instance, args)
    }

    pub fn is_overloaded(&self, state: &S) -> bool {
        self.handlers.contains_key(state)
    }
}

impl<S: State, E: Event, C, P, A, R> fmt::Debug for StateMethod<S, E, C, P, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMethod")
            .field("overloads", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
