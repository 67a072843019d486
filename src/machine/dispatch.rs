//! Event dispatch and introspection.
//!
//! Dispatch resolves an event against the current state, runs the selected
//! transition's actions against a staged copy of the context and commits
//! state and context together only when every action succeeded. A failing
//! action therefore leaves the instance exactly as it was before the call.

use crate::core::{Event, State, TransitionInfo};
use crate::machine::instance::MachineInstance;
use crate::machine::outcome::{DispatchError, TransitionOutcome};
use std::sync::Arc;
use tracing::{debug, debug_span, warn};

impl<S: State, E: Event, C: Clone, P> MachineInstance<S, E, C, P> {
    /// Dispatch an event with a payload.
    ///
    /// Returns `Ok(Accepted)` when a transition was committed,
    /// `Ok(Rejected)` when the event was ignored, and `Err` when an action
    /// failed. In both non-accepted cases the current state and context are
    /// unchanged. A panicking guard or action propagates; nothing is
    /// committed in that case either.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fsmate::builder::{MachineBuilder, TransitionBuilder};
    /// use fsmate::machine::{MachineInstance, Rejection, TransitionOutcome};
    /// use fsmate::state_enum;
    /// use std::sync::Arc;
    ///
    /// state_enum! {
    ///     enum Job {
    ///         Idle,
    ///         Running,
    ///         Done,
    ///     }
    ///     final: [Done]
    /// }
    ///
    /// let definition = MachineBuilder::<Job, &str, (), bool>::new()
    ///     .states([Job::Idle, Job::Running, Job::Done])
    ///     .initial(Job::Idle)
    ///     .transition(TransitionBuilder::new().from(Job::Idle).on("start").to(Job::Running))
    ///     .unwrap()
    ///     .transition(
    ///         TransitionBuilder::new()
    ///             .from(Job::Running)
    ///             .on("finish")
    ///             .to(Job::Done)
    ///             .when(|_, ok: &bool| *ok),
    ///     )
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut job = MachineInstance::new(Arc::new(definition), ());
    ///
    /// assert_eq!(
    ///     job.dispatch(&"finish", &true).unwrap(),
    ///     TransitionOutcome::Rejected(Rejection::NoMatchingTransition)
    /// );
    /// job.dispatch(&"start", &false).unwrap();
    /// assert_eq!(
    ///     job.dispatch(&"finish", &false).unwrap(),
    ///     TransitionOutcome::Rejected(Rejection::AllGuardsFailed)
    /// );
    /// assert!(job.dispatch(&"finish", &true).unwrap().is_accepted());
    /// assert!(job.is_final());
    /// ```
    pub fn dispatch(
        &mut self,
        event: &E,
        payload: &P,
    ) -> Result<TransitionOutcome<S>, DispatchError<S, E>> {
        let span = debug_span!(
            "dispatch",
            instance = %self.id,
            state = self.current.name(),
            event = event.name()
        );
        let _entered = span.enter();

        let definition = Arc::clone(&self.definition);
        let table = definition.table();

        let descriptor = match table.resolve(&self.current, event, &self.context, payload) {
            Ok(descriptor) => descriptor,
            Err(rejection) => {
                debug!(%rejection, "event rejected");
                return Ok(TransitionOutcome::Rejected(rejection));
            }
        };

        let info = TransitionInfo {
            from: &self.current,
            to: descriptor.to(),
            event,
        };
        let mut plan = table.action_plan(descriptor).enumerate().peekable();
        if plan.peek().is_some() {
            let mut staged = self.context.clone();
            for (index, (phase, action)) in plan {
                if let Err(source) = action.run(&mut staged, payload, &info) {
                    warn!(
                        %phase,
                        index,
                        action = action.name().unwrap_or("<anonymous>"),
                        to = descriptor.to().name(),
                        error = %source,
                        "action failed, transition rolled back"
                    );
                    return Err(DispatchError::ActionFailed {
                        from: self.current.clone(),
                        to: descriptor.to().clone(),
                        event: event.clone(),
                        phase,
                        index,
                        action: action.name().map(str::to_string),
                        source,
                    });
                }
            }
            self.context = staged;
        }

        let from = std::mem::replace(&mut self.current, descriptor.to().clone());
        self.record(from.clone(), event);
        debug!(
            from = from.name(),
            to = self.current.name(),
            "transition committed"
        );

        Ok(TransitionOutcome::Accepted {
            from,
            to: self.current.clone(),
        })
    }

    /// Dispatch an event without payload data.
    pub fn fire(&mut self, event: &E) -> Result<TransitionOutcome<S>, DispatchError<S, E>>
    where
        P: Default,
    {
        self.dispatch(event, &P::default())
    }
}

impl<S: State, E: Event, C, P> MachineInstance<S, E, C, P> {
    /// Whether `dispatch(event, payload)` would select a transition right now.
    ///
    /// Evaluates guards only; runs no actions and changes nothing.
    pub fn can_fire(&self, event: &E, payload: &P) -> bool {
        self.definition
            .table()
            .resolve(&self.current, event, &self.context, payload)
            .is_ok()
    }

    /// Events with at least one transition from the current state,
    /// regardless of guards, in declaration order.
    pub fn available_events(&self) -> Vec<&E> {
        self.definition
            .table()
            .events_from(&self.current)
            .iter()
            .collect()
    }
}
