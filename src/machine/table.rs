//! Transition table: resolves (state, event) pairs to descriptors.

use crate::core::{Action, Event, Guard, State};
use crate::machine::outcome::{ActionPhase, Rejection};
use std::collections::HashMap;
use std::fmt;

/// A single declared transition.
///
/// Guards are checked left to right and short-circuit on the first one
/// that fails. Actions run in declaration order.
pub struct TransitionDescriptor<S: State, E: Event, C, P = ()> {
    pub(crate) from: S,
    pub(crate) event: E,
    pub(crate) to: S,
    pub(crate) guards: Vec<Guard<C, P>>,
    pub(crate) actions: Vec<Action<S, E, C, P>>,
}

impl<S: State, E: Event, C, P> TransitionDescriptor<S, E, C, P> {
    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn event(&self) -> &E {
        &self.event
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn guards(&self) -> &[Guard<C, P>] {
        &self.guards
    }

    pub fn actions(&self) -> &[Action<S, E, C, P>] {
        &self.actions
    }

    pub fn is_guarded(&self) -> bool {
        !self.guards.is_empty()
    }

    /// Evaluate the guard sequence (pure).
    pub fn guards_pass(&self, context: &C, payload: &P) -> bool {
        self.guards.iter().all(|guard| guard.check(context, payload))
    }
}

impl<S: State, E: Event, C, P> Clone for TransitionDescriptor<S, E, C, P> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<S: State, E: Event, C, P> fmt::Debug for TransitionDescriptor<S, E, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDescriptor")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("guards", &self.guards.len())
            .field("actions", &self.actions)
            .finish()
    }
}

/// Outgoing transitions of one state.
struct StateRow<S: State, E: Event, C, P> {
    by_event: HashMap<E, Vec<TransitionDescriptor<S, E, C, P>>>,
    event_order: Vec<E>,
}

impl<S: State, E: Event, C, P> Default for StateRow<S, E, C, P> {
    fn default() -> Self {
        Self {
            by_event: HashMap::new(),
            event_order: Vec::new(),
        }
    }
}

/// Immutable lookup structure built from validated descriptors.
///
/// Candidates for a (state, event) pair keep their declaration order,
/// which is the tie-break when several guards would pass.
pub struct TransitionTable<S: State, E: Event, C, P = ()> {
    rows: HashMap<S, StateRow<S, E, C, P>>,
    entry_hooks: HashMap<S, Vec<Action<S, E, C, P>>>,
    exit_hooks: HashMap<S, Vec<Action<S, E, C, P>>>,
    enter_any: Vec<Action<S, E, C, P>>,
    exit_any: Vec<Action<S, E, C, P>>,
    on_transition: Vec<Action<S, E, C, P>>,
    len: usize,
}

/// Hooks collected by the builder, before grouping by state.
pub(crate) struct Hooks<S, E, C, P> {
    pub(crate) entry: Vec<(S, Action<S, E, C, P>)>,
    pub(crate) exit: Vec<(S, Action<S, E, C, P>)>,
    pub(crate) enter_any: Vec<Action<S, E, C, P>>,
    pub(crate) exit_any: Vec<Action<S, E, C, P>>,
    pub(crate) on_transition: Vec<Action<S, E, C, P>>,
}

impl<S, E, C, P> Default for Hooks<S, E, C, P> {
    fn default() -> Self {
        Self {
            entry: Vec::new(),
            exit: Vec::new(),
            enter_any: Vec::new(),
            exit_any: Vec::new(),
            on_transition: Vec::new(),
        }
    }
}

impl<S: State, E: Event, C, P> TransitionTable<S, E, C, P> {
    pub(crate) fn new(
        descriptors: Vec<TransitionDescriptor<S, E, C, P>>,
        hooks: Hooks<S, E, C, P>,
    ) -> Self {
        let len = descriptors.len();
        let mut rows: HashMap<S, StateRow<S, E, C, P>> = HashMap::new();
        for descriptor in descriptors {
            let row = rows.entry(descriptor.from.clone()).or_default();
            if !row.by_event.contains_key(&descriptor.event) {
                row.event_order.push(descriptor.event.clone());
            }
            row.by_event
                .entry(descriptor.event.clone())
                .or_default()
                .push(descriptor);
        }

        Self {
            rows,
            entry_hooks: group_hooks(hooks.entry),
            exit_hooks: group_hooks(hooks.exit),
            enter_any: hooks.enter_any,
            exit_any: hooks.exit_any,
            on_transition: hooks.on_transition,
            len,
        }
    }

    /// Candidates for `(state, event)` in declaration order.
    pub fn candidates(&self, state: &S, event: &E) -> &[TransitionDescriptor<S, E, C, P>] {
        self.rows
            .get(state)
            .and_then(|row| row.by_event.get(event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Select the first candidate whose guards all pass.
    ///
    /// Runs no actions; safe to call speculatively.
    pub fn resolve(
        &self,
        state: &S,
        event: &E,
        context: &C,
        payload: &P,
    ) -> Result<&TransitionDescriptor<S, E, C, P>, Rejection> {
        let candidates = self.candidates(state, event);
        if candidates.is_empty() {
            return Err(Rejection::NoMatchingTransition);
        }
        candidates
            .iter()
            .find(|descriptor| descriptor.guards_pass(context, payload))
            .ok_or(Rejection::AllGuardsFailed)
    }

    /// Distinct events with at least one candidate from `state`.
    pub fn events_from(&self, state: &S) -> &[E] {
        self.rows
            .get(state)
            .map(|row| row.event_order.as_slice())
            .unwrap_or(&[])
    }

    /// All transitions leaving `state`, grouped by event in declaration order.
    pub fn transitions_from<'a>(
        &'a self,
        state: &S,
    ) -> impl Iterator<Item = &'a TransitionDescriptor<S, E, C, P>> + 'a {
        self.rows.get(state).into_iter().flat_map(|row| {
            row.event_order
                .iter()
                .filter_map(move |event| row.by_event.get(event))
                .flatten()
        })
    }

    pub fn entry_hooks(&self, state: &S) -> &[Action<S, E, C, P>] {
        self.entry_hooks
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn exit_hooks(&self, state: &S) -> &[Action<S, E, C, P>] {
        self.exit_hooks
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every action a committed transition runs, in execution order.
    ///
    /// Within each phase, hooks bound to a specific state run before the
    /// machine-wide ones, and the transition's own actions run before
    /// `on_transition` hooks.
    pub fn action_plan<'a>(
        &'a self,
        descriptor: &'a TransitionDescriptor<S, E, C, P>,
    ) -> impl Iterator<Item = (ActionPhase, &'a Action<S, E, C, P>)> + 'a {
        let exits = self
            .exit_hooks(&descriptor.from)
            .iter()
            .chain(&self.exit_any)
            .map(|action| (ActionPhase::Exit, action));
        let own = descriptor
            .actions
            .iter()
            .chain(&self.on_transition)
            .map(|action| (ActionPhase::Transition, action));
        let entries = self
            .entry_hooks(&descriptor.to)
            .iter()
            .chain(&self.enter_any)
            .map(|action| (ActionPhase::Entry, action));
        exits.chain(own).chain(entries)
    }

    /// Number of descriptors in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn group_hooks<S: State, A>(hooks: Vec<(S, A)>) -> HashMap<S, Vec<A>> {
    let mut grouped: HashMap<S, Vec<A>> = HashMap::new();
    for (state, action) in hooks {
        grouped.entry(state).or_default().push(action);
    }
    grouped
}
