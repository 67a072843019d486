//! Registry of the states a definition declares.

use crate::core::State;
use std::collections::HashSet;

/// Set of valid states, remembering declaration order.
///
/// Duplicate declarations are ignored; the first position wins.
#[derive(Clone, Debug)]
pub struct StateRegistry<S: State> {
    order: Vec<S>,
    members: HashSet<S>,
}

impl<S: State> StateRegistry<S> {
    pub fn new<I>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut registry = Self {
            order: Vec::new(),
            members: HashSet::new(),
        };
        for state in states {
            if registry.members.insert(state.clone()) {
                registry.order.push(state);
            }
        }
        registry
    }

    pub fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }

    /// States in declaration order.
    pub fn states(&self) -> &[S] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
