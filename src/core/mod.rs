//! Core state machine types.
//!
//! This module contains the building blocks shared by definitions and
//! instances:
//! - State and event identifiers via the `State` and `Event` traits
//! - Guard predicates for transition control
//! - Actions run while committing a transition
//! - Immutable history tracking

mod action;
mod event;
mod guard;
mod history;
mod state;

pub use action::{Action, ActionError, TransitionInfo};
pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
