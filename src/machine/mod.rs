//! The transition engine.
//!
//! - [`MachineDefinition`]: immutable blueprint (state registry plus
//!   transition table), validated once and shared by `Arc`
//! - [`MachineInstance`]: mutable cursor holding the current state and the
//!   user context
//! - dispatch: resolves events, runs actions transactionally and commits
//! - [`StateMethod`]: behavior selected by the instance's current state

mod definition;
mod dispatch;
mod instance;
mod method;
mod outcome;
mod registry;
mod table;

pub use definition::{MachineConfig, MachineDefinition, DEFAULT_HISTORY_LIMIT};
pub use instance::MachineInstance;
pub use method::{StateMethod, StateMethodBuilder};
pub use outcome::{ActionPhase, DispatchError, Rejection, TransitionOutcome};
pub use registry::StateRegistry;
pub(crate) use table::Hooks;
pub use table::{TransitionDescriptor, TransitionTable};
