//! fsmate: declarative finite state machines
//!
//! A machine is declared once as an immutable [`MachineDefinition`]: the
//! legal states, the initial state and a table of transitions keyed by
//! `(source state, event)`. Each transition may carry guards (pure
//! predicates over the context and the event payload) and actions
//! (callbacks that mutate the context). Definitions are validated when
//! built and shared by `Arc` between any number of [`MachineInstance`]s.
//!
//! # Core Concepts
//!
//! - **State** / **Event**: user types implementing the [`State`] and
//!   [`Event`] traits, usually through [`state_enum!`] and [`event_enum!`]
//! - **Guards**: predicates deciding whether a candidate transition applies;
//!   the first candidate in declaration order whose guards all pass wins
//! - **Actions**: exit hooks of the source state, then the transition's own
//!   actions, then entry hooks of the target state; machine-wide hooks run
//!   after the state-specific ones of each phase and every action can see
//!   the firing transition through [`TransitionInfo`]
//! - **Transactional dispatch**: state and context change together or not
//!   at all
//! - **History**: bounded record of committed transitions per instance
//! - **Snapshots**: serializable current state plus history, restorable
//!   against the same definition
//!
//! # Example
//!
//! ```rust
//! use fsmate::builder::{MachineBuilder, TransitionBuilder};
//! use fsmate::core::Action;
//! use fsmate::machine::MachineInstance;
//! use fsmate::state_enum;
//! use std::sync::Arc;
//!
//! state_enum! {
//!     enum Turnstile {
//!         Locked,
//!         Unlocked,
//!     }
//! }
//!
//! let definition = MachineBuilder::<Turnstile, &str, u32>::new()
//!     .states([Turnstile::Locked, Turnstile::Unlocked])
//!     .initial(Turnstile::Locked)
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Turnstile::Locked)
//!             .on("coin")
//!             .to(Turnstile::Unlocked)
//!             .run(|coins: &mut u32, _| {
//!                 *coins += 1;
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap()
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Turnstile::Unlocked)
//!             .on("push")
//!             .to(Turnstile::Locked),
//!     )
//!     .unwrap()
//!     .on_enter(Turnstile::Locked, Action::infallible(|_: &mut u32, _| {}))
//!     .build()
//!     .unwrap();
//!
//! let mut gate = MachineInstance::new(Arc::new(definition), 0);
//!
//! assert!(gate.fire(&"push").unwrap().is_rejected());
//! assert!(gate.fire(&"coin").unwrap().is_accepted());
//! assert_eq!(gate.current_state(), &Turnstile::Unlocked);
//! assert_eq!(*gate.context(), 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{MachineBuilder, TransitionBuilder, ValidationError};
pub use checkpoint::{Snapshot, SnapshotError};
pub use core::{
    Action, ActionError, Event, Guard, State, StateHistory, StateTransition, TransitionInfo,
};
pub use machine::{
    DispatchError, MachineDefinition, MachineInstance, Rejection, StateMethod, TransitionOutcome,
};
