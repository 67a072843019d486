//! Validation errors for machine definitions and their builders.

use thiserror::Error;

/// Errors that can occur when building a machine definition.
///
/// States and events are reported by name so the error stays independent
/// of the machine's type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial state '{state}' is not a declared state")]
    UnknownInitialState { state: String },

    #[error("Transition '{from}' --{event}--> '{to}' references undeclared state '{missing}'")]
    DanglingTransition {
        from: String,
        event: String,
        to: String,
        missing: String,
    },

    #[error("Two unguarded transitions leave '{from}' on event '{event}'")]
    DuplicateUnguardedTransition { from: String, event: String },

    #[error("Hook registered for undeclared state '{state}'")]
    UnknownHookState { state: String },

    #[error("Transition source state not specified. Call .from(state) or .from_any(states)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Overload registered for undeclared state '{state}'")]
    UnknownOverloadState { state: String },

    #[error("State '{state}' is already overloaded")]
    DuplicateOverload { state: String },
}
