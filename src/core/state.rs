//! The `State` trait.
//!
//! A state is an opaque, comparable identifier for one position of a
//! machine instance. The engine never looks inside a state; it only hashes,
//! compares, clones and names it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A position a machine instance can occupy.
///
/// Beyond identity, states expose a name for logs and error messages and
/// two classification flags. Neither flag affects dispatch: a final state
/// is simply one that declares no outgoing transitions in a well-formed
/// definition.
///
/// States key the registry and the transition table (`Eq + Hash`), are
/// copied into outcomes and history (`Clone`), travel in snapshots
/// (`Serialize + Deserialize`) and live inside definitions shared between
/// threads (`Send + Sync`).
///
/// Most code derives states with [`state_enum!`](crate::state_enum); a
/// hand-written implementation looks like this:
///
/// ```rust
/// use fsmate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
///     Broken,
/// }
///
/// impl State for Light {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert_eq!(Light::Green.name(), "Green");
/// assert!(Light::Broken.is_error());
/// assert!(!Light::Broken.is_final());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable human-readable name, used in logs, errors and history.
    fn name(&self) -> &str;

    /// Whether the state is terminal. Defaults to `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether the state represents a failure. Defaults to `false`.
    fn is_error(&self) -> bool {
        false
    }
}
