//! Event trait for the stimuli that drive transitions.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for events that may trigger a transition.
///
/// Events are opaque, comparable identifiers. Data that varies per
/// occurrence belongs in the dispatch payload, not in the event itself.
///
/// # Example
///
/// ```rust
/// use fsmate::core::Event;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum DoorEvent {
///     Push,
///     Stop,
/// }
///
/// impl Event for DoorEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Push => "Push",
///             Self::Stop => "Stop",
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Push.name(), "Push");
/// ```
pub trait Event: Clone + Eq + Hash + Debug + Send + Sync {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}

impl Event for &'static str {
    fn name(&self) -> &str {
        *self
    }
}

impl Event for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
