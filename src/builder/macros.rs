//! Declaration macros for state and event enums.

/// Declare a fieldless enum usable as a machine state.
///
/// Derives the traits [`State`](crate::core::State) requires, names each
/// variant after its identifier and adds an `ALL` constant listing the
/// variants in declaration order. Optional `final:` and `error:` lists
/// mark terminal and failure states.
///
/// # Example
///
/// ```
/// use fsmate::core::State;
/// use fsmate::state_enum;
///
/// state_enum! {
///     pub enum Upload {
///         Queued,
///         Sending,
///         Stored,
///         Aborted,
///     }
///     final: [Stored, Aborted]
///     error: [Aborted]
/// }
///
/// assert_eq!(Upload::ALL.len(), 4);
/// assert_eq!(Upload::Sending.name(), "Sending");
/// assert!(Upload::Aborted.is_final() && Upload::Aborted.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                false $($(|| matches!(self, Self::$final))*)?
            }

            fn is_error(&self) -> bool {
                false $($(|| matches!(self, Self::$error))*)?
            }
        }
    };
}

/// Declare a fieldless enum usable as a machine event.
///
/// ```
/// use fsmate::core::Event;
/// use fsmate::event_enum;
///
/// event_enum! {
///     pub enum Button {
///         Press,
///         Hold,
///     }
/// }
///
/// assert_eq!(Button::Hold.name(), "Hold");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum Ticket {
            Open,
            Triaged,
            Resolved,
            Dropped,
        }
        final: [Resolved, Dropped]
        error: [Dropped]
    }

    event_enum! {
        enum TicketEvent {
            Triage,
            Resolve,
        }
    }

    #[test]
    fn state_names_match_variants() {
        let names: Vec<&str> = Ticket::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["Open", "Triaged", "Resolved", "Dropped"]);
    }

    #[test]
    fn final_and_error_lists_are_honored() {
        assert!(!Ticket::Open.is_final());
        assert!(!Ticket::Triaged.is_error());
        assert!(Ticket::Resolved.is_final());
        assert!(!Ticket::Resolved.is_error());
        assert!(Ticket::Dropped.is_final());
        assert!(Ticket::Dropped.is_error());
    }

    #[test]
    fn lists_are_optional() {
        state_enum! {
            enum Toggle {
                Off,
                On,
            }
        }

        assert!(Toggle::ALL.iter().all(|t| !t.is_final() && !t.is_error()));
    }

    #[test]
    fn event_names_match_variants() {
        assert_eq!(TicketEvent::Triage.name(), "Triage");
        assert_eq!(TicketEvent::Resolve.name(), "Resolve");
        assert_ne!(TicketEvent::Triage, TicketEvent::Resolve);
    }
}
