//! Macros for declaring dense state and event enums.

/// Declare an enum whose variants map to consecutive [`State`](crate::State)
/// identifiers starting at zero.
///
/// Generates `From<Enum> for State`, `TryFrom<State> for Enum` (returning
/// the unmatched state as the error), a `name()` method and an `ALL` slice.
///
/// # Example
///
/// ```
/// use densefsm::{state_enum, State};
///
/// state_enum! {
///     pub enum Phase {
///         Idle,
///         Running,
///         Stopped,
///     }
/// }
///
/// assert_eq!(State::from(Phase::Running), State::new(1));
/// assert_eq!(Phase::try_from(State::new(2)), Ok(Phase::Stopped));
/// assert_eq!(Phase::try_from(State::new(3)), Err(State::new(3)));
/// assert_eq!(Phase::Idle.name(), "Idle");
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
    ) => {
        $crate::__dense_enum! {
            $crate::State;
            $(#[$meta])*
            $vis enum $name { $($(#[$variant_meta])* $variant),* }
        }
    };
}

/// Declare an enum whose variants map to consecutive [`Event`](crate::Event)
/// identifiers starting at zero.
///
/// # Example
///
/// ```
/// use densefsm::{event_enum, Event};
///
/// event_enum! {
///     pub enum Input {
///         Start,
///         Stop,
///     }
/// }
///
/// assert_eq!(Event::from(Input::Stop), Event::new(1));
/// assert_eq!(Input::ALL.len(), 2);
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
        $crate::__dense_enum! {
            $crate::Event;
            $(#[$meta])*
            $vis enum $name { $($(#[$variant_meta])* $variant),* }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dense_enum {
    (
        $id:ty;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant in identifier order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            /// The variant name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::core::convert::From<$name> for $id {
            fn from(value: $name) -> Self {
                <$id>::new(value as u32)
            }
        }

        impl ::core::convert::TryFrom<$id> for $name {
            type Error = $id;

            fn try_from(id: $id) -> ::core::result::Result<Self, Self::Error> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| *variant as u32 == id.id())
                    .ok_or(id)
            }
        }
    };
}
