//! Macros for declaring state keys.

/// Generate a state-key enum with the derives and [`StateKey`] impl the
/// runtime needs.
///
/// [`StateKey`]: crate::core::StateKey
///
/// # Example
///
/// ```
/// use statekit::state_key;
///
/// state_key! {
///     pub enum Motion {
///         Idle,
///         Run,
///         Attack,
///     }
/// }
///
/// use statekit::core::StateKey;
/// assert_eq!(Motion::Attack.name(), "Attack");
/// ```
#[macro_export]
macro_rules! state_key {
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
        #[derive(
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKey for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
