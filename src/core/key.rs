//! Core StateKey trait for keyed state machines.
//!
//! A state key is an application-defined value identifying a logical
//! state. Keys are the cache index for resolved handler bundles, so they
//! must be stable, cheaply cloneable and totally ordered.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Trait for state machine keys.
///
/// A key selects a logical behavior set; it carries no behavior itself.
/// Small enums are the common case and the [`state_key!`](crate::state_key)
/// macro generates the required derives plus this impl for them.
///
/// # Required Traits
///
/// - `Clone`: keys are stored in the bundle cache and in current/previous
///   bookkeeping
/// - `Ord`: the bundle cache is an ordered map keyed by state key
/// - `Debug`: keys must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: keys must be serializable for diagnostics
///   and tooling
///
/// # Example
///
/// ```rust
/// use statekit::core::StateKey;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum Motion {
///     Idle,
///     Run,
///     Attack,
/// }
///
/// impl StateKey for Motion {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Run => "Run",
///             Self::Attack => "Attack",
///         }
///     }
/// }
///
/// assert_eq!(Motion::Run.name(), "Run");
/// ```
pub trait StateKey:
    Clone + Ord + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the key's name for display/logging.
    ///
    /// This is the stringified-key half of the `<Key>_<Suffix>` naming
    /// convention; the runtime uses it only for diagnostics.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
    enum TestKey {
        Idle,
        Run,
        Attack,
    }

    impl StateKey for TestKey {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Run => "Run",
                Self::Attack => "Attack",
            }
        }
    }

    #[test]
    fn key_name_returns_correct_value() {
        assert_eq!(TestKey::Idle.name(), "Idle");
        assert_eq!(TestKey::Run.name(), "Run");
        assert_eq!(TestKey::Attack.name(), "Attack");
    }

    #[test]
    fn key_is_totally_ordered() {
        assert!(TestKey::Idle < TestKey::Run);
        assert!(TestKey::Run < TestKey::Attack);
    }

    #[test]
    fn key_is_cloneable_and_comparable() {
        let key = TestKey::Run;
        let cloned = key.clone();
        assert_eq!(key, cloned);
        assert_ne!(key, TestKey::Idle);
    }

    #[test]
    fn key_serializes_correctly() {
        let key = TestKey::Attack;
        let json = serde_json::to_string(&key).unwrap();
        let deserialized: TestKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }
}
