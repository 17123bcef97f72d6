//! Payload and animation context types.
//!
//! Animation events arrive with zero or one payload drawn from a small,
//! fixed set of types. `Payload` is the tagged union over that set; the
//! same union carries transition arguments for with-args state entry.
//! Animation-layer callbacks carry a three-part context identifying the
//! animator, the layer state's timing and the layer index.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared reference to an opaque application object.
///
/// Stand-in for the engine-object payload variant of animation events.
pub type ObjectRef = Arc<dyn Any + Send + Sync>;

/// A single animation-event payload or transition argument.
///
/// The variant set is closed: dispatch selects the handler slot matching
/// the variant, so there is no open-ended runtime type discovery.
///
/// # Example
///
/// ```rust
/// use statekit::core::Payload;
///
/// let args = [Payload::from(1), Payload::from(2.5f32), Payload::from("hit")];
/// assert_eq!(args[0], Payload::Int(1));
/// ```
#[derive(Clone)]
pub enum Payload {
    /// Integer payload
    Int(i32),
    /// Floating-point payload
    Float(f32),
    /// String payload
    Str(String),
    /// Opaque object-reference payload
    Object(ObjectRef),
}

impl Payload {
    /// Wrap an application object as an object-reference payload.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Object(Arc::new(value))
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Payload::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Payload::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Payload::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Str(a), Payload::Str(b)) => a == b,
            // Object payloads compare by identity, not contents.
            (Payload::Object(a), Payload::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i32> for Payload {
    fn from(v: i32) -> Self {
        Payload::Int(v)
    }
}

impl From<f32> for Payload {
    fn from(v: f32) -> Self {
        Payload::Float(v)
    }
}

impl From<&str> for Payload {
    fn from(v: &str) -> Self {
        Payload::Str(v.to_string())
    }
}

impl From<String> for Payload {
    fn from(v: String) -> Self {
        Payload::Str(v)
    }
}

/// Opaque handle identifying an animator instance on the host side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AnimatorHandle(pub u64);

/// Timing info for the animation-layer state raising a notification.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StateTiming {
    /// Progress through the layer state, in loops (1.0 = one full pass)
    pub normalized_time: f32,
    /// Length of the layer state in seconds
    pub length: f32,
    /// Playback speed multiplier
    pub speed: f32,
    /// Whether the layer state loops
    pub looping: bool,
}

/// Context delivered with every animation-layer notification.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct LayerContext {
    /// The animator that raised the notification
    pub animator: AnimatorHandle,
    /// Timing info for the layer state
    pub timing: StateTiming,
    /// Index of the layer within the animator
    pub layer_index: usize,
}

impl LayerContext {
    /// Build a context for `animator` and `layer_index` with default timing.
    pub fn new(animator: AnimatorHandle, layer_index: usize) -> Self {
        Self {
            animator,
            timing: StateTiming::default(),
            layer_index,
        }
    }
}
