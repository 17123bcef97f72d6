//! Binding resolution.
//!
//! The owner declares its handler surface up front in a [`Bindings`]
//! table, and the [`BindingSource`] trait is the seam the bundle builder
//! resolves through. A missing binding is the expected common case and
//! resolves to a no-op, never an error.

use crate::core::{
    ArgsHandler, Binding, FloatEventHandler, IntEventHandler, LayerContext, LayerHandler,
    ObjectEventHandler, ObjectRef, Payload, PlainHandler, Slot, StateKey, StrEventHandler,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Source of handler bindings for a machine.
///
/// `resolve` is a pure lookup: given a key and a slot, return the handler
/// registered for them, or `None`. Returning a binding whose shape does
/// not match the slot also counts as a miss.
///
/// Implemented by [`Bindings`]; tests wrap a source to count resolutions.
pub trait BindingSource<K: StateKey, O>: Send + Sync {
    /// Look up the handler bound to `key` + `slot`.
    fn resolve(&self, key: &K, slot: Slot) -> Option<Binding<O>>;
}

/// Explicit registration table mapping key + slot to a handler.
///
/// Built fluently by the owner at configuration time. Registering the
/// same key + slot twice replaces the earlier handler.
///
/// # Example
///
/// ```rust
/// use statekit::bind::Bindings;
/// use statekit::state_key;
///
/// state_key! {
///     enum Motion {
///         Idle,
///         Run,
///     }
/// }
///
/// struct Player {
///     speed: f32,
/// }
///
/// let bindings = Bindings::new()
///     .on_enter(Motion::Run, |p: &mut Player| p.speed = 6.0)
///     .on_exit(Motion::Run, |p: &mut Player| p.speed = 0.0);
/// assert_eq!(bindings.len(), 2);
/// ```
pub struct Bindings<K: StateKey, O> {
    entries: BTreeMap<K, BTreeMap<Slot, Binding<O>>>,
}

impl<K: StateKey, O> Bindings<K, O> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a pre-tagged binding for `key` + `slot`.
    ///
    /// The typed `on_*` methods are the usual surface; this is the raw
    /// entry point they all funnel through.
    pub fn register(mut self, key: K, slot: Slot, binding: Binding<O>) -> Self {
        self.entries.entry(key).or_default().insert(slot, binding);
        self
    }

    /// Bind the no-arg entry slot.
    pub fn on_enter(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::Enter, Binding::Plain(Arc::new(f)))
    }

    /// Bind the with-args entry slot.
    pub fn on_enter_with_args(
        self,
        key: K,
        f: impl Fn(&mut O, &[Payload]) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::EnterWithArgs, Binding::WithArgs(Arc::new(f)))
    }

    /// Bind the exit slot.
    pub fn on_exit(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::Exit, Binding::Plain(Arc::new(f)))
    }

    /// Bind the per-frame update slot.
    pub fn on_update(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::Update, Binding::Plain(Arc::new(f)))
    }

    /// Bind the fixed-update slot.
    pub fn on_fixed_update(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::FixedUpdate, Binding::Plain(Arc::new(f)))
    }

    /// Bind the late-update slot.
    pub fn on_late_update(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::LateUpdate, Binding::Plain(Arc::new(f)))
    }

    /// Bind the animation-layer enter slot.
    pub fn on_anim_enter(
        self,
        key: K,
        f: impl Fn(&mut O, &LayerContext) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimEnter, Binding::Layer(Arc::new(f)))
    }

    /// Bind the animation-layer move slot.
    pub fn on_anim_move(
        self,
        key: K,
        f: impl Fn(&mut O, &LayerContext) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimMove, Binding::Layer(Arc::new(f)))
    }

    /// Bind the animation-layer update slot.
    pub fn on_anim_update(
        self,
        key: K,
        f: impl Fn(&mut O, &LayerContext) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimUpdate, Binding::Layer(Arc::new(f)))
    }

    /// Bind the animation-layer exit slot.
    pub fn on_anim_exit(
        self,
        key: K,
        f: impl Fn(&mut O, &LayerContext) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimExit, Binding::Layer(Arc::new(f)))
    }

    /// Bind the no-payload animation-event slot.
    pub fn on_anim_event(self, key: K, f: impl Fn(&mut O) + Send + Sync + 'static) -> Self {
        self.register(key, Slot::AnimEvent, Binding::Plain(Arc::new(f)))
    }

    /// Bind the integer animation-event slot.
    pub fn on_anim_event_int(
        self,
        key: K,
        f: impl Fn(&mut O, i32) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimEventInt, Binding::EventInt(Arc::new(f)))
    }

    /// Bind the float animation-event slot.
    pub fn on_anim_event_float(
        self,
        key: K,
        f: impl Fn(&mut O, f32) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimEventFloat, Binding::EventFloat(Arc::new(f)))
    }

    /// Bind the string animation-event slot.
    pub fn on_anim_event_str(
        self,
        key: K,
        f: impl Fn(&mut O, &str) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimEventStr, Binding::EventStr(Arc::new(f)))
    }

    /// Bind the object-reference animation-event slot.
    pub fn on_anim_event_object(
        self,
        key: K,
        f: impl Fn(&mut O, &ObjectRef) + Send + Sync + 'static,
    ) -> Self {
        self.register(key, Slot::AnimEventObject, Binding::EventObject(Arc::new(f)))
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no bindings at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: StateKey, O> Default for Bindings<K, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey, O> BindingSource<K, O> for Bindings<K, O> {
    fn resolve(&self, key: &K, slot: Slot) -> Option<Binding<O>> {
        self.entries.get(key)?.get(&slot).cloned()
    }
}
