//! Resolved handler bundles.
//!
//! A bundle is the resolved behavior for one state key: every slot holds
//! either the handler the binding source produced or a no-op of the same
//! signature. Bundles are frozen once built; the cache hands out shared
//! references and never rebuilds an existing entry.

use super::mask::BindingMask;
use super::slot::{
    noop, noop_args, noop_float, noop_int, noop_layer, noop_object, noop_str, ArgsHandler, Binding,
    FloatEventHandler, IntEventHandler, LayerHandler, ObjectEventHandler, PlainHandler, Slot,
    StrEventHandler,
};
use super::StateKey;
use crate::bind::BindingSource;

/// Resolved, immutable callback set for one state key.
///
/// Every slot is always populated, so dispatch is a plain call with no
/// presence check. Built by the bundle cache on first visit to a key;
/// the passive bundle (all no-ops) is what an idle machine dispatches to.
pub struct HandlerBundle<O> {
    pub(crate) on_enter: PlainHandler<O>,
    pub(crate) on_enter_with_args: ArgsHandler<O>,
    pub(crate) on_exit: PlainHandler<O>,
    pub(crate) on_update: PlainHandler<O>,
    pub(crate) on_fixed_update: PlainHandler<O>,
    pub(crate) on_late_update: PlainHandler<O>,
    pub(crate) on_anim_enter: LayerHandler<O>,
    pub(crate) on_anim_move: LayerHandler<O>,
    pub(crate) on_anim_update: LayerHandler<O>,
    pub(crate) on_anim_exit: LayerHandler<O>,
    pub(crate) on_anim_event: PlainHandler<O>,
    pub(crate) on_anim_event_int: IntEventHandler<O>,
    pub(crate) on_anim_event_float: FloatEventHandler<O>,
    pub(crate) on_anim_event_str: StrEventHandler<O>,
    pub(crate) on_anim_event_object: ObjectEventHandler<O>,
}

impl<O> HandlerBundle<O> {
    /// Bundle with every slot set to the no-op of its signature.
    pub(crate) fn passive() -> Self {
        Self {
            on_enter: noop(),
            on_enter_with_args: noop_args(),
            on_exit: noop(),
            on_update: noop(),
            on_fixed_update: noop(),
            on_late_update: noop(),
            on_anim_enter: noop_layer(),
            on_anim_move: noop_layer(),
            on_anim_update: noop_layer(),
            on_anim_exit: noop_layer(),
            on_anim_event: noop(),
            on_anim_event_int: noop_int(),
            on_anim_event_float: noop_float(),
            on_anim_event_str: noop_str(),
            on_anim_event_object: noop_object(),
        }
    }

    /// Resolve a bundle for `key` under `mask`.
    ///
    /// Only categories enabled in the mask consult the source; disabled
    /// categories keep their no-ops regardless of what the source would
    /// return for them.
    pub(crate) fn build<K: StateKey>(
        key: &K,
        mask: BindingMask,
        source: &dyn BindingSource<K, O>,
    ) -> Self {
        let mut bundle = Self::passive();

        if mask.contains(BindingMask::NORMAL_LIFECYCLE) {
            bundle.on_enter = resolve_plain(source, key, Slot::Enter);
            bundle.on_enter_with_args = resolve_args(source, key);
            bundle.on_exit = resolve_plain(source, key, Slot::Exit);
            bundle.on_update = resolve_plain(source, key, Slot::Update);
            bundle.on_fixed_update = resolve_plain(source, key, Slot::FixedUpdate);
            bundle.on_late_update = resolve_plain(source, key, Slot::LateUpdate);
        }

        if mask.contains(BindingMask::ANIM_LAYER_CALLBACKS) {
            bundle.on_anim_enter = resolve_layer(source, key, Slot::AnimEnter);
            bundle.on_anim_move = resolve_layer(source, key, Slot::AnimMove);
            bundle.on_anim_update = resolve_layer(source, key, Slot::AnimUpdate);
            bundle.on_anim_exit = resolve_layer(source, key, Slot::AnimExit);
        }

        if mask.contains(BindingMask::ANIM_EVENT_CALLBACKS) {
            bundle.on_anim_event = resolve_plain(source, key, Slot::AnimEvent);
            bundle.on_anim_event_int = match source.resolve(key, Slot::AnimEventInt) {
                Some(Binding::EventInt(h)) => h,
                _ => noop_int(),
            };
            bundle.on_anim_event_float = match source.resolve(key, Slot::AnimEventFloat) {
                Some(Binding::EventFloat(h)) => h,
                _ => noop_float(),
            };
            bundle.on_anim_event_str = match source.resolve(key, Slot::AnimEventStr) {
                Some(Binding::EventStr(h)) => h,
                _ => noop_str(),
            };
            bundle.on_anim_event_object = match source.resolve(key, Slot::AnimEventObject) {
                Some(Binding::EventObject(h)) => h,
                _ => noop_object(),
            };
        }

        bundle
    }
}

fn resolve_plain<K: StateKey, O>(
    source: &dyn BindingSource<K, O>,
    key: &K,
    slot: Slot,
) -> PlainHandler<O> {
    match source.resolve(key, slot) {
        Some(Binding::Plain(h)) => h,
        _ => noop(),
    }
}

fn resolve_args<K: StateKey, O>(source: &dyn BindingSource<K, O>, key: &K) -> ArgsHandler<O> {
    match source.resolve(key, Slot::EnterWithArgs) {
        Some(Binding::WithArgs(h)) => h,
        _ => noop_args(),
    }
}

fn resolve_layer<K: StateKey, O>(
    source: &dyn BindingSource<K, O>,
    key: &K,
    slot: Slot,
) -> LayerHandler<O> {
    match source.resolve(key, slot) {
        Some(Binding::Layer(h)) => h,
        _ => noop_layer(),
    }
}
