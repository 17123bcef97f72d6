//! Core types for the keyed state machine runtime.
//!
//! This module contains the building blocks the machine composes:
//! - State keys via the [`StateKey`] trait
//! - Payloads and animation-layer context types
//! - Handler slots, bindings and their no-op fallbacks
//! - The binding category mask
//! - Resolved handler bundles

mod bundle;
mod key;
mod mask;
mod payload;
mod slot;

pub use bundle::HandlerBundle;
pub use key::StateKey;
pub use mask::BindingMask;
pub use payload::{AnimatorHandle, LayerContext, ObjectRef, Payload, StateTiming};
pub use slot::{
    ArgsHandler, Binding, FloatEventHandler, IntEventHandler, LayerHandler, LayerSlot,
    ObjectEventHandler, PlainHandler, Slot, StrEventHandler,
};
