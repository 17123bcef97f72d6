//! Handler slots and bindings.
//!
//! A handler bundle has a fixed, enumerated set of callback slots. `Slot`
//! names each slot; `Binding` is a resolved handler tagged with its
//! signature shape. Every slot has a no-op of the matching signature so
//! dispatch never branches on "handler present".

use super::payload::{LayerContext, ObjectRef, Payload};
use std::sync::Arc;

/// Handler for plain lifecycle slots (enter, exit, update, no-arg event).
pub type PlainHandler<O> = Arc<dyn Fn(&mut O) + Send + Sync>;

/// Handler for state entry with transition arguments.
pub type ArgsHandler<O> = Arc<dyn Fn(&mut O, &[Payload]) + Send + Sync>;

/// Handler for animation-layer notifications.
pub type LayerHandler<O> = Arc<dyn Fn(&mut O, &LayerContext) + Send + Sync>;

/// Handler for integer animation events.
pub type IntEventHandler<O> = Arc<dyn Fn(&mut O, i32) + Send + Sync>;

/// Handler for float animation events.
pub type FloatEventHandler<O> = Arc<dyn Fn(&mut O, f32) + Send + Sync>;

/// Handler for string animation events.
pub type StrEventHandler<O> = Arc<dyn Fn(&mut O, &str) + Send + Sync>;

/// Handler for object-reference animation events.
pub type ObjectEventHandler<O> = Arc<dyn Fn(&mut O, &ObjectRef) + Send + Sync>;

/// Logical callback slot within a handler bundle.
///
/// Slots sharing a canonical suffix differ only in signature: the plain
/// and with-args entry slots both answer to `_Enter`, and the five event
/// slots all answer to `_AnimEvent`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Slot {
    /// No-arg state entry
    Enter,
    /// State entry carrying transition arguments
    EnterWithArgs,
    /// State exit
    Exit,
    /// Per-frame update
    Update,
    /// Per-physics-step update
    FixedUpdate,
    /// End-of-frame update
    LateUpdate,
    /// Animation layer entered
    AnimEnter,
    /// Animation layer root motion step
    AnimMove,
    /// Animation layer per-frame step
    AnimUpdate,
    /// Animation layer exited
    AnimExit,
    /// Animation event, no payload
    AnimEvent,
    /// Animation event, integer payload
    AnimEventInt,
    /// Animation event, float payload
    AnimEventFloat,
    /// Animation event, string payload
    AnimEventStr,
    /// Animation event, object-reference payload
    AnimEventObject,
}

impl Slot {
    /// Canonical naming-convention suffix for this slot.
    ///
    /// Concatenated with a key's name this yields the conventional
    /// handler identifier (`Idle_Enter`, `Run_AnimEvent`). The runtime
    /// uses it only for diagnostics.
    pub fn suffix(&self) -> &'static str {
        match self {
            Slot::Enter | Slot::EnterWithArgs => "_Enter",
            Slot::Exit => "_Exit",
            Slot::Update => "_Update",
            Slot::FixedUpdate => "_FixedUpdate",
            Slot::LateUpdate => "_LateUpdate",
            Slot::AnimEnter => "_AnimEnter",
            Slot::AnimMove => "_AnimMove",
            Slot::AnimUpdate => "_AnimUpdate",
            Slot::AnimExit => "_AnimExit",
            Slot::AnimEvent
            | Slot::AnimEventInt
            | Slot::AnimEventFloat
            | Slot::AnimEventStr
            | Slot::AnimEventObject => "_AnimEvent",
        }
    }
}

/// Which animation-layer notification a bridge forward targets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LayerSlot {
    /// Layer entered
    Enter,
    /// Root motion step
    Move,
    /// Per-frame step
    Update,
    /// Layer exited
    Exit,
}

/// A resolved handler tagged with its signature shape.
///
/// The binding resolver returns these; the bundle builder accepts a
/// binding only when its shape matches the requested slot. A mismatched
/// shape counts as a binding miss, which is never an error.
pub enum Binding<O> {
    /// Plain `fn(&mut O)` handler
    Plain(PlainHandler<O>),
    /// Entry handler taking transition arguments
    WithArgs(ArgsHandler<O>),
    /// Animation-layer handler
    Layer(LayerHandler<O>),
    /// Integer event handler
    EventInt(IntEventHandler<O>),
    /// Float event handler
    EventFloat(FloatEventHandler<O>),
    /// String event handler
    EventStr(StrEventHandler<O>),
    /// Object-reference event handler
    EventObject(ObjectEventHandler<O>),
}

impl<O> Clone for Binding<O> {
    fn clone(&self) -> Self {
        match self {
            Binding::Plain(h) => Binding::Plain(Arc::clone(h)),
            Binding::WithArgs(h) => Binding::WithArgs(Arc::clone(h)),
            Binding::Layer(h) => Binding::Layer(Arc::clone(h)),
            Binding::EventInt(h) => Binding::EventInt(Arc::clone(h)),
            Binding::EventFloat(h) => Binding::EventFloat(Arc::clone(h)),
            Binding::EventStr(h) => Binding::EventStr(Arc::clone(h)),
            Binding::EventObject(h) => Binding::EventObject(Arc::clone(h)),
        }
    }
}

pub(crate) fn noop<O>() -> PlainHandler<O> {
    Arc::new(|_| {})
}

pub(crate) fn noop_args<O>() -> ArgsHandler<O> {
    Arc::new(|_, _| {})
}

pub(crate) fn noop_layer<O>() -> LayerHandler<O> {
    Arc::new(|_, _| {})
}

pub(crate) fn noop_int<O>() -> IntEventHandler<O> {
    Arc::new(|_, _| {})
}

pub(crate) fn noop_float<O>() -> FloatEventHandler<O> {
    Arc::new(|_, _| {})
}

pub(crate) fn noop_str<O>() -> StrEventHandler<O> {
    Arc::new(|_, _| {})
}

pub(crate) fn noop_object<O>() -> ObjectEventHandler<O> {
    Arc::new(|_, _| {})
}
