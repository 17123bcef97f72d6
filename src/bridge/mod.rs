//! Animation bridge.
//!
//! Adapter between an external animation system and a keyed machine. The
//! animation system raises four notifications per layer step (enter,
//! move, update, exit), each carrying a [`LayerContext`]. The bridge
//! forwards them to the active bundle's layer slots and can drive an
//! initial transition the first time its layer is entered.
//!
//! The machine is passed per notification as an `Option`: an owner that
//! has not resolved its machine yet simply passes `None`, and the
//! notification is dropped. Nothing is queued or retried.

use crate::core::{LayerContext, LayerSlot, StateKey};
use crate::machine::StateMachine;
use tracing::{debug, trace};

/// Forwards animation-layer notifications to a keyed machine.
///
/// # Example
///
/// ```rust
/// use statekit::{state_key, AnimationBridge, BindingMask, Bindings, StateMachine};
/// use statekit::core::{AnimatorHandle, LayerContext};
///
/// state_key! {
///     enum Motion {
///         Idle,
///     }
/// }
///
/// #[derive(Default)]
/// struct Player {
///     entered: bool,
/// }
///
/// let bindings = Bindings::new().on_enter(Motion::Idle, |p: &mut Player| p.entered = true);
/// let mut machine = StateMachine::new(bindings, BindingMask::NORMAL_LIFECYCLE);
/// let mut player = Player::default();
///
/// let mut bridge = AnimationBridge::with_start_key(Motion::Idle);
/// let ctx = LayerContext::new(AnimatorHandle(1), 0);
///
/// bridge.on_layer_enter(Some(&mut machine), &mut player, &ctx);
/// assert!(player.entered);
/// assert_eq!(machine.current_state(), Some(&Motion::Idle));
/// ```
pub struct AnimationBridge<K: StateKey> {
    start_key: Option<K>,
    started: bool,
}

impl<K: StateKey> AnimationBridge<K> {
    /// Bridge that only forwards notifications.
    pub fn new() -> Self {
        Self {
            start_key: None,
            started: false,
        }
    }

    /// Bridge that drives `start_key` on the first layer enter it
    /// forwards, then behaves like [`new`](AnimationBridge::new).
    pub fn with_start_key(start_key: K) -> Self {
        Self {
            start_key: Some(start_key),
            started: false,
        }
    }

    /// The configured start key, if any.
    pub fn start_key(&self) -> Option<&K> {
        self.start_key.as_ref()
    }

    /// Whether the start key has already been driven.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Handle a layer-enter notification.
    ///
    /// Drives the start key first if one is configured and has not fired
    /// yet, then forwards to the active bundle's layer-enter slot.
    pub fn on_layer_enter<O>(
        &mut self,
        machine: Option<&mut StateMachine<K, O>>,
        owner: &mut O,
        ctx: &LayerContext,
    ) {
        let Some(machine) = machine else {
            trace!(layer = ctx.layer_index, "dropping layer enter, no machine");
            return;
        };

        if !self.started {
            if let Some(key) = self.start_key.clone() {
                debug!(key = key.name(), "bridge driving start state");
                machine.set_current_state(owner, key);
                self.started = true;
            }
        }

        machine.dispatch_layer(owner, LayerSlot::Enter, ctx);
    }

    /// Handle a layer-move notification.
    pub fn on_layer_move<O>(
        &mut self,
        machine: Option<&mut StateMachine<K, O>>,
        owner: &mut O,
        ctx: &LayerContext,
    ) {
        Self::forward(machine, owner, LayerSlot::Move, ctx);
    }

    /// Handle a layer-update notification.
    pub fn on_layer_update<O>(
        &mut self,
        machine: Option<&mut StateMachine<K, O>>,
        owner: &mut O,
        ctx: &LayerContext,
    ) {
        Self::forward(machine, owner, LayerSlot::Update, ctx);
    }

    /// Handle a layer-exit notification.
    pub fn on_layer_exit<O>(
        &mut self,
        machine: Option<&mut StateMachine<K, O>>,
        owner: &mut O,
        ctx: &LayerContext,
    ) {
        Self::forward(machine, owner, LayerSlot::Exit, ctx);
    }

    fn forward<O>(
        machine: Option<&mut StateMachine<K, O>>,
        owner: &mut O,
        slot: LayerSlot,
        ctx: &LayerContext,
    ) {
        let Some(machine) = machine else {
            trace!(layer = ctx.layer_index, ?slot, "dropping layer notification, no machine");
            return;
        };
        machine.dispatch_layer(owner, slot, ctx);
    }
}

impl<K: StateKey> Default for AnimationBridge<K> {
    fn default() -> Self {
        Self::new()
    }
}
