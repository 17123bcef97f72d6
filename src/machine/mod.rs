//! Keyed state machine core.
//!
//! The machine owns the binding mask, the bundle cache and the
//! current/previous key bookkeeping. The owner object is not stored:
//! every dispatch call borrows it mutably for the duration of the call,
//! so the machine never aliases its configuration source.

pub mod macros;

mod cache;

use crate::bind::BindingSource;
use crate::core::{BindingMask, HandlerBundle, LayerContext, LayerSlot, Payload, StateKey};
use cache::BundleCache;
use std::sync::Arc;
use tracing::debug;

/// Keyed, frame-stepped state machine.
///
/// The machine starts idle with a passive (all no-op) bundle active, so
/// frame dispatch before the first transition is safe and has no effect.
/// Transitions are explicit: [`set_current_state`] exits the active
/// bundle, resolves the target key's bundle through the cache, updates
/// the key bookkeeping and enters the new bundle. Re-entering the current
/// key is not deduplicated; it runs the full exit/enter pair.
///
/// [`set_current_state`]: StateMachine::set_current_state
///
/// # Example
///
/// ```rust
/// use statekit::{state_key, BindingMask, Bindings, StateMachine};
///
/// state_key! {
///     enum Motion {
///         Idle,
///         Run,
///     }
/// }
///
/// #[derive(Default)]
/// struct Player {
///     frames: u32,
/// }
///
/// let bindings = Bindings::new()
///     .on_enter(Motion::Idle, |p: &mut Player| p.frames = 0)
///     .on_update(Motion::Idle, |p: &mut Player| p.frames += 1);
///
/// let mut machine = StateMachine::new(bindings, BindingMask::NORMAL_LIFECYCLE);
/// let mut player = Player::default();
///
/// machine.set_current_state(&mut player, Motion::Idle);
/// machine.execute_update(&mut player);
/// machine.execute_update(&mut player);
///
/// assert_eq!(player.frames, 2);
/// assert_eq!(machine.current_state(), Some(&Motion::Idle));
/// ```
pub struct StateMachine<K: StateKey, O> {
    source: Box<dyn BindingSource<K, O>>,
    mask: BindingMask,
    cache: BundleCache<K, O>,
    passive: Arc<HandlerBundle<O>>,
    active: Arc<HandlerBundle<O>>,
    current: Option<K>,
    previous: Option<K>,
}

impl<K: StateKey, O> StateMachine<K, O> {
    /// Create an idle machine over `source` with the given binding mask.
    ///
    /// The mask is fixed for the machine's lifetime. Bundles already in
    /// the cache never see later changes to the source either; use
    /// [`clear_cache`](StateMachine::clear_cache) to force re-resolution.
    pub fn new(source: impl BindingSource<K, O> + 'static, mask: BindingMask) -> Self {
        let passive = Arc::new(HandlerBundle::passive());
        Self {
            source: Box::new(source),
            mask,
            cache: BundleCache::new(),
            active: Arc::clone(&passive),
            passive,
            current: None,
            previous: None,
        }
    }

    /// Transition to `key`, entering through the no-arg entry slot.
    pub fn set_current_state(&mut self, owner: &mut O, key: K) {
        self.transition(owner, key, &[]);
    }

    /// Transition to `key`, entering through the with-args entry slot.
    ///
    /// An empty `args` slice routes through the no-arg entry slot
    /// instead; the two entry paths are mutually exclusive per
    /// transition.
    pub fn set_current_state_with(&mut self, owner: &mut O, key: K, args: &[Payload]) {
        self.transition(owner, key, args);
    }

    fn transition(&mut self, owner: &mut O, key: K, args: &[Payload]) {
        (self.active.on_exit)(owner);

        let bundle = self
            .cache
            .get_or_create(&key, self.mask, self.source.as_ref());

        debug!(
            from = self.current.as_ref().map_or("none", StateKey::name),
            to = key.name(),
            with_args = !args.is_empty(),
            "state transition"
        );

        self.previous = self.current.take();
        self.current = Some(key);
        self.active = bundle;

        if args.is_empty() {
            (self.active.on_enter)(owner);
        } else {
            (self.active.on_enter_with_args)(owner, args);
        }
    }

    /// Stop dispatching: exit the active bundle and go idle.
    ///
    /// The previous key is left untouched; only a real transition updates
    /// it. A later [`set_current_state`](StateMachine::set_current_state)
    /// resumes normally.
    pub fn stop(&mut self, owner: &mut O) {
        (self.active.on_exit)(owner);
        self.active = Arc::clone(&self.passive);
        self.current = None;
        debug!("state machine stopped");
    }

    /// Dispatch the per-frame update slot of the active bundle.
    pub fn execute_update(&mut self, owner: &mut O) {
        (self.active.on_update)(owner);
    }

    /// Dispatch the per-physics-step update slot of the active bundle.
    pub fn execute_fixed_update(&mut self, owner: &mut O) {
        (self.active.on_fixed_update)(owner);
    }

    /// Dispatch the end-of-frame update slot of the active bundle.
    pub fn execute_late_update(&mut self, owner: &mut O) {
        (self.active.on_late_update)(owner);
    }

    /// Dispatch the no-payload animation-event slot.
    pub fn invoke_anim_event(&mut self, owner: &mut O) {
        (self.active.on_anim_event)(owner);
    }

    /// Dispatch the animation-event slot matching the payload's variant.
    pub fn invoke_anim_event_with(&mut self, owner: &mut O, payload: Payload) {
        match payload {
            Payload::Int(v) => (self.active.on_anim_event_int)(owner, v),
            Payload::Float(v) => (self.active.on_anim_event_float)(owner, v),
            Payload::Str(v) => (self.active.on_anim_event_str)(owner, &v),
            Payload::Object(v) => (self.active.on_anim_event_object)(owner, &v),
        }
    }

    /// Dispatch one of the animation-layer slots of the active bundle.
    ///
    /// The animation bridge forwards layer notifications through here;
    /// host glue integrating an animation system directly may do the
    /// same.
    pub fn dispatch_layer(&mut self, owner: &mut O, slot: LayerSlot, ctx: &LayerContext) {
        match slot {
            LayerSlot::Enter => (self.active.on_anim_enter)(owner, ctx),
            LayerSlot::Move => (self.active.on_anim_move)(owner, ctx),
            LayerSlot::Update => (self.active.on_anim_update)(owner, ctx),
            LayerSlot::Exit => (self.active.on_anim_exit)(owner, ctx),
        }
    }

    /// The key set by the most recent transition, if any.
    pub fn current_state(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// The key active immediately before the most recent transition.
    pub fn previous_state(&self) -> Option<&K> {
        self.previous.as_ref()
    }

    /// Whether `key` is the current state.
    pub fn is_current(&self, key: &K) -> bool {
        self.current.as_ref() == Some(key)
    }

    /// Whether `key` is the previous state.
    pub fn is_previous(&self, key: &K) -> bool {
        self.previous.as_ref() == Some(key)
    }

    /// The binding mask the machine was constructed with.
    pub fn mask(&self) -> BindingMask {
        self.mask
    }

    /// Number of keys with a resolved bundle in the cache.
    pub fn cached_states(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached bundles.
    ///
    /// The active bundle keeps dispatching until the next transition,
    /// which re-resolves its key from the binding source.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Human-readable name of the current state for debugging.
    pub fn debug_status(&self) -> String {
        self.current
            .as_ref()
            .map_or_else(|| "No State".to_string(), |k| k.name().to_string())
    }
}
