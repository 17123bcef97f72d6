//! Statekit: a keyed, frame-stepped state machine runtime.
//!
//! Statekit drives per-object behavior in real-time applications. The
//! core is a keyed machine: opaque state keys map to bundles of lifecycle
//! callbacks, resolved lazily from an owner-supplied binding table,
//! cached per key and dispatched each frame. A configurable mask selects
//! which callback categories (plain lifecycle hooks, animation-layer
//! hooks, animation-event hooks) get real bindings, and every unbound
//! slot is a no-op, never an error.
//!
//! # Core Concepts
//!
//! - **StateKey**: opaque identifier selecting a logical behavior set
//! - **Bindings**: explicit registration table mapping key + slot to a
//!   handler
//! - **BindingMask**: which callback categories are resolved
//! - **StateMachine**: current/previous key bookkeeping, transitions,
//!   per-frame and per-event dispatch
//! - **AnimationBridge**: adapter forwarding external animation
//!   notifications to the active bundle
//!
//! Two simpler machines ship alongside the keyed core: a typed-state
//! machine for app-level flow ([`typed`]) and a data-driven
//! state+activity+decision graph ([`graph`]).
//!
//! # Example
//!
//! ```rust
//! use statekit::{state_key, BindingMask, Bindings, StateMachine};
//!
//! state_key! {
//!     enum Motion {
//!         Idle,
//!         Run,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Player {
//!     speed: f32,
//!     frames: u32,
//! }
//!
//! let bindings = Bindings::new()
//!     .on_enter(Motion::Idle, |p: &mut Player| p.speed = 0.0)
//!     .on_update(Motion::Idle, |p: &mut Player| p.frames += 1)
//!     .on_enter(Motion::Run, |p: &mut Player| p.speed = 6.0);
//!
//! let mut machine = StateMachine::new(bindings, BindingMask::NORMAL_LIFECYCLE);
//! let mut player = Player::default();
//!
//! machine.set_current_state(&mut player, Motion::Idle);
//! machine.execute_update(&mut player);
//!
//! machine.set_current_state(&mut player, Motion::Run);
//! assert_eq!(player.speed, 6.0);
//! assert_eq!(machine.previous_state(), Some(&Motion::Idle));
//! ```

pub mod bind;
pub mod bridge;
pub mod core;
pub mod graph;
pub mod machine;
pub mod typed;

// Re-export commonly used types
pub use bind::{BindingSource, Bindings};
pub use bridge::AnimationBridge;
pub use core::{
    AnimatorHandle, BindingMask, LayerContext, LayerSlot, Payload, StateKey, StateTiming,
};
pub use machine::StateMachine;
