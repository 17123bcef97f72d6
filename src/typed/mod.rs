//! Typed-state machine.
//!
//! A simpler machine keyed by state *type* rather than by opaque key:
//! each state is an object implementing [`TypedState`], and the machine
//! plays states by type, optionally caching instances for reuse. This is
//! the restricted special case of the keyed machine used for app-level
//! flow (loading screens, menus, match phases).
//!
//! States cannot hold a reference back to the machine; instead the frame
//! methods return a [`Command`] and the machine applies it after the
//! state's method returns. That keeps transitions requestable from inside
//! `update` without aliasing the machine.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use tracing::debug;

/// A state driven by the typed-state machine.
///
/// All methods have no-op defaults; states implement the subset they
/// care about. Frame methods return a [`Command`] to request a
/// transition; [`Command::None`] stays in the state.
pub trait TypedState<C>: Send + 'static {
    /// Called when the state becomes active.
    fn enter(&mut self, _ctx: &mut C) {}

    /// Called when the state is left.
    fn exit(&mut self, _ctx: &mut C) {}

    /// Per-frame update.
    fn update(&mut self, _ctx: &mut C) -> Command<C> {
        Command::None
    }

    /// Per-physics-step update.
    fn fixed_update(&mut self, _ctx: &mut C) -> Command<C> {
        Command::None
    }

    /// End-of-frame update.
    fn late_update(&mut self, _ctx: &mut C) -> Command<C> {
        Command::None
    }
}

type Ctor<C> = fn() -> Box<dyn TypedState<C>>;

fn construct<C, T: TypedState<C> + Default>() -> Box<dyn TypedState<C>> {
    Box::<T>::default()
}

/// Transition request returned by a state's frame methods.
pub enum Command<C> {
    /// Stay in the current state
    None,
    /// Leave the current state and go idle
    Stop,
    /// Play another state
    Play(Pending<C>),
}

impl<C> Command<C> {
    /// Request a transition to `T`, constructed fresh or taken from the
    /// cache if a cached instance exists.
    pub fn play<T: TypedState<C> + Default>() -> Self {
        Command::Play(Pending::of::<T>(false))
    }

    /// Like [`play`](Command::play), but the instance is returned to the
    /// cache when the state is left.
    pub fn play_cached<T: TypedState<C> + Default>() -> Self {
        Command::Play(Pending::of::<T>(true))
    }
}

/// A deferred `play` target carried inside [`Command::Play`].
pub struct Pending<C> {
    id: TypeId,
    name: &'static str,
    ctor: Ctor<C>,
    cache: bool,
}

impl<C> Pending<C> {
    fn of<T: TypedState<C> + Default>(cache: bool) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            ctor: construct::<C, T>,
            cache,
        }
    }
}

struct Active<C> {
    state: Box<dyn TypedState<C>>,
    id: TypeId,
    name: &'static str,
    ctor: Option<Ctor<C>>,
    cache: bool,
}

struct PreviousMeta<C> {
    id: TypeId,
    name: &'static str,
    ctor: Option<Ctor<C>>,
}

/// Machine playing states by type, with optional per-type caching.
///
/// # Example
///
/// ```rust
/// use statekit::typed::{Command, TypedMachine, TypedState};
///
/// #[derive(Default)]
/// struct App {
///     ticks: u32,
/// }
///
/// #[derive(Default)]
/// struct Loading;
///
/// impl TypedState<App> for Loading {
///     fn update(&mut self, ctx: &mut App) -> Command<App> {
///         ctx.ticks += 1;
///         if ctx.ticks >= 2 {
///             Command::play::<Ready>()
///         } else {
///             Command::None
///         }
///     }
/// }
///
/// #[derive(Default)]
/// struct Ready;
///
/// impl TypedState<App> for Ready {}
///
/// let mut machine = TypedMachine::new();
/// let mut app = App::default();
///
/// machine.play::<Loading>(&mut app, false);
/// machine.update(&mut app);
/// machine.update(&mut app);
///
/// assert!(machine.is_current::<Ready>());
/// assert!(machine.is_previous::<Loading>());
/// ```
pub struct TypedMachine<C> {
    cache: HashMap<TypeId, Box<dyn TypedState<C>>>,
    current: Option<Active<C>>,
    previous: Option<PreviousMeta<C>>,
}

impl<C: 'static> TypedMachine<C> {
    /// Create an idle machine.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            current: None,
            previous: None,
        }
    }

    /// Play `T`, constructing it with `Default` unless a cached instance
    /// exists. With `cache` set, the instance returns to the cache when
    /// the state is left instead of being dropped.
    pub fn play<T: TypedState<C> + Default>(&mut self, ctx: &mut C, cache: bool) {
        self.exit_current(ctx);

        let id = TypeId::of::<T>();
        let state = self
            .cache
            .remove(&id)
            .unwrap_or_else(|| Box::<T>::default());

        self.activate(
            ctx,
            Active {
                state,
                id,
                name: type_name::<T>(),
                ctor: Some(construct::<C, T>),
                cache,
            },
        );
    }

    /// Play an explicitly constructed instance of `T`.
    ///
    /// The instance replaces any cached copy of the same type once it is
    /// left with `cache` set. States played this way cannot be replayed
    /// through [`play_previous`](TypedMachine::play_previous) unless `T`
    /// also implements `Default` and was played via
    /// [`play`](TypedMachine::play).
    pub fn play_state<T: TypedState<C>>(&mut self, ctx: &mut C, state: T, cache: bool) {
        self.exit_current(ctx);

        self.activate(
            ctx,
            Active {
                state: Box::new(state),
                id: TypeId::of::<T>(),
                name: type_name::<T>(),
                ctor: None,
                cache,
            },
        );
    }

    /// Replay the previously active state type.
    ///
    /// The previous state is re-created from scratch (or taken from the
    /// cache), matching the semantics of replaying a state by type.
    /// Returns `false` when there is no previous state or it cannot be
    /// re-constructed.
    pub fn play_previous(&mut self, ctx: &mut C) -> bool {
        let Some(prev) = self.previous.as_ref() else {
            return false;
        };
        let (id, name) = (prev.id, prev.name);
        let Some(ctor) = prev.ctor else {
            return false;
        };

        self.exit_current(ctx);

        let state = self.cache.remove(&id).unwrap_or_else(ctor);
        self.activate(
            ctx,
            Active {
                state,
                id,
                name,
                ctor: Some(ctor),
                cache: false,
            },
        );
        true
    }

    /// Leave the current state and go idle.
    pub fn stop(&mut self, ctx: &mut C) {
        self.exit_current(ctx);
    }

    /// Per-frame update dispatch; applies any command the state returns.
    pub fn update(&mut self, ctx: &mut C) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        let command = active.state.update(ctx);
        self.apply(ctx, command);
    }

    /// Per-physics-step dispatch; applies any command the state returns.
    pub fn fixed_update(&mut self, ctx: &mut C) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        let command = active.state.fixed_update(ctx);
        self.apply(ctx, command);
    }

    /// End-of-frame dispatch; applies any command the state returns.
    pub fn late_update(&mut self, ctx: &mut C) {
        let Some(active) = self.current.as_mut() else {
            return;
        };
        let command = active.state.late_update(ctx);
        self.apply(ctx, command);
    }

    /// Whether the current state is of type `T`.
    pub fn is_current<T: TypedState<C>>(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|a| a.id == TypeId::of::<T>())
    }

    /// Whether the previous state was of type `T`.
    pub fn is_previous<T: TypedState<C>>(&self) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|p| p.id == TypeId::of::<T>())
    }

    /// Whether any state is active.
    pub fn has_active_state(&self) -> bool {
        self.current.is_some()
    }

    /// Number of cached state instances.
    pub fn cached_states(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached state instances. The active state is unaffected.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Human-readable name of the current state type for debugging.
    pub fn debug_status(&self) -> String {
        self.current
            .as_ref()
            .map_or_else(|| "No State".to_string(), |a| a.name.to_string())
    }

    fn activate(&mut self, ctx: &mut C, mut active: Active<C>) {
        debug!(state = active.name, "playing typed state");
        active.state.enter(ctx);
        self.current = Some(active);
    }

    fn exit_current(&mut self, ctx: &mut C) {
        let Some(mut active) = self.current.take() else {
            return;
        };
        active.state.exit(ctx);
        self.previous = Some(PreviousMeta {
            id: active.id,
            name: active.name,
            ctor: active.ctor,
        });
        if active.cache {
            self.cache.insert(active.id, active.state);
        }
    }

    fn apply(&mut self, ctx: &mut C, command: Command<C>) {
        match command {
            Command::None => {}
            Command::Stop => self.stop(ctx),
            Command::Play(pending) => {
                self.exit_current(ctx);
                let state = self.cache.remove(&pending.id).unwrap_or_else(pending.ctor);
                self.activate(
                    ctx,
                    Active {
                        state,
                        id: pending.id,
                        name: pending.name,
                        ctor: Some(pending.ctor),
                        cache: pending.cache,
                    },
                );
            }
        }
    }
}

impl<C: 'static> Default for TypedMachine<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct App {
        log: Vec<&'static str>,
    }

    #[derive(Default)]
    struct Loading {
        frames: u32,
    }

    impl TypedState<App> for Loading {
        fn enter(&mut self, ctx: &mut App) {
            ctx.log.push("loading enter");
        }

        fn exit(&mut self, ctx: &mut App) {
            ctx.log.push("loading exit");
        }

        fn update(&mut self, ctx: &mut App) -> Command<App> {
            self.frames += 1;
            ctx.log.push("loading update");
            if self.frames >= 2 {
                Command::play::<Main>()
            } else {
                Command::None
            }
        }
    }

    #[derive(Default)]
    struct Main;

    impl TypedState<App> for Main {
        fn enter(&mut self, ctx: &mut App) {
            ctx.log.push("main enter");
        }

        fn exit(&mut self, ctx: &mut App) {
            ctx.log.push("main exit");
        }
    }

    #[derive(Default)]
    struct Counter {
        lives: u32,
    }

    impl TypedState<App> for Counter {
        fn enter(&mut self, ctx: &mut App) {
            self.lives += 1;
            ctx.log.push(if self.lives > 1 {
                "counter reenter"
            } else {
                "counter enter"
            });
        }
    }

    #[test]
    fn frame_dispatch_with_no_active_state_is_a_no_op() {
        let mut machine: TypedMachine<App> = TypedMachine::new();
        let mut app = App::default();

        machine.update(&mut app);
        machine.fixed_update(&mut app);
        machine.late_update(&mut app);

        assert!(app.log.is_empty());
        assert!(!machine.has_active_state());
    }

    #[test]
    fn play_runs_enter_and_exit_in_order() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Loading>(&mut app, false);
        machine.play::<Main>(&mut app, false);

        assert_eq!(app.log, vec!["loading enter", "loading exit", "main enter"]);
        assert!(machine.is_current::<Main>());
        assert!(machine.is_previous::<Loading>());
    }

    #[test]
    fn command_from_update_transitions_after_the_call() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Loading>(&mut app, false);
        machine.update(&mut app);
        assert!(machine.is_current::<Loading>());

        machine.update(&mut app);
        assert!(machine.is_current::<Main>());
        assert_eq!(
            app.log,
            vec![
                "loading enter",
                "loading update",
                "loading update",
                "loading exit",
                "main enter",
            ]
        );
    }

    #[test]
    fn cached_state_instance_is_reused() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Counter>(&mut app, true);
        machine.play::<Main>(&mut app, false);
        assert_eq!(machine.cached_states(), 1);

        // Second play takes the cached instance, which remembers its
        // accumulated lives.
        machine.play::<Counter>(&mut app, false);
        assert_eq!(
            app.log,
            vec!["counter enter", "main enter", "main exit", "counter reenter"]
        );

        // Played without the cache flag this time, so leaving it drops it.
        machine.stop(&mut app);
        assert_eq!(machine.cached_states(), 0);
    }

    #[test]
    fn uncached_state_is_rebuilt_each_play() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Loading>(&mut app, false);
        machine.update(&mut app);
        machine.play::<Loading>(&mut app, false);

        // Fresh instance: its frame counter restarted, so one more update
        // does not yet trigger the transition to Main.
        machine.update(&mut app);
        assert!(machine.is_current::<Loading>());
    }

    #[test]
    fn play_previous_reconstructs_the_previous_type() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Loading>(&mut app, false);
        machine.play::<Main>(&mut app, false);

        assert!(machine.play_previous(&mut app));
        assert!(machine.is_current::<Loading>());
        assert!(machine.is_previous::<Main>());
    }

    #[test]
    fn play_previous_without_history_reports_failure() {
        let mut machine: TypedMachine<App> = TypedMachine::new();
        let mut app = App::default();

        assert!(!machine.play_previous(&mut app));
    }

    #[test]
    fn stop_exits_and_goes_idle() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Loading>(&mut app, false);
        machine.stop(&mut app);

        assert!(!machine.has_active_state());
        assert!(machine.is_previous::<Loading>());
        assert_eq!(app.log, vec!["loading enter", "loading exit"]);
    }

    #[test]
    fn clear_cache_drops_cached_instances() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        machine.play::<Counter>(&mut app, true);
        machine.stop(&mut app);
        assert_eq!(machine.cached_states(), 1);

        machine.clear_cache();
        assert_eq!(machine.cached_states(), 0);
    }

    #[test]
    fn debug_status_names_the_active_type() {
        let mut machine = TypedMachine::new();
        let mut app = App::default();

        assert_eq!(machine.debug_status(), "No State");
        machine.play::<Main>(&mut app, false);
        assert!(machine.debug_status().contains("Main"));
    }
}
