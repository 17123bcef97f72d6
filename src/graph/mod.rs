//! Data-driven state+activity+decision graph.
//!
//! A graph state is a list of activities plus a list of decision-guarded
//! transitions. The controller runs the current state's activities each
//! update, then evaluates the transitions in order and moves to the first
//! target whose branch matches. States live in an arena owned by the
//! graph and are referenced by index, so transition targets stay valid as
//! the graph is assembled; the builder validates every target before a
//! controller can exist.

mod error;

pub use error::GraphError;

use tracing::debug;

/// Index of a state within its graph's arena.
///
/// Assigned by insertion order on [`GraphBuilder::state`].
pub type StateId = usize;

/// Pure predicate over the context, deciding a transition's branch.
///
/// Implemented for closures, so simple decisions need no named type.
pub trait Decision<C>: Send + Sync {
    /// Evaluate the decision against the current context.
    fn decide(&self, ctx: &C) -> bool;
}

impl<C, F> Decision<C> for F
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn decide(&self, ctx: &C) -> bool {
        self(ctx)
    }
}

/// A unit of behavior attached to a graph state.
pub trait Activity<C>: Send {
    /// Called when the owning state is entered.
    fn enter(&mut self, _ctx: &mut C) {}

    /// Called once per update while the owning state is current.
    fn act(&mut self, ctx: &mut C);

    /// Called when the owning state is left.
    fn exit(&mut self, _ctx: &mut C) {}
}

/// Decision-guarded edge out of a graph state.
///
/// A `None` branch means "no opinion": evaluation continues with the next
/// transition instead of stopping the controller.
pub struct GraphTransition<C> {
    decision: Box<dyn Decision<C>>,
    on_true: Option<StateId>,
    on_false: Option<StateId>,
}

impl<C> GraphTransition<C> {
    /// Build a transition from a decision and its branch targets.
    pub fn new(
        decision: impl Decision<C> + 'static,
        on_true: Option<StateId>,
        on_false: Option<StateId>,
    ) -> Self {
        Self {
            decision: Box::new(decision),
            on_true,
            on_false,
        }
    }

    /// Transition that fires only when the decision holds.
    pub fn when(decision: impl Decision<C> + 'static, target: StateId) -> Self {
        Self::new(decision, Some(target), None)
    }
}

/// One state of the graph: activities plus outgoing transitions.
pub struct GraphState<C> {
    name: String,
    activities: Vec<Box<dyn Activity<C>>>,
    transitions: Vec<GraphTransition<C>>,
}

impl<C> GraphState<C> {
    /// Create an empty state with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activities: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Attach an activity.
    pub fn activity(mut self, activity: impl Activity<C> + 'static) -> Self {
        self.activities.push(Box::new(activity));
        self
    }

    /// Attach an outgoing transition.
    pub fn transition(mut self, transition: GraphTransition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// The state's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated arena of graph states.
pub struct Graph<C> {
    states: Vec<GraphState<C>>,
}

impl<C> Graph<C> {
    /// Number of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the graph has no states. Never true for a built graph.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Builder assembling and validating a graph.
///
/// State ids are assigned in insertion order, so callers know each id
/// before the graph is built and can reference forward states.
///
/// # Example
///
/// ```rust
/// use statekit::graph::{Graph, GraphBuilder, GraphState, GraphTransition};
///
/// struct World {
///     alert: bool,
/// }
///
/// const PATROL: usize = 0;
/// const CHASE: usize = 1;
///
/// let graph: Graph<World> = GraphBuilder::new()
///     .state(GraphState::new("patrol").transition(GraphTransition::when(
///         |w: &World| w.alert,
///         CHASE,
///     )))
///     .state(GraphState::new("chase").transition(GraphTransition::when(
///         |w: &World| !w.alert,
///         PATROL,
///     )))
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.len(), 2);
/// ```
pub struct GraphBuilder<C> {
    states: Vec<GraphState<C>>,
}

impl<C> GraphBuilder<C> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Append a state; its id is the number of states added before it.
    pub fn state(mut self, state: GraphState<C>) -> Self {
        self.states.push(state);
        self
    }

    /// Validate and build the graph.
    ///
    /// Fails when the graph is empty or any transition branch targets an
    /// id outside the arena.
    pub fn build(self) -> Result<Graph<C>, GraphError> {
        if self.states.is_empty() {
            return Err(GraphError::Empty);
        }

        let len = self.states.len();
        for state in &self.states {
            for transition in &state.transitions {
                for target in [transition.on_true, transition.on_false].into_iter().flatten() {
                    if target >= len {
                        return Err(GraphError::UnknownState {
                            state: state.name.clone(),
                            target,
                        });
                    }
                }
            }
        }

        Ok(Graph {
            states: self.states,
        })
    }
}

impl<C> Default for GraphBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a graph: owns it plus the current-state cursor.
pub struct GraphController<C> {
    graph: Graph<C>,
    current: Option<StateId>,
}

impl<C> GraphController<C> {
    /// Create an idle controller over a validated graph.
    pub fn new(graph: Graph<C>) -> Self {
        Self {
            graph,
            current: None,
        }
    }

    /// The current state id, if any.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// The current state's diagnostic name, if any.
    pub fn current_name(&self) -> Option<&str> {
        self.current.map(|id| self.graph.states[id].name())
    }

    /// Move to `target`, exiting the old state's activities and entering
    /// the new state's. `None` stops the controller.
    pub fn transit_to(&mut self, ctx: &mut C, target: Option<StateId>) {
        // Ids outside the arena cannot come from this graph's builder;
        // treat them as a stop rather than index out of bounds.
        let target = target.filter(|id| *id < self.graph.states.len());

        if let Some(id) = self.current {
            for activity in &mut self.graph.states[id].activities {
                activity.exit(ctx);
            }
        }

        self.current = target;

        if let Some(id) = self.current {
            debug!(state = self.graph.states[id].name(), "graph transition");
            for activity in &mut self.graph.states[id].activities {
                activity.enter(ctx);
            }
        }
    }

    /// Run the current state's activities, then evaluate its transitions
    /// once, in order, moving to the first matching branch target.
    pub fn update(&mut self, ctx: &mut C) {
        let Some(id) = self.current else {
            return;
        };

        for activity in &mut self.graph.states[id].activities {
            activity.act(ctx);
        }

        let mut chosen = None;
        for transition in &self.graph.states[id].transitions {
            let branch = if transition.decision.decide(ctx) {
                transition.on_true
            } else {
                transition.on_false
            };
            if let Some(target) = branch {
                chosen = Some(target);
                break;
            }
        }

        if let Some(target) = chosen {
            self.transit_to(ctx, Some(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct World {
        alert: bool,
        log: Vec<String>,
    }

    struct Log(&'static str);

    impl Activity<World> for Log {
        fn enter(&mut self, ctx: &mut World) {
            ctx.log.push(format!("{} enter", self.0));
        }

        fn act(&mut self, ctx: &mut World) {
            ctx.log.push(format!("{} act", self.0));
        }

        fn exit(&mut self, ctx: &mut World) {
            ctx.log.push(format!("{} exit", self.0));
        }
    }

    const PATROL: StateId = 0;
    const CHASE: StateId = 1;

    fn patrol_chase() -> Graph<World> {
        GraphBuilder::new()
            .state(
                GraphState::new("patrol")
                    .activity(Log("patrol"))
                    .transition(GraphTransition::when(
                        |w: &World| w.alert,
                        CHASE,
                    )),
            )
            .state(
                GraphState::new("chase")
                    .activity(Log("chase"))
                    .transition(GraphTransition::when(
                        |w: &World| !w.alert,
                        PATROL,
                    )),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn empty_graph_fails_to_build() {
        let result = GraphBuilder::<World>::new().build();
        assert!(matches!(result, Err(GraphError::Empty)));
    }

    #[test]
    fn dangling_transition_target_fails_to_build() {
        let result = GraphBuilder::<World>::new()
            .state(GraphState::new("lonely").transition(GraphTransition::when(
                |_: &World| true,
                7,
            )))
            .build();

        assert!(matches!(
            result,
            Err(GraphError::UnknownState { target: 7, .. })
        ));
    }

    #[test]
    fn update_without_current_state_is_a_no_op() {
        let mut controller = GraphController::new(patrol_chase());
        let mut world = World::default();

        controller.update(&mut world);
        assert!(world.log.is_empty());
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn decisions_move_the_controller_between_states() {
        let mut controller = GraphController::new(patrol_chase());
        let mut world = World::default();

        controller.transit_to(&mut world, Some(PATROL));
        assert_eq!(controller.current_name(), Some("patrol"));

        controller.update(&mut world);
        assert_eq!(controller.current_name(), Some("patrol"));

        world.alert = true;
        controller.update(&mut world);
        assert_eq!(controller.current_name(), Some("chase"));
        assert_eq!(
            world.log,
            vec![
                "patrol enter",
                "patrol act",
                "patrol act",
                "patrol exit",
                "chase enter",
            ]
        );
    }

    #[test]
    fn transitions_are_evaluated_once_per_update() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let evaluations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evaluations);

        let graph = GraphBuilder::new()
            .state(GraphState::new("counting").transition(GraphTransition::new(
                move |_: &World| {
                    counter.fetch_add(1, Ordering::Relaxed);
                    false
                },
                Some(0),
                None,
            )))
            .build()
            .unwrap();

        let mut controller = GraphController::new(graph);
        let mut world = World::default();
        controller.transit_to(&mut world, Some(0));

        controller.update(&mut world);
        controller.update(&mut world);
        assert_eq!(evaluations.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn none_branch_falls_through_to_the_next_transition() {
        let graph = GraphBuilder::new()
            .state(
                GraphState::new("start")
                    // First transition never names a target on its false
                    // branch, so the second one decides.
                    .transition(GraphTransition::when(|_: &World| false, 1))
                    .transition(GraphTransition::when(|_: &World| true, 1)),
            )
            .state(GraphState::new("end"))
            .build()
            .unwrap();

        let mut controller = GraphController::new(graph);
        let mut world = World::default();

        controller.transit_to(&mut world, Some(0));
        controller.update(&mut world);
        assert_eq!(controller.current_name(), Some("end"));
    }

    #[test]
    fn transit_to_none_stops_the_controller() {
        let mut controller = GraphController::new(patrol_chase());
        let mut world = World::default();

        controller.transit_to(&mut world, Some(PATROL));
        controller.transit_to(&mut world, None);

        assert_eq!(controller.current(), None);
        assert_eq!(world.log, vec!["patrol enter", "patrol exit"]);

        controller.update(&mut world);
        assert_eq!(world.log.len(), 2);
    }
}
