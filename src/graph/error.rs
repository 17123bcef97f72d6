//! Build errors for the graph machine.

use super::StateId;
use thiserror::Error;

/// Errors detected while validating a graph definition.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has no states. Add at least one state before .build()")]
    Empty,

    #[error("transition in state '{state}' targets unknown state id {target}")]
    UnknownState { state: String, target: StateId },
}
