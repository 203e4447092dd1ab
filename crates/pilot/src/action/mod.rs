//! Pollable game-input steps with success detection.
//!
//! An action is performed by re-issuing its input once per poll until its
//! post-condition is observed; it never blocks waiting for the game. The
//! closed [`PathAction`] set dispatches the concrete variants through the
//! one [`Action`] contract, so new step kinds slot in without touching the
//! runner.
mod runner;
#[cfg(test)]
pub(crate) mod testutil;
mod walk;

use crate::providers::{GameStateOracle, InputPort, ProviderError};

pub use runner::{ActionRunner, Progress};
pub use walk::WalkAction;

/// Errors raised while performing or sequencing actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Raised only when a retry limit was configured on the runner.
    #[error("action {action} did not succeed after {attempts} attempts")]
    Stalled { action: usize, attempts: u32 },
}

/// One performable, pollable input step.
pub trait Action {
    /// Issues the action's input once. Safe to call repeatedly; the first
    /// call records whatever starting state success is measured against.
    fn perform(
        &mut self,
        state: &dyn GameStateOracle,
        input: &mut dyn InputPort,
    ) -> Result<(), ActionError>;

    /// Whether the expected post-condition has been observed.
    fn has_succeeded(&self, state: &dyn GameStateOracle) -> Result<bool, ActionError>;
}

/// The closed set of steps a route can be made of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathAction {
    Walk(WalkAction),
}

impl Action for PathAction {
    fn perform(
        &mut self,
        state: &dyn GameStateOracle,
        input: &mut dyn InputPort,
    ) -> Result<(), ActionError> {
        match self {
            PathAction::Walk(walk) => walk.perform(state, input),
        }
    }

    fn has_succeeded(&self, state: &dyn GameStateOracle) -> Result<bool, ActionError> {
        match self {
            PathAction::Walk(walk) => walk.has_succeeded(state),
        }
    }
}

impl From<WalkAction> for PathAction {
    fn from(walk: WalkAction) -> Self {
        PathAction::Walk(walk)
    }
}
