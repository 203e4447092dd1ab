//! Poll-driven route execution against the live game.
//!
//! `pilot` owns everything with side effects: the provider seams for
//! observing the player and injecting input, the pollable action contract,
//! and the [`RoutePlanner`] session that turns two world coordinates into a
//! ready-to-poll [`ActionRunner`]. The caller's tick loop is the only
//! scheduler — each poll issues at most one input and returns immediately.
pub mod action;
pub mod providers;
pub mod session;

pub use action::{Action, ActionError, ActionRunner, PathAction, Progress, WalkAction};
pub use providers::{GameStateOracle, InputPort, PlayerCoords, ProviderError};
pub use session::{PlanError, PlannerConfig, RoutePlanner, WorldPoint};
