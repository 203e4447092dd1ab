//! Traits describing the live-game collaborators.
//!
//! The runner only ever observes the player and holds buttons through these
//! seams, so tests and alternative frontends can stand in for the emulator.

use std::fmt;

use world_core::Direction;

/// Errors raised by the live-game providers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("game state provider failed: {reason}")]
    GameState { reason: String },

    #[error("input injector failed: {reason}")]
    Input { reason: String },
}

/// The player's map-relative tile coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlayerCoords {
    pub x: i32,
    pub y: i32,
}

impl PlayerCoords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PlayerCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Read-only view of the running game's player state.
pub trait GameStateOracle: Send + Sync {
    /// The player's current map-relative coordinates.
    fn player_coords(&self) -> Result<PlayerCoords, ProviderError>;
}

/// Button injection into the running game.
///
/// One invocation holds the named direction key (plus the run modifier when
/// requested) for the injector's fixed duration, then releases it.
pub trait InputPort {
    fn hold_direction(&mut self, direction: Direction, run: bool) -> Result<(), ProviderError>;
}
