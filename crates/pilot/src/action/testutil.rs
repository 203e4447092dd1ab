//! Scripted providers shared by the action and runner tests.

use std::sync::Mutex;

use world_core::Direction;

use crate::providers::{GameStateOracle, InputPort, PlayerCoords, ProviderError};

/// Game-state stand-in whose coordinates the test moves by hand.
pub(crate) struct ScriptedPlayer {
    coords: Mutex<PlayerCoords>,
}

impl ScriptedPlayer {
    pub(crate) fn at(x: i32, y: i32) -> Self {
        Self {
            coords: Mutex::new(PlayerCoords::new(x, y)),
        }
    }

    pub(crate) fn place(&self, x: i32, y: i32) {
        if let Ok(mut coords) = self.coords.lock() {
            *coords = PlayerCoords::new(x, y);
        }
    }
}

impl GameStateOracle for ScriptedPlayer {
    fn player_coords(&self) -> Result<PlayerCoords, ProviderError> {
        self.coords
            .lock()
            .map(|coords| *coords)
            .map_err(|_| ProviderError::GameState {
                reason: "coords lock poisoned".into(),
            })
    }
}

/// Input stand-in that records every hold it is asked for.
#[derive(Default)]
pub(crate) struct RecordingPad {
    pub(crate) held: Vec<(Direction, bool)>,
}

impl InputPort for RecordingPad {
    fn hold_direction(&mut self, direction: Direction, run: bool) -> Result<(), ProviderError> {
        self.held.push((direction, run));
        Ok(())
    }
}
