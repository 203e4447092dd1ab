//! The single-step walk action.

use world_core::Move;

use crate::action::{Action, ActionError};
use crate::providers::{GameStateOracle, InputPort, PlayerCoords};

/// Walks the player one tile in a direction.
///
/// The first [`perform`](Action::perform) snapshots the player's
/// coordinates; the step has succeeded once the observed coordinates differ
/// from that snapshot. Until then every poll re-holds the direction key, so
/// a press swallowed by the game (a turn-in-place, a lag frame) is simply
/// issued again on the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkAction {
    step: Move,
    start: Option<PlayerCoords>,
}

impl WalkAction {
    pub fn new(step: Move) -> Self {
        Self { step, start: None }
    }

    pub fn step(&self) -> Move {
        self.step
    }

    /// Coordinates recorded before the first attempt, if any attempt was
    /// made yet.
    pub fn start(&self) -> Option<PlayerCoords> {
        self.start
    }
}

impl Action for WalkAction {
    fn perform(
        &mut self,
        state: &dyn GameStateOracle,
        input: &mut dyn InputPort,
    ) -> Result<(), ActionError> {
        if self.start.is_none() {
            self.start = Some(state.player_coords()?);
        }
        input.hold_direction(self.step.direction, self.step.run)?;
        Ok(())
    }

    fn has_succeeded(&self, state: &dyn GameStateOracle) -> Result<bool, ActionError> {
        match self.start {
            // Nothing was attempted, so there is nothing to have succeeded.
            None => Ok(false),
            Some(start) => Ok(state.player_coords()? != start),
        }
    }
}

#[cfg(test)]
mod tests {
    use world_core::Direction;

    use super::*;
    use crate::action::testutil::{RecordingPad, ScriptedPlayer};

    #[test]
    fn first_perform_snapshots_the_starting_coords() {
        let player = ScriptedPlayer::at(4, 6);
        let mut pad = RecordingPad::default();
        let mut walk = WalkAction::new(Move::new(Direction::Right, true));

        assert_eq!(walk.start(), None);
        walk.perform(&player, &mut pad).unwrap();
        assert_eq!(walk.start(), Some(PlayerCoords::new(4, 6)));

        // The snapshot is taken once, not per attempt.
        player.place(5, 6);
        walk.perform(&player, &mut pad).unwrap();
        assert_eq!(walk.start(), Some(PlayerCoords::new(4, 6)));
    }

    #[test]
    fn every_perform_holds_direction_and_run_modifier() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut walk = WalkAction::new(Move::new(Direction::Up, true));

        walk.perform(&player, &mut pad).unwrap();
        walk.perform(&player, &mut pad).unwrap();
        assert_eq!(pad.held, [(Direction::Up, true), (Direction::Up, true)]);

        let mut stroll = WalkAction::new(Move::new(Direction::Left, false));
        stroll.perform(&player, &mut pad).unwrap();
        assert_eq!(pad.held.last(), Some(&(Direction::Left, false)));
    }

    #[test]
    fn success_means_the_coords_moved_off_the_snapshot() {
        let player = ScriptedPlayer::at(2, 2);
        let mut pad = RecordingPad::default();
        let mut walk = WalkAction::new(Move::new(Direction::Down, true));

        assert!(!walk.has_succeeded(&player).unwrap());

        walk.perform(&player, &mut pad).unwrap();
        assert!(!walk.has_succeeded(&player).unwrap());

        player.place(2, 3);
        assert!(walk.has_succeeded(&player).unwrap());

        // Any coordinate change counts, including a map crossing that
        // resets the map-relative pair.
        player.place(0, 3);
        assert!(walk.has_succeeded(&player).unwrap());
    }
}
