//! Sequencing a route's actions, one poll per external tick.

use tracing::{debug, trace};

use crate::action::{Action, ActionError, PathAction};
use crate::providers::{GameStateOracle, InputPort};

/// Outcome of one runner poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// An action is still in flight; keep polling.
    Running,
    /// Every action in the sequence has succeeded.
    Finished,
}

impl Progress {
    pub fn is_running(self) -> bool {
        matches!(self, Progress::Running)
    }
}

/// Drives an ordered action list against the live game.
///
/// The caller's tick loop is the scheduler: each [`poll`](Self::poll)
/// advances past at most one succeeded action and issues at most one input,
/// then returns. Action `i + 1` is never started before action `i` is
/// confirmed succeeded. A runner is built for one computed route and
/// discarded once it reports [`Progress::Finished`] or fails.
///
/// Without a retry limit a stalled action is re-issued forever; stopping
/// is then the caller's decision, made by not polling again.
#[derive(Debug)]
pub struct ActionRunner {
    actions: Vec<PathAction>,
    cursor: usize,
    started: bool,
    retry_limit: Option<u32>,
    attempts: u32,
}

impl ActionRunner {
    pub fn new(actions: Vec<PathAction>) -> Self {
        Self {
            actions,
            cursor: 0,
            started: false,
            retry_limit: None,
            attempts: 0,
        }
    }

    /// Bounds how often one action may be performed without succeeding;
    /// exceeding the bound makes [`poll`](Self::poll) fail with
    /// [`ActionError::Stalled`] instead of re-issuing forever.
    pub fn with_retry_limit(mut self, limit: u32) -> Self {
        self.retry_limit = Some(limit);
        self
    }

    /// Number of actions in the sequence.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of the action currently in flight.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Runs one tick of the sequence.
    ///
    /// The very first poll performs the first action. Every later poll
    /// first checks the in-flight action: once it has succeeded the cursor
    /// advances, and reaching the end reports [`Progress::Finished`]
    /// without issuing anything further. Otherwise the (possibly newly
    /// advanced) action is performed again.
    pub fn poll(
        &mut self,
        state: &dyn GameStateOracle,
        input: &mut dyn InputPort,
    ) -> Result<Progress, ActionError> {
        if !self.started {
            self.started = true;
            return match self.actions.get_mut(self.cursor) {
                Some(action) => {
                    trace!(action = self.cursor, "issuing first action");
                    action.perform(state, input)?;
                    self.attempts = 1;
                    Ok(Progress::Running)
                }
                None => Ok(Progress::Finished),
            };
        }

        let Some(current) = self.actions.get(self.cursor) else {
            return Ok(Progress::Finished);
        };
        if current.has_succeeded(state)? {
            debug!(action = self.cursor, "action succeeded");
            self.cursor += 1;
            self.attempts = 0;
            if self.cursor == self.actions.len() {
                debug!(actions = self.actions.len(), "route complete");
                return Ok(Progress::Finished);
            }
        }

        if let Some(limit) = self.retry_limit {
            if self.attempts >= limit {
                return Err(ActionError::Stalled {
                    action: self.cursor,
                    attempts: self.attempts,
                });
            }
        }

        let Some(action) = self.actions.get_mut(self.cursor) else {
            return Ok(Progress::Finished);
        };
        trace!(action = self.cursor, attempt = self.attempts + 1, "issuing action");
        action.perform(state, input)?;
        self.attempts += 1;
        Ok(Progress::Running)
    }
}

#[cfg(test)]
mod tests {
    use world_core::{Direction, Move};

    use super::*;
    use crate::action::WalkAction;
    use crate::action::testutil::{RecordingPad, ScriptedPlayer};

    fn walk(direction: Direction) -> PathAction {
        PathAction::Walk(WalkAction::new(Move::new(direction, true)))
    }

    fn three_step_runner() -> ActionRunner {
        ActionRunner::new(vec![
            walk(Direction::Right),
            walk(Direction::Right),
            walk(Direction::Up),
        ])
    }

    #[test]
    fn first_poll_issues_the_first_action() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = three_step_runner();

        let progress = runner.poll(&player, &mut pad).unwrap();
        assert!(progress.is_running());
        assert_eq!(runner.cursor(), 0);
        assert_eq!(pad.held, [(Direction::Right, true)]);
    }

    #[test]
    fn unchanged_coords_reissue_the_same_action() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = three_step_runner();

        runner.poll(&player, &mut pad).unwrap();
        runner.poll(&player, &mut pad).unwrap();
        runner.poll(&player, &mut pad).unwrap();

        assert_eq!(runner.cursor(), 0);
        assert_eq!(pad.held.len(), 3);
        assert!(pad.held.iter().all(|&held| held == (Direction::Right, true)));
    }

    #[test]
    fn success_advances_and_issues_the_next_action_in_the_same_poll() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = three_step_runner();

        runner.poll(&player, &mut pad).unwrap();
        player.place(1, 0);

        let progress = runner.poll(&player, &mut pad).unwrap();
        assert!(progress.is_running());
        assert_eq!(runner.cursor(), 1);
        assert_eq!(pad.held.len(), 2);
    }

    #[test]
    fn full_three_action_sequence_finishes_without_a_fourth_issue() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = three_step_runner();

        runner.poll(&player, &mut pad).unwrap(); // issue 0
        player.place(1, 0);
        runner.poll(&player, &mut pad).unwrap(); // advance, issue 1
        player.place(2, 0);
        runner.poll(&player, &mut pad).unwrap(); // advance, issue 2
        player.place(2, -1);

        let progress = runner.poll(&player, &mut pad).unwrap();
        assert_eq!(progress, Progress::Finished);
        assert_eq!(pad.held.len(), 3);
        assert_eq!(
            pad.held,
            [
                (Direction::Right, true),
                (Direction::Right, true),
                (Direction::Up, true),
            ]
        );

        // Polling a finished runner stays finished and stays quiet.
        let progress = runner.poll(&player, &mut pad).unwrap();
        assert_eq!(progress, Progress::Finished);
        assert_eq!(pad.held.len(), 3);
    }

    #[test]
    fn empty_sequence_finishes_on_the_first_poll() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = ActionRunner::new(Vec::new());

        assert_eq!(runner.poll(&player, &mut pad).unwrap(), Progress::Finished);
        assert!(pad.held.is_empty());
        assert!(runner.is_empty());
    }

    #[test]
    fn without_a_limit_a_stuck_action_is_reissued_indefinitely() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = ActionRunner::new(vec![walk(Direction::Down)]);

        for _ in 0..64 {
            assert!(runner.poll(&player, &mut pad).unwrap().is_running());
        }
        assert_eq!(pad.held.len(), 64);
        assert_eq!(runner.cursor(), 0);
    }

    #[test]
    fn retry_limit_turns_a_stall_into_an_error() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = ActionRunner::new(vec![walk(Direction::Down)]).with_retry_limit(3);

        for _ in 0..3 {
            assert!(runner.poll(&player, &mut pad).unwrap().is_running());
        }
        let err = runner.poll(&player, &mut pad).unwrap_err();
        assert_eq!(
            err,
            ActionError::Stalled {
                action: 0,
                attempts: 3
            }
        );
        assert_eq!(pad.held.len(), 3);
    }

    #[test]
    fn retry_counter_resets_on_advancement() {
        let player = ScriptedPlayer::at(0, 0);
        let mut pad = RecordingPad::default();
        let mut runner = ActionRunner::new(vec![
            walk(Direction::Right),
            walk(Direction::Right),
        ])
        .with_retry_limit(2);

        runner.poll(&player, &mut pad).unwrap();
        runner.poll(&player, &mut pad).unwrap(); // second attempt at the limit's edge
        player.place(1, 0);
        runner.poll(&player, &mut pad).unwrap(); // advances, fresh budget
        runner.poll(&player, &mut pad).unwrap();
        assert_eq!(runner.cursor(), 1);
        assert_eq!(pad.held.len(), 4);
    }
}
