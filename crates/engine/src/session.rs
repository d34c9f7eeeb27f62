//! One play session of a single game mode.
//!
//! A [`ModeSession`] owns its [`Board`] and applies the mode's rules after
//! every board update:
//!
//! | Mode | Lives | Timer | Ends |
//! |------|-------|-------|------|
//! | Normal | 3 | - | lost at 0 lives |
//! | TimeKeeper | 5 | 120 s, +10 s per 50 points | won when time runs out with lives left, lost at 0 lives |
//! | Zen | - | - | never |
//!
//! The end of a session is reported through the return value of
//! [`ModeSession::update`] and, if one was registered at construction, a
//! single callback that fires exactly once.

use std::fmt;

use log::{debug, info};

use crate::core::Board;
use crate::score::ScoreKeeper;
use crate::timer::Countdown;
use crate::types::{
    GameMode, Outcome, PointerSample, NORMAL_LIVES, TIMEKEEPER_BONUS_EVERY, TIMEKEEPER_BONUS_MS,
    TIMEKEEPER_LIVES, TIMEKEEPER_START_MS,
};

/// Receives the outcome and final score when a session ends.
pub type OutcomeCallback = Box<dyn FnMut(Outcome, u32)>;

pub struct ModeSession {
    mode: GameMode,
    board: Board,
    score: ScoreKeeper,
    timer: Option<Countdown>,
    // Points gained toward the next time bonus.
    bonus_progress: u32,
    outcome: Option<Outcome>,
    on_finish: Option<OutcomeCallback>,
}

impl fmt::Debug for ModeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeSession")
            .field("mode", &self.mode)
            .field("score", &self.score)
            .field("timer", &self.timer)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl ModeSession {
    pub fn new(mode: GameMode, board: Board) -> Self {
        let (lives, timer) = match mode {
            GameMode::Normal => (NORMAL_LIVES, None),
            GameMode::TimeKeeper => (TIMEKEEPER_LIVES, Some(Countdown::new(TIMEKEEPER_START_MS))),
            GameMode::Zen => (0, None),
        };
        info!("session start mode={}", mode.as_str());
        Self {
            mode,
            board,
            score: ScoreKeeper::new(lives),
            timer,
            bonus_progress: 0,
            outcome: None,
            on_finish: None,
        }
    }

    /// Like [`ModeSession::new`], with a callback invoked once when the
    /// session ends.
    pub fn with_callback(
        mode: GameMode,
        board: Board,
        on_finish: impl FnMut(Outcome, u32) + 'static,
    ) -> Self {
        let mut session = Self::new(mode, board);
        session.on_finish = Some(Box::new(on_finish));
        session
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Remaining lives; `None` in Zen.
    pub fn lives(&self) -> Option<i32> {
        match self.mode {
            GameMode::Zen => None,
            _ => Some(self.score.lives()),
        }
    }

    pub fn timer(&self) -> Option<&Countdown> {
        self.timer.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance the board one frame and apply the mode rules.
    ///
    /// Returns `Some(outcome)` only on the frame the session ends. A finished
    /// session is frozen: later calls do nothing and return `None`.
    pub fn update(&mut self, pointer: PointerSample, elapsed_ms: u32) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }

        self.board.update(pointer, elapsed_ms);

        let gained = self.board.take_score();
        if gained > 0 {
            self.score.add_points(gained);
            self.apply_time_bonus(gained);
        }

        if self.board.take_failed_swap() && self.mode != GameMode::Zen {
            self.score.lose_life();
            debug!("failed swap, lives={}", self.score.lives());
        }

        if let Some(timer) = &mut self.timer {
            timer.update(elapsed_ms);
        }

        let outcome = self.evaluate()?;
        self.finish(outcome);
        Some(outcome)
    }

    fn apply_time_bonus(&mut self, gained: u32) {
        let Some(timer) = &mut self.timer else {
            return;
        };
        self.bonus_progress += gained;
        while self.bonus_progress >= TIMEKEEPER_BONUS_EVERY {
            self.bonus_progress -= TIMEKEEPER_BONUS_EVERY;
            timer.add(TIMEKEEPER_BONUS_MS);
            debug!("time bonus, remaining_ms={}", timer.remaining_ms());
        }
    }

    fn evaluate(&self) -> Option<Outcome> {
        match self.mode {
            GameMode::Normal => self.score.is_out_of_lives().then_some(Outcome::Lost),
            GameMode::TimeKeeper => {
                if self.score.is_out_of_lives() {
                    Some(Outcome::Lost)
                } else if self.timer.is_some_and(|t| t.is_expired()) {
                    Some(Outcome::Won)
                } else {
                    None
                }
            }
            GameMode::Zen => None,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        if let Some(timer) = &mut self.timer {
            timer.stop();
        }
        info!(
            "session end mode={} outcome={} score={}",
            self.mode.as_str(),
            outcome.as_str(),
            self.score.score()
        );
        if let Some(mut callback) = self.on_finish.take() {
            callback(outcome, self.score.score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, CellPos, ScriptedFactory};
    use crate::types::PieceKind::{Emerald as E, Ruby as R, Sapphire as S, Topaz as T};
    use crate::types::{PieceKind, TICK_MS};
    use std::cell::RefCell;
    use std::rc::Rc;

    // No runs anywhere and no single swap can make one.
    fn dead_board() -> Board {
        let kinds = vec![
            vec![R, E, S],
            vec![T, R, E],
            vec![S, T, R],
        ];
        Board::from_kinds(BoardConfig::new(3, 3), &kinds, ScriptedFactory::new([T])).unwrap()
    }

    // Swapping (0,2) with (1,2) completes a run of three rubies on row 0.
    fn scoring_board() -> Board {
        let kinds = vec![
            vec![R, R, E],
            vec![S, T, R],
            vec![E, S, T],
        ];
        let refill: Vec<PieceKind> = vec![S, E, T];
        Board::from_kinds(BoardConfig::new(3, 3), &kinds, ScriptedFactory::new(refill)).unwrap()
    }

    fn fail_swap(session: &mut ModeSession) {
        let outcome = session
            .board_mut()
            .try_swap(CellPos::new(0, 0), CellPos::new(0, 1));
        assert_eq!(outcome, crate::core::SwapOutcome::Reverted);
    }

    #[test]
    fn normal_loses_after_three_failed_swaps() {
        let mut session = ModeSession::new(GameMode::Normal, dead_board());
        assert_eq!(session.lives(), Some(3));

        for expected in [2, 1] {
            fail_swap(&mut session);
            assert_eq!(session.update(PointerSample::idle(), TICK_MS), None);
            assert_eq!(session.lives(), Some(expected));
        }

        fail_swap(&mut session);
        assert_eq!(session.update(PointerSample::idle(), TICK_MS), Some(Outcome::Lost));
        assert!(session.is_finished());

        // Frozen afterwards
        assert_eq!(session.update(PointerSample::idle(), TICK_MS), None);
    }

    #[test]
    fn zen_ignores_failed_swaps() {
        let mut session = ModeSession::new(GameMode::Zen, dead_board());
        for _ in 0..10 {
            fail_swap(&mut session);
            assert_eq!(session.update(PointerSample::idle(), TICK_MS), None);
        }
        assert_eq!(session.lives(), None);
        assert!(!session.is_finished());
    }

    #[test]
    fn score_accumulates_from_board() {
        let mut session = ModeSession::new(GameMode::Normal, scoring_board());
        let outcome = session
            .board_mut()
            .try_swap(CellPos::new(0, 2), CellPos::new(1, 2));
        assert!(matches!(outcome, crate::core::SwapOutcome::Matched { removed: 3 }));

        session.update(PointerSample::idle(), TICK_MS);
        assert_eq!(session.score(), 3);
        assert_eq!(session.lives(), Some(3));
    }

    #[test]
    fn timekeeper_wins_when_time_runs_out() {
        let mut session = ModeSession::new(GameMode::TimeKeeper, dead_board());
        assert_eq!(session.timer().map(Countdown::remaining_ms), Some(TIMEKEEPER_START_MS));

        assert_eq!(session.update(PointerSample::idle(), TIMEKEEPER_START_MS - 1), None);
        assert_eq!(session.update(PointerSample::idle(), 1), Some(Outcome::Won));
    }

    #[test]
    fn timekeeper_loses_when_lives_run_out() {
        let mut session = ModeSession::new(GameMode::TimeKeeper, dead_board());
        let mut result = None;
        for _ in 0..TIMEKEEPER_LIVES {
            fail_swap(&mut session);
            result = session.update(PointerSample::idle(), TICK_MS);
        }
        assert_eq!(result, Some(Outcome::Lost));
    }

    #[test]
    fn time_bonus_every_fifty_points() {
        let mut session = ModeSession::new(GameMode::TimeKeeper, dead_board());
        session.apply_time_bonus(49);
        assert_eq!(session.timer().map(Countdown::remaining_ms), Some(TIMEKEEPER_START_MS));
        session.apply_time_bonus(52);
        assert_eq!(
            session.timer().map(Countdown::remaining_ms),
            Some(TIMEKEEPER_START_MS + 2 * TIMEKEEPER_BONUS_MS)
        );
        assert_eq!(session.bonus_progress, 1);
    }

    #[test]
    fn callback_fires_exactly_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut session = ModeSession::with_callback(GameMode::TimeKeeper, dead_board(), move |o, s| {
            sink.borrow_mut().push((o, s));
        });

        session.update(PointerSample::idle(), TIMEKEEPER_START_MS);
        session.update(PointerSample::idle(), TICK_MS);
        session.update(PointerSample::idle(), TICK_MS);

        assert_eq!(calls.borrow().as_slice(), &[(Outcome::Won, 0)]);
    }
}
