//! Score and lives for one session.
//!
//! Plain accessors: whoever needs the numbers reads them after the frame's
//! update, nothing is pushed to subscribers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreKeeper {
    score: u32,
    lives: i32,
}

impl ScoreKeeper {
    pub fn new(lives: i32) -> Self {
        Self { score: 0, lives }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn lose_life(&mut self) {
        self.lives -= 1;
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives <= 0
    }
}
