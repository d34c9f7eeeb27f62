//! Countdown timer module
//!
//! Counts down in milliseconds, stops itself at zero.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: u32,
    running: bool,
}

impl Countdown {
    /// Create a running countdown
    pub fn new(duration_ms: u32) -> Self {
        Self {
            remaining_ms: duration_ms,
            running: true,
        }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Extend the countdown (time bonus)
    pub fn add(&mut self, ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_add(ms);
    }

    /// Subtract elapsed time; clamps at zero and stops.
    pub fn update(&mut self, elapsed_ms: u32) {
        if !self.running {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.running = false;
        }
    }

    /// Whole seconds left, rounded up (what a HUD shows).
    pub fn display_secs(&self) -> u32 {
        self.remaining_ms.div_ceil(1000)
    }
}
