//! Mouse tracking for terminals.
//!
//! Terminals deliver mouse input as discrete events, while the board samples
//! the pointer once per frame and reacts to the released -> pressed edge.
//! [`PointerTracker`] bridges the two: feed it every event, then call
//! [`PointerTracker::sample`] once per frame.
//!
//! A click whose down and up both arrive between two samples would be
//! invisible to a level-sampling consumer, so a press is latched until the
//! next sample reports it.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Pointer state for one frame, in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerFrame {
    pub column: u16,
    pub row: u16,
    pub pressed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    column: u16,
    row: u16,
    held: bool,
    latched: bool,
    reported_pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one mouse event. Only the left button counts as a press.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) {
        self.column = event.column;
        self.row = event.row;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.held = true;
                self.latched = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.held = false,
            MouseEventKind::Drag(MouseButton::Left) => self.held = true,
            _ => {}
        }
    }

    /// Last known position as `(column, row)`.
    pub fn position(&self) -> (u16, u16) {
        (self.column, self.row)
    }

    /// Produce this frame's pointer state.
    pub fn sample(&mut self) -> PointerFrame {
        let pressed = if self.latched && self.reported_pressed {
            // A new press while the previous frame still reported one:
            // report a release first so the next frame has an edge.
            false
        } else {
            let pressed = self.held || self.latched;
            self.latched = false;
            pressed
        };
        self.reported_pressed = pressed;
        PointerFrame {
            column: self.column,
            row: self.row,
            pressed,
        }
    }

    /// Forget any held or latched press (e.g. on a scene change).
    pub fn reset(&mut self) {
        self.held = false;
        self.latched = false;
        self.reported_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_held_across_frames() {
        let mut t = PointerTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 2));
        assert_eq!(
            t.sample(),
            PointerFrame {
                column: 4,
                row: 2,
                pressed: true
            }
        );
        assert!(t.sample().pressed);

        t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 4, 2));
        assert!(!t.sample().pressed);
    }

    #[test]
    fn click_within_one_frame_is_latched() {
        let mut t = PointerTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1));

        assert!(t.sample().pressed);
        assert!(!t.sample().pressed);
    }

    #[test]
    fn repeated_click_gets_release_frame() {
        let mut t = PointerTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1));
        assert!(t.sample().pressed);

        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 1));
        t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 3, 1));
        assert!(!t.sample().pressed);
        assert!(t.sample().pressed);
        assert!(!t.sample().pressed);
    }

    #[test]
    fn moves_update_position_and_other_buttons_ignored() {
        let mut t = PointerTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Moved, 9, 7));
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 7));
        let frame = t.sample();
        assert_eq!(t.position(), (10, 7));
        assert!(!frame.pressed);
    }
}
