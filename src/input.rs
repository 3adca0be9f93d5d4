//! Held-input state and its resolution into per-tick drive intent.
//!
//! Kept free of windowing types so the resolution rules are testable on
//! their own; the event loop just flips the flags.

use glam::Vec2;

/// Drive intent for one simulation tick.
///
/// `throttle` is -1.0 while driving forward and +1.0 in reverse: the
/// chassis forward axis points down -z, and displacement is
/// `forward_axis * distance * throttle`, so the two signs cancel and the
/// truck leads with its nose. `steer` is -1.0 for left, +1.0 for right.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInput {
    pub throttle: f32,
    pub steer: f32,
}

/// Which control keys are currently held, plus pointer state for the
/// orbit drag.
#[derive(Debug, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub screenshot_requested: bool,
    orbit_active: bool,
    cursor: Vec2,
    drag_anchor: Vec2,
}

impl InputState {
    /// Resolve the held flags into drive intent. Opposite keys held at
    /// once resolve by fixed priority: forward wins over backward, left
    /// over right.
    pub fn drive(&self) -> DriveInput {
        let throttle = if self.forward {
            -1.0
        } else if self.backward {
            1.0
        } else {
            0.0
        };
        let steer = if self.steer_left {
            -1.0
        } else if self.steer_right {
            1.0
        } else {
            0.0
        };
        DriveInput { throttle, steer }
    }

    /// Start an orbit drag at the current cursor position.
    pub fn begin_drag(&mut self) {
        self.orbit_active = true;
        self.drag_anchor = self.cursor;
    }

    pub fn end_drag(&mut self) {
        self.orbit_active = false;
    }

    /// Track the cursor. While a drag is active, returns the orbit delta
    /// (anchor minus cursor) and moves the anchor to the new position so
    /// each event reports only its own movement.
    pub fn move_cursor(&mut self, position: Vec2) -> Option<Vec2> {
        let delta = if self.orbit_active {
            let delta = self.drag_anchor - position;
            self.drag_anchor = position;
            Some(delta)
        } else {
            None
        };
        self.cursor = position;
        delta
    }
}
