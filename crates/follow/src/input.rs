//! Input conditioning for manual locomotion
//!
//! Raw axis values come from whatever device the host polls. [`InputState`]
//! applies a radial deadzone, clamps the axes and turns a held jump button
//! into a one-frame trigger.

use glam::Vec2;

/// Default radial deadzone for movement axes
pub const DEFAULT_DEADZONE: f32 = 0.15;

/// Conditioned input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Strafe axis in [-1, 1], positive is right
    pub horizontal: f32,
    /// Forward axis in [-1, 1], positive is forward
    pub vertical: f32,
    /// True only on the frame the jump button was pressed
    pub jump: bool,
}

impl InputFrame {
    /// Frame with no movement and no jump
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            jump: false,
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }
}

/// Input state tracker
#[derive(Debug, Clone)]
pub struct InputState {
    /// Raw axis values (before deadzone)
    raw_axes: Vec2,
    /// Processed axis values
    axes: Vec2,
    jump_held: bool,
    jump_held_last_frame: bool,
    deadzone: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE)
    }
}

impl InputState {
    pub fn new(deadzone: f32) -> Self {
        Self {
            raw_axes: Vec2::ZERO,
            axes: Vec2::ZERO,
            jump_held: false,
            jump_held_last_frame: false,
            deadzone: deadzone.clamp(0.0, 0.99),
        }
    }

    /// Update both raw axes
    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.raw_axes = Vec2::new(horizontal, vertical);
        self.process_axes();
    }

    /// Update the held state of the jump button
    pub fn set_jump_held(&mut self, held: bool) {
        self.jump_held = held;
    }

    /// Processed axes after deadzone
    pub fn axes(&self) -> Vec2 {
        self.axes
    }

    /// Produce this frame's input and advance the jump edge detector
    pub fn frame(&mut self) -> InputFrame {
        let jump = self.jump_held && !self.jump_held_last_frame;
        self.jump_held_last_frame = self.jump_held;
        InputFrame {
            horizontal: self.axes.x,
            vertical: self.axes.y,
            jump,
        }
    }

    fn process_axes(&mut self) {
        let vec = if self.raw_axes.is_finite() {
            self.raw_axes
        } else {
            Vec2::ZERO
        };

        if vec.length() < self.deadzone {
            self.axes = Vec2::ZERO;
        } else {
            // Apply deadzone and renormalize
            let normalized = vec.normalize_or_zero();
            let magnitude =
                ((vec.length() - self.deadzone) / (1.0 - self.deadzone)).clamp(0.0, 1.0);
            self.axes = (normalized * magnitude).clamp(Vec2::NEG_ONE, Vec2::ONE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadzone_zeroes_small_input() {
        let mut input = InputState::default();
        input.set_axes(0.05, -0.1);
        assert_eq!(input.axes(), Vec2::ZERO);
    }

    #[test]
    fn test_full_deflection_stays_unit() {
        let mut input = InputState::default();
        input.set_axes(0.0, 1.0);
        let axes = input.axes();
        assert!((axes.y - 1.0).abs() < 1e-6);
        assert_eq!(axes.x, 0.0);
    }

    #[test]
    fn test_oversized_input_is_clamped() {
        let mut input = InputState::new(0.0);
        input.set_axes(3.0, 0.0);
        assert_eq!(input.axes(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_nan_input_is_ignored() {
        let mut input = InputState::default();
        input.set_axes(f32::NAN, 0.5);
        assert_eq!(input.axes(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_is_rising_edge() {
        let mut input = InputState::default();
        input.set_jump_held(true);
        assert!(input.frame().jump);
        // Still held: no new trigger
        assert!(!input.frame().jump);
        input.set_jump_held(false);
        assert!(!input.frame().jump);
        input.set_jump_held(true);
        assert!(input.frame().jump);
    }
}
