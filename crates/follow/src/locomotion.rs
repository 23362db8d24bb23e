//! Manual locomotion and the collision-aware movement boundary
//!
//! Used whenever there is nothing to follow. Horizontal movement comes from
//! the two input axes along the avatar's right and forward vectors; vertical
//! movement is a semi-implicit Euler integration of gravity that is held at a
//! small downward velocity while grounded.

use glam::Vec3;

use crate::input::InputFrame;
use crate::object::Object;

// ============================================================================
// Movement Boundary
// ============================================================================

/// Collision-aware movement provided by the host
pub trait Locomotion {
    /// Move by a world-space delta, resolved against collision
    fn move_by(&mut self, delta: Vec3);

    /// Whether the last move ended in contact with the ground
    fn is_grounded(&self) -> bool;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// The controlled avatar
pub trait Avatar: Object {
    /// The avatar's locomotion primitive, or `None` if it has none
    fn locomotion(&mut self) -> Option<&mut dyn Locomotion>;
}

/// Move through the locomotion primitive when it is enabled, else directly
pub(crate) fn move_avatar(avatar: &mut dyn Avatar, delta: Vec3) {
    let through_locomotion = avatar.locomotion().is_some_and(|l| l.is_enabled());
    if through_locomotion {
        if let Some(locomotion) = avatar.locomotion() {
            locomotion.move_by(delta);
        }
    } else {
        let position = avatar.position() + delta;
        avatar.set_position(position);
    }
}

/// Grounded as reported by an enabled locomotion primitive
fn is_grounded(avatar: &mut dyn Avatar) -> bool {
    avatar
        .locomotion()
        .is_some_and(|l| l.is_enabled() && l.is_grounded())
}

// ============================================================================
// Parameters
// ============================================================================

/// Tuning for manual movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionParams {
    /// Units per second at full axis deflection
    pub speed: f32,
    /// Signed vertical acceleration
    pub gravity: f32,
    /// Velocity held while grounded
    pub grounded_velocity: f32,
    /// Jump apex height, `None` when jumping is disabled
    pub jump_height: Option<f32>,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            speed: 5.0,
            gravity: -9.81,
            grounded_velocity: -2.0,
            jump_height: None,
        }
    }
}

/// Movement applied for one manual frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualStep {
    /// Horizontal delta from input
    pub horizontal: Vec3,
    /// Vertical delta from the integrated velocity
    pub vertical: Vec3,
    /// Vertical velocity carried to the next frame
    pub vertical_velocity: f32,
    /// A jump impulse was applied this frame
    pub jumped: bool,
}

/// Result of one vertical integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalStep {
    pub delta_y: f32,
    pub velocity: f32,
}

// ============================================================================
// Manual Locomotion
// ============================================================================

/// Input-driven fallback movement
pub struct ManualLocomotion;

impl ManualLocomotion {
    /// Run one frame of manual movement on `avatar`.
    ///
    /// Order per frame: horizontal move, grounded read, velocity clamp and
    /// gravity, vertical move, grounded read again, jump. The jump therefore
    /// sees contact made by this frame's vertical move, and its impulse
    /// moves the avatar from the next frame on.
    pub fn apply(
        avatar: &mut dyn Avatar,
        input: &InputFrame,
        vertical_velocity: f32,
        params: &LocomotionParams,
        dt: f32,
    ) -> ManualStep {
        let horizontal =
            Self::horizontal_delta(input, avatar.right(), avatar.forward(), params.speed, dt);
        move_avatar(avatar, horizontal);

        let grounded = is_grounded(avatar);
        let vertical = Self::integrate_vertical(grounded, vertical_velocity, params, dt);
        let vertical_delta = Vec3::Y * vertical.delta_y;
        move_avatar(avatar, vertical_delta);

        let landed = is_grounded(avatar);
        let jump = Self::jump_velocity(input.jump, landed, params);

        ManualStep {
            horizontal,
            vertical: vertical_delta,
            vertical_velocity: jump.unwrap_or(vertical.velocity),
            jumped: jump.is_some(),
        }
    }

    /// Horizontal movement for one frame from the input axes
    pub fn horizontal_delta(
        input: &InputFrame,
        right: Vec3,
        forward: Vec3,
        speed: f32,
        dt: f32,
    ) -> Vec3 {
        (right * input.horizontal + forward * input.vertical) * speed * dt
    }

    /// Integrate vertical velocity for one frame
    pub fn integrate_vertical(
        grounded: bool,
        vertical_velocity: f32,
        params: &LocomotionParams,
        dt: f32,
    ) -> VerticalStep {
        let mut velocity = vertical_velocity;
        if grounded && velocity < 0.0 {
            velocity = params.grounded_velocity;
        }
        velocity += params.gravity * dt;

        VerticalStep {
            delta_y: velocity * dt,
            velocity,
        }
    }

    /// Upward velocity of a jump, if one starts this frame
    pub fn jump_velocity(jump: bool, grounded: bool, params: &LocomotionParams) -> Option<f32> {
        let height = params.jump_height?;
        (jump && grounded).then(|| (height * -2.0 * params.gravity).max(0.0).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    const DT: f32 = 0.02;

    /// Avatar above a floor at y = 0
    struct FloorAvatar {
        position: Vec3,
        rotation: Quat,
        grounded: bool,
        enabled: bool,
    }

    impl FloorAvatar {
        fn at(y: f32) -> Self {
            Self {
                position: Vec3::new(0.0, y, 0.0),
                rotation: Quat::IDENTITY,
                grounded: y <= 0.0,
                enabled: true,
            }
        }
    }

    impl Object for FloorAvatar {
        fn position(&self) -> Vec3 {
            self.position
        }
        fn rotation(&self) -> Quat {
            self.rotation
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.rotation = rotation;
        }
    }

    impl Locomotion for FloorAvatar {
        fn move_by(&mut self, delta: Vec3) {
            self.position += delta;
            self.grounded = self.position.y <= 0.0;
            self.position.y = self.position.y.max(0.0);
        }
        fn is_grounded(&self) -> bool {
            self.grounded
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    impl Avatar for FloorAvatar {
        fn locomotion(&mut self) -> Option<&mut dyn Locomotion> {
            Some(self)
        }
    }

    fn with_jump() -> LocomotionParams {
        LocomotionParams {
            jump_height: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_clamp_before_gravity() {
        let params = LocomotionParams::default();
        let step = ManualLocomotion::integrate_vertical(true, -5.0, &params, DT);

        let expected = -2.0 + params.gravity * DT;
        assert!((step.velocity - expected).abs() < 1e-6);
        assert!((step.delta_y - expected * DT).abs() < 1e-6);
    }

    #[test]
    fn test_airborne_accumulates_gravity() {
        let params = LocomotionParams::default();
        let mut velocity = 0.0;
        for _ in 0..10 {
            velocity = ManualLocomotion::integrate_vertical(false, velocity, &params, DT).velocity;
        }
        assert!((velocity - params.gravity * DT * 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_rising_velocity_not_clamped_when_grounded() {
        let params = LocomotionParams::default();
        let step = ManualLocomotion::integrate_vertical(true, 3.0, &params, DT);
        assert!((step.velocity - (3.0 + params.gravity * DT)).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_uses_avatar_axes() {
        let input = InputFrame::axes(1.0, 0.5);
        let right = Vec3::new(0.0, 0.0, -1.0);
        let forward = Vec3::X;

        let delta = ManualLocomotion::horizontal_delta(&input, right, forward, 5.0, DT);
        let expected = (right + forward * 0.5) * 5.0 * DT;
        assert!((delta - expected).length() < 1e-6);
    }

    #[test]
    fn test_jump_requires_ground_and_enable() {
        assert_eq!(
            ManualLocomotion::jump_velocity(true, true, &LocomotionParams::default()),
            None
        );
        assert_eq!(ManualLocomotion::jump_velocity(true, false, &with_jump()), None);
        assert_eq!(ManualLocomotion::jump_velocity(false, true, &with_jump()), None);

        let velocity = ManualLocomotion::jump_velocity(true, true, &with_jump()).unwrap();
        assert!((velocity - (2.0f32 * 9.81).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_apply_jump_lands_after_vertical_move() {
        let mut avatar = FloorAvatar::at(0.0);
        let step = ManualLocomotion::apply(
            &mut avatar,
            &InputFrame::idle().with_jump(),
            0.0,
            &with_jump(),
            DT,
        );

        assert!(step.jumped);
        assert!(step.vertical.y < 0.0);
        assert!((step.vertical_velocity - (2.0f32 * 9.81).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_apply_jumps_on_landing_frame() {
        // Airborne at the start of the frame, touching down during it
        let mut avatar = FloorAvatar::at(0.001);
        let step = ManualLocomotion::apply(
            &mut avatar,
            &InputFrame::idle().with_jump(),
            0.0,
            &with_jump(),
            DT,
        );

        assert!(avatar.grounded);
        assert!(step.jumped);
        assert!(step.vertical_velocity > 0.0);
    }

    #[test]
    fn test_apply_moves_disabled_body_directly() {
        let mut avatar = FloorAvatar::at(0.0);
        avatar.enabled = false;
        let step = ManualLocomotion::apply(
            &mut avatar,
            &InputFrame::axes(0.0, 1.0).with_jump(),
            0.0,
            &with_jump(),
            DT,
        );

        assert!(!step.jumped);
        assert!(avatar.position.y < 0.0, "no collision while disabled");
        assert!((avatar.position.z - 5.0 * DT).abs() < 1e-6);
    }
}
