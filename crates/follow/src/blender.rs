//! Pose smoothing toward a followed target
//!
//! The desired pose is the target's pose applied to a local-space offset.
//! Position and rotation approach it independently with frame-rate
//! independent exponential interpolation:
//!
//!   `value = lerp(value, desired, 1 - exp(-rate * dt))`
//!
//! A snap (first frame of a follow episode, or a rate of zero) jumps
//! straight to the desired value.

use glam::{Mat3, Quat, Vec3};

use crate::object::{Pose, UP};

/// Below this squared length a flattened forward vector is considered degenerate
const FLAT_FORWARD_EPSILON_SQ: f32 = 1.0e-6;

/// Smoothing settings for one blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParams {
    /// Position smoothing rate per second; `<= 0` snaps
    pub position_rate: f32,
    /// Rotation smoothing rate per second; `<= 0` snaps
    pub rotation_rate: f32,
    /// Match only the target's heading
    pub yaw_only: bool,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            position_rate: 15.0,
            rotation_rate: 15.0,
            yaw_only: true,
        }
    }
}

/// Exponential interpolation factor for a given rate and delta time.
///
/// Returns a value in `[0, 1]`: 0 means stay, 1 means arrive.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Rotation whose forward (+Z) axis points along `forward` with +Y as close
/// to `up` as possible. `None` if `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Computes the avatar pose for one follow frame
pub struct PoseBlender;

impl PoseBlender {
    /// Pose the avatar should reach: the offset transformed by the target,
    /// facing either the target's full orientation or its heading only.
    pub fn desired_pose(target: &Pose, offset: Vec3, current: &Pose, yaw_only: bool) -> Pose {
        let position = target.transform_point(offset);
        let rotation = if yaw_only {
            Self::yaw_rotation(target.forward(), current)
        } else {
            target.rotation
        };
        Pose::new(position, rotation)
    }

    /// Blend `current` toward the target-derived pose
    pub fn blend(
        target: &Pose,
        offset: Vec3,
        current: &Pose,
        dt: f32,
        params: &BlendParams,
        snap: bool,
    ) -> Pose {
        let desired = Self::desired_pose(target, offset, current, params.yaw_only);

        let position = if snap || params.position_rate <= 0.0 {
            desired.position
        } else {
            current
                .position
                .lerp(desired.position, smoothing_factor(params.position_rate, dt))
        };

        let rotation = if snap || params.rotation_rate <= 0.0 {
            desired.rotation
        } else {
            current
                .rotation
                .slerp(desired.rotation, smoothing_factor(params.rotation_rate, dt))
                .normalize()
        };

        Pose::new(position, rotation)
    }

    /// Heading-only rotation from the target's forward vector.
    ///
    /// When the target looks straight up or down the flattened forward has no
    /// direction, so the avatar's own forward is used instead.
    fn yaw_rotation(target_forward: Vec3, current: &Pose) -> Quat {
        let flat = Vec3::new(target_forward.x, 0.0, target_forward.z);
        let forward = if flat.length_squared() < FLAT_FORWARD_EPSILON_SQ {
            current.forward()
        } else {
            flat
        };
        look_rotation(forward, UP).unwrap_or(current.rotation)
    }
}
