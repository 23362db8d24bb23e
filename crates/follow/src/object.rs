//! Poses and the transform trait shared by avatars and followed objects
//!
//! # Coordinate System
//!
//! Object-local axes are:
//! - +X is right
//! - +Y is up
//! - +Z is forward
//!
//! An identity rotation therefore faces world +Z.

use glam::{Quat, Vec3};

/// Local forward axis
pub const FORWARD: Vec3 = Vec3::Z;

/// Local right axis
pub const RIGHT: Vec3 = Vec3::X;

/// World up axis
pub const UP: Vec3 = Vec3::Y;

/// World-space position and orientation of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Pose at the origin facing +Z
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with identity rotation
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Transform a point from this pose's local space to world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Transform a world-space point into this pose's local space
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Transform a direction from local space to world space
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    pub fn forward(&self) -> Vec3 {
        self.transform_vector(FORWARD)
    }

    pub fn right(&self) -> Vec3 {
        self.transform_vector(RIGHT)
    }

    pub fn up(&self) -> Vec3 {
        self.transform_vector(UP)
    }
}

/// Base trait for any object with position and rotation in 3D space.
///
/// Implemented by the host for the controlled avatar. Followed objects are
/// only ever read, through [`crate::SceneQuery::pose`].
pub trait Object {
    /// Get the current position
    fn position(&self) -> Vec3;

    /// Get the current rotation as a quaternion
    fn rotation(&self) -> Quat;

    /// Set the position
    fn set_position(&mut self, position: Vec3);

    /// Set the rotation
    fn set_rotation(&mut self, rotation: Quat);

    fn pose(&self) -> Pose {
        Pose::new(self.position(), self.rotation())
    }

    fn forward(&self) -> Vec3 {
        self.rotation() * FORWARD
    }

    fn right(&self) -> Vec3 {
        self.rotation() * RIGHT
    }
}
