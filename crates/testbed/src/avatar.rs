//! Simulated avatar standing on a flat ground plane

use follow::{Avatar, Locomotion, Object, Pose};
use glam::{Quat, Vec3};

/// Collision body that keeps the avatar's feet on or above a horizontal plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBody {
    /// World height of the ground plane
    pub ground_height: f32,
    pub grounded: bool,
    pub enabled: bool,
}

impl GroundBody {
    pub fn new(ground_height: f32) -> Self {
        Self {
            ground_height,
            grounded: false,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimAvatar {
    pose: Pose,
    body: Option<GroundBody>,
}

impl SimAvatar {
    /// Avatar with a ground body; grounded when spawned at or below the plane
    pub fn with_body(pose: Pose, ground_height: f32) -> Self {
        let mut body = GroundBody::new(ground_height);
        let mut pose = pose;
        if pose.position.y <= ground_height {
            pose.position.y = ground_height;
            body.grounded = true;
        }
        Self {
            pose,
            body: Some(body),
        }
    }

    /// Avatar without any locomotion primitive
    pub fn bodiless(pose: Pose) -> Self {
        Self { pose, body: None }
    }

    pub fn body(&self) -> Option<&GroundBody> {
        self.body.as_ref()
    }
}

impl Object for SimAvatar {
    fn position(&self) -> Vec3 {
        self.pose.position
    }

    fn rotation(&self) -> Quat {
        self.pose.rotation
    }

    fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.pose.rotation = rotation;
    }
}

impl Locomotion for SimAvatar {
    fn move_by(&mut self, delta: Vec3) {
        let mut next = self.pose.position + delta;
        if let Some(body) = self.body.as_mut() {
            body.grounded = next.y <= body.ground_height;
            if body.grounded {
                next.y = body.ground_height;
            }
        }
        self.pose.position = next;
    }

    fn is_grounded(&self) -> bool {
        self.body.is_some_and(|body| body.grounded)
    }

    fn is_enabled(&self) -> bool {
        self.body.is_some_and(|body| body.enabled)
    }

    fn set_enabled(&mut self, enabled: bool) {
        if let Some(body) = self.body.as_mut() {
            body.enabled = enabled;
        }
    }
}

impl Avatar for SimAvatar {
    fn locomotion(&mut self) -> Option<&mut dyn Locomotion> {
        if self.body.is_some() {
            Some(self)
        } else {
            None
        }
    }
}
