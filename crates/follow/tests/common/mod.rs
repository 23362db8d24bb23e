//! Shared scene and avatar doubles for controller tests

#![allow(dead_code)]

use follow::glam::{Quat, Vec3};
use follow::{Avatar, CameraInfo, Locomotion, Object, ObjectId, Pose, SceneQuery};

pub const AVATAR: ObjectId = ObjectId(1);
pub const HEAD: ObjectId = ObjectId(2);
pub const SPECTATOR: ObjectId = ObjectId(3);

struct Entry {
    id: ObjectId,
    name: String,
    pose: Pose,
    camera: Option<bool>,
    main: bool,
}

/// Scene made of named objects, some of them cameras
#[derive(Default)]
pub struct TestScene {
    entries: Vec<Entry>,
}

impl TestScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with a single stereo main camera named "Head"
    pub fn with_head(pose: Pose) -> Self {
        let mut scene = Self::new();
        scene.add_camera(HEAD, "Head", true, true, pose);
        scene
    }

    pub fn add_object(&mut self, id: ObjectId, name: &str, pose: Pose) {
        self.entries.push(Entry {
            id,
            name: name.to_string(),
            pose,
            camera: None,
            main: false,
        });
    }

    pub fn add_camera(&mut self, id: ObjectId, name: &str, main: bool, stereo: bool, pose: Pose) {
        self.entries.push(Entry {
            id,
            name: name.to_string(),
            pose,
            camera: Some(stereo),
            main,
        });
    }

    pub fn set_pose(&mut self, id: ObjectId, pose: Pose) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.pose = pose;
        }
    }

    pub fn destroy(&mut self, id: ObjectId) {
        self.entries.retain(|e| e.id != id);
    }
}

impl SceneQuery for TestScene {
    fn main_camera(&self) -> Option<ObjectId> {
        self.entries.iter().find(|e| e.main).map(|e| e.id)
    }

    fn cameras(&self) -> Vec<CameraInfo> {
        self.entries
            .iter()
            .filter_map(|e| e.camera.map(|stereo| CameraInfo { id: e.id, stereo }))
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.id)
    }

    fn pose(&self, id: ObjectId) -> Option<Pose> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.pose)
    }
}

/// Avatar with an optional collision body over a flat floor
pub struct TestAvatar {
    pub pose: Pose,
    pub has_body: bool,
    pub body_enabled: bool,
    /// Floor height the body cannot sink below
    pub floor: f32,
    pub grounded: bool,
    pub moves: Vec<Vec3>,
}

impl TestAvatar {
    /// Avatar without a locomotion primitive
    pub fn bodiless(pose: Pose) -> Self {
        Self {
            pose,
            has_body: false,
            body_enabled: false,
            floor: f32::NEG_INFINITY,
            grounded: false,
            moves: Vec::new(),
        }
    }

    /// Avatar with an enabled body standing on a floor at `floor`
    pub fn with_body(pose: Pose, floor: f32) -> Self {
        Self {
            pose,
            has_body: true,
            body_enabled: true,
            floor,
            grounded: pose.position.y <= floor,
            moves: Vec::new(),
        }
    }
}

impl Object for TestAvatar {
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

impl Locomotion for TestAvatar {
    fn move_by(&mut self, delta: Vec3) {
        self.moves.push(delta);
        let mut next = self.pose.position + delta;
        if next.y <= self.floor {
            next.y = self.floor;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        self.pose.position = next;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn is_enabled(&self) -> bool {
        self.body_enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.body_enabled = enabled;
    }
}

impl Avatar for TestAvatar {
    fn locomotion(&mut self) -> Option<&mut dyn Locomotion> {
        if self.has_body {
            Some(self)
        } else {
            None
        }
    }
}

pub fn approx_vec(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}
