//! In-memory scene standing in for the host engine
//!
//! Objects are kept in id order, which doubles as scene order for camera
//! enumeration. Destroyed ids are never reused.

use follow::{CameraInfo, ObjectId, Pose, SceneQuery};
use std::collections::BTreeMap;

/// Camera properties of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFlags {
    /// Designated main camera
    pub main: bool,
    /// Renders to a stereo/XR output
    pub stereo: bool,
    pub active: bool,
}

impl CameraFlags {
    /// Active main camera with stereo output, as an XR head usually is
    pub const XR_HEAD: Self = Self {
        main: true,
        stereo: true,
        active: true,
    };

    /// Active non-main flat camera
    pub const SPECTATOR: Self = Self {
        main: false,
        stereo: false,
        active: true,
    };
}

/// One object in the scene
#[derive(Debug, Clone)]
pub struct SimObject {
    pub name: String,
    pub pose: Pose,
    pub camera: Option<CameraFlags>,
}

#[derive(Debug, Default)]
pub struct SimScene {
    objects: BTreeMap<ObjectId, SimObject>,
    next_id: u64,
}

impl SimScene {
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Add a plain object and return its id
    pub fn spawn(&mut self, name: &str, pose: Pose) -> ObjectId {
        self.insert(SimObject {
            name: name.to_string(),
            pose,
            camera: None,
        })
    }

    /// Add a camera object and return its id
    pub fn spawn_camera(&mut self, name: &str, pose: Pose, flags: CameraFlags) -> ObjectId {
        self.insert(SimObject {
            name: name.to_string(),
            pose,
            camera: Some(flags),
        })
    }

    /// Remove an object; returns whether it existed
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        self.objects.remove(&id).is_some()
    }

    pub fn set_pose(&mut self, id: ObjectId, pose: Pose) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.pose = pose;
        }
    }

    pub fn set_camera_active(&mut self, id: ObjectId, active: bool) {
        if let Some(camera) = self.objects.get_mut(&id).and_then(|o| o.camera.as_mut()) {
            camera.active = active;
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&SimObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn insert(&mut self, object: SimObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    fn active_cameras(&self) -> impl Iterator<Item = (ObjectId, CameraFlags)> + '_ {
        self.objects
            .iter()
            .filter_map(|(id, object)| object.camera.map(|flags| (*id, flags)))
            .filter(|(_, flags)| flags.active)
    }
}

impl SceneQuery for SimScene {
    fn main_camera(&self) -> Option<ObjectId> {
        self.active_cameras()
            .find(|(_, flags)| flags.main)
            .map(|(id, _)| id)
    }

    fn cameras(&self) -> Vec<CameraInfo> {
        self.active_cameras()
            .map(|(id, flags)| CameraInfo {
                id,
                stereo: flags.stereo,
            })
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| *id)
    }

    fn pose(&self, id: ObjectId) -> Option<Pose> {
        self.objects.get(&id).map(|object| object.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_ids_are_not_reused() {
        let mut scene = SimScene::new();
        let a = scene.spawn("A", Pose::IDENTITY);
        assert!(scene.destroy(a));
        let b = scene.spawn("B", Pose::IDENTITY);
        assert_ne!(a, b);
        assert!(!scene.destroy(a));
    }

    #[test]
    fn test_inactive_cameras_are_hidden() {
        let mut scene = SimScene::new();
        let head = scene.spawn_camera("Head", Pose::IDENTITY, CameraFlags::XR_HEAD);
        let spectator = scene.spawn_camera("Spectator", Pose::IDENTITY, CameraFlags::SPECTATOR);

        assert_eq!(scene.main_camera(), Some(head));
        assert_eq!(scene.cameras().len(), 2);

        scene.set_camera_active(head, false);
        assert_eq!(scene.main_camera(), None);
        assert_eq!(
            scene.cameras(),
            vec![CameraInfo {
                id: spectator,
                stereo: false
            }]
        );
    }

    #[test]
    fn test_destroyed_object_has_no_pose() {
        let mut scene = SimScene::new();
        let id = scene.spawn("Head", Pose::from_position(Vec3::Y));
        assert_eq!(scene.pose(id), Some(Pose::from_position(Vec3::Y)));
        assert_eq!(scene.find_by_name("Head"), Some(id));

        scene.destroy(id);
        assert_eq!(scene.pose(id), None);
        assert_eq!(scene.find_by_name("Head"), None);
        assert!(scene.is_empty());
    }
}
