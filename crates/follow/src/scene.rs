//! Scene queries consumed by target resolution
//!
//! The controller never owns scene objects. It keeps an [`ObjectId`] and
//! asks the scene every frame whether that object still exists.

use crate::object::Pose;

/// Opaque handle to an object in the host scene
///
/// Holding an id does not keep the object alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An active camera as reported by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraInfo {
    pub id: ObjectId,
    /// Renders to a stereo/XR output
    pub stereo: bool,
}

/// Read-only view of the host scene
pub trait SceneQuery {
    /// The designated main camera, if any
    fn main_camera(&self) -> Option<ObjectId>;

    /// All active cameras in scene order
    fn cameras(&self) -> Vec<CameraInfo>;

    /// Find an object by exact name
    fn find_by_name(&self, name: &str) -> Option<ObjectId>;

    /// World pose of an object, or `None` once it has been destroyed
    fn pose(&self, id: ObjectId) -> Option<Pose>;

    fn is_alive(&self, id: ObjectId) -> bool {
        self.pose(id).is_some()
    }
}
