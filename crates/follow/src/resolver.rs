//! Follow-target discovery
//!
//! Resolution walks an ordered list of strategies and returns the first live
//! object that is not the avatar itself. An externally assigned target is
//! always considered before any strategy.

use serde::{Deserialize, Serialize};

use crate::scene::{ObjectId, SceneQuery};

/// One way of finding something to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// The scene's designated main camera
    MainCamera,
    /// First active camera rendering to a stereo/XR output
    StereoCamera,
    /// First active camera of any kind
    AnyCamera,
    /// First object found from the anchor name priority list
    NamedAnchor,
}

impl DiscoveryStrategy {
    /// Order used when nothing else is configured
    pub const DEFAULT_ORDER: [DiscoveryStrategy; 4] = [
        DiscoveryStrategy::MainCamera,
        DiscoveryStrategy::StereoCamera,
        DiscoveryStrategy::AnyCamera,
        DiscoveryStrategy::NamedAnchor,
    ];
}

/// Finds or re-validates the object an avatar should follow
#[derive(Debug, Clone)]
pub struct TargetResolver {
    strategies: Vec<DiscoveryStrategy>,
    anchor_names: Vec<String>,
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new(
            DiscoveryStrategy::DEFAULT_ORDER.to_vec(),
            crate::config::default_anchor_names(),
        )
    }
}

impl TargetResolver {
    pub fn new(strategies: Vec<DiscoveryStrategy>, anchor_names: Vec<String>) -> Self {
        Self {
            strategies,
            anchor_names,
        }
    }

    /// Resolve the target to follow.
    ///
    /// `assigned` is the externally pre-assigned target. It wins when it is
    /// alive and is not `self_id`; otherwise the strategies are tried in
    /// order. Returns `None` when nothing qualifies, which is a normal state.
    pub fn resolve(
        &self,
        assigned: Option<ObjectId>,
        self_id: ObjectId,
        scene: &dyn SceneQuery,
    ) -> Option<ObjectId> {
        let usable = |id: ObjectId| id != self_id && scene.is_alive(id);

        if let Some(id) = assigned.filter(|&id| usable(id)) {
            return Some(id);
        }

        self.strategies
            .iter()
            .find_map(|strategy| self.discover(*strategy, scene, &usable))
    }

    fn discover(
        &self,
        strategy: DiscoveryStrategy,
        scene: &dyn SceneQuery,
        usable: &dyn Fn(ObjectId) -> bool,
    ) -> Option<ObjectId> {
        match strategy {
            DiscoveryStrategy::MainCamera => scene.main_camera().filter(|&id| usable(id)),
            DiscoveryStrategy::StereoCamera => scene
                .cameras()
                .into_iter()
                .find(|camera| camera.stereo && usable(camera.id))
                .map(|camera| camera.id),
            DiscoveryStrategy::AnyCamera => scene
                .cameras()
                .into_iter()
                .map(|camera| camera.id)
                .find(|&id| usable(id)),
            DiscoveryStrategy::NamedAnchor => self
                .anchor_names
                .iter()
                .filter_map(|name| scene.find_by_name(name))
                .find(|&id| usable(id)),
        }
    }
}
