//! Follow crate - avatar controller that tracks an external camera or rig
//!
//! This crate drives an avatar either by copying the pose of a followed
//! object (typically an XR head or the main camera) or, when nothing can be
//! followed, by plain input-driven locomotion with gravity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  FollowController::tick                  │
//! ├─────────────────────────────────────────────────────────┤
//! │  TargetResolver                                          │
//! │  ├── Externally assigned target                          │
//! │  ├── Discovery strategies (main / stereo / any camera)   │
//! │  └── Named rig anchors                                   │
//! ├─────────────────────────────────────────────────────────┤
//! │  ModeArbiter                                             │
//! │  ├── Manual <-> Following transitions                    │
//! │  └── One-shot missing-target diagnostic                  │
//! ├──────────────────────────┬──────────────────────────────┤
//! │  PoseBlender             │  ManualLocomotion             │
//! │  ├── Offset in target    │  ├── Axis input movement      │
//! │  │   local frame         │  ├── Gravity integration      │
//! │  ├── Yaw-only facing     │  └── Optional jump impulse    │
//! │  └── Exponential smooth  │                               │
//! └──────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The host owns the frame loop and implements the boundary traits
//! [`SceneQuery`], [`Avatar`] and [`Locomotion`].
//!
//! # Example
//!
//! ```ignore
//! use follow::{FollowConfig, FollowController, InputFrame};
//!
//! let mut controller = FollowController::new(avatar_id, FollowConfig::default());
//! controller.awake(&scene);
//!
//! // Once per rendered frame
//! let report = controller.tick(&scene, &mut avatar, &InputFrame::idle(), dt);
//! ```

mod arbiter;
mod blender;
mod config;
mod controller;
mod error;
mod input;
mod locomotion;
mod object;
mod resolver;
mod scene;

pub use arbiter::{Arbitration, FollowMode, ModeArbiter, Transition};
pub use blender::{look_rotation, smoothing_factor, BlendParams, PoseBlender};
pub use config::{FollowConfig, JumpConfig};
pub use controller::{Applied, FollowController, FollowState, TickReport};
pub use error::{Error, Result};
pub use input::{InputFrame, InputState, DEFAULT_DEADZONE};
pub use locomotion::{
    Avatar, Locomotion, LocomotionParams, ManualLocomotion, ManualStep, VerticalStep,
};
pub use object::{Object, Pose, FORWARD, RIGHT, UP};
pub use resolver::{DiscoveryStrategy, TargetResolver};
pub use scene::{CameraInfo, ObjectId, SceneQuery};

// Re-export glam for convenience
pub use glam;
