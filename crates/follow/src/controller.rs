//! The per-frame follow controller
//!
//! One [`FollowController`] drives one avatar. Each call to
//! [`FollowController::tick`] runs, in order:
//!
//! 1. Liveness check of the held target, resolution if none is held
//! 2. Mode arbitration and the one-time transition effects
//! 3. Exactly one of pose blending (Following) or manual locomotion (Manual)
//!
//! Nothing in the cycle can fail. A missing target means manual movement, a
//! missing locomotion primitive means the pose is written directly.

use glam::Vec3;
use tracing::{debug, info, trace, warn};

use crate::arbiter::{FollowMode, ModeArbiter, Transition};
use crate::blender::{BlendParams, PoseBlender};
use crate::config::{clamp_non_negative, FollowConfig};
use crate::input::InputFrame;
use crate::locomotion::{move_avatar, Avatar, LocomotionParams, ManualLocomotion, ManualStep};
use crate::object::Pose;
use crate::resolver::TargetResolver;
use crate::scene::{ObjectId, SceneQuery};

// ============================================================================
// Frame Reports
// ============================================================================

/// Snapshot of the controller's mutable state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowState {
    pub target: Option<ObjectId>,
    /// Displacement from the target in its local frame
    pub offset: Vec3,
    pub mode: FollowMode,
    /// The avatar has been aligned to the target since the last mode entry
    pub has_snapped: bool,
    pub captured_offset_once: bool,
    /// Manual-mode vertical velocity; zero while following
    pub vertical_velocity: f32,
    pub logged_missing_target_warning: bool,
}

/// What the frame did to the avatar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    /// A blended pose was applied toward the target
    Pose {
        pose: Pose,
        /// First frame of a follow episode: pose set without smoothing
        snapped: bool,
    },
    /// Manual movement was applied
    Manual(ManualStep),
}

/// Side effects of one [`FollowController::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub mode: FollowMode,
    pub transition: Transition,
    pub target: Option<ObjectId>,
    /// The one-shot missing-target diagnostic fired this frame
    pub warned_missing_target: bool,
    pub applied: Applied,
}

// ============================================================================
// Follow Controller
// ============================================================================

/// Drives one avatar from a followed target or from input
pub struct FollowController {
    self_id: ObjectId,
    config: FollowConfig,
    resolver: TargetResolver,
    arbiter: ModeArbiter,

    /// Externally assigned target
    assigned: Option<ObjectId>,
    /// Target currently followed
    target: Option<ObjectId>,
    offset: Vec3,
    has_snapped: bool,
    captured_offset: bool,
    vertical_velocity: f32,
    /// Locomotion was turned off by this controller on follow entry
    locomotion_suspended: bool,
}

impl FollowController {
    /// Create a controller for the avatar `self_id`, starting in Manual mode.
    ///
    /// The config goes through [`FollowConfig::clamped`] first.
    pub fn new(self_id: ObjectId, config: FollowConfig) -> Self {
        let config = config.clamped();
        let resolver = TargetResolver::new(config.strategies.clone(), config.anchor_names.clone());
        Self {
            self_id,
            offset: config.offset,
            config,
            resolver,
            arbiter: ModeArbiter::new(),
            assigned: None,
            target: None,
            has_snapped: false,
            captured_offset: false,
            vertical_velocity: 0.0,
            locomotion_suspended: false,
        }
    }

    /// Initial target resolution, run once when the avatar is created
    pub fn awake(&mut self, scene: &dyn SceneQuery) {
        self.target = self.resolver.resolve(self.assigned, self.self_id, scene);
        match self.target {
            Some(id) => info!(avatar = %self.self_id, object = %id, "Follow target found on awake"),
            None => debug!(avatar = %self.self_id, "No follow target on awake"),
        }
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    pub fn mode(&self) -> FollowMode {
        self.arbiter.mode()
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Assign the target to follow, or clear the assignment.
    ///
    /// The assignment replaces the held target immediately; it is validated
    /// on the next tick like any other target.
    pub fn set_target(&mut self, target: Option<ObjectId>) {
        self.assigned = target;
        self.target = target;
    }

    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = offset;
    }

    /// Set both smoothing rates; negative values are clamped to zero
    pub fn set_smoothing(&mut self, position_rate: f32, rotation_rate: f32) {
        self.config.position_smoothing = clamp_non_negative("position_smoothing", position_rate);
        self.config.rotation_smoothing = clamp_non_negative("rotation_smoothing", rotation_rate);
    }

    pub fn state(&self) -> FollowState {
        FollowState {
            target: self.target,
            offset: self.offset,
            mode: self.arbiter.mode(),
            has_snapped: self.has_snapped,
            captured_offset_once: self.captured_offset,
            vertical_velocity: self.vertical_velocity,
            logged_missing_target_warning: self.arbiter.warned_missing_target(),
        }
    }

    /// Run one frame
    pub fn tick(
        &mut self,
        scene: &dyn SceneQuery,
        avatar: &mut dyn Avatar,
        input: &InputFrame,
        dt: f32,
    ) -> TickReport {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let target_pose = self.refresh_target(scene);

        let arbitration = self.arbiter.evaluate(target_pose.is_some());
        if arbitration.warn_missing_target {
            warn!(
                avatar = %self.self_id,
                "No follow target found; using manual movement until one appears"
            );
        }

        match arbitration.transition {
            Transition::Entered => self.enter_following(avatar, target_pose.as_ref()),
            Transition::Exited => self.exit_following(avatar),
            Transition::None => {}
        }

        let applied = match target_pose {
            Some(pose) => self.follow(avatar, &pose, dt),
            None => Applied::Manual(self.manual(avatar, input, dt)),
        };

        TickReport {
            mode: arbitration.mode,
            transition: arbitration.transition,
            target: self.target,
            warned_missing_target: arbitration.warn_missing_target,
            applied,
        }
    }

    /// Keep the held target if it is still valid, otherwise try to find one
    fn refresh_target(&mut self, scene: &dyn SceneQuery) -> Option<Pose> {
        if let Some(id) = self.target {
            let pose = if id == self.self_id { None } else { scene.pose(id) };
            if pose.is_some() {
                return pose;
            }
            info!(avatar = %self.self_id, object = %id, "Follow target lost");
            self.target = None;
        }

        let id = self.resolver.resolve(self.assigned, self.self_id, scene)?;
        let pose = scene.pose(id)?;
        info!(avatar = %self.self_id, object = %id, "Follow target acquired");
        self.target = Some(id);
        Some(pose)
    }

    fn enter_following(&mut self, avatar: &mut dyn Avatar, target: Option<&Pose>) {
        info!(avatar = %self.self_id, "Entering follow mode");
        self.vertical_velocity = 0.0;
        self.has_snapped = false;

        if self.config.disable_locomotion_while_following {
            if let Some(locomotion) = avatar.locomotion() {
                if locomotion.is_enabled() {
                    locomotion.set_enabled(false);
                    self.locomotion_suspended = true;
                    debug!(avatar = %self.self_id, "Locomotion suspended while following");
                }
            }
        }

        if self.config.auto_capture_offset && !self.captured_offset {
            if let Some(target) = target {
                self.offset = target.inverse_transform_point(avatar.position());
                self.captured_offset = true;
                debug!(avatar = %self.self_id, offset = %self.offset, "Captured follow offset");
            }
        }
    }

    fn exit_following(&mut self, avatar: &mut dyn Avatar) {
        info!(avatar = %self.self_id, "Leaving follow mode");
        self.has_snapped = false;

        if self.locomotion_suspended {
            if let Some(locomotion) = avatar.locomotion() {
                locomotion.set_enabled(true);
                debug!(avatar = %self.self_id, "Locomotion restored");
            }
            self.locomotion_suspended = false;
        }
    }

    fn follow(&mut self, avatar: &mut dyn Avatar, target: &Pose, dt: f32) -> Applied {
        let params = BlendParams {
            position_rate: self.config.position_smoothing,
            rotation_rate: self.config.rotation_smoothing,
            yaw_only: self.config.yaw_only,
        };
        let current = avatar.pose();
        let snap = !self.has_snapped;
        let pose = PoseBlender::blend(target, self.offset, &current, dt, &params, snap);

        if avatar.locomotion().is_some_and(|l| l.is_enabled()) {
            move_avatar(avatar, pose.position - current.position);
        } else {
            avatar.set_position(pose.position);
        }
        avatar.set_rotation(pose.rotation);

        self.has_snapped = true;
        self.vertical_velocity = 0.0;

        trace!(
            avatar = %self.self_id,
            position = %pose.position,
            snap,
            "Follow pose applied"
        );

        Applied::Pose {
            pose,
            snapped: snap,
        }
    }

    fn manual(&mut self, avatar: &mut dyn Avatar, input: &InputFrame, dt: f32) -> ManualStep {
        let params = LocomotionParams {
            speed: self.config.speed,
            gravity: self.config.gravity,
            grounded_velocity: self.config.grounded_velocity,
            jump_height: self.config.jump.enabled.then_some(self.config.jump.height),
        };

        let step = ManualLocomotion::apply(avatar, input, self.vertical_velocity, &params, dt);
        self.vertical_velocity = step.vertical_velocity;
        if step.jumped {
            debug!(avatar = %self.self_id, velocity = step.vertical_velocity, "Jump");
        }
        step
    }
}
