//! Follow Controller Testbed
//!
//! Headless stand-in for the host engine. It owns an in-memory scene with
//! cameras and rig anchors, an avatar on a flat collision ground, and drives
//! a [`FollowController`] at a fixed frame rate from a scripted [`Scenario`].
//! Each run produces a [`RunSummary`].

pub mod avatar;
pub mod config;
pub mod scenario;
pub mod scene;

pub use avatar::{GroundBody, SimAvatar};
pub use config::{HeadConfig, SpawnConfig, TestbedConfig};
pub use scenario::{Scenario, SceneEvent};
pub use scene::{CameraFlags, SimObject, SimScene};

use follow::{
    Applied, FollowController, FollowMode, InputState, Object, ObjectId, Pose, TickReport,
    Transition,
};
use glam::Quat;
use std::fmt;
use tracing::{debug, info};

/// What happened over a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub scenario: Scenario,
    pub frames: u64,
    pub following_frames: u64,
    pub manual_frames: u64,
    /// Manual -> Following transitions
    pub entered: u32,
    /// Following -> Manual transitions
    pub exited: u32,
    /// Missing-target diagnostics emitted
    pub warnings: u32,
    /// Follow frames applied without smoothing
    pub snaps: u32,
    pub jumps: u32,
    pub final_mode: FollowMode,
    pub final_pose: Pose,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        match report.mode {
            FollowMode::Following => self.following_frames += 1,
            FollowMode::Manual => self.manual_frames += 1,
        }
        match report.transition {
            Transition::Entered => self.entered += 1,
            Transition::Exited => self.exited += 1,
            Transition::None => {}
        }
        if report.warned_missing_target {
            self.warnings += 1;
        }
        match report.applied {
            Applied::Pose { snapped: true, .. } => self.snaps += 1,
            Applied::Manual(step) if step.jumped => self.jumps += 1,
            _ => {}
        }
        self.final_mode = report.mode;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.final_pose.position;
        let (yaw, _, _) = self.final_pose.rotation.to_euler(glam::EulerRot::YXZ);
        writeln!(f, "Scenario:   {:?}", self.scenario)?;
        writeln!(
            f,
            "Frames:     {} ({} following, {} manual)",
            self.frames, self.following_frames, self.manual_frames
        )?;
        writeln!(
            f,
            "Mode:       {:?} (entered {}, exited {})",
            self.final_mode, self.entered, self.exited
        )?;
        writeln!(
            f,
            "Events:     {} warnings, {} snaps, {} jumps",
            self.warnings, self.snaps, self.jumps
        )?;
        write!(
            f,
            "Final pose: ({:.3}, {:.3}, {:.3}) yaw {:.1} deg",
            p.x,
            p.y,
            p.z,
            yaw.to_degrees()
        )
    }
}

/// One scripted run
pub struct Testbed {
    config: TestbedConfig,
    scene: SimScene,
    avatar_id: ObjectId,
    avatar: SimAvatar,
    controller: FollowController,
    input: InputState,
    head: Option<ObjectId>,
    frame: u64,
    summary: RunSummary,
}

impl Testbed {
    pub fn new(config: TestbedConfig) -> Self {
        let mut scene = SimScene::new();

        let spawn = Pose::new(
            config.spawn.position,
            Quat::from_rotation_y(config.spawn.yaw_degrees.to_radians()),
        );
        let avatar = SimAvatar::with_body(spawn, config.ground_height);
        let avatar_id = scene.spawn("Avatar", avatar.pose());

        let head = config.scenario.spawns_head().then(|| {
            let pose = scenario::head_pose(&config.head, config.ground_height, 0.0);
            scene.spawn_camera("CenterEyeAnchor", pose, CameraFlags::XR_HEAD)
        });
        if config.scenario.spawns_spectator() {
            let pose = Pose::from_position(glam::Vec3::new(0.0, 3.0, -5.0));
            scene.spawn_camera("Spectator Camera", pose, CameraFlags::SPECTATOR);
        }

        let mut controller = FollowController::new(avatar_id, config.follow.clone());
        controller.awake(&scene);

        info!(
            scenario = ?config.scenario,
            frames = config.frames,
            frame_rate = config.frame_rate,
            objects = scene.len(),
            "Testbed ready"
        );

        let summary = RunSummary {
            scenario: config.scenario,
            final_pose: avatar.pose(),
            ..Default::default()
        };

        Self {
            config,
            scene,
            avatar_id,
            avatar,
            controller,
            input: InputState::default(),
            head,
            frame: 0,
            summary,
        }
    }

    pub fn config(&self) -> &TestbedConfig {
        &self.config
    }

    pub fn scene(&self) -> &SimScene {
        &self.scene
    }

    pub fn avatar(&self) -> &SimAvatar {
        &self.avatar
    }

    pub fn controller(&self) -> &FollowController {
        &self.controller
    }

    /// Current head object, if any
    pub fn head(&self) -> Option<ObjectId> {
        self.head
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Advance one frame: scripted events, head motion, input, controller
    pub fn step(&mut self) -> TickReport {
        let dt = self.config.dt();
        let time = self.frame as f32 * dt;

        if let Some(event) = self.config.scenario.event_at(self.frame, self.config.frames) {
            self.apply_event(event, time);
        }
        if let Some(head) = self.head {
            let pose = scenario::head_pose(&self.config.head, self.config.ground_height, time);
            self.scene.set_pose(head, pose);
        }

        let (horizontal, vertical, jump_held) =
            scenario::input_at(self.frame, self.config.frame_rate);
        self.input.set_axes(horizontal, vertical);
        self.input.set_jump_held(jump_held);
        let input = self.input.frame();

        let report = self
            .controller
            .tick(&self.scene, &mut self.avatar, &input, dt);
        self.scene.set_pose(self.avatar_id, self.avatar.pose());

        debug!(
            frame = self.frame,
            mode = ?report.mode,
            position = ?self.avatar.position(),
            "Frame"
        );

        self.summary.record(&report);
        self.summary.final_pose = self.avatar.pose();
        self.frame += 1;
        report
    }

    /// Run the remaining configured frames and return the summary
    pub fn run(&mut self) -> RunSummary {
        while self.frame < self.config.frames {
            self.step();
        }
        info!(
            frames = self.summary.frames,
            following = self.summary.following_frames,
            manual = self.summary.manual_frames,
            warnings = self.summary.warnings,
            "Run complete"
        );
        self.summary.clone()
    }

    fn apply_event(&mut self, event: SceneEvent, time: f32) {
        match event {
            SceneEvent::DestroyHead => {
                if let Some(head) = self.head.take() {
                    self.scene.destroy(head);
                    info!(frame = self.frame, object = %head, "Head destroyed");
                }
            }
            SceneEvent::RespawnHead => {
                let pose = scenario::head_pose(&self.config.head, self.config.ground_height, time);
                let head = self.scene.spawn("Head", pose);
                self.head = Some(head);
                info!(frame = self.frame, object = %head, "Head anchor respawned");
            }
        }
    }
}
