//! Scripted scene events and input for each scenario

use clap::ValueEnum;
use follow::Pose;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::HeadConfig;

/// Which scripted run to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// An XR head camera sways and yaws; the avatar follows it
    #[default]
    Follow,
    /// Nothing to follow; the avatar walks forward under gravity
    Manual,
    /// The head is destroyed a third of the way in and a named anchor
    /// appears at two thirds
    Dropout,
}

/// Scene change scheduled for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    DestroyHead,
    RespawnHead,
}

impl Scenario {
    /// Whether the run starts with a head camera in the scene
    pub fn spawns_head(self) -> bool {
        matches!(self, Scenario::Follow | Scenario::Dropout)
    }

    /// Whether a flat spectator camera is added next to the head
    pub fn spawns_spectator(self) -> bool {
        self == Scenario::Follow
    }

    /// Event to apply before frame `frame` of a run lasting `frames`
    pub fn event_at(self, frame: u64, frames: u64) -> Option<SceneEvent> {
        if self != Scenario::Dropout {
            return None;
        }
        let (drop, restore) = Self::dropout_window(frames);
        if frame == drop {
            Some(SceneEvent::DestroyHead)
        } else if frame == restore {
            Some(SceneEvent::RespawnHead)
        } else {
            None
        }
    }

    /// First frame without a head and first frame with it back
    pub fn dropout_window(frames: u64) -> (u64, u64) {
        (frames / 3, frames * 2 / 3)
    }
}

/// Head pose at `time` seconds into the run
pub fn head_pose(head: &HeadConfig, ground_height: f32, time: f32) -> Pose {
    let yaw = head.yaw_rate * time;
    let sway = Vec3::new(yaw.cos(), 0.0, yaw.sin()) * head.orbit_radius;
    Pose::new(
        sway + Vec3::Y * (ground_height + head.height),
        Quat::from_rotation_y(yaw),
    )
}

/// Raw stick and button values for `frame`
///
/// The stick is always pushed forward (ignored while following). The jump
/// button is held for the first half of every second.
pub fn input_at(frame: u64, frame_rate: f32) -> (f32, f32, bool) {
    let per_second = (frame_rate.round() as u64).max(2);
    let jump_held = frame % per_second < per_second / 2;
    (0.0, 1.0, jump_held)
}
