//! Testbed configuration
//!
//! Loaded from TOML. The `[follow]` table is passed to the controller after
//! the same sanitisation the library applies to standalone follow configs.

use anyhow::{bail, Context, Result};
use follow::FollowConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scenario::Scenario;

/// Where the avatar starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub position: Vec3,
    /// Rotation about world up, in degrees
    pub yaw_degrees: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            yaw_degrees: 0.0,
        }
    }
}

/// Motion of the scripted head camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadConfig {
    /// Eye height above the ground plane
    pub height: f32,
    /// Radius of the circle the head sways along
    pub orbit_radius: f32,
    /// Yaw rate in radians per second
    pub yaw_rate: f32,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            height: 1.7,
            orbit_radius: 0.5,
            yaw_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestbedConfig {
    pub scenario: Scenario,
    /// Simulation frames per second
    pub frame_rate: f32,
    /// Number of frames to run
    pub frames: u64,
    pub ground_height: f32,
    pub spawn: SpawnConfig,
    pub head: HeadConfig,
    pub follow: FollowConfig,
}

impl Default for TestbedConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Follow,
            frame_rate: 90.0,
            frames: 540,
            ground_height: 0.0,
            spawn: SpawnConfig::default(),
            head: HeadConfig::default(),
            follow: FollowConfig::default(),
        }
    }
}

impl TestbedConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse testbed config")?;
        config.validated()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Seconds per frame
    pub fn dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Override the frame rate from a fixed timestep
    pub fn set_dt(&mut self, dt: f32) -> Result<()> {
        if !dt.is_finite() || dt <= 0.0 {
            bail!("dt must be a positive number of seconds, got {dt}");
        }
        self.frame_rate = 1.0 / dt;
        Ok(())
    }

    fn validated(mut self) -> Result<Self> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            bail!("frame_rate must be positive, got {}", self.frame_rate);
        }
        if !self.ground_height.is_finite() || !self.spawn.position.is_finite() {
            bail!("ground_height and spawn.position must be finite");
        }
        self.follow = self.follow.sanitized()?;
        Ok(self)
    }
}
