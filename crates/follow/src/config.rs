//! Per-avatar controller configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration. Values that must not be negative are clamped at load time
//! and again when a controller is built from a config made in code.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::resolver::DiscoveryStrategy;

/// Optional jump impulse for manual locomotion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JumpConfig {
    pub enabled: bool,
    /// Apex height of a jump in world units
    pub height: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            height: 1.0,
        }
    }
}

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FollowConfig {
    /// Manual movement speed in units per second
    pub speed: f32,
    /// Signed vertical acceleration (negative pulls down)
    pub gravity: f32,
    pub jump: JumpConfig,
    /// Desired avatar displacement in the target's local frame
    pub offset: Vec3,
    /// Capture `offset` from the avatar's placement on the first follow
    pub auto_capture_offset: bool,
    /// Position smoothing rate per second; zero snaps every frame
    pub position_smoothing: f32,
    /// Rotation smoothing rate per second; zero snaps every frame
    pub rotation_smoothing: f32,
    /// Copy only the target's heading
    pub yaw_only: bool,
    pub disable_locomotion_while_following: bool,
    pub strategies: Vec<DiscoveryStrategy>,
    pub anchor_names: Vec<String>,
    /// Vertical velocity held while grounded in manual mode
    pub grounded_velocity: f32,
}

pub(crate) fn default_anchor_names() -> Vec<String> {
    ["CenterEyeAnchor", "Head", "Main Camera", "XR Origin", "XR Rig"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            gravity: -9.81,
            jump: JumpConfig::default(),
            offset: Vec3::ZERO,
            auto_capture_offset: false,
            position_smoothing: 15.0,
            rotation_smoothing: 15.0,
            yaw_only: true,
            disable_locomotion_while_following: true,
            strategies: DiscoveryStrategy::DEFAULT_ORDER.to_vec(),
            anchor_names: default_anchor_names(),
            grounded_velocity: -2.0,
        }
    }
}

impl FollowConfig {
    /// Parse and sanitize a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.sanitized()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Reject non-finite numbers and clamp values that must be non-negative
    pub fn sanitized(self) -> Result<Self> {
        let scalars = [
            ("speed", self.speed),
            ("gravity", self.gravity),
            ("jump.height", self.jump.height),
            ("position_smoothing", self.position_smoothing),
            ("rotation_smoothing", self.rotation_smoothing),
            ("grounded_velocity", self.grounded_velocity),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be finite, got {value}")));
            }
        }
        if !self.offset.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "offset must be finite, got {}",
                self.offset
            )));
        }

        Ok(self.clamped())
    }

    /// Clamp every value into a usable range without failing.
    ///
    /// Rates and magnitudes that are negative or non-finite become 0.
    /// Non-finite gravity, grounded velocity or offset fall back to their
    /// defaults.
    pub fn clamped(mut self) -> Self {
        let defaults = Self::default();

        self.speed = clamp_non_negative("speed", self.speed);
        self.jump.height = clamp_non_negative("jump.height", self.jump.height);
        self.position_smoothing = clamp_non_negative("position_smoothing", self.position_smoothing);
        self.rotation_smoothing = clamp_non_negative("rotation_smoothing", self.rotation_smoothing);
        self.gravity = finite_or("gravity", self.gravity, defaults.gravity);
        self.grounded_velocity =
            finite_or("grounded_velocity", self.grounded_velocity, defaults.grounded_velocity);
        if !self.offset.is_finite() {
            tracing::warn!("offset was not finite ({}), reset to {}", self.offset, defaults.offset);
            self.offset = defaults.offset;
        }

        if self.strategies.is_empty() {
            tracing::warn!("No discovery strategies configured; only assigned targets will be followed");
        }

        self
    }
}

/// Clamp a rate or magnitude to zero, warning when it was negative or not finite
pub(crate) fn clamp_non_negative(name: &str, value: f32) -> f32 {
    if !value.is_finite() {
        tracing::warn!("{name} was not finite ({value}), clamped to 0");
        0.0
    } else if value < 0.0 {
        tracing::warn!("{name} was negative ({value}), clamped to 0");
        0.0
    } else {
        value
    }
}

fn finite_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("{name} was not finite ({value}), reset to {fallback}");
        fallback
    }
}
