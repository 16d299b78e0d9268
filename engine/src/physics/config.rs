//! Physics Configuration
//!
//! Runtime tunables for the physics engine. A [`PhysicsConfig`] value is
//! passed into every update, so the host can change gravity mode, restitution
//! or timescale between frames without touching engine state.
//!
//! Configs can be loaded from JSON; fields missing from the file keep their
//! defaults.
//!
//! ```json
//! { "gravity_mode": "Orbiting", "timescale": 0.5 }
//! ```

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collider::Layer;
use super::error::PhysicsError;

/// How gravity is applied each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityMode {
    /// Mutual gravity between every pair of unparented bodies
    #[default]
    Everything,
    /// Gravity only along declared orbit relations
    Orbiting,
    /// Constant downward-style force on every free body, no pairwise gravity
    Directional,
}

/// Runtime configuration read fresh on every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational constant used by the pairwise gravity model
    pub gravitational_constant: f64,
    /// Gravity mode
    pub gravity_mode: GravityMode,
    /// Force per unit mass applied in [`GravityMode::Directional`]
    pub directional_gravity: DVec2,
    /// Resolve contacts reported by the collision service
    pub resolution_enabled: bool,
    /// Scale applied to post-collision velocity (1.0 = perfectly elastic)
    pub restitution: f64,
    /// Simulation time per wall-clock second (0.0 pauses integration)
    pub timescale: f64,
    /// Overlap multiplier for static resolution, pushes bodies slightly past contact
    pub separation_slop: f64,
    /// |v_p · v_q| above which an impact sound is played
    pub impact_sound_threshold: f64,
    /// Sound effect index played on impact
    pub impact_sound_effect: usize,
    /// Layer the engine queries contacts on
    pub collision_layer: Layer,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.01,
            gravity_mode: GravityMode::Everything,
            directional_gravity: DVec2::new(0.0, -1.0),
            resolution_enabled: true,
            restitution: 1.0,
            timescale: 1.0,
            separation_slop: 1.01,
            impact_sound_threshold: 0.1,
            impact_sound_effect: 2,
            collision_layer: Layer::PHYSICS,
        }
    }
}

impl PhysicsConfig {
    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, PhysicsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PhysicsError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Same config with a different gravity mode.
    pub fn with_gravity_mode(mut self, mode: GravityMode) -> Self {
        self.gravity_mode = mode;
        self
    }

    /// Same config with pairwise gravity disabled (G = 0).
    pub fn without_gravity(mut self) -> Self {
        self.gravitational_constant = 0.0;
        self
    }
}
