//! Physics module for the drift engine
//!
//! 2D point-mass physics for bodies living on the ground plane of a 3D scene.
//! Built from scratch without external physics library dependencies.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Math types re-exported from glam, physics ↔ render conversion
//! - [`body`] / [`body_set`] - Bodies, the body arena, rigid attachment
//! - [`collider`] - Collider shapes and layers
//! - [`gravity`] - Pairwise and directional gravity
//! - [`contact`] - Contact records and the collision service seam
//! - [`resolution`] - Static and dynamic contact resolution
//! - [`sound`] - Impact sound seam
//! - [`clock`] - Frame timing and FPS counter
//! - [`config`] - Runtime configuration
//! - [`engine`] - The per-frame driver
//!
//! # Known limits
//!
//! - Pair loop is O(n²); there is no broad phase
//! - No rotation: bodies are point masses with a circle collider
//! - Discrete steps: fast bodies can tunnel through thin ones
//! - Only circle-circle contacts get a physical response

pub mod body;
pub mod body_set;
pub mod clock;
pub mod collider;
pub mod config;
pub mod contact;
pub mod engine;
pub mod error;
pub mod gravity;
pub mod resolution;
pub mod sound;
pub mod types;

// Re-export commonly used types at the physics module level
pub use body::{Body, BodyId};
pub use body_set::BodySet;
pub use clock::FrameClock;
pub use collider::{Circle, Collider, ColliderShape, Layer};
pub use config::{GravityMode, PhysicsConfig};
pub use contact::{CollisionService, Contact, ContactSide, OverlapContacts, colliders_overlap};
pub use engine::{PhysicsEngine, SceneEntity};
pub use error::PhysicsError;
pub use sound::{Silent, SoundLog, SoundService};
pub use types::{DVec2, Vec3, from_render_space, to_render_space};
