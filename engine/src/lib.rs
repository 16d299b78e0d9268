//! Drift Engine Library
//!
//! Real-time 2D physics core for the drift sandbox. Bodies are point masses
//! with a single collider moving on the ground plane of a 3D scene; the host
//! application owns rendering, input, audio and windowing and drives the
//! physics once per frame.
//!
//! # Modules
//!
//! - [`physics`] - Bodies, gravity, contact resolution, the per-frame engine
//! - [`render`] - GPU-facing records extracted from physics state
//!
//! # Example
//!
//! ```ignore
//! use drift_engine::physics::{Body, BodySet, Collider, OverlapContacts, PhysicsConfig, PhysicsEngine, Silent};
//! use drift_engine::render::RenderBatch;
//! use glam::DVec2;
//!
//! let mut bodies = BodySet::new();
//! let sun = bodies.insert(Body::new("sun", DVec2::ZERO, 100.0).kinematic())?;
//! let moon = bodies.insert(
//!     Body::new("moon", DVec2::new(10.0, 0.0), 1.0)
//!         .with_collider(Collider::circle(0.3))
//!         .with_velocity(DVec2::new(0.0, 2.0))
//!         .orbiting(sun),
//! )?;
//!
//! let mut engine = PhysicsEngine::new(OverlapContacts::new(), Silent);
//! engine.track([sun, moon]);
//!
//! let config = PhysicsConfig::default();
//! engine.update(&mut bodies, &config);
//!
//! let batch = RenderBatch::extract(&bodies, engine.tracked(), 0.0);
//! queue.write_buffer(&buffer, 0, batch.as_bytes());
//! ```

pub mod physics;
pub mod render;

// Re-export the most used physics types at crate level for convenience
pub use physics::{
    Body, BodyId, BodySet, Collider, CollisionService, GravityMode, OverlapContacts,
    PhysicsConfig, PhysicsEngine, PhysicsError, SceneEntity, SoundService,
};
