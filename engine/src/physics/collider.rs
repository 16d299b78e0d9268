//! Collider shapes
//!
//! Each body owns exactly one collider. The shape set is closed: circles get
//! the full contact response, every other shape takes the placeholder path.
//! Callers select the math through [`ColliderShape::as_circle`] rather than
//! matching on the variant directly.
//!
//! # Example
//!
//! ```ignore
//! use drift_engine::physics::collider::{Collider, Layer};
//! use glam::DVec2;
//!
//! let collider = Collider::circle(0.5);
//! let world = collider.world_position(DVec2::new(2.0, 0.0));
//! assert_eq!(world, DVec2::new(2.0, 0.0));
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Collision-category tag. The physics engine queries contacts on
/// [`Layer::PHYSICS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Layer(pub u32);

impl Layer {
    /// Layer used by the physics engine for contact resolution
    pub const PHYSICS: Layer = Layer(0);
}

/// Circle view of a collider, returned by the capability query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

/// Closed set of collider shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Circle of the given radius (meters)
    Circle { radius: f64 },
    /// Axis-aligned box. Overlap is detected, but contacts involving a box
    /// are resolved with the crude placeholder path.
    Box { half_extents: DVec2 },
}

impl ColliderShape {
    /// Returns the circle view if this shape is a circle.
    #[inline]
    pub fn as_circle(&self) -> Option<Circle> {
        match *self {
            ColliderShape::Circle { radius } => Some(Circle { radius }),
            ColliderShape::Box { .. } => None,
        }
    }

    /// Half extents of the shape's axis-aligned bounds.
    pub fn half_extents(&self) -> DVec2 {
        match *self {
            ColliderShape::Circle { radius } => DVec2::splat(radius),
            ColliderShape::Box { half_extents } => half_extents,
        }
    }
}

/// A collider attached to a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Shape of the collider
    pub shape: ColliderShape,
    /// Offset from the owning body's world position
    pub offset: DVec2,
    /// Collision layer this collider participates in
    pub layer: Layer,
}

impl Collider {
    /// Creates a circle collider centered on its body, on the physics layer.
    pub fn circle(radius: f64) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            offset: DVec2::ZERO,
            layer: Layer::PHYSICS,
        }
    }

    /// Creates a box collider centered on its body, on the physics layer.
    pub fn aabb(half_extents: DVec2) -> Self {
        Self {
            shape: ColliderShape::Box { half_extents },
            offset: DVec2::ZERO,
            layer: Layer::PHYSICS,
        }
    }

    /// Sets the offset relative to the owning body.
    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the collision layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// World position of the collider given its body's composed world position.
    #[inline]
    pub fn world_position(&self, body_world: DVec2) -> DVec2 {
        body_world + self.offset
    }

    /// World-space bounds as (min, max).
    pub fn bounds(&self, body_world: DVec2) -> (DVec2, DVec2) {
        let center = self.world_position(body_world);
        let half = self.shape.half_extents();
        (center - half, center + half)
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::circle(0.5)
    }
}
