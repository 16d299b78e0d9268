//! Simulated point-mass bodies
//!
//! A [`Body`] is a circle-like particle: position, velocity, accumulated
//! acceleration and mass. Bodies live in a [`BodySet`](super::body_set::BodySet)
//! and are referred to by [`BodyId`].
//!
//! Velocity is stored per body but only the root of a parent chain ever holds
//! a meaningful value. Read and write it through the `BodySet` accessors,
//! which walk the chain.
//!
//! # Example
//!
//! ```ignore
//! use drift_engine::physics::{Body, Collider};
//! use glam::DVec2;
//!
//! let moon = Body::new("moon", DVec2::new(10.0, 0.0), 0.1)
//!     .with_collider(Collider::circle(0.3))
//!     .with_velocity(DVec2::new(0.0, 1.0));
//! ```

use glam::DVec2;

use super::collider::Collider;

/// Stable handle to a body inside a `BodySet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    /// Index of the body in its set.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A simulated body.
#[derive(Debug, Clone)]
pub struct Body {
    /// Display name, used in logs
    pub name: String,
    /// Position in meters. Local to the parent when parented, world otherwise.
    pub position: DVec2,
    /// Own velocity slot (m/s). Ignored while the body has a parent.
    pub(crate) velocity: DVec2,
    /// Acceleration accumulated this frame (m/s²)
    pub(crate) acceleration: DVec2,
    /// Mass (kg), strictly positive once inserted into a set
    pub(crate) mass: f64,
    /// Kinematic bodies never move on their own but still attract and push others.
    /// Set it before attaching: the chain checks in `BodySet::attach` run only there.
    pub kinematic: bool,
    /// Rigid attachment: velocity is delegated to the root of this chain
    pub(crate) parent: Option<BodyId>,
    /// Host-defined orbit relation: this body orbits `orbiting`
    pub orbiting: Option<BodyId>,
    /// The body's single collider
    pub collider: Collider,
}

impl Body {
    /// Creates a free, non-kinematic body with a default circle collider.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `position` - Initial position (meters)
    /// * `mass` - Mass (kg), validated when inserted into a `BodySet`
    pub fn new(name: impl Into<String>, position: DVec2, mass: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            mass,
            kinematic: false,
            parent: None,
            orbiting: None,
            collider: Collider::default(),
        }
    }

    /// Replaces the collider.
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = collider;
        self
    }

    /// Sets the initial velocity.
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Marks the body kinematic.
    pub fn kinematic(mut self) -> Self {
        self.kinematic = true;
        self
    }

    /// Declares the orbit relation for this body.
    pub fn orbiting(mut self, center: BodyId) -> Self {
        self.orbiting = Some(center);
        self
    }

    /// Mass in kg.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Acceleration accumulated so far this frame.
    #[inline]
    pub fn acceleration(&self) -> DVec2 {
        self.acceleration
    }

    /// Parent of this body, if attached.
    #[inline]
    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    /// Accumulates a force (N) as acceleration. Not delegated to the parent.
    #[inline]
    pub fn add_force(&mut self, force: DVec2) {
        self.acceleration += force / self.mass;
    }

    /// Clears the acceleration accumulator.
    #[inline]
    pub fn reset_acceleration(&mut self) {
        self.acceleration = DVec2::ZERO;
    }

    /// True if this body orbits `other`.
    #[inline]
    pub fn is_orbiting(&self, other: BodyId) -> bool {
        self.orbiting == Some(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults() {
        let b = Body::new("a", DVec2::new(1.0, 2.0), 3.0);
        assert_eq!(b.position, DVec2::new(1.0, 2.0));
        assert_eq!(b.mass(), 3.0);
        assert!(!b.kinematic);
        assert!(b.parent().is_none());
        assert_eq!(b.acceleration(), DVec2::ZERO);
    }

    #[test]
    fn test_add_force_divides_by_mass() {
        let mut b = Body::new("a", DVec2::ZERO, 2.0);
        b.add_force(DVec2::new(4.0, -2.0));
        b.add_force(DVec2::new(2.0, 0.0));
        assert_eq!(b.acceleration(), DVec2::new(3.0, -1.0));

        b.reset_acceleration();
        assert_eq!(b.acceleration(), DVec2::ZERO);
    }

    #[test]
    fn test_orbit_relation_is_one_sided() {
        let sun = BodyId(0);
        let planet = Body::new("planet", DVec2::X, 1.0).orbiting(sun);
        assert!(planet.is_orbiting(sun));
        assert!(!planet.is_orbiting(BodyId(1)));
    }
}
