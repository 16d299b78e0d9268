//! Body arena with parent-chain delegation
//!
//! [`BodySet`] owns every body of a scene and hands out stable [`BodyId`]s.
//! The host application owns the set; the physics engine only keeps ids.
//!
//! # Rigid attachment
//!
//! A body attached to a parent holds no velocity of its own. Every velocity
//! accessor walks to the root of the chain and reads or writes the root's
//! value, so the whole chain moves as one. Positions compose: a parented
//! body's `position` is an offset from its parent's world position.
//!
//! Chains are acyclic by construction ([`BodySet::attach`] rejects cycles),
//! so every walk is an iterative loop that terminates at the root.

use std::ops::{Index, IndexMut};

use glam::DVec2;
use tracing::debug;

use super::body::{Body, BodyId};
use super::error::PhysicsError;

/// Arena of bodies indexed by [`BodyId`].
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Inserts a body and returns its id.
    ///
    /// Fails if the mass is not strictly positive. A parent set on the body
    /// beforehand is discarded; use [`BodySet::attach`].
    pub fn insert(&mut self, mut body: Body) -> Result<BodyId, PhysicsError> {
        if !(body.mass > 0.0) || !body.mass.is_finite() {
            return Err(PhysicsError::NonPositiveMass {
                name: body.name,
                mass: body.mass,
            });
        }
        body.parent = None;
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Number of bodies in the set.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if the set holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Returns true if `id` refers to a body of this set.
    pub fn contains(&self, id: BodyId) -> bool {
        id.0 < self.bodies.len()
    }

    /// Gets a body by id.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Gets a mutable body by id.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Iterates over all (id, body) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(BodyId)
    }

    /// Sets the mass of a body. Non-positive masses are rejected.
    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<(), PhysicsError> {
        let body = self.get_mut(id).ok_or(PhysicsError::UnknownBody(id))?;
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(PhysicsError::NonPositiveMass {
                name: body.name.clone(),
                mass,
            });
        }
        body.mass = mass;
        Ok(())
    }

    // =========================================================================
    // Parent chain
    // =========================================================================

    /// Attaches `child` to `parent`.
    ///
    /// The child's position is kept in world space: it is rewritten as an
    /// offset from the parent so the body does not jump.
    ///
    /// # Errors
    ///
    /// * `UnknownBody` if either id is not in this set
    /// * `SelfAttachment` if `child == parent`
    /// * `ParentCycle` if `parent` already descends from `child`
    /// * `KinematicUnderMovableRoot` if `child` or one of its descendants is
    ///   kinematic and the root of `parent`'s chain is not
    pub fn attach(&mut self, child: BodyId, parent: BodyId) -> Result<(), PhysicsError> {
        if !self.contains(child) {
            return Err(PhysicsError::UnknownBody(child));
        }
        if !self.contains(parent) {
            return Err(PhysicsError::UnknownBody(parent));
        }
        if child == parent {
            return Err(PhysicsError::SelfAttachment(child));
        }

        if self.descends_from(parent, child) {
            return Err(PhysicsError::ParentCycle { child, parent });
        }

        // A kinematic body must stay in a chain whose root never moves.
        let new_root = self.root(parent);
        if !self[new_root].kinematic {
            if let Some(body) = self.kinematic_descendant(child) {
                return Err(PhysicsError::KinematicUnderMovableRoot {
                    body,
                    root: new_root,
                });
            }
        }

        let world = self.world_position(child);
        let parent_world = self.world_position(parent);
        let body = &mut self[child];
        body.parent = Some(parent);
        body.position = world - parent_world;
        debug!(child = %body.name, ?parent, "attached body");
        Ok(())
    }

    /// Detaches `child` from its parent.
    ///
    /// The body keeps its world position and carries on with the chain's
    /// current velocity. Fails with `KinematicUnderMovableRoot` if a
    /// non-kinematic body would become the root of a kinematic descendant.
    pub fn detach(&mut self, child: BodyId) -> Result<(), PhysicsError> {
        if !self.contains(child) {
            return Err(PhysicsError::UnknownBody(child));
        }
        if self[child].parent.is_none() {
            return Ok(());
        }
        if !self[child].kinematic {
            if let Some(body) = self.kinematic_descendant(child) {
                return Err(PhysicsError::KinematicUnderMovableRoot { body, root: child });
            }
        }
        let world = self.world_position(child);
        let velocity = self.velocity(child);
        let body = &mut self[child];
        body.parent = None;
        body.position = world;
        body.velocity = velocity;
        debug!(child = %body.name, "detached body");
        Ok(())
    }

    /// True if `ancestor` is `id` itself or lies on its parent chain.
    pub fn descends_from(&self, id: BodyId, ancestor: BodyId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self[current].parent;
        }
        false
    }

    /// First kinematic body among `id` and its descendants.
    fn kinematic_descendant(&self, id: BodyId) -> Option<BodyId> {
        self.ids()
            .find(|&other| self[other].kinematic && self.descends_from(other, id))
    }

    /// Root ancestor of `id` (the body itself if unparented).
    pub fn root(&self, id: BodyId) -> BodyId {
        let mut current = id;
        while let Some(parent) = self[current].parent {
            current = parent;
        }
        current
    }

    /// Composed world position of a body.
    pub fn world_position(&self, id: BodyId) -> DVec2 {
        let mut position = DVec2::ZERO;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let body = &self[current];
            position += body.position;
            cursor = body.parent;
        }
        position
    }

    /// World position of the body's collider.
    pub fn collider_world_position(&self, id: BodyId) -> DVec2 {
        self[id].collider.world_position(self.world_position(id))
    }

    /// Moves a body by `delta`. Parented bodies move relative to their parent.
    #[inline]
    pub fn translate(&mut self, id: BodyId, delta: DVec2) {
        self[id].position += delta;
    }

    /// True if the body or the root of its chain is kinematic.
    pub fn is_immovable(&self, id: BodyId) -> bool {
        self[id].kinematic || self[self.root(id)].kinematic
    }

    // =========================================================================
    // Delegated velocity
    // =========================================================================

    /// Velocity of the chain `id` belongs to.
    pub fn velocity(&self, id: BodyId) -> DVec2 {
        self[self.root(id)].velocity
    }

    /// Sets the velocity of the chain `id` belongs to.
    pub fn set_velocity(&mut self, id: BodyId, velocity: DVec2) {
        let root = self.root(id);
        self[root].velocity = velocity;
    }

    /// Adds `delta` to the chain's velocity.
    pub fn add_velocity(&mut self, id: BodyId, delta: DVec2) {
        let root = self.root(id);
        self[root].velocity += delta;
    }

    /// X component of the chain's velocity.
    pub fn velocity_x(&self, id: BodyId) -> f64 {
        self.velocity(id).x
    }

    /// Sets the X component of the chain's velocity.
    pub fn set_velocity_x(&mut self, id: BodyId, x: f64) {
        let root = self.root(id);
        self[root].velocity.x = x;
    }

    /// Y component of the chain's velocity.
    pub fn velocity_y(&self, id: BodyId) -> f64 {
        self.velocity(id).y
    }

    /// Sets the Y component of the chain's velocity.
    pub fn set_velocity_y(&mut self, id: BodyId, y: f64) {
        let root = self.root(id);
        self[root].velocity.y = y;
    }

    /// Speed of the chain (m/s).
    pub fn speed(&self, id: BodyId) -> f64 {
        self.velocity(id).length()
    }

    /// Zeroes the chain's velocity.
    pub fn reset_velocity(&mut self, id: BodyId) {
        self.set_velocity(id, DVec2::ZERO);
    }
}

impl Index<BodyId> for BodySet {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }
}

impl IndexMut<BodyId> for BodySet {
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }
}
