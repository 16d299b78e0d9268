//! Contact records and the collision service seam
//!
//! The physics engine does not detect collisions itself. Every step it asks a
//! [`CollisionService`] whether two bodies touch on a layer, and resolves the
//! [`Contact`] it gets back. Hosts can plug in their own narrow phase;
//! [`OverlapContacts`] is the built-in one.
//!
//! # Contact persistence
//!
//! `OverlapContacts` remembers contacts across steps. A contact seen in two
//! consecutive steps keeps its entry and its `life` counter grows; a contact
//! missing for a whole step is dropped. The host reads the current contacts
//! through [`OverlapContacts::events`] after each update.

use std::collections::HashMap;

use glam::DVec2;
use tracing::trace;

use super::body::BodyId;
use super::body_set::BodySet;
use super::collider::{Collider, Layer};

/// One side of a contact: the body and the collider that touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSide {
    pub body: BodyId,
    pub collider: Collider,
}

impl ContactSide {
    /// Captures the current collider of `body`.
    pub fn of(bodies: &BodySet, body: BodyId) -> Self {
        Self {
            body,
            collider: bodies[body].collider,
        }
    }

    /// World position of this side's collider.
    pub fn world_position(&self, bodies: &BodySet) -> DVec2 {
        self.collider.world_position(bodies.world_position(self.body))
    }
}

/// A contact between two colliders, as reported by a collision service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub p: ContactSide,
    pub q: ContactSide,
    /// Layer the contact was detected on
    pub layer: Layer,
    /// Number of consecutive steps this contact has persisted (0 = new)
    pub life: u32,
}

impl Contact {
    /// Returns the contact with its sides ordered so that `p.body == first`.
    pub fn oriented(self, first: BodyId) -> Self {
        if self.q.body == first && self.p.body != first {
            Self {
                p: self.q,
                q: self.p,
                ..self
            }
        } else {
            self
        }
    }
}

/// Narrow-phase collision test used by the physics engine.
pub trait CollisionService {
    /// Called once at the start of every physics step.
    fn begin_step(&mut self) {}

    /// Returns the contact between `a` and `b` on `layer`, if any.
    fn contact_between(
        &mut self,
        bodies: &BodySet,
        a: BodyId,
        b: BodyId,
        layer: Layer,
    ) -> Option<Contact>;
}

/// Tests whether the colliders of `a` and `b` overlap.
///
/// Circle pairs use the exact distance test; any other pair compares
/// axis-aligned bounds.
pub fn colliders_overlap(bodies: &BodySet, a: BodyId, b: BodyId) -> bool {
    let ca = &bodies[a].collider;
    let cb = &bodies[b].collider;
    let wa = bodies.world_position(a);
    let wb = bodies.world_position(b);

    match (ca.shape.as_circle(), cb.shape.as_circle()) {
        (Some(ra), Some(rb)) => {
            let reach = ra.radius + rb.radius;
            ca.world_position(wa).distance_squared(cb.world_position(wb)) < reach * reach
        }
        _ => {
            let (min_a, max_a) = ca.bounds(wa);
            let (min_b, max_b) = cb.bounds(wb);
            min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedContact {
    contact: Contact,
    last_seen: u64,
}

/// Built-in collision service: overlap tests plus a persistent contact table.
#[derive(Debug, Default)]
pub struct OverlapContacts {
    contacts: HashMap<(BodyId, BodyId, Layer), TrackedContact>,
    step: u64,
}

impl OverlapContacts {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts detected during the current step.
    pub fn events(&self) -> impl Iterator<Item = &Contact> {
        let step = self.step;
        self.contacts
            .values()
            .filter(move |t| t.last_seen == step)
            .map(|t| &t.contact)
    }

    /// Number of contacts detected during the current step.
    pub fn active_count(&self) -> usize {
        self.events().count()
    }
}

impl CollisionService for OverlapContacts {
    fn begin_step(&mut self) {
        self.step += 1;
        let previous = self.step - 1;
        self.contacts.retain(|_, t| t.last_seen >= previous);
    }

    fn contact_between(
        &mut self,
        bodies: &BodySet,
        a: BodyId,
        b: BodyId,
        layer: Layer,
    ) -> Option<Contact> {
        if bodies[a].collider.layer != layer || bodies[b].collider.layer != layer {
            return None;
        }
        if !colliders_overlap(bodies, a, b) {
            return None;
        }

        let key = (a.min(b), a.max(b), layer);
        let step = self.step;
        let fresh = Contact {
            p: ContactSide::of(bodies, a),
            q: ContactSide::of(bodies, b),
            layer,
            life: 0,
        };

        let tracked = self
            .contacts
            .entry(key)
            .and_modify(|t| {
                if t.last_seen + 1 == step {
                    t.contact.life += 1;
                }
                t.contact = Contact {
                    life: t.contact.life,
                    ..fresh
                };
                t.last_seen = step;
            })
            .or_insert(TrackedContact {
                contact: fresh,
                last_seen: step,
            });

        trace!(
            p = %bodies[a].name,
            q = %bodies[b].name,
            life = tracked.contact.life,
            "contact"
        );
        Some(tracked.contact)
    }
}
