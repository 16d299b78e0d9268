//! Contact resolution
//!
//! Contacts are resolved in two phases:
//!
//! 1. **Static resolution** pushes the colliders apart along the contact
//!    normal so they no longer overlap.
//! 2. **Dynamic resolution** exchanges the normal components of the two
//!    velocities with the 1D elastic collision formula.
//!
//! Only circle-circle contacts get a physical response. Any other shape pair
//! takes a placeholder path: a unit push apart and a hard stop.
//!
//! # Normal
//!
//! The contact normal points from `q`'s collider toward `p`'s collider. If
//! both colliders sit at the same point the normal falls back to `+X`.

use glam::DVec2;
use tracing::debug;

use super::body_set::BodySet;
use super::config::PhysicsConfig;
use super::contact::Contact;

/// Unit normal pointing from `q` toward `p`, and the center distance.
pub fn contact_normal(bodies: &BodySet, contact: &Contact) -> (DVec2, f64) {
    let q_to_p = contact.p.world_position(bodies) - contact.q.world_position(bodies);
    let normal = q_to_p.try_normalize().unwrap_or(DVec2::X);
    (normal, q_to_p.length())
}

/// Runs static then dynamic resolution for one contact.
pub fn resolve_contact(bodies: &mut BodySet, contact: &Contact, config: &PhysicsConfig) {
    static_resolution(bodies, contact, config);
    dynamic_resolution(bodies, contact, config);
}

/// Removes the overlap between the two contact colliders.
///
/// Circle pairs move along the normal by `(r_p + r_q - distance) * separation_slop`,
/// split inversely to mass, so they end just past touching distance. The
/// overlap is signed: circles reported in contact while apart move together. If one side is immovable, or is the body the
/// other side orbits, the free side takes the whole displacement. Two
/// immovable bodies stay put.
pub fn static_resolution(bodies: &mut BodySet, contact: &Contact, config: &PhysicsConfig) {
    let p = contact.p.body;
    let q = contact.q.body;
    let (normal, distance) = contact_normal(bodies, contact);
    let p_fixed = bodies.is_immovable(p);
    let q_fixed = bodies.is_immovable(q);

    let (Some(pc), Some(qc)) = (
        contact.p.collider.shape.as_circle(),
        contact.q.collider.shape.as_circle(),
    ) else {
        // Placeholder for non-circle shapes: fixed unit push, ignores overlap.
        if !p_fixed {
            bodies.translate(p, normal);
        }
        if !q_fixed {
            bodies.translate(q, -normal);
        }
        return;
    };

    // Signed: a reported contact between separated circles closes the gap.
    let overlap = (pc.radius + qc.radius - distance) * config.separation_slop;

    let q_anchored = q_fixed || bodies[p].is_orbiting(q);
    let p_anchored = p_fixed || bodies[q].is_orbiting(p);

    if p_fixed && q_fixed {
        debug!(p = %bodies[p].name, q = %bodies[q].name, "both bodies immovable");
    } else if p_anchored && !q_fixed {
        bodies.translate(q, -normal * overlap);
    } else if q_anchored && !p_fixed {
        bodies.translate(p, normal * overlap);
    } else {
        let mp = bodies[p].mass();
        let mq = bodies[q].mass();
        let total = mp + mq;
        bodies.translate(p, normal * overlap * (mq / total));
        bodies.translate(q, -normal * overlap * (mp / total));
    }
}

/// Post-collision normal speeds for a 1D elastic collision.
///
/// # Arguments
///
/// * `vp`, `mp` - Normal speed and mass of the first body
/// * `vq`, `mq` - Normal speed and mass of the second body
#[inline]
pub fn elastic_exchange(vp: f64, mp: f64, vq: f64, mq: f64) -> (f64, f64) {
    let total = mp + mq;
    let p_after = (vp * (mp - mq) + 2.0 * mq * vq) / total;
    let q_after = (vq * (mq - mp) + 2.0 * mp * vp) / total;
    (p_after, q_after)
}

/// Exchanges momentum along the contact normal.
///
/// The tangential component of each velocity is kept, the normal component
/// comes from [`elastic_exchange`], and the recombined velocity is scaled by
/// `restitution`. Immovable bodies keep their velocity. Non-circle pairs are
/// brought to a hard stop (velocity and acceleration zeroed).
pub fn dynamic_resolution(bodies: &mut BodySet, contact: &Contact, config: &PhysicsConfig) {
    let p = contact.p.body;
    let q = contact.q.body;
    let p_fixed = bodies.is_immovable(p);
    let q_fixed = bodies.is_immovable(q);

    let circles = contact.p.collider.shape.as_circle().is_some()
        && contact.q.collider.shape.as_circle().is_some();
    if !circles {
        for (id, fixed) in [(p, p_fixed), (q, q_fixed)] {
            if !fixed {
                bodies.reset_velocity(id);
                bodies[id].reset_acceleration();
            }
        }
        return;
    }

    let (normal, _) = contact_normal(bodies, contact);
    let tangent = normal.perp();

    let vp = bodies.velocity(p);
    let vq = bodies.velocity(q);
    let mp = bodies[p].mass();
    let mq = bodies[q].mass();

    let (pn, qn) = elastic_exchange(vp.dot(normal), mp, vq.dot(normal), mq);
    let p_after = (tangent * vp.dot(tangent) + normal * pn) * config.restitution;
    let q_after = (tangent * vq.dot(tangent) + normal * qn) * config.restitution;

    debug!(
        p = %bodies[p].name,
        q = %bodies[q].name,
        ?normal,
        p_normal_speed = pn,
        q_normal_speed = qn,
        "dynamic resolution"
    );

    if !p_fixed {
        bodies.set_velocity(p, p_after);
    }
    if !q_fixed {
        bodies.set_velocity(q, q_after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::{Body, BodyId};
    use crate::physics::collider::{Collider, Layer};
    use crate::physics::contact::ContactSide;

    fn contact(bodies: &BodySet, p: BodyId, q: BodyId) -> Contact {
        Contact {
            p: ContactSide::of(bodies, p),
            q: ContactSide::of(bodies, q),
            layer: Layer::PHYSICS,
            life: 0,
        }
    }

    fn circles(xp: f64, xq: f64, mp: f64, mq: f64) -> (BodySet, BodyId, BodyId) {
        let mut bodies = BodySet::new();
        let p = bodies
            .insert(Body::new("p", DVec2::new(xp, 0.0), mp).with_collider(Collider::circle(0.5)))
            .unwrap();
        let q = bodies
            .insert(Body::new("q", DVec2::new(xq, 0.0), mq).with_collider(Collider::circle(0.5)))
            .unwrap();
        (bodies, p, q)
    }

    #[test]
    fn test_normal_points_from_q_to_p() {
        let (bodies, p, q) = circles(-1.0, 1.0, 1.0, 1.0);
        let (n, d) = contact_normal(&bodies, &contact(&bodies, p, q));
        assert_eq!(n, DVec2::new(-1.0, 0.0));
        assert_eq!(d, 2.0);
    }

    #[test]
    fn test_degenerate_normal_falls_back() {
        let (bodies, p, q) = circles(0.0, 0.0, 1.0, 1.0);
        let (n, _) = contact_normal(&bodies, &contact(&bodies, p, q));
        assert_eq!(n, DVec2::X);
    }

    #[test]
    fn test_static_split_by_mass() {
        // overlap = (1.0 - 0.6) * 1.01 = 0.404, heavy p (3) moves 1/4, light q moves 3/4
        let (mut bodies, p, q) = circles(-0.3, 0.3, 3.0, 1.0);
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());

        let moved_p = (bodies[p].position.x + 0.3).abs();
        let moved_q = (bodies[q].position.x - 0.3).abs();
        assert!((moved_p - 0.101).abs() < 1e-9, "p moved {}", moved_p);
        assert!((moved_q - 0.303).abs() < 1e-9, "q moved {}", moved_q);
        let distance = bodies[q].position.x - bodies[p].position.x;
        assert!(distance >= 1.0 && distance <= 1.01, "distance {}", distance);
    }

    #[test]
    fn test_static_kinematic_side_stays() {
        let (mut bodies, p, q) = circles(-0.3, 0.3, 1.0, 1.0);
        bodies[p].kinematic = true;
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert_eq!(bodies[p].position.x, -0.3);
        assert!((bodies[q].position.x - (0.3 + 0.404)).abs() < 1e-9);
    }

    #[test]
    fn test_static_orbited_side_stays() {
        let (mut bodies, p, q) = circles(-0.3, 0.3, 1.0, 1.0);
        bodies[q].orbiting = Some(p);
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert_eq!(bodies[p].position.x, -0.3);
        assert!(bodies[q].position.x > 0.7);
    }

    #[test]
    fn test_static_both_kinematic_no_motion() {
        let (mut bodies, p, q) = circles(-0.3, 0.3, 1.0, 1.0);
        bodies[p].kinematic = true;
        bodies[q].kinematic = true;
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert_eq!(bodies[p].position.x, -0.3);
        assert_eq!(bodies[q].position.x, 0.3);
    }

    #[test]
    fn test_static_reported_gap_closes_to_contact() {
        // overlap = (1.0 - 1.2) * 1.01 = -0.202, each side moves 0.101 inward
        let (mut bodies, p, q) = circles(-0.6, 0.6, 1.0, 1.0);
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert!((bodies[p].position.x + 0.499).abs() < 1e-9);
        assert!((bodies[q].position.x - 0.499).abs() < 1e-9);
    }

    #[test]
    fn test_static_box_placeholder_unit_push() {
        let (mut bodies, p, q) = circles(-0.3, 0.3, 1.0, 1.0);
        bodies[q].collider = Collider::aabb(DVec2::splat(0.5));
        let c = contact(&bodies, p, q);
        static_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert!((bodies[p].position.x + 1.3).abs() < 1e-12);
        assert!((bodies[q].position.x - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_elastic_exchange_equal_masses_swap() {
        let (a, b) = elastic_exchange(2.0, 1.0, -1.0, 1.0);
        assert_eq!((a, b), (-1.0, 2.0));
    }

    #[test]
    fn test_elastic_exchange_conserves_momentum() {
        let (a, b) = elastic_exchange(3.0, 2.0, -1.0, 5.0);
        let before = 3.0 * 2.0 + -1.0 * 5.0;
        let after = a * 2.0 + b * 5.0;
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_keeps_tangential_component() {
        let (mut bodies, p, q) = circles(-0.45, 0.45, 1.0, 1.0);
        bodies.set_velocity(p, DVec2::new(1.0, 0.5));
        bodies.set_velocity(q, DVec2::new(-1.0, -0.25));
        let c = contact(&bodies, p, q);
        dynamic_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert!((bodies.velocity(p) - DVec2::new(-1.0, 0.5)).length() < 1e-12);
        assert!((bodies.velocity(q) - DVec2::new(1.0, -0.25)).length() < 1e-12);
    }

    #[test]
    fn test_dynamic_restitution_scales_whole_velocity() {
        let (mut bodies, p, q) = circles(-0.45, 0.45, 1.0, 1.0);
        bodies.set_velocity(p, DVec2::new(1.0, 1.0));
        bodies.set_velocity(q, DVec2::new(-1.0, 0.0));
        let config = PhysicsConfig {
            restitution: 0.5,
            ..Default::default()
        };
        let c = contact(&bodies, p, q);
        dynamic_resolution(&mut bodies, &c, &config);
        assert!((bodies.velocity(p) - DVec2::new(-0.5, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_dynamic_kinematic_velocity_untouched() {
        let (mut bodies, p, q) = circles(-0.45, 0.45, 1.0, 1.0);
        bodies[q].kinematic = true;
        bodies.set_velocity(p, DVec2::new(1.0, 0.0));
        bodies.set_velocity(q, DVec2::new(0.25, 0.0));
        let c = contact(&bodies, p, q);
        dynamic_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert_eq!(bodies.velocity(q), DVec2::new(0.25, 0.0));
    }

    #[test]
    fn test_dynamic_box_placeholder_hard_stop() {
        let (mut bodies, p, q) = circles(-0.45, 0.45, 1.0, 1.0);
        bodies[p].collider = Collider::aabb(DVec2::splat(0.5));
        bodies.set_velocity(p, DVec2::new(1.0, 0.0));
        bodies.set_velocity(q, DVec2::new(-1.0, 0.0));
        bodies[p].add_force(DVec2::new(3.0, 0.0));
        let c = contact(&bodies, p, q);
        dynamic_resolution(&mut bodies, &c, &PhysicsConfig::default());
        assert_eq!(bodies.velocity(p), DVec2::ZERO);
        assert_eq!(bodies.velocity(q), DVec2::ZERO);
        assert_eq!(bodies[p].acceleration(), DVec2::ZERO);
    }
}
