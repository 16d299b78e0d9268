//! Gravity model
//!
//! Pairwise gravity between bodies plus a constant "directional" mode.
//!
//! # Force law
//!
//! For bodies `a` and `b` with separation vector `s = b - a` and `d = |s|`:
//!
//! ```text
//! F_a = s * G * (m_a * m_b) / (d² / 4)
//! F_b = -F_a
//! ```
//!
//! `s` is not normalized, so the magnitude falls off as `1/d` rather than
//! `1/d²`. Scenes are tuned against this law.

use glam::DVec2;
use tracing::trace;

use super::body::BodyId;
use super::body_set::BodySet;
use super::config::{GravityMode, PhysicsConfig};

/// Gravity force exerted on the body at `a` by the body at `b`.
///
/// # Arguments
///
/// * `a`, `mass_a` - Position and mass of the attracted body
/// * `b`, `mass_b` - Position and mass of the attracting body
/// * `g` - Gravitational constant
///
/// # Returns
///
/// Force on `a`, pointing toward `b`. Zero when the bodies coincide.
pub fn gravity_force(a: DVec2, mass_a: f64, b: DVec2, mass_b: f64, g: f64) -> DVec2 {
    let a_to_b = b - a;
    let d2 = a_to_b.length_squared();
    if d2 <= f64::EPSILON {
        return DVec2::ZERO;
    }
    let r2 = d2 / 4.0;
    a_to_b * (g * (mass_a * mass_b / r2))
}

/// Applies pairwise gravity between `p` and `q` according to the config mode.
///
/// Only unparented pairs interact. Kinematic bodies receive no force but
/// still attract the other side. [`GravityMode::Directional`] is a no-op
/// here; see [`apply_directional_gravity`].
pub fn apply_pair_gravity(bodies: &mut BodySet, p: BodyId, q: BodyId, config: &PhysicsConfig) {
    if config.gravity_mode == GravityMode::Directional {
        return;
    }
    if bodies[p].parent().is_some() || bodies[q].parent().is_some() {
        return;
    }

    let force = gravity_force(
        bodies.world_position(p),
        bodies[p].mass(),
        bodies.world_position(q),
        bodies[q].mass(),
        config.gravitational_constant,
    );

    let (pull_p, pull_q) = match config.gravity_mode {
        GravityMode::Everything => (true, true),
        GravityMode::Orbiting => (bodies[p].is_orbiting(q), bodies[q].is_orbiting(p)),
        GravityMode::Directional => (false, false),
    };

    if pull_p || pull_q {
        trace!(
            p = %bodies[p].name,
            q = %bodies[q].name,
            magnitude = force.length(),
            "gravity between"
        );
    }

    if pull_p && !bodies[p].kinematic {
        bodies[p].add_force(force);
    }
    if pull_q && !bodies[q].kinematic {
        bodies[q].add_force(-force);
    }
}

/// Applies the constant directional force (`direction * mass`) to a free body.
///
/// Parented and kinematic bodies are skipped. Only acts in
/// [`GravityMode::Directional`].
pub fn apply_directional_gravity(bodies: &mut BodySet, id: BodyId, config: &PhysicsConfig) {
    if config.gravity_mode != GravityMode::Directional {
        return;
    }
    let body = &mut bodies[id];
    if body.kinematic || body.parent().is_some() {
        return;
    }
    let force = config.directional_gravity * body.mass();
    body.add_force(force);
}
