//! Physics engine
//!
//! [`PhysicsEngine`] keeps the list of tracked bodies and advances them once
//! per frame. Each step:
//!
//! 1. Lets the collision service start a new step
//! 2. Visits every unordered pair `(i, j)`, `i < j`, exactly once:
//!    applies gravity, asks the collision service for a contact and resolves it
//! 3. Integrates every free (non-kinematic, unparented) body:
//!    `v += a * dt`, then `p += v * dt`
//! 4. Clears every tracked body's acceleration
//!
//! The engine never owns bodies. The host owns a [`BodySet`] and passes it
//! into each update together with the current [`PhysicsConfig`].
//!
//! # Example
//!
//! ```ignore
//! use drift_engine::physics::{Body, BodySet, OverlapContacts, PhysicsConfig, PhysicsEngine, Silent};
//! use glam::DVec2;
//!
//! let mut bodies = BodySet::new();
//! let a = bodies.insert(Body::new("A", DVec2::new(1.0, 0.0), 1.0))?;
//! let b = bodies.insert(Body::new("B", DVec2::new(-1.0, 0.0), 1.0))?;
//!
//! let mut engine = PhysicsEngine::new(OverlapContacts::new(), Silent);
//! engine.track([a, b]);
//!
//! let config = PhysicsConfig::default();
//! loop {
//!     engine.update(&mut bodies, &config);
//! }
//! ```

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::body::BodyId;
use super::body_set::BodySet;
use super::clock::FrameClock;
use super::config::PhysicsConfig;
use super::contact::{CollisionService, OverlapContacts};
use super::gravity::{apply_directional_gravity, apply_pair_gravity};
use super::resolution::resolve_contact;
use super::sound::{Silent, SoundService};

/// An application entity that may carry a physics body.
///
/// The host hands the engine its whole heterogeneous entity list; only
/// entities returning `Some` from [`SceneEntity::physics_body`] are tracked.
pub trait SceneEntity {
    /// Display name of the entity.
    fn name(&self) -> &str;

    /// The entity's physics body, if it has one.
    fn physics_body(&self) -> Option<BodyId> {
        None
    }
}

/// Per-frame physics driver.
#[derive(Debug)]
pub struct PhysicsEngine<C = OverlapContacts, S = Silent> {
    tracked: Vec<BodyId>,
    collision: C,
    sound: S,
    clock: FrameClock,
    last_contacts: usize,
}

impl<C: Default, S: Default> Default for PhysicsEngine<C, S> {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
            collision: C::default(),
            sound: S::default(),
            clock: FrameClock::new(),
            last_contacts: 0,
        }
    }
}

impl<C: CollisionService, S: SoundService> PhysicsEngine<C, S> {
    /// Creates an engine tracking nothing.
    pub fn new(collision: C, sound: S) -> Self {
        Self {
            tracked: Vec::new(),
            collision,
            sound,
            clock: FrameClock::new(),
            last_contacts: 0,
        }
    }

    /// Replaces the tracked set and both services.
    ///
    /// Entities without a physics body are skipped and a body listed twice is
    /// tracked once. The previous tracked set is discarded.
    pub fn register<'a, E>(
        &mut self,
        entities: impl IntoIterator<Item = &'a E>,
        collision: C,
        sound: S,
    ) where
        E: SceneEntity + ?Sized + 'a,
    {
        let mut skipped = 0usize;
        self.tracked = unique_in_order(entities.into_iter().filter_map(|entity| {
            let body = entity.physics_body();
            if body.is_none() {
                skipped += 1;
            }
            body
        }));
        self.collision = collision;
        self.sound = sound;
        info!(
            tracked = self.tracked.len(),
            skipped, "physics registered entities"
        );
    }

    /// Replaces the tracked set with explicit ids, keeping the services.
    /// Repeated ids are dropped.
    pub fn track(&mut self, ids: impl IntoIterator<Item = BodyId>) {
        self.tracked = unique_in_order(ids);
        info!(tracked = self.tracked.len(), "physics tracking bodies");
    }

    /// Ids of the tracked bodies, in registration order.
    pub fn tracked(&self) -> &[BodyId] {
        &self.tracked
    }

    /// The collision service (e.g. to read contact events after an update).
    pub fn collision(&self) -> &C {
        &self.collision
    }

    /// Mutable access to the collision service.
    pub fn collision_mut(&mut self) -> &mut C {
        &mut self.collision
    }

    /// The sound service.
    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// Frames per second over the last completed one-second window.
    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    /// Number of contacts resolved by the last step.
    pub fn last_contact_count(&self) -> usize {
        self.last_contacts
    }

    /// Advances the simulation by the scaled wall-clock time since the last call.
    ///
    /// The first call advances by zero.
    pub fn update(&mut self, bodies: &mut BodySet, config: &PhysicsConfig) {
        let dt = self.clock.tick(config.timescale);
        self.step(bodies, config, dt);
    }

    /// Advances the simulation by `dt` simulated seconds.
    ///
    /// `dt` is used as given; the config timescale is not applied.
    pub fn step(&mut self, bodies: &mut BodySet, config: &PhysicsConfig, dt: f64) {
        if let Some(stale) = self.tracked.iter().find(|id| !bodies.contains(**id)) {
            warn!(?stale, "tracked body missing from body set, skipping step");
            return;
        }

        self.collision.begin_step();
        let mut resolved = 0usize;

        for (i, &p) in self.tracked.iter().enumerate() {
            apply_directional_gravity(bodies, p, config);

            for &q in &self.tracked[i + 1..] {
                apply_pair_gravity(bodies, p, q, config);

                // Rigidly attached bodies move as one and never push each other.
                if bodies.root(p) == bodies.root(q) {
                    continue;
                }

                let Some(contact) =
                    self.collision
                        .contact_between(bodies, p, q, config.collision_layer)
                else {
                    continue;
                };
                if !config.resolution_enabled {
                    continue;
                }
                let contact = contact.oriented(p);

                debug!(p = %bodies[p].name, q = %bodies[q].name, "collision detected");
                resolved += 1;

                let closing = bodies.velocity(p).dot(bodies.velocity(q));
                if closing.abs() > config.impact_sound_threshold {
                    self.sound.play(config.impact_sound_effect, false);
                }

                resolve_contact(bodies, &contact, config);
            }
        }

        for &id in &self.tracked {
            let body = &mut bodies[id];
            if body.kinematic || body.parent().is_some() {
                continue;
            }
            body.velocity += body.acceleration * dt;
            body.position += body.velocity * dt;
        }

        for &id in &self.tracked {
            bodies[id].reset_acceleration();
        }

        if resolved > 0 {
            debug!(resolved, "contacts resolved");
        }
        self.last_contacts = resolved;
    }
}

/// Keeps the first occurrence of each id.
fn unique_in_order(ids: impl IntoIterator<Item = BodyId>) -> Vec<BodyId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::Body;
    use crate::physics::collider::Collider;
    use crate::physics::config::GravityMode;
    use crate::physics::sound::SoundLog;
    use glam::DVec2;

    struct Entity {
        name: &'static str,
        body: Option<BodyId>,
    }

    impl SceneEntity for Entity {
        fn name(&self) -> &str {
            self.name
        }

        fn physics_body(&self) -> Option<BodyId> {
            self.body
        }
    }

    fn still() -> PhysicsConfig {
        PhysicsConfig::default().without_gravity()
    }

    #[test]
    fn test_register_filters_entities_without_bodies() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(Body::new("a", DVec2::ZERO, 1.0)).unwrap();
        let b = bodies.insert(Body::new("b", DVec2::X * 5.0, 1.0)).unwrap();
        let entities = vec![
            Entity { name: "camera", body: None },
            Entity { name: "a", body: Some(a) },
            Entity { name: "light", body: None },
            Entity { name: "b", body: Some(b) },
        ];

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.register(&entities, OverlapContacts::new(), Silent);
        assert_eq!(engine.tracked(), &[a, b]);

        engine.register(&entities[..2], OverlapContacts::new(), Silent);
        assert_eq!(engine.tracked(), &[a]);
    }

    #[test]
    fn test_register_accepts_trait_objects() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(Body::new("a", DVec2::ZERO, 1.0)).unwrap();
        let entities: Vec<Box<dyn SceneEntity>> = vec![
            Box::new(Entity { name: "camera", body: None }),
            Box::new(Entity { name: "a", body: Some(a) }),
        ];
        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.register(entities.iter().map(|e| e.as_ref()), OverlapContacts::new(), Silent);
        assert_eq!(engine.tracked(), &[a]);
    }

    #[test]
    fn test_repeated_body_integrated_once() {
        let mut bodies = BodySet::new();
        let a = bodies
            .insert(Body::new("a", DVec2::ZERO, 1.0).with_velocity(DVec2::X))
            .unwrap();
        let b = bodies.insert(Body::new("b", DVec2::new(0.0, 9.0), 1.0)).unwrap();

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([a, b, a]);
        assert_eq!(engine.tracked(), &[a, b]);
        engine.step(&mut bodies, &still(), 1.0);
        assert_eq!(bodies[a].position, DVec2::X);

        let entities = vec![
            Entity { name: "a", body: Some(a) },
            Entity { name: "a-again", body: Some(a) },
            Entity { name: "b", body: Some(b) },
        ];
        engine.register(&entities, OverlapContacts::new(), Silent);
        assert_eq!(engine.tracked(), &[a, b]);
    }

    #[test]
    fn test_step_integrates_velocity_then_position() {
        let mut bodies = BodySet::new();
        let a = bodies
            .insert(Body::new("a", DVec2::ZERO, 1.0).with_velocity(DVec2::new(1.0, 0.0)))
            .unwrap();
        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([a]);

        let config = PhysicsConfig {
            gravity_mode: GravityMode::Directional,
            ..still()
        };
        engine.step(&mut bodies, &config, 0.5);

        // v = (1, 0) + (0, -1) * 0.5 = (1, -0.5); p = v * 0.5
        assert_eq!(bodies.velocity(a), DVec2::new(1.0, -0.5));
        assert_eq!(bodies[a].position, DVec2::new(0.5, -0.25));
        assert_eq!(bodies[a].acceleration(), DVec2::ZERO);
    }

    #[test]
    fn test_parented_body_not_integrated() {
        let mut bodies = BodySet::new();
        let carrier = bodies
            .insert(Body::new("carrier", DVec2::ZERO, 10.0).with_velocity(DVec2::X))
            .unwrap();
        let sat = bodies.insert(Body::new("sat", DVec2::new(0.0, 3.0), 1.0)).unwrap();
        bodies.attach(sat, carrier).unwrap();

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([carrier, sat]);
        engine.step(&mut bodies, &still(), 1.0);

        assert_eq!(bodies[carrier].position, DVec2::X);
        assert_eq!(bodies[sat].position, DVec2::new(0.0, 3.0));
        assert_eq!(bodies.world_position(sat), DVec2::new(1.0, 3.0));
    }

    #[test]
    fn test_attached_bodies_do_not_collide() {
        let mut bodies = BodySet::new();
        let carrier = bodies.insert(Body::new("carrier", DVec2::ZERO, 10.0)).unwrap();
        let sat = bodies.insert(Body::new("sat", DVec2::new(0.2, 0.0), 1.0)).unwrap();
        bodies.attach(sat, carrier).unwrap();

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([carrier, sat]);
        engine.step(&mut bodies, &still(), 0.0);
        assert_eq!(engine.last_contact_count(), 0);
        assert_eq!(bodies.world_position(sat), DVec2::new(0.2, 0.0));
    }

    #[test]
    fn test_impact_plays_sound() {
        let mut bodies = BodySet::new();
        let a = bodies
            .insert(
                Body::new("a", DVec2::new(-0.4, 0.0), 1.0)
                    .with_collider(Collider::circle(0.5))
                    .with_velocity(DVec2::X),
            )
            .unwrap();
        let b = bodies
            .insert(
                Body::new("b", DVec2::new(0.4, 0.0), 1.0)
                    .with_collider(Collider::circle(0.5))
                    .with_velocity(-DVec2::X),
            )
            .unwrap();

        let mut engine = PhysicsEngine::new(OverlapContacts::new(), SoundLog::default());
        engine.track([a, b]);
        engine.step(&mut bodies, &still(), 0.0);

        assert_eq!(engine.last_contact_count(), 1);
        assert_eq!(engine.sound().played, vec![(2, false)]);
        assert_eq!(engine.collision().active_count(), 1);
    }

    #[test]
    fn test_resolution_disabled_leaves_contact_untouched() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(Body::new("a", DVec2::new(-0.2, 0.0), 1.0)).unwrap();
        let b = bodies.insert(Body::new("b", DVec2::new(0.2, 0.0), 1.0)).unwrap();

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([a, b]);
        let config = PhysicsConfig {
            resolution_enabled: false,
            ..still()
        };
        engine.step(&mut bodies, &config, 0.0);

        assert_eq!(bodies[a].position.x, -0.2);
        assert_eq!(bodies[b].position.x, 0.2);
        assert_eq!(engine.last_contact_count(), 0);
        // The service still saw the overlap
        assert_eq!(engine.collision().active_count(), 1);
    }

    #[test]
    fn test_stale_id_skips_step() {
        let mut bodies = BodySet::new();
        let a = bodies
            .insert(Body::new("a", DVec2::ZERO, 1.0).with_velocity(DVec2::X))
            .unwrap();
        let mut other = BodySet::new();
        other.insert(Body::new("x", DVec2::ZERO, 1.0)).unwrap();
        other.insert(Body::new("y", DVec2::ZERO, 1.0)).unwrap();
        let foreign = other.ids().last().unwrap();

        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([a, foreign]);
        engine.step(&mut bodies, &still(), 1.0);
        assert_eq!(bodies[a].position, DVec2::ZERO);
    }

    #[test]
    fn test_first_update_is_zero_delta() {
        let mut bodies = BodySet::new();
        let a = bodies
            .insert(Body::new("a", DVec2::ZERO, 1.0).with_velocity(DVec2::X))
            .unwrap();
        let mut engine: PhysicsEngine = PhysicsEngine::default();
        engine.track([a]);
        engine.update(&mut bodies, &still());
        assert_eq!(bodies[a].position, DVec2::ZERO);
    }
}
