//! Drift - headless physics scene
//!
//! Runs the three-body drift scene without a window: two bodies at rest
//! either side of the origin and a third drifting in from the right.
//! Contact events are logged each frame the way the windowed game prints
//! them to its console.
//!
//! Usage:
//!   drift [config.json] [frames]
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=drift_engine=debug`).

use drift_engine::physics::{
    Body, BodyId, BodySet, Collider, OverlapContacts, PhysicsConfig, PhysicsEngine, SceneEntity,
    SoundService,
};
use drift_engine::render::RenderBatch;
use glam::DVec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Fixed simulation tick (seconds)
const TICK: f64 = 1.0 / 60.0;
/// Frames simulated when none are given on the command line
const DEFAULT_FRAMES: u32 = 600;
/// Sound table of the drift scene
const SOUND_FILES: [&str; 3] = ["track0.ogg", "bleep.ogg", "solid.ogg"];

/// Scene entity: a camera has no body, the drift bodies do.
enum SceneObject {
    Camera { name: String },
    Drifter { name: String, body: BodyId },
}

impl SceneEntity for SceneObject {
    fn name(&self) -> &str {
        match self {
            SceneObject::Camera { name } | SceneObject::Drifter { name, .. } => name,
        }
    }

    fn physics_body(&self) -> Option<BodyId> {
        match self {
            SceneObject::Camera { .. } => None,
            SceneObject::Drifter { body, .. } => Some(*body),
        }
    }
}

/// Sound service that logs what would be played.
#[derive(Default)]
struct ConsoleSound;

impl SoundService for ConsoleSound {
    fn play(&mut self, effect: usize, looping: bool) {
        let file = SOUND_FILES.get(effect).copied().unwrap_or("<missing>");
        info!(effect, file, looping, "play sound");
    }
}

fn build_scene(bodies: &mut BodySet) -> Result<Vec<SceneObject>, drift_engine::PhysicsError> {
    let a = bodies.insert(
        Body::new("A", DVec2::new(1.0, 0.0), 1.0).with_collider(Collider::circle(0.5)),
    )?;
    let b = bodies.insert(
        Body::new("B", DVec2::new(-1.0, 0.0), 1.0).with_collider(Collider::circle(0.5)),
    )?;
    let c = bodies.insert(
        Body::new("C", DVec2::new(10.0, 0.0), 1.0)
            .with_collider(Collider::circle(0.5))
            .with_velocity(DVec2::new(-1.0, 0.0)),
    )?;

    Ok(vec![
        SceneObject::Camera {
            name: "freecam".to_string(),
        },
        SceneObject::Drifter {
            name: "A".to_string(),
            body: a,
        },
        SceneObject::Drifter {
            name: "B".to_string(),
            body: b,
        },
        SceneObject::Drifter {
            name: "C".to_string(),
            body: c,
        },
    ])
}

/// Splits `[config.json] [frames]`: the config path is recognised by its
/// `.json` extension, so `drift 100` runs 100 frames on the default config.
fn split_args(mut args: impl Iterator<Item = String>) -> (Option<String>, Option<String>) {
    match args.next() {
        Some(first) if first.ends_with(".json") => (Some(first), args.next()),
        first => (None, first),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config_path, frames_arg) = split_args(std::env::args().skip(1));
    let config = match config_path {
        Some(path) => match PhysicsConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => PhysicsConfig::default(),
    };
    let frames = match frames_arg {
        Some(arg) => match arg.parse() {
            Ok(frames) => frames,
            Err(_) => {
                error!(arg = %arg, "frame count must be a non-negative integer");
                std::process::exit(1);
            }
        },
        None => DEFAULT_FRAMES,
    };

    let mut bodies = BodySet::new();
    let scene = match build_scene(&mut bodies) {
        Ok(scene) => scene,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let mut engine = PhysicsEngine::new(OverlapContacts::new(), ConsoleSound);
    engine.register(&scene, OverlapContacts::new(), ConsoleSound);
    info!(gravity_mode = ?config.gravity_mode, frames, "drift scene ready");

    let dt = TICK * config.timescale;
    for frame in 0..frames {
        engine.step(&mut bodies, &config, dt);

        for event in engine.collision().events() {
            info!(
                frame,
                life = event.life,
                layer = event.layer.0,
                p = %bodies[event.p.body].name,
                q = %bodies[event.q.body].name,
                "collision event"
            );
        }
    }

    let batch = RenderBatch::extract(&bodies, engine.tracked(), 0.0);
    for (entity, rb) in scene
        .iter()
        .filter(|e| e.physics_body().is_some())
        .zip(&batch.bodies)
    {
        println!(
            "{:<4} x={:>8.3} z={:>8.3} speed={:.3}",
            entity.name(),
            rb.position[0],
            rb.position[2],
            rb.speed
        );
    }
}
