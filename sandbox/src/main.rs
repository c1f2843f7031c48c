//! Headless fixed-timestep locomotion sandbox.
//!
//! Builds a small Rapier scene, spawns characters through a [`Director`], and plays a
//! scripted input timeline while logging kinematics. Set `RUST_LOG=debug` for state
//! transitions or `RUST_LOG=trace` for every tick.

mod scene;
mod script;

use std::{collections::BTreeMap, path::PathBuf};

use clap::Parser;
use locomotion::{
    BodyState, CharacterId, Director, FollowCamera, JumpArc, Layer, LocomotionConfig, LocomotionError,
    RapierWorld,
    collision::{Point3, Vec2, Vec3},
    constants::ARC_SEGMENT_SECONDS,
    jump_arc,
    rapier_world::CharacterHandle,
    sanitize_config,
};
use tracing_subscriber::EnvFilter;

use crate::script::Timeline;

const CAPSULE_HALF_HEIGHT: f32 = 0.5;
const CAPSULE_RADIUS: f32 = 0.5;

#[derive(Parser, Debug)]
#[command(name = "sandbox")]
#[command(about = "Run the locomotion controller against a scripted Rapier scene", long_about = None)]
struct Args {
    /// TOML file overriding the default locomotion settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of fixed ticks to simulate.
    #[arg(short, long, default_value_t = 600)]
    ticks: u32,

    /// Fixed tick rate (Hz).
    #[arg(long, default_value_t = 50.0)]
    hz: f32,

    /// Characters to spawn side by side.
    #[arg(long, default_value_t = 1)]
    characters: u32,
}

/// Arc a jump would follow from the body's current position along its travel direction.
fn predicted_jump(config: &LocomotionConfig, body: &BodyState) -> JumpArc {
    let heading = Vec2::new(body.velocity.x, body.velocity.z);
    jump_arc(config, body.position, heading, ARC_SEGMENT_SECONDS)
}

fn main() -> Result<(), LocomotionError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => LocomotionConfig::load(path)?,
        None => LocomotionConfig::default(),
    };
    let (config, _) = sanitize_config(&config);

    let hz = if args.hz > 0.0 { args.hz } else { 50.0 };
    let dt = 1.0 / hz;

    let mut world = RapierWorld::build(scene::statics(), dt);
    let mut director: Director = Director::new();
    let mut handles: BTreeMap<CharacterId, CharacterHandle> = BTreeMap::new();

    for i in 0..args.characters {
        let position = Point3::new(0.0, 1.2, i as f32 * -2.0);
        let handle = world.spawn_character(position, CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, Layer::DEFAULT);
        let Some(state) = world.body_state(&handle) else {
            log::warn!("spawned body {i} has no capsule collider");
            continue;
        };
        handles.insert(director.spawn(state, config.clone()), handle);
    }
    let Some(&leader) = handles.keys().next() else {
        log::warn!("no characters to simulate");
        return Ok(());
    };

    director.set_active_camera(Some(FollowCamera::new(Vec3::new(0.0, 4.0, -8.0), 0.0)));
    let timeline = Timeline::demo(hz);

    for tick in 0..args.ticks {
        if let Some(label) = timeline.label_starting_at(tick) {
            log::info!("tick {tick}: {label}");
        }
        let frame = timeline.frame_at(tick);
        if frame.jump {
            if let Some(controller) = director.get(leader) {
                let arc = predicted_jump(&config, controller.body());
                log::info!(
                    "predicted jump: apex y={:.2} air time {:.2}s over {} samples",
                    arc.apex.y,
                    arc.air_time,
                    arc.points.len(),
                );
            }
        }
        director.apply_input(&frame)?;

        for (id, controller) in director.iter_mut() {
            let Some(handle) = handles.get(&id) else {
                continue;
            };
            let report = controller.fixed_update(&world.probe(), dt);
            world.push(handle, controller.body());

            log::trace!("{id}: {report:?}");
        }

        world.step();

        // Refresh before the next tick's input reads velocity or grounded state.
        for (id, controller) in director.iter_mut() {
            if let Some(handle) = handles.get(&id) {
                world.observe(handle, controller);
            }
        }

        if let Some(leader_position) = director.get(leader).map(|c| c.body().position) {
            if let Some(camera) = director.active_camera_mut() {
                camera.follow(leader_position);
            }
        }

        if tick % hz.round().max(1.0) as u32 == 0 {
            if let Some(controller) = director.get(leader) {
                let snap = controller.snapshot();
                log::info!(
                    "t={:.2}s pos=({:.2}, {:.2}, {:.2}) speed={:.2} vy={:.2} {:?}",
                    tick as f32 * dt,
                    snap.position.x,
                    snap.position.y,
                    snap.position.z,
                    snap.horizontal_speed(),
                    snap.velocity.y,
                    snap.debug_info(),
                );
            }
        }
    }

    for (id, handle) in &handles {
        if let Some(state) = world.body_state(handle) {
            log::info!(
                "{id} finished at ({:.2}, {:.2}, {:.2})",
                state.position.x,
                state.position.y,
                state.position.z
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use locomotion::collision::ColliderId;

    use super::*;

    #[test]
    fn bundled_config_is_clean() {
        let config = LocomotionConfig::from_toml_str(include_str!("../locomotion.toml")).unwrap();
        assert_eq!(config.speed, 8.0);
        assert!(sanitize_config(&config).1.is_empty());
    }

    #[test]
    fn predicted_jump_follows_travel_direction() {
        let config = LocomotionConfig::default();
        let mut body = BodyState::capsule(Point3::new(0.0, 1.0, 0.0), 0.5, 0.5, ColliderId(1));
        body.velocity = Vec3::new(0.0, 0.0, 10.0);
        let arc = predicted_jump(&config, &body);
        assert!((arc.apex.y - (1.0 + config.jump_height)).abs() < 0.05);
        assert!(arc.apex.z > 0.0 && arc.apex.x.abs() < 1.0e-4);
        let samples = (arc.air_time / ARC_SEGMENT_SECONDS).ceil() as usize + 1;
        assert_eq!(arc.points.len(), samples);
    }

    #[test]
    fn args_default_to_ten_seconds_at_fifty_hz() {
        let args = Args::parse_from(["sandbox"]);
        assert_eq!(args.ticks, 600);
        assert_eq!(args.hz, 50.0);
        assert!(args.config.is_none());
    }
}
