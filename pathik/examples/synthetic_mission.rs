//! Drive RoverCore through a synthetic arena.
//!
//! Camera frames are rendered by projecting every camera pixel onto a flat
//! procedural world: a disc of open ground ringed by rock wall, with a few
//! sample rocks. Vehicle motion uses simple point kinematics.
//!
//! Usage:
//!
//! ```text
//! cargo run --example synthetic_mission -- [ticks] [map.png]
//! RUST_LOG=pathik=debug cargo run --example synthetic_mission
//! ```

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use pathik::perception::{rotate, translate};
use pathik::{PathikConfig, PathikError, Pose, Rectifier, Result, RoverCore, VehicleState};
use tracing::info;

const DT: f32 = 0.1;
const ARENA_CENTER: (f32, f32) = (100.0, 100.0);
const ARENA_RADIUS: f32 = 30.0;
const ROCK_RADIUS: f32 = 0.6;
const NEAR_SAMPLE_RADIUS: f32 = 1.0;
const PICKUP_TICKS: u32 = 15;
/// Beyond this many rectified pixels the camera sees sky
const HORIZON_PX: f32 = 250.0;

const GROUND: Rgb<u8> = Rgb([205, 180, 160]);
const WALL: Rgb<u8> = Rgb([70, 55, 45]);
const SKY: Rgb<u8> = Rgb([150, 180, 230]);
const SAMPLE: Rgb<u8> = Rgb([210, 170, 20]);

struct Arena {
    rocks: Vec<(f32, f32)>,
}

impl Arena {
    fn new() -> Self {
        Self {
            rocks: vec![
                (112.0, 104.0),
                (92.0, 118.0),
                (80.0, 95.0),
                (105.0, 78.0),
                (121.0, 88.0),
                (96.0, 108.0),
            ],
        }
    }

    fn color_at(&self, x: f32, y: f32) -> Rgb<u8> {
        if self
            .rocks
            .iter()
            .any(|&(rx, ry)| (x - rx).hypot(y - ry) < ROCK_RADIUS)
        {
            return SAMPLE;
        }
        let (cx, cy) = ARENA_CENTER;
        if (x - cx).hypot(y - cy) < ARENA_RADIUS {
            GROUND
        } else {
            WALL
        }
    }

    fn nearest_rock(&self, x: f32, y: f32) -> Option<(usize, f32)> {
        self.rocks
            .iter()
            .enumerate()
            .map(|(i, &(rx, ry))| (i, (x - rx).hypot(y - ry)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Render the camera view for a pose.
    fn render(&self, rectifier: &Rectifier, pose: &Pose, pixels_per_meter: f32) -> RgbImage {
        let (width, height) = rectifier.dimensions();
        RgbImage::from_fn(width, height, |col, row| {
            let Some([rx, ry]) = rectifier.project([col as f64, row as f64]) else {
                return SKY;
            };
            // Rectified pixel to vehicle frame
            let xv = height as f32 - ry as f32;
            let yv = width as f32 / 2.0 - rx as f32;
            if xv <= 0.0 || xv.hypot(yv) > HORIZON_PX {
                return SKY;
            }
            let (xr, yr) = rotate(xv, yv, pose.yaw);
            let (wx, wy) = translate(xr, yr, pose.x, pose.y, pixels_per_meter);
            self.color_at(wx, wy)
        })
    }
}

/// Point kinematics driven by the commands of the last tick.
fn drive(vehicle: &mut VehicleState) {
    let commands = vehicle.commands;
    let mut vel = vehicle.vel + commands.throttle * 2.0 * DT;
    if commands.brake > 0.0 {
        let slow = (commands.brake * 0.2 * DT).min(vel.abs());
        vel -= slow * vel.signum();
    }
    let vel = vel.clamp(-1.0, 3.0);

    let mut pose = vehicle.pose;
    let turn_rate = if vel.abs() < 0.05 { 1.0 } else { vel.abs() };
    pose.yaw = (pose.yaw + commands.steer * turn_rate * DT * 4.0).rem_euclid(360.0);
    let yaw = pose.yaw.to_radians();
    pose.x += vel * yaw.cos() * DT;
    pose.y += vel * yaw.sin() * DT;

    vehicle.set_telemetry(pose, if vel.abs() < 1e-3 { 0.0 } else { vel });
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pathik=info".parse().expect("valid directive")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let ticks: u64 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(6000);
    let map_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("pathik_map.png"));

    let config = PathikConfig::load_default()?;
    let rectifier = Rectifier::new(&config.perception)?;
    let ppm = config.perception.pixels_per_meter;
    let mut core = RoverCore::new(config.clone())?;

    let (cx, cy) = ARENA_CENTER;
    let mut vehicle = VehicleState::new(
        Pose::new(cx, cy, 0.0),
        config.decision.velocity_history_len,
    );
    let mut arena = Arena::new();
    let mut pickup_timer: Option<(usize, u32)> = None;

    info!(
        "Synthetic mission: {} ticks, {} rocks, arena radius {} m",
        ticks,
        arena.rocks.len(),
        ARENA_RADIUS
    );

    for tick in 0..ticks {
        let nearest = arena.nearest_rock(vehicle.pose.x, vehicle.pose.y);
        vehicle.near_sample = nearest.is_some_and(|(_, d)| d < NEAR_SAMPLE_RADIUS);

        let frame = arena.render(&rectifier, &vehicle.pose, ppm);
        let report = core.step(&mut vehicle, &frame)?;

        if vehicle.send_pickup {
            vehicle.acknowledge_pickup();
            if let Some((rock, _)) = nearest {
                vehicle.picking_up = true;
                pickup_timer = Some((rock, PICKUP_TICKS));
            }
        }
        pickup_timer = match pickup_timer {
            Some((rock, 0)) => {
                arena.rocks.swap_remove(rock);
                vehicle.picking_up = false;
                vehicle.samples_collected += 1;
                info!(
                    "Tick {}: sample {} collected",
                    tick, vehicle.samples_collected
                );
                None
            }
            Some((rock, left)) => Some((rock, left - 1)),
            None => None,
        };

        if vehicle.mission_complete() {
            info!("Mission complete after {} ticks", tick + 1);
            break;
        }
        if tick % 500 == 0 {
            info!(
                "Tick {}: pos ({:.1}, {:.1}) mode {} branch {} known {:.1}%",
                tick,
                vehicle.pose.x,
                vehicle.pose.y,
                vehicle.mode,
                report.branch.name(),
                100.0 * report.coverage.known_fraction(core.map().cell_count())
            );
        }

        drive(&mut vehicle);
    }

    let coverage = core.map().coverage();
    info!(
        "Final map: {} navigable, {} obstacle, {} rock cells; {} samples collected",
        coverage.navigable, coverage.obstacle, coverage.rock, vehicle.samples_collected
    );

    if let Some(parent) = map_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    core.map()
        .to_image()
        .save(&map_path)
        .map_err(|e| PathikError::Io(std::io::Error::other(e)))?;
    info!("World map saved to {:?}", map_path);

    Ok(())
}
