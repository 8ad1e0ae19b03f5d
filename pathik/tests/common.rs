//! Test utilities for Pathik integration tests.
//!
//! Synthetic camera frames and vehicle builders.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use pathik::{FixedJitter, PathikConfig, Pose, RoverCore, VehicleState, VelocityHistory};

pub const FRAME_WIDTH: u32 = 320;
pub const FRAME_HEIGHT: u32 = 160;

/// Sandy ground, above the navigable threshold on every channel.
pub const GROUND: Rgb<u8> = Rgb([200, 180, 170]);
/// Yellow sample rock.
pub const ROCK: Rgb<u8> = Rgb([200, 180, 20]);
/// Dark rock wall.
pub const WALL: Rgb<u8> = Rgb([60, 50, 40]);

/// Frame filled with open ground.
pub fn ground_frame() -> RgbImage {
    RgbImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, GROUND)
}

/// Frame with no navigable terrain.
pub fn wall_frame() -> RgbImage {
    RgbImage::from_pixel(FRAME_WIDTH, FRAME_HEIGHT, WALL)
}

/// Ground with walls left of `split` columns.
pub fn split_frame(split: u32) -> RgbImage {
    RgbImage::from_fn(FRAME_WIDTH, FRAME_HEIGHT, |x, _| {
        if x < split { WALL } else { GROUND }
    })
}

/// Ground with a sample rock just ahead of the vehicle.
pub fn rock_frame() -> RgbImage {
    let mut frame = ground_frame();
    for y in 85..120 {
        for x in 130..190 {
            frame.put_pixel(x, y, ROCK);
        }
    }
    frame
}

/// Core with zero steering jitter.
pub fn deterministic_core(config: PathikConfig) -> RoverCore<FixedJitter> {
    RoverCore::with_jitter(config, FixedJitter(0.0)).expect("default calibration is valid")
}

/// Vehicle at `(x, y)` with a full history of healthy speed.
pub fn moving_vehicle(x: f32, y: f32) -> VehicleState {
    let mut vehicle = VehicleState::new(Pose::new(x, y, 0.0), 60);
    vehicle.vel_history = VelocityHistory::filled(60, 1.0);
    vehicle.vel = 1.0;
    vehicle
}

/// Vehicle at `(x, y)` that has just started, at rest.
pub fn parked_vehicle(x: f32, y: f32) -> VehicleState {
    VehicleState::new(Pose::new(x, y, 0.0), 60)
}
