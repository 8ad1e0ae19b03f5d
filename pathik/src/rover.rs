//! RoverCore: the per-tick perception and control driver.

use image::RgbImage;
use tracing::{debug, trace};

use crate::config::PathikConfig;
use crate::core::{Commands, DriveMode, VehicleState};
use crate::decision::{Branch, DecisionMaker, GaussianJitter, SteerJitter};
use crate::error::Result;
use crate::map::{MapCoverage, WorldMap, exploration_weights, integrate, return_weights};
use crate::perception::{Rectifier, TerrainThresholds, perceive, vision_image};

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// False when the attitude/pickup gate suppressed the map write.
    pub map_updated: bool,
    /// Navigable pixels in the rectified frame
    pub navigable_pixels: usize,
    /// Rock pixels in the rectified frame
    pub rock_pixels: usize,
    /// Decision branch that produced the commands
    pub branch: Branch,
    /// Mode change made this tick, as (from, to)
    pub transition: Option<(DriveMode, DriveMode)>,
    /// True if this tick raised the pickup request
    pub pickup_requested: bool,
    /// Commands written to the vehicle state
    pub commands: Commands,
    /// Map coverage after the tick
    pub coverage: MapCoverage,
}

/// Perception, mapping and decision for one vehicle.
///
/// Owns the world map and the calibrated rectifier. The vehicle state is
/// owned by the caller and passed in on every tick, so one tick runs to
/// completion before the next begins.
///
/// # Example
///
/// ```ignore
/// let config = PathikConfig::load_default()?;
/// let mut core = RoverCore::new(config.clone())?;
/// let mut vehicle = VehicleState::new(start_pose, config.decision.velocity_history_len);
///
/// loop {
///     vehicle.set_telemetry(pose, speed);
///     let report = core.step(&mut vehicle, &frame)?;
///     actuate(vehicle.commands);
/// }
/// ```
pub struct RoverCore<J: SteerJitter = GaussianJitter> {
    config: PathikConfig,
    rectifier: Rectifier,
    thresholds: TerrainThresholds,
    map: WorldMap,
    decision: DecisionMaker<J>,
    vision: RgbImage,
    ticks: u64,
}

impl RoverCore<GaussianJitter> {
    /// Create a core with Gaussian steering jitter.
    pub fn new(config: PathikConfig) -> Result<Self> {
        let jitter = GaussianJitter::new(config.decision.jitter_seed);
        Self::with_jitter(config, jitter)
    }
}

impl<J: SteerJitter> RoverCore<J> {
    /// Create a core with a caller-supplied jitter source.
    ///
    /// Fails if the configuration is invalid or the calibration points do
    /// not define a perspective transform.
    pub fn with_jitter(config: PathikConfig, jitter: J) -> Result<Self> {
        config.validate()?;
        let rectifier = Rectifier::new(&config.perception)?;
        let thresholds = TerrainThresholds::from(&config.perception);
        let map = WorldMap::new(config.map.world_size);
        let decision = DecisionMaker::with_jitter(config.decision.clone(), jitter);
        let (width, height) = rectifier.dimensions();

        debug!(
            "RoverCore ready: {}x{} frames, {}x{} world map",
            width, height, config.map.world_size, config.map.world_size
        );

        Ok(Self {
            config,
            rectifier,
            thresholds,
            map,
            decision,
            vision: RgbImage::new(width, height),
            ticks: 0,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &PathikConfig {
        &self.config
    }

    /// Get the world map.
    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    /// Diagnostic classification image from the last tick.
    pub fn vision(&self) -> &RgbImage {
        &self.vision
    }

    /// Get the decision maker.
    pub fn decision(&self) -> &DecisionMaker<J> {
        &self.decision
    }

    /// Ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick: perceive the frame, update the map and decide commands.
    ///
    /// Telemetry in `vehicle` must already be current. On return the
    /// perception outputs, mode and commands in `vehicle` are updated.
    ///
    /// Fails only if the frame does not match the calibrated size, in which
    /// case `vehicle` and the map are left untouched.
    pub fn step(&mut self, vehicle: &mut VehicleState, frame: &RgbImage) -> Result<TickReport> {
        let rectified = self.rectifier.warp(frame)?;

        vehicle.record_velocity();

        let snapshot = perceive(
            &rectified,
            &vehicle.pose,
            &self.thresholds,
            self.map.size(),
            self.config.perception.pixels_per_meter,
        );
        self.vision = vision_image(&snapshot.masks);

        let update = integrate(
            &mut self.map,
            &snapshot,
            vehicle,
            self.config.map.attitude_tolerance_deg,
        );

        let navigable = &snapshot.navigable;
        let start = vehicle.start_pos();
        let outputs = &mut vehicle.perception;
        outputs.nav_weights =
            exploration_weights(&self.map, &navigable.world, self.config.map.visit_decay);
        outputs.return_weights = return_weights(
            &navigable.world,
            start,
            self.config.map.return_decay,
        );
        outputs.nav_dists = navigable.polar.dists.clone();
        outputs.nav_angles = navigable.polar.angles.clone();

        // Rock state persists until a decision consumes it
        if let Some(rock) = &snapshot.rock {
            outputs.rock_dists = rock.polar.dists.clone();
            outputs.rock_angles = Some(rock.polar.angles.clone());
        }

        vehicle.counters.survey += 1;
        let outcome = self.decision.decide(vehicle);
        self.ticks += 1;

        let report = TickReport {
            map_updated: update.applied,
            navigable_pixels: navigable.len(),
            rock_pixels: snapshot.rock.as_ref().map_or(0, |rock| rock.len()),
            branch: outcome.branch,
            transition: outcome.transition,
            pickup_requested: outcome.pickup_requested,
            commands: vehicle.commands,
            coverage: self.map.coverage(),
        };

        trace!(
            "Tick {}: nav={} rock={} branch={} mode={} throttle={:.2} brake={:.2} steer={:.2}",
            self.ticks,
            report.navigable_pixels,
            report.rock_pixels,
            report.branch.name(),
            vehicle.mode,
            report.commands.throttle,
            report.commands.brake,
            report.commands.steer
        );

        Ok(report)
    }
}
