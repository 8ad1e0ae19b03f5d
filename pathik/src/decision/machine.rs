//! Decision maker: maps vehicle state and perception outputs to commands.

use tracing::{debug, info};

use super::jitter::{GaussianJitter, SteerJitter};
use super::state::{Branch, DecisionOutcome, StuckPhase};
use crate::config::DecisionConfig;
use crate::core::{DriveMode, VehicleState};
use crate::map::weighted_heading_deg;
use crate::perception::transform::mean;

/// Which weight set steers terrain navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Goal {
    Explore,
    Return,
}

/// Per-tick decision state machine.
///
/// Holds only configuration, the jitter source and a logging flag; all
/// mission state lives in [`VehicleState`].
pub struct DecisionMaker<J: SteerJitter = GaussianJitter> {
    config: DecisionConfig,
    jitter: J,
    stuck: bool,
}

impl DecisionMaker<GaussianJitter> {
    /// Create a decision maker with Gaussian jitter seeded from the config.
    pub fn new(config: DecisionConfig) -> Self {
        let jitter = GaussianJitter::new(config.jitter_seed);
        Self::with_jitter(config, jitter)
    }
}

impl<J: SteerJitter> DecisionMaker<J> {
    /// Create a decision maker with a caller-supplied jitter source.
    pub fn with_jitter(config: DecisionConfig, jitter: J) -> Self {
        Self {
            config,
            jitter,
            stuck: false,
        }
    }

    /// Get the decision configuration.
    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// True while the last decision was made in the stuck escape cycle.
    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Run one decision step, writing commands and mode into `vehicle`.
    ///
    /// Commands not written by the chosen branch keep their previous value.
    /// Steering is always clamped to `±max_steer` on return.
    pub fn decide(&mut self, vehicle: &mut VehicleState) -> DecisionOutcome {
        let mode_before = vehicle.mode;
        let pickup_before = vehicle.send_pickup;

        let branch = match self.stuck_recovery(vehicle) {
            Some(phase) => Branch::Stuck(phase),
            None if vehicle.samples_collected >= self.config.total_samples => {
                self.return_home(vehicle)
            }
            None => self.seek_samples(vehicle),
        };

        vehicle.commands.clamp_steer(self.config.max_steer);

        let transition = (vehicle.mode != mode_before).then(|| {
            debug!("Mode {} → {} ({})", mode_before, vehicle.mode, branch.name());
            (mode_before, vehicle.mode)
        });

        DecisionOutcome {
            branch,
            transition,
            pickup_requested: vehicle.send_pickup && !pickup_before,
        }
    }

    /// Open-loop escape cycle, preempting everything else while the mean
    /// absolute speed over a full window stays at or below `stuck_speed`.
    fn stuck_recovery(&mut self, vehicle: &mut VehicleState) -> Option<StuckPhase> {
        let mean_speed = vehicle.vel_history.window_mean_abs();
        let stuck = mean_speed.is_some_and(|speed| speed <= self.config.stuck_speed);

        if stuck != self.stuck {
            if stuck {
                info!(
                    "Stuck detected (mean speed {:.3}), starting escape cycle at tick {}",
                    mean_speed.unwrap_or_default(),
                    vehicle.counters.stuck
                );
            } else {
                info!("Vehicle moving again, leaving escape cycle");
            }
            self.stuck = stuck;
        }
        if !stuck {
            return None;
        }

        let cycle = self.config.stuck_cycle_ticks;
        let phase = StuckPhase::at(vehicle.counters.stuck, cycle);
        vehicle.counters.stuck += 1;

        let lunge = self.config.stuck_throttle_gain * self.config.throttle_set;
        let commands = &mut vehicle.commands;
        match phase {
            StuckPhase::Reverse => commands.throttle = -lunge,
            StuckPhase::TurnRight => {
                commands.throttle = 0.0;
                commands.steer = -self.config.max_steer;
            }
            StuckPhase::Lunge => commands.throttle = lunge,
            StuckPhase::TurnLeft => {
                commands.throttle = 0.0;
                commands.steer = self.config.max_steer;
            }
        }
        Some(phase)
    }

    /// All samples collected: hold at the start or navigate back to it.
    fn return_home(&mut self, vehicle: &mut VehicleState) -> Branch {
        if vehicle.distance_to_start() < self.config.home_radius {
            vehicle.commands.brake = self.config.brake_set;
            vehicle.commands.throttle = 0.0;
            if vehicle.mark_mission_complete() {
                info!(
                    "Mission complete: {} samples returned to ({:.1}, {:.1})",
                    vehicle.samples_collected,
                    vehicle.start_pos().0,
                    vehicle.start_pos().1
                );
            }
            return Branch::Home;
        }
        self.navigate(vehicle, Goal::Return)
    }

    /// Samples outstanding: go after a rock of interest, otherwise explore.
    fn seek_samples(&mut self, vehicle: &mut VehicleState) -> Branch {
        let rock_in_view = vehicle
            .perception
            .rock_angles
            .as_ref()
            .is_some_and(|angles| angles.len() >= self.config.toward_rock);
        if !rock_in_view && !vehicle.near_sample {
            return self.navigate(vehicle, Goal::Explore);
        }

        if vehicle.near_sample {
            if vehicle.picking_up {
                return Branch::AwaitPickup;
            }
            vehicle.mode = DriveMode::Sample;
            vehicle.perception.clear_rock();
            vehicle.commands.throttle = 0.0;
            vehicle.commands.brake = self.config.brake_set;
            if vehicle.vel == 0.0 && !vehicle.send_pickup {
                vehicle.send_pickup = true;
                info!(
                    "Pickup requested at ({:.1}, {:.1}), {} samples so far",
                    vehicle.pose.x, vehicle.pose.y, vehicle.samples_collected
                );
            }
            return Branch::Pickup;
        }

        let rock_dist = mean(&vehicle.perception.rock_dists);
        let rock_angle = vehicle
            .perception
            .rock_angles
            .as_deref()
            .and_then(mean)
            .map(f32::to_degrees);
        let (Some(rock_dist), Some(rock_angle)) = (rock_dist, rock_angle) else {
            debug!(
                "Rock headings without distances ({} headings, {} distances)",
                vehicle.perception.rock_count(),
                vehicle.perception.rock_dists.len()
            );
            return Branch::RockUnranged;
        };
        let aim = rock_angle.clamp(-self.config.max_steer, self.config.max_steer);

        let branch = if rock_dist >= self.config.stop_dist_rock {
            let commands = &mut vehicle.commands;
            commands.steer = aim;
            commands.throttle = self.cruise_throttle(vehicle.vel);
            Branch::ChaseRock
        } else {
            vehicle.mode = DriveMode::Sample;
            let commands = &mut vehicle.commands;
            if (commands.steer - rock_angle).abs() <= self.config.rock_aim_tolerance {
                if vehicle.vel > self.config.rock_approach_speed {
                    commands.brake = self.config.brake_set;
                    commands.throttle = 0.0;
                } else {
                    commands.brake = 0.0;
                    commands.throttle = self.config.throttle_set;
                }
            } else if vehicle.vel > 0.0 {
                commands.brake = self.config.brake_set;
            } else {
                // Stationary and off target: release and turn onto it
                commands.throttle = 0.0;
                commands.brake = 0.0;
                commands.steer = aim;
            }
            Branch::ApproachRock
        };
        vehicle.perception.clear_rock_angles();
        branch
    }

    /// Terrain navigation through the Forward/Stop modes.
    fn navigate(&mut self, vehicle: &mut VehicleState, goal: Goal) -> Branch {
        let nav_count = vehicle.perception.nav_count();
        if nav_count == 0 {
            vehicle.commands.throttle = 0.0;
            vehicle.commands.steer = -self.config.max_steer;
            vehicle.commands.brake = 0.0;
            return Branch::NoTerrain;
        }

        let travelling = match goal {
            Goal::Explore => Branch::Explore,
            Goal::Return => Branch::Return,
        };

        match vehicle.mode {
            DriveMode::Sample => {
                vehicle.mode = DriveMode::Forward;
                travelling
            }
            DriveMode::Forward if nav_count >= self.config.stop_forward => {
                if goal == Goal::Explore && self.survey_active(vehicle.counters.survey) {
                    self.survey(vehicle);
                    return Branch::Survey;
                }
                vehicle.commands.throttle = self.cruise_throttle(vehicle.vel);
                vehicle.commands.brake = 0.0;
                vehicle.commands.steer = self.heading(vehicle, goal);
                travelling
            }
            DriveMode::Forward => {
                vehicle.commands.throttle = 0.0;
                vehicle.commands.brake = self.config.brake_set;
                vehicle.commands.steer = 0.0;
                vehicle.mode = DriveMode::Stop;
                travelling
            }
            DriveMode::Stop if vehicle.vel > self.config.stop_speed => {
                vehicle.commands.throttle = 0.0;
                vehicle.commands.brake = self.config.brake_set;
                vehicle.commands.steer = 0.0;
                travelling
            }
            DriveMode::Stop if nav_count < self.config.go_forward => {
                // Turn in place until enough open terrain is in view
                vehicle.commands.throttle = 0.0;
                vehicle.commands.brake = 0.0;
                vehicle.commands.steer = -self.config.max_steer;
                travelling
            }
            DriveMode::Stop => {
                vehicle.commands.throttle = self.config.throttle_set;
                vehicle.commands.brake = 0.0;
                vehicle.commands.steer = self.heading(vehicle, goal);
                vehicle.mode = DriveMode::Forward;
                travelling
            }
        }
    }

    /// Weighted heading for the goal, with jitter while exploring.
    fn heading(&mut self, vehicle: &VehicleState, goal: Goal) -> f32 {
        let perception = &vehicle.perception;
        let max = self.config.max_steer;
        match goal {
            Goal::Return => weighted_heading_deg(
                perception.return_weights.as_deref(),
                &perception.nav_angles,
            )
            .clamp(-max, max),
            Goal::Explore => {
                let average = weighted_heading_deg(
                    perception.nav_weights.as_deref(),
                    &perception.nav_angles,
                );
                let bias = self.config.jitter_gain * average.abs();
                (average + bias * self.jitter.sample()).clamp(-max, max)
            }
        }
    }

    fn cruise_throttle(&self, vel: f32) -> f32 {
        if vel < self.config.max_vel {
            self.config.throttle_set
        } else {
            0.0
        }
    }

    fn survey_active(&self, survey_tick: u64) -> bool {
        let phase = survey_tick % self.config.survey_period_ticks.max(1);
        if phase == self.config.survey_start_tick {
            debug!("Starting turn-and-scan survey at tick {}", survey_tick);
        }
        phase >= self.config.survey_start_tick
    }

    /// Turn-and-scan: bleed off speed, then turn in place.
    fn survey(&self, vehicle: &mut VehicleState) {
        let commands = &mut vehicle.commands;
        commands.throttle = 0.0;
        if vehicle.vel > 0.0 {
            commands.brake = self.config.survey_brake_factor * self.config.brake_set;
        } else {
            commands.brake = 0.0;
            commands.steer = self.config.survey_turn_sign * self.config.max_steer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Pose, VelocityHistory};
    use crate::decision::FixedJitter;

    fn maker() -> DecisionMaker<FixedJitter> {
        DecisionMaker::with_jitter(DecisionConfig::default(), FixedJitter(0.0))
    }

    /// Vehicle with a full history of healthy speed, so it is never stuck.
    fn moving_vehicle() -> VehicleState {
        let mut vehicle = VehicleState::new(Pose::new(100.0, 100.0, 0.0), 60);
        vehicle.vel_history = VelocityHistory::filled(60, 1.0);
        vehicle.vel = 1.0;
        vehicle
    }

    fn with_terrain(vehicle: &mut VehicleState, count: usize, angle_deg: f32) {
        let angle = angle_deg.to_radians();
        vehicle.perception.nav_angles = vec![angle; count];
        vehicle.perception.nav_dists = vec![50.0; count];
        let uniform = vec![1.0 / count as f32; count];
        vehicle.perception.nav_weights = Some(uniform.clone());
        vehicle.perception.return_weights = Some(uniform);
    }

    #[test]
    fn test_stuck_turn_phase() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel_history = VelocityHistory::filled(60, 0.1);
        vehicle.counters.stuck = 45;
        with_terrain(&mut vehicle, 1000, 5.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::Stuck(StuckPhase::TurnRight));
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.steer, -15.0);
        assert_eq!(vehicle.counters.stuck, 46);
        assert!(maker.is_stuck());
    }

    #[test]
    fn test_stuck_reverse_and_lunge() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel_history = VelocityHistory::filled(60, 0.0);

        maker.decide(&mut vehicle);
        assert!((vehicle.commands.throttle + 0.8).abs() < 1e-6);

        vehicle.counters.stuck = 100;
        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Stuck(StuckPhase::Lunge));
        assert!((vehicle.commands.throttle - 0.8).abs() < 1e-6);

        vehicle.counters.stuck = 130;
        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.steer, 15.0);
    }

    #[test]
    fn test_partial_history_never_stuck() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel_history = VelocityHistory::new(60);
        vehicle.vel_history.push(0.0);
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Explore);
        assert_eq!(vehicle.counters.stuck, 0);
    }

    #[test]
    fn test_mission_complete_at_start() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.samples_collected = 6;
        vehicle.commands.throttle = 0.2;
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::Home);
        assert_eq!(outcome.transition, None);
        assert_eq!(vehicle.commands.brake, 10.0);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert!(vehicle.mission_complete());

        // Latched; stays home
        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Home);
    }

    #[test]
    fn test_return_uses_return_weights_without_jitter() {
        let mut maker = DecisionMaker::with_jitter(DecisionConfig::default(), FixedJitter(3.0));
        let mut vehicle = moving_vehicle();
        vehicle.samples_collected = 6;
        vehicle.pose = Pose::new(150.0, 100.0, 0.0);
        vehicle.perception.nav_angles = vec![0.0, 10f32.to_radians()];
        vehicle.perception.nav_dists = vec![10.0, 10.0];
        vehicle.perception.nav_weights = Some(vec![1.0, 0.0]);
        vehicle.perception.return_weights = Some(vec![0.0, 1.0]);
        maker.config.stop_forward = 1;

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::Return);
        assert!((vehicle.commands.steer - 10.0).abs() < 1e-4);
        assert!(!vehicle.mission_complete());
    }

    #[test]
    fn test_forward_drives_along_weighted_heading() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        with_terrain(&mut vehicle, 1000, 8.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::Explore);
        assert_eq!(outcome.transition, None);
        assert_eq!(vehicle.commands.throttle, 0.2);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert!((vehicle.commands.steer - 8.0).abs() < 1e-3);
    }

    #[test]
    fn test_forward_coasts_at_max_velocity() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 2.0;
        with_terrain(&mut vehicle, 1000, 0.0);

        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.throttle, 0.0);
    }

    #[test]
    fn test_jitter_scales_with_heading() {
        let mut maker = DecisionMaker::with_jitter(DecisionConfig::default(), FixedJitter(1.0));
        let mut vehicle = moving_vehicle();
        with_terrain(&mut vehicle, 1000, 10.0);

        maker.decide(&mut vehicle);

        // 10 + 0.3 * 10 * 1.0
        assert!((vehicle.commands.steer - 13.0).abs() < 1e-3);
    }

    #[test]
    fn test_steer_clamped() {
        let mut maker = DecisionMaker::with_jitter(DecisionConfig::default(), FixedJitter(5.0));
        let mut vehicle = moving_vehicle();
        with_terrain(&mut vehicle, 1000, 40.0);

        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.steer, 15.0);
    }

    #[test]
    fn test_forward_to_stop_on_sparse_terrain() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        with_terrain(&mut vehicle, 20, 0.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.transition, Some((DriveMode::Forward, DriveMode::Stop)));
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.brake, 10.0);
        assert_eq!(vehicle.commands.steer, 0.0);
    }

    #[test]
    fn test_stop_turns_in_place() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.mode = DriveMode::Stop;
        vehicle.vel = 0.1;
        with_terrain(&mut vehicle, 100, 0.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.transition, None);
        assert_eq!(vehicle.mode, DriveMode::Stop);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert_eq!(vehicle.commands.steer, -15.0);
    }

    #[test]
    fn test_stop_keeps_braking_while_moving() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.mode = DriveMode::Stop;
        vehicle.vel = 0.5;
        with_terrain(&mut vehicle, 1000, 0.0);

        maker.decide(&mut vehicle);
        assert_eq!(vehicle.mode, DriveMode::Stop);
        assert_eq!(vehicle.commands.brake, 10.0);
    }

    #[test]
    fn test_stop_to_forward_with_open_terrain() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.mode = DriveMode::Stop;
        vehicle.vel = 0.0;
        with_terrain(&mut vehicle, 600, -4.0);

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.transition, Some((DriveMode::Stop, DriveMode::Forward)));
        assert_eq!(vehicle.commands.throttle, 0.2);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert!((vehicle.commands.steer + 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_sample_mode_falls_through_to_forward() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.mode = DriveMode::Sample;
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.transition, Some((DriveMode::Sample, DriveMode::Forward)));
    }

    #[test]
    fn test_no_terrain_fallback() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.commands.brake = 10.0;

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::NoTerrain);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert_eq!(vehicle.commands.steer, -15.0);
    }

    #[test]
    fn test_missing_weights_steer_straight() {
        let mut maker = DecisionMaker::with_jitter(DecisionConfig::default(), FixedJitter(2.0));
        let mut vehicle = moving_vehicle();
        with_terrain(&mut vehicle, 1000, 10.0);
        vehicle.perception.nav_weights = None;

        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.steer, 0.0);
    }

    #[test]
    fn test_survey_brakes_then_turns() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.counters.survey = 2950;
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Survey);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert!((vehicle.commands.brake - 1.0).abs() < 1e-6);

        vehicle.vel = 0.0;
        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert_eq!(vehicle.commands.steer, 15.0);

        // Next period: back to normal driving
        vehicle.counters.survey = 3001;
        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Explore);
    }

    #[test]
    fn test_no_survey_while_returning() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.samples_collected = 6;
        vehicle.pose = Pose::new(150.0, 100.0, 0.0);
        vehicle.counters.survey = 2950;
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Return);
    }

    #[test]
    fn test_pickup_requested_once() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.near_sample = true;
        vehicle.vel = 0.0;
        vehicle.perception.rock_angles = Some(vec![0.1; 5]);
        vehicle.perception.rock_dists = vec![5.0; 5];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::Pickup);
        assert!(outcome.pickup_requested);
        assert_eq!(vehicle.mode, DriveMode::Sample);
        assert!(vehicle.send_pickup);
        assert!(vehicle.perception.rock_angles.is_none());
        assert!(vehicle.perception.rock_dists.is_empty());
        assert_eq!(vehicle.commands.brake, 10.0);

        // Still raised, not raised again
        let outcome = maker.decide(&mut vehicle);
        assert!(!outcome.pickup_requested);
        assert!(vehicle.send_pickup);
    }

    #[test]
    fn test_pickup_waits_until_stopped() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.near_sample = true;
        vehicle.vel = 0.3;

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Pickup);
        assert!(!vehicle.send_pickup);
        assert_eq!(vehicle.commands.throttle, 0.0);
    }

    #[test]
    fn test_pickup_in_progress_holds() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.near_sample = true;
        vehicle.picking_up = true;
        vehicle.vel = 0.0;

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::AwaitPickup);
        assert!(!vehicle.send_pickup);
    }

    #[test]
    fn test_chase_distant_rock() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.perception.rock_angles = Some(vec![6f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![40.0; 4];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::ChaseRock);
        assert!((vehicle.commands.steer - 6.0).abs() < 1e-3);
        assert_eq!(vehicle.commands.throttle, 0.2);
        assert!(vehicle.perception.rock_angles.is_none());
    }

    #[test]
    fn test_too_few_rock_pixels_ignored() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.perception.rock_angles = Some(vec![0.1; 2]);
        vehicle.perception.rock_dists = vec![40.0; 2];
        with_terrain(&mut vehicle, 1000, 0.0);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::Explore);
    }

    #[test]
    fn test_approach_close_rock_aimed() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 0.5;
        vehicle.commands.steer = 3.0;
        vehicle.perception.rock_angles = Some(vec![3f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![10.0; 4];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::ApproachRock);
        assert_eq!(outcome.transition, Some((DriveMode::Forward, DriveMode::Sample)));
        assert_eq!(vehicle.commands.throttle, 0.2);
        assert_eq!(vehicle.commands.brake, 0.0);
        assert!(vehicle.perception.rock_angles.is_none());
    }

    #[test]
    fn test_approach_close_rock_off_target() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 0.0;
        vehicle.commands.steer = -10.0;
        vehicle.perception.rock_angles = Some(vec![5f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![10.0; 4];

        maker.decide(&mut vehicle);

        assert_eq!(vehicle.commands.brake, 0.0);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert!((vehicle.commands.steer - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_chase_keeps_prior_brake() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.commands.brake = 10.0;
        vehicle.perception.rock_angles = Some(vec![0.0; 4]);
        vehicle.perception.rock_dists = vec![40.0; 4];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::ChaseRock);
        assert_eq!(vehicle.commands.brake, 10.0);
        assert_eq!(vehicle.commands.throttle, 0.2);
    }

    #[test]
    fn test_chase_aim_clamped() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.perception.rock_angles = Some(vec![30f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![40.0; 4];

        maker.decide(&mut vehicle);
        assert_eq!(vehicle.commands.steer, 15.0);
    }

    #[test]
    fn test_approach_aimed_too_fast_brakes() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 1.5;
        vehicle.commands.steer = 3.0;
        vehicle.commands.throttle = 0.2;
        vehicle.perception.rock_angles = Some(vec![3f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![10.0; 4];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::ApproachRock);
        assert_eq!(vehicle.commands.brake, 10.0);
        assert_eq!(vehicle.commands.throttle, 0.0);
    }

    #[test]
    fn test_approach_off_target_moving_only_brakes() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 0.5;
        vehicle.commands.steer = -10.0;
        vehicle.commands.throttle = 0.2;
        vehicle.perception.rock_angles = Some(vec![5f32.to_radians(); 4]);
        vehicle.perception.rock_dists = vec![10.0; 4];

        let outcome = maker.decide(&mut vehicle);

        assert_eq!(outcome.branch, Branch::ApproachRock);
        assert_eq!(vehicle.commands.brake, 10.0);
        assert_eq!(vehicle.commands.throttle, 0.2);
        assert_eq!(vehicle.commands.steer, -10.0);
    }

    #[test]
    fn test_approach_reaim_clamped() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.vel = 0.0;
        vehicle.commands.steer = 0.0;
        vehicle.perception.rock_angles = Some(vec![(-40f32).to_radians(); 4]);
        vehicle.perception.rock_dists = vec![10.0; 4];

        maker.decide(&mut vehicle);

        assert_eq!(vehicle.commands.steer, -15.0);
        assert_eq!(vehicle.commands.throttle, 0.0);
        assert_eq!(vehicle.commands.brake, 0.0);
    }

    #[test]
    fn test_rock_headings_without_distances() {
        let mut maker = maker();
        let mut vehicle = moving_vehicle();
        vehicle.perception.rock_angles = Some(vec![0.1; 4]);

        let outcome = maker.decide(&mut vehicle);
        assert_eq!(outcome.branch, Branch::RockUnranged);
    }
}
