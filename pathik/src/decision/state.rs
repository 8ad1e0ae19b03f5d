//! Decision branches and stuck-cycle phases.

use crate::core::DriveMode;

/// Phase of the open-loop stuck escape cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StuckPhase {
    /// Strong reverse throttle
    Reverse,
    /// Coast with steering hard right
    TurnRight,
    /// Strong forward throttle
    Lunge,
    /// Coast with steering hard left
    TurnLeft,
}

impl StuckPhase {
    /// Phase for a position within the cycle.
    ///
    /// The cycle is split into quarters with inclusive upper bounds, so a
    /// 160-tick cycle gives 0–40, 41–80, 81–120 and 121–159.
    pub fn at(index: u64, cycle_ticks: u64) -> Self {
        let quarter = cycle_ticks / 4;
        let index = index % cycle_ticks.max(1);
        if index <= quarter {
            StuckPhase::Reverse
        } else if index <= 2 * quarter {
            StuckPhase::TurnRight
        } else if index <= 3 * quarter {
            StuckPhase::Lunge
        } else {
            StuckPhase::TurnLeft
        }
    }
}

/// Which branch of the decision network produced this tick's commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Stuck escape cycle
    Stuck(StuckPhase),
    /// All samples collected and back at the start
    Home,
    /// All samples collected, driving toward the start
    Return,
    /// Stopping next to a sample and requesting pickup
    Pickup,
    /// Next to a sample while a pickup is already running
    AwaitPickup,
    /// Steering toward a distant rock
    ChaseRock,
    /// Creeping up on a close rock
    ApproachRock,
    /// Rock headings present but no distances to judge them by
    RockUnranged,
    /// Ordinary exploration
    Explore,
    /// Periodic turn-and-scan
    Survey,
    /// No navigable terrain in view
    NoTerrain,
}

impl Branch {
    /// Branch name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Branch::Stuck(_) => "stuck",
            Branch::Home => "home",
            Branch::Return => "return",
            Branch::Pickup => "pickup",
            Branch::AwaitPickup => "await_pickup",
            Branch::ChaseRock => "chase_rock",
            Branch::ApproachRock => "approach_rock",
            Branch::RockUnranged => "rock_unranged",
            Branch::Explore => "explore",
            Branch::Survey => "survey",
            Branch::NoTerrain => "no_terrain",
        }
    }
}

/// Summary of one decision step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub branch: Branch,
    /// Mode change made this tick, as (from, to)
    pub transition: Option<(DriveMode, DriveMode)>,
    /// True if this tick raised the pickup request
    pub pickup_requested: bool,
}
