//! Decision state machine.
//!
//! # State Machine
//!
//! ```text
//!                    ┌─────────────────────────────────────────┐
//!  every tick ──────▶│ stuck? (mean |v| over window ≤ 0.2)     │──yes──▶ 160-tick escape cycle
//!                    └──────────────────┬──────────────────────┘         reverse → right → lunge → left
//!                                       │ no
//!                     all samples? ─────┼───── no ──▶ rock of interest? ──yes──▶ pickup / chase / approach
//!                          │ yes        │                  │ no
//!                          ▼            │                  ▼
//!                  home? ──yes──▶ brake │        explore (exploration weights,
//!                          │ no         │        jitter, periodic turn-and-scan)
//!                          ▼            │
//!                  return (return weights)
//!
//!  Terrain navigation modes (explore and return):
//!
//!    ┌─────────┐  nav < stop_forward   ┌──────┐
//!    │ Forward │ ────────────────────▶ │ Stop │
//!    │         │ ◀──────────────────── │      │
//!    └─────────┘  v ≤ 0.2 and          └──────┘
//!         ▲       nav ≥ go_forward
//!         │
//!    ┌────┴───┐
//!    │ Sample │  (falls through to Forward)
//!    └────────┘
//! ```
//!
//! The supervisor layer (stuck detection) preempts every mode. Steering
//! jitter comes from an injectable [`SteerJitter`] so tests can pin it.

mod jitter;
mod machine;
mod state;

pub use jitter::{FixedJitter, GaussianJitter, SteerJitter};
pub use machine::DecisionMaker;
pub use state::{Branch, DecisionOutcome, StuckPhase};
