//! Headless balance simulator.
//!
//! Drives the real fixed-step loop (`core::tick`) with an autopilot in
//! place of a keyboard and aggregates many seeded runs into a report:
//! - How long a run survives
//! - Level reached and level-up pacing
//! - Kills, hearts and damage taken

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::{SimConfig, UpgradePolicy};
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
