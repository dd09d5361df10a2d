//! Leveling and the upgrade state machine.
//!
//! `Playing -> UpgradePending -> Playing` on every level-up; the upgrade
//! choice also rerolls the wave.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
