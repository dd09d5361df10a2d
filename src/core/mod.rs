//! Simulation context, configuration and the fixed-step driver.

pub mod config;
pub mod constants;
pub mod events;
pub mod game_state;
pub mod tick;

pub use config::{ArenaConfig, ConfigError};
pub use events::{TickEvent, TickResult};
pub use game_state::{ArenaState, Phase};
