//! Arena - tiered survival arena simulation library
//!
//! The simulation core (`core`, `entities`, resolvers) is UI-agnostic and
//! driven by explicit `ArenaState` plus an injected RNG. The terminal
//! frontend and the balance simulator are thin drivers on top.

pub mod assets;
pub mod build_info;
pub mod combat;
pub mod core;
pub mod entities;
pub mod input;
pub mod movement;
pub mod pickups;
pub mod progression;
pub mod simulator;
pub mod spawner;
pub mod ui;
pub mod utils;
