//! Shared helpers for file locations and logger setup.

pub mod logging;
pub mod persistence;
