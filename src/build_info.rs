//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `arena 0.1.0 (abc1234, 2026-01-31, release)`
pub fn version_string() -> String {
    format!(
        "arena {} ({}, {}, {})",
        VERSION, BUILD_COMMIT, BUILD_DATE, BUILD_PROFILE
    )
}
