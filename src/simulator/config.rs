//! Simulation configuration.

use crate::core::ArenaConfig;
use crate::progression::UpgradeKind;

/// How the autopilot answers a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradePolicy {
    /// Cycle through the five upgrades in menu order.
    RoundRobin,
    /// Take the same upgrade every time.
    Always(UpgradeKind),
    /// Heal up when hurt, otherwise alternate attack and speed.
    Balanced,
}

impl UpgradePolicy {
    /// Parse `round-robin`, `balanced` or an upgrade short name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "round-robin" | "rr" => Some(Self::RoundRobin),
            "balanced" => Some(Self::Balanced),
            other => UpgradeKind::from_short_name(other).map(Self::Always),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::RoundRobin => "round-robin".to_string(),
            Self::Always(kind) => format!("always-{}", kind.short_name()),
            Self::Balanced => "balanced".to_string(),
        }
    }
}

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to perform
    pub num_runs: u32,

    /// Base seed; run `i` uses `seed + i` (wrapping). None = entropy.
    pub seed: Option<u64>,

    /// Step cap per run (16ms each) before the run counts as a timeout
    pub max_ticks_per_run: u64,

    pub policy: UpgradePolicy,

    /// Game rules the runs are played under
    pub arena: ArenaConfig,

    /// 0 = silent, 1 = summary, 2 = one line per run
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            // Ten simulated minutes
            max_ticks_per_run: 37_500,
            policy: UpgradePolicy::RoundRobin,
            arena: ArenaConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small reproducible batch for smoke tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 3,
            seed: Some(seed),
            max_ticks_per_run: 5_000,
            verbosity: 0,
            ..Default::default()
        }
    }
}
