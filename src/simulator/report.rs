//! Per-run statistics and the aggregated report.

use crate::core::constants::MAX_LEVEL;
use crate::core::TickEvent;
use serde::Serialize;

/// Statistics for one run, accumulated from `TickEvent`s.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub final_level: u32,
    pub died: bool,
    pub survival_ms: u64,
    pub ticks: u64,
    pub kills: u64,
    pub waves: u32,
    pub hits_taken: u64,
    pub damage_taken: u64,
    pub hearts_dropped: u64,
    pub hearts_picked: u64,
    pub hearts_expired: u64,
    pub hp_healed: u64,
    pub upgrades_taken: u32,
    /// Simulated ms at which level `i + 2` was reached.
    pub level_up_ms: Vec<u64>,
}

impl RunStats {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            final_level: 1,
            ..Default::default()
        }
    }

    /// Fold one event in. `clock_ms` is the simulated time it was drained at.
    pub fn record(&mut self, event: &TickEvent, clock_ms: u64) {
        match event {
            TickEvent::WaveSpawned { .. } => self.waves += 1,
            TickEvent::MonsterKilled { .. } => self.kills += 1,
            TickEvent::PlayerHit { damage, .. } => {
                self.hits_taken += 1;
                self.damage_taken += u64::from(*damage);
            }
            TickEvent::HeartDropped => self.hearts_dropped += 1,
            TickEvent::HeartPickedUp { healed } => {
                self.hearts_picked += 1;
                self.hp_healed += u64::from(*healed);
            }
            TickEvent::HeartExpired => self.hearts_expired += 1,
            TickEvent::LeveledUp { new_level } => {
                self.final_level = *new_level;
                self.level_up_ms.push(clock_ms);
            }
            TickEvent::UpgradeApplied { .. } => self.upgrades_taken += 1,
            TickEvent::GameOver { .. } => {
                self.died = true;
                self.survival_ms = clock_ms;
            }
            TickEvent::PlayerAttack { .. } | TickEvent::Restarted => {}
        }
    }
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub policy: String,
    pub num_runs: u32,
    pub runs_died: u32,
    pub runs_timed_out: u32,

    pub avg_final_level: f64,
    pub min_final_level: u32,
    pub max_final_level: u32,

    pub avg_survival_secs: f64,
    pub min_survival_secs: f64,
    pub max_survival_secs: f64,

    pub avg_kills: f64,
    pub avg_waves: f64,
    pub avg_damage_taken: f64,
    pub avg_hearts_picked: f64,
    pub avg_hp_healed: f64,

    /// Mean seconds to reach level `i + 2`, over the runs that reached it.
    pub avg_level_up_secs: Vec<f64>,
    /// Fraction of runs that reached level `i + 2`.
    pub level_reach_rate: Vec<f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, policy: String) -> Self {
        let n = runs.len();
        let runs_died = runs.iter().filter(|r| r.died).count() as u32;
        let secs = |r: &RunStats| r.survival_ms as f64 / 1000.0;

        let mut avg_level_up_secs = Vec::new();
        let mut level_reach_rate = Vec::new();
        for idx in 0..(MAX_LEVEL as usize - 1) {
            let reached: Vec<u64> = runs
                .iter()
                .filter_map(|r| r.level_up_ms.get(idx).copied())
                .collect();
            if reached.is_empty() {
                break;
            }
            avg_level_up_secs.push(mean(reached.iter().map(|&ms| ms as f64 / 1000.0), reached.len()));
            level_reach_rate.push(reached.len() as f64 / n as f64);
        }

        Self {
            policy,
            num_runs: n as u32,
            runs_died,
            runs_timed_out: n as u32 - runs_died,
            avg_final_level: mean(runs.iter().map(|r| f64::from(r.final_level)), n),
            min_final_level: runs.iter().map(|r| r.final_level).min().unwrap_or(0),
            max_final_level: runs.iter().map(|r| r.final_level).max().unwrap_or(0),
            avg_survival_secs: mean(runs.iter().map(secs), n),
            min_survival_secs: runs.iter().map(secs).reduce(f64::min).unwrap_or(0.0),
            max_survival_secs: runs.iter().map(secs).reduce(f64::max).unwrap_or(0.0),
            avg_kills: mean(runs.iter().map(|r| r.kills as f64), n),
            avg_waves: mean(runs.iter().map(|r| f64::from(r.waves)), n),
            avg_damage_taken: mean(runs.iter().map(|r| r.damage_taken as f64), n),
            avg_hearts_picked: mean(runs.iter().map(|r| r.hearts_picked as f64), n),
            avg_hp_healed: mean(runs.iter().map(|r| r.hp_healed as f64), n),
            avg_level_up_secs,
            level_reach_rate,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                     ARENA BALANCE REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} died, {} timed out (policy: {})\n\n",
            self.num_runs, self.runs_died, self.runs_timed_out, self.policy
        ));

        report.push_str("── SURVIVAL ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Final Level:   avg {:.1}  min {}  max {}\n",
            self.avg_final_level, self.min_final_level, self.max_final_level
        ));
        report.push_str(&format!(
            "  Survival:      avg {:.0}s  min {:.0}s  max {:.0}s\n",
            self.avg_survival_secs, self.min_survival_secs, self.max_survival_secs
        ));
        report.push_str(&format!("  Kills:         avg {:.1}\n", self.avg_kills));
        report.push_str(&format!("  Waves:         avg {:.1}\n\n", self.avg_waves));

        report.push_str("── SUSTAIN ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Damage Taken:  avg {:.0}\n",
            self.avg_damage_taken
        ));
        report.push_str(&format!(
            "  Hearts Picked: avg {:.1} ({:.0} hp)\n\n",
            self.avg_hearts_picked, self.avg_hp_healed
        ));

        report.push_str("── LEVEL PACING ─────────────────────────────────────────────────\n");
        report.push_str("  Level   Reached   Avg Time\n");
        for (i, (secs, rate)) in self
            .avg_level_up_secs
            .iter()
            .zip(&self.level_reach_rate)
            .enumerate()
        {
            let bar: String = "█".repeat((rate * 20.0) as usize);
            report.push_str(&format!(
                "  {:5}   {:>6.1}%   {:>6.0}s  {}\n",
                i + 2,
                rate * 100.0,
                secs,
                bar
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
