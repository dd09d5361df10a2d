//! Simulation runner on top of the real fixed-step driver.
//!
//! Statistics are tracked externally from the `TickEvent`s each tick
//! drains; the runner never reaches into resolver internals.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::core::constants::FRAME_MS;
use crate::core::{tick, ArenaState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full batch and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(u64::from(run_idx)),
            None => rand::thread_rng().gen(),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stats = simulate_single_run(config, seed, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} (seed {}) - Level {}, {:.0}s, Kills {}, {}",
                run_idx + 1,
                config.num_runs,
                seed,
                stats.final_level,
                stats.survival_ms as f64 / 1000.0,
                stats.kills,
                if stats.died { "died" } else { "timed out" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, config.policy.name())
}

/// Play one run to game over or the step cap.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, seed: u64, rng: &mut R) -> RunStats {
    let mut state = ArenaState::new(config.arena.clone(), rng);
    // Holds are set and cleared explicitly by the autopilot.
    state.input.set_release_events(true);
    let mut pilot = Autopilot::new(config.policy);
    let mut stats = RunStats::new(seed);

    for event in state.drain_events() {
        stats.record(&event, 0);
    }

    while state.tick_count < config.max_ticks_per_run {
        pilot.drive(&mut state, rng);
        let result = tick::tick(&mut state, FRAME_MS);
        for event in &result.events {
            stats.record(event, state.clock_ms);
        }
        if state.is_game_over() {
            break;
        }
    }

    stats.ticks = state.tick_count;
    stats.final_level = state.player.level;
    if !stats.died {
        stats.survival_ms = state.clock_ms;
    }
    log::debug!(
        "run seed={} level={} survived={}ms died={}",
        seed,
        stats.final_level,
        stats.survival_ms,
        stats.died
    );
    stats
}
