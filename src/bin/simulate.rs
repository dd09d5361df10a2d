//! Arena balance simulator CLI.
//!
//! Plays seeded headless runs with an autopilot and reports survival,
//! level pacing and sustain.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 100 runs, round-robin upgrades
//!   cargo run --bin simulate -- -n 500 -p atk      # always take attack
//!   cargo run --bin simulate -- --seed 42 --json   # reproducible, save JSON

use arena::core::ArenaConfig;
use arena::simulator::{run_simulation, SimConfig, UpgradePolicy};
use arena::utils::{logging, persistence};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    logging::init_stderr_logger();

    let args: Vec<String> = env::args().collect();
    let (mut config, config_path) = parse_args(&args);

    if let Some(path) = config_path {
        match ArenaConfig::load(&path) {
            Ok(arena) => config.arena = arena,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if config.verbosity > 0 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                  ARENA BALANCE SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Policy:         {}", config.policy.name());
        println!(
            "  Max Ticks:      {} ({:.0}s)",
            config.max_ticks_per_run,
            config.max_ticks_per_run as f64 * 0.016
        );
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "arena_sim_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match persistence::write_json(Path::new(&filename), &report) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(37_500);
                    i += 1;
                }
            }
            "-p" | "--policy" => {
                if i + 1 < args.len() {
                    match UpgradePolicy::parse(&args[i + 1]) {
                        Some(policy) => config.policy = policy,
                        None => {
                            eprintln!("Unknown policy: {}", args[i + 1]);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(1));
                config.verbosity = 1;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, config_path)
}

fn print_help() {
    println!("Arena Balance Simulator\n");
    println!("Usage: simulate [OPTIONS]\n");
    println!("Options:");
    println!("  -n, --runs <N>       Number of runs (default: 100)");
    println!("  -s, --seed <N>       Base seed; run i uses seed + i");
    println!("  -t, --ticks <N>      Step cap per run, 16ms each (default: 37500)");
    println!("  -p, --policy <P>     round-robin | balanced | atk | hp | def | spd | exp");
    println!("  -c, --config <PATH>  Rules file (JSON), defaults otherwise");
    println!("  -v, --verbose        One line per run");
    println!("  -q, --quiet          Report only");
    println!("      --quick          3 short runs");
    println!("      --json           Also save the report as JSON");
    println!("  -h, --help           Show this help message");
}
