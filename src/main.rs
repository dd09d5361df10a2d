use arena::assets::AssetCatalog;
use arena::build_info;
use arena::core::constants::FRAME_MS;
use arena::core::{tick, ArenaConfig, ArenaState, TickEvent};
use arena::input::{InputHandler, InputResult};
use arena::ui::{self, EventLog};
use arena::utils::logging;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

struct Options {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn print_help() {
    println!("Arena - tiered survival in the terminal\n");
    println!("Usage: arena [options]\n");
    println!("Options:");
    println!("  --seed <n>       Seed the RNG for a reproducible run");
    println!("  --config <path>  Load rules from a JSON file (default: ~/.arena/config.json)");
    println!("  --version        Show version information");
    println!("  --help           Show this help message\n");
    println!("Controls:");
    println!("  WASD / arrows    Move");
    println!("  Space / K        Attack");
    println!("  1-5              Pick an upgrade after leveling up");
    println!("  R                Restart after game over");
    println!("  Esc / Q (twice)  Quit");
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        seed: None,
        config_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" if i + 1 < args.len() => {
                match args[i + 1].parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i + 1]);
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" if i + 1 < args.len() => {
                options.config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'arena --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let log_path = match logging::init_file_logger() {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let config = match ArenaConfig::load_or_default(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let catalog = AssetCatalog::load(None);
    log::info!(
        "starting {} (seed {:?}, {} sprites ready)",
        build_info::version_string(),
        options.seed,
        catalog.ready_count()
    );

    let mut state = ArenaState::new(config, &mut rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    state.input.set_release_events(release_events);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &mut state, &mut rng, &catalog);

    // Cleanup terminal
    if release_events {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    println!(
        "Reached level {} with {} kills.",
        state.player.level, state.kills
    );
    if let Some(path) = log_path {
        println!("Log: {}", path.display());
    }
    Ok(())
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut ArenaState,
    rng: &mut ChaCha8Rng,
    catalog: &AssetCatalog,
) -> io::Result<()> {
    let mut handler = InputHandler::new();
    let mut log = EventLog::default();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, state, catalog, &log, handler.quit_pending))?;

        // Drain every pending key so held directions stay fresh.
        if event::poll(Duration::from_millis(FRAME_MS))? {
            loop {
                if let Event::Key(key) = event::read()? {
                    if handler.handle_key(state, key, rng) == InputResult::Quit {
                        log::info!("quit at level {}", state.player.level);
                        return Ok(());
                    }
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;

        let result = tick::tick(state, dt_ms);
        for event in &result.events {
            if *event == TickEvent::Restarted {
                log.clear();
            }
            log.push(event);
        }
    }
}
