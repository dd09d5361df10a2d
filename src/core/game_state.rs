//! The simulation context: every piece of mutable game state in one struct.
//!
//! Owned by the driver (the terminal frontend or the simulator) and passed
//! by `&mut` to each resolver. There is no ambient global state.

use crate::core::config::ArenaConfig;
use crate::core::events::TickEvent;
use crate::entities::{Heart, Monster, Player};
use crate::input::HeldInput;
use rand::Rng;

/// Top-level game phase.
///
/// `UpgradePending` gates player movement and attacks while monsters keep
/// acting. `GameOver` freezes everything until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Playing,
    UpgradePending,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct ArenaState {
    pub config: ArenaConfig,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub hearts: Vec<Heart>,
    pub phase: Phase,
    pub input: HeldInput,

    // Timing
    /// Simulated milliseconds since the run started. Advances 16ms per step.
    pub clock_ms: u64,
    /// Steps since the run started.
    pub tick_count: u64,
    /// Wall-clock remainder not yet consumed by a full step.
    pub accumulated_time_ms: u64,
    /// Simulated time of the last successful player attack.
    pub last_attack_at: Option<u64>,

    // Run statistics
    pub wave: u32,
    pub kills: u64,

    /// Pending events, drained by the frontend each frame.
    pub events: Vec<TickEvent>,
}

impl ArenaState {
    /// A fresh run with the first wave already spawned.
    pub fn new<R: Rng>(config: ArenaConfig, rng: &mut R) -> Self {
        let mut state = Self::empty(config);
        crate::spawner::spawn_wave(&mut state, rng);
        state
    }

    /// A fresh run with no monsters on the field.
    pub fn empty(config: ArenaConfig) -> Self {
        let player = Player::new(&config);
        Self {
            config,
            player,
            monsters: Vec::new(),
            hearts: Vec::new(),
            phase: Phase::Playing,
            input: HeldInput::default(),
            clock_ms: 0,
            tick_count: 0,
            accumulated_time_ms: 0,
            last_attack_at: None,
            wave: 0,
            kills: 0,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_upgrade_pending(&self) -> bool {
        self.phase == Phase::UpgradePending
    }

    /// XP bar fill for the UI.
    pub fn xp_ratio(&self) -> f64 {
        self.player.xp_ratio()
    }

    pub fn push_event(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter the terminal game-over phase. Clears any pending upgrade.
    pub fn trigger_game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.input.clear();
        log::info!(
            "game over: level {} after {} kills at {}ms",
            self.player.level,
            self.kills,
            self.clock_ms
        );
        self.push_event(TickEvent::GameOver {
            level: self.player.level,
        });
    }
}
