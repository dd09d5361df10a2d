//! Input handling for the arena.
//!
//! Terminals usually report key presses only, never releases, so a held
//! direction is modeled as a flag that stays set for `INPUT_HOLD_TICKS`
//! frames after each press; terminal key-repeat refreshes it. When the
//! terminal can report releases, holds become sticky and a release clears
//! them instead.

use crate::combat;
use crate::core::constants::INPUT_HOLD_TICKS;
use crate::core::game_state::ArenaState;
use crate::core::tick;
use crate::progression::{self, UpgradeKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// Held-direction flags written by the input layer and read by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldInput {
    held: [bool; 4],
    hold_ticks: [u32; 4],
    /// True when the terminal reports key releases.
    release_events: bool,
}

impl HeldInput {
    pub fn set_release_events(&mut self, enabled: bool) {
        self.release_events = enabled;
    }

    pub fn press(&mut self, dir: Direction) {
        let i = dir.index();
        self.held[i] = true;
        self.hold_ticks[i] = INPUT_HOLD_TICKS;
    }

    pub fn release(&mut self, dir: Direction) {
        let i = dir.index();
        self.held[i] = false;
        self.hold_ticks[i] = 0;
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    /// Drop every held direction.
    pub fn clear(&mut self) {
        self.held = [false; 4];
        self.hold_ticks = [0; 4];
    }

    /// Count down hold timers by one frame. No-op in release-event mode.
    pub fn decay(&mut self) {
        if self.release_events {
            return;
        }
        for i in 0..4 {
            if self.hold_ticks[i] > 0 {
                self.hold_ticks[i] -= 1;
                if self.hold_ticks[i] == 0 {
                    self.held[i] = false;
                }
            }
        }
    }
}

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaInput {
    Hold(Direction),
    Release(Direction),
    Attack,
    Upgrade(UpgradeKind),
    Restart,
    Quit,
    Other,
}

/// Map a terminal key event to an action.
pub fn map_key(key: KeyEvent) -> ArenaInput {
    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    };
    if let Some(dir) = direction {
        return match key.kind {
            KeyEventKind::Release => ArenaInput::Release(dir),
            KeyEventKind::Press | KeyEventKind::Repeat => ArenaInput::Hold(dir),
        };
    }

    // Everything else acts on press only.
    if key.kind == KeyEventKind::Release {
        return ArenaInput::Other;
    }
    match key.code {
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char(' ') => ArenaInput::Attack,
        KeyCode::Char('r') | KeyCode::Char('R') => ArenaInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ArenaInput::Quit,
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(n @ 1..=5) => ArenaInput::Upgrade(UpgradeKind::ALL[n as usize - 1]),
            _ => ArenaInput::Other,
        },
        _ => ArenaInput::Other,
    }
}

/// Apply one action to the simulation.
///
/// Attack, upgrade and restart act immediately at the current simulated
/// time; they are not queued for the next frame.
pub fn process_input<R: Rng>(state: &mut ArenaState, input: ArenaInput, rng: &mut R) {
    match input {
        ArenaInput::Hold(dir) => {
            if !state.is_game_over() {
                state.input.press(dir);
            }
        }
        ArenaInput::Release(dir) => state.input.release(dir),
        ArenaInput::Attack => {
            let now = state.clock_ms;
            if let Err(blocked) = combat::player_attack(state, now, rng) {
                log::trace!("attack ignored: {:?}", blocked);
            }
        }
        ArenaInput::Upgrade(kind) => {
            progression::apply_upgrade(state, kind, rng);
        }
        ArenaInput::Restart => {
            tick::restart(state, rng);
        }
        ArenaInput::Quit | ArenaInput::Other => {}
    }
}

/// Result of handling a key on the arena screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Frontend key handler. Owns the quit confirmation: the first Esc/Q arms
/// it, a second one quits, and any other key cancels it.
#[derive(Debug, Default)]
pub struct InputHandler {
    pub quit_pending: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key<R: Rng>(
        &mut self,
        state: &mut ArenaState,
        key: KeyEvent,
        rng: &mut R,
    ) -> InputResult {
        let input = map_key(key);
        match input {
            ArenaInput::Quit => {
                if self.quit_pending {
                    return InputResult::Quit;
                }
                self.quit_pending = true;
                InputResult::Continue
            }
            ArenaInput::Release(_) => {
                process_input(state, input, rng);
                InputResult::Continue
            }
            _ => {
                if self.quit_pending {
                    self.quit_pending = false;
                    return InputResult::Continue;
                }
                process_input(state, input, rng);
                InputResult::Continue
            }
        }
    }
}
