//! Scripted player used by the simulator.
//!
//! Each frame, before the step runs, the autopilot picks a target, sets
//! held directions toward (or away from) it and swings when a monster is
//! in reach. It only touches the state through the same entry points the
//! keyboard does.

use super::config::UpgradePolicy;
use crate::combat;
use crate::core::constants::UPGRADE_SPEED_BONUS;
use crate::core::{ArenaState, Phase};
use crate::input::Direction;
use crate::progression::{self, UpgradeKind};
use rand::Rng;

/// Below this hp ratio the autopilot goes for hearts.
const HEAL_THRESHOLD: f64 = 0.3;
/// Center distance kept from the nearest monster; inside attack range but
/// outside the contact boxes.
const STANDOFF_MIN: f64 = 56.0;
const STANDOFF_MAX: f64 = 64.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    policy: UpgradePolicy,
    upgrades_taken: usize,
}

impl Autopilot {
    pub fn new(policy: UpgradePolicy) -> Self {
        Self {
            policy,
            upgrades_taken: 0,
        }
    }

    pub fn upgrades_taken(&self) -> usize {
        self.upgrades_taken
    }

    pub fn choose_upgrade(&self, state: &ArenaState) -> UpgradeKind {
        match self.policy {
            UpgradePolicy::RoundRobin => UpgradeKind::ALL[self.upgrades_taken % UpgradeKind::ALL.len()],
            UpgradePolicy::Always(kind) => kind,
            UpgradePolicy::Balanced => {
                let p = &state.player;
                if p.hp_ratio() < 0.5 {
                    UpgradeKind::Hp
                } else if self.upgrades_taken % 2 == 1
                    && p.speed + UPGRADE_SPEED_BONUS <= state.config.player.speed_cap
                {
                    UpgradeKind::Spd
                } else {
                    UpgradeKind::Atk
                }
            }
        }
    }

    /// Act for one frame.
    pub fn drive<R: Rng>(&mut self, state: &mut ArenaState, rng: &mut R) {
        match state.phase {
            Phase::GameOver => {}
            Phase::UpgradePending => {
                let kind = self.choose_upgrade(state);
                if progression::apply_upgrade(state, kind, rng) {
                    self.upgrades_taken += 1;
                }
            }
            Phase::Playing => {
                self.steer(state);
                if monster_in_range(state) {
                    let now = state.clock_ms;
                    // Cooldown rejections are expected every few frames.
                    let _ = combat::player_attack(state, now, rng);
                }
            }
        }
    }

    fn steer(&self, state: &mut ArenaState) {
        let (px, py) = state.player.center();
        let hurt = state.player.hp_ratio() < HEAL_THRESHOLD;

        let heart = nearest(px, py, state.hearts.iter().map(|h| h.bounds().center()));
        let monster = nearest(px, py, state.monsters.iter().map(|m| m.center()));

        let (target, toward) = match (heart, monster) {
            (Some((h, _)), _) if hurt => (h, true),
            (_, Some((m, dist))) if dist < STANDOFF_MIN => (m, false),
            (_, Some((m, dist))) if dist > STANDOFF_MAX => (m, true),
            (Some((h, _)), None) => (h, true),
            _ => {
                state.input.clear();
                return;
            }
        };

        let sign = if toward { 1.0 } else { -1.0 };
        let dx = (target.0 - px) * sign;
        let dy = (target.1 - py) * sign;
        let deadband = state.player.speed / 2.0;
        set_axis(state, dx, deadband, Direction::Left, Direction::Right);
        set_axis(state, dy, deadband, Direction::Up, Direction::Down);
    }
}

fn set_axis(state: &mut ArenaState, delta: f64, deadband: f64, neg: Direction, pos: Direction) {
    state.input.release(neg);
    state.input.release(pos);
    if delta > deadband {
        state.input.press(pos);
    } else if delta < -deadband {
        state.input.press(neg);
    }
}

fn nearest(
    px: f64,
    py: f64,
    points: impl Iterator<Item = (f64, f64)>,
) -> Option<((f64, f64), f64)> {
    points
        .map(|(x, y)| ((x, y), (x - px).hypot(y - py)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn monster_in_range(state: &ArenaState) -> bool {
    let player = state.player.bounds();
    state
        .monsters
        .iter()
        .any(|m| player.center_distance(&m.bounds()) <= state.config.attack_range)
}
