//! Events produced by the simulation for frontends to consume.
//!
//! The core never touches UI types. Resolvers push [`TickEvent`]s onto
//! [`crate::core::ArenaState::events`]; the terminal frontend maps them to
//! log lines and the simulator folds them into run statistics.

use crate::entities::Tier;
use crate::progression::UpgradeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Waves ───────────────────────────────────────────────────
    /// The field was reset and repopulated.
    WaveSpawned { count: usize, base_tier: Tier },

    // ── Combat ──────────────────────────────────────────────────
    /// A player attack swing landed on at least one monster.
    PlayerAttack { hits: usize, damage: u32 },

    /// A monster died to a player attack.
    MonsterKilled { tier: Tier, xp: u32 },

    /// A monster landed a contact hit on the player.
    PlayerHit { tier: Tier, damage: u32 },

    // ── Hearts ──────────────────────────────────────────────────
    HeartDropped,
    HeartPickedUp { healed: u32 },
    HeartExpired,

    // ── Progression ─────────────────────────────────────────────
    /// The player reached a new level and owes an upgrade choice.
    LeveledUp { new_level: u32 },

    UpgradeApplied { kind: UpgradeKind },

    // ── Lifecycle ───────────────────────────────────────────────
    GameOver { level: u32 },
    Restarted,
}

impl TickEvent {
    /// Short human-readable line for the event log.
    pub fn message(&self) -> String {
        match self {
            Self::WaveSpawned { count, base_tier } => {
                format!("A new wave approaches: {} monsters ({})", count, base_tier)
            }
            Self::PlayerAttack { hits, damage } => {
                format!("You strike {} for {} damage", plural(*hits), damage)
            }
            Self::MonsterKilled { tier, xp } => format!("{} monster slain (+{} XP)", tier, xp),
            Self::PlayerHit { tier, damage } => format!("{} monster hits you for {}", tier, damage),
            Self::HeartDropped => "A heart drops to the ground".to_string(),
            Self::HeartPickedUp { healed } => format!("Heart restores {} HP", healed),
            Self::HeartExpired => "A heart fades away".to_string(),
            Self::LeveledUp { new_level } => format!("Level up! You are now level {}", new_level),
            Self::UpgradeApplied { kind } => format!("Upgrade chosen: {}", kind.label()),
            Self::GameOver { level } => format!("You fell at level {}", level),
            Self::Restarted => "A new run begins".to_string(),
        }
    }
}

fn plural(hits: usize) -> String {
    if hits == 1 {
        "1 monster".to_string()
    } else {
        format!("{} monsters", hits)
    }
}

/// Result of advancing the simulation by a wall-clock delta.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Number of fixed 16ms steps that ran.
    pub steps: u32,
    /// Events since the previous drain, in chronological order.
    pub events: Vec<TickEvent>,
}
