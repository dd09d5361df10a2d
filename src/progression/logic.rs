//! XP, leveling and upgrade application.

use super::types::UpgradeKind;
use crate::core::constants::*;
use crate::core::events::TickEvent;
use crate::core::game_state::{ArenaState, Phase};
use crate::entities::{SpriteId, Tier};
use crate::spawner;
use rand::Rng;

/// XP actually credited for a raw grant: `max(1, floor(raw * multiplier))`.
pub fn scaled_xp(raw: u32, multiplier: f64) -> u32 {
    ((f64::from(raw) * multiplier).floor() as u32).max(1)
}

/// Threshold for the level after an upgrade: `max(10, floor(prev * 1.32))`.
pub fn next_xp_threshold(current: u32) -> u32 {
    ((f64::from(current) * XP_TO_NEXT_GROWTH).floor() as u32).max(MIN_XP_TO_NEXT)
}

/// Round to two decimals, as the XP multiplier is displayed.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grant XP to the player.
///
/// At most one level is gained per call even if the grant covers several
/// thresholds; the surplus stays in `xp` and the next grant levels again.
/// Returns true if the player leveled up.
pub fn give_xp(state: &mut ArenaState, raw: u32) -> bool {
    if state.player.level >= MAX_LEVEL {
        return false;
    }
    let gained = scaled_xp(raw, state.player.xp_multiplier);
    let player = &mut state.player;
    player.xp = player.xp.saturating_add(gained);

    if player.xp < player.xp_to_next || player.level >= MAX_LEVEL {
        return false;
    }

    player.xp -= player.xp_to_next;
    player.level += 1;
    player.sprite = SpriteId::Player(Tier::for_player_level(player.level));
    let new_level = player.level;

    if state.phase == Phase::Playing {
        state.phase = Phase::UpgradePending;
    }
    log::info!("level up: {} (xp {}/{})", new_level, state.player.xp, state.player.xp_to_next);
    state.push_event(TickEvent::LeveledUp { new_level });
    true
}

/// Apply the chosen upgrade, scale the next threshold and spawn a new wave.
///
/// Rejected (returns false) unless an upgrade is pending.
pub fn apply_upgrade<R: Rng>(state: &mut ArenaState, kind: UpgradeKind, rng: &mut R) -> bool {
    if state.phase != Phase::UpgradePending {
        return false;
    }

    let speed_cap = state.config.player.speed_cap;
    let player = &mut state.player;
    match kind {
        UpgradeKind::Atk => player.atk += UPGRADE_ATK_BONUS,
        UpgradeKind::Hp => {
            player.max_hp += UPGRADE_HP_BONUS;
            player.hp = player.max_hp;
        }
        UpgradeKind::Def => player.def += UPGRADE_DEF_BONUS,
        UpgradeKind::Spd => player.speed = (player.speed + UPGRADE_SPEED_BONUS).min(speed_cap),
        UpgradeKind::Exp => {
            player.xp_multiplier = round_2dp(player.xp_multiplier * UPGRADE_XP_MULTIPLIER)
        }
    }
    player.xp_to_next = next_xp_threshold(player.xp_to_next);

    state.phase = Phase::Playing;
    log::debug!(
        "upgrade {:?} applied at level {}, next threshold {}",
        kind,
        state.player.level,
        state.player.xp_to_next
    );
    state.push_event(TickEvent::UpgradeApplied { kind });
    spawner::spawn_wave(state, rng);
    true
}
