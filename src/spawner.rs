//! Wave spawning.
//!
//! A wave replaces the whole field: monsters and hearts are cleared, then a
//! fresh set is placed at random. Wave size and base tier scale with the
//! player's level.

use crate::core::constants::*;
use crate::core::events::TickEvent;
use crate::core::game_state::ArenaState;
use crate::entities::{Monster, Tier};
use rand::Rng;

/// Monsters in a wave for a player at `level`.
pub fn wave_size(level: u32) -> usize {
    MAX_WAVE_SIZE.min(BASE_WAVE_SIZE + (level / LEVELS_PER_EXTRA_MONSTER) as usize)
}

/// Perturb the base tier: 12% one lower, otherwise 12% one higher.
pub fn roll_tier<R: Rng>(base: Tier, rng: &mut R) -> Tier {
    if rng.gen_bool(TIER_DOWN_CHANCE) {
        base.offset(-1)
    } else if rng.gen_bool(TIER_UP_CHANCE) {
        base.offset(1)
    } else {
        base
    }
}

/// Create one monster at a random position inside the spawn margins.
///
/// If it lands within `SPAWN_SAFE_RADIUS` of the player it is nudged once
/// toward the bottom-right and clamped to the arena. There is no retry, so
/// overlap with the player is still possible.
pub fn spawn_monster<R: Rng>(state: &ArenaState, tier: Tier, rng: &mut R) -> Monster {
    let config = &state.config;
    let x = SPAWN_MARGIN_LEFT + rng.gen::<f64>() * (config.arena_width - SPAWN_SPAN_INSET_X);
    let y = SPAWN_MARGIN_TOP + rng.gen::<f64>() * (config.arena_height - SPAWN_SPAN_INSET_Y);
    let mut monster = Monster::new(tier, x, y, config);

    let player = &state.player;
    if (monster.x - player.x).hypot(monster.y - player.y) < SPAWN_SAFE_RADIUS {
        monster.x = (monster.x + SPAWN_NUDGE_X).clamp(0.0, config.arena_width - monster.w);
        monster.y = (monster.y + SPAWN_NUDGE_Y).clamp(0.0, config.arena_height - monster.h);
    }
    monster
}

/// Clear the field and spawn a new wave sized for the player's level.
pub fn spawn_wave<R: Rng>(state: &mut ArenaState, rng: &mut R) {
    state.monsters.clear();
    state.hearts.clear();

    let level = state.player.level;
    let count = wave_size(level);
    let base_tier = Tier::for_wave_level(level);

    for _ in 0..count {
        let tier = roll_tier(base_tier, rng);
        let monster = spawn_monster(state, tier, rng);
        state.monsters.push(monster);
    }

    state.wave += 1;
    log::debug!(
        "wave {} spawned: {} monsters, base tier {}, player level {}",
        state.wave,
        count,
        base_tier,
        level
    );
    state.push_event(TickEvent::WaveSpawned { count, base_tier });
}
