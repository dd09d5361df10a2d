//! Heart pickup and expiry.

use crate::core::events::TickEvent;
use crate::core::game_state::ArenaState;

/// Heal amount of one heart: `max(1, floor(max_hp * heal_percent))`.
pub fn heart_heal_amount(max_hp: u32, heal_percent: f64) -> u32 {
    ((f64::from(max_hp) * heal_percent).floor() as u32).max(1)
}

/// Age every heart by `elapsed_ms`, collect those the player touches and
/// drop those whose lifetime ran out.
///
/// Pickup is checked before expiry, so a heart touched on its last frame is
/// still collected. Returns the total hp restored.
pub fn update_hearts(state: &mut ArenaState, elapsed_ms: u64) -> u32 {
    let player_box = state.player.bounds();
    let heal = heart_heal_amount(state.player.max_hp, state.config.heart_heal_percent);
    let mut healed_total = 0;
    let mut events = Vec::new();

    let mut i = state.hearts.len();
    while i > 0 {
        i -= 1;
        let heart = &mut state.hearts[i];
        heart.ttl_ms -= elapsed_ms as i64;

        if player_box.touches(&heart.bounds()) {
            state.hearts.remove(i);
            let healed = state.player.heal(heal);
            healed_total += healed;
            events.push(TickEvent::HeartPickedUp { healed });
            continue;
        }
        if heart.ttl_ms <= 0 {
            state.hearts.remove(i);
            events.push(TickEvent::HeartExpired);
        }
    }

    state.events.extend(events);
    healed_total
}
