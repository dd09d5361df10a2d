//! Player attack and contact damage.
//!
//! Both take the current simulated time explicitly so cooldowns are
//! deterministic under test.

use super::types::{AttackBlocked, AttackOutcome};
use crate::core::config::TierScaling;
use crate::core::constants::*;
use crate::core::events::TickEvent;
use crate::core::game_state::{ArenaState, Phase};
use crate::entities::{Heart, Tier};
use crate::progression;
use crate::spawner;
use rand::Rng;

/// Damage of one player hit on a monster of `tier`:
/// `max(2, atk - floor(tier * 0.3))`.
pub fn attack_damage(atk: u32, tier: Tier) -> u32 {
    let armor = (f64::from(tier.get()) * TIER_ARMOR_FACTOR).floor() as u32;
    atk.saturating_sub(armor).max(MIN_ATTACK_DAMAGE)
}

/// Damage of one contact hit: a fraction of the player's max hp.
pub fn contact_damage(player_max_hp: u32, scaling: &TierScaling) -> u32 {
    (f64::from(player_max_hp) * scaling.damage_percent).floor() as u32
}

/// Check whether the player may attack at `now_ms`.
pub fn attack_ready(state: &ArenaState, now_ms: u64) -> Result<(), AttackBlocked> {
    if state.phase != Phase::Playing {
        return Err(AttackBlocked::NotPlaying);
    }
    let cooldown = state.config.attack_cooldown_ms;
    match state.last_attack_at {
        Some(last) if now_ms.saturating_sub(last) < cooldown => {
            Err(AttackBlocked::Cooldown(cooldown - now_ms.saturating_sub(last)))
        }
        _ => Ok(()),
    }
}

/// Swing at every monster within attack range of the player.
///
/// Killed monsters are removed immediately, may drop a heart, and grant XP.
/// If the swing empties the field a new wave spawns before returning.
pub fn player_attack<R: Rng>(
    state: &mut ArenaState,
    now_ms: u64,
    rng: &mut R,
) -> Result<AttackOutcome, AttackBlocked> {
    attack_ready(state, now_ms)?;
    state.last_attack_at = Some(now_ms);

    let mut outcome = AttackOutcome::default();
    let player_box = state.player.bounds();
    let range = state.config.attack_range;

    // Walk backwards so removals don't shift unvisited monsters.
    for i in (0..state.monsters.len()).rev() {
        let monster = &mut state.monsters[i];
        if player_box.center_distance(&monster.bounds()) > range {
            continue;
        }
        let damage = attack_damage(state.player.atk, monster.tier);
        monster.take_damage(damage);
        outcome.hits += 1;
        outcome.damage += damage;

        if monster.is_alive() {
            continue;
        }

        let dead = state.monsters.remove(i);
        outcome.kills += 1;
        state.kills += 1;
        if rng.gen_bool(state.config.heart_drop_chance) {
            state.hearts.push(Heart::dropped_by(&dead, &state.config));
            outcome.hearts_dropped += 1;
            state.push_event(TickEvent::HeartDropped);
        }
        let xp = dead.xp_reward();
        state.push_event(TickEvent::MonsterKilled { tier: dead.tier, xp });
        progression::give_xp(state, xp);
    }

    if outcome.hits > 0 {
        state.push_event(TickEvent::PlayerAttack {
            hits: outcome.hits,
            damage: outcome.damage,
        });
    }

    if state.monsters.is_empty() {
        outcome.wave_cleared = true;
        spawner::spawn_wave(state, rng);
    }

    Ok(outcome)
}

/// Apply contact damage from every monster in contact with the player.
///
/// Contact is the `in_contact` flag set by movement after seek, so a monster
/// that push-back has already moved clear still lands its hit. Each monster
/// has its own cooldown; continuous contact lands at most one hit per
/// cooldown window. Returns the total damage dealt.
pub fn apply_contact_damage(state: &mut ArenaState, now_ms: u64) -> u32 {
    if state.phase == Phase::GameOver {
        return 0;
    }
    let mut total = 0;

    for i in 0..state.monsters.len() {
        let monster = &state.monsters[i];
        if !monster.in_contact {
            continue;
        }
        let scaling = *state.config.tier(monster.tier);
        let ready = match monster.last_hit_at {
            Some(last) => now_ms.saturating_sub(last) >= scaling.cooldown_ms,
            None => true,
        };
        if !ready {
            continue;
        }

        let tier = monster.tier;
        state.monsters[i].last_hit_at = Some(now_ms);
        let damage = contact_damage(state.player.max_hp, &scaling);
        state.player.take_damage(damage);
        total += damage;
        log::trace!("{} monster hit player for {} at {}ms", tier, damage, now_ms);
        state.push_event(TickEvent::PlayerHit { tier, damage });

        if !state.player.is_alive() {
            state.trigger_game_over();
            break;
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ArenaConfig;
    use crate::entities::Monster;
    use rand::rngs::mock::StepRng;

    fn fresh() -> ArenaState {
        ArenaState::empty(ArenaConfig::default())
    }

    /// Place a monster whose center is `dx` to the right of the player's center.
    fn monster_at_offset(state: &ArenaState, tier: u8, dx: f64) -> Monster {
        let (px, py) = state.player.center();
        let mut m = Monster::new(Tier::new(i32::from(tier)), 0.0, 0.0, &state.config);
        m.x = px + dx - m.w / 2.0;
        m.y = py - m.h / 2.0;
        m.in_contact = m.bounds().overlaps(&state.player.bounds());
        m
    }

    fn no_drop_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_attack_damage_formula() {
        assert_eq!(attack_damage(14, Tier::new(1)), 14);
        assert_eq!(attack_damage(14, Tier::new(3)), 14);
        assert_eq!(attack_damage(14, Tier::new(4)), 13);
        assert_eq!(attack_damage(14, Tier::new(5)), 13);
        assert_eq!(attack_damage(1, Tier::new(5)), 2);
        assert_eq!(attack_damage(0, Tier::new(1)), 2);
    }

    #[test]
    fn test_contact_damage_formula() {
        let config = ArenaConfig::default();
        assert_eq!(contact_damage(350, config.tier(Tier::new(1))), 10);
        assert_eq!(contact_damage(350, config.tier(Tier::new(3))), 31);
        assert_eq!(contact_damage(350, config.tier(Tier::new(5))), 122);
    }

    #[test]
    fn test_attack_hits_at_exact_range() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 1, 72.0);
        state.monsters.push(m);
        let outcome = player_attack(&mut state, 0, &mut no_drop_rng()).unwrap();
        assert_eq!(outcome.hits, 1);
        assert_eq!(state.monsters[0].hp, 110 - 14);
    }

    #[test]
    fn test_attack_misses_beyond_range() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 1, 72.5);
        state.monsters.push(m);
        let outcome = player_attack(&mut state, 0, &mut no_drop_rng()).unwrap();
        assert_eq!(outcome.hits, 0);
        assert_eq!(state.monsters[0].hp, 110);
    }

    #[test]
    fn test_attack_is_area_damage() {
        let mut state = fresh();
        for dx in [-40.0, 10.0, 60.0] {
            let m = monster_at_offset(&state, 2, dx);
            state.monsters.push(m);
        }
        let far = monster_at_offset(&state, 2, 300.0);
        state.monsters.push(far);
        let outcome = player_attack(&mut state, 0, &mut no_drop_rng()).unwrap();
        assert_eq!(outcome.hits, 3);
        assert_eq!(outcome.damage, 42);
        assert_eq!(state.monsters.iter().filter(|m| m.hp < m.max_hp).count(), 3);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 1, 0.0);
        state.monsters.push(m);
        let mut rng = no_drop_rng();

        assert!(player_attack(&mut state, 1000, &mut rng).is_ok());
        assert_eq!(
            player_attack(&mut state, 1100, &mut rng),
            Err(AttackBlocked::Cooldown(120))
        );
        assert!(player_attack(&mut state, 1220, &mut rng).is_ok());
        assert_eq!(state.monsters[0].hp, 110 - 28);
    }

    #[test]
    fn test_attack_blocked_while_upgrade_pending() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 1, 0.0);
        state.monsters.push(m);
        state.phase = Phase::UpgradePending;
        assert_eq!(
            player_attack(&mut state, 0, &mut no_drop_rng()),
            Err(AttackBlocked::NotPlaying)
        );
        assert_eq!(state.monsters[0].hp, 110);
        assert!(state.last_attack_at.is_none());
    }

    #[test]
    fn test_attack_blocked_after_game_over() {
        let mut state = fresh();
        state.trigger_game_over();
        assert_eq!(
            player_attack(&mut state, 0, &mut no_drop_rng()),
            Err(AttackBlocked::NotPlaying)
        );
    }

    #[test]
    fn test_kill_grants_xp_and_removes_monster() {
        let mut state = fresh();
        let mut dying = monster_at_offset(&state, 2, 0.0);
        dying.hp = 5;
        let survivor = monster_at_offset(&state, 1, 500.0);
        state.monsters.push(dying);
        state.monsters.push(survivor);

        let outcome = player_attack(&mut state, 0, &mut no_drop_rng()).unwrap();
        assert_eq!(outcome.kills, 1);
        assert_eq!(state.monsters.len(), 1);
        assert_eq!(state.player.xp, 36);
        assert_eq!(state.kills, 1);
        assert!(state.hearts.is_empty());
        assert!(!outcome.wave_cleared);
    }

    #[test]
    fn test_kill_drops_heart_when_roll_succeeds() {
        let mut state = fresh();
        let mut dying = monster_at_offset(&state, 1, 0.0);
        dying.hp = 1;
        let (mx, my) = (dying.x, dying.y);
        state.monsters.push(dying);
        state.monsters.push(monster_at_offset(&state, 1, 500.0));

        let mut rng = StepRng::new(0, 0);
        let outcome = player_attack(&mut state, 0, &mut rng).unwrap();
        assert_eq!(outcome.hearts_dropped, 1);
        assert_eq!(state.hearts.len(), 1);
        assert!((state.hearts[0].x - (mx + 8.0)).abs() < 1e-9);
        assert!((state.hearts[0].y - (my + 8.0)).abs() < 1e-9);
        assert_eq!(state.hearts[0].ttl_ms, 12_000);
    }

    #[test]
    fn test_clearing_field_spawns_wave_synchronously() {
        let mut state = fresh();
        let mut last = monster_at_offset(&state, 1, 0.0);
        last.hp = 1;
        state.monsters.push(last);

        let outcome = player_attack(&mut state, 0, &mut no_drop_rng()).unwrap();
        assert!(outcome.wave_cleared);
        assert_eq!(state.monsters.len(), 2);
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_contact_damage_respects_cooldown() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 1, 0.0);
        state.monsters.push(m);

        let mut hits = 0;
        // 1999ms of continuous overlap: exactly one hit.
        for now in (0..2000).step_by(16) {
            if apply_contact_damage(&mut state, now) > 0 {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(state.player.hp, 340);

        // Cooldown elapsed.
        assert_eq!(apply_contact_damage(&mut state, 2000), 10);
        assert_eq!(state.player.hp, 330);
    }

    #[test]
    fn test_contact_cooldowns_are_per_monster() {
        let mut state = fresh();
        let a = monster_at_offset(&state, 1, 0.0);
        let mut b = monster_at_offset(&state, 2, 5.0);
        b.last_hit_at = Some(0);
        state.monsters.push(a);
        state.monsters.push(b);

        // Only `a` is ready at t=100.
        assert_eq!(apply_contact_damage(&mut state, 100), 10);
        // `b` becomes ready at t=1900; `a` is still cooling down.
        assert_eq!(apply_contact_damage(&mut state, 1900), 21);
        assert_eq!(state.player.hp, 350 - 10 - 21);
    }

    #[test]
    fn test_no_contact_without_overlap() {
        let mut state = fresh();
        let m = monster_at_offset(&state, 5, 51.0);
        state.monsters.push(m);
        assert_eq!(apply_contact_damage(&mut state, 0), 0);
        assert_eq!(state.player.hp, 350);
    }

    #[test]
    fn test_lethal_contact_triggers_game_over() {
        let mut state = fresh();
        state.player.hp = 1;
        let m = monster_at_offset(&state, 3, 0.0);
        state.monsters.push(m);
        assert_eq!(apply_contact_damage(&mut state, 0), 31);
        assert_eq!(state.player.hp, 0);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_contact_damage_during_upgrade_pending() {
        let mut state = fresh();
        state.phase = Phase::UpgradePending;
        let m = monster_at_offset(&state, 1, 0.0);
        state.monsters.push(m);
        assert_eq!(apply_contact_damage(&mut state, 0), 10);
    }
}
