//! The simulation driver: fixed-step orchestration and restart.
//!
//! One step is one 16ms frame. Within a step the order is fixed:
//! player movement, monster movement and separation, contact damage, then
//! hearts. Attacks and upgrade choices are not part of the step; they run
//! immediately when the input arrives (see [`crate::input::process_input`]).

use crate::combat;
use crate::core::constants::{FRAME_MS, MAX_FRAME_DELTA_MS};
use crate::core::events::{TickEvent, TickResult};
use crate::core::game_state::ArenaState;
use crate::movement;
use crate::pickups;
use crate::spawner;
use rand::Rng;

/// Run one 16ms simulation step. Does nothing once the game is over.
pub fn step(state: &mut ArenaState) {
    if state.is_game_over() {
        return;
    }
    state.tick_count += 1;
    state.clock_ms += FRAME_MS;
    let now = state.clock_ms;
    log::trace!("step {} at {}ms", state.tick_count, now);

    movement::move_player(state);
    state.input.decay();
    movement::resolve_movement(state);
    combat::apply_contact_damage(state, now);

    // A lethal hit freezes the frame; the dead player collects nothing.
    if state.is_game_over() {
        return;
    }
    pickups::update_hearts(state, FRAME_MS);
}

/// Advance the simulation by a wall-clock delta.
///
/// `dt_ms` is clamped to 100ms so a stall never replays a burst of frames,
/// then consumed in whole 16ms steps; the remainder carries to the next call.
/// Returns the steps run and every event raised since the last call.
pub fn tick(state: &mut ArenaState, dt_ms: u64) -> TickResult {
    let mut steps = 0;
    if !state.is_game_over() {
        state.accumulated_time_ms += dt_ms.min(MAX_FRAME_DELTA_MS);
        while state.accumulated_time_ms >= FRAME_MS {
            state.accumulated_time_ms -= FRAME_MS;
            step(state);
            steps += 1;
            if state.is_game_over() {
                state.accumulated_time_ms = 0;
                break;
            }
        }
    }
    TickResult {
        steps,
        events: state.drain_events(),
    }
}

/// Start a new run. Only honored while the game is over.
///
/// Restores the base player, empties the field, clears the upgrade and
/// game-over gates and spawns a fresh wave. Config and input mode survive.
pub fn restart<R: Rng>(state: &mut ArenaState, rng: &mut R) -> bool {
    if !state.is_game_over() {
        return false;
    }
    let config = state.config.clone();
    let mut input = std::mem::take(&mut state.input);
    input.clear();
    let events = std::mem::take(&mut state.events);

    *state = ArenaState::empty(config);
    state.input = input;
    state.events = events;

    log::info!("restart");
    state.push_event(TickEvent::Restarted);
    spawner::spawn_wave(state, rng);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ArenaConfig;
    use crate::core::game_state::Phase;
    use crate::entities::{Heart, Monster, Tier};
    use crate::input::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh() -> ArenaState {
        ArenaState::empty(ArenaConfig::default())
    }

    #[test]
    fn test_step_advances_clock() {
        let mut state = fresh();
        step(&mut state);
        step(&mut state);
        assert_eq!(state.tick_count, 2);
        assert_eq!(state.clock_ms, 32);
    }

    #[test]
    fn test_tick_accumulates_partial_frames() {
        let mut state = fresh();
        assert_eq!(tick(&mut state, 10).steps, 0);
        assert_eq!(tick(&mut state, 10).steps, 1);
        assert_eq!(state.accumulated_time_ms, 4);
        assert_eq!(tick(&mut state, 50).steps, 3);
        assert_eq!(state.accumulated_time_ms, 6);
    }

    #[test]
    fn test_tick_clamps_large_delta() {
        let mut state = fresh();
        let result = tick(&mut state, 5_000);
        assert_eq!(result.steps, 6);
        assert_eq!(state.accumulated_time_ms, 4);
    }

    #[test]
    fn test_held_input_moves_player_each_step() {
        let mut state = fresh();
        state.input.press(Direction::Right);
        step(&mut state);
        step(&mut state);
        assert!((state.player.x - (380.0 + 2.0 * 2.2)).abs() < 1e-9);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = fresh();
        let config = state.config.clone();
        state.monsters.push(Monster::new(Tier::new(1), 100.0, 100.0, &config));
        state.trigger_game_over();
        let before = state.monsters[0].clone();
        let result = tick(&mut state, 100);
        assert_eq!(result.steps, 0);
        assert_eq!(state.monsters[0], before);
        assert_eq!(state.clock_ms, 0);
    }

    #[test]
    fn test_lethal_step_skips_hearts() {
        let mut state = fresh();
        let config = state.config.clone();
        state.player.hp = 1;
        let mut m = Monster::new(Tier::new(3), 0.0, 0.0, &config);
        m.x = state.player.x;
        m.y = state.player.y;
        state.monsters.push(m);
        state.hearts.push(Heart {
            x: state.player.x,
            y: state.player.y,
            w: 28.0,
            h: 28.0,
            ttl_ms: 1000,
        });
        step(&mut state);
        assert!(state.is_game_over());
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_restart_only_when_game_over() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut state = fresh();
        assert!(!restart(&mut state, &mut rng));
        assert!(state.monsters.is_empty());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = fresh();
        state.player.level = 12;
        state.player.atk = 30;
        state.player.max_hp = 500;
        state.player.xp_multiplier = 1.56;
        state.player.speed = 4.0;
        state.kills = 44;
        state.clock_ms = 90_000;
        state.input.set_release_events(true);
        state.input.press(Direction::Up);
        state.trigger_game_over();

        assert!(restart(&mut state, &mut rng));
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.hp, 350);
        assert_eq!(state.player.max_hp, 350);
        assert_eq!(state.player.atk, 14);
        assert_eq!(state.player.def, 6);
        assert!((state.player.speed - 2.2).abs() < 1e-9);
        assert!((state.player.xp_multiplier - 1.0).abs() < 1e-9);
        assert_eq!(state.player.xp_to_next, 50);
        assert_eq!(state.kills, 0);
        assert_eq!(state.clock_ms, 0);
        assert_eq!(state.monsters.len(), 2);
        assert!(!state.input.is_held(Direction::Up));

        let events = state.drain_events();
        assert!(events.contains(&TickEvent::Restarted));
    }
}
