//! Movement and collision: player steering, monster seek, push-back and
//! monster-monster separation. One call per simulation step.

use crate::core::constants::*;
use crate::core::game_state::{ArenaState, Phase};
use crate::input::Direction;

/// Move the player from the held directions, then clamp inside the arena.
///
/// Each held direction adds the full speed on its axis, so diagonals are
/// faster than straight lines. Frozen unless the phase is `Playing`.
pub fn move_player(state: &mut ArenaState) {
    if state.phase != Phase::Playing {
        return;
    }
    let held = &state.input;
    let player = &mut state.player;
    if held.is_held(Direction::Up) {
        player.y -= player.speed;
    }
    if held.is_held(Direction::Down) {
        player.y += player.speed;
    }
    if held.is_held(Direction::Left) {
        player.x -= player.speed;
    }
    if held.is_held(Direction::Right) {
        player.x += player.speed;
    }
    player.x = player.x.clamp(0.0, state.config.arena_width - player.w);
    player.y = player.y.clamp(0.0, state.config.arena_height - player.h);
}

/// Seek every monster toward the player and push overlapping ones back out.
///
/// The overlap measured after seek is stored in `in_contact` and is what
/// contact damage reads later in the step; push-back does not clear it.
pub fn move_monsters(state: &mut ArenaState) {
    let player_box = state.player.bounds();
    let (px, py) = player_box.center();

    for monster in &mut state.monsters {
        let (mx, my) = monster.center();
        let dx = px - mx;
        let dy = py - my;
        let dist = dx.hypot(dy);
        if dist > SEEK_STOP_DISTANCE {
            monster.x += dx / dist * monster.speed;
            monster.y += dy / dist * monster.speed;
        }

        monster.in_contact = monster.bounds().overlaps(&player_box);
        if monster.in_contact {
            let (mx, my) = monster.center();
            let angle = (my - py).atan2(mx - px);
            monster.x += angle.cos() * PUSH_BACK_FORCE;
            monster.y += angle.sin() * PUSH_BACK_FORCE;
        }
    }
}

/// Push apart every pair of monsters whose centers are closer than the
/// minimum separation. Each monster moves half the overlap.
pub fn separate_monsters(state: &mut ArenaState) {
    let monsters = &mut state.monsters;
    let len = monsters.len();
    for i in 0..len {
        for j in (i + 1)..len {
            let (ax, ay) = monsters[i].center();
            let (bx, by) = monsters[j].center();
            let dx = ax - bx;
            let dy = ay - by;
            let mut dist = dx.hypot(dy);
            if dist == 0.0 {
                dist = 1.0;
            }
            if dist >= MONSTER_MIN_SEPARATION {
                continue;
            }
            let overlap = (MONSTER_MIN_SEPARATION - dist) / 2.0;
            let nx = dx / dist;
            let ny = dy / dist;
            monsters[i].x += nx * overlap;
            monsters[i].y += ny * overlap;
            monsters[j].x -= nx * overlap;
            monsters[j].y -= ny * overlap;
        }
    }
}

/// Full monster movement pass: seek and push-back, then separation.
pub fn resolve_movement(state: &mut ArenaState) {
    move_monsters(state);
    separate_monsters(state);
}
