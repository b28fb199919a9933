//! Movement and lifecycle: integrate velocities, cull what left the playfield,
//! and handle firing for the player and the boss.
//!
//! Shots fired this tick are appended after everything else has moved, so a
//! new bullet first moves on the following tick.

use rand::Rng;

use crate::audio::AudioEvent;
use crate::constants::{BOSS_WALL_MARGIN, ENEMY_BULLET_SIDE_MARGIN};
use crate::entities::ControlState;
use crate::session::GameState;

use super::{player, spawn};

pub fn movement_pass(state: &mut GameState, controls: &ControlState, rng: &mut impl Rng) {
    steer_player(state, controls);
    player::decay_invincibility(&mut state.entities.player);

    move_player_bullets(state);
    move_enemy_bullets(state);
    move_powerups(state);
    // Small enemies hold still for the whole encounter.
    if !state.boss_active {
        move_enemies(state, rng);
    }
    move_boss(state);

    fire_player(state, controls);
}

// ── Player ───────────────────────────────────────────────────────────────────

fn steer_player(state: &mut GameState, controls: &ControlState) {
    let speed = state.config.player_speed;
    let width = state.config.width;
    let p = &mut state.entities.player;
    if p.defeated {
        return;
    }
    if controls.move_left {
        p.rect.x -= speed;
    }
    if controls.move_right {
        p.rect.x += speed;
    }
    p.rect.x = p.rect.x.clamp(0.0, (width - p.rect.w).max(0.0));
}

fn fire_player(state: &mut GameState, controls: &ControlState) {
    let now = state.clock.now_ms();
    let p = &mut state.entities.player;
    if !controls.fire
        || p.defeated
        || !state.clock.elapsed_since(p.last_shot_ms, state.config.player_fire_cooldown_ms)
    {
        return;
    }
    p.last_shot_ms = now;
    for bullet in spawn::player_volley(p, p.spread_active(now)) {
        state.entities.player_bullets.push(bullet);
    }
    state.events.push(AudioEvent::Shoot);
}

// ── Projectiles & drops ──────────────────────────────────────────────────────

fn move_player_bullets(state: &mut GameState) {
    let width = state.config.width;
    let bullets = &mut state.entities.player_bullets;
    for b in bullets.iter_mut() {
        b.rect.translate(b.vx, b.vy);
    }
    bullets.retain(|b| !(b.rect.bottom() < 0.0 || b.rect.right() < 0.0 || b.rect.left() > width));
}

fn move_enemy_bullets(state: &mut GameState) {
    let (width, height) = (state.config.width, state.config.height);
    let bullets = &mut state.entities.enemy_bullets;
    for b in bullets.iter_mut() {
        b.rect.translate(b.vx, b.vy);
    }
    bullets.retain(|b| {
        !(b.rect.top() > height
            || b.rect.center_x() < -ENEMY_BULLET_SIDE_MARGIN
            || b.rect.center_x() > width + ENEMY_BULLET_SIDE_MARGIN)
    });
}

fn move_powerups(state: &mut GameState) {
    let height = state.config.height;
    let powerups = &mut state.entities.powerups;
    for p in powerups.iter_mut() {
        p.rect.translate(0.0, p.vy);
    }
    powerups.retain(|p| p.rect.top() <= height);
}

// ── Enemies & boss ───────────────────────────────────────────────────────────

/// Enemies that fall past the bottom wrap back to the top, keeping the
/// population constant without reallocating.
fn move_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let height = state.config.height;
    for e in state.entities.enemies.iter_mut() {
        e.rect.translate(0.0, e.speed);
        if e.rect.top() > height {
            spawn::respawn_enemy(e, rng, &state.config);
        }
    }
}

fn move_boss(state: &mut GameState) {
    let width = state.config.width;
    let Some(boss) = state.entities.boss.as_mut() else {
        return;
    };
    boss.rect.translate(boss.vx, 0.0);
    if boss.rect.left() <= BOSS_WALL_MARGIN || boss.rect.right() >= width - BOSS_WALL_MARGIN {
        boss.vx = -boss.vx;
    }

    if state
        .clock
        .elapsed_since(boss.last_shot_ms, state.config.boss_fire_cooldown_ms)
    {
        boss.last_shot_ms = state.clock.now_ms();
        for bullet in spawn::boss_fan(boss) {
            state.entities.enemy_bullets.push(bullet);
        }
    }
}
