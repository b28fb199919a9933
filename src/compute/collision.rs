//! Collision resolution for one tick.
//!
//! Rules run in a fixed order and each one commits its queued removals and
//! insertions before the next starts, so nothing destroyed by an earlier rule
//! is seen by a later one and nothing spawned by a rule is seen by itself.

use rand::Rng;
use tracing::info;

use crate::constants::{SCORE_BOSS_CHIP, SCORE_BOSS_KILL, SCORE_ENEMY_KILL};
use crate::session::GameState;
use crate::store::EntityStore;

use super::player::{self, Impact};
use super::spawn;

pub fn collision_pass(state: &mut GameState, rng: &mut impl Rng) {
    bullets_vs_enemies(state, rng);
    bullets_vs_boss(state);
    enemy_bullets_vs_player(state);
    enemies_vs_player(state, rng);
    boss_vs_player(state);
    player_vs_powerups(state);
}

/// Rule 1. Each bullet can destroy at most one enemy; each destroyed enemy is
/// replaced elsewhere and may leave a drop behind.
fn bullets_vs_enemies(state: &mut GameState, rng: &mut impl Rng) {
    if state.boss_active {
        return;
    }
    let EntityStore {
        enemies,
        player_bullets,
        powerups,
        ..
    } = &mut state.entities;

    let mut kills = Vec::new();
    for ei in 0..enemies.len() {
        let Some(target) = enemies.get(ei).map(|e| e.rect) else {
            continue;
        };
        let mut hit = false;
        for bi in 0..player_bullets.len() {
            if player_bullets.is_removed(bi) {
                continue;
            }
            if player_bullets.get(bi).is_some_and(|b| b.rect.overlaps(&target)) {
                player_bullets.mark_removed(bi);
                hit = true;
            }
        }
        if hit && enemies.mark_removed(ei) {
            kills.push((target.center_x(), target.center_y()));
        }
    }

    for (cx, cy) in kills {
        state.score += SCORE_ENEMY_KILL;
        if let Some(drop) = spawn::powerup_drop(rng, state.config.powerup_drop_chance, cx, cy) {
            powerups.queue_insert(drop);
        }
        enemies.queue_insert(spawn::enemy(rng, &state.config));
    }

    enemies.commit();
    player_bullets.commit();
    powerups.commit();
}

/// Rule 2. Every overlapping bullet is consumed for one point of damage and
/// a chip reward; a kill pays the bounty and ends the encounter.
fn bullets_vs_boss(state: &mut GameState) {
    if !state.boss_active {
        return;
    }
    let EntityStore {
        boss,
        player_bullets,
        ..
    } = &mut state.entities;
    let Some(b) = boss.as_mut().filter(|b| b.is_alive()) else {
        return;
    };

    let mut hits = 0u32;
    for bi in 0..player_bullets.len() {
        if player_bullets.get(bi).is_some_and(|pb| pb.rect.overlaps(&b.rect))
            && player_bullets.mark_removed(bi)
        {
            hits += 1;
        }
    }
    player_bullets.commit();

    b.health -= hits as i32;
    state.score += hits * SCORE_BOSS_CHIP;

    if !b.is_alive() {
        state.score += SCORE_BOSS_KILL;
        state.boss_active = false;
        state.boss_defeated = true;
        *boss = None;
        info!(score = state.score, "boss_defeated");
    }
}

/// Rule 3. Overlapping enemy bullets are consumed even when the hit itself
/// is absorbed by i-frames or a shield.
fn enemy_bullets_vs_player(state: &mut GameState) {
    if state.entities.player.defeated {
        return;
    }
    let target = state.entities.player.rect;
    let bullets = &mut state.entities.enemy_bullets;
    let mut hits = 0;
    for bi in 0..bullets.len() {
        if bullets.get(bi).is_some_and(|b| b.rect.overlaps(&target)) && bullets.mark_removed(bi) {
            hits += 1;
        }
    }
    bullets.commit();

    for _ in 0..hits {
        player::apply_hit(state, Impact::Light);
    }
}

/// Rule 4. An enemy that lands a hit is sent back to the top, not destroyed.
fn enemies_vs_player(state: &mut GameState, rng: &mut impl Rng) {
    if state.boss_active {
        return;
    }
    for ei in 0..state.entities.enemies.len() {
        let player_rect = state.entities.player.rect;
        let touching = state
            .entities
            .enemies
            .get(ei)
            .is_some_and(|e| e.rect.overlaps(&player_rect));
        if touching && player::apply_hit(state, Impact::Light) {
            if let Some(enemy) = state.entities.enemies.get_mut(ei) {
                spawn::respawn_enemy(enemy, rng, &state.config);
            }
        }
    }
}

/// Rule 5.
fn boss_vs_player(state: &mut GameState) {
    let now = state.clock.now_ms();
    let p = &state.entities.player;
    let touching = state
        .entities
        .boss
        .as_ref()
        .is_some_and(|b| b.rect.overlaps(&p.rect));
    if touching && !p.is_invincible() && !p.shield_active(now) {
        player::apply_hit(state, Impact::Heavy);
    }
}

/// Rule 6.
fn player_vs_powerups(state: &mut GameState) {
    let target = state.entities.player.rect;
    let powerups = &mut state.entities.powerups;
    let mut collected = Vec::new();
    for pi in 0..powerups.len() {
        if let Some(p) = powerups.get(pi).filter(|p| p.rect.overlaps(&target)) {
            collected.push(p.kind);
            powerups.mark_removed(pi);
        }
    }
    powerups.commit();

    for kind in collected {
        player::grant_buff(state, kind);
    }
}
