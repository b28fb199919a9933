//! Randomised construction of enemies, drops and projectile volleys.

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{Aabb, Boss, Bullet, Enemy, Player, PowerUp, PowerUpKind};

/// Fresh enemy somewhere above the top edge.
pub fn enemy(rng: &mut impl Rng, config: &GameConfig) -> Enemy {
    let mut e = Enemy {
        rect: Aabb::new(0.0, 0.0, ENEMY_WIDTH, ENEMY_HEIGHT),
        speed: 0.0,
    };
    respawn_enemy(&mut e, rng, config);
    e
}

/// Move an existing enemy back above the top edge with a new speed.
pub fn respawn_enemy(enemy: &mut Enemy, rng: &mut impl Rng, config: &GameConfig) {
    let max_x = (config.width - ENEMY_WIDTH).max(0.0) as i32;
    enemy.rect.x = rng.gen_range(0..=max_x) as f32;
    enemy.rect.y = rng.gen_range(ENEMY_SPAWN_Y_MIN..=ENEMY_SPAWN_Y_MAX) as f32;
    enemy.speed = rng.gen_range(config.enemy_speed_min..=config.enemy_speed_max) as f32;
}

/// Roll for a drop at `(cx, cy)`; both kinds are equally likely.
pub fn powerup_drop(rng: &mut impl Rng, chance: f64, cx: f32, cy: f32) -> Option<PowerUp> {
    if !rng.gen_bool(chance) {
        return None;
    }
    let kind = if rng.gen_bool(0.5) {
        PowerUpKind::Spread
    } else {
        PowerUpKind::Shield
    };
    Some(PowerUp::new(cx, cy, kind))
}

pub fn boss(config: &GameConfig, hp: i32, now_ms: u64) -> Boss {
    Boss::new(config.width, hp, now_ms)
}

/// Three-way fan fired from the boss's lower centre.
pub fn boss_fan(boss: &Boss) -> impl Iterator<Item = Bullet> {
    let x = boss.rect.center_x();
    let y = boss.rect.bottom() - BOSS_MUZZLE_OFFSET;
    FAN_VX.into_iter().map(move |vx| Bullet::enemy(x, y, vx))
}

/// One straight shot, or a three-way fan under the spread buff.
pub fn player_volley(player: &Player, spread: bool) -> Vec<Bullet> {
    let x = player.rect.center_x();
    let top = player.rect.top();
    if spread {
        FAN_VX.iter().map(|&vx| Bullet::player(x, top, vx)).collect()
    } else {
        vec![Bullet::player(x, top, 0.0)]
    }
}
