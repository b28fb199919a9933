//! Read-only view of a session, built once per tick for the renderer.

use crate::audio::AudioEvent;
use crate::compute::{difficulty, player};
use crate::entities::{Aabb, PowerUpKind};
use crate::session::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    Boss,
    PowerUp(PowerUpKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Aabb,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub score: u32,
    /// Record as loaded or last persisted.
    pub high_score: u32,
    /// What the HUD should show as "High": the better of record and score.
    pub display_high: u32,
    pub lives: u32,
    pub invincible: u32,
    pub flicker_dimmed: bool,
    pub spread_remaining_ms: Option<u64>,
    pub shield_remaining_ms: Option<u64>,
    /// Boss health in [0, 1] while an encounter runs.
    pub boss_health: Option<f32>,
    /// A boss just went down and the next one has not arrived.
    pub boss_defeated_banner: bool,
    pub next_boss_threshold: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub width: f32,
    pub height: f32,
    pub frame: u64,
    /// Draw order: power-ups, enemies, boss, bullets, player.
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    pub game_over: bool,
    pub events: Vec<AudioEvent>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let e = &state.entities;
        let now = state.clock.now_ms();

        let mut sprites = Vec::with_capacity(
            2 + e.powerups.len() + e.enemies.len() + e.player_bullets.len() + e.enemy_bullets.len(),
        );
        sprites.extend(e.powerups.iter().map(|p| Sprite {
            kind: SpriteKind::PowerUp(p.kind),
            rect: p.rect,
        }));
        sprites.extend(e.enemies.iter().map(|en| Sprite {
            kind: SpriteKind::Enemy,
            rect: en.rect,
        }));
        if let Some(boss) = &e.boss {
            sprites.push(Sprite {
                kind: SpriteKind::Boss,
                rect: boss.rect,
            });
        }
        sprites.extend(e.player_bullets.iter().map(|b| Sprite {
            kind: SpriteKind::PlayerBullet,
            rect: b.rect,
        }));
        sprites.extend(e.enemy_bullets.iter().map(|b| Sprite {
            kind: SpriteKind::EnemyBullet,
            rect: b.rect,
        }));
        sprites.push(Sprite {
            kind: SpriteKind::Player,
            rect: e.player.rect,
        });

        let hud = Hud {
            score: state.score,
            high_score: state.high_score,
            display_high: state.high_score.max(state.score),
            lives: e.player.lives,
            invincible: e.player.invincible,
            flicker_dimmed: player::flicker_dimmed(&e.player),
            spread_remaining_ms: player::remaining_ms(e.player.spread_until, now),
            shield_remaining_ms: player::remaining_ms(e.player.shield_until, now),
            boss_health: e.boss.as_ref().map(|b| b.health_ratio()),
            boss_defeated_banner: state.boss_defeated && !state.boss_active && !state.is_over(),
            next_boss_threshold: difficulty::next_threshold(state),
        };

        Self {
            width: state.config.width,
            height: state.config.height,
            frame: state.clock.frame(),
            sprites,
            hud,
            game_over: state.is_over(),
            events: state.events.clone(),
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
