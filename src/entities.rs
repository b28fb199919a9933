//! All game entity types. Plain data plus a few geometric helpers; the rules
//! that move and resolve them live in [`crate::compute`].

use crate::constants::*;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box in playfield units, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Interiors intersect; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ── Status & input ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Snapshot of the player's controls for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Only honoured while the session is over.
    pub restart: bool,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Aabb,
    pub lives: u32,
    /// Remaining i-frames; decays by one per tick.
    pub invincible: u32,
    /// Clock time (ms) at which the spread buff lapses.
    pub spread_until: Option<u64>,
    /// Clock time (ms) at which the shield buff lapses.
    pub shield_until: Option<u64>,
    pub last_shot_ms: u64,
    /// Latches to true; never cleared within a session.
    pub defeated: bool,
}

impl Player {
    pub fn new(playfield_width: f32, playfield_height: f32, lives: u32, now_ms: u64) -> Self {
        Self {
            rect: Self::spawn_rect(playfield_width, playfield_height),
            lives,
            invincible: 0,
            spread_until: None,
            shield_until: None,
            last_shot_ms: now_ms,
            defeated: false,
        }
    }

    /// Default spawn: horizontally centred, resting just above the bottom.
    pub fn spawn_rect(playfield_width: f32, playfield_height: f32) -> Aabb {
        Aabb::new(
            playfield_width / 2.0 - PLAYER_WIDTH / 2.0,
            playfield_height - PLAYER_BOTTOM_MARGIN - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }

    pub fn spread_active(&self, now_ms: u64) -> bool {
        self.spread_until.is_some_and(|until| now_ms < until)
    }

    pub fn shield_active(&self, now_ms: u64) -> bool {
        self.shield_until.is_some_and(|until| now_ms < until)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible > 0
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Aabb,
    /// Downward speed in units per tick.
    pub speed: f32,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A projectile. Player and enemy bullets share the shape but live in
/// separate pools, so there is no owner field.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Aabb,
    pub vx: f32,
    pub vy: f32,
}

impl Bullet {
    /// Player shot: centred on `x`, bottom edge resting on `bottom`.
    pub fn player(x: f32, bottom: f32, vx: f32) -> Self {
        Self {
            rect: Aabb::new(
                x - PLAYER_BULLET_WIDTH / 2.0,
                bottom - PLAYER_BULLET_HEIGHT,
                PLAYER_BULLET_WIDTH,
                PLAYER_BULLET_HEIGHT,
            ),
            vx,
            vy: -PLAYER_BULLET_SPEED,
        }
    }

    /// Enemy shot centred on `(x, y)`.
    pub fn enemy(x: f32, y: f32, vx: f32) -> Self {
        Self {
            rect: Aabb::from_center(x, y, ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            vx,
            vy: ENEMY_BULLET_SPEED,
        }
    }
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub rect: Aabb,
    pub vx: f32,
    pub health: i32,
    pub max_health: i32,
    pub last_shot_ms: u64,
}

impl Boss {
    pub fn new(playfield_width: f32, hp: i32, now_ms: u64) -> Self {
        Self {
            rect: Aabb::new(
                playfield_width / 2.0 - BOSS_WIDTH / 2.0,
                BOSS_TOP,
                BOSS_WIDTH,
                BOSS_HEIGHT,
            ),
            vx: BOSS_SPEED,
            health: hp,
            max_health: hp,
            last_shot_ms: now_ms,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remaining health as a fraction of the spawn value, clamped to [0, 1].
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Three-way fan shot while active.
    Spread,
    /// Immunity to all contact damage while active.
    Shield,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Aabb,
    pub vy: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(cx: f32, cy: f32, kind: PowerUpKind) -> Self {
        Self {
            rect: Aabb::from_center(cx, cy, POWERUP_SIZE, POWERUP_SIZE),
            vy: POWERUP_SPEED,
            kind,
        }
    }
}
