//! Compile-time defaults. [`crate::config::GameConfig::default`] is built from
//! these; anything tunable at runtime is mirrored there.

// ── Playfield ────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

/// Nominal simulation rate (ticks per second).
pub const TICKS_PER_SECOND: u32 = 60;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 48.0;
/// Gap between the player's bottom edge and the bottom of the playfield.
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const STARTING_LIVES: u32 = 3;
pub const PLAYER_FIRE_COOLDOWN_MS: u64 = 220;
/// ~2 seconds of i-frames at 60 ticks per second.
pub const INVINCIBILITY_TICKS: u32 = 120;
/// Flicker toggles every this many i-frames.
pub const FLICKER_PERIOD: u32 = 5;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const PLAYER_BULLET_WIDTH: f32 = 6.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 16.0;
pub const PLAYER_BULLET_SPEED: f32 = 12.0;
pub const ENEMY_BULLET_WIDTH: f32 = 6.0;
pub const ENEMY_BULLET_HEIGHT: f32 = 12.0;
pub const ENEMY_BULLET_SPEED: f32 = 6.0;
/// Horizontal velocities of a three-way fan, left to right.
pub const FAN_VX: [f32; 3] = [-3.0, 0.0, 3.0];
/// Enemy bullets may drift this far past either side before being culled.
pub const ENEMY_BULLET_SIDE_MARGIN: f32 = 20.0;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_COUNT: usize = 10;
pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 40.0;
pub const ENEMY_SPAWN_Y_MIN: i32 = -120;
pub const ENEMY_SPAWN_Y_MAX: i32 = -60;
pub const ENEMY_SPEED_MIN: i32 = 2;
pub const ENEMY_SPEED_MAX: i32 = 4;

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_WIDTH: f32 = 160.0;
pub const BOSS_HEIGHT: f32 = 120.0;
pub const BOSS_TOP: f32 = 40.0;
pub const BOSS_SPEED: f32 = 3.0;
/// Inset from each side wall at which the boss turns around.
pub const BOSS_WALL_MARGIN: f32 = 10.0;
pub const BOSS_FIRE_COOLDOWN_MS: u64 = 700;
/// Enemy bullets leave the boss this far above its bottom edge.
pub const BOSS_MUZZLE_OFFSET: f32 = 10.0;

/// `(score threshold, hit points)` for each boss encounter, in order.
pub const BOSS_STAGES: [(u32, i32); 2] = [(500, 60), (1000, 90)];

// ── Power-ups ────────────────────────────────────────────────────────────────

pub const POWERUP_SIZE: f32 = 28.0;
pub const POWERUP_SPEED: f32 = 2.5;
pub const POWERUP_DROP_CHANCE: f64 = 0.12;
/// 8 seconds of wall time.
pub const BUFF_DURATION_MS: u64 = 8_000;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const SCORE_ENEMY_KILL: u32 = 10;
pub const SCORE_BOSS_CHIP: u32 = 1;
pub const SCORE_BOSS_KILL: u32 = 250;

// ── Persistence ──────────────────────────────────────────────────────────────

pub const HIGH_SCORE_FILE: &str = "highscore.dat";
