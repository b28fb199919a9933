//! Runtime-tunable gameplay configuration.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! TOML file only needs the keys it wants to override:
//!
//! ```toml
//! enemy_count = 12
//! buff_duration_ms = 10000
//!
//! [[boss_stages]]
//! threshold = 500
//! hp = 60
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;
use crate::error::ConfigError;

/// One boss encounter: fires once the score reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BossStage {
    pub threshold: u32,
    pub hp: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Playfield ────────────────────────────────────────────────────────────
    pub width: f32,
    pub height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub player_speed: f32,
    pub player_fire_cooldown_ms: u64,
    pub invincibility_ticks: u32,
    pub buff_duration_ms: u64,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_count: usize,
    pub enemy_speed_min: i32,
    pub enemy_speed_max: i32,
    pub powerup_drop_chance: f64,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_fire_cooldown_ms: u64,
    pub boss_stages: Vec<BossStage>,
    /// Keep re-running the last stage after each defeat once the table is
    /// exhausted.
    pub repeat_final_stage: bool,

    // ── Persistence ──────────────────────────────────────────────────────────
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            starting_lives: STARTING_LIVES,
            player_speed: PLAYER_SPEED,
            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,
            invincibility_ticks: INVINCIBILITY_TICKS,
            buff_duration_ms: BUFF_DURATION_MS,
            enemy_count: ENEMY_COUNT,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            boss_fire_cooldown_ms: BOSS_FIRE_COOLDOWN_MS,
            boss_stages: BOSS_STAGES
                .iter()
                .map(|&(threshold, hp)| BossStage { threshold, hp })
                .collect(),
            repeat_final_stage: true,
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Like [`GameConfig::load`], but never fails. A missing file is the
    /// normal case and is silent; anything else is logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(error) => {
                warn!(error = %error, "config_load_failed; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < PLAYER_WIDTH.max(BOSS_WIDTH + 2.0 * BOSS_WALL_MARGIN)
            || self.height < PLAYER_HEIGHT + PLAYER_BOTTOM_MARGIN
        {
            return Err(ConfigError::Invalid(format!(
                "playfield {}x{} is too small",
                self.width, self.height
            )));
        }
        if self.enemy_speed_min > self.enemy_speed_max {
            return Err(ConfigError::Invalid(format!(
                "enemy speed range [{}, {}] is empty",
                self.enemy_speed_min, self.enemy_speed_max
            )));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::Invalid(format!(
                "powerup_drop_chance {} is outside [0, 1]",
                self.powerup_drop_chance
            )));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1".into()));
        }
        for pair in self.boss_stages.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(ConfigError::Invalid(
                    "boss stage thresholds must be strictly increasing".into(),
                ));
            }
        }
        if let Some(stage) = self.boss_stages.iter().find(|s| s.hp <= 0) {
            return Err(ConfigError::Invalid(format!(
                "boss stage at {} has non-positive hp {}",
                stage.threshold, stage.hp
            )));
        }
        Ok(())
    }
}
