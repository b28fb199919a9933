//! Player state machine: lives, i-frames, buffs and the defeat latch.

use tracing::{debug, info};

use crate::audio::AudioEvent;
use crate::constants::FLICKER_PERIOD;
use crate::entities::{GameStatus, Player, PowerUpKind};
use crate::session::GameState;

/// How hard a contact hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    /// Enemy ship or enemy bullet: one life.
    Light,
    /// Boss body: two lives.
    Heavy,
}

impl Impact {
    pub fn damage(self) -> u32 {
        match self {
            Impact::Light => 1,
            Impact::Heavy => 2,
        }
    }
}

/// False while i-frames run, a shield is up, or the player is already down.
pub fn is_vulnerable(player: &Player, now_ms: u64) -> bool {
    !player.is_invincible() && !player.defeated && !player.shield_active(now_ms)
}

/// Apply a hit. Returns true when it landed.
///
/// Surviving hits recentre the player with fresh i-frames. A hit that takes
/// the last life latches defeat, ends the session and, if the score beats
/// the stored record, queues it for persistence.
pub fn apply_hit(state: &mut GameState, impact: Impact) -> bool {
    let now = state.clock.now_ms();
    let player = &mut state.entities.player;
    if !is_vulnerable(player, now) {
        return false;
    }

    player.lives = player.lives.saturating_sub(impact.damage());
    state.events.push(AudioEvent::Hit);
    debug!(lives = player.lives, ?impact, "player_hit");

    if player.lives == 0 {
        player.defeated = true;
        state.status = GameStatus::GameOver;
        state.events.push(AudioEvent::GameOver);
        info!(score = state.score, "game_over");
        if state.score > state.high_score {
            state.high_score = state.score;
            state.pending_high_score = Some(state.score);
            info!(high_score = state.score, "new_high_score");
        }
    } else {
        player.rect = Player::spawn_rect(state.config.width, state.config.height);
        player.invincible = state.config.invincibility_ticks;
    }
    true
}

/// Start (or restart) a buff window. The expiry is always now plus the full
/// duration, so re-collecting refreshes rather than stacks.
pub fn grant_buff(state: &mut GameState, kind: PowerUpKind) {
    let until = state.clock.now_ms() + state.config.buff_duration_ms;
    let player = &mut state.entities.player;
    let slot = match kind {
        PowerUpKind::Spread => &mut player.spread_until,
        PowerUpKind::Shield => &mut player.shield_until,
    };
    *slot = Some(slot.map_or(until, |current| current.max(until)));
    state.events.push(AudioEvent::PowerUp);
    debug!(?kind, until, "powerup_collected");
}

pub fn decay_invincibility(player: &mut Player) {
    player.invincible = player.invincible.saturating_sub(1);
}

/// Whether the sprite is drawn dimmed this frame while i-frames run.
pub fn flicker_dimmed(player: &Player) -> bool {
    player.invincible > 0 && (player.invincible / FLICKER_PERIOD) % 2 == 0
}

/// Milliseconds left on a buff, if it is active.
pub fn remaining_ms(until: Option<u64>, now_ms: u64) -> Option<u64> {
    until.filter(|&u| now_ms < u).map(|u| u - now_ms)
}
