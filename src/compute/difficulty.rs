//! Boss escalation.
//!
//! A latched state machine over `boss_active`, `boss_defeated` and the
//! score. Stages come from [`crate::config::GameConfig::boss_stages`] and are
//! consumed in order: the first fires on its threshold while nothing has been
//! defeated yet, each later one fires on its threshold only after the previous
//! boss went down, clearing the latch as it spawns. Once the list is exhausted
//! the final stage fires again after every defeat, unless
//! `repeat_final_stage` is off.

use tracing::info;

use crate::config::BossStage;
use crate::session::GameState;

use super::spawn;

pub fn difficulty_pass(state: &mut GameState) {
    if state.boss_active || state.entities.player.defeated {
        return;
    }
    let Some(stage) = upcoming_stage(state) else {
        return;
    };
    if state.score < stage.threshold {
        return;
    }
    let first = state.next_boss_stage == 0;
    if first == state.boss_defeated {
        return;
    }

    debug_assert!(state.entities.boss.is_none(), "boss already live");
    state.boss_defeated = false;
    state.boss_active = true;
    state.entities.boss = Some(spawn::boss(&state.config, stage.hp, state.clock.now_ms()));
    state.next_boss_stage = (state.next_boss_stage + 1).min(state.config.boss_stages.len());
    info!(
        stage = state.next_boss_stage,
        hp = stage.hp,
        score = state.score,
        "boss_spawned"
    );
}

/// Score at which the next encounter starts, if one remains.
pub fn next_threshold(state: &GameState) -> Option<u32> {
    upcoming_stage(state).map(|stage| stage.threshold)
}

fn upcoming_stage(state: &GameState) -> Option<BossStage> {
    let stages = &state.config.boss_stages;
    match stages.get(state.next_boss_stage) {
        Some(stage) => Some(*stage),
        None if state.config.repeat_final_stage => stages.last().copied(),
        None => None,
    }
}
