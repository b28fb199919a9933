//! Per-tick simulation passes.
//!
//! All randomness comes through the injected `rng`, so callers control
//! determinism (tests use a seeded `StdRng`).

pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod player;
pub mod spawn;

use rand::Rng;

use crate::entities::ControlState;
use crate::session::GameState;

/// Advance the simulation by one tick: movement, then collisions, then the
/// difficulty check. The clock must already have been advanced.
pub fn tick(state: &mut GameState, controls: &ControlState, rng: &mut impl Rng) {
    movement::movement_pass(state, controls, rng);
    collision::collision_pass(state, rng);
    difficulty::difficulty_pass(state);
    check_invariants(state);
}

fn check_invariants(state: &GameState) {
    debug_assert_eq!(
        state.boss_active,
        state.entities.boss.is_some(),
        "boss flag out of sync with boss entity"
    );
    debug_assert_eq!(
        state.entities.enemies.len(),
        state.config.enemy_count,
        "enemy population drifted"
    );
    debug_assert!(
        state.entities.player.defeated || state.entities.player.lives > 0,
        "player alive with no lives"
    );
    debug_assert!(!state.entities.enemies.has_pending(), "uncommitted enemy mutations");
}
