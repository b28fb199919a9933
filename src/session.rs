//! The game session: the one owner of every entity and of the score.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::audio::AudioEvent;
use crate::clock::Clock;
use crate::compute::{self, spawn};
use crate::config::GameConfig;
use crate::entities::{ControlState, GameStatus, Player};
use crate::highscore::{self, HighScoreStore, JsonFileStore};
use crate::snapshot::RenderSnapshot;
use crate::store::EntityStore;

/// Everything the per-tick passes read and write.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub clock: Clock,
    pub entities: EntityStore,
    /// Never decreases within a session.
    pub score: u32,
    pub status: GameStatus,
    pub boss_active: bool,
    /// Set when a boss dies, cleared when the next one spawns.
    pub boss_defeated: bool,
    /// Index into `config.boss_stages` of the next encounter.
    pub next_boss_stage: usize,
    /// Record loaded at reset, raised when beaten at game over.
    pub high_score: u32,
    /// New record waiting to be written at the end of the tick.
    pub pending_high_score: Option<u32>,
    /// Sound cues raised during the current tick.
    pub events: Vec<AudioEvent>,
}

impl GameState {
    fn fresh(config: GameConfig, clock: Clock, high_score: u32) -> Self {
        let player = Player::new(
            config.width,
            config.height,
            config.starting_lives,
            clock.now_ms(),
        );
        Self {
            config,
            clock,
            entities: EntityStore::new(player),
            score: 0,
            status: GameStatus::Playing,
            boss_active: false,
            boss_defeated: false,
            next_boss_stage: 0,
            high_score,
            pending_high_score: None,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

/// A running game bound to a high-score store.
pub struct GameSession<S: HighScoreStore = JsonFileStore> {
    state: GameState,
    rng: StdRng,
    store: S,
}

impl GameSession<JsonFileStore> {
    /// Session persisting to `config.high_score_path`, seeded from entropy.
    pub fn from_config(config: GameConfig) -> Self {
        let store = JsonFileStore::new(config.high_score_path.clone());
        Self::new(config, store)
    }
}

impl<S: HighScoreStore> GameSession<S> {
    /// `config` must pass [`GameConfig::validate`]; spawn rolls panic on an
    /// empty speed range or a drop chance outside [0, 1].
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Reproducible session: identical seeds and inputs give identical games.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Self {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: S, rng: StdRng) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid game config: {:?}",
            config.validate().err()
        );
        let mut session = Self {
            state: GameState::fresh(config, Clock::new(), 0),
            rng,
            store,
        };
        session.reset();
        session
    }

    /// Start over: fresh player and enemy wave, zero score, cleared boss
    /// latches, and the high score re-read from the store. The clock keeps
    /// running.
    pub fn reset(&mut self) {
        let high_score = highscore::load_or_zero(&self.store);
        let config = self.state.config.clone();
        let clock = self.state.clock.clone();
        let mut state = GameState::fresh(config, clock, high_score);
        for _ in 0..state.config.enemy_count {
            let enemy = spawn::enemy(&mut self.rng, &state.config);
            state.entities.enemies.push(enemy);
        }
        self.state = state;
        info!(high_score, "session_reset");
    }

    /// Run one frame. While the session is over nothing moves; `restart`
    /// starts a new game instead.
    pub fn tick(&mut self, controls: ControlState, elapsed: Duration) -> RenderSnapshot {
        self.state.events.clear();
        self.state.clock.advance(elapsed);

        if self.state.is_over() {
            if controls.restart {
                self.reset();
            }
            return self.snapshot();
        }

        compute::tick(&mut self.state, &controls, &mut self.rng);

        if let Some(value) = self.state.pending_high_score.take() {
            highscore::persist(&mut self.store, value);
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for staging scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}
