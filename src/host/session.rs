//! Host-side session: the context a render loop owns.
//!
//! A `Session` bundles everything a host needs between frames: the seeded
//! generator, the current game, the pause flag and the tick clock. Input
//! handlers and the timer both go through it, so they stay on one timeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::{ConfigError, GameConfig};
use crate::core::position::Direction;
use crate::core::rng::XorShift32;
use crate::core::state::GameState;
use crate::rules::{self, DirectionChange, StepOutcome};

use super::clock::TickClock;

/// Seed used when none is configured.
pub const DEFAULT_SESSION_SEED: u32 = 42;

/// Default time between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Configuration for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Grid used for every game in the session.
    pub game: GameConfig,

    /// Seed for the session generator. Reset does not reseed.
    pub seed: u32,

    /// Time between ticks.
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: DEFAULT_SESSION_SEED,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid.
    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Check the settings the grid config does not cover.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

/// What one scheduled tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Skipped because the session is paused.
    Paused,
    /// The game advanced.
    Stepped(StepOutcome),
}

/// A running series of games sharing one generator.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    rng: XorShift32,
    state: GameState,
    clock: TickClock,
    paused: bool,
    ticks: u64,
}

impl Session {
    /// Start a session and its first game.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = rules::create_rng(config.seed);
        let state = rules::create_game_state(&config.game, &mut rng);
        let clock = TickClock::new(config.tick_interval);
        tracing::info!(
            seed = config.seed,
            width = config.game.grid_width(),
            height = config.game.grid_height(),
            "session started"
        );

        Ok(Self {
            config,
            rng,
            state,
            clock,
            paused: false,
            ticks: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current game.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Independent copy of the current game.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        rules::snapshot(&self.state)
    }

    /// Generator word, for checkpointing the session.
    #[must_use]
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Ticks stepped in the current game.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::info!(paused, "pause changed");
        }
        self.paused = paused;
    }

    /// Start a new game. Continues the generator rather than reseeding it.
    pub fn reset(&mut self) {
        self.state = rules::create_game_state(&self.config.game, &mut self.rng);
        self.paused = false;
        self.ticks = 0;
        self.clock.reset();
        tracing::info!(food = %self.state.food(), "game reset");
    }

    /// Request a heading for the next tick.
    pub fn steer(&mut self, direction: Direction) -> DirectionChange {
        rules::set_direction(&mut self.state, direction)
    }

    /// Request a heading by input key.
    pub fn steer_key(&mut self, key: &str) -> DirectionChange {
        rules::set_direction_key(&mut self.state, key)
    }

    /// Run one scheduled tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }

        let outcome = rules::step(&mut self.state, &mut self.rng);
        if outcome != StepOutcome::Halted {
            self.ticks += 1;
        }
        TickOutcome::Stepped(outcome)
    }

    /// Feed elapsed time and run every tick that falls due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickOutcome> {
        let due = self.clock.advance(elapsed);
        (0..due).map(|_| self.tick()).collect()
    }

    /// Time left until the next tick.
    #[must_use]
    pub fn until_next_tick(&self) -> Duration {
        self.clock.until_next()
    }
}
