//! Core engine types: positions, headings, RNG sources, configuration, state.
//!
//! This module holds data only. The transitions that act on it live in
//! `rules`.

pub mod position;
pub mod rng;
pub mod config;
pub mod state;

pub use position::{Direction, Position, UnknownDirection, Vector2};
pub use rng::{EntropyRng, RandomSource, SequenceRng, XorShift32, DEFAULT_SEED};
pub use config::{ConfigError, GameConfig, DEFAULT_GRID_SIZE, INITIAL_SNAKE_LENGTH, MIN_GRID_WIDTH};
pub use state::{GameState, StateError};
