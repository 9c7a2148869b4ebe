//! # snake-rules
//!
//! A deterministic rules engine for grid Snake, built to sit under a
//! render loop.
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: No pixels, frames or wall-clock time. The host
//!    supplies a random source and calls one `step` per tick.
//!
//! 2. **Deterministic**: The same seed and the same inputs reproduce the same
//!    game on every platform.
//!
//! 3. **No Failure Paths**: Ignored input and game over are outcome values,
//!    never errors. Errors only exist when building configuration.
//!
//! ## Architecture
//!
//! - **Explicit State**: `GameState` is owned by the caller and mutated in
//!   place by the rules. There are no globals.
//!
//! - **Persistent Data Structures**: The snake body is an `im::Vector`, so a
//!   snapshot for rendering is an O(1) clone.
//!
//! ## Modules
//!
//! - `core`: Positions, headings, random sources, configuration, state
//! - `rules`: Game creation, heading changes, ticks, food placement
//! - `host`: Session context and tick clock for render loops
//!
//! ## Example
//!
//! ```
//! use snake_rules::{rules, Direction, GameConfig, StepOutcome};
//!
//! let mut rng = rules::create_rng(42);
//! let mut state = rules::create_game_state(&GameConfig::default(), &mut rng);
//!
//! rules::set_direction(&mut state, Direction::Up);
//! let outcome = rules::step(&mut state, &mut rng);
//!
//! assert!(matches!(outcome, StepOutcome::Moved | StepOutcome::Ate { .. }));
//! assert_eq!(state.direction(), Direction::Up);
//! ```

pub mod core;
pub mod rules;
pub mod host;

// Re-export commonly used types
pub use crate::core::{
    Direction, Position, Vector2, UnknownDirection,
    RandomSource, XorShift32, EntropyRng, SequenceRng,
    GameConfig, ConfigError,
    GameState, StateError,
};

pub use crate::rules::{Collision, DirectionChange, StepOutcome};

pub use crate::host::{Session, SessionConfig, TickClock, TickOutcome};
