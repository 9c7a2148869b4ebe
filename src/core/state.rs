//! Canonical game state.
//!
//! ## GameState
//!
//! - Grid configuration (fixed for the state's lifetime)
//! - Snake body, head first
//! - Committed and pending heading
//! - Food cell, score, terminal flag
//!
//! The snake body is an `im::Vector`, so cloning a state is O(1) and the
//! clone is fully independent of later mutation on either side.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GameConfig;
use super::position::{Direction, Position};

/// Why a staged or deserialized state was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("snake must have at least one segment")]
    EmptySnake,

    #[error("snake segment {0} lies outside the grid")]
    SegmentOutOfBounds(Position),

    #[error("snake occupies {0} more than once")]
    DuplicateSegment(Position),

    #[error("food {0} lies outside the grid")]
    FoodOutOfBounds(Position),

    #[error("pending heading {pending} reverses committed heading {direction}")]
    PendingReversal { direction: Direction, pending: Direction },
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) snake: Vector<Position>,
    pub(crate) direction: Direction,
    pub(crate) pending_direction: Direction,
    pub(crate) food: Position,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
}

impl GameState {
    /// Stage a live state from explicit parts.
    ///
    /// Both headings are set to `direction`, the score to zero. Food may sit
    /// on the snake, matching what the placement fallback can produce.
    pub fn from_parts(
        config: GameConfig,
        snake: impl IntoIterator<Item = Position>,
        direction: Direction,
        food: Position,
    ) -> Result<Self, StateError> {
        let snake: Vector<Position> = snake.into_iter().collect();
        if snake.is_empty() {
            return Err(StateError::EmptySnake);
        }

        let mut seen = FxHashSet::default();
        for &segment in &snake {
            if !config.contains(segment) {
                return Err(StateError::SegmentOutOfBounds(segment));
            }
            if !seen.insert(segment) {
                return Err(StateError::DuplicateSegment(segment));
            }
        }

        if !config.contains(food) {
            return Err(StateError::FoodOutOfBounds(food));
        }

        Ok(Self {
            config,
            snake,
            direction,
            pending_direction: direction,
            food,
            score: 0,
            game_over: false,
        })
    }

    /// Set the starting score of a staged state.
    #[must_use]
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    // === Grid ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid_width(&self) -> u32 {
        self.config.grid_width()
    }

    #[must_use]
    pub fn grid_height(&self) -> u32 {
        self.config.grid_height()
    }

    // === Snake ===

    /// Body segments, head first.
    #[must_use]
    pub fn snake(&self) -> &Vector<Position> {
        &self.snake
    }

    /// Head segment.
    #[must_use]
    pub fn head(&self) -> Position {
        // Non-empty by construction.
        self.snake[0]
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Always false; a snake has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Check whether any segment occupies `pos`.
    #[must_use]
    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.iter().any(|&segment| segment == pos)
    }

    // === Heading ===

    /// Heading applied on the most recent step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading the next step will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    // === Progress ===

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[derive(Deserialize)]
struct RawGameState {
    config: GameConfig,
    snake: Vec<Position>,
    direction: Direction,
    pending_direction: Direction,
    food: Position,
    score: u32,
    game_over: bool,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        if raw.direction.is_opposite(raw.pending_direction) {
            return Err(StateError::PendingReversal {
                direction: raw.direction,
                pending: raw.pending_direction,
            });
        }

        let mut state = GameState::from_parts(raw.config, raw.snake, raw.direction, raw.food)?;
        state.pending_direction = raw.pending_direction;
        state.score = raw.score;
        state.game_over = raw.game_over;
        Ok(state)
    }
}
