//! State transitions for a single game.
//!
//! Every operation here is infallible. Rejected input and the terminal
//! state come back as explicit outcome values:
//! - `set_direction` reports `DirectionChange`
//! - `step` reports `StepOutcome`
//! - `place_food` falls back to the origin when its attempts run out

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::{GameConfig, INITIAL_SNAKE_LENGTH};
use crate::core::position::{Direction, Position};
use crate::core::rng::{RandomSource, XorShift32};
use crate::core::state::GameState;

/// Result of a heading request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionChange {
    /// Stored as the pending heading.
    Accepted,
    /// Ignored: exact reverse of the committed heading.
    Reversal,
    /// Ignored: the key names no heading.
    UnknownKey,
}

impl DirectionChange {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == DirectionChange::Accepted
    }
}

/// What the head ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collision {
    /// Left the grid.
    Wall,
    /// Hit a body segment.
    Body,
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Translated one cell; length unchanged.
    Moved,
    /// Ate the food and grew; carries the new score.
    Ate { score: u32 },
    /// This tick ended the game.
    Collided(Collision),
    /// The game was already over; nothing changed.
    Halted,
}

impl StepOutcome {
    /// True if the game is over after this tick.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::Collided(_) | StepOutcome::Halted)
    }

    #[must_use]
    pub fn ate_food(self) -> bool {
        matches!(self, StepOutcome::Ate { .. })
    }
}

/// Create the deterministic generator for a seed.
#[must_use]
pub fn create_rng(seed: u32) -> XorShift32 {
    XorShift32::new(seed)
}

/// Build the opening state for `config`.
///
/// The head starts at the grid center heading right, with two segments
/// trailing to its left. Food is placed with `rng`.
pub fn create_game_state(config: &GameConfig, rng: &mut impl RandomSource) -> GameState {
    let start = config.start_position();
    let snake: Vector<Position> = (0..INITIAL_SNAKE_LENGTH as i32)
        .map(|offset| Position::new(start.x - offset, start.y))
        .collect();

    let mut state = GameState {
        config: *config,
        snake,
        direction: Direction::Right,
        pending_direction: Direction::Right,
        food: Position::default(),
        score: 0,
        game_over: false,
    };
    state.food = place_food(&state, rng);
    state
}

/// Queue a heading for the next step.
///
/// Reversals are judged against the committed heading, not the pending one,
/// so several turns between ticks simply overwrite each other.
pub fn set_direction(state: &mut GameState, direction: Direction) -> DirectionChange {
    if state.direction.is_opposite(direction) {
        tracing::trace!(current = %state.direction, requested = %direction, "ignoring reversal");
        return DirectionChange::Reversal;
    }

    state.pending_direction = direction;
    DirectionChange::Accepted
}

/// Queue a heading by input key (`up`, `down`, `left`, `right`).
pub fn set_direction_key(state: &mut GameState, key: &str) -> DirectionChange {
    match Direction::from_key(key) {
        Some(direction) => set_direction(state, direction),
        None => {
            tracing::trace!(key, "ignoring unknown direction key");
            DirectionChange::UnknownKey
        }
    }
}

/// Headings `set_direction` would currently accept.
#[must_use]
pub fn legal_directions(state: &GameState) -> SmallVec<[Direction; 4]> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| !state.direction.is_opposite(dir))
        .collect()
}

/// Advance the game by one tick.
///
/// Collisions are tested against the body as it stands before the move,
/// tail included. On a collision only the heading and the terminal flag
/// change. A finished game is frozen.
pub fn step(state: &mut GameState, rng: &mut impl RandomSource) -> StepOutcome {
    if state.game_over {
        return StepOutcome::Halted;
    }

    state.direction = state.pending_direction;
    let next_head = state.head().offset(state.direction);

    if !state.config.contains(next_head) {
        return finish(state, Collision::Wall, next_head);
    }
    if state.occupies(next_head) {
        return finish(state, Collision::Body, next_head);
    }

    let ate_food = next_head == state.food;
    state.snake.push_front(next_head);

    if !ate_food {
        state.snake.pop_back();
        return StepOutcome::Moved;
    }

    state.score += 1;
    state.food = place_food(state, rng);
    tracing::debug!(score = state.score, length = state.snake.len(), food = %state.food, "food eaten");

    StepOutcome::Ate { score: state.score }
}

fn finish(state: &mut GameState, collision: Collision, at: Position) -> StepOutcome {
    state.game_over = true;
    tracing::debug!(?collision, %at, score = state.score, "game over");
    StepOutcome::Collided(collision)
}

/// Pick a free cell for the food.
///
/// Draws `x` then `y` per attempt, for at most one attempt per grid cell.
/// When every attempt lands on the snake the result is `(0, 0)`, occupied
/// or not.
pub fn place_food(state: &GameState, rng: &mut impl RandomSource) -> Position {
    let occupied: FxHashSet<Position> = state.snake.iter().copied().collect();
    let width = state.grid_width();
    let height = state.grid_height();

    for _ in 0..state.config.cell_count() {
        let candidate = Position::new(scale(rng.next_unit(), width), scale(rng.next_unit(), height));
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }

    tracing::debug!(length = state.snake.len(), "no free cell found; placing food at origin");
    Position::default()
}

/// Independent copy of `state` for the renderer to hold on to.
#[must_use]
pub fn snapshot(state: &GameState) -> GameState {
    state.clone()
}

fn scale(unit: f64, bound: u32) -> i32 {
    let cell = (unit * f64::from(bound)).floor() as i64;
    cell.clamp(0, i64::from(bound) - 1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SequenceRng;

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn test_create_game_state() {
        let config = GameConfig::square(10).unwrap();
        let state = create_game_state(&config, &mut SequenceRng::constant(0.5));

        assert_eq!(state.snake().iter().copied().collect::<Vec<_>>(), cells(&[(5, 5), (4, 5), (3, 5)]));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        // 0.5 lands on the head; the retry also does, so the draws run out
        // and the fallback is used.
        assert_eq!(state.food(), Position::new(0, 0));
    }

    #[test]
    fn test_create_game_state_places_food_off_snake() {
        let config = GameConfig::square(10).unwrap();
        let state = create_game_state(&config, &mut SequenceRng::new(vec![0.15, 0.85]));

        assert_eq!(state.food(), Position::new(1, 8));
        assert!(!state.occupies(state.food()));
    }

    #[test]
    fn test_step_moves_head() {
        let config = GameConfig::square(10).unwrap();
        let mut rng = SequenceRng::constant(0.5);
        let mut state = create_game_state(&config, &mut rng);

        let outcome = step(&mut state, &mut rng);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(state.head(), Position::new(6, 5));
        assert_eq!(state.len(), 3);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reversal_rejected() {
        let config = GameConfig::square(10).unwrap();
        let mut rng = SequenceRng::constant(0.5);
        let mut state = create_game_state(&config, &mut rng);

        assert_eq!(set_direction(&mut state, Direction::Left), DirectionChange::Reversal);
        step(&mut state, &mut rng);

        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_judged_against_committed_heading() {
        let config = GameConfig::square(10).unwrap();
        let mut rng = SequenceRng::constant(0.5);
        let mut state = create_game_state(&config, &mut rng);

        assert!(set_direction(&mut state, Direction::Up).is_accepted());
        // Down reverses the pending heading but not the committed one.
        assert!(set_direction(&mut state, Direction::Down).is_accepted());
        assert_eq!(state.pending_direction(), Direction::Down);
        assert_eq!(state.direction(), Direction::Right);

        step(&mut state, &mut rng);
        assert_eq!(state.head(), Position::new(5, 6));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = GameConfig::square(10).unwrap();
        let mut state = create_game_state(&config, &mut SequenceRng::constant(0.5));
        let before = state.clone();

        assert_eq!(set_direction_key(&mut state, "diagonal"), DirectionChange::UnknownKey);
        assert_eq!(state, before);

        assert_eq!(set_direction_key(&mut state, "up"), DirectionChange::Accepted);
        assert_eq!(state.pending_direction(), Direction::Up);
    }

    #[test]
    fn test_growth_and_score() {
        let config = GameConfig::square(5).unwrap();
        let mut rng = SequenceRng::constant(0.0);
        let mut state = create_game_state(&config, &mut rng);
        state.food = state.head().offset(Direction::Right);

        let outcome = step(&mut state, &mut rng);

        assert_eq!(outcome, StepOutcome::Ate { score: 1 });
        assert_eq!(state.score(), 1);
        assert_eq!(state.len(), 4);
        assert!(!state.occupies(state.food()));
    }

    #[test]
    fn test_wall_collision() {
        let config = GameConfig::new(4, 3).unwrap();
        let mut state =
            GameState::from_parts(config, cells(&[(3, 1)]), Direction::Right, Position::new(0, 0)).unwrap();
        let mut rng = SequenceRng::constant(0.5);

        let outcome = step(&mut state, &mut rng);

        assert_eq!(outcome, StepOutcome::Collided(Collision::Wall));
        assert!(state.is_game_over());
        assert_eq!(state.snake().iter().copied().collect::<Vec<_>>(), cells(&[(3, 1)]));
        assert_eq!(state.food(), Position::new(0, 0));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_body_collision() {
        let config = GameConfig::square(6).unwrap();
        // Head at (2,2) heading up into (2,1), which is part of the body.
        let mut state = GameState::from_parts(
            config,
            cells(&[(2, 2), (3, 2), (3, 1), (2, 1), (1, 1)]),
            Direction::Left,
            Position::new(5, 5),
        )
        .unwrap();
        set_direction(&mut state, Direction::Up);

        let outcome = step(&mut state, &mut SequenceRng::constant(0.5));

        assert_eq!(outcome, StepOutcome::Collided(Collision::Body));
        assert!(state.is_game_over());
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_tail_cell_counts_as_body() {
        let config = GameConfig::square(6).unwrap();
        // A 2x2 loop: the next head is the current tail.
        let mut state = GameState::from_parts(
            config,
            cells(&[(1, 1), (2, 1), (2, 2), (1, 2)]),
            Direction::Down,
            Position::new(5, 5),
        )
        .unwrap();

        let outcome = step(&mut state, &mut SequenceRng::constant(0.5));
        assert_eq!(outcome, StepOutcome::Collided(Collision::Body));
    }

    #[test]
    fn test_single_segment_turns_freely() {
        let config = GameConfig::square(6).unwrap();
        let mut state =
            GameState::from_parts(config, cells(&[(2, 2)]), Direction::Right, Position::new(5, 5)).unwrap();
        let mut rng = SequenceRng::constant(0.5);

        for dir in [Direction::Down, Direction::Left, Direction::Up, Direction::Right] {
            set_direction(&mut state, dir);
            assert_eq!(step(&mut state, &mut rng), StepOutcome::Moved);
        }
        assert_eq!(state.head(), Position::new(2, 2));
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_halted_after_game_over() {
        let config = GameConfig::new(4, 1).unwrap();
        let mut rng = SequenceRng::constant(0.0);
        let mut state = create_game_state(&config, &mut rng);

        assert_eq!(step(&mut state, &mut rng), StepOutcome::Moved);
        assert_eq!(step(&mut state, &mut rng), StepOutcome::Collided(Collision::Wall));

        let frozen = state.clone();
        for _ in 0..5 {
            assert_eq!(step(&mut state, &mut rng), StepOutcome::Halted);
        }
        assert_eq!(state, frozen);
        assert!(StepOutcome::Halted.is_terminal());
    }

    #[test]
    fn test_place_food_avoids_snake() {
        let config = GameConfig::square(4).unwrap();
        let state = GameState::from_parts(
            config,
            cells(&[(0, 0), (1, 0), (2, 0)]),
            Direction::Left,
            Position::new(3, 3),
        )
        .unwrap();

        let food = place_food(&state, &mut SequenceRng::new(vec![0.0, 0.0, 0.9, 0.9]));

        assert_eq!(food, Position::new(3, 3));
        assert!(!state.occupies(food));
    }

    #[test]
    fn test_place_food_fallback_on_full_board() {
        let config = GameConfig::new(4, 1).unwrap();
        let state = GameState::from_parts(
            config,
            cells(&[(3, 0), (2, 0), (1, 0), (0, 0)]),
            Direction::Right,
            Position::new(0, 0),
        )
        .unwrap();
        let mut rng = SequenceRng::constant(0.6);

        assert_eq!(place_food(&state, &mut rng), Position::new(0, 0));
        // One x and one y draw per cell.
        assert_eq!(rng.draws(), 8);
    }

    #[test]
    fn test_place_food_clamps_out_of_range_draws() {
        let config = GameConfig::square(4).unwrap();
        let state = GameState::from_parts(config, cells(&[(0, 0)]), Direction::Right, Position::new(1, 1)).unwrap();

        assert_eq!(place_food(&state, &mut SequenceRng::constant(1.0)), Position::new(3, 3));
    }

    #[test]
    fn test_legal_directions() {
        let config = GameConfig::square(6).unwrap();
        let state = create_game_state(&config, &mut SequenceRng::constant(0.1));

        let legal = legal_directions(&state);
        assert_eq!(legal.as_slice(), &[Direction::Up, Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let config = GameConfig::square(8).unwrap();
        let mut rng = SequenceRng::constant(0.1);
        let mut state = create_game_state(&config, &mut rng);

        let snap = snapshot(&state);
        step(&mut state, &mut rng);
        set_direction(&mut state, Direction::Down);

        assert_eq!(snap.head(), Position::new(4, 4));
        assert_eq!(snap.pending_direction(), Direction::Right);
        assert_ne!(snap, state);
    }
}
