//! Rules for the grid Snake game.
//!
//! The rules define:
//! - The opening position
//! - How heading requests are accepted or ignored
//! - How one tick moves, grows or ends the game
//! - Where food appears
//!
//! All transitions act on a `GameState` owned by the caller and never fail.

pub mod engine;

pub use engine::{
    create_game_state, create_rng, legal_directions, place_food, set_direction, set_direction_key,
    snapshot, step, Collision, DirectionChange, StepOutcome,
};
