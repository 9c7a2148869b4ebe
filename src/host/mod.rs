//! Host-side plumbing for render loops.
//!
//! - `Session`: owns the generator, the current game and the pause flag
//! - `TickClock`: turns elapsed time into fixed-interval ticks

pub mod clock;
pub mod session;

pub use clock::TickClock;
pub use session::{Session, SessionConfig, TickOutcome, DEFAULT_SESSION_SEED, DEFAULT_TICK_INTERVAL};
