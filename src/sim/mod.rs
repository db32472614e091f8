//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven by logical timers
//! - Randomness only through `UniformSource`
//! - Stable iteration order (spawn order, ids assigned per run)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod duel;
pub mod runner;
pub mod state;

pub use clock::{Scheduler, TimerId};
pub use collision::Rect;
pub use difficulty::{Checkpoint, ramp};
pub use duel::{Ball, DirectionInput, DuelSnapshot, MatchScore, Paddle, PaddleDuel, opponent_target};
pub use runner::{Body, Difficulty, Obstacle, ObstacleRunner, RunnerSnapshot};
pub use state::{Constant, Listener, Outcome, Phase, Side, UniformSource, seeded};
