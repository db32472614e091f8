//! Lifecycle and outcome types shared by both games

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Lifecycle of one game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Not started, or stopped by the host
    #[default]
    Idle,
    /// Timers live, input attached
    Running,
    /// Timers suspended, state frozen
    Paused,
    /// Run ended by the rules (crash or match won)
    Over,
}

impl Phase {
    /// Whether the game has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Over)
    }
}

/// Side of the duel playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing toward this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Runner hit the ground or an obstacle
    Crashed { score: u32 },
    /// Duel reached the win threshold
    Won(Side),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Crashed { score } => write!(f, "Game Over! Score: {score}"),
            Outcome::Won(Side::Left) => f.write_str("Player Left Wins!"),
            Outcome::Won(Side::Right) => f.write_str("Player Right (AI) Wins!"),
        }
    }
}

/// Whether the host's input channel currently feeds this instance.
///
/// Attached on `start`, detached on `stop` and game over. Input that arrives
/// while detached is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Listener {
    #[default]
    Detached,
    Attached,
}

/// Source of uniform random numbers in [0, 1)
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

impl UniformSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Always yields the same value (deterministic hosts and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant(pub f32);

impl UniformSource for Constant {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

/// Seeded generator used by default
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
