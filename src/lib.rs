//! Arcade Core - simulation for a flappy-style runner and a paddle duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, difficulty, timers)
//! - `tuning`: Data-driven game balance
//! - `arcade`: Host-facing controller (game selection, buttons, key routing)

pub mod arcade;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arcade::{Arcade, Controls, GameKind, Key, Snapshot};
pub use tuning::{DuelTuning, RunnerTuning, Tuning};

/// Game configuration constants
pub mod consts {
    /// Longest wall-clock slice a single `advance` call will simulate (ms)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Runner tick period (50 Hz, matches the original page loop)
    pub const RUNNER_TICK_MS: f64 = 20.0;
    /// Initial obstacle spawn period
    pub const RUNNER_SPAWN_MS: f64 = 1500.0;

    /// Runner playfield
    pub const RUNNER_WIDTH: f32 = 400.0;
    pub const RUNNER_HEIGHT: f32 = 600.0;
    pub const RUNNER_GROUND_HEIGHT: f32 = 50.0;

    /// Body defaults (per-tick units)
    pub const BODY_X: f32 = 50.0;
    pub const BODY_SIZE: f32 = 40.0;
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    /// Shortest column allowed above or below the gap
    pub const OBSTACLE_MIN_HEIGHT: f32 = 80.0;
    /// Obstacles are dropped once this far past the playfield
    pub const OBSTACLE_REMOVAL_MARGIN: f32 = 100.0;

    /// Difficulty: base speed, increment per step, score interval between steps
    pub const BASE_SPEED: f32 = 3.0;
    pub const SPEED_INCREMENT: f32 = 0.8;
    pub const DIFFICULTY_SCORE_INTERVAL: u32 = 3;

    /// Duel tick period (~60 Hz)
    pub const DUEL_TICK_MS: f64 = 1000.0 / 60.0;

    /// Duel playfield
    pub const DUEL_WIDTH: f32 = 800.0;
    pub const DUEL_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_WIDTH: f32 = 10.0;
    /// Gap between each paddle and its side wall
    pub const PADDLE_INSET: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 15.0;
    /// Added to |vx| on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Maximum |vy| when serving
    pub const BALL_SERVE_SPREAD: f32 = 2.0;
    /// vy at the very edge of a paddle
    pub const DEFLECTION_FACTOR: f32 = 5.0;
    pub const HIT_TOLERANCE: f32 = 1.0;

    /// Opponent controller
    pub const OPPONENT_PRECISION: f32 = 0.7;
    pub const OPPONENT_SPEED_RATIO: f32 = 0.5;
    pub const OPPONENT_DRIFT: f32 = 0.1;

    /// First to this many points wins
    pub const WIN_SCORE: u32 = 10;
}
