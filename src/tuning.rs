//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a tuning
//! file only needs to list the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Forgiving hit-box: how far each edge is pulled in from the visual box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Balance for the flappy-style runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    // === Clocks ===
    pub tick_ms: f64,
    pub spawn_ms: f64,

    // === Playfield ===
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,

    // === Body ===
    pub body_x: f32,
    pub body_size: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub hitbox: Insets,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap: f32,
    pub min_height: f32,
    pub removal_margin: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_increment: f32,
    pub step_interval: u32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            tick_ms: RUNNER_TICK_MS,
            spawn_ms: RUNNER_SPAWN_MS,

            width: RUNNER_WIDTH,
            height: RUNNER_HEIGHT,
            ground_height: RUNNER_GROUND_HEIGHT,

            body_x: BODY_X,
            body_size: BODY_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            hitbox: Insets {
                left: 5.0,
                right: 5.0,
                top: 10.0,
                bottom: 35.0,
            },

            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            min_height: OBSTACLE_MIN_HEIGHT,
            removal_margin: OBSTACLE_REMOVAL_MARGIN,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            step_interval: DIFFICULTY_SCORE_INTERVAL,
        }
    }
}

impl RunnerTuning {
    /// Horizontal distance between consecutive obstacles, held constant across
    /// difficulty steps
    pub fn spacing(&self) -> f32 {
        (self.spawn_ms / self.tick_ms) as f32 * self.base_speed
    }

    /// y of the ground line
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Largest gap-top offset the spawner may draw (exclusive)
    pub fn max_gap_top(&self) -> f32 {
        self.height - self.gap - self.ground_height - self.min_height
    }

    /// Body y at the start of a run (vertically centred)
    pub fn start_y(&self) -> f32 {
        self.height / 2.0 - self.body_size / 2.0
    }
}

/// Balance for the paddle duel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelTuning {
    pub tick_ms: f64,

    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddles ===
    pub paddle_height: f32,
    pub paddle_width: f32,
    pub paddle_inset: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_increment: f32,
    pub serve_spread: f32,
    pub deflection_factor: f32,
    pub hit_tolerance: f32,

    // === Opponent ===
    /// 1.0 tracks the ball perfectly, lower values wobble more
    pub precision: f32,
    pub opponent_speed_ratio: f32,
    pub opponent_drift: f32,

    pub win_score: u32,
}

impl Default for DuelTuning {
    fn default() -> Self {
        Self {
            tick_ms: DUEL_TICK_MS,

            width: DUEL_WIDTH,
            height: DUEL_HEIGHT,

            paddle_height: PADDLE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_start_speed: BALL_START_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,
            serve_spread: BALL_SERVE_SPREAD,
            deflection_factor: DEFLECTION_FACTOR,
            hit_tolerance: HIT_TOLERANCE,

            precision: OPPONENT_PRECISION,
            opponent_speed_ratio: OPPONENT_SPEED_RATIO,
            opponent_drift: OPPONENT_DRIFT,

            win_score: WIN_SCORE,
        }
    }
}

impl DuelTuning {
    /// Highest y a paddle's top edge may reach
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Paddle top at the start of a match (vertically centred)
    pub fn paddle_start_y(&self) -> f32 {
        self.height / 2.0 - self.paddle_height / 2.0
    }
}

/// Balance for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub duel: DuelTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a JSON file, falling back to defaults when it is missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing() {
        // 1500 ms / 20 ms = 75 ticks at 3 px per tick
        let runner = RunnerTuning::default();
        assert!((runner.spacing() - 225.0).abs() < 0.001);
    }

    #[test]
    fn test_gap_bounds() {
        let runner = RunnerTuning::default();
        assert_eq!(runner.ground_y(), 550.0);
        assert_eq!(runner.max_gap_top(), 270.0);
        // Lowest possible gap still clears the ground column minimum
        assert!(runner.max_gap_top() + runner.gap <= runner.ground_y() - runner.min_height);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "duel": { "win_score": 3, "precision": 1.0 } }"#)
            .expect("valid json");
        assert_eq!(tuning.duel.win_score, 3);
        assert_eq!(tuning.duel.precision, 1.0);
        assert_eq!(tuning.duel.paddle_height, PADDLE_HEIGHT);
        assert_eq!(tuning.runner, RunnerTuning::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ runner: ").is_err());
    }

    #[test]
    fn test_paddle_bounds() {
        let duel = DuelTuning::default();
        assert_eq!(duel.paddle_max_y(), 400.0);
        assert_eq!(duel.paddle_start_y(), 200.0);
    }
}
