//! Paddle duel
//!
//! Human paddle on the left, reactive opponent on the right, one ball that
//! speeds up on every paddle hit. First side to the win score takes the match.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, TimerId};
use super::collision::Rect;
use super::difficulty::ramp;
use super::state::{Listener, Outcome, Phase, Side, UniformSource};
use crate::consts::MAX_FRAME_MS;
use crate::tuning::DuelTuning;

/// A paddle (top edge; height and column come from tuning)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

/// The ball (top-left corner and per-tick velocity)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchScore {
    pub left: u32,
    pub right: u32,
}

impl MatchScore {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Held directional keys for the human paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectionInput {
    pub up: bool,
    pub down: bool,
}

/// Where the opponent wants its paddle centre to be.
///
/// `unit` is a uniform sample in [0, 1); the deviation it adds shrinks to zero
/// as `precision` approaches 1.
pub fn opponent_target(ball_center_y: f32, precision: f32, paddle_height: f32, unit: f32) -> f32 {
    let deviation = (unit - 0.5) * (1.0 - precision) * paddle_height;
    ball_center_y + deviation
}

/// Everything a host needs to draw one duel frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelSnapshot {
    pub phase: Phase,
    pub time_ms: f64,
    pub left_paddle: f32,
    pub right_paddle: f32,
    pub ball: Vec2,
    pub ball_velocity: Vec2,
    pub score: MatchScore,
    pub terminal: bool,
    pub outcome: Option<Outcome>,
    pub message: Option<String>,
}

/// One duel instance with its own clock
#[derive(Debug, Clone)]
pub struct PaddleDuel<R = Pcg32> {
    tuning: DuelTuning,
    phase: Phase,
    listener: Listener,
    clock: Scheduler,
    input: DirectionInput,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    score: MatchScore,
    outcome: Option<Outcome>,
    rng: R,
}

impl<R: UniformSource> PaddleDuel<R> {
    pub fn new(tuning: DuelTuning, rng: R) -> Self {
        let start_y = tuning.paddle_start_y();
        let mut duel = Self {
            phase: Phase::Idle,
            listener: Listener::Detached,
            clock: Scheduler::new(),
            input: DirectionInput::default(),
            left: Paddle { y: start_y },
            right: Paddle { y: start_y },
            ball: Ball {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
            },
            score: MatchScore::default(),
            outcome: None,
            rng,
            tuning,
        };
        duel.center_ball();
        duel
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn listener(&self) -> Listener {
        self.listener
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn input(&self) -> DirectionInput {
        self.input
    }

    pub fn tuning(&self) -> &DuelTuning {
        &self.tuning
    }

    pub fn clock(&self) -> &Scheduler {
        &self.clock
    }

    /// Reset the match and serve. No-op while already running; from `Paused`
    /// it discards the paused match and starts over.
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            return;
        }
        self.reset();
        self.serve(Side::Right);
        self.phase = Phase::Running;
        self.listener = Listener::Attached;
        self.clock.start(TimerId::Tick, self.tuning.tick_ms);
        log::info!("Duel started");
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.clock.suspend();
            self.phase = Phase::Paused;
            log::info!("Duel paused at {:.0} ms", self.clock.now());
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.clock.resume();
            self.phase = Phase::Running;
            log::info!("Duel resumed");
        }
    }

    /// Flip between Running and Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Halt the clock, detach input, and discard the match
    pub fn stop(&mut self) {
        if self.phase != Phase::Idle {
            log::info!("Duel stopped");
        }
        self.reset();
    }

    /// Record held direction keys. Dropped while input is detached.
    pub fn set_direction(&mut self, up: bool, down: bool) {
        if self.listener == Listener::Attached {
            self.input = DirectionInput { up, down };
        }
    }

    pub fn set_up(&mut self, held: bool) {
        let down = self.input.down;
        self.set_direction(held, down);
    }

    pub fn set_down(&mut self, held: bool) {
        let up = self.input.up;
        self.set_direction(up, held);
    }

    /// Advance the timeline by `elapsed_ms`. Returns one snapshot per tick.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<DuelSnapshot> {
        let mut frames = Vec::new();
        if self.phase != Phase::Running {
            return frames;
        }

        let until = self.clock.now() + elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        while let Some(timer) = self.clock.next_due(until) {
            if timer == TimerId::Tick {
                self.tick();
                frames.push(self.snapshot());
            }
        }
        self.clock.settle(until);
        frames
    }

    /// One fixed simulation step
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        self.move_human();
        self.move_opponent();

        self.ball.pos += self.ball.vel;

        let max_y = self.tuning.height - self.tuning.ball_size;
        if self.ball.pos.y <= 0.0 || self.ball.pos.y >= max_y {
            self.ball.vel.y = -self.ball.vel.y;
            self.ball.pos.y = self.ball.pos.y.clamp(0.0, max_y);
        }

        if self.ball.pos.x < -self.tuning.ball_size {
            self.point(Side::Right);
            return;
        }
        if self.ball.pos.x > self.tuning.width {
            self.point(Side::Left);
            return;
        }

        if let Some(side) = self.paddle_contact() {
            self.bounce(side);
        }
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot {
            phase: self.phase,
            time_ms: self.clock.now(),
            left_paddle: self.left.y,
            right_paddle: self.right.y,
            ball: self.ball.pos,
            ball_velocity: self.ball.vel,
            score: self.score,
            terminal: self.phase.is_terminal(),
            outcome: self.outcome,
            message: self.outcome.map(|o| o.to_string()),
        }
    }

    pub fn paddle_rect(&self, side: Side) -> Rect {
        let t = &self.tuning;
        let (left, y) = match side {
            Side::Left => (t.paddle_inset, self.left.y),
            Side::Right => (t.width - t.paddle_inset - t.paddle_width, self.right.y),
        };
        Rect::new(left, left + t.paddle_width, y, y + t.paddle_height)
    }

    pub fn ball_rect(&self) -> Rect {
        Rect::from_pos_size(self.ball.pos, Vec2::splat(self.tuning.ball_size))
    }

    /// Paddle the ball is touching, if any. Only the paddle the ball is moving
    /// toward is tested, with the tolerance added to its facing edge.
    pub fn paddle_contact(&self) -> Option<Side> {
        let ball = self.ball_rect();
        let tolerance = self.tuning.hit_tolerance;
        if self.ball.vel.x < 0.0 {
            let paddle = self.paddle_rect(Side::Left).inflate_x(0.0, tolerance);
            ball.overlaps(&paddle).then_some(Side::Left)
        } else if self.ball.vel.x > 0.0 {
            let paddle = self.paddle_rect(Side::Right).inflate_x(tolerance, 0.0);
            ball.overlaps(&paddle).then_some(Side::Right)
        } else {
            None
        }
    }

    fn move_human(&mut self) {
        let speed = self.tuning.paddle_speed;
        let max_y = self.tuning.paddle_max_y();
        if self.input.up {
            self.left.y = (self.left.y - speed).max(0.0);
        }
        if self.input.down {
            self.left.y = (self.left.y + speed).min(max_y);
        }
    }

    fn move_opponent(&mut self) {
        let t = &self.tuning;
        let max_y = t.paddle_max_y();
        let ball_center = self.ball.pos.y + t.ball_size / 2.0;
        let paddle_center = self.right.y + t.paddle_height / 2.0;
        let target = opponent_target(
            ball_center,
            t.precision,
            t.paddle_height,
            self.rng.next_unit(),
        );

        let step = t.paddle_speed * t.opponent_speed_ratio;
        let mut y = self.right.y;
        if target > paddle_center {
            y = (y + step).min(max_y);
        } else if target < paddle_center {
            y = (y - step).max(0.0);
        }

        // Fixed per-tick drift toward a distant ball
        if (ball_center - paddle_center).abs() > t.paddle_height {
            let toward = if ball_center > paddle_center { 1.0 } else { -1.0 };
            y += toward * t.opponent_drift;
        }

        self.right.y = y.clamp(0.0, max_y);
    }

    /// Reflect off a paddle; impact height sets vy, |vx| ramps toward the cap
    fn bounce(&mut self, side: Side) {
        let paddle = self.paddle_rect(side);
        let ball_center = self.ball.pos.y + self.tuning.ball_size / 2.0;
        let relative = (ball_center - paddle.center_y()) / (paddle.height() / 2.0);

        self.ball.vel.x = -self.ball.vel.x;
        self.ball.vel.y = relative * self.tuning.deflection_factor;
        let speed = ramp(
            self.ball.vel.x.abs(),
            self.tuning.ball_speed_increment,
            self.tuning.ball_max_speed,
        );
        self.ball.vel.x = self.ball.vel.x.signum() * speed;
    }

    fn point(&mut self, scorer: Side) {
        self.score.award(scorer);
        log::debug!(
            "Point to {:?} ({}-{})",
            scorer,
            self.score.left,
            self.score.right
        );
        self.serve(scorer.opponent());

        if let Some(winner) = self.score.winner(self.tuning.win_score) {
            self.clock.cancel_all();
            self.listener = Listener::Detached;
            self.input = DirectionInput::default();
            self.phase = Phase::Over;
            let outcome = Outcome::Won(winner);
            self.outcome = Some(outcome);
            log::info!("{}", outcome);
        }
    }

    /// Centre the ball heading toward `toward` with a small random vertical speed
    fn serve(&mut self, toward: Side) {
        self.center_ball();
        let spread = self.tuning.serve_spread;
        self.ball.vel = Vec2::new(
            self.tuning.ball_start_speed * toward.direction(),
            self.rng.next_unit() * 2.0 * spread - spread,
        );
    }

    fn center_ball(&mut self) {
        let half = self.tuning.ball_size / 2.0;
        self.ball = Ball {
            pos: Vec2::new(
                self.tuning.width / 2.0 - half,
                self.tuning.height / 2.0 - half,
            ),
            vel: Vec2::ZERO,
        };
    }

    fn reset(&mut self) {
        let start_y = self.tuning.paddle_start_y();
        self.phase = Phase::Idle;
        self.listener = Listener::Detached;
        self.clock = Scheduler::new();
        self.input = DirectionInput::default();
        self.left = Paddle { y: start_y };
        self.right = Paddle { y: start_y };
        self.score = MatchScore::default();
        self.outcome = None;
        self.center_ball();
    }
}
