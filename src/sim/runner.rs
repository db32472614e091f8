//! Flappy-style runner
//!
//! One body falls under gravity at a fixed column while paired obstacles scroll
//! in from the right edge. Passing an obstacle scores a point; every few points
//! the obstacles speed up and spawn more often, keeping their spacing constant.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, TimerId};
use super::collision::Rect;
use super::difficulty::Checkpoint;
use super::state::{Listener, Outcome, Phase, UniformSource};
use crate::consts::MAX_FRAME_MS;
use crate::tuning::RunnerTuning;

/// The player's body (visual box top edge and vertical velocity)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub y: f32,
    pub velocity: f32,
}

impl Body {
    pub fn at(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Semi-implicit Euler step in per-tick units
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    pub fn jump(&mut self, impulse: f32) {
        self.velocity = impulse;
    }
}

/// A pair of columns with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Distance travelled from the right edge
    pub offset: f32,
    /// Bottom of the upper column
    pub gap_top: f32,
    /// Top of the lower column
    pub gap_bottom: f32,
    /// Already scored
    pub passed: bool,
}

impl Obstacle {
    /// Upper and lower columns as boxes. They extend without bound vertically
    /// so only the gap edges matter.
    pub fn columns(&self, tuning: &RunnerTuning) -> [Rect; 2] {
        let right = tuning.width - self.offset;
        let left = right - tuning.obstacle_width;
        [
            Rect::new(left, right, f32::NEG_INFINITY, self.gap_top),
            Rect::new(left, right, self.gap_bottom, f32::INFINITY),
        ]
    }
}

/// Current obstacle speed and spawn period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pixels per tick
    pub speed: f32,
    pub spawn_ms: f64,
    pub checkpoint: Checkpoint,
}

impl Difficulty {
    pub fn initial(tuning: &RunnerTuning) -> Self {
        Self {
            speed: tuning.base_speed,
            spawn_ms: tuning.spawn_ms,
            checkpoint: Checkpoint::new(tuning.step_interval),
        }
    }

    /// Spawn period in ticks
    pub fn spawn_ticks(&self, tick_ms: f64) -> f64 {
        self.spawn_ms / tick_ms
    }

    /// Speed up if `score` reached a new checkpoint. Returns true on a step.
    pub fn step(&mut self, score: u32, tuning: &RunnerTuning) -> bool {
        if !self.checkpoint.reached(score) {
            return false;
        }
        self.speed += tuning.speed_increment;
        let ticks = tuning.spacing() as f64 / self.speed as f64;
        self.spawn_ms = ticks * tuning.tick_ms;
        true
    }
}

/// Everything a host needs to draw one runner frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub phase: Phase,
    pub time_ms: f64,
    /// Top-left of the body's visual box
    pub body: Vec2,
    pub velocity: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub speed: f32,
    pub terminal: bool,
    pub outcome: Option<Outcome>,
    pub message: Option<String>,
}

/// One runner instance with its own clock
#[derive(Debug, Clone)]
pub struct ObstacleRunner<R = Pcg32> {
    tuning: RunnerTuning,
    phase: Phase,
    listener: Listener,
    clock: Scheduler,
    body: Body,
    /// Spawn order, which is also right-to-left position order
    obstacles: Vec<Obstacle>,
    score: u32,
    difficulty: Difficulty,
    outcome: Option<Outcome>,
    next_id: u32,
    rng: R,
}

impl<R: UniformSource> ObstacleRunner<R> {
    pub fn new(tuning: RunnerTuning, rng: R) -> Self {
        Self {
            phase: Phase::Idle,
            listener: Listener::Detached,
            clock: Scheduler::new(),
            body: Body::at(tuning.start_y()),
            obstacles: Vec::new(),
            score: 0,
            difficulty: Difficulty::initial(&tuning),
            outcome: None,
            next_id: 1,
            rng,
            tuning,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn listener(&self) -> Listener {
        self.listener
    }

    pub fn body(&self) -> Body {
        self.body
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn tuning(&self) -> &RunnerTuning {
        &self.tuning
    }

    pub fn clock(&self) -> &Scheduler {
        &self.clock
    }

    /// Reset everything and begin a run. No-op while already running; from
    /// `Paused` it discards the paused run and starts over.
    pub fn start(&mut self) {
        if self.phase == Phase::Running {
            return;
        }
        self.reset();
        self.phase = Phase::Running;
        self.listener = Listener::Attached;
        self.clock.start(TimerId::Tick, self.tuning.tick_ms);
        self.clock.start(TimerId::Spawn, self.difficulty.spawn_ms);
        log::info!("Runner started");
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.clock.suspend();
            self.phase = Phase::Paused;
            log::info!("Runner paused at {:.0} ms", self.clock.now());
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.clock.resume();
            self.phase = Phase::Running;
            log::info!("Runner resumed");
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

    /// Halt timers, detach input, and discard the run
    pub fn stop(&mut self) {
        if self.phase != Phase::Idle {
            log::info!("Runner stopped");
        }
        self.reset();
    }

    /// Jump input. Dropped unless running with input attached.
    pub fn jump(&mut self) {
        if self.phase == Phase::Running && self.listener == Listener::Attached {
            self.body.jump(self.tuning.jump_impulse);
        }
    }

    /// Advance the timeline by `elapsed_ms`, running every tick and spawn that
    /// falls due. Returns one snapshot per tick.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<RunnerSnapshot> {
        let mut frames = Vec::new();
        if self.phase != Phase::Running {
            return frames;
        }

        let until = self.clock.now() + elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        while let Some(timer) = self.clock.next_due(until) {
            match timer {
                TimerId::Tick => {
                    self.tick();
                    frames.push(self.snapshot());
                }
                TimerId::Spawn => self.spawn(),
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

        self.body.integrate(self.tuning.gravity);

        let speed = self.difficulty.speed;
        for obstacle in &mut self.obstacles {
            obstacle.offset += speed;
        }

        let pass_line = self.tuning.body_x + self.tuning.body_size;
        let mut newly_passed = 0;
        for obstacle in self
            .obstacles
            .iter_mut()
            .filter(|o| !o.passed && o.offset > pass_line)
        {
            obstacle.passed = true;
            newly_passed += 1;
        }
        for _ in 0..newly_passed {
            self.score += 1;
            self.difficulty_step();
        }

        let limit = self.tuning.width + self.tuning.removal_margin;
        self.obstacles.retain(|o| o.offset <= limit);

        if self.collides() {
            self.game_over();
        }
    }

    /// Add one obstacle at the right edge with a random gap height
    pub fn spawn(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let min = self.tuning.min_height;
        let range = self.tuning.max_gap_top() - min;
        let gap_top = (self.rng.next_unit() * range).floor() + min;
        let id = self.next_id;
        self.next_id += 1;

        self.obstacles.push(Obstacle {
            id,
            offset: 0.0,
            gap_top,
            gap_bottom: gap_top + self.tuning.gap,
            passed: false,
        });
        log::debug!("Spawned obstacle {} with gap at {}", id, gap_top);
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            phase: self.phase,
            time_ms: self.clock.now(),
            body: Vec2::new(self.tuning.body_x, self.body.y),
            velocity: self.body.velocity,
            obstacles: self.obstacles.clone(),
            score: self.score,
            speed: self.difficulty.speed,
            terminal: self.phase.is_terminal(),
            outcome: self.outcome,
            message: self.outcome.map(|o| o.to_string()),
        }
    }

    /// Forgiving hit-box around the body
    pub fn hitbox(&self) -> Rect {
        let size = Vec2::splat(self.tuning.body_size);
        Rect::from_pos_size(Vec2::new(self.tuning.body_x, self.body.y), size)
            .inset(&self.tuning.hitbox)
    }

    fn difficulty_step(&mut self) {
        if self.difficulty.step(self.score, &self.tuning) {
            self.clock.start(TimerId::Spawn, self.difficulty.spawn_ms);
            log::info!(
                "Difficulty up at score {}: speed {:.1}, spawn every {:.0} ms",
                self.score,
                self.difficulty.speed,
                self.difficulty.spawn_ms
            );
        }
    }

    /// Ground is fatal, the ceiling only stops the body
    fn collides(&mut self) -> bool {
        let hit = self.hitbox();
        if hit.bottom >= self.tuning.ground_y() {
            return true;
        }
        if hit.top <= 0.0 {
            self.body = Body::at(0.0);
            return false;
        }
        self.obstacles
            .iter()
            .flat_map(|o| o.columns(&self.tuning))
            .any(|column| hit.overlaps(&column))
    }

    fn game_over(&mut self) {
        self.clock.cancel_all();
        self.listener = Listener::Detached;
        self.phase = Phase::Over;
        let outcome = Outcome::Crashed { score: self.score };
        self.outcome = Some(outcome);
        log::info!("{}", outcome);
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.listener = Listener::Detached;
        self.clock = Scheduler::new();
        self.body = Body::at(self.tuning.start_y());
        self.obstacles.clear();
        self.score = 0;
        self.difficulty = Difficulty::initial(&self.tuning);
        self.outcome = None;
        self.next_id = 1;
    }
}
