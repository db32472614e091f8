//! Host-facing controller
//!
//! Owns the currently selected game, maps raw keys to game input, and reports
//! which global buttons (start / pause) the page should enable.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{DuelSnapshot, ObstacleRunner, PaddleDuel, Phase, RunnerSnapshot, seeded};
use crate::tuning::Tuning;

/// Physics games the arcade can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    Runner,
    Duel,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Runner => "runner",
            GameKind::Duel => "duel",
        }
    }

    /// Accepts the page's card ids as well as our own names
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner" | "flappy" => Some(GameKind::Runner),
            "duel" | "pong" => Some(GameKind::Duel),
            _ => None,
        }
    }
}

/// Keys the games care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` / `.key` value
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" | " " => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => Key::Other,
        }
    }
}

/// One frame of whichever game is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Snapshot {
    Runner(RunnerSnapshot),
    Duel(DuelSnapshot),
}

impl Snapshot {
    pub fn phase(&self) -> Phase {
        match self {
            Snapshot::Runner(s) => s.phase,
            Snapshot::Duel(s) => s.phase,
        }
    }

    pub fn terminal(&self) -> bool {
        match self {
            Snapshot::Runner(s) => s.terminal,
            Snapshot::Duel(s) => s.terminal,
        }
    }
}

/// Global button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub pause_label: &'static str,
}

impl Controls {
    pub fn for_phase(phase: Option<Phase>) -> Self {
        match phase {
            Some(Phase::Running) => Self {
                start_enabled: false,
                pause_enabled: true,
                pause_label: "PAUSE",
            },
            Some(Phase::Paused) => Self {
                start_enabled: false,
                pause_enabled: true,
                pause_label: "RESUME",
            },
            Some(Phase::Idle) | Some(Phase::Over) => Self {
                start_enabled: true,
                pause_enabled: false,
                pause_label: "PAUSE",
            },
            None => Self {
                start_enabled: false,
                pause_enabled: false,
                pause_label: "PAUSE",
            },
        }
    }
}

#[derive(Debug, Clone)]
enum Game {
    Runner(ObstacleRunner),
    Duel(PaddleDuel),
}

/// Menu plus at most one live game
#[derive(Debug, Clone)]
pub struct Arcade {
    tuning: Tuning,
    /// Seeds each freshly selected game
    rng: Pcg32,
    current: Option<Game>,
}

impl Arcade {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("Arcade initialized with seed: {}", seed);
        Self {
            tuning,
            rng: seeded(seed),
            current: None,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Selected game, or None while on the menu
    pub fn kind(&self) -> Option<GameKind> {
        match self.current {
            Some(Game::Runner(_)) => Some(GameKind::Runner),
            Some(Game::Duel(_)) => Some(GameKind::Duel),
            None => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match &self.current {
            Some(Game::Runner(g)) => Some(g.phase()),
            Some(Game::Duel(g)) => Some(g.phase()),
            None => None,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(self.phase())
    }

    /// Leave the current game and load a fresh instance of `kind`
    pub fn select(&mut self, kind: GameKind) {
        self.back();
        let rng = seeded(self.rng.random::<u64>());
        self.current = Some(match kind {
            GameKind::Runner => Game::Runner(ObstacleRunner::new(self.tuning.runner.clone(), rng)),
            GameKind::Duel => Game::Duel(PaddleDuel::new(self.tuning.duel.clone(), rng)),
        });
        log::info!("Selected {}", kind.as_str());
    }

    /// Stop the current game and return to the menu
    pub fn back(&mut self) {
        if let Some(game) = self.current.as_mut() {
            match game {
                Game::Runner(g) => g.stop(),
                Game::Duel(g) => g.stop(),
            }
        }
        self.current = None;
    }

    pub fn start(&mut self) {
        match self.current.as_mut() {
            Some(Game::Runner(g)) => g.start(),
            Some(Game::Duel(g)) => g.start(),
            None => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.current.as_mut() {
            Some(Game::Runner(g)) => g.toggle_pause(),
            Some(Game::Duel(g)) => g.toggle_pause(),
            None => {}
        }
    }

    pub fn key_down(&mut self, key: Key) {
        match (self.current.as_mut(), key) {
            (Some(Game::Runner(g)), Key::Space) => g.jump(),
            (Some(Game::Duel(g)), Key::ArrowUp) => g.set_up(true),
            (Some(Game::Duel(g)), Key::ArrowDown) => g.set_down(true),
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match (self.current.as_mut(), key) {
            (Some(Game::Duel(g)), Key::ArrowUp) => g.set_up(false),
            (Some(Game::Duel(g)), Key::ArrowDown) => g.set_down(false),
            _ => {}
        }
    }

    /// Click or tap inside the game area
    pub fn pointer_down(&mut self) {
        if let Some(Game::Runner(g)) = self.current.as_mut() {
            g.jump();
        }
    }

    /// Advance the selected game; returns its per-tick snapshots
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<Snapshot> {
        match self.current.as_mut() {
            Some(Game::Runner(g)) => g
                .advance(elapsed_ms)
                .into_iter()
                .map(Snapshot::Runner)
                .collect(),
            Some(Game::Duel(g)) => g
                .advance(elapsed_ms)
                .into_iter()
                .map(Snapshot::Duel)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        match &self.current {
            Some(Game::Runner(g)) => Some(Snapshot::Runner(g.snapshot())),
            Some(Game::Duel(g)) => Some(Snapshot::Duel(g.snapshot())),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcade_with(kind: GameKind) -> Arcade {
        let mut arcade = Arcade::new(Tuning::default(), 12345);
        arcade.select(kind);
        arcade
    }

    #[test]
    fn test_menu_has_no_game() {
        let mut arcade = Arcade::new(Tuning::default(), 1);
        assert_eq!(arcade.kind(), None);
        assert!(arcade.advance(100.0).is_empty());
        assert!(arcade.snapshot().is_none());
        arcade.start();
        assert_eq!(arcade.phase(), None);
        assert!(!arcade.controls().start_enabled);
    }

    #[test]
    fn test_controls_follow_phase() {
        let mut arcade = arcade_with(GameKind::Runner);
        assert_eq!(arcade.controls(), Controls::for_phase(Some(Phase::Idle)));
        assert!(arcade.controls().start_enabled);

        arcade.start();
        assert!(!arcade.controls().start_enabled);
        assert_eq!(arcade.controls().pause_label, "PAUSE");

        arcade.toggle_pause();
        assert_eq!(arcade.phase(), Some(Phase::Paused));
        assert_eq!(arcade.controls().pause_label, "RESUME");

        arcade.toggle_pause();
        assert_eq!(arcade.phase(), Some(Phase::Running));
    }

    #[test]
    fn test_space_jumps_runner() {
        let mut arcade = arcade_with(GameKind::Runner);
        arcade.start();
        arcade.advance(20.0);
        arcade.key_down(Key::from_code("Space"));
        arcade.advance(20.0);
        match arcade.snapshot() {
            Some(Snapshot::Runner(s)) => assert_eq!(s.velocity, -9.5),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_arrows_drive_duel() {
        let mut arcade = arcade_with(GameKind::Duel);
        arcade.start();
        arcade.key_down(Key::ArrowUp);
        let frames = arcade.advance(50.0);
        assert!(!frames.is_empty());
        arcade.key_up(Key::ArrowUp);
        match arcade.snapshot() {
            Some(Snapshot::Duel(s)) => assert!(s.left_paddle < 200.0),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_keys_for_other_game_ignored() {
        let mut arcade = arcade_with(GameKind::Duel);
        arcade.start();
        arcade.key_down(Key::Space);
        arcade.pointer_down();
        arcade.advance(17.0);
        match arcade.snapshot() {
            Some(Snapshot::Duel(s)) => assert_eq!(s.left_paddle, 200.0),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_back_returns_to_menu() {
        let mut arcade = arcade_with(GameKind::Runner);
        arcade.start();
        arcade.advance(100.0);
        arcade.back();
        assert_eq!(arcade.kind(), None);
        assert!(arcade.advance(100.0).is_empty());
    }

    #[test]
    fn test_select_replaces_running_game() {
        let mut arcade = arcade_with(GameKind::Runner);
        arcade.start();
        arcade.select(GameKind::Duel);
        assert_eq!(arcade.kind(), Some(GameKind::Duel));
        assert_eq!(arcade.phase(), Some(Phase::Idle));
    }

    #[test]
    fn test_snapshot_json_is_tagged() {
        let mut arcade = arcade_with(GameKind::Runner);
        arcade.start();
        let frames = arcade.advance(20.0);
        let json = serde_json::to_string(&frames[0]).expect("serializes");
        assert!(json.contains(r#""game":"runner""#));
        assert!(json.contains(r#""phase":"Running""#));
    }

    #[test]
    fn test_game_kind_names() {
        assert_eq!(GameKind::from_str("flappy"), Some(GameKind::Runner));
        assert_eq!(GameKind::from_str("Pong"), Some(GameKind::Duel));
        assert_eq!(GameKind::from_str("memory"), None);
        assert_eq!(Key::from_code("KeyA"), Key::Other);
    }
}
