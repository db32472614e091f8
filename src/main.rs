//! Arcade Core entry point
//!
//! Native builds play both games headlessly with a simple autopilot on a
//! simulated 60 Hz frame clock and print each final frame as JSON.
//! Usage: `arcade-core [tuning.json]` (seed from `ARCADE_SEED`).

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use arcade_core::{Arcade, GameKind, Key, Snapshot};

    /// Host frame length
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;

    /// Steer whichever game is running from its latest frame
    struct Autopilot {
        up: bool,
        down: bool,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                up: false,
                down: false,
            }
        }

        fn steer(&mut self, arcade: &mut Arcade, frame: &Snapshot) {
            match frame {
                Snapshot::Runner(s) => {
                    let runner = &arcade.tuning().runner;
                    // Aim a little below the centre of the next gap
                    let target = s
                        .obstacles
                        .iter()
                        .find(|o| !o.passed)
                        .map(|o| o.gap_top + runner.gap * 0.6)
                        .unwrap_or(runner.height / 2.0);
                    if s.body.y + runner.body_size > target && s.velocity > 0.0 {
                        arcade.key_down(Key::Space);
                    }
                }
                Snapshot::Duel(s) => {
                    let duel = &arcade.tuning().duel;
                    let ball_center = s.ball.y + duel.ball_size / 2.0;
                    let paddle_center = s.left_paddle + duel.paddle_height / 2.0;
                    let up = ball_center < paddle_center - 10.0;
                    let down = ball_center > paddle_center + 10.0;
                    if up != self.up {
                        self.up = up;
                        if up {
                            arcade.key_down(Key::ArrowUp);
                        } else {
                            arcade.key_up(Key::ArrowUp);
                        }
                    }
                    if down != self.down {
                        self.down = down;
                        if down {
                            arcade.key_down(Key::ArrowDown);
                        } else {
                            arcade.key_up(Key::ArrowDown);
                        }
                    }
                }
            }
        }
    }

    fn play(arcade: &mut Arcade, kind: GameKind) -> Option<Snapshot> {
        arcade.select(kind);
        arcade.start();
        let mut pilot = Autopilot::new();

        for _ in 0..MAX_FRAMES {
            let frames = arcade.advance(FRAME_MS);
            if let Some(last) = frames.last() {
                if last.terminal() {
                    break;
                }
                pilot.steer(arcade, last);
            }
        }
        arcade.snapshot()
    }

    pub fn run() {
        env_logger::init();
        log::info!("Arcade Core (native) starting...");

        let tuning = match std::env::args().nth(1) {
            Some(path) => arcade_core::Tuning::load(std::path::Path::new(&path)),
            None => arcade_core::Tuning::default(),
        };
        let seed = std::env::var("ARCADE_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12345);

        let mut arcade = Arcade::new(tuning, seed);
        for kind in [GameKind::Runner, GameKind::Duel] {
            let Some(last) = play(&mut arcade, kind) else {
                continue;
            };
            match serde_json::to_string_pretty(&last) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Could not encode {} frame: {}", kind.as_str(), e),
            }
        }
        arcade.back();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
