use arcade_core::sim::{
    Checkpoint, Difficulty, ObstacleRunner, PaddleDuel, Phase, opponent_target, seeded,
};
use arcade_core::{DuelTuning, RunnerTuning};
use proptest::prelude::*;

proptest! {
    #[test]
    fn paused_runner_never_changes(seed in any::<u64>(), run_ms in 0u32..2_000, steps in 1usize..50) {
        let mut runner = ObstacleRunner::new(RunnerTuning::default(), seeded(seed));
        runner.start();
        for _ in 0..run_ms / 100 {
            runner.jump();
            runner.advance(100.0);
        }
        runner.pause();
        let frozen = runner.snapshot();

        for i in 0..steps {
            prop_assert!(runner.advance(i as f64 * 37.0).is_empty());
            runner.tick();
            runner.spawn();
            runner.jump();
        }
        prop_assert_eq!(runner.snapshot(), frozen);
    }

    #[test]
    fn paused_duel_never_changes(seed in any::<u64>(), run_ms in 0u32..5_000, steps in 1usize..50) {
        let mut duel = PaddleDuel::new(DuelTuning::default(), seeded(seed));
        duel.start();
        duel.advance(run_ms as f64 % 250.0);
        duel.pause();
        let frozen = duel.snapshot();

        for i in 0..steps {
            prop_assert!(duel.advance(i as f64 * 13.0).is_empty());
            duel.tick();
        }
        prop_assert_eq!(duel.snapshot(), frozen);
    }

    #[test]
    fn spacing_holds_across_steps(steps in 1u32..40) {
        let tuning = RunnerTuning::default();
        let mut difficulty = Difficulty::initial(&tuning);
        let mut last_speed = difficulty.speed;

        for score in 1..=steps * tuning.step_interval {
            difficulty.step(score, &tuning);
            prop_assert!(difficulty.speed >= last_speed);
            last_speed = difficulty.speed;

            let spacing = difficulty.spawn_ticks(tuning.tick_ms) * difficulty.speed as f64;
            prop_assert!((spacing - tuning.spacing() as f64).abs() < 1e-3);
        }
    }

    #[test]
    fn checkpoint_fires_once_per_multiple(every in 1u32..10, scores in prop::collection::vec(0u32..100, 1..60)) {
        let mut checkpoint = Checkpoint::new(every);
        let mut fired = Vec::new();
        for score in scores {
            if checkpoint.reached(score) {
                prop_assert_eq!(score % every, 0);
                prop_assert!(!fired.contains(&score));
                fired.push(score);
            }
        }
    }

    #[test]
    fn perfect_opponent_targets_ball_center(center in 0.0f32..500.0, unit in 0.0f32..1.0) {
        prop_assert_eq!(opponent_target(center, 1.0, 100.0, unit), center);
    }

    #[test]
    fn free_fall_matches_closed_form(n in 1u32..30) {
        let mut runner = ObstacleRunner::new(RunnerTuning::default(), seeded(0));
        runner.start();
        let y0 = runner.body().y;
        let g = runner.tuning().gravity;
        for _ in 0..n {
            runner.tick();
        }
        let n = n as f32;
        prop_assert_eq!(runner.body().velocity, n * g);
        prop_assert_eq!(runner.body().y, y0 + g * n * (n + 1.0) / 2.0);
    }

    #[test]
    fn start_twice_is_start_once(seed in any::<u64>()) {
        let mut once = PaddleDuel::new(DuelTuning::default(), seeded(seed));
        let mut twice = PaddleDuel::new(DuelTuning::default(), seeded(seed));
        once.start();
        twice.start();
        twice.start();
        prop_assert_eq!(once.snapshot(), twice.snapshot());

        let mut once = ObstacleRunner::new(RunnerTuning::default(), seeded(seed));
        let mut twice = ObstacleRunner::new(RunnerTuning::default(), seeded(seed));
        once.start();
        twice.start();
        twice.start();
        prop_assert_eq!(once.snapshot(), twice.snapshot());
        prop_assert_eq!(twice.score(), 0);
        prop_assert!(twice.obstacles().is_empty());
    }

    /// Paddle hits only ever come from the paddle the ball was heading toward,
    /// and each hit ramps |vx| without passing the cap.
    #[test]
    fn paddle_hits_are_direction_gated(seed in any::<u64>()) {
        let tuning = DuelTuning {
            win_score: 3,
            ..Default::default()
        };
        let mut duel = PaddleDuel::new(tuning.clone(), seeded(seed));
        duel.start();
        let mut prev = duel.snapshot();

        for _ in 0..3_000 {
            let frames = duel.advance(tuning.tick_ms);
            for frame in frames {
                let served = frame.score != prev.score;
                let before = prev.ball_velocity.x;
                let after = frame.ball_velocity.x;

                if !served && before.signum() != after.signum() {
                    if before < 0.0 {
                        prop_assert!(frame.ball.x < tuning.width / 2.0);
                    } else {
                        prop_assert!(frame.ball.x > tuning.width / 2.0);
                    }
                    prop_assert!(after.abs() >= before.abs());
                    prop_assert!(after.abs() <= tuning.ball_max_speed);
                }
                prev = frame;
            }
            if duel.phase() == Phase::Over {
                break;
            }
        }
    }
}
