//! Whole-run properties checked over many seeds

use std::time::Duration;
use glucoplay::config::{
    CarbTuning, CatcherTuning, ChooserTuning, NeedleTuning, StarTuning,
};
use glucoplay::games::{
    budget_for_level, CarbCounterGame, CatcherGame, CatcherPhase, ChooserGame, MiniGame,
    NeedleGame, NeedlePhase, QuizPhase, ScenarioGame, SpawnKind, StarCollectorGame, StarPhase,
    StarTally,
};
use glucoplay::util::GameRng;

const SEEDS: u64 = 25;

fn rng(seed: u64) -> Box<GameRng> {
    Box::new(GameRng::seeded(seed))
}

#[test]
fn catcher_misses_and_positions() {
    for seed in 0..SEEDS {
        let mut game = CatcherGame::new(CatcherTuning::default(), rng(seed));
        let mut tally = StarTally::new();
        game.start();

        let mut last_y = std::collections::HashMap::new();
        let mut steps = 0;
        while game.phase() == CatcherPhase::Playing && steps < 10_000 {
            game.advance(Duration::from_millis(50), &mut tally);
            for item in game.items() {
                if let Some(previous) = last_y.insert(item.id, item.y) {
                    assert!(item.y >= previous, "seed {} item {} moved up", seed, item.id);
                }
            }
            assert_eq!(
                game.phase() == CatcherPhase::GameOver,
                game.missed() >= game.max_missed(),
                "seed {}",
                seed
            );
            steps += 1;
        }

        // Nobody catches anything, so healthy food eventually runs out the lives
        assert_eq!(game.phase(), CatcherPhase::GameOver, "seed {}", seed);
        assert_eq!(game.score(), 0);
        assert_eq!(game.active_timers(), 0);
    }
}

#[test]
fn quiz_scores_count_correct_answers() {
    for seed in 0..SEEDS {
        let mut tally = StarTally::new();

        let mut chooser = ChooserGame::new(ChooserTuning::default(), rng(seed));
        chooser.start();
        let mut correct = 0;
        let mut steps = 0;
        while chooser.phase() != QuizPhase::Finished {
            let round = chooser.round().expect("round while playing").clone();
            let side = (seed as usize + steps) % 2;
            if round.options[side].healthy {
                correct += 1;
            }
            chooser.choose(side);
            chooser.advance(Duration::from_millis(2000), &mut tally);
            steps += 1;
        }
        assert_eq!(steps, 5);
        assert_eq!(chooser.score(), correct * 20);

        let mut carbs = CarbCounterGame::new(CarbTuning::default(), rng(seed));
        carbs.start();
        let mut correct = 0;
        let mut steps = 0;
        while carbs.phase() != QuizPhase::Finished {
            if carbs.answer((seed as usize + steps) % 3) == Some(true) {
                correct += 1;
            }
            carbs.advance(Duration::from_millis(3000), &mut tally);
            steps += 1;
        }
        assert_eq!(steps, 7);
        assert_eq!(carbs.score(), correct);

        let mut scenario = ScenarioGame::new();
        scenario.start();
        let mut correct = 0;
        let mut steps = 0;
        while scenario.phase() != QuizPhase::Finished {
            let feedback = scenario.choose((seed as usize + steps) % 3).cloned();
            if feedback.map_or(false, |f| f.correct) {
                correct += 1;
            }
            scenario.next();
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(scenario.score(), correct);

        // Quizzes never pay stars
        assert!(tally.calls().is_empty());
    }
}

#[test]
fn star_collector_reports_exact_score_once() {
    for seed in 0..SEEDS {
        let mut game = StarCollectorGame::new(StarTuning::default(), rng(seed));
        let mut tally = StarTally::new();
        game.start();

        let mut step = 0u64;
        while game.phase() == StarPhase::Playing {
            game.advance(Duration::from_millis(230), &mut tally);
            // Tap bombs now and then to exercise the floor at zero
            let wanted = if step % 5 == 0 { SpawnKind::Bomb } else { SpawnKind::Star };
            let target = game.items().find(|i| i.kind == wanted).map(|i| i.id);
            if let Some(id) = target {
                game.tap(id);
            }
            assert!(game.item_count() <= 11);
            step += 1;
        }

        let score = game.score();
        if score > 0 {
            assert_eq!(tally.calls(), &[score], "seed {}", seed);
        } else {
            assert!(tally.calls().is_empty(), "seed {}", seed);
        }
        game.advance(Duration::from_secs(30), &mut tally);
        assert!(tally.calls().len() <= 1);
    }
}

#[test]
fn needle_keeps_one_countdown_and_follows_budget() {
    let tuning = NeedleTuning::default();
    let margin = Duration::from_millis(100);
    for seed in 0..SEEDS {
        let mut game = NeedleGame::new(tuning.clone());
        let mut tally = StarTally::new();
        game.start();

        // Shoot just in time until a seed-dependent level, then hesitate
        let stop_level = 1 + (seed % 12) as u32;
        while game.phase() != NeedlePhase::Lost {
            assert!(game.active_timers() <= 1);
            assert_eq!(game.time_left(), budget_for_level(&tuning, game.level()));

            let budget = game.level_budget();
            if game.level() < stop_level {
                game.advance(budget - margin, &mut tally);
                assert_eq!(game.phase(), NeedlePhase::Playing);
                assert!(game.give_shot());
                game.advance(tuning.level_up_pause, &mut tally);
            } else {
                game.advance(budget - margin, &mut tally);
                assert_eq!(game.phase(), NeedlePhase::Playing);
                game.advance(margin, &mut tally);
            }
        }

        assert_eq!(game.lost_at(), Some(stop_level), "seed {}", seed);
        assert_eq!(game.score(), stop_level - 1);
        assert_eq!(game.active_timers(), 0);
    }
}

#[test]
fn restart_and_exit_from_every_phase() {
    let mut tally = StarTally::new();
    let pauses = [0u64, 150, 1_250, 5_000, 40_000];

    for seed in 0..5 {
        let mut games: Vec<(Box<dyn MiniGame>, usize)> = vec![
            (Box::new(CatcherGame::new(CatcherTuning::default(), rng(seed))) as Box<dyn MiniGame>, 2),
            (Box::new(ChooserGame::new(ChooserTuning::default(), rng(seed))) as Box<dyn MiniGame>, 0),
            (Box::new(NeedleGame::new(NeedleTuning::default())) as Box<dyn MiniGame>, 1),
            (Box::new(StarCollectorGame::new(StarTuning::default(), rng(seed))) as Box<dyn MiniGame>, 2),
            (Box::new(CarbCounterGame::new(CarbTuning::default(), rng(seed))) as Box<dyn MiniGame>, 0),
            (Box::new(ScenarioGame::new()) as Box<dyn MiniGame>, 0),
        ];

        for (game, fresh_timers) in games.iter_mut() {
            for &pause in &pauses {
                game.restart();
                game.advance(Duration::from_millis(pause), &mut tally);

                game.restart();
                assert!(game.is_running(), "{:?}", game.kind());
                assert_eq!(game.score(), 0, "{:?}", game.kind());
                assert_eq!(game.active_timers(), *fresh_timers, "{:?}", game.kind());

                game.exit();
                assert_eq!(game.active_timers(), 0, "{:?}", game.kind());
                assert!(!game.is_running());
            }
        }
    }
}
