//! Healthy-choice quiz
//!
//! Each round shows two foods, one healthy. Picking the healthy one scores;
//! feedback is shown briefly before the next round starts on its own.

use std::time::Duration;
use crate::config::ChooserTuning;
use crate::content::{FoodChoice, FoodPair, FOOD_PAIRS};
use crate::util::{shuffle, shuffled, RandomSource};
use super::{Feedback, GameKind, MiniGame, QuizPhase, StarSink, Timers};

const PRAISE: &str = "Great! Healthy choice!";
const NUDGE: &str = "Oops! Try the other food.";

/// The round currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRound {
    /// Zero-based round number
    pub index: usize,
    /// Options in left/right display order
    pub options: [FoodChoice; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChooserTimer {
    NextRound,
}

pub struct ChooserGame {
    tuning: ChooserTuning,
    rng: Box<dyn RandomSource>,
    phase: QuizPhase,
    score: u32,
    pairs: Vec<FoodPair>,
    round: Option<ChooserRound>,
    feedback: Option<Feedback>,
    timers: Timers<ChooserTimer>,
}

impl ChooserGame {
    pub fn new(tuning: ChooserTuning, rng: Box<dyn RandomSource>) -> Self {
        Self {
            tuning,
            rng,
            phase: QuizPhase::Idle,
            score: 0,
            pairs: Vec::new(),
            round: None,
            feedback: None,
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn round(&self) -> Option<&ChooserRound> {
        self.round.as_ref()
    }

    pub fn rounds(&self) -> usize {
        self.tuning.rounds
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Pick the option at `side` (0 = left, 1 = right)
    pub fn choose(&mut self, side: usize) -> Option<&Feedback> {
        if self.phase != QuizPhase::Playing {
            return None;
        }
        let choice = *self.round.as_ref()?.options.get(side)?;

        let feedback = if choice.healthy {
            self.score += self.tuning.points_per_correct;
            Feedback {
                correct: true,
                message: PRAISE.to_string(),
            }
        } else {
            Feedback {
                correct: false,
                message: NUDGE.to_string(),
            }
        };
        tracing::debug!(food = choice.name, correct = feedback.correct, "chooser answer");

        self.feedback = Some(feedback);
        self.phase = QuizPhase::Feedback;
        self.timers.after(ChooserTimer::NextRound, self.tuning.feedback_delay);
        self.feedback.as_ref()
    }

    fn begin_round(&mut self, index: usize) {
        let mut options = self.pairs[index].options;
        shuffle(&mut options, self.rng.as_mut());
        self.round = Some(ChooserRound { index, options });
        self.feedback = None;
        self.phase = QuizPhase::Playing;
    }

    fn next_round(&mut self) {
        let next = self.round.as_ref().map_or(0, |r| r.index + 1);
        if next >= self.pairs.len() {
            self.phase = QuizPhase::Finished;
            tracing::info!(score = self.score, "chooser finished");
        } else {
            self.begin_round(next);
        }
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.pairs.clear();
        self.round = None;
        self.feedback = None;
    }
}

impl MiniGame for ChooserGame {
    fn kind(&self) -> GameKind {
        GameKind::Chooser
    }

    fn start(&mut self) -> bool {
        if matches!(self.phase, QuizPhase::Playing | QuizPhase::Feedback) {
            return false;
        }
        self.restart();
        true
    }

    fn restart(&mut self) {
        self.reset();
        self.pairs = shuffled(&FOOD_PAIRS, self.rng.as_mut());
        self.pairs.truncate(self.tuning.rounds);
        self.begin_round(0);
    }

    fn exit(&mut self) {
        self.reset();
        self.phase = QuizPhase::Idle;
    }

    fn advance(&mut self, elapsed: Duration, _stars: &mut dyn StarSink) {
        let mut budget = elapsed;
        while let Some(ChooserTimer::NextRound) = self.timers.poll(&mut budget) {
            self.next_round();
        }
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, QuizPhase::Playing | QuizPhase::Feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::StarTally;
    use crate::util::GameRng;

    fn game(seed: u64) -> ChooserGame {
        ChooserGame::new(ChooserTuning::default(), Box::new(GameRng::seeded(seed)))
    }

    fn healthy_side(game: &ChooserGame) -> usize {
        let round = game.round().expect("round in progress");
        round.options.iter().position(|o| o.healthy).unwrap()
    }

    #[test]
    fn test_start_draws_five_distinct_pairs() {
        let mut game = game(1);
        assert!(game.start());
        assert_eq!(game.phase(), QuizPhase::Playing);
        assert_eq!(game.pairs.len(), 5);

        let mut ids: Vec<u32> = game.pairs.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_correct_choice_scores_and_feedback_times_out() {
        let mut game = game(2);
        let mut tally = StarTally::new();
        game.start();

        let side = healthy_side(&game);
        let feedback = game.choose(side).cloned().expect("accepted");
        assert!(feedback.correct);
        assert_eq!(feedback.message, "Great! Healthy choice!");
        assert_eq!(game.score(), 20);
        assert_eq!(game.phase(), QuizPhase::Feedback);

        // Locked during feedback
        assert!(game.choose(side).is_none());

        game.advance(Duration::from_millis(1999), &mut tally);
        assert_eq!(game.phase(), QuizPhase::Feedback);
        game.advance(Duration::from_millis(1), &mut tally);
        assert_eq!(game.phase(), QuizPhase::Playing);
        assert_eq!(game.round().unwrap().index, 1);
        assert!(game.feedback().is_none());
    }

    #[test]
    fn test_wrong_choice_keeps_score() {
        let mut game = game(3);
        game.start();
        let side = 1 - healthy_side(&game);
        let feedback = game.choose(side).cloned().unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.message, "Oops! Try the other food.");
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_finishes_after_five_rounds() {
        for seed in 0..10 {
            let mut game = game(seed);
            let mut tally = StarTally::new();
            game.start();
            let mut correct = 0;

            for round in 0..5 {
                assert_eq!(game.phase(), QuizPhase::Playing);
                let side = if (seed + round) % 2 == 0 {
                    correct += 1;
                    healthy_side(&game)
                } else {
                    1 - healthy_side(&game)
                };
                game.choose(side);
                game.advance(Duration::from_secs(2), &mut tally);
            }

            assert_eq!(game.phase(), QuizPhase::Finished);
            assert_eq!(game.score(), correct * 20);
            assert_eq!(game.active_timers(), 0);
        }
    }

    #[test]
    fn test_out_of_range_side_is_ignored() {
        let mut game = game(4);
        game.start();
        assert!(game.choose(2).is_none());
        assert_eq!(game.phase(), QuizPhase::Playing);
    }

    #[test]
    fn test_restart_mid_feedback_cancels_pending_advance() {
        let mut game = game(5);
        let mut tally = StarTally::new();
        game.start();
        game.choose(0);
        assert_eq!(game.active_timers(), 1);

        game.restart();
        assert_eq!(game.active_timers(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.round().unwrap().index, 0);

        // The stale advance must not skip the new first round
        game.advance(Duration::from_secs(10), &mut tally);
        assert_eq!(game.round().unwrap().index, 0);
        assert_eq!(game.phase(), QuizPhase::Playing);
    }
}
