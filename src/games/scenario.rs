//! Tricky situations: pick the sensible reaction to everyday scenarios
//!
//! Scenarios come in a fixed order. Unlike the other quizzes the player
//! moves on from feedback explicitly, so this game owns no timers.

use std::time::Duration;
use crate::content::{Scenario, SCENARIOS};
use super::{Feedback, GameKind, MiniGame, QuizPhase, StarSink};

#[derive(Debug)]
pub struct ScenarioGame {
    scenarios: &'static [Scenario],
    phase: QuizPhase,
    score: u32,
    current: usize,
    feedback: Option<Feedback>,
}

impl ScenarioGame {
    pub fn new() -> Self {
        Self::with_scenarios(&SCENARIOS)
    }

    fn with_scenarios(scenarios: &'static [Scenario]) -> Self {
        Self {
            scenarios,
            phase: QuizPhase::Idle,
            score: 0,
            current: 0,
            feedback: None,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenarios.get(self.current)
    }

    pub fn scenario_index(&self) -> usize {
        self.current
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Whether `next` from the current feedback ends the game
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.scenarios.len()
    }

    /// Pick a reaction; only accepted while a scenario is open
    pub fn choose(&mut self, index: usize) -> Option<&Feedback> {
        if self.phase != QuizPhase::Playing {
            return None;
        }
        let choice = *self.scenario()?.choices.get(index)?;
        if choice.correct {
            self.score += 1;
        }
        self.feedback = Some(Feedback {
            correct: choice.correct,
            message: choice.feedback.to_string(),
        });
        self.phase = QuizPhase::Feedback;
        self.feedback.as_ref()
    }

    /// Leave the feedback screen for the next scenario or the results
    pub fn next(&mut self) -> bool {
        if self.phase != QuizPhase::Feedback {
            return false;
        }
        if self.is_last() {
            self.phase = QuizPhase::Finished;
            tracing::info!(score = self.score, "scenarios finished");
        } else {
            self.current += 1;
            self.feedback = None;
            self.phase = QuizPhase::Playing;
        }
        true
    }

    fn reset(&mut self) {
        self.score = 0;
        self.current = 0;
        self.feedback = None;
    }
}

impl Default for ScenarioGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for ScenarioGame {
    fn kind(&self) -> GameKind {
        GameKind::Scenario
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
        self.phase = QuizPhase::Playing;
    }

    fn exit(&mut self) {
        self.reset();
        self.phase = QuizPhase::Idle;
    }

    fn advance(&mut self, _elapsed: Duration, _stars: &mut dyn StarSink) {}

    fn active_timers(&self) -> usize {
        0
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, QuizPhase::Playing | QuizPhase::Feedback)
    }
}
