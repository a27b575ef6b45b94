//! Carb counter quiz
//!
//! Every question of the table is asked once per run, in shuffled order.
//! The explanation is shown after each answer, right or wrong.

use std::time::Duration;
use crate::config::CarbTuning;
use crate::content::{CarbQuestion, CARB_QUESTIONS};
use crate::util::{shuffled, RandomSource};
use super::{GameKind, MiniGame, QuizPhase, StarSink, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarbTimer {
    NextQuestion,
}

pub struct CarbCounterGame {
    tuning: CarbTuning,
    rng: Box<dyn RandomSource>,
    phase: QuizPhase,
    score: u32,
    questions: Vec<CarbQuestion>,
    current: usize,
    /// Option picked for the current question, kept through feedback
    selected: Option<u32>,
    timers: Timers<CarbTimer>,
}

impl CarbCounterGame {
    pub fn new(tuning: CarbTuning, rng: Box<dyn RandomSource>) -> Self {
        Self {
            tuning,
            rng,
            phase: QuizPhase::Idle,
            score: 0,
            questions: Vec::new(),
            current: 0,
            selected: None,
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question(&self) -> Option<&CarbQuestion> {
        self.questions.get(self.current)
    }

    /// Zero-based index of the current question
    pub fn question_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Answer with the option at `index`; returns whether it was right
    pub fn answer(&mut self, index: usize) -> Option<bool> {
        if self.phase != QuizPhase::Playing {
            return None;
        }
        let question = self.questions.get(self.current)?;
        let value = *question.options.get(index)?;
        let correct = value == question.correct_answer;

        if correct {
            self.score += 1;
        }
        self.selected = Some(value);
        self.phase = QuizPhase::Feedback;
        self.timers.after(CarbTimer::NextQuestion, self.tuning.feedback_delay);
        tracing::debug!(grams = value, correct, "carb answer");
        Some(correct)
    }

    fn next_question(&mut self) {
        if self.current + 1 >= self.questions.len() {
            self.phase = QuizPhase::Finished;
            tracing::info!(score = self.score, total = self.questions.len(), "carb quiz finished");
        } else {
            self.current += 1;
            self.selected = None;
            self.phase = QuizPhase::Playing;
        }
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.questions.clear();
        self.current = 0;
        self.selected = None;
    }
}

impl MiniGame for CarbCounterGame {
    fn kind(&self) -> GameKind {
        GameKind::CarbCounter
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
        self.questions = shuffled(&CARB_QUESTIONS, self.rng.as_mut());
        self.phase = QuizPhase::Playing;
    }

    fn exit(&mut self) {
        self.reset();
        self.phase = QuizPhase::Idle;
    }

    fn advance(&mut self, elapsed: Duration, _stars: &mut dyn StarSink) {
        let mut budget = elapsed;
        while let Some(CarbTimer::NextQuestion) = self.timers.poll(&mut budget) {
            self.next_question();
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
