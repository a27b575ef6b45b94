//! Needle time: give the insulin shot before the countdown runs out
//!
//! Every level shortens the time budget until it reaches the floor.
//! Remaining time is tracked in whole milliseconds so budgets and steps
//! subtract exactly.

use std::time::Duration;
use crate::config::NeedleTuning;
use super::{GameKind, MiniGame, StarSink, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedlePhase {
    Idle,
    Playing,
    LevelUp,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NeedleTimer {
    Countdown,
    LevelUpPause,
}

/// Time budget for a level: `max(minimum, initial - decrement * (level - 1))`
pub fn budget_for_level(tuning: &NeedleTuning, level: u32) -> Duration {
    let cut = tuning.time_decrement.saturating_mul(level.saturating_sub(1));
    tuning
        .initial_time
        .saturating_sub(cut)
        .max(tuning.minimum_time)
}

#[derive(Debug)]
pub struct NeedleGame {
    tuning: NeedleTuning,
    phase: NeedlePhase,
    level: u32,
    time_left: Duration,
    /// Level reached when the countdown ran out
    lost_at: Option<u32>,
    timers: Timers<NeedleTimer>,
}

impl NeedleGame {
    pub fn new(tuning: NeedleTuning) -> Self {
        let time_left = budget_for_level(&tuning, 1);
        Self {
            tuning,
            phase: NeedlePhase::Idle,
            level: 1,
            time_left,
            lost_at: None,
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> NeedlePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn lost_at(&self) -> Option<u32> {
        self.lost_at
    }

    /// Budget for the current level
    pub fn level_budget(&self) -> Duration {
        budget_for_level(&self.tuning, self.level)
    }

    /// Remaining share of the level budget, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let budget = self.level_budget().as_secs_f64();
        if budget == 0.0 {
            return 0.0;
        }
        (self.time_left.as_secs_f64() / budget).clamp(0.0, 1.0)
    }

    #[cfg(test)]
    fn countdown_active(&self) -> bool {
        self.timers.is_active(NeedleTimer::Countdown)
    }

    /// Give the shot; only accepted while the countdown runs
    pub fn give_shot(&mut self) -> bool {
        if self.phase != NeedlePhase::Playing {
            return false;
        }
        self.timers.cancel(NeedleTimer::Countdown);
        self.phase = NeedlePhase::LevelUp;
        self.timers.after(NeedleTimer::LevelUpPause, self.tuning.level_up_pause);
        tracing::debug!(level = self.level, left_ms = self.time_left.as_millis() as u64, "shot given");
        true
    }

    fn begin_level(&mut self, level: u32) {
        self.timers.cancel_all();
        self.level = level;
        self.time_left = budget_for_level(&self.tuning, level);
        self.phase = NeedlePhase::Playing;
        self.timers.every(NeedleTimer::Countdown, self.tuning.countdown_step);
    }

    fn tick(&mut self) {
        self.time_left = self.time_left.saturating_sub(self.tuning.countdown_step);
        if self.time_left.is_zero() {
            self.timers.cancel(NeedleTimer::Countdown);
            self.phase = NeedlePhase::Lost;
            self.lost_at = Some(self.level);
            tracing::info!(level = self.level, "needle game lost");
        }
    }

    fn on_timer(&mut self, timer: NeedleTimer) {
        match timer {
            NeedleTimer::Countdown => self.tick(),
            NeedleTimer::LevelUpPause => self.begin_level(self.level + 1),
        }
    }
}

impl MiniGame for NeedleGame {
    fn kind(&self) -> GameKind {
        GameKind::NeedleTime
    }

    fn start(&mut self) -> bool {
        if matches!(self.phase, NeedlePhase::Playing | NeedlePhase::LevelUp) {
            return false;
        }
        self.restart();
        true
    }

    fn restart(&mut self) {
        self.lost_at = None;
        self.begin_level(1);
    }

    fn exit(&mut self) {
        self.timers.cancel_all();
        self.phase = NeedlePhase::Idle;
        self.level = 1;
        self.time_left = budget_for_level(&self.tuning, 1);
        self.lost_at = None;
    }

    fn advance(&mut self, elapsed: Duration, _stars: &mut dyn StarSink) {
        let mut budget = elapsed;
        while let Some(timer) = self.timers.poll(&mut budget) {
            self.on_timer(timer);
        }
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Levels cleared so far
    fn score(&self) -> u32 {
        self.level - 1
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, NeedlePhase::Playing | NeedlePhase::LevelUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::StarTally;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_budget_formula() {
        let tuning = NeedleTuning::default();
        assert_eq!(budget_for_level(&tuning, 1), ms(5000));
        assert_eq!(budget_for_level(&tuning, 2), ms(4500));
        assert_eq!(budget_for_level(&tuning, 5), ms(3000));
        assert_eq!(budget_for_level(&tuning, 8), ms(1500));
        assert_eq!(budget_for_level(&tuning, 9), ms(1500));
        assert_eq!(budget_for_level(&tuning, 500), ms(1500));

        for level in 1..40u32 {
            let expected = (5.0 - 0.5 * (level as f64 - 1.0)).max(1.5);
            let actual = budget_for_level(&tuning, level).as_secs_f64();
            assert!((expected - actual).abs() < 1e-9, "level {}", level);
        }
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        assert!(game.start());

        game.advance(ms(4900), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::Playing);
        assert_eq!(game.time_left(), ms(100));

        game.advance(ms(100), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::Lost);
        assert_eq!(game.lost_at(), Some(1));
        assert_eq!(game.time_left(), Duration::ZERO);
        assert_eq!(game.active_timers(), 0);
        assert!(!game.give_shot());
    }

    #[test]
    fn test_shot_levels_up_after_pause() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        game.start();
        game.advance(ms(1000), &mut tally);

        assert!(game.give_shot());
        assert_eq!(game.phase(), NeedlePhase::LevelUp);
        assert!(!game.countdown_active());
        assert!(!game.give_shot());

        // Nothing ticks during the pause
        game.advance(ms(1499), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::LevelUp);
        assert_eq!(game.time_left(), ms(4000));

        game.advance(ms(1), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::Playing);
        assert_eq!(game.level(), 2);
        assert_eq!(game.time_left(), ms(4500));
        assert!(game.countdown_active());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_at_most_one_countdown() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        game.start();

        for step in 0..600u64 {
            if step % 7 == 0 {
                game.give_shot();
            }
            if step % 97 == 0 {
                game.restart();
            }
            game.advance(ms(50), &mut tally);
            assert!(game.active_timers() <= 1);
        }
    }

    #[test]
    fn test_lost_only_when_budget_expires() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        game.start();

        // Clear ten levels by shooting with 100ms to spare
        for level in 1..=10 {
            let budget = budget_for_level(&NeedleTuning::default(), level);
            game.advance(budget - ms(100), &mut tally);
            assert_eq!(game.phase(), NeedlePhase::Playing, "level {}", level);
            assert!(game.give_shot());
            game.advance(ms(1500), &mut tally);
        }
        assert_eq!(game.level(), 11);
        assert_eq!(game.level_budget(), ms(1500));

        game.advance(ms(1500), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::Lost);
        assert_eq!(game.lost_at(), Some(11));
    }

    #[test]
    fn test_restart_and_exit_clear_timers() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        game.start();
        game.give_shot();

        game.restart();
        assert_eq!(game.level(), 1);
        assert_eq!(game.active_timers(), 1);
        assert!(game.countdown_active());

        // The old level-up pause must not fire into the new run
        game.advance(ms(1500), &mut tally);
        assert_eq!(game.level(), 1);

        game.exit();
        assert_eq!(game.phase(), NeedlePhase::Idle);
        assert_eq!(game.active_timers(), 0);
        game.advance(ms(10_000), &mut tally);
        assert_eq!(game.phase(), NeedlePhase::Idle);
    }

    #[test]
    fn test_progress_fraction() {
        let mut game = NeedleGame::new(NeedleTuning::default());
        let mut tally = StarTally::new();
        game.start();
        assert!((game.progress() - 1.0).abs() < 1e-9);
        game.advance(ms(2500), &mut tally);
        assert!((game.progress() - 0.5).abs() < 1e-9);
    }
}
