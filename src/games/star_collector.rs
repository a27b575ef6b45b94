//! Star collector: grab stars and avoid bombs before time runs out
//!
//! The final score of a completed run is paid into the star ledger exactly
//! once, and only when it is positive.

use std::collections::VecDeque;
use std::time::Duration;
use crate::config::StarTuning;
use crate::util::RandomSource;
use super::{GameKind, MiniGame, StarSink, Timers};

/// Upper bound of the spawn area on both axes
pub const SPAWN_EXTENT: f64 = 90.0;
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarPhase {
    Idle,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Star,
    Bomb,
}

impl SpawnKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            SpawnKind::Star => "⭐",
            SpawnKind::Bomb => "💣",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedItem {
    pub id: u64,
    pub kind: SpawnKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StarTimer {
    Countdown,
    Spawn,
}

pub struct StarCollectorGame {
    tuning: StarTuning,
    rng: Box<dyn RandomSource>,
    phase: StarPhase,
    score: u32,
    seconds_left: u32,
    items: VecDeque<SpawnedItem>,
    next_id: u64,
    /// Set once this run's score has gone to the sink
    reported: bool,
    timers: Timers<StarTimer>,
}

impl StarCollectorGame {
    pub fn new(tuning: StarTuning, rng: Box<dyn RandomSource>) -> Self {
        let seconds_left = tuning.round_seconds;
        Self {
            tuning,
            rng,
            phase: StarPhase::Idle,
            score: 0,
            seconds_left,
            items: VecDeque::new(),
            next_id: 1,
            reported: false,
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> StarPhase {
        self.phase
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn items(&self) -> impl Iterator<Item = &SpawnedItem> {
        self.items.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Tap an item; stars add one, bombs take the penalty (never below zero)
    pub fn tap(&mut self, id: u64) -> Option<SpawnKind> {
        if self.phase != StarPhase::Playing {
            return None;
        }
        let index = self.items.iter().position(|item| item.id == id)?;
        let item = self.items.remove(index)?;
        match item.kind {
            SpawnKind::Star => self.score += 1,
            SpawnKind::Bomb => self.score = self.score.saturating_sub(self.tuning.bomb_penalty),
        }
        Some(item.kind)
    }

    fn spawn(&mut self) {
        let kind = if self.rng.chance(self.tuning.star_chance) {
            SpawnKind::Star
        } else {
            SpawnKind::Bomb
        };
        let x = self.rng.range(0.0, SPAWN_EXTENT);
        let y = self.rng.range(0.0, SPAWN_EXTENT);

        while self.items.len() >= self.tuning.max_items {
            self.items.pop_front();
        }
        self.items.push_back(SpawnedItem {
            id: self.next_id,
            kind,
            x,
            y,
        });
        self.next_id += 1;
    }

    fn tick(&mut self, stars: &mut dyn StarSink) {
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.finish(stars);
        }
    }

    fn finish(&mut self, stars: &mut dyn StarSink) {
        self.timers.cancel_all();
        self.phase = StarPhase::Finished;
        tracing::info!(score = self.score, "star collector finished");

        if self.score > 0 && !self.reported {
            self.reported = true;
            stars.add_stars(self.score);
        }
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.seconds_left = self.tuning.round_seconds;
        self.items.clear();
        self.next_id = 1;
        self.reported = false;
    }
}

impl MiniGame for StarCollectorGame {
    fn kind(&self) -> GameKind {
        GameKind::StarCollector
    }

    fn start(&mut self) -> bool {
        if self.phase == StarPhase::Playing {
            return false;
        }
        self.restart();
        true
    }

    fn restart(&mut self) {
        self.reset();
        self.phase = StarPhase::Playing;
        self.timers.every(StarTimer::Countdown, COUNTDOWN_TICK);
        self.timers.every(StarTimer::Spawn, self.tuning.spawn_interval);
        tracing::debug!("star collector started");
    }

    fn exit(&mut self) {
        self.reset();
        self.phase = StarPhase::Idle;
    }

    fn advance(&mut self, elapsed: Duration, stars: &mut dyn StarSink) {
        let mut budget = elapsed;
        while let Some(timer) = self.timers.poll(&mut budget) {
            match timer {
                StarTimer::Countdown => self.tick(stars),
                StarTimer::Spawn => self.spawn(),
            }
        }
    }

    fn active_timers(&self) -> usize {
        self.timers.len()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_running(&self) -> bool {
        self.phase == StarPhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::StarTally;
    use crate::util::random::tests::ScriptedSource;
    use crate::util::GameRng;

    fn scripted(values: Vec<f64>) -> StarCollectorGame {
        StarCollectorGame::new(StarTuning::default(), Box::new(ScriptedSource::new(values)))
    }

    fn tap_all(game: &mut StarCollectorGame, kind: SpawnKind) {
        let ids: Vec<u64> = game.items().filter(|i| i.kind == kind).map(|i| i.id).collect();
        for id in ids {
            game.tap(id);
        }
    }

    #[test]
    fn test_run_lasts_thirty_seconds() {
        let mut game = scripted(vec![0.1]);
        let mut tally = StarTally::new();
        game.start();
        assert_eq!(game.active_timers(), 2);

        game.advance(Duration::from_millis(29_999), &mut tally);
        assert_eq!(game.phase(), StarPhase::Playing);
        assert_eq!(game.seconds_left(), 1);

        game.advance(Duration::from_millis(1), &mut tally);
        assert_eq!(game.phase(), StarPhase::Finished);
        assert_eq!(game.active_timers(), 0);
    }

    #[test]
    fn test_final_second_pre_empts_same_instant_spawn() {
        let tuning = StarTuning {
            spawn_interval: Duration::from_millis(1000),
            ..StarTuning::default()
        };
        let mut game = StarCollectorGame::new(tuning, Box::new(ScriptedSource::new(vec![0.1])));
        let mut tally = StarTally::new();
        game.start();

        game.advance(Duration::from_secs(31), &mut tally);

        assert_eq!(game.phase(), StarPhase::Finished);
        // Spawns at 1s..=29s only; the one due at 30s never fires
        assert_eq!(game.next_id, 30);
        assert_eq!(game.active_timers(), 0);
    }

    #[test]
    fn test_buffer_keeps_latest_eleven() {
        let mut game = scripted(vec![0.1]);
        let mut tally = StarTally::new();
        game.start();
        game.advance(Duration::from_millis(700 * 15), &mut tally);

        assert_eq!(game.item_count(), 11);
        let ids: Vec<u64> = game.items().map(|i| i.id).collect();
        assert_eq!(ids, (5..=15).collect::<Vec<u64>>());
    }

    #[test]
    fn test_stars_and_bombs() {
        // star, star, bomb
        let mut game = scripted(vec![0.1, 0.5, 0.5, 0.1, 0.5, 0.5, 0.9, 0.5, 0.5]);
        let mut tally = StarTally::new();
        game.start();
        game.advance(Duration::from_millis(2100), &mut tally);
        assert_eq!(game.item_count(), 3);

        tap_all(&mut game, SpawnKind::Star);
        assert_eq!(game.score(), 2);
        tap_all(&mut game, SpawnKind::Bomb);
        assert_eq!(game.score(), 0);
        assert_eq!(game.item_count(), 0);
    }

    #[test]
    fn test_reports_final_score_once() {
        let mut game = scripted(vec![0.1]);
        let mut tally = StarTally::new();
        game.start();

        for _ in 0..300 {
            game.advance(Duration::from_millis(100), &mut tally);
            tap_all(&mut game, SpawnKind::Star);
        }
        assert_eq!(game.phase(), StarPhase::Finished);
        let score = game.score();
        assert!(score > 0);
        assert_eq!(tally.calls(), &[score]);

        // Further time and taps change nothing
        game.advance(Duration::from_secs(60), &mut tally);
        assert_eq!(game.tap(1), None);
        assert_eq!(tally.calls().len(), 1);
    }

    #[test]
    fn test_zero_score_is_not_reported() {
        let mut game = scripted(vec![0.1]);
        let mut tally = StarTally::new();
        game.start();
        game.advance(Duration::from_secs(30), &mut tally);
        assert_eq!(game.phase(), StarPhase::Finished);
        assert_eq!(game.score(), 0);
        assert!(tally.calls().is_empty());
    }

    #[test]
    fn test_score_never_negative_and_reports_match() {
        for seed in 0..20 {
            let mut game = StarCollectorGame::new(StarTuning::default(), Box::new(GameRng::seeded(seed)));
            let mut tally = StarTally::new();
            game.start();

            let mut step = 0u64;
            while game.phase() == StarPhase::Playing {
                game.advance(Duration::from_millis(350), &mut tally);
                let target = game.items().map(|i| i.id).nth((step % 3) as usize);
                if let Some(id) = target {
                    game.tap(id);
                }
                step += 1;
            }

            let score = game.score();
            if score > 0 {
                assert_eq!(tally.calls(), &[score]);
            } else {
                assert!(tally.calls().is_empty());
            }
        }
    }

    #[test]
    fn test_restart_mid_run_starts_clean() {
        let mut game = scripted(vec![0.1]);
        let mut tally = StarTally::new();
        game.start();
        game.advance(Duration::from_secs(10), &mut tally);
        tap_all(&mut game, SpawnKind::Star);
        assert!(game.score() > 0);

        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.seconds_left(), 30);
        assert_eq!(game.item_count(), 0);
        assert_eq!(game.active_timers(), 2);

        // Abandoned run never reports
        game.exit();
        assert_eq!(game.active_timers(), 0);
        game.advance(Duration::from_secs(60), &mut tally);
        assert!(tally.calls().is_empty());
    }
}
