//! Falling-food catcher
//!
//! Food drops from the top of the play area. Catching healthy food scores,
//! letting it fall or catching sweets costs a life. Positions use a 0-100
//! scale in both axes.

use std::time::Duration;
use crate::config::CatcherTuning;
use crate::content::{HEALTHY_FOODS, UNHEALTHY_FOODS};
use crate::util::RandomSource;
use super::{GameKind, MiniGame, StarSink, Timers};

/// Vertical position of a freshly spawned item, just above the play area
pub const SPAWN_Y: f64 = -10.0;
/// Items below this line have left the play area
pub const FLOOR_Y: f64 = 110.0;
/// Rightmost spawn column
pub const MAX_X: f64 = 90.0;
const MIN_SPEED: f64 = 0.5;
const MAX_SPEED: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatcherPhase {
    Idle,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Healthy,
    Unhealthy,
}

/// A food item on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub id: u64,
    pub glyph: &'static str,
    pub kind: FoodKind,
    pub x: f64,
    pub y: f64,
    /// Distance fallen per physics step
    pub speed: f64,
}

/// Result of tapping an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Caught { points: u32 },
    /// Caught something unhealthy
    Spoiled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatcherTimer {
    Physics,
    Spawn,
}

pub struct CatcherGame {
    tuning: CatcherTuning,
    rng: Box<dyn RandomSource>,
    phase: CatcherPhase,
    score: u32,
    missed: u32,
    items: Vec<FallingItem>,
    next_id: u64,
    timers: Timers<CatcherTimer>,
}

impl CatcherGame {
    pub fn new(tuning: CatcherTuning, rng: Box<dyn RandomSource>) -> Self {
        Self {
            tuning,
            rng,
            phase: CatcherPhase::Idle,
            score: 0,
            missed: 0,
            items: Vec::new(),
            next_id: 1,
            timers: Timers::new(),
        }
    }

    pub fn phase(&self) -> CatcherPhase {
        self.phase
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn max_missed(&self) -> u32 {
        self.tuning.max_missed
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    /// Tap an item; ignored unless playing or when the item is gone
    pub fn tap(&mut self, id: u64) -> Option<TapOutcome> {
        if self.phase != CatcherPhase::Playing {
            return None;
        }
        let index = self.items.iter().position(|item| item.id == id)?;
        let item = self.items.remove(index);

        let outcome = match item.kind {
            FoodKind::Healthy => {
                self.score += self.tuning.catch_points;
                TapOutcome::Caught {
                    points: self.tuning.catch_points,
                }
            }
            FoodKind::Unhealthy => {
                self.missed += 1;
                TapOutcome::Spoiled
            }
        };
        self.check_game_over();
        Some(outcome)
    }

    fn on_timer(&mut self, timer: CatcherTimer) {
        match timer {
            CatcherTimer::Physics => self.step_physics(),
            CatcherTimer::Spawn => self.spawn(),
        }
    }

    fn step_physics(&mut self) {
        let mut dropped = 0;
        self.items.retain_mut(|item| {
            item.y += item.speed;
            if item.y > FLOOR_Y {
                if item.kind == FoodKind::Healthy {
                    dropped += 1;
                }
                return false;
            }
            true
        });
        self.missed += dropped;
        self.check_game_over();
    }

    fn spawn(&mut self) {
        let kind = if self.rng.chance(self.tuning.healthy_chance) {
            FoodKind::Healthy
        } else {
            FoodKind::Unhealthy
        };
        let list: &[&'static str] = match kind {
            FoodKind::Healthy => &HEALTHY_FOODS,
            FoodKind::Unhealthy => &UNHEALTHY_FOODS,
        };
        let glyph = list[self.rng.index(list.len())];
        let x = self.rng.range(0.0, MAX_X);
        let speed = self.rng.range(MIN_SPEED, MAX_SPEED);

        self.items.push(FallingItem {
            id: self.next_id,
            glyph,
            kind,
            x,
            y: SPAWN_Y,
            speed,
        });
        self.next_id += 1;
    }

    fn check_game_over(&mut self) {
        if self.phase == CatcherPhase::Playing && self.missed >= self.tuning.max_missed {
            self.timers.cancel_all();
            self.phase = CatcherPhase::GameOver;
            tracing::info!(score = self.score, missed = self.missed, "catcher game over");
        }
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.score = 0;
        self.missed = 0;
        self.items.clear();
        self.next_id = 1;
    }
}

impl MiniGame for CatcherGame {
    fn kind(&self) -> GameKind {
        GameKind::Catcher
    }

    fn start(&mut self) -> bool {
        if self.phase == CatcherPhase::Playing {
            return false;
        }
        self.restart();
        true
    }

    fn restart(&mut self) {
        self.reset();
        self.phase = CatcherPhase::Playing;
        self.timers.every(CatcherTimer::Physics, self.tuning.physics_interval);
        self.timers.every(CatcherTimer::Spawn, self.tuning.spawn_interval);
        tracing::debug!("catcher started");
    }

    fn exit(&mut self) {
        self.reset();
        self.phase = CatcherPhase::Idle;
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

    fn score(&self) -> u32 {
        self.score
    }

    fn is_running(&self) -> bool {
        self.phase == CatcherPhase::Playing
    }
}
