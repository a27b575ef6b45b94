//! Mini-game controllers
//!
//! Each game is an explicit state machine owning its phase, score, content
//! and [`timer::Timers`]. The app loop drives them through [`MiniGame`];
//! game-specific input goes through each controller's own methods.

use std::time::Duration;

pub mod carb_counter;
pub mod catcher;
pub mod chooser;
pub mod needle;
pub mod scenario;
pub mod star_collector;
pub mod timer;

// Re-export commonly used types
pub use carb_counter::CarbCounterGame;
pub use catcher::{CatcherGame, CatcherPhase, FallingItem, FoodKind, TapOutcome};
pub use chooser::{ChooserGame, ChooserRound};
pub use needle::{budget_for_level, NeedleGame, NeedlePhase};
pub use scenario::ScenarioGame;
pub use star_collector::{SpawnKind, SpawnedItem, StarCollectorGame, StarPhase};
pub use timer::Timers;

/// Outbound score accumulator (`addStars`)
///
/// Each call is a distinct increment, never a set.
pub trait StarSink {
    fn add_stars(&mut self, count: u32);
}

/// In-memory sink that remembers every call
#[derive(Debug, Default, Clone)]
pub struct StarTally {
    calls: Vec<u32>,
}

impl StarTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every increment received, in order
    pub fn calls(&self) -> &[u32] {
        &self.calls
    }

    pub fn total(&self) -> u64 {
        self.calls.iter().map(|&c| u64::from(c)).sum()
    }
}

impl StarSink for StarTally {
    fn add_stars(&mut self, count: u32) {
        self.calls.push(count);
    }
}

/// Audience a game is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Kids,
    Adults,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Kids, Category::Adults];

    /// Games offered in this category, in menu order
    pub fn games(&self) -> &'static [GameKind] {
        match self {
            Category::Kids => &[
                GameKind::Catcher,
                GameKind::Chooser,
                GameKind::NeedleTime,
                GameKind::StarCollector,
            ],
            Category::Adults => &[GameKind::CarbCounter, GameKind::Scenario],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Kids => "Kids' corner",
            Category::Adults => "Adults' corner",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Kids => "Fun, colourful games about healthy food and insulin",
            Category::Adults => "Challenges about carb counting and real-life situations",
        }
    }
}

/// Every available mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Catcher,
    Chooser,
    NeedleTime,
    StarCollector,
    CarbCounter,
    Scenario,
}

impl GameKind {
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Catcher => "Healthy Catcher",
            GameKind::Chooser => "Smart Chooser",
            GameKind::NeedleTime => "Needle Time",
            GameKind::StarCollector => "Star Collector",
            GameKind::CarbCounter => "Carb Counter",
            GameKind::Scenario => "Tricky Situations",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameKind::Catcher => "Catch the healthy food, let the sweets fall",
            GameKind::Chooser => "Pick the healthier food of each pair",
            GameKind::NeedleTime => "Give the insulin shot before time runs out",
            GameKind::StarCollector => "Grab stars, dodge bombs, earn rewards",
            GameKind::CarbCounter => "Estimate the carbohydrates in everyday foods",
            GameKind::Scenario => "Choose the right reaction in real situations",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GameKind::Catcher => "🍎",
            GameKind::Chooser => "🤔",
            GameKind::NeedleTime => "💉",
            GameKind::StarCollector => "⭐",
            GameKind::CarbCounter => "🍞",
            GameKind::Scenario => "😳",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            GameKind::CarbCounter | GameKind::Scenario => Category::Adults,
            _ => Category::Kids,
        }
    }
}

/// Phases shared by the step-through quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Playing,
    Feedback,
    Finished,
}

/// Feedback shown after a quiz answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// Common lifecycle shared by every controller
pub trait MiniGame {
    fn kind(&self) -> GameKind;

    /// Begin a run from idle or a finished phase; `false` while a run is live
    fn start(&mut self) -> bool;

    /// Cancel every timer, reset all per-run state and begin a new run
    fn restart(&mut self);

    /// Cancel every timer and return to idle; called on teardown
    fn exit(&mut self);

    /// Feed elapsed time to the controller's timers
    fn advance(&mut self, elapsed: Duration, stars: &mut dyn StarSink);

    /// Number of scheduled timers
    fn active_timers(&self) -> usize;

    fn score(&self) -> u32;

    /// Whether a run is in progress (not idle and not finished)
    fn is_running(&self) -> bool;
}
