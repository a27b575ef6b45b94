//! Game content module
//!
//! Static tables of foods, quiz questions and scenarios. Pure data; the
//! controllers in [`crate::games`] decide how it is drawn and scored.

mod tables;

pub use tables::{CARB_QUESTIONS, FOOD_PAIRS, HEALTHY_FOODS, SCENARIOS, UNHEALTHY_FOODS};

/// One side of a food pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodChoice {
    pub emoji: &'static str,
    pub name: &'static str,
    pub healthy: bool,
}

/// A healthy food next to a less healthy alternative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPair {
    pub id: u32,
    pub options: [FoodChoice; 2],
}

/// Carbohydrate estimation question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarbQuestion {
    pub name: &'static str,
    pub icon: &'static str,
    /// Gram values offered to the player
    pub options: [u32; 3],
    pub correct_answer: u32,
    pub explanation: &'static str,
}

/// A possible reaction within a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioChoice {
    pub text: &'static str,
    pub correct: bool,
    pub feedback: &'static str,
}

/// Everyday situation with one sensible reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub title: &'static str,
    pub icon: &'static str,
    pub text: &'static str,
    pub choices: [ScenarioChoice; 3],
}
