//! Configuration management module
//!
//! Handles loading, saving, and validation of game tuning and user
//! preferences.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{GameError, Result, APP_NAME, CONFIG_FILE};
use crate::content::FOOD_PAIRS;

pub mod persistence;

/// Serialize durations as humantime strings such as `"1200ms"`
mod duration_format {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Delay between frames of the render loop
    #[serde(with = "duration_format")]
    pub frame_interval: Duration,
    /// Fixed RNG seed; every run is reproducible when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Per-game timing and scoring
    pub tuning: GameTuning,
}

/// Tuning for every mini-game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub catcher: CatcherTuning,
    pub chooser: ChooserTuning,
    pub needle: NeedleTuning,
    pub stars: StarTuning,
    pub carbs: CarbTuning,
}

/// Falling-food catcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatcherTuning {
    /// Physics step (60 Hz by default)
    #[serde(with = "duration_format")]
    pub physics_interval: Duration,
    #[serde(with = "duration_format")]
    pub spawn_interval: Duration,
    /// Probability that a spawned item is healthy
    pub healthy_chance: f64,
    pub max_missed: u32,
    pub catch_points: u32,
}

impl Default for CatcherTuning {
    fn default() -> Self {
        Self {
            physics_interval: Duration::from_micros(16_667),
            spawn_interval: Duration::from_millis(1200),
            healthy_chance: 0.6,
            max_missed: 5,
            catch_points: 10,
        }
    }
}

/// Healthy-choice quiz settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChooserTuning {
    pub rounds: usize,
    pub points_per_correct: u32,
    #[serde(with = "duration_format")]
    pub feedback_delay: Duration,
}

impl Default for ChooserTuning {
    fn default() -> Self {
        Self {
            rounds: 5,
            points_per_correct: 20,
            feedback_delay: Duration::from_millis(2000),
        }
    }
}

/// Insulin countdown settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleTuning {
    /// Budget for level 1
    #[serde(with = "duration_format")]
    pub initial_time: Duration,
    /// Budget reduction per level
    #[serde(with = "duration_format")]
    pub time_decrement: Duration,
    /// Budget floor
    #[serde(with = "duration_format")]
    pub minimum_time: Duration,
    #[serde(with = "duration_format")]
    pub countdown_step: Duration,
    #[serde(with = "duration_format")]
    pub level_up_pause: Duration,
}

impl Default for NeedleTuning {
    fn default() -> Self {
        Self {
            initial_time: Duration::from_millis(5000),
            time_decrement: Duration::from_millis(500),
            minimum_time: Duration::from_millis(1500),
            countdown_step: Duration::from_millis(100),
            level_up_pause: Duration::from_millis(1500),
        }
    }
}

/// Star collector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarTuning {
    /// Length of a run, counted down once per second
    pub round_seconds: u32,
    #[serde(with = "duration_format")]
    pub spawn_interval: Duration,
    /// Probability that a spawn is a star rather than a bomb
    pub star_chance: f64,
    pub bomb_penalty: u32,
    /// Visible item buffer; the oldest spawn expires first
    pub max_items: usize,
}

impl Default for StarTuning {
    fn default() -> Self {
        Self {
            round_seconds: 30,
            spawn_interval: Duration::from_millis(700),
            star_chance: 0.8,
            bomb_penalty: 5,
            max_items: 11,
        }
    }
}

/// Carbohydrate quiz settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbTuning {
    #[serde(with = "duration_format")]
    pub feedback_delay: Duration,
}

impl Default for CarbTuning {
    fn default() -> Self {
        Self {
            feedback_delay: Duration::from_millis(3000),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            seed: None,
            tuning: GameTuning::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the frame interval of the render loop
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.frame_interval.is_zero() {
            return Err(GameError::ConfigError(
                "Frame interval must be greater than 0".to_string()
            ));
        }

        const MAX_FRAME_INTERVAL: Duration = Duration::from_secs(1);
        if self.frame_interval > MAX_FRAME_INTERVAL {
            return Err(GameError::ConfigError(
                format!("Frame interval too long: {}ms (max: {}ms)",
                    self.frame_interval.as_millis(), MAX_FRAME_INTERVAL.as_millis())
            ));
        }

        self.tuning.validate()
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| GameError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| GameError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GameError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content)
            .map_err(|e| GameError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/glucoplay/glucoplay.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GameError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

impl GameTuning {
    /// Validate every game's settings
    pub fn validate(&self) -> Result<()> {
        let catcher = &self.catcher;
        require_positive("catcher.physics_interval", catcher.physics_interval)?;
        require_positive("catcher.spawn_interval", catcher.spawn_interval)?;
        require_probability("catcher.healthy_chance", catcher.healthy_chance)?;
        if catcher.max_missed == 0 {
            return Err(GameError::ConfigError(
                "catcher.max_missed must be greater than 0".to_string()
            ));
        }

        let chooser = &self.chooser;
        if chooser.rounds == 0 || chooser.rounds > FOOD_PAIRS.len() {
            return Err(GameError::ConfigError(
                format!("chooser.rounds must be between 1 and {}", FOOD_PAIRS.len())
            ));
        }

        let needle = &self.needle;
        require_positive("needle.minimum_time", needle.minimum_time)?;
        require_positive("needle.countdown_step", needle.countdown_step)?;
        if needle.initial_time < needle.minimum_time {
            return Err(GameError::ConfigError(
                "needle.initial_time must not be below needle.minimum_time".to_string()
            ));
        }

        let stars = &self.stars;
        require_positive("stars.spawn_interval", stars.spawn_interval)?;
        require_probability("stars.star_chance", stars.star_chance)?;
        if stars.round_seconds == 0 {
            return Err(GameError::ConfigError(
                "stars.round_seconds must be greater than 0".to_string()
            ));
        }
        if stars.max_items == 0 {
            return Err(GameError::ConfigError(
                "stars.max_items must be greater than 0".to_string()
            ));
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(GameError::ConfigError(format!("{} must be greater than 0", name)));
    }
    Ok(())
}

fn require_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GameError::ConfigError(
            format!("{} must be between 0.0 and 1.0", name)
        ));
    }
    Ok(())
}
