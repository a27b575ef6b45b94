//! Star ledger persistence module
//!
//! Keeps the cumulative star count earned across sessions, with a rotating
//! history of individual awards.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::games::StarSink;
use crate::{GameError, Result, APP_NAME, LEDGER_FILE, MAX_LEDGER_HISTORY};

/// A single award of stars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarAward {
    pub count: u32,
    pub timestamp: DateTime<Utc>,
}

/// Ledger file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    total: u64,
    awards: Vec<StarAward>,
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self {
            version: 1,
            total: 0,
            awards: Vec::new(),
        }
    }
}

/// File-backed star accumulator
#[derive(Debug)]
pub struct StarLedger {
    ledger_path: PathBuf,
    total: u64,
    awards: Vec<StarAward>,
}

impl StarLedger {
    /// Open the ledger at the standard location
    pub fn open() -> Result<Self> {
        Self::open_at(Self::ledger_file_path()?)
    }

    /// Open the ledger at an explicit path, starting empty if it is missing
    pub fn open_at(ledger_path: PathBuf) -> Result<Self> {
        let file = Self::read_file(&ledger_path)?;
        Ok(Self {
            ledger_path,
            total: file.total,
            awards: file.awards,
        })
    }

    /// Get the standard ledger file path
    /// Uses $DATA_HOME/glucoplay/stars.json
    pub fn ledger_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GameError::PersistenceError(
                "Unable to determine data directory".to_string()
            ))?;

        Ok(data_dir.join(APP_NAME).join(LEDGER_FILE))
    }

    fn read_file(path: &Path) -> Result<LedgerFile> {
        if !path.exists() {
            return Ok(LedgerFile::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| GameError::PersistenceError(
                format!("Failed to read ledger {}: {}", path.display(), e)
            ))?;

        serde_json::from_str(&content)
            .map_err(|e| GameError::PersistenceError(
                format!("Failed to parse ledger {}: {}", path.display(), e)
            ))
    }

    /// Total stars ever earned
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    fn awards(&self) -> &[StarAward] {
        &self.awards
    }

    /// Record an award and write the ledger to disk
    /// Rotates old awards once the history exceeds MAX_LEDGER_HISTORY entries
    pub fn record(&mut self, count: u32) -> Result<()> {
        self.total += u64::from(count);
        self.awards.push(StarAward {
            count,
            timestamp: Utc::now(),
        });

        if self.awards.len() > MAX_LEDGER_HISTORY {
            let skip_count = self.awards.len() - MAX_LEDGER_HISTORY;
            self.awards.drain(..skip_count);
        }

        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.ledger_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GameError::PersistenceError(
                    format!("Failed to create ledger directory {}: {}", parent.display(), e)
                ))?;
        }

        let file = LedgerFile {
            version: 1,
            total: self.total,
            awards: self.awards.clone(),
        };

        let content = serde_json::to_string_pretty(&file)?;

        fs::write(&self.ledger_path, content)
            .map_err(|e| GameError::PersistenceError(
                format!("Failed to write ledger {}: {}", self.ledger_path.display(), e)
            ))?;

        Ok(())
    }
}

impl StarSink for StarLedger {
    fn add_stars(&mut self, count: u32) {
        // Fire-and-forget: the run already ended, a failed write only loses the tally
        if let Err(e) = self.record(count) {
            tracing::warn!(error = %e, count, "failed to persist stars");
        } else {
            tracing::info!(count, total = self.total, "stars added");
        }
    }
}
