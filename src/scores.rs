//! Session score log
//!
//! Finished sessions are appended to a JSON-lines file, one record per
//! line. Writing never takes the game down: `ScoreLog::record` logs the
//! failure and carries on.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Outcome;

/// Score log errors
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid score record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub outcome: Outcome,
    pub score: u64,
    /// When the session ended
    pub timestamp: DateTime<Utc>,
}

/// Append-only score history on disk
#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file and its directory if needed
    pub fn append(&self, record: &SessionRecord) -> Result<(), ScoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Append, logging instead of failing. Returns true if the record was saved.
    pub fn record(&self, record: &SessionRecord) -> bool {
        match self.append(record) {
            Ok(()) => {
                log::info!(
                    "Saved {:?} with score {} to {}",
                    record.outcome,
                    record.score,
                    self.path.display()
                );
                true
            }
            Err(e) => {
                log::warn!("Failed to save score to {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// All readable records, oldest first. A missing file is an empty
    /// history; malformed lines are skipped with a warning.
    pub fn load(&self) -> Result<Vec<SessionRecord>, ScoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping score line {}: {}", number + 1, e),
            }
        }
        Ok(records)
    }
}

/// Highest score in a history
pub fn best(records: &[SessionRecord]) -> Option<u64> {
    records.iter().map(|r| r.score).max()
}

/// Rank (1-indexed) a score would take among `records`, ties ranking below
pub fn rank_of(records: &[SessionRecord], score: u64) -> usize {
    records.iter().filter(|r| r.score >= score).count() + 1
}
