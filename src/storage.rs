//! JSON document storage for leagues, generated pods and match history.
//!
//! Layout under the data directory:
//!
//! ```text
//! leagues/{event}.json
//! matchings/{event}/{month}.json
//! history/{event}.json
//! ```
//!
//! A missing document loads as `Ok(None)`, never as an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StorageResult;
use crate::history::MatchHistory;
use crate::roster::League;
use crate::schedule::AssignmentResult;

#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_league(&self, event_id: &str) -> StorageResult<Option<League>> {
        read_json(&self.league_path(event_id))
    }

    pub fn save_league(&self, league: &League) -> StorageResult<()> {
        write_json(&self.league_path(&league.event_id), league)
    }

    pub fn load_assignment(&self, event_id: &str, month: &str) -> StorageResult<Option<AssignmentResult>> {
        read_json(&self.assignment_path(event_id, month))
    }

    pub fn save_assignment(&self, event_id: &str, result: &AssignmentResult) -> StorageResult<()> {
        write_json(&self.assignment_path(event_id, &result.month), result)
    }

    /// Loads the ledger for `event_id`, or an empty one if none is stored yet.
    pub fn load_history(&self, event_id: &str) -> StorageResult<MatchHistory> {
        Ok(read_json(&self.history_path(event_id))?.unwrap_or_else(|| MatchHistory::new(event_id)))
    }

    pub fn save_history(&self, history: &MatchHistory) -> StorageResult<()> {
        write_json(&self.history_path(&history.event_id), history)
    }

    /// Folds a period's matches into the stored ledger.
    ///
    /// A pair already recorded for the same month is not added again, so
    /// re-recording a regenerated or swapped period is safe.
    pub fn record_matches(&self, event_id: &str, result: &AssignmentResult) -> StorageResult<usize> {
        let mut history = self.load_history(event_id)?;
        let mut added = 0;

        for m in result.pods.iter().flat_map(|p| &p.matches) {
            if !history.contains(&m.player1_id, &m.player2_id, &result.month) {
                history.add_pairing(m.player1_id.clone(), m.player2_id.clone(), result.month.clone());
                added += 1;
            }
        }

        self.save_history(&history)?;
        debug!(%event_id, month = %result.month, added, "matches recorded to history");
        Ok(added)
    }

    fn league_path(&self, event_id: &str) -> PathBuf {
        self.data_dir.join("leagues").join(format!("{event_id}.json"))
    }

    fn assignment_path(&self, event_id: &str, month: &str) -> PathBuf {
        self.data_dir
            .join("matchings")
            .join(event_id)
            .join(format!("{}.json", month.to_lowercase()))
    }

    fn history_path(&self, event_id: &str) -> PathBuf {
        self.data_dir.join("history").join(format!("{event_id}.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), "document loaded");
    Ok(Some(serde_json::from_str(&content)?))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    debug!(path = %path.display(), "document saved");
    Ok(())
}
