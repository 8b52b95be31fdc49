use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use super::model::MetricsSnapshot;
use crate::error::Result;

/// Writes one dated snapshot file per run into a target directory.
/// Re-running for the same date overwrites the earlier file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path_for_date(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("metrics_{date}.json"))
    }

    pub fn write(&self, date: NaiveDate, snapshot: &MetricsSnapshot) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut content = serde_json::to_string(snapshot)?;
        content.push('\n');

        let path = self.path_for_date(date);
        std::fs::write(&path, content)?;
        debug!(path = %path.display(), "Snapshot written");

        Ok(path)
    }

    /// Read a previously written snapshot back (downstream reporting
    /// consumes these).
    pub fn read(&self, date: NaiveDate) -> Result<MetricsSnapshot> {
        let content = std::fs::read_to_string(self.path_for_date(date))?;
        Ok(serde_json::from_str(&content)?)
    }
}
