//! File-backed roster source.
//!
//! The working [`RosterSource`] implementation: a JSON file in the report
//! wire shape stands in for a network squad search.

use md_core::{RosterSource, SyncError, SyncReport};
use std::fs;
use std::path::PathBuf;

pub struct FileRosterSource {
    path: PathBuf,
}

impl FileRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRosterSource {
    fn fetch_squad(&self, team_name: &str) -> Result<SyncReport, SyncError> {
        log::debug!("Reading candidate squad for {} from {}", team_name, self.path.display());
        let raw = fs::read_to_string(&self.path)?;
        let report: SyncReport = serde_json::from_str(&raw)?;
        log::info!("{} candidates on file for {}", report.candidates.len(), team_name);
        Ok(report)
    }
}
