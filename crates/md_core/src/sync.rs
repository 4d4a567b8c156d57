//! Squad sync port.
//!
//! External roster search is a seam, not an implementation: callers hand a
//! [`RosterSource`] to the app, and whatever it fetches flows through the
//! candidate mapping here before the merge rules in [`crate::squad`] apply.

use crate::models::{Player, RoleCategory, SubRole};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Sync I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sync payload parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Lifecycle the sync UI walks through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Searching,
    Parsing,
    Success,
    Error,
}

impl SyncStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, SyncStatus::Searching | SyncStatus::Parsing)
    }
}

/// Where a fetched squad came from, surfaced alongside the results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

/// Raw squad row as a source reports it. `category` carries the source's
/// own position label ("Defender", "Midfielder", ...); everything optional
/// gets a conservative default on mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePlayer {
    pub name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_role: Option<SubRole>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub position_raw: Option<String>,
}

impl CandidatePlayer {
    pub fn named(name: &str, number: Option<u32>) -> Self {
        Self {
            name: name.to_string(),
            number,
            category: None,
            sub_role: None,
            nationality: None,
            birth_date: None,
            position_raw: None,
        }
    }

    /// Build a squad member from the raw row. Missing numbers become 0,
    /// unknown position labels land in midfield as a CM, and everyone
    /// arrives as a substitute.
    pub fn to_player(&self) -> Player {
        let category = self
            .category
            .as_deref()
            .map(map_source_category)
            .unwrap_or(RoleCategory::Midfield);
        let sub_role = self.sub_role.unwrap_or(SubRole::CM);

        let mut player = Player::new(&self.name, self.number.unwrap_or(0), category, sub_role);
        player.nationality = self.nationality.clone();
        player.birth_date = self.birth_date.clone();
        player.position_raw = self.position_raw.clone();
        player
    }
}

fn map_source_category(label: &str) -> RoleCategory {
    match label {
        "Goalkeeper" => RoleCategory::Goalkeeper,
        "Defender" => RoleCategory::Defense,
        "Midfielder" => RoleCategory::Midfield,
        "Forward" => RoleCategory::Attack,
        _ => RoleCategory::Midfield,
    }
}

/// A fetched squad plus the provenance behind it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncReport {
    pub candidates: Vec<CandidatePlayer>,
    #[serde(default)]
    pub sources: Vec<Citation>,
}

/// Anything that can look up a squad by team name.
pub trait RosterSource {
    fn fetch_squad(&self, team_name: &str) -> Result<SyncReport, SyncError>;
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerStatus;

    #[test]
    fn mapping_fills_conservative_defaults() {
        let candidate = CandidatePlayer::named("Mystery Signing", None);
        let player = candidate.to_player();
        assert_eq!(player.number, 0);
        assert_eq!(player.category, RoleCategory::Midfield);
        assert_eq!(player.sub_role, SubRole::CM);
        assert_eq!(player.status, PlayerStatus::Substitute);
    }

    #[test]
    fn mapping_translates_source_position_labels() {
        let mut candidate = CandidatePlayer::named("Keeper", Some(1));
        candidate.category = Some("Goalkeeper".to_string());
        candidate.sub_role = Some(SubRole::GK);
        let player = candidate.to_player();
        assert_eq!(player.category, RoleCategory::Goalkeeper);
        assert_eq!(player.sub_role, SubRole::GK);

        let mut candidate = CandidatePlayer::named("Unknown Role", Some(2));
        candidate.category = Some("Libero".to_string());
        assert_eq!(candidate.to_player().category, RoleCategory::Midfield);
    }

    #[test]
    fn report_parses_wire_payloads() {
        let json = r#"{
            "candidates": [
                {"name": "Wing Wizard", "number": 7, "category": "Forward",
                 "subRole": "RW", "nationality": "BR", "birthDate": "1999-03-01",
                 "positionRaw": "right wing"}
            ],
            "sources": [{"title": "Club site", "uri": "https://example.com/squad"}]
        }"#;
        let report: SyncReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.candidates.len(), 1);
        let player = report.candidates[0].to_player();
        assert_eq!(player.sub_role, SubRole::RW);
        assert_eq!(player.position_raw.as_deref(), Some("right wing"));
        assert_eq!(report.sources[0].title, "Club site");
    }

    #[test]
    fn busy_states_cover_the_fetch_window() {
        assert!(SyncStatus::Searching.is_busy());
        assert!(SyncStatus::Parsing.is_busy());
        assert!(!SyncStatus::Success.is_busy());
        assert_eq!(serde_json::to_string(&SyncStatus::Idle).unwrap(), "\"idle\"");
    }
}
