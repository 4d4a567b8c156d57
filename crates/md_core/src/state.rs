use crate::formation::{self, PlacedPlayer};
use crate::models::{team_for_side, MatchEvent, Score, Team, TeamSide};
use crate::scoring::live_goal_count;
use serde::{Deserialize, Serialize};

/// Display metadata for the fixture being covered. The clock string is the
/// minute source for generated events; it is session state, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchInfo {
    #[serde(default)]
    pub competition: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub clock: String,
}

impl Default for MatchInfo {
    fn default() -> Self {
        Self { competition: String::new(), venue: String::new(), clock: "00:00".to_string() }
    }
}

impl MatchInfo {
    /// Minute part of the display clock ("64:12" reads as minute "64").
    pub fn current_minute(&self) -> String {
        match self.clock.split(':').next() {
            Some(minute) if !minute.is_empty() => minute.to_string(),
            _ => "0".to_string(),
        }
    }
}

/// Everything the dashboard shows. The action controller owns the single
/// live instance; engines receive pieces of it by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub teams: Vec<Team>,
    pub home_formation: String,
    pub away_formation: String,
    pub score: Score,
    /// Most recent first; new entries are prepended.
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub match_info: MatchInfo,
}

/// The undoable subset of [`AppState`], captured before every action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub teams: Vec<Team>,
    pub home_formation: String,
    pub away_formation: String,
    pub score: Score,
    pub events: Vec<MatchEvent>,
    pub timestamp: i64,
}

impl AppState {
    pub fn team_for_side(&self, side: TeamSide) -> Option<&Team> {
        team_for_side(&self.teams, side)
    }

    pub fn formation_for_side(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Home => &self.home_formation,
            TeamSide::Away => &self.away_formation,
        }
    }

    pub fn minute(&self) -> String {
        self.match_info.current_minute()
    }

    pub fn push_event(&mut self, event: MatchEvent) {
        self.events.insert(0, event);
    }

    /// Lay the side's starters onto its current formation. Empty when the
    /// side has no team yet.
    pub fn placements(&self, side: TeamSide) -> Vec<PlacedPlayer> {
        match self.team_for_side(side) {
            Some(team) => formation::assign(self.formation_for_side(side), team),
            None => Vec::new(),
        }
    }

    /// The scoreboard matches the standing goal events for both sides.
    pub fn score_consistent(&self) -> bool {
        self.score.home == live_goal_count(&self.events, TeamSide::Home)
            && self.score.away == live_goal_count(&self.events, TeamSide::Away)
    }

    /// Capture the undoable subset, stamped now.
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            teams: self.teams.clone(),
            home_formation: self.home_formation.clone(),
            away_formation: self.away_formation.clone(),
            score: self.score,
            events: self.events.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Put a captured snapshot back in full. The display clock is session
    /// state and stays as it is.
    pub fn restore(&mut self, snapshot: AppSnapshot) {
        self.teams = snapshot.teams;
        self.home_formation = snapshot.home_formation;
        self.away_formation = snapshot.away_formation;
        self.score = snapshot.score;
        self.events = snapshot.events;
    }
}
