use super::vfs::{DocumentStore, MemStore};
use super::{
    BENCH_DOC, EVENTS_DOC, FORMATIONS_DOC, HISTORY_DOC, PLAYERS_DOC, SCORE_DOC, TEAMS_DOC,
    THEME_DOC,
};
use crate::formation::DEFAULT_FORMATION_CODE;
use crate::models::{Player, Score, Team};
use crate::state::{AppSnapshot, AppState, MatchInfo};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Dashboard colour scheme, persisted outside the undo history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    System,
}

/// Team record as stored, with the squad split out into the players
/// document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamRecord {
    id: String,
    name: String,
    short_name: String,
    #[serde(default)]
    logo: String,
    formation: String,
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    manager: String,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    commentary_points: Vec<String>,
    #[serde(default, rename = "isDeleted")]
    deleted: bool,
}

impl TeamRecord {
    fn from_team(team: &Team) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            short_name: team.short_name.clone(),
            logo: team.logo.clone(),
            formation: team.formation.clone(),
            form: team.form.clone(),
            manager: team.manager.clone(),
            notes: team.notes.clone(),
            commentary_points: team.commentary_points.clone(),
            deleted: team.deleted,
        }
    }

    fn into_team(self, players: Vec<Player>) -> Team {
        Team {
            id: self.id,
            name: self.name,
            short_name: self.short_name,
            logo: self.logo,
            formation: self.formation,
            form: self.form,
            manager: self.manager,
            notes: self.notes,
            commentary_points: self.commentary_points,
            players,
            deleted: self.deleted,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRow {
    team_id: String,
    #[serde(flatten)]
    player: Player,
}

/// Derived bench index, written for external readers of the store.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BenchRow {
    team_id: String,
    bench_player_ids: Vec<String>,
}

fn default_formation() -> String {
    DEFAULT_FORMATION_CODE.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct FormationsDoc {
    #[serde(default = "default_formation")]
    home: String,
    #[serde(default = "default_formation")]
    away: String,
}

impl Default for FormationsDoc {
    fn default() -> Self {
        Self { home: default_formation(), away: default_formation() }
    }
}

/// Owns the document store; nothing above this layer touches paths or
/// envelopes. Writes are fire-and-forget relative to the action flow.
pub struct PersistenceService {
    store: Box<dyn DocumentStore>,
}

impl PersistenceService {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Service over a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemStore::new()))
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_initialized()
    }

    /// Mirror the committed state into the store, one document per concern.
    pub fn save_all(&self, state: &AppState) {
        let records: Vec<TeamRecord> = state.teams.iter().map(TeamRecord::from_team).collect();
        let rows: Vec<PlayerRow> = state
            .teams
            .iter()
            .flat_map(|team| {
                team.players
                    .iter()
                    .map(|player| PlayerRow { team_id: team.id.clone(), player: player.clone() })
            })
            .collect();
        let bench: Vec<BenchRow> = state
            .teams
            .iter()
            .map(|team| BenchRow {
                team_id: team.id.clone(),
                bench_player_ids: team.bench().map(|p| p.id.clone()).collect(),
            })
            .collect();
        let formations = FormationsDoc {
            home: state.home_formation.clone(),
            away: state.away_formation.clone(),
        };

        self.persist(TEAMS_DOC, &records);
        self.persist(PLAYERS_DOC, &rows);
        self.persist(FORMATIONS_DOC, &formations);
        self.persist(BENCH_DOC, &bench);
        self.persist(SCORE_DOC, &state.score);
        self.persist(EVENTS_DOC, &state.events);
    }

    /// Reassemble the persisted state. Both core documents (teams, players)
    /// must be present and readable, otherwise `None` so the caller can seed
    /// instead; the match-side documents fall back to defaults.
    pub fn load_all(&self) -> Option<AppState> {
        let records: Vec<TeamRecord> = self.read_required(TEAMS_DOC)?;
        let rows: Vec<PlayerRow> = self.read_required(PLAYERS_DOC)?;
        let mut squads: HashMap<String, Vec<Player>> = HashMap::new();
        for row in rows {
            if records.iter().any(|r| r.id == row.team_id) {
                squads.entry(row.team_id).or_default().push(row.player);
            } else {
                log::warn!("Dropping player row for unknown team {}", row.team_id);
            }
        }

        let teams: Vec<Team> = records
            .into_iter()
            .map(|record| {
                let players = squads.remove(&record.id).unwrap_or_default();
                record.into_team(players)
            })
            .collect();

        let formations: FormationsDoc = self.read_or(FORMATIONS_DOC, FormationsDoc::default());

        Some(AppState {
            teams,
            home_formation: formations.home,
            away_formation: formations.away,
            score: self.read_or(SCORE_DOC, Score::default()),
            events: self.read_or(EVENTS_DOC, Vec::new()),
            match_info: MatchInfo::default(),
        })
    }

    /// Overwrite the single undo slot.
    pub fn push_history(&self, snapshot: &AppSnapshot) {
        self.persist(HISTORY_DOC, snapshot);
    }

    /// Read and clear the undo slot. `None` when empty.
    pub fn take_history(&self) -> Option<AppSnapshot> {
        let value = self.store.read_json(HISTORY_DOC)?;
        self.persist(HISTORY_DOC, &Value::Null);
        match serde_json::from_value(value) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("Discarding malformed document {}: {}", HISTORY_DOC, err);
                None
            }
        }
    }

    pub fn save_theme(&self, theme: ThemeMode) {
        self.persist(THEME_DOC, &theme);
    }

    pub fn theme(&self) -> ThemeMode {
        self.read_or(THEME_DOC, ThemeMode::default())
    }

    fn persist<T: Serialize>(&self, path: &str, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => {
                if let Err(err) = self.store.write_json(path, &value) {
                    log::warn!("Failed to persist {}: {}", path, err);
                }
            }
            Err(err) => log::warn!("Failed to encode {}: {}", path, err),
        }
    }

    fn read_required<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match serde_json::from_value(self.store.read_json(path)?) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::warn!("Discarding malformed document {}: {}", path, err);
                None
            }
        }
    }

    fn read_or<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        match self.store.read_json(path) {
            Some(value) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(err) => {
                    log::warn!("Discarding malformed document {}: {}", path, err);
                    fallback
                }
            },
            None => fallback,
        }
    }
}
