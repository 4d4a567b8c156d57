use super::player::{Player, PlayerStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the scoreboard a team occupies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "home"),
            TeamSide::Away => write!(f, "away"),
        }
    }
}

/// A club with its squad. `formation` stays a plain identifier string;
/// unknown values are resolved by the formation engine at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub logo: String,
    pub formation: String,
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub commentary_points: Vec<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, rename = "isDeleted")]
    pub deleted: bool,
}

impl Team {
    pub fn new(id: &str, name: &str, short_name: &str, formation: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            short_name: short_name.to_string(),
            logo: String::new(),
            formation: formation.to_string(),
            form: Vec::new(),
            manager: String::new(),
            notes: Vec::new(),
            commentary_points: Vec::new(),
            players: Vec::new(),
            deleted: false,
        }
    }

    /// Non-deleted players currently on the pitch.
    pub fn starters(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.deleted && p.status == PlayerStatus::Starter)
    }

    /// Non-deleted players on the bench.
    pub fn bench(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.deleted && p.status == PlayerStatus::Substitute)
    }

    pub fn starter_count(&self) -> usize {
        self.starters().count()
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id && !p.deleted)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id && !p.deleted)
    }

    /// The one wearing the armband, if any.
    pub fn captain(&self) -> Option<&Player> {
        self.players.iter().find(|p| !p.deleted && p.is_captain)
    }
}

/// Resolve a scoreboard side to its club: the first non-deleted team is the
/// home side, the second the away side.
pub fn team_for_side(teams: &[Team], side: TeamSide) -> Option<&Team> {
    let mut active = teams.iter().filter(|t| !t.deleted);
    match side {
        TeamSide::Home => active.next(),
        TeamSide::Away => active.nth(1),
    }
}
