use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Broad tactical line a player belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl RoleCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoleCategory::Goalkeeper => "Goalkeeper",
            RoleCategory::Defense => "Defense",
            RoleCategory::Midfield => "Midfield",
            RoleCategory::Attack => "Attack",
        }
    }
}

/// Specific position code. The closed set matches the formation templates;
/// serialization uses the bare code string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum SubRole {
    GK,
    LB,
    LCB,
    CB,
    RCB,
    RB,
    LWB,
    RWB,
    CDM,
    LDM,
    RDM,
    CM,
    LCM,
    RCM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    ST,
    CF,
}

impl SubRole {
    /// Natural tactical category of the code. Wing backs count as defenders
    /// here; the 3-5-2 template reclassifies them per-slot.
    pub fn category(&self) -> RoleCategory {
        match self {
            SubRole::GK => RoleCategory::Goalkeeper,
            SubRole::LB
            | SubRole::LCB
            | SubRole::CB
            | SubRole::RCB
            | SubRole::RB
            | SubRole::LWB
            | SubRole::RWB => RoleCategory::Defense,
            SubRole::CDM
            | SubRole::LDM
            | SubRole::RDM
            | SubRole::CM
            | SubRole::LCM
            | SubRole::RCM
            | SubRole::CAM
            | SubRole::LM
            | SubRole::RM => RoleCategory::Midfield,
            SubRole::LW | SubRole::RW | SubRole::ST | SubRole::CF => RoleCategory::Attack,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SubRole::GK => "GK",
            SubRole::LB => "LB",
            SubRole::LCB => "LCB",
            SubRole::CB => "CB",
            SubRole::RCB => "RCB",
            SubRole::RB => "RB",
            SubRole::LWB => "LWB",
            SubRole::RWB => "RWB",
            SubRole::CDM => "CDM",
            SubRole::LDM => "LDM",
            SubRole::RDM => "RDM",
            SubRole::CM => "CM",
            SubRole::LCM => "LCM",
            SubRole::RCM => "RCM",
            SubRole::CAM => "CAM",
            SubRole::LM => "LM",
            SubRole::RM => "RM",
            SubRole::LW => "LW",
            SubRole::RW => "RW",
            SubRole::ST => "ST",
            SubRole::CF => "CF",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubRole::GK => "Goalkeeper",
            SubRole::LB => "Left Back",
            SubRole::LCB => "Left Centre Back",
            SubRole::CB => "Centre Back",
            SubRole::RCB => "Right Centre Back",
            SubRole::RB => "Right Back",
            SubRole::LWB => "Left Wing Back",
            SubRole::RWB => "Right Wing Back",
            SubRole::CDM => "Defensive Midfielder",
            SubRole::LDM => "Left Defensive Midfielder",
            SubRole::RDM => "Right Defensive Midfielder",
            SubRole::CM => "Central Midfielder",
            SubRole::LCM => "Left Central Midfielder",
            SubRole::RCM => "Right Central Midfielder",
            SubRole::CAM => "Attacking Midfielder",
            SubRole::LM => "Left Midfielder",
            SubRole::RM => "Right Midfielder",
            SubRole::LW => "Left Winger",
            SubRole::RW => "Right Winger",
            SubRole::ST => "Striker",
            SubRole::CF => "Centre Forward",
        }
    }
}

impl FromStr for SubRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" => Ok(SubRole::GK),
            "LB" => Ok(SubRole::LB),
            "LCB" => Ok(SubRole::LCB),
            "CB" => Ok(SubRole::CB),
            "RCB" => Ok(SubRole::RCB),
            "RB" => Ok(SubRole::RB),
            "LWB" => Ok(SubRole::LWB),
            "RWB" => Ok(SubRole::RWB),
            "CDM" => Ok(SubRole::CDM),
            "LDM" => Ok(SubRole::LDM),
            "RDM" => Ok(SubRole::RDM),
            "CM" => Ok(SubRole::CM),
            "LCM" => Ok(SubRole::LCM),
            "RCM" => Ok(SubRole::RCM),
            "CAM" => Ok(SubRole::CAM),
            "LM" => Ok(SubRole::LM),
            "RM" => Ok(SubRole::RM),
            "LW" => Ok(SubRole::LW),
            "RW" => Ok(SubRole::RW),
            "ST" => Ok(SubRole::ST),
            "CF" => Ok(SubRole::CF),
            _ => Err(format!("Invalid position code: {}", s)),
        }
    }
}

/// Whether a player is currently on the pitch or on the bench.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    Starter,
    Substitute,
}

impl PlayerStatus {
    pub fn is_starter(&self) -> bool {
        matches!(self, PlayerStatus::Starter)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub passes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat: Option<String>,
}

/// Squad member as the dashboard sees one. Card flags and captaincy are
/// live-match state; the trailing optional block is management data that
/// squad sync may fill in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub category: RoleCategory,
    pub sub_role: SubRole,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub yellow_card: bool,
    #[serde(default)]
    pub red_card: bool,
    pub status: PlayerStatus,
    #[serde(default, rename = "isDeleted")]
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_notes: Option<String>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    /// Fresh player with a minted id and empty match state.
    pub fn new(name: &str, number: u32, category: RoleCategory, sub_role: SubRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            number,
            avatar: None,
            category,
            sub_role,
            is_captain: false,
            yellow_card: false,
            red_card: false,
            status: PlayerStatus::Substitute,
            deleted: false,
            height: None,
            weight: None,
            age: None,
            nationality: None,
            birth_date: None,
            position_raw: None,
            player_notes: None,
            stats: PlayerStats::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    pub fn is_active_starter(&self) -> bool {
        !self.deleted && self.status.is_starter()
    }
}
