use super::team::TeamSide;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commentary log entry kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Goal,
    Yellow,
    Red,
    Sub,
}

/// Card color for the card-toggle action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Yellow,
    Red,
}

impl CardKind {
    pub fn event_type(&self) -> EventType {
        match self {
            CardKind::Yellow => EventType::Yellow,
            CardKind::Red => EventType::Red,
        }
    }
}

/// Categorical shot placement a commentator calls out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalAngle {
    Upper,
    Mid,
    Lower,
}

impl GoalAngle {
    /// Indicative degree band for the precise-angle prompt.
    pub fn degree_range(&self) -> (u16, u16) {
        match self {
            GoalAngle::Upper => (60, 90),
            GoalAngle::Mid => (30, 60),
            GoalAngle::Lower => (0, 30),
        }
    }
}

/// Why a goal was struck from the score. The event keeps the resolved label,
/// so `Other` carries its free text here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    Offside,
    PriorInfraction,
    Handball,
    VarDecision,
    Other(String),
}

impl CancelReason {
    pub fn label(&self) -> String {
        match self {
            CancelReason::Offside => "offside".to_string(),
            CancelReason::PriorInfraction => "prior infraction".to_string(),
            CancelReason::Handball => "handball".to_string(),
            CancelReason::VarDecision => "VAR decision".to_string(),
            CancelReason::Other(text) => text.clone(),
        }
    }
}

/// One row of the commentary log. Player fields hold display names on
/// purpose: the log is what was said at the time, and later roster edits
/// must not rewrite it. Only the cancellation overlay is ever mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub minute: String,
    pub player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_out: Option<String>,
    pub team: TeamSide,
    #[serde(default)]
    pub is_own_goal: bool,
    #[serde(default)]
    pub is_canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<GoalAngle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_angle: Option<u16>,
}

impl MatchEvent {
    fn base(event_type: EventType, minute: &str, side: TeamSide, player: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
            minute: minute.to_string(),
            player: player.to_string(),
            player_out: None,
            team: side,
            is_own_goal: false,
            is_canceled: false,
            cancel_reason: None,
            angle: None,
            numeric_angle: None,
        }
    }

    /// Goal credited to `side`; `scorer` is the conceding side's player when
    /// `is_own_goal` is set.
    pub fn goal(minute: &str, side: TeamSide, scorer: &str, is_own_goal: bool) -> Self {
        let mut event = Self::base(EventType::Goal, minute, side, scorer);
        event.is_own_goal = is_own_goal;
        event
    }

    pub fn card(minute: &str, side: TeamSide, player: &str, kind: CardKind) -> Self {
        Self::base(kind.event_type(), minute, side, player)
    }

    /// Substitution: `player` is the one coming on, `player_out` the one
    /// making way.
    pub fn substitution(minute: &str, side: TeamSide, player_in: &str, player_out: &str) -> Self {
        let mut event = Self::base(EventType::Sub, minute, side, player_in);
        event.player_out = Some(player_out.to_string());
        event
    }

    pub fn with_angle(mut self, angle: Option<GoalAngle>) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_numeric_angle(mut self, numeric_angle: Option<u16>) -> Self {
        self.numeric_angle = numeric_angle;
        self
    }

    /// Counts toward the scoreboard.
    pub fn is_live_goal(&self) -> bool {
        self.event_type == EventType::Goal && !self.is_canceled
    }
}

/// Scoreboard tally, kept consistent with the non-canceled goal events.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn get(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut u32 {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}
