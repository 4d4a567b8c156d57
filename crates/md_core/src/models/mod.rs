pub mod events;
pub mod player;
pub mod team;

pub use events::{CancelReason, CardKind, EventType, GoalAngle, MatchEvent, Score};
pub use player::{Player, PlayerStats, PlayerStatus, RoleCategory, SubRole};
pub use team::{team_for_side, Team, TeamSide};
