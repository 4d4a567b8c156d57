//! # md_core - Live Match Dashboard State Engine
//!
//! This library is the state engine behind a commentator's live match
//! dashboard. It holds two squads, the scoreboard and the event log in one
//! state value, routes every edit through an action protocol with a single
//! step of undo, and persists each piece as a JSON document.
//!
//! ## Features
//! - Deterministic lineup placement (same squad + formation = same pitch)
//! - Snapshot-then-commit action protocol with one-slot undo
//! - Pluggable document storage (filesystem or in-memory)
//! - Seeded derby fixture for fresh installs

pub mod actions;
pub mod error;
pub mod formation;
pub mod models;
pub mod scoring;
pub mod seed;
pub mod squad;
pub mod state;
pub mod store;
pub mod sync;

// Re-export the action protocol
pub use actions::{Action, ActionController, Notice, NoticeKind};
pub use error::{Result, SquadError};

// Re-export the match model
pub use models::{
    team_for_side, CancelReason, CardKind, EventType, GoalAngle, MatchEvent, Player, PlayerStats,
    PlayerStatus, RoleCategory, Score, SubRole, Team, TeamSide,
};
pub use state::{AppSnapshot, AppState, MatchInfo};

// Re-export pitch placement
pub use formation::{
    FormationKind, FormationTemplate, PitchPos, PlacedPlayer, DEFAULT_FORMATION_CODE,
};

// Re-export goal bookkeeping
pub use scoring::{CancelRecord, GoalDetails, GoalRecord};

// Re-export the persistence layer
pub use store::{DocumentStore, Envelope, FsStore, MemStore, PersistenceService, StoreError, ThemeMode};

// Re-export roster sync
pub use sync::{CandidatePlayer, Citation, RosterSource, SyncError, SyncReport, SyncStatus};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn goal_by(scorer_id: &str, side: TeamSide) -> Action {
        Action::RecordGoal(GoalDetails {
            side,
            scorer_id: scorer_id.to_string(),
            is_own_goal: false,
            angle: None,
            numeric_angle: None,
        })
    }

    #[test]
    fn test_seed_goal_undo_flow() {
        let mut controller =
            ActionController::load_or_seed(PersistenceService::in_memory());

        let notice = controller.apply(goal_by("h11", TeamSide::Home)).unwrap();
        assert_eq!(notice.unwrap().message, "Goal recorded");
        assert_eq!(controller.state().score.home, 1);
        assert_eq!(controller.state().events.len(), 1);
        assert!(controller.state().score_consistent());

        let undo = controller.undo().unwrap();
        assert_eq!(undo.kind, NoticeKind::Undo);
        assert_eq!(controller.state().score, Score::default());
        assert!(controller.state().events.is_empty());
    }

    #[test]
    fn test_dashboard_survives_a_restart() {
        let dir = TempDir::new().unwrap();

        {
            let service = PersistenceService::new(Box::new(FsStore::new(dir.path())));
            let mut controller = ActionController::load_or_seed(service);
            controller.apply(goal_by("a11", TeamSide::Away)).unwrap();
            controller
                .apply(Action::SetFormation {
                    side: TeamSide::Home,
                    code: "3-5-2".to_string(),
                })
                .unwrap();
        }

        let service = PersistenceService::new(Box::new(FsStore::new(dir.path())));
        let controller = ActionController::load_or_seed(service);

        assert_eq!(controller.state().score.away, 1);
        assert_eq!(controller.state().home_formation, "3-5-2");
        assert_eq!(controller.state().teams.len(), 2);
        assert_eq!(controller.placements(TeamSide::Home).len(), 11);
        assert!(controller.state().score_consistent());
    }

    #[test]
    fn test_placements_follow_the_formation_code() {
        let state = seed::demo_state();
        let placed = state.placements(TeamSide::Home);
        let template = formation::lookup(&state.home_formation);

        assert_eq!(placed.len(), template.slots.len());
        for (placed, slot) in placed.iter().zip(&template.slots) {
            assert_eq!(placed.sub_role, slot.role);
            assert_eq!(placed.pos, slot.pos);
        }
    }
}
