//! Action protocol and undo.
//!
//! The controller is the single writer: every mutation snapshots the prior
//! state into the one-slot history, commits the successor, and mirrors it to
//! storage. Validation failures leave everything untouched; dangling-id
//! failures are absorbed as quiet no-ops.

use crate::error::{Result, SquadError};
use crate::formation::PlacedPlayer;
use crate::models::{CancelReason, CardKind, Player, Team, TeamSide};
use crate::scoring::{self, GoalDetails};
use crate::seed;
use crate::squad;
use crate::state::AppState;
use crate::store::{PersistenceService, ThemeMode};
use crate::sync::CandidatePlayer;

/// One operator intent, validated and committed as a unit.
#[derive(Debug, Clone)]
pub enum Action {
    RecordGoal(GoalDetails),
    CancelGoal { side: TeamSide, reason: CancelReason },
    SwapStarterBench { side: TeamSide, starter_id: String, bench_id: String },
    SwapSlots { side: TeamSide, first_id: String, second_id: String },
    UpsertPlayer { side: TeamSide, player: Player },
    UpsertPlayerSwapping { side: TeamSide, player: Player, demote_id: String },
    ToggleCaptain { side: TeamSide, player_id: String },
    ToggleCard { side: TeamSide, player_id: String, kind: CardKind },
    MergeSquad { side: TeamSide, candidates: Vec<CandidatePlayer> },
    DeletePlayer { side: TeamSide, player_id: String },
    DeleteTeam { team_id: String },
    SaveTeam(Team),
    SetFormation { side: TeamSide, code: String },
}

/// Toast handed to the presentation layer after a commit or an undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Action,
    Undo,
}

impl Notice {
    fn action(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NoticeKind::Action }
    }

    fn undo(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NoticeKind::Undo }
    }

    /// How long the toast stays up.
    pub fn display_ms(&self) -> u64 {
        match self.kind {
            NoticeKind::Action => 5000,
            NoticeKind::Undo => 3000,
        }
    }
}

pub struct ActionController {
    state: AppState,
    service: PersistenceService,
}

impl ActionController {
    pub fn new(state: AppState, service: PersistenceService) -> Self {
        Self { state, service }
    }

    /// Start from the persisted state, or from the demo fixture when the
    /// store has nothing usable.
    pub fn load_or_seed(service: PersistenceService) -> Self {
        let state = match service.load_all() {
            Some(state) => {
                log::info!("Loaded persisted match state");
                state
            }
            None => {
                log::info!("No usable saved state, seeding demo data");
                seed::demo_state()
            }
        };
        Self::new(state, service)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Session clock, consulted for the minute stamp on generated events.
    /// Not an action: no snapshot, nothing persisted.
    pub fn set_clock(&mut self, clock: &str) {
        self.state.match_info.clock = clock.to_string();
    }

    pub fn placements(&self, side: TeamSide) -> Vec<PlacedPlayer> {
        self.state.placements(side)
    }

    pub fn theme(&self) -> ThemeMode {
        self.service.theme()
    }

    /// Theme changes persist immediately but bypass the action protocol.
    pub fn set_theme(&self, mode: ThemeMode) {
        self.service.save_theme(mode);
    }

    /// Run one action through snapshot-then-commit. `Ok(None)` means the
    /// action targeted something that no longer exists and was dropped.
    pub fn apply(&mut self, action: Action) -> Result<Option<Notice>> {
        let minute = self.state.minute();
        match self.successor(&minute, action) {
            Ok((next, message)) => Ok(Some(self.commit(next, message))),
            Err(err) if err.is_not_found() => {
                log::debug!("Ignoring action on a missing target: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Revert to the snapshot in the history slot. Quiet no-op when the
    /// slot is empty; never snapshotted itself, so depth stays at one.
    pub fn undo(&mut self) -> Option<Notice> {
        let snapshot = self.service.take_history()?;
        self.state.restore(snapshot);
        self.service.save_all(&self.state);
        log::info!("Reverted the last action");
        Some(Notice::undo("Last action undone"))
    }

    fn commit(&mut self, next: AppState, message: String) -> Notice {
        self.service.push_history(&self.state.snapshot());
        self.state = next;
        self.service.save_all(&self.state);
        log::info!("{}", message);
        Notice::action(message)
    }

    fn side_team(&self, side: TeamSide) -> Result<&Team> {
        self.state
            .team_for_side(side)
            .ok_or_else(|| SquadError::TeamNotFound(side.to_string()))
    }

    fn successor(&self, minute: &str, action: Action) -> Result<(AppState, String)> {
        let state = &self.state;
        match action {
            Action::RecordGoal(details) => {
                let record = scoring::record_goal(&state.teams, state.score, &details, minute)?;
                let mut next = state.clone();
                next.score = record.score;
                next.push_event(record.event);
                Ok((next, "Goal recorded".to_string()))
            }
            Action::CancelGoal { side, reason } => {
                let record = scoring::cancel_goal(&state.events, state.score, side, &reason)?;
                let mut next = state.clone();
                next.events = record.events;
                next.score = record.score;
                Ok((next, "Goal canceled and log updated".to_string()))
            }
            Action::SwapStarterBench { side, starter_id, bench_id } => {
                let team = self.side_team(side)?;
                let result =
                    squad::swap_starter_bench(team, side, &starter_id, &bench_id, minute)?;
                let mut next = state.clone();
                put_team(&mut next.teams, result.team);
                next.push_event(result.event);
                Ok((next, "Substitution made".to_string()))
            }
            Action::SwapSlots { side, first_id, second_id } => {
                let team = self.side_team(side)?;
                let updated = squad::swap_slots(team, &first_id, &second_id)?;
                let mut next = state.clone();
                put_team(&mut next.teams, updated);
                Ok((next, "Lineup updated".to_string()))
            }
            Action::UpsertPlayer { side, player } => {
                let team = self.side_team(side)?;
                let updated = squad::upsert_player(team, player)?;
                let mut next = state.clone();
                put_team(&mut next.teams, updated);
                Ok((next, "Player details updated".to_string()))
            }
            Action::UpsertPlayerSwapping { side, player, demote_id } => {
                let team = self.side_team(side)?;
                let updated = squad::upsert_player_swapping(team, player, &demote_id)?;
                let mut next = state.clone();
                put_team(&mut next.teams, updated);
                Ok((next, "Player details updated".to_string()))
            }
            Action::ToggleCaptain { side, player_id } => {
                let team = self.side_team(side)?;
                let updated = squad::toggle_captain(team, &player_id)?;
                let mut next = state.clone();
                put_team(&mut next.teams, updated);
                Ok((next, "Captain updated".to_string()))
            }
            Action::ToggleCard { side, player_id, kind } => {
                let team = self.side_team(side)?;
                let result = squad::toggle_card(team, side, &player_id, kind, minute)?;
                let label = match kind {
                    CardKind::Yellow => "Yellow",
                    CardKind::Red => "Red",
                };
                let message = if result.event.is_some() {
                    format!("{} card shown", label)
                } else {
                    format!("{} card rescinded", label)
                };
                let mut next = state.clone();
                put_team(&mut next.teams, result.team);
                if let Some(event) = result.event {
                    next.push_event(event);
                }
                Ok((next, message))
            }
            Action::MergeSquad { side, candidates } => {
                let team = self.side_team(side)?;
                let result = squad::merge_candidates(team, &candidates);
                let message = format!(
                    "Bench updated: {} added, {} skipped",
                    result.added, result.skipped
                );
                let mut next = state.clone();
                put_team(&mut next.teams, result.team);
                Ok((next, message))
            }
            Action::DeletePlayer { side, player_id } => {
                let team = self.side_team(side)?;
                let updated = squad::soft_delete_player(team, &player_id)?;
                let mut next = state.clone();
                put_team(&mut next.teams, updated);
                Ok((next, "Player removed".to_string()))
            }
            Action::DeleteTeam { team_id } => {
                let teams = squad::soft_delete_team(&state.teams, &team_id)?;
                let mut next = state.clone();
                next.teams = teams;
                Ok((next, "Team removed".to_string()))
            }
            Action::SaveTeam(team) => {
                let mut next = state.clone();
                next.teams = squad::save_team(&state.teams, team);
                Ok((next, "Team saved".to_string()))
            }
            Action::SetFormation { side, code } => {
                let message = format!("Formation changed to {}", code);
                let mut next = state.clone();
                match side {
                    TeamSide::Home => next.home_formation = code,
                    TeamSide::Away => next.away_formation = code,
                }
                Ok((next, message))
            }
        }
    }
}

fn put_team(teams: &mut [Team], team: Team) {
    if let Some(slot) = teams.iter_mut().find(|t| t.id == team.id) {
        *slot = team;
    }
}
