//! Goal lifecycle.
//!
//! Recording and cancelling goals move the scoreboard and the event log in
//! one step, which keeps the tally equal to the count of non-canceled goal
//! events at every commit boundary. Cancellation never removes the event;
//! it overlays the strike-through and the reason a commentator gives.

use crate::error::{Result, SquadError};
use crate::models::{
    team_for_side, CancelReason, GoalAngle, MatchEvent, PlayerStatus, Score, Team, TeamSide,
};

/// Operator input for one goal.
#[derive(Debug, Clone)]
pub struct GoalDetails {
    /// Side credited on the scoreboard.
    pub side: TeamSide,
    pub scorer_id: String,
    pub is_own_goal: bool,
    pub angle: Option<GoalAngle>,
    /// Exact degrees, only when the operator opted into the precise prompt.
    pub numeric_angle: Option<u16>,
}

/// A recorded goal: the log entry plus the moved scoreboard.
#[derive(Debug, Clone)]
pub struct GoalRecord {
    pub event: MatchEvent,
    pub score: Score,
}

/// A cancelled goal: the rewritten log plus the moved scoreboard.
#[derive(Debug, Clone)]
pub struct CancelRecord {
    pub events: Vec<MatchEvent>,
    pub score: Score,
}

/// Goals a side is currently credited with.
pub fn live_goal_count(events: &[MatchEvent], side: TeamSide) -> u32 {
    events.iter().filter(|e| e.team == side && e.is_live_goal()).count() as u32
}

/// Credit a goal. The scorer must be a current starter on the eligible
/// team: the conceding side for an own goal, the credited side otherwise.
pub fn record_goal(
    teams: &[Team],
    score: Score,
    details: &GoalDetails,
    minute: &str,
) -> Result<GoalRecord> {
    let scorer_side =
        if details.is_own_goal { details.side.opponent() } else { details.side };
    let team = team_for_side(teams, scorer_side)
        .ok_or_else(|| SquadError::TeamNotFound(scorer_side.to_string()))?;

    let scorer = team
        .players
        .iter()
        .find(|p| p.id == details.scorer_id)
        .ok_or_else(|| SquadError::PlayerNotFound(details.scorer_id.clone()))?;
    if scorer.deleted || scorer.status != PlayerStatus::Starter {
        return Err(SquadError::IneligibleScorer(scorer.name.clone()));
    }

    let event = MatchEvent::goal(minute, details.side, &scorer.name, details.is_own_goal)
        .with_angle(details.angle)
        .with_numeric_angle(details.numeric_angle);

    let mut score = score;
    *score.get_mut(details.side) += 1;

    Ok(GoalRecord { event, score })
}

/// Strike the most recent standing goal of a side from the score. The
/// event keeps its place in the log with the reason written across it.
pub fn cancel_goal(
    events: &[MatchEvent],
    score: Score,
    side: TeamSide,
    reason: &CancelReason,
) -> Result<CancelRecord> {
    if score.get(side) == 0 {
        return Err(SquadError::NothingToCancel(side));
    }
    let index = events
        .iter()
        .position(|e| e.team == side && e.is_live_goal())
        .ok_or(SquadError::NothingToCancel(side))?;

    let mut events = events.to_vec();
    events[index].is_canceled = true;
    events[index].cancel_reason = Some(reason.label());

    let mut score = score;
    *score.get_mut(side) -= 1;

    Ok(CancelRecord { events, score })
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, RoleCategory, SubRole, Team};

    fn team_with_starters(id: &str, names: &[(&str, &str)]) -> Team {
        let mut team = Team::new(id, id, id, "4-3-3");
        for (pid, name) in names {
            let mut p = Player::new(name, 9, RoleCategory::Attack, SubRole::ST);
            p.id = pid.to_string();
            p.status = PlayerStatus::Starter;
            team.players.push(p);
        }
        team
    }

    fn fixture() -> Vec<Team> {
        vec![
            team_with_starters("home", &[("h1", "Home One"), ("h2", "Home Two")]),
            team_with_starters("away", &[("a1", "Away One")]),
        ]
    }

    fn goal(side: TeamSide, scorer_id: &str) -> GoalDetails {
        GoalDetails {
            side,
            scorer_id: scorer_id.to_string(),
            is_own_goal: false,
            angle: None,
            numeric_angle: None,
        }
    }

    #[test]
    fn goal_moves_score_and_names_the_scorer() {
        let teams = fixture();
        let record =
            record_goal(&teams, Score::default(), &goal(TeamSide::Home, "h1"), "12").unwrap();
        assert_eq!(record.score.home, 1);
        assert_eq!(record.score.away, 0);
        assert_eq!(record.event.player, "Home One");
        assert!(!record.event.is_own_goal);
        assert!(record.event.angle.is_none());
    }

    #[test]
    fn own_goal_credits_one_side_and_names_the_other() {
        let teams = fixture();
        let details = GoalDetails {
            side: TeamSide::Home,
            scorer_id: "a1".to_string(),
            is_own_goal: true,
            angle: Some(GoalAngle::Lower),
            numeric_angle: None,
        };
        let record = record_goal(&teams, Score::default(), &details, "55").unwrap();
        assert_eq!(record.score.home, 1);
        assert_eq!(record.event.player, "Away One");
        assert_eq!(record.event.team, TeamSide::Home);
        assert!(record.event.is_own_goal);
    }

    #[test]
    fn scorer_must_start_for_the_eligible_team() {
        let mut teams = fixture();

        // Own-goal scorers come from the conceding side, so a home id is
        // not found there.
        let details = GoalDetails {
            side: TeamSide::Home,
            scorer_id: "h1".to_string(),
            is_own_goal: true,
            angle: None,
            numeric_angle: None,
        };
        let err = record_goal(&teams, Score::default(), &details, "10").unwrap_err();
        assert!(err.is_not_found());

        teams[0].players[0].status = PlayerStatus::Substitute;
        let err =
            record_goal(&teams, Score::default(), &goal(TeamSide::Home, "h1"), "10").unwrap_err();
        assert_eq!(err, SquadError::IneligibleScorer("Home One".to_string()));

        teams[0].players[1].deleted = true;
        let err =
            record_goal(&teams, Score::default(), &goal(TeamSide::Home, "h2"), "10").unwrap_err();
        assert_eq!(err, SquadError::IneligibleScorer("Home Two".to_string()));
    }

    #[test]
    fn precise_angle_is_recorded_only_when_given() {
        let teams = fixture();
        let mut details = goal(TeamSide::Home, "h1");
        details.angle = Some(GoalAngle::Upper);
        details.numeric_angle = Some(81);
        let record = record_goal(&teams, Score::default(), &details, "12").unwrap();
        assert_eq!(record.event.angle, Some(GoalAngle::Upper));
        assert_eq!(record.event.numeric_angle, Some(81));
    }

    #[test]
    fn cancel_strikes_the_most_recent_standing_goal() {
        let teams = fixture();
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut score = Score::default();

        for minute in ["10", "20"] {
            let record = record_goal(&teams, score, &goal(TeamSide::Home, "h1"), minute).unwrap();
            events.insert(0, record.event);
            score = record.score;
        }
        assert_eq!(score.home, 2);

        let record = cancel_goal(&events, score, TeamSide::Home, &CancelReason::VarDecision).unwrap();
        assert_eq!(record.score.home, 1);

        // The newest goal (index 0) takes the strike; the earlier one stands.
        assert!(record.events[0].is_canceled);
        assert_eq!(record.events[0].cancel_reason.as_deref(), Some("VAR decision"));
        assert_eq!(record.events[0].minute, "20");
        assert!(!record.events[1].is_canceled);
        assert_eq!(record.events.len(), 2);
        assert_eq!(live_goal_count(&record.events, TeamSide::Home), record.score.home);

        // A second cancellation reaches back to the earlier goal.
        let record = cancel_goal(
            &record.events,
            record.score,
            TeamSide::Home,
            &CancelReason::Other("crowd encroachment".to_string()),
        )
        .unwrap();
        assert_eq!(record.score.home, 0);
        assert!(record.events[1].is_canceled);
        assert_eq!(record.events[1].cancel_reason.as_deref(), Some("crowd encroachment"));
    }

    #[test]
    fn cancel_refuses_an_empty_scoreboard() {
        let err = cancel_goal(&[], Score::default(), TeamSide::Away, &CancelReason::Offside)
            .unwrap_err();
        assert_eq!(err, SquadError::NothingToCancel(TeamSide::Away));
    }

    #[test]
    fn cancel_ignores_the_other_sides_goals() {
        let teams = fixture();
        let record =
            record_goal(&teams, Score::default(), &goal(TeamSide::Home, "h1"), "12").unwrap();
        let events = vec![record.event];
        let score = Score { home: 1, away: 1 };

        let err = cancel_goal(&events, score, TeamSide::Away, &CancelReason::Handball).unwrap_err();
        assert_eq!(err, SquadError::NothingToCancel(TeamSide::Away));
    }

    // ========== Property-Based Tests ==========

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Record(TeamSide),
            Cancel(TeamSide),
        }

        fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
            prop::collection::vec(
                (any::<bool>(), any::<bool>()).prop_map(|(cancel, home)| {
                    let side = if home { TeamSide::Home } else { TeamSide::Away };
                    if cancel {
                        Op::Cancel(side)
                    } else {
                        Op::Record(side)
                    }
                }),
                0..24,
            )
        }

        proptest! {
            /// Property: the tally always equals the standing goals per side
            #[test]
            fn prop_score_matches_standing_goals(ops in arb_ops()) {
                let teams = fixture();
                let mut events: Vec<MatchEvent> = Vec::new();
                let mut score = Score::default();
                let mut minute = 0u32;

                for op in ops {
                    minute += 1;
                    match op {
                        Op::Record(side) => {
                            let scorer = if side == TeamSide::Home { "h1" } else { "a1" };
                            let record =
                                record_goal(&teams, score, &goal(side, scorer), &minute.to_string())
                                    .unwrap();
                            events.insert(0, record.event);
                            score = record.score;
                        }
                        Op::Cancel(side) => {
                            match cancel_goal(&events, score, side, &CancelReason::Offside) {
                                Ok(record) => {
                                    prop_assert_eq!(record.events.len(), events.len());
                                    events = record.events;
                                    score = record.score;
                                }
                                Err(err) => {
                                    prop_assert_eq!(err, SquadError::NothingToCancel(side));
                                }
                            }
                        }
                    }
                    prop_assert_eq!(live_goal_count(&events, TeamSide::Home), score.home);
                    prop_assert_eq!(live_goal_count(&events, TeamSide::Away), score.away);
                }
            }
        }
    }
}
