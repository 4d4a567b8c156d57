//! Roster mutation engine.
//!
//! Every operation takes the current team by reference and hands back new
//! values plus any commentary events it generated. Nothing here touches
//! storage or global state; the action controller owns commit and undo.

use crate::error::{Result, SquadError};
use crate::models::{CardKind, MatchEvent, Player, PlayerStatus, Team, TeamSide};
use crate::sync::CandidatePlayer;

/// Ceiling on simultaneous non-deleted starters.
pub const STARTER_LIMIT: usize = 11;

/// Outcome of an in-match substitution.
#[derive(Debug, Clone)]
pub struct SwapResult {
    pub team: Team,
    pub event: MatchEvent,
}

/// Outcome of a card toggle. The event exists only when a flag was raised.
#[derive(Debug, Clone)]
pub struct CardResult {
    pub team: Team,
    pub event: Option<MatchEvent>,
}

/// Outcome of a roster merge.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub team: Team,
    pub added: usize,
    pub skipped: usize,
}

fn require_player<'a>(team: &'a Team, id: &str) -> Result<&'a Player> {
    team.player(id).ok_or_else(|| SquadError::PlayerNotFound(id.to_string()))
}

/// Swap a starter with a bench player. The incoming player inherits the
/// outgoing starter's position code, and a substitution event is logged.
/// Red-carded players are frozen: they neither leave the pitch this way nor
/// come onto it.
pub fn swap_starter_bench(
    team: &Team,
    side: TeamSide,
    starter_id: &str,
    bench_id: &str,
    minute: &str,
) -> Result<SwapResult> {
    let starter = require_player(team, starter_id)?;
    let bench = require_player(team, bench_id)?;

    if starter.red_card {
        return Err(SquadError::RedCardLockout { player: starter.name.clone() });
    }
    if bench.red_card {
        return Err(SquadError::RedCardLockout { player: bench.name.clone() });
    }
    if starter.status != PlayerStatus::Starter {
        return Err(SquadError::NotAStarter(starter.name.clone()));
    }
    if bench.status != PlayerStatus::Substitute {
        return Err(SquadError::NotOnBench(bench.name.clone()));
    }

    let inherited_role = starter.sub_role;
    let event = MatchEvent::substitution(minute, side, &bench.name, &starter.name);

    let mut next = team.clone();
    for player in next.players.iter_mut() {
        if player.id == starter_id {
            player.status = PlayerStatus::Substitute;
        } else if player.id == bench_id {
            player.status = PlayerStatus::Starter;
            player.sub_role = inherited_role;
        }
    }

    Ok(SwapResult { team: next, event })
}

/// Exchange the position codes of two on-pitch players (the drag swap on
/// the formation view). No event; the log only records entries a
/// commentator reads out.
pub fn swap_slots(team: &Team, first_id: &str, second_id: &str) -> Result<Team> {
    let first = require_player(team, first_id)?;
    let second = require_player(team, second_id)?;

    if first.red_card {
        return Err(SquadError::RedCardLockout { player: first.name.clone() });
    }
    if second.red_card {
        return Err(SquadError::RedCardLockout { player: second.name.clone() });
    }
    if first.status != PlayerStatus::Starter {
        return Err(SquadError::NotAStarter(first.name.clone()));
    }
    if second.status != PlayerStatus::Starter {
        return Err(SquadError::NotAStarter(second.name.clone()));
    }

    let first_role = first.sub_role;
    let second_role = second.sub_role;

    let mut next = team.clone();
    for player in next.players.iter_mut() {
        if player.id == first_id {
            player.sub_role = second_role;
        } else if player.id == second_id {
            player.sub_role = first_role;
        }
    }

    Ok(next)
}

fn clear_other_captains(team: &mut Team, keep_id: &str) {
    for player in team.players.iter_mut() {
        if player.id != keep_id {
            player.is_captain = false;
        }
    }
}

/// Save a new or edited player. Moving someone into the starting lineup
/// while eleven already start is refused outright; callers recover by
/// saving as a substitute or by [`upsert_player_swapping`].
pub fn upsert_player(team: &Team, player: Player) -> Result<Team> {
    let was_starter = team
        .players
        .iter()
        .find(|p| p.id == player.id)
        .map(|p| !p.deleted && p.status == PlayerStatus::Starter)
        .unwrap_or(false);
    let will_be_starter = !player.deleted && player.status == PlayerStatus::Starter;

    if will_be_starter && !was_starter && team.starter_count() >= STARTER_LIMIT {
        return Err(SquadError::StartersFull { limit: STARTER_LIMIT });
    }

    Ok(apply_upsert(team, player))
}

/// Save a player as a starter while demoting a chosen current starter, as
/// one transaction. This is the recovery path when the lineup is full; it
/// also covers brand-new players.
pub fn upsert_player_swapping(team: &Team, mut player: Player, demote_id: &str) -> Result<Team> {
    let demoted = require_player(team, demote_id)?;
    if demoted.status != PlayerStatus::Starter {
        return Err(SquadError::NotAStarter(demoted.name.clone()));
    }

    player.status = PlayerStatus::Starter;

    let mut next = team.clone();
    if let Some(p) = next.player_mut(demote_id) {
        p.status = PlayerStatus::Substitute;
    }
    Ok(apply_upsert(&next, player))
}

fn apply_upsert(team: &Team, player: Player) -> Team {
    let mut next = team.clone();
    let make_captain = player.is_captain;
    let player_id = player.id.clone();

    if let Some(existing) = next.players.iter_mut().find(|p| p.id == player.id) {
        *existing = player;
    } else {
        next.players.push(player);
    }
    if make_captain {
        clear_other_captains(&mut next, &player_id);
    }
    next
}

/// Flip the armband. At most one non-deleted player wears it, so turning
/// it on strips it from everyone else.
pub fn toggle_captain(team: &Team, player_id: &str) -> Result<Team> {
    require_player(team, player_id)?;

    let mut next = team.clone();
    let mut now_captain = false;
    if let Some(player) = next.player_mut(player_id) {
        player.is_captain = !player.is_captain;
        now_captain = player.is_captain;
    }
    if now_captain {
        clear_other_captains(&mut next, player_id);
    }
    Ok(next)
}

/// Flip a card flag. Raising a card logs an event; waving one off (an
/// operator correction) only clears the flag.
pub fn toggle_card(
    team: &Team,
    side: TeamSide,
    player_id: &str,
    kind: CardKind,
    minute: &str,
) -> Result<CardResult> {
    let player = require_player(team, player_id)?;
    let raised = match kind {
        CardKind::Yellow => !player.yellow_card,
        CardKind::Red => !player.red_card,
    };
    let event = raised.then(|| MatchEvent::card(minute, side, &player.name, kind));

    let mut next = team.clone();
    if let Some(p) = next.player_mut(player_id) {
        match kind {
            CardKind::Yellow => p.yellow_card = raised,
            CardKind::Red => p.red_card = raised,
        }
    }

    Ok(CardResult { team: next, event })
}

/// Fold externally fetched candidates into the squad. A candidate whose
/// name or shirt number collides with a live squad member is dropped;
/// survivors join the bench. Matches against soft-deleted players do not
/// suppress, and the batch is not deduplicated against itself.
pub fn merge_candidates(team: &Team, candidates: &[CandidatePlayer]) -> MergeResult {
    let mut next = team.clone();
    let mut added = 0;
    let mut skipped = 0;

    for candidate in candidates {
        let mut incoming = candidate.to_player();
        let collides = next.players.iter().any(|p| {
            !p.deleted
                && (p.name.trim() == incoming.name.trim() || p.number == incoming.number)
        });
        if collides {
            skipped += 1;
            continue;
        }
        incoming.status = PlayerStatus::Substitute;
        next.players.push(incoming);
        added += 1;
    }

    MergeResult { team: next, added, skipped }
}

/// Retire a player from all active views. The record stays put so events
/// that name them keep their meaning.
pub fn soft_delete_player(team: &Team, player_id: &str) -> Result<Team> {
    require_player(team, player_id)?;
    let mut next = team.clone();
    if let Some(player) = next.player_mut(player_id) {
        player.deleted = true;
    }
    Ok(next)
}

/// Retire a whole team. Its events stay in the log.
pub fn soft_delete_team(teams: &[Team], team_id: &str) -> Result<Vec<Team>> {
    if !teams.iter().any(|t| t.id == team_id && !t.deleted) {
        return Err(SquadError::TeamNotFound(team_id.to_string()));
    }
    Ok(teams
        .iter()
        .map(|t| {
            if t.id == team_id {
                let mut next = t.clone();
                next.deleted = true;
                next
            } else {
                t.clone()
            }
        })
        .collect())
}

/// Create or replace a team's metadata record.
pub fn save_team(teams: &[Team], team: Team) -> Vec<Team> {
    let mut next: Vec<Team> = teams.to_vec();
    if let Some(existing) = next.iter_mut().find(|t| t.id == team.id) {
        *existing = team;
    } else {
        next.push(team);
    }
    next
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubRole;

    fn starter(id: &str, name: &str, number: u32, sub_role: SubRole) -> Player {
        let mut p = Player::new(name, number, sub_role.category(), sub_role);
        p.id = id.to_string();
        p.status = PlayerStatus::Starter;
        p
    }

    fn substitute(id: &str, name: &str, number: u32, sub_role: SubRole) -> Player {
        let mut p = starter(id, name, number, sub_role);
        p.status = PlayerStatus::Substitute;
        p
    }

    fn eleven_starters() -> Vec<Player> {
        let roles = [
            SubRole::GK,
            SubRole::LB,
            SubRole::LCB,
            SubRole::RCB,
            SubRole::RB,
            SubRole::LDM,
            SubRole::RDM,
            SubRole::LM,
            SubRole::CAM,
            SubRole::RM,
            SubRole::ST,
        ];
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| starter(&format!("s{}", i), &format!("Starter {}", i), i as u32 + 1, *role))
            .collect()
    }

    fn test_team() -> Team {
        let mut team = Team::new("t1", "Test FC", "TST", "4-2-3-1");
        team.players = eleven_starters();
        team.players.push(substitute("b0", "Bench 0", 12, SubRole::CM));
        team.players.push(substitute("b1", "Bench 1", 13, SubRole::ST));
        team
    }

    #[test]
    fn swap_exchanges_status_and_inherits_role() {
        let team = test_team();
        let result = swap_starter_bench(&team, TeamSide::Home, "s10", "b1", "64").unwrap();

        let out = result.team.players.iter().find(|p| p.id == "s10").unwrap();
        let incoming = result.team.players.iter().find(|p| p.id == "b1").unwrap();
        assert_eq!(out.status, PlayerStatus::Substitute);
        assert_eq!(incoming.status, PlayerStatus::Starter);
        assert_eq!(incoming.sub_role, SubRole::ST);
        assert_eq!(result.team.starter_count(), 11);

        assert_eq!(result.event.player, "Bench 1");
        assert_eq!(result.event.player_out.as_deref(), Some("Starter 10"));
        assert_eq!(result.event.minute, "64");
    }

    #[test]
    fn swap_rejects_red_carded_players_on_either_side() {
        let mut team = test_team();
        team.player_mut("s10").unwrap().red_card = true;
        let err = swap_starter_bench(&team, TeamSide::Home, "s10", "b1", "64").unwrap_err();
        assert!(matches!(err, SquadError::RedCardLockout { .. }));

        let mut team = test_team();
        team.player_mut("b1").unwrap().red_card = true;
        let err = swap_starter_bench(&team, TeamSide::Home, "s10", "b1", "64").unwrap_err();
        assert!(matches!(err, SquadError::RedCardLockout { .. }));
    }

    #[test]
    fn swap_with_dangling_id_reports_not_found() {
        let team = test_team();
        let err = swap_starter_bench(&team, TeamSide::Home, "s10", "ghost", "64").unwrap_err();
        assert!(err.is_not_found());
        let err = swap_starter_bench(&team, TeamSide::Home, "ghost", "b1", "64").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn swap_validates_current_statuses() {
        let team = test_team();
        let err = swap_starter_bench(&team, TeamSide::Home, "b0", "b1", "64").unwrap_err();
        assert!(matches!(err, SquadError::NotAStarter(_)));
        let err = swap_starter_bench(&team, TeamSide::Home, "s10", "s9", "64").unwrap_err();
        assert!(matches!(err, SquadError::NotOnBench(_)));
    }

    #[test]
    fn slot_swap_exchanges_codes_only() {
        let team = test_team();
        let next = swap_slots(&team, "s1", "s4").unwrap();
        assert_eq!(next.player("s1").unwrap().sub_role, SubRole::RB);
        assert_eq!(next.player("s4").unwrap().sub_role, SubRole::LB);
        assert_eq!(next.player("s1").unwrap().status, PlayerStatus::Starter);
    }

    #[test]
    fn slot_swap_refuses_red_cards_and_bench_players() {
        let mut team = test_team();
        team.player_mut("s4").unwrap().red_card = true;
        assert!(matches!(
            swap_slots(&team, "s1", "s4"),
            Err(SquadError::RedCardLockout { .. })
        ));

        let team = test_team();
        assert!(matches!(swap_slots(&team, "s1", "b0"), Err(SquadError::NotAStarter(_))));
    }

    #[test]
    fn twelfth_starter_is_refused() {
        let team = test_team();
        let mut promoted = team.player("b0").unwrap().clone();
        promoted.status = PlayerStatus::Starter;

        let err = upsert_player(&team, promoted).unwrap_err();
        assert_eq!(err, SquadError::StartersFull { limit: 11 });
    }

    #[test]
    fn refused_promotion_recovers_as_substitute_save() {
        let team = test_team();
        let mut edited = team.player("b0").unwrap().clone();
        edited.name = "Renamed".to_string();
        edited.status = PlayerStatus::Substitute;

        let next = upsert_player(&team, edited).unwrap();
        assert_eq!(next.player("b0").unwrap().name, "Renamed");
        assert_eq!(next.starter_count(), 11);
    }

    #[test]
    fn swap_promotion_demotes_and_promotes_atomically() {
        let team = test_team();
        let mut promoted = team.player("b0").unwrap().clone();
        promoted.status = PlayerStatus::Starter;

        let next = upsert_player_swapping(&team, promoted, "s10").unwrap();
        assert_eq!(next.player("b0").unwrap().status, PlayerStatus::Starter);
        assert_eq!(next.player("s10").unwrap().status, PlayerStatus::Substitute);
        assert_eq!(next.starter_count(), 11);
    }

    #[test]
    fn swap_promotion_accepts_brand_new_players() {
        let team = test_team();
        let rookie = starter("n1", "Rookie", 29, SubRole::CM);

        let next = upsert_player_swapping(&team, rookie, "s9").unwrap();
        assert_eq!(next.player("n1").unwrap().status, PlayerStatus::Starter);
        assert_eq!(next.player("s9").unwrap().status, PlayerStatus::Substitute);
        assert_eq!(next.starter_count(), 11);
    }

    #[test]
    fn swap_promotion_validates_the_demoted_side() {
        let team = test_team();
        let rookie = starter("n1", "Rookie", 29, SubRole::CM);
        assert!(matches!(
            upsert_player_swapping(&team, rookie.clone(), "b1"),
            Err(SquadError::NotAStarter(_))
        ));
        assert!(upsert_player_swapping(&team, rookie, "ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn at_most_one_captain_survives_any_upsert() {
        let team = test_team();
        let mut first = team.player("s1").unwrap().clone();
        first.is_captain = true;
        let next = upsert_player(&team, first).unwrap();

        let mut second = next.player("s2").unwrap().clone();
        second.is_captain = true;
        let next = upsert_player(&next, second).unwrap();

        let captains: Vec<_> = next.players.iter().filter(|p| p.is_captain).collect();
        assert_eq!(captains.len(), 1);
        assert_eq!(captains[0].id, "s2");
    }

    #[test]
    fn captain_toggle_clears_the_previous_armband() {
        let team = test_team();
        let next = toggle_captain(&team, "s1").unwrap();
        assert!(next.player("s1").unwrap().is_captain);

        let next = toggle_captain(&next, "s2").unwrap();
        assert!(!next.player("s1").unwrap().is_captain);
        assert!(next.player("s2").unwrap().is_captain);

        let next = toggle_captain(&next, "s2").unwrap();
        assert!(next.captain().is_none());
    }

    #[test]
    fn raising_a_card_logs_an_event_once() {
        let team = test_team();
        let result = toggle_card(&team, TeamSide::Away, "s3", CardKind::Yellow, "31").unwrap();
        assert!(result.team.player("s3").unwrap().yellow_card);
        let event = result.event.unwrap();
        assert_eq!(event.player, "Starter 3");
        assert_eq!(event.team, TeamSide::Away);

        // Waving the card off is a correction, not a new headline.
        let result =
            toggle_card(&result.team, TeamSide::Away, "s3", CardKind::Yellow, "32").unwrap();
        assert!(!result.team.player("s3").unwrap().yellow_card);
        assert!(result.event.is_none());
    }

    #[test]
    fn merge_drops_name_and_number_collisions() {
        let team = test_team();
        let candidates = vec![
            CandidatePlayer::named("Starter 3", Some(90)), // name collision
            CandidatePlayer::named("Fresh Face", Some(5)), // number collision with s4
            CandidatePlayer::named("Genuinely New", Some(77)),
        ];
        let result = merge_candidates(&team, &candidates);
        assert_eq!(result.added, 1);
        assert_eq!(result.skipped, 2);

        let joined = result.team.players.iter().find(|p| p.name == "Genuinely New").unwrap();
        assert_eq!(joined.status, PlayerStatus::Substitute);
        assert_eq!(result.team.starter_count(), 11);
    }

    #[test]
    fn merge_ignores_matches_against_deleted_players() {
        let mut team = test_team();
        team.player_mut("s3").unwrap().deleted = true;
        let candidates = vec![CandidatePlayer::named("Starter 3", Some(90))];
        let result = merge_candidates(&team, &candidates);
        assert_eq!(result.added, 1);
    }

    #[test]
    fn merge_does_not_dedupe_within_the_batch() {
        let team = test_team();
        let candidates = vec![
            CandidatePlayer::named("Twin", Some(44)),
            CandidatePlayer::named("Twin", Some(44)),
        ];
        let result = merge_candidates(&team, &candidates);
        assert_eq!(result.added, 2);
    }

    #[test]
    fn deleted_players_drop_out_of_active_counts() {
        let team = test_team();
        let next = soft_delete_player(&team, "s10").unwrap();
        assert_eq!(next.starter_count(), 10);
        assert!(next.player("s10").is_none());
        assert!(next.players.iter().any(|p| p.id == "s10"));
    }

    #[test]
    fn team_deletion_is_soft_and_scoped() {
        let teams = vec![test_team(), {
            let mut other = Team::new("t2", "Other FC", "OTH", "4-4-2");
            other.players = eleven_starters();
            other
        }];
        let next = soft_delete_team(&teams, "t2").unwrap();
        assert!(next.iter().find(|t| t.id == "t2").unwrap().deleted);
        assert!(!next.iter().find(|t| t.id == "t1").unwrap().deleted);

        assert!(soft_delete_team(&next, "t2").unwrap_err().is_not_found());
    }

    #[test]
    fn save_team_upserts_by_id() {
        let teams = vec![test_team()];
        let mut edited = teams[0].clone();
        edited.name = "Edited FC".to_string();
        let next = save_team(&teams, edited);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].name, "Edited FC");

        let brand_new = Team::new("t9", "New FC", "NEW", "3-5-2");
        let next = save_team(&next, brand_new);
        assert_eq!(next.len(), 2);
    }
}
