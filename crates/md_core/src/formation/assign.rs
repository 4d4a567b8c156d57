use super::{lookup, PitchPos};
use crate::models::{Player, RoleCategory, SubRole, Team};
use serde::{Deserialize, Serialize};

/// A starter rendered onto a template slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlayer {
    pub player_id: String,
    pub sub_role: SubRole,
    pub pos: PitchPos,
}

/// Fallback slot order per line, tried left to right when a player's own
/// code is not an open slot.
fn category_priority(category: RoleCategory) -> &'static [SubRole] {
    match category {
        RoleCategory::Goalkeeper => &[SubRole::GK],
        RoleCategory::Defense => &[
            SubRole::CB,
            SubRole::LCB,
            SubRole::RCB,
            SubRole::LB,
            SubRole::RB,
            SubRole::LWB,
            SubRole::RWB,
        ],
        RoleCategory::Midfield => &[
            SubRole::CM,
            SubRole::LCM,
            SubRole::RCM,
            SubRole::CDM,
            SubRole::LDM,
            SubRole::RDM,
            SubRole::CAM,
            SubRole::LM,
            SubRole::RM,
        ],
        RoleCategory::Attack => &[SubRole::ST, SubRole::CF, SubRole::LW, SubRole::RW],
    }
}

/// Map a team's non-deleted starters onto the formation's slots.
///
/// Three passes over the starters sorted by id (the determinism anchor):
/// exact code match first, then the player's category priority list, then
/// any open slot in template order. Starters beyond the slot count stay off
/// the pitch; short squads leave slots empty. Pure view: nothing is written
/// back to the players.
pub fn assign(code: &str, team: &Team) -> Vec<PlacedPlayer> {
    let template = lookup(code);
    let slots = &template.slots;

    let mut candidates: Vec<&Player> = team.starters().collect();
    candidates.sort_by(|a, b| a.id.cmp(&b.id));

    let mut slot_taken: Vec<Option<usize>> = vec![None; slots.len()];
    let mut candidate_slot: Vec<Option<usize>> = vec![None; candidates.len()];

    // Pass 1: a player's own code claims its slot.
    for (ci, player) in candidates.iter().enumerate() {
        let open = slots
            .iter()
            .enumerate()
            .find(|(si, slot)| slot.role == player.sub_role && slot_taken[*si].is_none());
        if let Some((si, _)) = open {
            slot_taken[si] = Some(ci);
            candidate_slot[ci] = Some(si);
        }
    }

    // Pass 2: nearest open slot within the player's own line.
    for (ci, player) in candidates.iter().enumerate() {
        if candidate_slot[ci].is_some() {
            continue;
        }
        for role in category_priority(player.category) {
            let open = slots
                .iter()
                .enumerate()
                .find(|(si, slot)| slot.role == *role && slot_taken[*si].is_none());
            if let Some((si, _)) = open {
                slot_taken[si] = Some(ci);
                candidate_slot[ci] = Some(si);
                break;
            }
        }
    }

    // Pass 3: whatever is still open, in template order.
    for ci in 0..candidates.len() {
        if candidate_slot[ci].is_some() {
            continue;
        }
        let open = slots.iter().enumerate().find(|(si, _)| slot_taken[*si].is_none());
        if let Some((si, _)) = open {
            slot_taken[si] = Some(ci);
            candidate_slot[ci] = Some(si);
        }
    }

    slots
        .iter()
        .enumerate()
        .filter_map(|(si, slot)| {
            slot_taken[si].map(|ci| PlacedPlayer {
                player_id: candidates[ci].id.clone(),
                sub_role: slot.role,
                pos: slot.pos,
            })
        })
        .collect()
}
