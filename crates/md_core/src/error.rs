use crate::models::TeamSide;
use std::fmt;

/// Errors raised by the roster and scoring engines.
///
/// Not-found variants describe dangling ids at mutation time; callers that
/// favor availability (the action controller) absorb them as no-ops, which
/// `is_not_found()` exists to classify. Every other variant is a validation
/// rejection and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    TeamNotFound(String),
    PlayerNotFound(String),
    RedCardLockout { player: String },
    StartersFull { limit: usize },
    NotAStarter(String),
    NotOnBench(String),
    IneligibleScorer(String),
    NothingToCancel(TeamSide),
}

impl SquadError {
    /// True for dangling-id conditions, which the action layer treats as
    /// silent no-ops instead of surfacing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SquadError::TeamNotFound(_) | SquadError::PlayerNotFound(_))
    }
}

impl fmt::Display for SquadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SquadError::TeamNotFound(id) => write!(f, "Team not found: {}", id),
            SquadError::PlayerNotFound(id) => write!(f, "Player not found: {}", id),
            SquadError::RedCardLockout { player } => {
                write!(f, "Red card lockout: {} cannot enter or leave play", player)
            }
            SquadError::StartersFull { limit } => {
                write!(f, "Starter limit reached: {} players already starting", limit)
            }
            SquadError::NotAStarter(name) => write!(f, "Not a starter: {}", name),
            SquadError::NotOnBench(name) => write!(f, "Not on the bench: {}", name),
            SquadError::IneligibleScorer(name) => write!(f, "Ineligible scorer: {}", name),
            SquadError::NothingToCancel(side) => {
                write!(f, "No goal to cancel for the {} side", side)
            }
        }
    }
}

impl std::error::Error for SquadError {}

pub type Result<T> = std::result::Result<T, SquadError>;
