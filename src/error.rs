use std::fmt;

use crate::rules::RulesError;
use crate::team::{Pot, UNSEEDED_POT};


// All variants but `UnplaceableTeam` mean the draw is structurally infeasible for the given roster
// and rules: retrying with the same input fails the same way, the caller has to change the
// configuration. These are detected before any randomness is consumed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DrawError {
    InvalidRules(RulesError),
    RosterSizeMismatch { expected: usize, actual: usize },
    PotTooLarge { pot: Pot, size: usize, group_count: usize },
    // In each of `attempts` draws some team found every group either full or already holding a
    // team from its pot. The roster may still admit a draw: retrying can succeed.
    UnplaceableTeam { team_id: String, pot: Pot, attempts: usize },
}

impl DrawError {
    pub fn is_retriable(&self) -> bool { matches!(self, DrawError::UnplaceableTeam { .. }) }
}

impl From<RulesError> for DrawError {
    fn from(err: RulesError) -> Self { DrawError::InvalidRules(err) }
}

struct PotName(Pot);

impl fmt::Display for PotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            UNSEEDED_POT => write!(f, "unseeded pot"),
            pot => write!(f, "pot {pot}"),
        }
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::InvalidRules(err) => write!(f, "Invalid draw rules: {err}"),
            DrawError::RosterSizeMismatch { expected, actual } => write!(
                f,
                "The draw requires exactly {expected} teams, but {actual} were supplied"
            ),
            DrawError::PotTooLarge { pot, size, group_count } => write!(
                f,
                "{} has {size} teams, but there are only {group_count} groups",
                PotName(*pot)
            ),
            DrawError::UnplaceableTeam { team_id, pot, attempts } => write!(
                f,
                "Cannot place team '{team_id}' from {}: every group is full or already has a \
                 team from this pot (gave up after {attempts} attempts, retrying may help)",
                PotName(*pot)
            ),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::InvalidRules(err) => Some(err),
            _ => None,
        }
    }
}
