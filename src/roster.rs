use serde::{Deserialize, Serialize};

use crate::allocator::{Draw, allocate};
use crate::error::DrawError;
use crate::pot::partition_by_pot;
use crate::random::RandomSource;
use crate::rules::DrawRules;
use crate::team::Team;


// Checks that `teams` can be drawn under `rules` at all. Front-ends should call this before
// starting a draw; `allocate` calls it as well.
//
// Note. Team id uniqueness is not verified: that is the catalog's job.
pub fn verify_roster(teams: &[Team], rules: &DrawRules) -> Result<(), DrawError> {
    rules.verify()?;

    let expected = rules.total_teams();
    if teams.len() != expected {
        return Err(DrawError::RosterSizeMismatch { expected, actual: teams.len() });
    }

    // Unseeded teams are exempt: they never exclude each other.
    for (pot, pot_teams) in partition_by_pot(teams) {
        let seeded = pot_teams.iter().all(|t| t.is_seeded());
        if seeded && pot_teams.len() > rules.group_count {
            return Err(DrawError::PotTooLarge {
                pot,
                size: pot_teams.len(),
                group_count: rules.group_count,
            });
        }
    }
    Ok(())
}


// A named roster together with the rules it is drawn under. This is what roster files contain.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DrawSetup {
    pub name: String,
    pub rules: DrawRules,
    pub teams: Vec<Team>,
}

impl DrawSetup {
    pub fn verify(&self) -> Result<(), DrawError> { verify_roster(&self.teams, &self.rules) }

    pub fn draw(&self, random: &mut (impl RandomSource + ?Sized)) -> Result<Draw, DrawError> {
        allocate(&self.teams, &self.rules, random)
    }
}
