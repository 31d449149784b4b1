use std::collections::BTreeMap;

use crate::team::{Pot, Team};


// Teams grouped by pot, pots in ascending order. Teams without a pot land in `UNSEEDED_POT`,
// which sorts last. Within a pot the roster order is kept.
pub type PotMap<'a> = BTreeMap<Pot, Vec<&'a Team>>;

pub fn partition_by_pot(teams: &[Team]) -> PotMap<'_> {
    let mut pots = PotMap::new();
    for team in teams {
        pots.entry(team.draw_pot()).or_default().push(team);
    }
    pots
}
