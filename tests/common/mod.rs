// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::path::Path;

use group_draw::{DrawSetup, Team};


#[allow(dead_code)]
pub fn load_roster(file_name: &str) -> DrawSetup {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("rosters").join(file_name);
    let contents = std::fs::read_to_string(&path).unwrap();
    serde_yaml::from_str(&contents).unwrap()
}

#[allow(dead_code)]
pub fn unseeded_roster(num_teams: usize, confederation: Option<&str>) -> Vec<Team> {
    (0..num_teams).map(|i| Team::new(format!("t{i}"), None, confederation)).collect()
}

// `pot_size` teams per pot, pots numbered from 1. The first `double_cap_per_pot` teams of each
// pot are UEFA, every other team gets a confederation of its own.
#[allow(dead_code)]
pub fn pots_roster(num_pots: u32, pot_size: usize, double_cap_per_pot: usize) -> Vec<Team> {
    let mut teams = Vec::new();
    for pot in 1..=num_pots {
        for k in 0..pot_size {
            let confederation =
                if k < double_cap_per_pot { "UEFA".to_owned() } else { format!("C{pot}_{k}") };
            teams.push(Team::new(format!("p{pot}_{k}"), Some(pot), Some(confederation.as_str())));
        }
    }
    teams
}
