// Test utilities that cannot be moved to the "tests" folder, because stress_test uses them.

use std::collections::HashMap;

use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::allocator::Draw;
use crate::group::GroupLabel;
use crate::random::{RandomSource, shuffle};
use crate::rules::{ConfederationCaps, DrawRules};
use crate::team::{Confederation, Team};


pub const CONFEDERATIONS: [&str; 6] = ["AFC", "CAF", "CONCACAF", "CONMEBOL", "OFC", "UEFA"];

// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> rand::rngs::StdRng { rand::rngs::StdRng::from_seed([0; 32]) }

// Random source that never reorders anything: pots are drawn in roster order and groups are
// tried in label order. Makes draws fully predictable.
pub struct NoShuffle;

impl RandomSource for NoShuffle {
    fn index_below(&mut self, bound: usize) -> usize { bound.saturating_sub(1) }
}

// Roster with `teams_per_group` full pots of `group_count` teams each. Confederations are
// assigned group by group on a hidden valid draw, so the roster always admits an assignment that
// honors `caps`. The draw itself may still need to relax caps: single swaps do not find every
// solution.
pub fn planted_roster(
    rng: &mut impl Rng, group_count: usize, teams_per_group: usize, caps: &ConfederationCaps,
) -> Vec<Team> {
    let mut teams = Vec::new();
    for group in 0..group_count {
        let mut counts: HashMap<Confederation, usize> = HashMap::new();
        for slot in 0..teams_per_group {
            let allowed = CONFEDERATIONS
                .iter()
                .map(|&c| Confederation::new(c))
                .filter(|c| counts.get(c).copied().unwrap_or(0) < caps.cap(c))
                .collect_vec();
            let confederation = allowed.choose(rng).cloned();
            if let Some(c) = &confederation {
                *counts.entry(c.clone()).or_default() += 1;
            }
            teams.push(Team {
                id: format!("t{group}_{slot}"),
                name: format!("Team {group}-{slot}"),
                short_name: format!("{group}{slot}"),
                pot: Some(slot as u32 + 1),
                confederation,
            });
        }
    }
    shuffle(&mut teams, rng);
    teams
}

// Roster where no confederation has more teams than its cap, so no draw can ever need to relax
// anything. `double_cap` teams get the UEFA tag, everybody else a unique tag.
pub fn sparse_roster(
    rng: &mut impl Rng, group_count: usize, teams_per_group: usize, double_cap: usize,
) -> Vec<Team> {
    let mut teams = (0..group_count * teams_per_group)
        .map(|i| {
            let pot = (i / group_count) as u32 + 1;
            let confederation = if i < double_cap { "UEFA".to_owned() } else { format!("C{i}") };
            Team::new(format!("t{i}"), Some(pot), Some(confederation.as_str()))
        })
        .collect_vec();
    shuffle(&mut teams, rng);
    teams
}

// Rules with random shape and random diversity setting.
pub fn random_rules(rng: &mut impl Rng) -> DrawRules {
    DrawRules::new(rng.random_range(1..=16), rng.random_range(1..=6), rng.random::<bool>())
}

// Verifies everything a successful draw must satisfy. Returns a description of the first
// violation found.
pub fn check_draw(teams: &[Team], rules: &DrawRules, draw: &Draw) -> Result<(), String> {
    let assignment = &draw.assignment;
    if assignment.group_count() != rules.group_count {
        let actual = assignment.group_count();
        return Err(format!("Expected {} groups, got {}", rules.group_count, actual));
    }
    for (idx, group) in assignment.groups().iter().enumerate() {
        if GroupLabel::from_index(idx) != Some(group.label) {
            return Err(format!("Group {} is at position {}", group.label, idx));
        }
        if group.len() != rules.teams_per_group {
            return Err(format!("Group {} has {} teams", group.label, group.len()));
        }
        if let Some(pot) = group.teams.iter().filter_map(|t| t.pot).duplicates().next() {
            return Err(format!("Group {} has two teams from pot {}", group.label, pot));
        }
        for (confederation, count) in
            group.teams.iter().filter_map(|t| t.confederation.as_ref()).counts()
        {
            let cap = rules.confederation_caps.cap(confederation);
            if count <= cap {
                continue;
            }
            if !rules.enforce_diversity_rule {
                continue;
            }
            let reported = draw
                .relaxations
                .iter()
                .any(|r| r.group == group.label && &r.confederation == confederation);
            if !reported {
                return Err(format!(
                    "Group {} has {} {} teams (cap {}), not reported",
                    group.label, count, confederation, cap
                ));
            }
        }
    }
    let drawn = assignment.teams().map(|(_, t)| t.id.as_str()).sorted().collect_vec();
    let expected = teams.iter().map(|t| t.id.as_str()).sorted().collect_vec();
    if drawn != expected {
        return Err(format!("Drawn teams {drawn:?} differ from roster {expected:?}"));
    }
    if !rules.enforce_diversity_rule && !draw.relaxations.is_empty() {
        return Err("Relaxations reported with diversity rule off".to_owned());
    }
    Ok(())
}

// Number of teams of `confederation` in every group.
pub fn confederation_counts(draw: &Draw, confederation: &str) -> Vec<usize> {
    let confederation = Confederation::new(confederation);
    draw.assignment.groups().iter().map(|g| g.confederation_count(&confederation)).collect()
}
