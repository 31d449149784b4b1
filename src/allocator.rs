use derive_new::new;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::DrawError;
use crate::fallback::force_place;
use crate::group::{Assignment, GroupLabel};
use crate::pot::partition_by_pot;
use crate::random::{RandomSource, shuffle, shuffled_indices};
use crate::repair::try_repair;
use crate::roster::verify_roster;
use crate::rules::DrawRules;
use crate::team::{Confederation, Pot, Team};


// A team that had to be placed in breach of its confederation cap.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, new)]
pub struct ConstraintRelaxation {
    pub team_id: String,
    pub pot: Pot,
    pub confederation: Confederation,
    pub group: GroupLabel,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Draw {
    pub assignment: Assignment,
    // Empty if all confederation caps were honored. Only ever non-empty when the diversity rule
    // is enforced.
    pub relaxations: Vec<ConstraintRelaxation>,
}

impl Draw {
    pub fn is_strict(&self) -> bool { self.relaxations.is_empty() }
}

// How many times `allocate` redraws from scratch before settling for a relaxed draw or giving up.
pub const MAX_DRAW_ATTEMPTS: usize = 32;

// Draws `teams` into groups.
//
// Pots are processed in ascending order, unseeded teams last. Within a pot the teams are shuffled,
// and for every team the eligible groups (room left, no team from the same pot) are shuffled too;
// the team goes into the first of them that respects the confederation cap. If there is none, a
// single swap is attempted (see `try_repair`), and if that fails the team is put into the first
// eligible group regardless of caps (see `force_place`).
//
// A greedy pass can paint itself into a corner even if a valid draw exists. So the whole draw is
// repeated (up to `MAX_DRAW_ATTEMPTS` times) when a team could not be placed at all, or when caps
// had to be relaxed although the roster has few enough teams of every confederation to honor
// them. If no attempt is strict, the draw with the fewest relaxations is returned, and those
// placements are reported in `Draw::relaxations`.
//
// Improvement potential: Backtracking search instead of redraws. Redraws can't tell a roster
//   without a strict draw from an unlucky streak.
pub fn allocate(
    teams: &[Team], rules: &DrawRules, random: &mut (impl RandomSource + ?Sized),
) -> Result<Draw, DrawError> {
    verify_roster(teams, rules)?;

    let redraw_relaxed = rules.enforce_diversity_rule && caps_can_be_honored(teams, rules);
    let mut best: Option<Draw> = None;
    let mut attempt = 0;
    loop {
        attempt += 1;
        let last_attempt = attempt >= MAX_DRAW_ATTEMPTS;
        match draw_once(teams, rules, random) {
            Ok(draw) if draw.is_strict() || !redraw_relaxed => {
                return Ok(finish(draw, attempt));
            }
            Ok(draw) => {
                debug!("Attempt {attempt} relaxed {} caps", draw.relaxations.len());
                let draw = match best.take() {
                    Some(b) if b.relaxations.len() <= draw.relaxations.len() => b,
                    _ => draw,
                };
                if last_attempt {
                    return Ok(finish(draw, attempt));
                }
                best = Some(draw);
            }
            Err(team) => {
                debug!("Attempt {attempt} got stuck on {} (pot {})", team.id, team.pot);
                if last_attempt {
                    return match best {
                        Some(draw) => Ok(finish(draw, attempt)),
                        None => Err(DrawError::UnplaceableTeam {
                            team_id: team.id,
                            pot: team.pot,
                            attempts: attempt,
                        }),
                    };
                }
            }
        }
    }
}

// Necessary (not sufficient) condition for a draw without relaxations: no confederation has more
// teams than all groups together may hold.
fn caps_can_be_honored(teams: &[Team], rules: &DrawRules) -> bool {
    let caps = &rules.confederation_caps;
    teams
        .iter()
        .filter_map(|t| t.confederation.as_ref())
        .counts()
        .into_iter()
        .all(|(confederation, count)| count <= caps.cap(confederation) * rules.group_count)
}

fn finish(draw: Draw, attempts: usize) -> Draw {
    for r in &draw.relaxations {
        warn!(
            "Confederation cap relaxed: {} ({}) placed into group {}",
            r.team_id, r.confederation, r.group
        );
    }
    info!(
        "Drew {} teams into {} groups after {} attempt(s) ({} relaxed placements)",
        draw.assignment.num_teams(),
        draw.assignment.group_count(),
        attempts,
        draw.relaxations.len()
    );
    draw
}

struct StuckTeam {
    id: String,
    pot: Pot,
}

// One greedy pass over all pots.
fn draw_once(
    teams: &[Team], rules: &DrawRules, random: &mut (impl RandomSource + ?Sized),
) -> Result<Draw, StuckTeam> {
    let tpg = rules.teams_per_group;
    let caps = &rules.confederation_caps;
    let mut assignment = Assignment::new(rules.group_count);
    let mut relaxations = Vec::new();
    for (pot, mut pot_teams) in partition_by_pot(teams) {
        shuffle(&mut pot_teams, random);
        for team in pot_teams {
            let candidates = shuffled_indices(assignment.group_count(), random)
                .into_iter()
                .filter(|&idx| assignment.groups()[idx].can_take(team, tpg))
                .collect::<Vec<_>>();
            let chosen = if rules.enforce_diversity_rule {
                candidates
                    .into_iter()
                    .find(|&idx| assignment.groups()[idx].fits_confederation(team, caps))
            } else {
                candidates.first().copied()
            };
            if let Some(idx) = chosen {
                let group = assignment.group_mut(idx);
                group.teams.push(team.clone());
                debug!("Placed {} into group {}", team.id, group.label);
                continue;
            }

            if rules.enforce_diversity_rule {
                if try_repair(team, &mut assignment, tpg, caps).is_some() {
                    continue;
                }
            }

            let Some(label) = force_place(team, &mut assignment, tpg) else {
                return Err(StuckTeam { id: team.id.clone(), pot });
            };
            if let Some(confederation) = &team.confederation {
                let group = &assignment.groups()[label.to_index()];
                if group.confederation_count(confederation) > caps.cap(confederation) {
                    relaxations.push(ConstraintRelaxation::new(
                        team.id.clone(),
                        pot,
                        confederation.clone(),
                        label,
                    ));
                }
            }
        }
    }
    Ok(Draw { assignment, relaxations })
}

// `allocate` with the thread-local generator.
pub fn allocate_randomly(teams: &[Team], rules: &DrawRules) -> Result<Draw, DrawError> {
    allocate(teams, rules, &mut rand::rng())
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_util::{NoShuffle, check_draw, deterministic_rng};

    fn ids(draw: &Draw) -> Vec<Vec<&str>> {
        draw.assignment
            .groups()
            .iter()
            .map(|g| g.teams.iter().map(|t| t.id.as_str()).collect_vec())
            .collect()
    }

    #[test]
    fn without_shuffling_fills_groups_in_label_order() {
        let teams = vec![
            Team::new("a2", Some(2), None),
            Team::new("a1", Some(1), None),
            Team::new("b1", Some(1), None),
            Team::new("b2", Some(2), None),
        ];
        let draw = allocate(&teams, &DrawRules::new(2, 2, false), &mut NoShuffle).unwrap();
        assert_eq!(ids(&draw), vec![vec!["a1", "a2"], vec!["b1", "b2"]]);
        assert!(draw.is_strict());
    }

    #[test]
    fn swap_repair_during_draw() {
        let teams = vec![
            Team::new("p", Some(1), Some("CONMEBOL")),
            Team::new("u", Some(2), Some("CAF")),
            Team::new("v", Some(2), Some("AFC")),
            Team::new("s", Some(3), Some("CAF")),
            Team::new("n", Some(3), Some("CONMEBOL")),
            Team::new("z", None, None),
        ];
        let draw = allocate(&teams, &DrawRules::new(2, 3, true), &mut NoShuffle).unwrap();
        // "n" could only go to A, where "p" blocked it; "p" was moved to B.
        assert_eq!(ids(&draw), vec![vec!["n", "u", "z"], vec!["v", "s", "p"]]);
        assert!(draw.is_strict());
    }

    #[test]
    fn fallback_reports_relaxations() {
        let teams = (0..8).map(|i| Team::new(format!("t{i}"), None, Some("CONMEBOL"))).collect_vec();
        let draw = allocate(&teams, &DrawRules::new(2, 4, true), &mut NoShuffle).unwrap();
        assert_eq!(ids(&draw), vec![vec!["t0", "t2", "t3", "t4"], vec![
            "t1", "t5", "t6", "t7"
        ]]);
        let relaxed = draw.relaxations.iter().map(|r| r.team_id.as_str()).collect_vec();
        assert_eq!(relaxed, ["t2", "t3", "t4", "t5", "t6", "t7"]);
        assert_eq!(draw.relaxations[0].group, GroupLabel::A);
        assert_eq!(draw.relaxations[0].confederation, Confederation::new("CONMEBOL"));
    }

    #[test]
    fn diversity_rule_off_ignores_confederations() {
        let teams = (0..8).map(|i| Team::new(format!("t{i}"), None, Some("CONMEBOL"))).collect_vec();
        let draw = allocate(&teams, &DrawRules::new(2, 4, false), &mut NoShuffle).unwrap();
        assert_eq!(ids(&draw), vec![vec!["t0", "t1", "t2", "t3"], vec![
            "t4", "t5", "t6", "t7"
        ]]);
        assert!(draw.is_strict());
    }

    fn uneven_pots() -> Vec<Team> {
        vec![
            Team::new("a", Some(1), None),
            Team::new("b", Some(2), None),
            Team::new("c", Some(3), None),
            Team::new("d", Some(3), None),
            Team::new("e", Some(4), None),
            Team::new("f", Some(4), None),
        ]
    }

    // Greedy placement may fill A with a, b, c and leave no room for the second pot-4 team.
    // Such attempts are redrawn.
    #[test]
    fn uneven_pots_are_redrawn() {
        let teams = uneven_pots();
        let rules = DrawRules::new(2, 3, false);
        let mut rng = deterministic_rng();
        for _ in 0..500 {
            let draw = allocate(&teams, &rules, &mut rng).unwrap();
            check_draw(&teams, &rules, &draw).unwrap();
        }
    }

    #[test]
    fn stuck_on_every_attempt() {
        assert_eq!(
            allocate(&uneven_pots(), &DrawRules::new(2, 3, false), &mut NoShuffle),
            Err(DrawError::UnplaceableTeam {
                team_id: "f".to_owned(),
                pot: 4,
                attempts: MAX_DRAW_ATTEMPTS,
            })
        );
    }

    // If "f" lands next to "c" and "d" next to "a", "e" has nowhere to go without sharing a group
    // with "b", and "b" cannot be moved. A strict draw exists, so such attempts are redrawn.
    #[test]
    fn relaxed_draws_are_redrawn_when_caps_can_be_honored() {
        let teams = vec![
            Team::new("a", Some(1), Some("UEFA")),
            Team::new("b", Some(1), Some("CAF")),
            Team::new("c", Some(1), Some("AFC")),
            Team::new("d", Some(2), Some("AFC")),
            Team::new("e", Some(2), Some("CAF")),
            Team::new("f", Some(2), Some("CONMEBOL")),
        ];
        let rules = DrawRules::new(3, 2, true);
        let mut rng = deterministic_rng();
        for _ in 0..300 {
            let draw = allocate(&teams, &rules, &mut rng).unwrap();
            check_draw(&teams, &rules, &draw).unwrap();
            assert!(draw.is_strict(), "{}", draw.assignment);
        }
    }

    #[test]
    fn rejects_wrong_roster_size() {
        let teams = (0..5).map(|i| Team::new(format!("t{i}"), None, None)).collect_vec();
        assert_eq!(
            allocate(&teams, &DrawRules::new(2, 4, true), &mut NoShuffle),
            Err(DrawError::RosterSizeMismatch { expected: 8, actual: 5 })
        );
    }
}
