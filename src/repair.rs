use log::debug;

use crate::group::{Assignment, GroupLabel};
use crate::rules::ConfederationCaps;
use crate::team::Team;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwapRepair {
    // Where the new team went.
    pub target: GroupLabel,
    pub displaced_team_id: String,
    // Where the displaced team went.
    pub destination: GroupLabel,
}

// Tries to place `team` by moving one team out of its way.
//
// Looks for a target group (in label order) that has room and no team from `team`'s pot, and
// only rejects `team` because of its confederation cap. The first occupant sharing the
// confederation is moved to the first other group (in label order) that can legally take it, and
// `team` takes the vacated slot. Only a single swap per team is attempted: if moving one occupant
// does not help, the repair fails and the assignment is left untouched.
//
// Improvement potential: Try multi-hop relocation chains. Single swaps cannot resolve conflicts
//   where the displaced team itself needs another team moved.
pub fn try_repair(
    team: &Team, assignment: &mut Assignment, teams_per_group: usize, caps: &ConfederationCaps,
) -> Option<SwapRepair> {
    let (target_idx, occupant_idx, destination_idx) =
        find_swap(team, assignment, teams_per_group, caps)?;
    let groups = assignment.groups();
    let repair = SwapRepair {
        target: groups[target_idx].label,
        displaced_team_id: groups[target_idx].teams[occupant_idx].id.clone(),
        destination: groups[destination_idx].label,
    };
    debug!(
        "Moved {} from group {} to group {} to make room for {}",
        repair.displaced_team_id, repair.target, repair.destination, team.id
    );
    assignment.swap_in(team.clone(), target_idx, occupant_idx, destination_idx);
    Some(repair)
}

// Returns (target group, occupant within target, destination group) indices.
fn find_swap(
    team: &Team, assignment: &Assignment, teams_per_group: usize, caps: &ConfederationCaps,
) -> Option<(usize, usize, usize)> {
    let confederation = team.confederation.as_ref()?;
    let cap = caps.cap(confederation);
    let groups = assignment.groups();
    for (target_idx, target) in groups.iter().enumerate() {
        if !target.can_take(team, teams_per_group) || target.fits_confederation(team, caps) {
            continue;
        }
        // Moving a single occupant out only helps if the group sits exactly at the cap.
        if target.confederation_count(confederation) != cap {
            continue;
        }
        let Some(occupant_idx) = target.teams.iter().position(|t| t.shares_confederation(team))
        else {
            continue;
        };
        let occupant = &target.teams[occupant_idx];
        let destination_idx = groups.iter().enumerate().position(|(idx, group)| {
            idx != target_idx
                && group.can_take(occupant, teams_per_group)
                && group.fits_confederation(occupant, caps)
        });
        if let Some(destination_idx) = destination_idx {
            return Some((target_idx, occupant_idx, destination_idx));
        }
    }
    None
}
