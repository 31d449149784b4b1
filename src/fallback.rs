use log::debug;

use crate::group::{Assignment, GroupLabel};
use crate::team::Team;


// Last resort: puts `team` into the first group (in label order) with spare room and no team from
// the same pot, ignoring confederation caps entirely.
//
// Returns `None` only if every group is full or already has a team from this pot, which means the
// roster cannot be drawn under these rules at all.
pub fn force_place(
    team: &Team, assignment: &mut Assignment, teams_per_group: usize,
) -> Option<GroupLabel> {
    let idx = assignment.groups().iter().position(|g| g.can_take(team, teams_per_group))?;
    let group = assignment.group_mut(idx);
    group.teams.push(team.clone());
    debug!("Force-placed {} into group {}", team.id, group.label);
    Some(group.label)
}
