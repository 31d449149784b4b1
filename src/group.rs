use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::rules::ConfederationCaps;
use crate::team::{Confederation, Pot, Team};


pub const GROUP_ALPHABET: &str = "ABCDEFGHIJKLMNOP";
pub const MAX_GROUPS: usize = GROUP_ALPHABET.len();

#[rustfmt::skip]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
pub enum GroupLabel {
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P,
}

impl GroupLabel {
    pub fn from_index(index: usize) -> Option<Self> { GroupLabel::iter().nth(index) }
    pub fn to_index(self) -> usize { self as usize }

    pub fn from_char(ch: char) -> Option<Self> {
        let ch = ch.to_ascii_uppercase();
        GroupLabel::iter().find(|label| label.to_char() == ch)
    }
    pub fn to_char(self) -> char { GROUP_ALPHABET.as_bytes()[self.to_index()] as char }

    // First `group_count` labels in alphabet order. Silently truncated to `MAX_GROUPS`.
    pub fn first(group_count: usize) -> impl Iterator<Item = GroupLabel> {
        GroupLabel::iter().take(group_count)
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.to_char()) }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Group {
    pub label: GroupLabel,
    // In placement order.
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(label: GroupLabel) -> Self { Group { label, teams: Vec::new() } }

    pub fn len(&self) -> usize { self.teams.len() }
    pub fn is_empty(&self) -> bool { self.teams.is_empty() }
    pub fn has_room(&self, teams_per_group: usize) -> bool { self.teams.len() < teams_per_group }

    // Whether the group already holds a team declaring `pot`. Unseeded teams never collide.
    pub fn has_pot(&self, pot: Option<Pot>) -> bool {
        pot.is_some() && self.teams.iter().any(|t| t.pot == pot)
    }

    pub fn confederation_count(&self, confederation: &Confederation) -> usize {
        self.teams.iter().filter(|t| t.confederation.as_ref() == Some(confederation)).count()
    }

    // Whether adding `team` keeps the group within its confederation cap.
    pub fn fits_confederation(&self, team: &Team, caps: &ConfederationCaps) -> bool {
        match &team.confederation {
            None => true,
            Some(c) => self.confederation_count(c) < caps.cap(c),
        }
    }

    // Capacity and pot-uniqueness; the diversity rule is checked separately.
    pub fn can_take(&self, team: &Team, teams_per_group: usize) -> bool {
        self.has_room(teams_per_group) && !self.has_pot(team.pot)
    }

    pub fn contains(&self, team_id: &str) -> bool { self.teams.iter().any(|t| t.id == team_id) }
}


// Result of one draw: every group in label order, each with its teams in placement order.
//
// An `Assignment` is built from scratch by each `allocate` call and only mutated inside that
// call. Callers receive it by value.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Assignment {
    groups: Vec<Group>,
}

impl Assignment {
    pub fn new(group_count: usize) -> Self {
        Assignment { groups: GroupLabel::first(group_count).map(Group::new).collect() }
    }

    pub fn group_count(&self) -> usize { self.groups.len() }
    pub fn groups(&self) -> &[Group] { &self.groups }
    pub fn labels(&self) -> impl Iterator<Item = GroupLabel> + '_ {
        self.groups.iter().map(|g| g.label)
    }

    pub fn group(&self, label: GroupLabel) -> Option<&Group> { self.groups.get(label.to_index()) }

    pub fn num_teams(&self) -> usize { self.groups.iter().map(Group::len).sum() }

    pub fn group_of(&self, team_id: &str) -> Option<GroupLabel> {
        self.groups.iter().find(|g| g.contains(team_id)).map(|g| g.label)
    }

    pub fn teams(&self) -> impl Iterator<Item = (GroupLabel, &Team)> {
        self.groups.iter().flat_map(|g| g.teams.iter().map(move |t| (g.label, t)))
    }

    pub fn is_complete(&self, teams_per_group: usize) -> bool {
        self.groups.iter().all(|g| g.len() == teams_per_group)
    }

    pub fn into_groups(self) -> Vec<Group> { self.groups }

    pub(crate) fn group_mut(&mut self, index: usize) -> &mut Group { &mut self.groups[index] }

    // Moves `teams[occupant]` of group `from` to the end of group `to` and puts `team` into the
    // vacated slot.
    pub(crate) fn swap_in(&mut self, team: Team, from: usize, occupant: usize, to: usize) {
        let displaced = std::mem::replace(&mut self.groups[from].teams[occupant], team);
        self.groups[to].teams.push(displaced);
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            let teams = group.teams.iter().map(|t| t.short_name.as_str()).join(" ");
            writeln!(f, "{}: {}", group.label, teams)?;
        }
        Ok(())
    }
}
