use std::collections::VecDeque;

use derive_new::new;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::group::{Assignment, GroupLabel};
use crate::team::Team;


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, new)]
pub struct RevealItem {
    pub team: Team,
    pub group: GroupLabel,
}

// Order in which a finished draw is shown to the audience: pot by pot in ascending order, and
// within each pot group by group. Unseeded teams come last, group by group, in placement order.
pub fn reveal_queue(assignment: &Assignment) -> Vec<RevealItem> {
    let (seeded, unseeded): (Vec<_>, Vec<_>) =
        assignment.teams().partition(|(_, team)| team.is_seeded());
    // Stable sort: `teams()` is already in group order.
    seeded
        .into_iter()
        .sorted_by_key(|(_, team)| team.pot)
        .chain(unseeded)
        .map(|(group, team)| RevealItem::new(team.clone(), group))
        .collect()
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RevealEvent {
    Reveal(RevealItem),
    // Sent exactly once, after the last item.
    Complete,
}

// Hands out a reveal queue one entry at a time to a (possibly slow, animated) presentation layer.
#[derive(Clone, Debug)]
pub struct RevealQueue {
    items: VecDeque<RevealItem>,
    completed: bool,
}

impl RevealQueue {
    pub fn new(assignment: &Assignment) -> Self {
        RevealQueue {
            items: reveal_queue(assignment).into(),
            completed: false,
        }
    }

    pub fn remaining(&self) -> usize { self.items.len() }
    pub fn is_completed(&self) -> bool { self.completed }
    pub fn peek(&self) -> Option<&RevealItem> { self.items.front() }

    // Drains the queue: `on_item` for every entry, then `on_complete` once.
    pub fn run(self, mut on_item: impl FnMut(&RevealItem), on_complete: impl FnOnce()) {
        let mut on_complete = Some(on_complete);
        for event in self {
            match event {
                RevealEvent::Reveal(item) => on_item(&item),
                RevealEvent::Complete => {
                    if let Some(f) = on_complete.take() {
                        f();
                    }
                }
            }
        }
    }
}

impl Iterator for RevealQueue {
    type Item = RevealEvent;

    fn next(&mut self) -> Option<RevealEvent> {
        if let Some(item) = self.items.pop_front() {
            Some(RevealEvent::Reveal(item))
        } else if !self.completed {
            self.completed = true;
            Some(RevealEvent::Complete)
        } else {
            None
        }
    }
}
