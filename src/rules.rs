use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::group::MAX_GROUPS;
use crate::team::Confederation;


pub const DEFAULT_CONFEDERATION_CAP: usize = 1;
pub const DEFAULT_TEAMS_PER_GROUP: usize = 4;

// How many teams of one confederation a group may hold. Confederations missing from the table
// get `default_cap`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ConfederationCaps {
    #[serde(default = "default_confederation_cap")]
    pub default_cap: usize,
    #[serde(default)]
    pub caps: HashMap<Confederation, usize>,
}

fn default_confederation_cap() -> usize { DEFAULT_CONFEDERATION_CAP }

impl ConfederationCaps {
    pub fn uniform(default_cap: usize) -> Self {
        ConfederationCaps { default_cap, caps: HashMap::new() }
    }

    // FIFA World Cup style: at most two European teams per group, one from everybody else.
    pub fn world_cup() -> Self { Self::uniform(DEFAULT_CONFEDERATION_CAP).with_cap("UEFA", 2) }

    pub fn with_cap(mut self, confederation: impl Into<String>, cap: usize) -> Self {
        self.caps.insert(Confederation::new(confederation), cap);
        self
    }

    pub fn cap(&self, confederation: &Confederation) -> usize {
        self.caps.get(confederation).copied().unwrap_or(self.default_cap)
    }
}

impl Default for ConfederationCaps {
    fn default() -> Self { Self::world_cup() }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RulesError {
    NoGroups,
    TooManyGroups { group_count: usize },
    EmptyGroups,
    ZeroConfederationCap,
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::NoGroups => write!(f, "At least one group is required"),
            RulesError::TooManyGroups { group_count } => {
                write!(f, "Cannot draw {group_count} groups: at most {MAX_GROUPS} are supported")
            }
            RulesError::EmptyGroups => write!(f, "Groups must hold at least one team"),
            RulesError::ZeroConfederationCap => {
                write!(f, "Confederation caps must allow at least one team per group")
            }
        }
    }
}

impl std::error::Error for RulesError {}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DrawRules {
    pub group_count: usize,
    #[serde(default = "default_teams_per_group")]
    pub teams_per_group: usize,
    #[serde(default)]
    pub enforce_diversity_rule: bool,
    #[serde(default)]
    pub confederation_caps: ConfederationCaps,
}

fn default_teams_per_group() -> usize { DEFAULT_TEAMS_PER_GROUP }

impl DrawRules {
    pub fn new(group_count: usize, teams_per_group: usize, enforce_diversity_rule: bool) -> Self {
        DrawRules {
            group_count,
            teams_per_group,
            enforce_diversity_rule,
            confederation_caps: ConfederationCaps::world_cup(),
        }
    }

    // 32 teams, 8 groups of 4, confederation rules on.
    pub fn world_cup_32() -> Self { Self::new(8, 4, true) }

    // 48 teams, 12 groups of 4, confederation rules on.
    pub fn world_cup_48() -> Self { Self::new(12, 4, true) }

    pub fn total_teams(&self) -> usize { self.group_count * self.teams_per_group }

    pub fn verify(&self) -> Result<(), RulesError> {
        if self.group_count == 0 {
            return Err(RulesError::NoGroups);
        }
        if self.group_count > MAX_GROUPS {
            return Err(RulesError::TooManyGroups { group_count: self.group_count });
        }
        if self.teams_per_group == 0 {
            return Err(RulesError::EmptyGroups);
        }
        let caps = &self.confederation_caps;
        if caps.default_cap == 0 || caps.caps.values().any(|&cap| cap == 0) {
            return Err(RulesError::ZeroConfederationCap);
        }
        Ok(())
    }
}
