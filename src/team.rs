use std::fmt;

use serde::{Deserialize, Serialize};


// Seeding tier. Teams from the same pot never share a group.
pub type Pot = u32;

// Bucket for teams without a declared pot. It is the highest possible pot number, so unseeded
// teams are always drawn last.
pub const UNSEEDED_POT: Pot = Pot::MAX;

// Regional tag used by the diversity rule. Kept as an open string rather than an enum: catalogs
// are free to introduce new categories, and caps are looked up in `ConfederationCaps`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confederation(String);

impl Confederation {
    pub fn new(name: impl Into<String>) -> Self { Confederation(name.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Confederation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Confederation {
    fn from(name: &str) -> Self { Confederation::new(name) }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pot: Option<Pot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confederation: Option<Confederation>,
}

impl Team {
    // Team with `name` and `short_name` derived from the id. Mostly useful for tests and
    // generated rosters.
    pub fn new(id: impl Into<String>, pot: Option<Pot>, confederation: Option<&str>) -> Self {
        let id = id.into();
        Team {
            name: id.clone(),
            short_name: id.to_uppercase(),
            id,
            pot,
            confederation: confederation.map(Confederation::from),
        }
    }

    // The bucket this team is drawn from.
    pub fn draw_pot(&self) -> Pot { self.pot.unwrap_or(UNSEEDED_POT) }

    pub fn is_seeded(&self) -> bool { self.pot.is_some() }

    pub fn shares_confederation(&self, other: &Team) -> bool {
        self.confederation.is_some() && self.confederation == other.confederation
    }
}
