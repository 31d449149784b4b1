// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod allocator;
pub mod error;
pub mod fallback;
pub mod group;
pub mod pot;
pub mod random;
pub mod repair;
pub mod reveal;
pub mod roster;
pub mod rules;
pub mod team;
pub mod test_util;

pub use allocator::{ConstraintRelaxation, Draw, MAX_DRAW_ATTEMPTS, allocate, allocate_randomly};
pub use error::DrawError;
pub use group::{Assignment, Group, GROUP_ALPHABET, GroupLabel, MAX_GROUPS};
pub use pot::partition_by_pot;
pub use random::RandomSource;
pub use reveal::{RevealEvent, RevealItem, RevealQueue, reveal_queue};
pub use roster::{DrawSetup, verify_roster};
pub use rules::{ConfederationCaps, DrawRules, RulesError};
pub use team::{Confederation, Pot, Team, UNSEEDED_POT};
