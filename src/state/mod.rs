//! Immutable game snapshots.
//!
//! A [`GameState`] is a value: every mutation (appending or removing an
//! action, updating a player or informant) produces a new snapshot with a
//! fresh identity, so states can be shared across worker threads without
//! locks. The ordered action log is the replayable record the elimination
//! engine reasons over.

mod action;
mod game;
mod informant;
mod player;
mod seed;
mod solution;

pub use action::{Accusation, Action, Examination, Inquisition};
pub use game::{GameState, StateId};
pub use informant::SecretInformant;
pub use player::{HiddenCardPosition, HiddenCardSet, MysteryCardSet, Player};
pub use seed::SeedError;
pub use solution::Solution;
