//! Secret informants: leftover cards not dealt to any player.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A secret informant: a face-down leftover card a player may examine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretInformant {
    /// Single-letter identity of the informant.
    pub name: char,
    /// The revealed card, once someone has examined this informant.
    pub card: Option<Card>,
}

impl SecretInformant {
    /// Create an informant.
    #[must_use]
    pub const fn new(name: char, card: Option<Card>) -> Self {
        Self { name, card }
    }

    /// Replace the revealed card.
    #[must_use]
    pub const fn with_card(self, card: Option<Card>) -> Self {
        Self { name: self.name, card }
    }
}
