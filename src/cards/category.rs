//! Card categories.
//!
//! Cards are people, locations, or weapons, and every category splits into
//! two sub-kinds. Questions in the game are scoped by sub-kind, so the
//! sub-kind carries the identity: `Person(Man)` and `Person(Woman)` are
//! distinct categories.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sub-kind of the person cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
}

/// Sub-kind of the location cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Indoors,
    Outdoors,
}

/// Sub-kind of the weapon cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponClass {
    Ranged,
    Melee,
}

/// Category of a card, including its sub-kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Person(Gender),
    Location(Presence),
    Weapon(WeaponClass),
}

impl Category {
    /// All six categories, in canonical order.
    pub const ALL: [Category; 6] = [
        Category::Person(Gender::Man),
        Category::Person(Gender::Woman),
        Category::Location(Presence::Indoors),
        Category::Location(Presence::Outdoors),
        Category::Weapon(WeaponClass::Ranged),
        Category::Weapon(WeaponClass::Melee),
    ];

    /// Position in the canonical ordering.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Category::Person(Gender::Man) => 0,
            Category::Person(Gender::Woman) => 1,
            Category::Location(Presence::Indoors) => 2,
            Category::Location(Presence::Outdoors) => 3,
            Category::Weapon(WeaponClass::Ranged) => 4,
            Category::Weapon(WeaponClass::Melee) => 5,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Person(Gender::Man) => "Male",
            Category::Person(Gender::Woman) => "Female",
            Category::Location(Presence::Indoors) => "Indoors",
            Category::Location(Presence::Outdoors) => "Outdoors",
            Category::Weapon(WeaponClass::Ranged) => "Ranged",
            Category::Weapon(WeaponClass::Melee) => "Melee",
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "man" => Ok(Category::Person(Gender::Man)),
            "woman" => Ok(Category::Person(Gender::Woman)),
            "indoors" => Ok(Category::Location(Presence::Indoors)),
            "outdoors" => Ok(Category::Location(Presence::Outdoors)),
            "ranged" => Ok(Category::Weapon(WeaponClass::Ranged)),
            "melee" => Ok(Category::Weapon(WeaponClass::Melee)),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ordering() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);

        assert!(Category::Person(Gender::Man) < Category::Person(Gender::Woman));
        assert!(Category::Weapon(WeaponClass::Ranged) < Category::Weapon(WeaponClass::Melee));
        assert!(Category::Location(Presence::Outdoors) < Category::Weapon(WeaponClass::Ranged));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("man".parse(), Ok(Category::Person(Gender::Man)));
        assert_eq!("melee".parse(), Ok(Category::Weapon(WeaponClass::Melee)));
        assert!("knight".parse::<Category>().is_err());
    }
}
