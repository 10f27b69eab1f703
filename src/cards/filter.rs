//! Filters: the scope of a question.
//!
//! A question is always about "the cards you can see matching X", where X
//! is either a color or a category.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::category::Category;
use super::color::Color;
use super::set::CardSet;

/// A color or a category, used to scope which cards a question is about.
///
/// Filters order colors before categories, each by its own ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Color(Color),
    Category(Category),
}

impl Filter {
    /// All universe cards matching the filter.
    #[must_use]
    pub const fn cards(self) -> CardSet {
        match self {
            Filter::Color(color) => CardSet::matching_color(color),
            Filter::Category(category) => CardSet::matching_category(category),
        }
    }
}

impl PartialOrd for Filter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Filter {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Filter::Color(left), Filter::Color(right)) => left.cmp(right),
            (Filter::Category(left), Filter::Category(right)) => left.cmp(right),
            (Filter::Color(_), Filter::Category(_)) => Ordering::Less,
            (Filter::Category(_), Filter::Color(_)) => Ordering::Greater,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Color(color) => color.fmt(f),
            Filter::Category(category) => category.fmt(f),
        }
    }
}

impl FromStr for Filter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(color) = s.parse::<Color>() {
            return Ok(Filter::Color(color));
        }
        s.parse::<Category>().map(Filter::Category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Gender;

    #[test]
    fn test_filter_cards() {
        assert_eq!(Filter::Color(Color::Red).cards().len(), 3);
        assert_eq!(Filter::Category(Category::Person(Gender::Man)).cards().len(), 5);
    }

    #[test]
    fn test_filter_ordering() {
        let color = Filter::Color(Color::Gray);
        let category = Filter::Category(Category::Person(Gender::Man));
        assert!(color < category);
        assert!(Filter::Color(Color::Purple) < Filter::Color(Color::Pink));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("red".parse(), Ok(Filter::Color(Color::Red)));
        assert_eq!(
            "woman".parse(),
            Ok(Filter::Category(Category::Person(Gender::Woman)))
        );
        assert!("everything".parse::<Filter>().is_err());
    }
}
