//! Card colors.
//!
//! Ten colors, totally ordered. Each color groups exactly one person, one
//! location, and one weapon, and the ordering decides which colors leave
//! the game at lower player counts.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Color of a card. The declaration order is the canonical ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Purple,
    Pink,
    Red,
    Green,
    Yellow,
    Blue,
    Orange,
    White,
    Brown,
    Gray,
}

impl Color {
    /// All colors, in canonical order.
    pub const ALL: [Color; 10] = [
        Color::Purple,
        Color::Pink,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Orange,
        Color::White,
        Color::Brown,
        Color::Gray,
    ];

    /// Capitalized display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Purple => "Purple",
            Color::Pink => "Pink",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
            Color::Orange => "Orange",
            Color::White => "White",
            Color::Brown => "Brown",
            Color::Gray => "Gray",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "purple" => Ok(Color::Purple),
            "pink" => Ok(Color::Pink),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "orange" => Ok(Color::Orange),
            "white" => Ok(Color::White),
            "brown" => Ok(Color::Brown),
            "gray" => Ok(Color::Gray),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ordering() {
        assert!(Color::Purple < Color::Pink);
        assert!(Color::Pink < Color::Red);
        assert!(Color::Brown < Color::Gray);

        let mut sorted = Color::ALL;
        sorted.sort();
        assert_eq!(sorted, Color::ALL);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("purple".parse(), Ok(Color::Purple));
        assert_eq!("Gray".parse(), Ok(Color::Gray));
        assert!("magenta".parse::<Color>().is_err());
    }
}
