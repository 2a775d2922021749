//! Side identification for the two players.
//!
//! Circle always moves first. The numeric index of a side doubles as its
//! layer in the 3-layer observation encoding (0 = Circle, 1 = Cross).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::EnvError;

/// One of the two player identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Moves first. Rendered as `O`.
    Circle,
    /// Moves second. Rendered as `X`.
    Cross,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::Circle, Side::Cross];

    /// The side that opens every game.
    pub const FIRST: Side = Side::Circle;

    /// Get the opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Circle => Side::Cross,
            Side::Cross => Side::Circle,
        }
    }

    /// Get the raw side index, which is also the observation layer.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Circle => 0,
            Side::Cross => 1,
        }
    }

    /// Board glyph for this side.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Side::Circle => 'O',
            Side::Cross => 'X',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Circle => write!(f, "circle"),
            Side::Cross => write!(f, "cross"),
        }
    }
}

impl FromStr for Side {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "circle" => Ok(Side::Circle),
            "cross" => Ok(Side::Cross),
            _ => Err(EnvError::Configuration(format!(
                "player_color must be 'circle' or 'cross', not '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::Circle.index(), 0);
        assert_eq!(Side::Cross.index(), 1);
        assert_eq!(Side::Circle.other(), Side::Cross);
        assert_eq!(Side::Cross.other(), Side::Circle);
        assert_eq!(Side::FIRST, Side::Circle);
        assert_eq!(format!("{}", Side::Cross), "cross");
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("circle".parse::<Side>(), Ok(Side::Circle));
        assert_eq!("Cross".parse::<Side>(), Ok(Side::Cross));
        assert!(matches!(
            "square".parse::<Side>(),
            Err(EnvError::Configuration(_))
        ));
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Circle).unwrap();
        assert_eq!(json, "\"circle\"");
        let deserialized: Side = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Side::Circle);
    }
}
