//! Court positions, the fixed set that drives every range lookup.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the five basketball positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    /// All positions in lineup order (PG → C).
    pub const ALL: [Position; 5] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    /// Short position code ("PG", "SG", ...).
    pub fn code(self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

    /// Index into [`Position::ALL`].
    pub fn index(self) -> usize {
        match self {
            Position::PointGuard => 0,
            Position::ShootingGuard => 1,
            Position::SmallForward => 2,
            Position::PowerForward => 3,
            Position::Center => 4,
        }
    }

    /// Pick a position uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PG" => Ok(Position::PointGuard),
            "SG" => Ok(Position::ShootingGuard),
            "SF" => Ok(Position::SmallForward),
            "PF" => Ok(Position::PowerForward),
            "C" => Ok(Position::Center),
            _ => Err(CoreError::Validation(format!(
                "unrecognized position code '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_parse_codes() {
        for pos in Position::ALL {
            assert_eq!(pos.code().parse::<Position>().unwrap(), pos);
        }
        assert_eq!("pf".parse::<Position>().unwrap(), Position::PowerForward);
        assert_eq!(" c ".parse::<Position>().unwrap(), Position::Center);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "G".parse::<Position>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!("".parse::<Position>().is_err());
        assert!("Forward".parse::<Position>().is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }

    #[test]
    fn test_random_covers_every_position() {
        let mut rng = seeded_rng(7);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[Position::random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Position::ShootingGuard).unwrap();
        assert_eq!(json, "\"SG\"");
        let back: Position = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(back, Position::Center);
    }
}
