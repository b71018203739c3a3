//! Position table — per-position sampling ranges for every rating,
//! height, and weight.
//!
//! The table is plain configuration: built once (usually with
//! [`PositionTable::standard`]) and passed by reference into every
//! generator call. A custom table can be loaded from JSON and must pass
//! [`PositionTable::validate`] before use.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::position::Position;
use crate::ratings::{RatingField, RATING_MAX, RATING_MIN};

/// Inclusive `[low, high]` sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: u16,
    pub high: u16,
}

impl Bounds {
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// Draw an integer uniformly from the interval. Inverted endpoints
    /// are read as the same interval written backwards.
    pub fn sample(&self, rng: &mut impl Rng) -> u16 {
        let (low, high) = (self.low.min(self.high), self.low.max(self.high));
        rng.gen_range(low..=high)
    }

    pub fn contains(&self, value: u16) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Width of the interval (`high - low`).
    pub fn span(&self) -> u16 {
        self.high.saturating_sub(self.low)
    }

    /// Sub-interval covering the fractions `[lo_frac, hi_frac]` of this
    /// interval's span. The result always stays inside `self`.
    pub fn window(&self, lo_frac: f64, hi_frac: f64) -> Bounds {
        let span = self.span() as f64;
        let lo = self.low + (span * lo_frac.clamp(0.0, 1.0)).round() as u16;
        let hi = self.low + (span * hi_frac.clamp(0.0, 1.0)).round() as u16;
        Bounds::new(lo.min(self.high), hi.clamp(lo.min(self.high), self.high))
    }
}

/// Ranges for one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRanges {
    /// Rating ranges keyed by field name.
    pub ratings: BTreeMap<RatingField, Bounds>,
    /// Height in inches.
    pub height: Bounds,
    /// Weight in pounds.
    pub weight: Bounds,
}

impl PositionRanges {
    /// Build from 21 `(low, high)` pairs given in [`RatingField::ALL`] order.
    fn from_pairs(pairs: [(u16, u16); 21], height: (u16, u16), weight: (u16, u16)) -> Self {
        let ratings = RatingField::ALL
            .iter()
            .zip(pairs)
            .map(|(field, (low, high))| (*field, Bounds::new(low, high)))
            .collect();
        Self {
            ratings,
            height: Bounds::new(height.0, height.1),
            weight: Bounds::new(weight.0, weight.1),
        }
    }

    /// Range for one rating field. Falls back to the full rating scale for
    /// a field missing from a table that skipped validation.
    pub fn rating(&self, field: RatingField) -> Bounds {
        self.ratings
            .get(&field)
            .copied()
            .unwrap_or(Bounds::new(RATING_MIN as u16, RATING_MAX as u16))
    }
}

/// Sampling ranges for all five positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionTable {
    #[serde(rename = "PG")]
    pub point_guard: PositionRanges,
    #[serde(rename = "SG")]
    pub shooting_guard: PositionRanges,
    #[serde(rename = "SF")]
    pub small_forward: PositionRanges,
    #[serde(rename = "PF")]
    pub power_forward: PositionRanges,
    #[serde(rename = "C")]
    pub center: PositionRanges,
}

impl PositionTable {
    /// Ranges for a position.
    pub fn get(&self, position: Position) -> &PositionRanges {
        match position {
            Position::PointGuard => &self.point_guard,
            Position::ShootingGuard => &self.shooting_guard,
            Position::SmallForward => &self.small_forward,
            Position::PowerForward => &self.power_forward,
            Position::Center => &self.center,
        }
    }

    /// Shortcut for one rating range at one position.
    pub fn rating(&self, position: Position, field: RatingField) -> Bounds {
        self.get(position).rating(field)
    }

    /// Load a table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: PositionTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every position defines all 21 rating fields, every rating
    /// range lies in 1..=99, and no range is inverted.
    pub fn validate(&self) -> Result<()> {
        for position in Position::ALL {
            let ranges = self.get(position);
            for field in RatingField::ALL {
                let bounds = ranges.ratings.get(&field).ok_or_else(|| {
                    CoreError::Configuration(format!("{}: missing range for {}", position, field))
                })?;
                if bounds.low > bounds.high {
                    return Err(CoreError::Configuration(format!(
                        "{}: {} range is inverted ({} > {})",
                        position, field, bounds.low, bounds.high
                    )));
                }
                if bounds.low < RATING_MIN as u16 || bounds.high > RATING_MAX as u16 {
                    return Err(CoreError::Configuration(format!(
                        "{}: {} range {}..={} outside {}..={}",
                        position, field, bounds.low, bounds.high, RATING_MIN, RATING_MAX
                    )));
                }
            }
            for (label, bounds) in [("height", ranges.height), ("weight", ranges.weight)] {
                if bounds.low > bounds.high {
                    return Err(CoreError::Configuration(format!(
                        "{}: {} range is inverted ({} > {})",
                        position, label, bounds.low, bounds.high
                    )));
                }
            }
        }
        Ok(())
    }

    /// The stock college-basketball table.
    pub fn standard() -> Self {
        Self {
            point_guard: PositionRanges::from_pairs(
                [
                    (35, 95), // close_shot
                    (45, 95), // driving_layup
                    (35, 95), // driving_dunk
                    (30, 60), // standing_dunk
                    (30, 60), // post_moves
                    (40, 95), // mid_range_shot
                    (40, 99), // three_point_shot
                    (55, 99), // free_throw
                    (50, 99), // pass_accuracy
                    (50, 99), // ball_handle
                    (75, 99), // speed_with_ball
                    (35, 60), // interior_defense
                    (35, 95), // perimeter_defense
                    (40, 95), // steal
                    (30, 65), // block
                    (30, 65), // offensive_rebounding
                    (40, 85), // defensive_rebounding
                    (75, 99), // speed
                    (20, 75), // strength
                    (30, 95), // vertical
                    (60, 99), // potential
                ],
                (68, 78),
                (160, 210),
            ),
            shooting_guard: PositionRanges::from_pairs(
                [
                    (35, 95),
                    (35, 95),
                    (35, 95),
                    (35, 75),
                    (35, 85),
                    (40, 95),
                    (35, 99),
                    (50, 99),
                    (35, 95),
                    (45, 95),
                    (65, 95),
                    (35, 70),
                    (40, 99),
                    (35, 90),
                    (35, 75),
                    (35, 75),
                    (45, 90),
                    (70, 95),
                    (30, 80),
                    (30, 95),
                    (60, 99),
                ],
                (72, 80),
                (170, 220),
            ),
            small_forward: PositionRanges::from_pairs(
                [
                    (35, 95),
                    (40, 95),
                    (35, 99),
                    (35, 95),
                    (35, 95),
                    (35, 95),
                    (35, 95),
                    (45, 95),
                    (40, 90),
                    (40, 85),
                    (50, 85),
                    (40, 85),
                    (40, 85),
                    (35, 90),
                    (35, 85),
                    (35, 85),
                    (35, 95),
                    (55, 90),
                    (35, 90),
                    (35, 90),
                    (60, 99),
                ],
                (75, 82),
                (180, 230),
            ),
            power_forward: PositionRanges::from_pairs(
                [
                    (50, 95),
                    (40, 85),
                    (35, 99),
                    (55, 99),
                    (45, 95),
                    (40, 90),
                    (35, 90),
                    (45, 85),
                    (40, 80),
                    (40, 75),
                    (40, 70),
                    (45, 95),
                    (35, 75),
                    (35, 80),
                    (45, 99),
                    (45, 95),
                    (45, 95),
                    (45, 75),
                    (45, 95),
                    (30, 85),
                    (60, 99),
                ],
                (78, 84),
                (190, 250),
            ),
            center: PositionRanges::from_pairs(
                [
                    (50, 99),
                    (40, 75),
                    (40, 99),
                    (55, 99),
                    (50, 99),
                    (35, 85),
                    (30, 90),
                    (40, 90),
                    (35, 85),
                    (30, 60),
                    (30, 60),
                    (55, 99),
                    (35, 65),
                    (40, 75),
                    (45, 99),
                    (55, 99),
                    (55, 99),
                    (30, 70),
                    (55, 99),
                    (35, 85),
                    (60, 99),
                ],
                (80, 88),
                (200, 300),
            ),
        }
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        Self::standard()
    }
}
