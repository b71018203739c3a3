//! Rating fields: the 20 skill ratings plus potential.
//!
//! Ratings are integers on a 1–99 scale. Each field is bounded by a
//! position-specific range from the [`PositionTable`](crate::tables::PositionTable);
//! correlation rules may later push a value upward but never past
//! [`RATING_MAX`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest value any rating can reach.
pub const RATING_MAX: u8 = 99;

/// Lowest value a configured range may start at.
pub const RATING_MIN: u8 = 1;

/// Every rating field, in the stable enumeration order used for
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    // Finishing
    CloseShot,
    DrivingLayup,
    DrivingDunk,
    StandingDunk,
    PostMoves,
    // Shooting
    MidRangeShot,
    ThreePointShot,
    FreeThrow,
    // Playmaking
    PassAccuracy,
    BallHandle,
    SpeedWithBall,
    // Defense
    InteriorDefense,
    PerimeterDefense,
    Steal,
    Block,
    // Rebounding
    OffensiveRebounding,
    DefensiveRebounding,
    // Physicals
    Speed,
    Strength,
    Vertical,
    Potential,
}

impl RatingField {
    /// All 21 fields in enumeration order.
    pub const ALL: [RatingField; 21] = [
        RatingField::CloseShot,
        RatingField::DrivingLayup,
        RatingField::DrivingDunk,
        RatingField::StandingDunk,
        RatingField::PostMoves,
        RatingField::MidRangeShot,
        RatingField::ThreePointShot,
        RatingField::FreeThrow,
        RatingField::PassAccuracy,
        RatingField::BallHandle,
        RatingField::SpeedWithBall,
        RatingField::InteriorDefense,
        RatingField::PerimeterDefense,
        RatingField::Steal,
        RatingField::Block,
        RatingField::OffensiveRebounding,
        RatingField::DefensiveRebounding,
        RatingField::Speed,
        RatingField::Strength,
        RatingField::Vertical,
        RatingField::Potential,
    ];

    /// Field name as stored by the persistence layer.
    pub fn name(self) -> &'static str {
        match self {
            RatingField::CloseShot => "close_shot",
            RatingField::DrivingLayup => "driving_layup",
            RatingField::DrivingDunk => "driving_dunk",
            RatingField::StandingDunk => "standing_dunk",
            RatingField::PostMoves => "post_moves",
            RatingField::MidRangeShot => "mid_range_shot",
            RatingField::ThreePointShot => "three_point_shot",
            RatingField::FreeThrow => "free_throw",
            RatingField::PassAccuracy => "pass_accuracy",
            RatingField::BallHandle => "ball_handle",
            RatingField::SpeedWithBall => "speed_with_ball",
            RatingField::InteriorDefense => "interior_defense",
            RatingField::PerimeterDefense => "perimeter_defense",
            RatingField::Steal => "steal",
            RatingField::Block => "block",
            RatingField::OffensiveRebounding => "offensive_rebounding",
            RatingField::DefensiveRebounding => "defensive_rebounding",
            RatingField::Speed => "speed",
            RatingField::Strength => "strength",
            RatingField::Vertical => "vertical",
            RatingField::Potential => "potential",
        }
    }

    /// Whether the field can appear in a player's specialization.
    /// Physicals and potential are excluded.
    pub fn is_skill(self) -> bool {
        !matches!(
            self,
            RatingField::Speed | RatingField::Strength | RatingField::Vertical | RatingField::Potential
        )
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A full set of the 21 rating values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub close_shot: u8,
    pub driving_layup: u8,
    pub driving_dunk: u8,
    pub standing_dunk: u8,
    pub post_moves: u8,
    pub mid_range_shot: u8,
    pub three_point_shot: u8,
    pub free_throw: u8,
    pub pass_accuracy: u8,
    pub ball_handle: u8,
    pub speed_with_ball: u8,
    pub interior_defense: u8,
    pub perimeter_defense: u8,
    pub steal: u8,
    pub block: u8,
    pub offensive_rebounding: u8,
    pub defensive_rebounding: u8,
    pub speed: u8,
    pub strength: u8,
    pub vertical: u8,
    pub potential: u8,
}

impl Ratings {
    /// Every field set to the same value. Mostly useful for fixtures.
    pub fn uniform(value: u8) -> Self {
        Self::from_fn(|_| value)
    }

    /// Build a rating set by evaluating `f` for each field in order.
    pub fn from_fn(mut f: impl FnMut(RatingField) -> u8) -> Self {
        let mut ratings = Self {
            close_shot: 0,
            driving_layup: 0,
            driving_dunk: 0,
            standing_dunk: 0,
            post_moves: 0,
            mid_range_shot: 0,
            three_point_shot: 0,
            free_throw: 0,
            pass_accuracy: 0,
            ball_handle: 0,
            speed_with_ball: 0,
            interior_defense: 0,
            perimeter_defense: 0,
            steal: 0,
            block: 0,
            offensive_rebounding: 0,
            defensive_rebounding: 0,
            speed: 0,
            strength: 0,
            vertical: 0,
            potential: 0,
        };
        for field in RatingField::ALL {
            ratings.set(field, f(field));
        }
        ratings
    }

    /// Get the value of a field.
    pub fn get(&self, field: RatingField) -> u8 {
        match field {
            RatingField::CloseShot => self.close_shot,
            RatingField::DrivingLayup => self.driving_layup,
            RatingField::DrivingDunk => self.driving_dunk,
            RatingField::StandingDunk => self.standing_dunk,
            RatingField::PostMoves => self.post_moves,
            RatingField::MidRangeShot => self.mid_range_shot,
            RatingField::ThreePointShot => self.three_point_shot,
            RatingField::FreeThrow => self.free_throw,
            RatingField::PassAccuracy => self.pass_accuracy,
            RatingField::BallHandle => self.ball_handle,
            RatingField::SpeedWithBall => self.speed_with_ball,
            RatingField::InteriorDefense => self.interior_defense,
            RatingField::PerimeterDefense => self.perimeter_defense,
            RatingField::Steal => self.steal,
            RatingField::Block => self.block,
            RatingField::OffensiveRebounding => self.offensive_rebounding,
            RatingField::DefensiveRebounding => self.defensive_rebounding,
            RatingField::Speed => self.speed,
            RatingField::Strength => self.strength,
            RatingField::Vertical => self.vertical,
            RatingField::Potential => self.potential,
        }
    }

    /// Set the value of a field.
    pub fn set(&mut self, field: RatingField, value: u8) {
        let slot = match field {
            RatingField::CloseShot => &mut self.close_shot,
            RatingField::DrivingLayup => &mut self.driving_layup,
            RatingField::DrivingDunk => &mut self.driving_dunk,
            RatingField::StandingDunk => &mut self.standing_dunk,
            RatingField::PostMoves => &mut self.post_moves,
            RatingField::MidRangeShot => &mut self.mid_range_shot,
            RatingField::ThreePointShot => &mut self.three_point_shot,
            RatingField::FreeThrow => &mut self.free_throw,
            RatingField::PassAccuracy => &mut self.pass_accuracy,
            RatingField::BallHandle => &mut self.ball_handle,
            RatingField::SpeedWithBall => &mut self.speed_with_ball,
            RatingField::InteriorDefense => &mut self.interior_defense,
            RatingField::PerimeterDefense => &mut self.perimeter_defense,
            RatingField::Steal => &mut self.steal,
            RatingField::Block => &mut self.block,
            RatingField::OffensiveRebounding => &mut self.offensive_rebounding,
            RatingField::DefensiveRebounding => &mut self.defensive_rebounding,
            RatingField::Speed => &mut self.speed,
            RatingField::Strength => &mut self.strength,
            RatingField::Vertical => &mut self.vertical,
            RatingField::Potential => &mut self.potential,
        };
        *slot = value;
    }

    /// Raise a field to at least `floor`, capped at [`RATING_MAX`].
    /// Never lowers the current value.
    pub fn raise_to(&mut self, field: RatingField, floor: i32) {
        let current = self.get(field);
        let target = floor.clamp(0, RATING_MAX as i32) as u8;
        if target > current {
            self.set(field, target);
        }
    }

    /// Sum of all 21 fields.
    pub fn total(&self) -> u32 {
        RatingField::ALL.iter().map(|f| self.get(*f) as u32).sum()
    }

    /// Iterate `(field, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (RatingField, u8)> + '_ {
        RatingField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}
