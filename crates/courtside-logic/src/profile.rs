//! Player attribute profiles and their derived fields.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::ratings::{RatingField, Ratings};

/// Number of fields in a player's specialization.
pub const SPECIALIZATION_SIZE: usize = 3;

/// A generated player. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeProfile {
    pub name: String,
    pub position: Position,
    pub ratings: Ratings,
    /// Height in inches.
    pub height: u16,
    /// Weight in pounds.
    pub weight: u16,
    /// Floor of the mean of all 21 ratings.
    pub overall: u8,
    /// The three highest skill ratings, best first.
    pub specialization: Vec<RatingField>,
}

impl AttributeProfile {
    /// Assemble a profile, computing `overall` and `specialization` from
    /// `ratings`.
    pub fn new(
        name: impl Into<String>,
        position: Position,
        ratings: Ratings,
        height: u16,
        weight: u16,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            overall: overall(&ratings),
            specialization: specialization(&ratings),
            ratings,
            height,
            weight,
        }
    }

    /// Recruiting-style star rating (1–5) derived from overall.
    pub fn star_rating(&self) -> u8 {
        match self.overall {
            74.. => 5,
            70..=73 => 4,
            65..=69 => 3,
            60..=64 => 2,
            _ => 1,
        }
    }

    /// Sum of the five scoring ratings used by matchup evaluation.
    pub fn offense_sum(&self) -> u32 {
        let r = &self.ratings;
        r.three_point_shot as u32
            + r.mid_range_shot as u32
            + r.close_shot as u32
            + r.driving_layup as u32
            + r.driving_dunk as u32
    }

    /// Sum of the five defensive ratings used by matchup evaluation.
    pub fn defense_sum(&self) -> u32 {
        let r = &self.ratings;
        r.perimeter_defense as u32
            + r.interior_defense as u32
            + r.steal as u32
            + r.block as u32
            + r.defensive_rebounding as u32
    }
}

/// Floor of the arithmetic mean of all 21 ratings.
pub fn overall(ratings: &Ratings) -> u8 {
    (ratings.total() / RatingField::ALL.len() as u32) as u8
}

/// The three highest skill fields (physicals and potential excluded),
/// sorted by descending value. Ties keep enumeration order.
pub fn specialization(ratings: &Ratings) -> Vec<RatingField> {
    let mut skills: Vec<(RatingField, u8)> = ratings.iter().filter(|(f, _)| f.is_skill()).collect();
    // Stable sort: equal values keep enumeration order.
    skills.sort_by(|a, b| b.1.cmp(&a.1));
    skills
        .into_iter()
        .take(SPECIALIZATION_SIZE)
        .map(|(f, _)| f)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_uniform() {
        assert_eq!(overall(&Ratings::uniform(50)), 50);
        assert_eq!(overall(&Ratings::uniform(99)), 99);
    }

    #[test]
    fn test_overall_floors() {
        // 20 × 50 + 1 × 70 = 1070; 1070 / 21 = 50.95…
        let mut r = Ratings::uniform(50);
        r.potential = 70;
        assert_eq!(overall(&r), 50);

        // 20 × 60 + 81 = 1281; 1281 / 21 = 61 exactly
        let mut r = Ratings::uniform(60);
        r.speed = 81;
        assert_eq!(overall(&r), 61);
    }

    #[test]
    fn test_specialization_picks_highest_skills() {
        let mut r = Ratings::uniform(50);
        r.steal = 90;
        r.three_point_shot = 88;
        r.block = 85;
        r.speed = 99; // physical, excluded
        r.potential = 99; // excluded
        assert_eq!(
            specialization(&r),
            vec![RatingField::Steal, RatingField::ThreePointShot, RatingField::Block]
        );
    }

    #[test]
    fn test_specialization_tie_break_is_enumeration_order() {
        let r = Ratings::uniform(70);
        assert_eq!(
            specialization(&r),
            vec![
                RatingField::CloseShot,
                RatingField::DrivingLayup,
                RatingField::DrivingDunk
            ]
        );

        let mut r = Ratings::uniform(40);
        r.defensive_rebounding = 80;
        r.pass_accuracy = 80;
        r.post_moves = 80;
        r.free_throw = 75;
        assert_eq!(
            specialization(&r),
            vec![
                RatingField::PostMoves,
                RatingField::PassAccuracy,
                RatingField::DefensiveRebounding
            ]
        );
    }

    #[test]
    fn test_star_rating_thresholds() {
        let mut p = AttributeProfile::new("A B", Position::Center, Ratings::uniform(74), 84, 250);
        assert_eq!(p.star_rating(), 5);
        p.overall = 73;
        assert_eq!(p.star_rating(), 4);
        p.overall = 65;
        assert_eq!(p.star_rating(), 3);
        p.overall = 60;
        assert_eq!(p.star_rating(), 2);
        p.overall = 59;
        assert_eq!(p.star_rating(), 1);
    }

    #[test]
    fn test_offense_and_defense_sums() {
        let p = AttributeProfile::new("A B", Position::PointGuard, Ratings::uniform(70), 74, 190);
        assert_eq!(p.offense_sum(), 350);
        assert_eq!(p.defense_sum(), 350);
    }
}
