//! Attribute generator — samples a complete player for a position.
//!
//! # Pipeline
//!
//! 1. Pick the position (uniform when not given).
//! 2. Draw each of the 21 ratings from the position's range, narrowed to
//!    the tier window when a [`SkillTier`] is supplied.
//! 3. Apply [`CORRELATION_RULES`] in order to the working rating set.
//! 4. Derive overall and specialization, draw height and weight, and
//!    pick a name.
//!
//! ```
//! use courtside_logic::generator::generate_profile;
//! use courtside_logic::names::NamePool;
//! use courtside_logic::position::Position;
//! use courtside_logic::tables::PositionTable;
//!
//! let table = PositionTable::standard();
//! let names = NamePool::standard();
//! let mut rng = courtside_logic::seeded_rng(42);
//!
//! let player = generate_profile(&table, &names, Some(Position::Center), None, &mut rng);
//! assert_eq!(player.position, Position::Center);
//! assert_eq!(player.specialization.len(), 3);
//! ```

use rand::Rng;

use crate::error::Result;
use crate::names::NamePool;
use crate::position::Position;
use crate::profile::AttributeProfile;
use crate::ratings::{RatingField, Ratings, RATING_MAX};
use crate::tables::PositionTable;
use crate::tier::SkillTier;

/// A monotonic adjustment: when `applies` holds, `adjust` raises one or
/// more fields. Rules never lower a value.
pub struct CorrelationRule {
    pub name: &'static str,
    pub applies: fn(&Ratings) -> bool,
    pub adjust: fn(&mut Ratings),
}

/// Cross-stat correlation rules, applied in this order. Later rules see
/// values already raised by earlier ones.
pub static CORRELATION_RULES: [CorrelationRule; 12] = [
    CorrelationRule {
        name: "vertical_feeds_dunks",
        applies: |r| r.vertical > 85,
        adjust: |r| {
            r.raise_to(RatingField::DrivingDunk, r.vertical as i32 - 10);
            r.raise_to(RatingField::StandingDunk, r.vertical as i32 - 15);
        },
    },
    CorrelationRule {
        name: "drives_feed_close_shot",
        applies: |r| r.driving_layup > 85 || r.driving_dunk > 85,
        adjust: |r| {
            let best = r.driving_layup.max(r.driving_dunk) as i32;
            r.raise_to(RatingField::CloseShot, best - 5);
        },
    },
    CorrelationRule {
        name: "post_moves_feed_close_shot",
        applies: |r| r.post_moves > 85,
        adjust: |r| r.raise_to(RatingField::CloseShot, r.post_moves as i32 - 5),
    },
    CorrelationRule {
        name: "mid_range_feeds_free_throw",
        applies: |r| r.mid_range_shot > 85,
        adjust: |r| r.raise_to(RatingField::FreeThrow, r.mid_range_shot as i32 - 5),
    },
    CorrelationRule {
        name: "three_point_feeds_free_throw",
        applies: |r| r.three_point_shot > 85,
        adjust: |r| r.raise_to(RatingField::FreeThrow, r.three_point_shot as i32 - 10),
    },
    CorrelationRule {
        name: "passing_feeds_handle",
        applies: |r| r.pass_accuracy > 85,
        adjust: |r| r.raise_to(RatingField::BallHandle, r.pass_accuracy as i32 - 10),
    },
    CorrelationRule {
        name: "speed_with_ball_feeds_speed_and_passing",
        applies: |r| r.speed_with_ball > 85,
        adjust: |r| {
            r.raise_to(RatingField::Speed, r.speed_with_ball as i32 - 5);
            r.raise_to(RatingField::PassAccuracy, r.speed_with_ball as i32 - 10);
        },
    },
    CorrelationRule {
        name: "perimeter_defense_feeds_steal",
        applies: |r| r.perimeter_defense > 85,
        adjust: |r| r.raise_to(RatingField::Steal, r.perimeter_defense as i32 - 10),
    },
    CorrelationRule {
        name: "interior_defense_feeds_block",
        applies: |r| r.interior_defense > 85,
        adjust: |r| r.raise_to(RatingField::Block, r.interior_defense as i32 - 10),
    },
    CorrelationRule {
        name: "strength_feeds_rebounding",
        applies: |r| r.strength > 80,
        adjust: |r| {
            r.raise_to(RatingField::OffensiveRebounding, r.strength as i32 - 10);
            r.raise_to(RatingField::DefensiveRebounding, r.strength as i32 - 5);
        },
    },
    CorrelationRule {
        name: "rebounding_feeds_strength",
        applies: |r| r.offensive_rebounding > 80 || r.defensive_rebounding > 80,
        adjust: |r| r.raise_to(RatingField::Strength, r.offensive_rebounding as i32 - 10),
    },
    CorrelationRule {
        name: "speed_feeds_speed_with_ball",
        applies: |r| r.speed > 85,
        adjust: |r| r.raise_to(RatingField::SpeedWithBall, r.speed as i32 - 5),
    },
];

/// Run every correlation rule, in order, over `ratings`.
pub fn apply_correlations(ratings: &mut Ratings) {
    for rule in CORRELATION_RULES.iter() {
        if (rule.applies)(ratings) {
            (rule.adjust)(ratings);
        }
    }
}

/// Draw the 21 raw ratings for a position (before correlation).
///
/// Draws above [`RATING_MAX`] are capped, so an unvalidated table cannot
/// wrap a rating around.
pub fn sample_ratings(
    table: &PositionTable,
    position: Position,
    tier: Option<SkillTier>,
    rng: &mut impl Rng,
) -> Ratings {
    let ranges = table.get(position);
    Ratings::from_fn(|field| {
        let bounds = ranges.rating(field);
        let bounds = match tier {
            Some(t) => t.remap(bounds),
            None => bounds,
        };
        bounds.sample(rng).min(RATING_MAX as u16) as u8
    })
}

/// Generate one player.
///
/// `position = None` picks a position uniformly at random. `tier = None`
/// samples from each field's full configured range. The table should have
/// passed [`PositionTable::validate`]; an unvalidated one still yields a
/// player, with inverted ranges read backwards and ratings capped at
/// [`RATING_MAX`].
pub fn generate_profile(
    table: &PositionTable,
    names: &NamePool,
    position: Option<Position>,
    tier: Option<SkillTier>,
    rng: &mut impl Rng,
) -> AttributeProfile {
    let position = position.unwrap_or_else(|| Position::random(rng));

    let mut ratings = sample_ratings(table, position, tier, rng);
    apply_correlations(&mut ratings);

    let ranges = table.get(position);
    let height = ranges.height.sample(rng);
    let weight = ranges.weight.sample(rng);
    let name = names.generate(rng);

    AttributeProfile::new(name, position, ratings, height, weight)
}

/// Generate a player from caller-supplied position/tier codes, as an
/// outer layer receives them. Unknown codes fail with
/// [`CoreError::Validation`](crate::error::CoreError::Validation).
pub fn generate_profile_from_codes(
    table: &PositionTable,
    names: &NamePool,
    position: Option<&str>,
    tier: Option<&str>,
    rng: &mut impl Rng,
) -> Result<AttributeProfile> {
    let position = position.map(str::parse::<Position>).transpose()?;
    let tier = tier.map(str::parse::<SkillTier>).transpose()?;
    Ok(generate_profile(table, names, position, tier, rng))
}
