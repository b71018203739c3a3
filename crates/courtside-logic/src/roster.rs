//! Roster builder — assembles 15-player teams from the attribute generator.
//!
//! Two construction modes:
//! - [`build_roster`]: positional quota (2 per position) then unconstrained
//!   fill.
//! - [`build_tiered_roster`]: same slot order, but each slot also draws a
//!   [`SkillTier`] label from a shuffled pool, subject to per-roster caps.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TierCaps;
use crate::error::{CoreError, Result};
use crate::generator::generate_profile;
use crate::names::NamePool;
use crate::position::Position;
use crate::profile::AttributeProfile;
use crate::tables::PositionTable;
use crate::tier::{SkillTier, TierPool};

/// Maximum players on a roster.
pub const MAX_ROSTER_SIZE: usize = 15;

/// Team overall reported for a roster with no players.
pub const EMPTY_ROSTER_OVERALL: u8 = 60;

/// A named, ordered collection of players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub players: Vec<AttributeProfile>,
}

impl Roster {
    pub fn new(name: impl Into<String>, players: Vec<AttributeProfile>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Floor of the mean player overall, or [`EMPTY_ROSTER_OVERALL`].
    pub fn overall(&self) -> u8 {
        if self.players.is_empty() {
            return EMPTY_ROSTER_OVERALL;
        }
        let sum: u32 = self.players.iter().map(|p| p.overall as u32).sum();
        (sum / self.players.len() as u32) as u8
    }

    /// Number of players listed at a position.
    pub fn count_at(&self, position: Position) -> usize {
        self.players.iter().filter(|p| p.position == position).count()
    }
}

/// How many generator calls go to each position and how many are left
/// unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuota {
    pub per_position: usize,
    pub unconstrained: usize,
}

impl Default for RosterQuota {
    fn default() -> Self {
        Self {
            per_position: 2,
            unconstrained: 5,
        }
    }
}

impl RosterQuota {
    pub fn total(&self) -> usize {
        self.per_position * Position::ALL.len() + self.unconstrained
    }

    /// A quota must fill at least one slot and fit on a roster.
    pub fn validate(&self) -> Result<()> {
        let total = self.total();
        if total == 0 || total > MAX_ROSTER_SIZE {
            return Err(CoreError::Configuration(format!(
                "roster quota asks for {} players; a roster holds 1..={}",
                total, MAX_ROSTER_SIZE
            )));
        }
        Ok(())
    }

    /// Slot positions in fill order: forced positions first (PG ×n … C ×n),
    /// then `None` for each unconstrained slot.
    pub fn slots(&self) -> Vec<Option<Position>> {
        Position::ALL
            .iter()
            .flat_map(|p| std::iter::repeat(Some(*p)).take(self.per_position))
            .chain(std::iter::repeat(None).take(self.unconstrained))
            .collect()
    }
}

/// Build a roster with the positional quota and untiered players.
pub fn build_roster(
    name: &str,
    quota: &RosterQuota,
    table: &PositionTable,
    names: &NamePool,
    rng: &mut impl Rng,
) -> Result<Roster> {
    quota.validate()?;

    let players = quota
        .slots()
        .into_iter()
        .map(|slot| generate_profile(table, names, slot, None, rng))
        .collect();

    let roster = Roster::new(name, players);
    log::debug!(
        "built roster '{}' ({} players, overall {})",
        roster.name,
        roster.len(),
        roster.overall()
    );
    Ok(roster)
}

/// Draws tier labels from a shuffled pool while enforcing per-roster caps.
///
/// Labels that would exceed their cap are discarded and redrawn. When the
/// pool runs dry, or the redraw budget is spent, the draw falls back to
/// [`SkillTier::Mid`].
pub struct TierDrawer {
    pool: Vec<SkillTier>,
    caps: TierCaps,
    max_redraws: usize,
    elite: usize,
    good: usize,
}

impl TierDrawer {
    pub fn new(pool: &TierPool, caps: TierCaps, max_redraws: usize, rng: &mut impl Rng) -> Self {
        Self {
            pool: pool.shuffled(rng),
            caps,
            max_redraws,
            elite: 0,
            good: 0,
        }
    }

    /// Labels still in the pool.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    fn capped(&self, tier: SkillTier) -> bool {
        match tier {
            SkillTier::Elite => self.elite >= self.caps.elite,
            SkillTier::Good => self.good >= self.caps.good,
            SkillTier::Mid | SkillTier::Bad => false,
        }
    }

    /// Draw the next label for a roster slot.
    pub fn draw(&mut self, rng: &mut impl Rng) -> SkillTier {
        let mut chosen = None;
        for _ in 0..=self.max_redraws {
            if self.pool.is_empty() {
                break;
            }
            let tier = self.pool.swap_remove(rng.gen_range(0..self.pool.len()));
            if !self.capped(tier) {
                chosen = Some(tier);
                break;
            }
        }

        let tier = chosen.unwrap_or_else(|| {
            log::warn!("tier pool exhausted or capped out; falling back to mid");
            SkillTier::Mid
        });
        match tier {
            SkillTier::Elite => self.elite += 1,
            SkillTier::Good => self.good += 1,
            SkillTier::Mid | SkillTier::Bad => {}
        }
        tier
    }
}

/// Build a roster whose players are biased by a tier pool.
///
/// Positional slots are filled first, then unconstrained slots, all
/// consuming the same shrinking label pool.
#[allow(clippy::too_many_arguments)]
pub fn build_tiered_roster(
    name: &str,
    quota: &RosterQuota,
    pool: &TierPool,
    caps: TierCaps,
    max_redraws: usize,
    table: &PositionTable,
    names: &NamePool,
    rng: &mut impl Rng,
) -> Result<Roster> {
    quota.validate()?;

    let mut drawer = TierDrawer::new(pool, caps, max_redraws, rng);
    let mut players = Vec::with_capacity(quota.total());
    for slot in quota.slots() {
        let tier = drawer.draw(rng);
        players.push(generate_profile(table, names, slot, Some(tier), rng));
    }

    let roster = Roster::new(name, players);
    log::debug!(
        "built tiered roster '{}' ({} players, overall {}, {} labels unused)",
        roster.name,
        roster.len(),
        roster.overall(),
        drawer.remaining()
    );
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::Ratings;
    use crate::seeded_rng;

    fn fixture(name: &str, overall: u8) -> AttributeProfile {
        AttributeProfile::new(name, Position::SmallForward, Ratings::uniform(overall), 78, 210)
    }

    #[test]
    fn test_default_quota_shape() {
        let q = RosterQuota::default();
        assert_eq!(q.total(), 15);
        let slots = q.slots();
        assert_eq!(slots.len(), 15);
        assert_eq!(slots[0], Some(Position::PointGuard));
        assert_eq!(slots[1], Some(Position::PointGuard));
        assert_eq!(slots[9], Some(Position::Center));
        assert!(slots[10..].iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_build_roster_quota() {
        let mut rng = seeded_rng(100);
        let roster = build_roster(
            "Team 1",
            &RosterQuota::default(),
            &PositionTable::standard(),
            &NamePool::standard(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(roster.name, "Team 1");
        assert_eq!(roster.len(), 15);
        for pos in Position::ALL {
            assert!(roster.count_at(pos) >= 2, "{pos} under quota");
        }
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(roster.players[2 * i].position, *pos);
            assert_eq!(roster.players[2 * i + 1].position, *pos);
        }
    }

    #[test]
    fn test_unreachable_quota_fails_fast() {
        let mut rng = seeded_rng(1);
        let table = PositionTable::standard();
        let names = NamePool::standard();

        let too_big = RosterQuota {
            per_position: 3,
            unconstrained: 1,
        };
        let err = build_roster("X", &too_big, &table, &names, &mut rng).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));

        let empty = RosterQuota {
            per_position: 0,
            unconstrained: 0,
        };
        assert!(build_roster("X", &empty, &table, &names, &mut rng).is_err());
    }

    #[test]
    fn test_roster_overall() {
        let roster = Roster::new("R", vec![fixture("a", 60), fixture("b", 71)]);
        assert_eq!(roster.overall(), 65);
        assert_eq!(Roster::new("E", vec![]).overall(), EMPTY_ROSTER_OVERALL);
    }

    #[test]
    fn test_drawer_enforces_caps() {
        let mut rng = seeded_rng(9);
        let pool = TierPool::new(10, 10, 0, 0);
        let mut drawer = TierDrawer::new(&pool, TierCaps::default(), 64, &mut rng);

        let labels: Vec<SkillTier> = (0..15).map(|_| drawer.draw(&mut rng)).collect();
        let elite = labels.iter().filter(|t| **t == SkillTier::Elite).count();
        let good = labels.iter().filter(|t| **t == SkillTier::Good).count();
        let mid = labels.iter().filter(|t| **t == SkillTier::Mid).count();
        // The pool holds plenty of both, so each cap is reached exactly and
        // every remaining slot degrades to mid.
        assert_eq!(elite, 3);
        assert_eq!(good, 5);
        assert_eq!(mid, 15 - elite - good);
    }

    #[test]
    fn test_drawer_falls_back_to_mid_when_empty() {
        let mut rng = seeded_rng(4);
        let pool = TierPool::new(0, 0, 0, 1);
        let mut drawer = TierDrawer::new(&pool, TierCaps::default(), 16, &mut rng);
        assert_eq!(drawer.draw(&mut rng), SkillTier::Bad);
        assert_eq!(drawer.draw(&mut rng), SkillTier::Mid);
        assert_eq!(drawer.draw(&mut rng), SkillTier::Mid);
    }

    #[test]
    fn test_drawer_redraws_are_bounded() {
        let mut rng = seeded_rng(6);
        // Only elite labels and a zero cap: every draw is capped out.
        let pool = TierPool::new(100, 0, 0, 0);
        let caps = TierCaps { elite: 0, good: 0 };
        let mut drawer = TierDrawer::new(&pool, caps, 4, &mut rng);

        assert_eq!(drawer.draw(&mut rng), SkillTier::Mid);
        // 1 initial draw + 4 redraws consumed.
        assert_eq!(drawer.remaining(), 95);
    }

    #[test]
    fn test_tiered_roster() {
        let mut rng = seeded_rng(55);
        let roster = build_tiered_roster(
            "Conference 1 Team 1",
            &RosterQuota::default(),
            &TierPool::new(3, 5, 5, 2),
            TierCaps::default(),
            16,
            &PositionTable::standard(),
            &NamePool::standard(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(roster.len(), 15);
        for pos in Position::ALL {
            assert!(roster.count_at(pos) >= 2);
        }
    }

    #[test]
    fn test_strong_pool_beats_weak_pool() {
        let table = PositionTable::standard();
        let names = NamePool::standard();
        let mut rng = seeded_rng(31);
        let mut strong = 0u32;
        let mut weak = 0u32;
        for i in 0..10 {
            let s = build_tiered_roster(
                &format!("S{i}"),
                &RosterQuota::default(),
                &TierPool::new(3, 5, 5, 2),
                TierCaps::default(),
                16,
                &table,
                &names,
                &mut rng,
            )
            .unwrap();
            let w = build_tiered_roster(
                &format!("W{i}"),
                &RosterQuota::default(),
                &TierPool::new(1, 4, 6, 6),
                TierCaps::default(),
                16,
                &table,
                &names,
                &mut rng,
            )
            .unwrap();
            strong += s.overall() as u32;
            weak += w.overall() as u32;
        }
        assert!(strong > weak, "strong={strong} weak={weak}");
    }
}
