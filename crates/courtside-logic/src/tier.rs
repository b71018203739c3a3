//! Skill tiers — labels that bias a generated player's ratings.
//!
//! A tier narrows each field's sampling interval to a window inside the
//! position's configured range. The configured range is always the outer
//! envelope, so a tiered player is still a legal player for the position.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tables::Bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTier {
    Elite,
    Good,
    Mid,
    Bad,
}

impl SkillTier {
    pub const ALL: [SkillTier; 4] = [
        SkillTier::Elite,
        SkillTier::Good,
        SkillTier::Mid,
        SkillTier::Bad,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillTier::Elite => "elite",
            SkillTier::Good => "good",
            SkillTier::Mid => "mid",
            SkillTier::Bad => "bad",
        }
    }

    /// Fractions of a range's span that this tier samples from.
    pub fn window_fractions(self) -> (f64, f64) {
        match self {
            SkillTier::Elite => (0.65, 1.0),
            SkillTier::Good => (0.45, 0.90),
            SkillTier::Mid => (0.20, 0.75),
            SkillTier::Bad => (0.0, 0.45),
        }
    }

    /// Remap a configured range to this tier's sampling window.
    pub fn remap(self, bounds: Bounds) -> Bounds {
        let (lo, hi) = self.window_fractions();
        bounds.window(lo, hi)
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SkillTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elite" => Ok(SkillTier::Elite),
            "good" => Ok(SkillTier::Good),
            "mid" => Ok(SkillTier::Mid),
            "bad" => Ok(SkillTier::Bad),
            _ => Err(CoreError::Validation(format!(
                "unrecognized skill tier '{}'",
                s
            ))),
        }
    }
}

/// A multiset of tier labels, written as counts per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPool {
    pub counts: BTreeMap<SkillTier, usize>,
}

impl TierPool {
    pub fn new(elite: usize, good: usize, mid: usize, bad: usize) -> Self {
        let counts = [
            (SkillTier::Elite, elite),
            (SkillTier::Good, good),
            (SkillTier::Mid, mid),
            (SkillTier::Bad, bad),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect();
        Self { counts }
    }

    pub fn count(&self, tier: SkillTier) -> usize {
        self.counts.get(&tier).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand to individual labels and shuffle them.
    pub fn shuffled(&self, rng: &mut impl Rng) -> Vec<SkillTier> {
        let mut labels: Vec<SkillTier> = SkillTier::ALL
            .iter()
            .flat_map(|t| std::iter::repeat(*t).take(self.count(*t)))
            .collect();
        labels.shuffle(rng);
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn test_parse_labels() {
        for tier in SkillTier::ALL {
            assert_eq!(tier.label().parse::<SkillTier>().unwrap(), tier);
        }
        assert_eq!("ELITE".parse::<SkillTier>().unwrap(), SkillTier::Elite);
        assert!(matches!(
            "legendary".parse::<SkillTier>(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_remap_orders_tiers() {
        let b = Bounds::new(35, 95);
        let elite = SkillTier::Elite.remap(b);
        let good = SkillTier::Good.remap(b);
        let mid = SkillTier::Mid.remap(b);
        let bad = SkillTier::Bad.remap(b);

        assert_eq!(elite.high, 95);
        assert_eq!(bad.low, 35);
        assert!(elite.low > good.low && good.low > mid.low && mid.low > bad.low);
        for w in [elite, good, mid, bad] {
            assert!(w.low >= b.low && w.high <= b.high && w.low <= w.high);
        }
    }

    #[test]
    fn test_pool_expansion() {
        let pool = TierPool::new(3, 5, 5, 2);
        assert_eq!(pool.len(), 15);

        let mut rng = seeded_rng(11);
        let labels = pool.shuffled(&mut rng);
        assert_eq!(labels.len(), 15);
        assert_eq!(labels.iter().filter(|t| **t == SkillTier::Elite).count(), 3);
        assert_eq!(labels.iter().filter(|t| **t == SkillTier::Bad).count(), 2);
    }

    #[test]
    fn test_empty_pool() {
        let pool = TierPool::new(0, 0, 0, 0);
        assert!(pool.is_empty());
        assert!(pool.shuffled(&mut seeded_rng(1)).is_empty());
    }
}
