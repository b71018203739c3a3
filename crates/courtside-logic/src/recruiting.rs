//! Recruiting classes: batches of unattached players tagged with a year.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::generate_profile;
use crate::names::NamePool;
use crate::profile::AttributeProfile;
use crate::tables::PositionTable;

/// Players in a class when the caller does not ask for a size.
pub const DEFAULT_CLASS_SIZE: usize = 10;

/// A year's crop of recruits, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitingClass {
    pub year: u16,
    pub players: Vec<AttributeProfile>,
}

impl RecruitingClass {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players ordered by potential, highest first. Equal potential keeps
    /// generation order.
    pub fn ranked(&self) -> Vec<&AttributeProfile> {
        let mut ranked: Vec<&AttributeProfile> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.ratings.potential.cmp(&a.ratings.potential));
        ranked
    }
}

/// Generate `count` recruits for `year`. Each one gets a random position
/// and no tier, exactly as a standalone [`generate_profile`] call would.
pub fn generate_recruiting_class(
    count: usize,
    year: u16,
    table: &PositionTable,
    names: &NamePool,
    rng: &mut impl Rng,
) -> RecruitingClass {
    let players: Vec<AttributeProfile> = (0..count)
        .map(|_| generate_profile(table, names, None, None, rng))
        .collect();
    log::info!("generated {} class of {} recruits", year, players.len());
    RecruitingClass { year, players }
}
