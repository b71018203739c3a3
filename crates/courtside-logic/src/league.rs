//! League construction: conferences of skill-tiered rosters.
//!
//! A conference's tier pool sets its overall level. The default setup is
//! one strong and one weak conference of five teams each.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{CoreError, Result};
use crate::names::NamePool;
use crate::roster::{build_roster, build_tiered_roster, Roster, RosterQuota};
use crate::tables::PositionTable;
use crate::tier::TierPool;

/// One conference's recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceConfig {
    pub name: String,
    /// Descriptive strength label carried onto the built conference.
    pub strength: f64,
    /// Base tier pool; every team draws from its own shuffled copy.
    pub pool: TierPool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub conferences: Vec<ConferenceConfig>,
    pub teams_per_conference: usize,
    pub quota: RosterQuota,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            conferences: vec![
                ConferenceConfig {
                    name: "Conference 1".into(),
                    strength: 1.0,
                    pool: TierPool::new(3, 5, 5, 2),
                },
                ConferenceConfig {
                    name: "Conference 2".into(),
                    strength: 0.8,
                    pool: TierPool::new(1, 4, 6, 6),
                },
            ],
            teams_per_conference: 5,
            quota: RosterQuota::default(),
        }
    }
}

impl LeagueConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LeagueConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.conferences.is_empty() {
            return Err(CoreError::Configuration(
                "a league needs at least one conference".into(),
            ));
        }
        if self.teams_per_conference == 0 {
            return Err(CoreError::Configuration(
                "teams_per_conference must be at least 1".into(),
            ));
        }
        self.quota.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    pub name: String,
    pub strength: f64,
    pub teams: Vec<Roster>,
}

impl Conference {
    /// Mean team overall, floored. `None` for a conference with no teams.
    pub fn average_overall(&self) -> Option<u8> {
        if self.teams.is_empty() {
            return None;
        }
        let sum: u32 = self.teams.iter().map(|t| t.overall() as u32).sum();
        Some((sum / self.teams.len() as u32) as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    pub conferences: Vec<Conference>,
}

impl League {
    /// Every team, conference by conference.
    pub fn teams(&self) -> impl Iterator<Item = &Roster> {
        self.conferences.iter().flat_map(|c| c.teams.iter())
    }

    pub fn team(&self, name: &str) -> Option<&Roster> {
        self.teams().find(|t| t.name == name)
    }

    pub fn team_count(&self) -> usize {
        self.conferences.iter().map(|c| c.teams.len()).sum()
    }
}

/// Build a league of tiered rosters named `"<conference> Team <i>"`.
/// Tier caps and the redraw bound come from `sim`.
pub fn build_league(
    name: &str,
    config: &LeagueConfig,
    sim: &SimConfig,
    table: &PositionTable,
    names: &NamePool,
    rng: &mut impl Rng,
) -> Result<League> {
    config.validate()?;

    let mut conferences = Vec::with_capacity(config.conferences.len());
    for conf in &config.conferences {
        let teams = (1..=config.teams_per_conference)
            .map(|i| {
                build_tiered_roster(
                    &format!("{} Team {}", conf.name, i),
                    &config.quota,
                    &conf.pool,
                    sim.tier_caps,
                    sim.max_tier_redraws,
                    table,
                    names,
                    rng,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        conferences.push(Conference {
            name: conf.name.clone(),
            strength: conf.strength,
            teams,
        });
    }

    let league = League {
        name: name.to_string(),
        conferences,
    };
    for conf in &league.conferences {
        log::info!(
            "{}: {} teams, average overall {}",
            conf.name,
            conf.teams.len(),
            conf.average_overall().unwrap_or_default()
        );
    }
    log::info!("built league '{}' ({} teams)", league.name, league.team_count());
    Ok(league)
}

/// Build `count` untiered rosters named `"Team 1"` … `"Team N"` with the
/// default quota.
pub fn build_balanced_teams(
    count: usize,
    table: &PositionTable,
    names: &NamePool,
    rng: &mut impl Rng,
) -> Result<Vec<Roster>> {
    let quota = RosterQuota::default();
    let teams = (1..=count)
        .map(|i| build_roster(&format!("Team {}", i), &quota, table, names, rng))
        .collect::<Result<Vec<_>>>()?;
    log::info!("built {} balanced teams", teams.len());
    Ok(teams)
}
