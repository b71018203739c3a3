//! Pure basketball logic for Courtside.
//!
//! This crate contains player generation and game simulation with no
//! database, network, or runtime attached. Functions take plain data plus an
//! explicit random source and return results, making them unit-testable and
//! reproducible under a fixed seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`position`] | The five positions and their codes |
//! | [`ratings`] | The 21 rating fields and the rating record |
//! | [`tables`] | Per-position rating, height, and weight ranges |
//! | [`names`] | First/last name pools |
//! | [`tier`] | Skill-tier labels, range remapping, tier pools |
//! | [`profile`] | Player profiles, overall, specialization, stars |
//! | [`generator`] | Attribute generation and correlation rules |
//! | [`roster`] | Quota and skill-tiered roster building |
//! | [`matchup`] | Team offense/defense sums and matchup factors |
//! | [`minutes`] | Starter selection and 200-minute allocation |
//! | [`boxscore`] | Per-player box-score simulation |
//! | [`game`] | Full game flow and parallel slates |
//! | [`league`] | Conference/league construction |
//! | [`recruiting`] | Year-tagged recruiting classes |
//! | [`config`] | Simulation calibration constants |
//! | [`error`] | Crate error type |
//!
//! # Example
//!
//! ```
//! use courtside_logic::{build_roster, simulate_game, seeded_rng};
//! use courtside_logic::{NamePool, PositionTable, RosterQuota, SimConfig};
//!
//! let table = PositionTable::standard();
//! let names = NamePool::standard();
//! let mut rng = seeded_rng(7);
//!
//! let home = build_roster("Home", &RosterQuota::default(), &table, &names, &mut rng).unwrap();
//! let away = build_roster("Away", &RosterQuota::default(), &table, &names, &mut rng).unwrap();
//! let game = simulate_game(&home, &away, &SimConfig::default(), &mut rng).unwrap();
//! assert_eq!(game.home_score, game.home_box.iter().map(|l| l.points).sum::<u32>());
//! ```

pub mod boxscore;
pub mod config;
pub mod error;
pub mod game;
pub mod generator;
pub mod league;
pub mod matchup;
pub mod minutes;
pub mod names;
pub mod position;
pub mod profile;
pub mod ratings;
pub mod recruiting;
pub mod roster;
pub mod tables;
pub mod tier;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use boxscore::{BoxScoreLine, TeamTotals};
pub use config::{SimConfig, TierCaps};
pub use error::{CoreError, Result};
pub use game::{simulate_game, simulate_slate, GameResult, Side};
pub use generator::{generate_profile, generate_profile_from_codes};
pub use league::{build_balanced_teams, build_league, League, LeagueConfig};
pub use matchup::{evaluate as evaluate_matchup, TeamStrength};
pub use minutes::{allocate_minutes, MinutePlan};
pub use names::NamePool;
pub use position::Position;
pub use profile::AttributeProfile;
pub use ratings::{RatingField, Ratings};
pub use recruiting::{generate_recruiting_class, RecruitingClass};
pub use roster::{build_roster, build_tiered_roster, Roster, RosterQuota};
pub use tables::PositionTable;
pub use tier::{SkillTier, TierPool};

/// Reproducible random source for a seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Independent random stream for game `index` under `seed`. Streams for
/// different indices never overlap, so games can run on any thread.
pub fn game_rng(seed: u64, index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);
    rng
}
