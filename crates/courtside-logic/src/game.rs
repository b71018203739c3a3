//! Full game flow: matchup → minutes → box scores → result.
//!
//! [`simulate_game`] runs one game on a caller-supplied random source.
//! [`simulate_slate`] runs many independent games in parallel, each on its
//! own [`game_rng`](crate::game_rng) stream, so the output for a given seed
//! does not depend on thread scheduling.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::boxscore::{simulate_player, BoxScoreLine, TeamTotals};
use crate::config::SimConfig;
use crate::error::{CoreError, Result};
use crate::matchup::{evaluate, matchup_factors, MatchupFactor};
use crate::minutes::{allocate_minutes, STARTERS};
use crate::roster::Roster;

/// Fewest players a roster may bring to a game.
pub const MIN_GAME_ROSTER: usize = STARTERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub home_box: Vec<BoxScoreLine>,
    pub away_box: Vec<BoxScoreLine>,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: Side,
}

impl GameResult {
    pub fn box_score(&self, side: Side) -> &[BoxScoreLine] {
        match side {
            Side::Home => &self.home_box,
            Side::Away => &self.away_box,
        }
    }

    pub fn totals(&self, side: Side) -> TeamTotals {
        TeamTotals::from_lines(self.box_score(side))
    }

    pub fn winner_name(&self) -> &str {
        match self.winner {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Winning margin in points (0 for a tie).
    pub fn margin(&self) -> u32 {
        self.home_score.abs_diff(self.away_score)
    }
}

fn check_roster(roster: &Roster) -> Result<()> {
    if roster.len() < MIN_GAME_ROSTER {
        return Err(CoreError::Configuration(format!(
            "roster '{}' has {} players; a game needs at least {}",
            roster.name,
            roster.len(),
            MIN_GAME_ROSTER
        )));
    }
    Ok(())
}

/// Allocate minutes for one team and simulate every player who plays.
fn simulate_team(
    roster: &Roster,
    factor: &MatchupFactor,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<Vec<BoxScoreLine>> {
    let team_offense = factor.offense_factor * config.offense_scale;
    let opponent_defense = factor.opponent_defense as f64 * config.defense_scale;

    let plan = allocate_minutes(roster, None, config, rng)?;
    Ok(plan
        .shares
        .iter()
        .map(|share| {
            simulate_player(
                &roster.players[share.player],
                share.player,
                share.minutes,
                team_offense,
                opponent_defense,
                config,
                rng,
            )
        })
        .collect())
}

/// Simulate a game between two rosters. The home team wins ties.
///
/// Fails with [`CoreError::Configuration`] when either roster has fewer than
/// [`MIN_GAME_ROSTER`] players or `config` is invalid.
pub fn simulate_game(
    home: &Roster,
    away: &Roster,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<GameResult> {
    config.validate()?;
    check_roster(home)?;
    check_roster(away)?;

    let (home_factor, away_factor) =
        matchup_factors(&evaluate(home), &evaluate(away), config.matchup_damping);
    log::debug!(
        "{} vs {}: offense factors {:.4} / {:.4}",
        home.name,
        away.name,
        home_factor.offense_factor,
        away_factor.offense_factor
    );

    let home_box = simulate_team(home, &home_factor, config, rng)?;
    let away_box = simulate_team(away, &away_factor, config, rng)?;

    let home_score: u32 = home_box.iter().map(|l| l.points).sum();
    let away_score: u32 = away_box.iter().map(|l| l.points).sum();
    let winner = if home_score >= away_score {
        Side::Home
    } else {
        Side::Away
    };

    let result = GameResult {
        home_team: home.name.clone(),
        away_team: away.name.clone(),
        home_box,
        away_box,
        home_score,
        away_score,
        winner,
    };
    log::info!(
        "{} {} - {} {} (winner: {})",
        result.home_team,
        result.home_score,
        result.away_score,
        result.away_team,
        result.winner_name()
    );
    Ok(result)
}

/// Simulate independent games in parallel. Game `i` uses
/// `game_rng(seed, i)`, so results match a sequential run with the same
/// seed.
pub fn simulate_slate(
    matchups: &[(&Roster, &Roster)],
    config: &SimConfig,
    seed: u64,
) -> Result<Vec<GameResult>> {
    matchups
        .par_iter()
        .enumerate()
        .map(|(i, (home, away))| {
            let mut rng = crate::game_rng(seed, i as u64);
            simulate_game(home, away, config, &mut rng)
        })
        .collect()
}
