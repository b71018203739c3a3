//! Minute allocation: splits a team's 200 player-minutes across the roster.
//!
//! # Model
//!
//! - **Starters**: the best player (by overall) at each position, topped
//!   up with the best unused players until five are chosen.
//! - **Starter minutes**: `team_minutes × (overall / Σ starter overall) ×
//!   starter_share`.
//! - **Bench**: per position, a target of `slot_minutes − starter minutes`
//!   (floored at 0) is split by random positive weights across a random
//!   non-empty subset of that position's bench players.
//! - **Correction**: everything is rescaled to exactly `team_minutes`,
//!   rounded, and the rounding remainder is pushed onto the last player.
//!
//! A position with a starter but no bench players simply contributes no
//! bench minutes; its unused target is not handed to another position
//! (the final rescale spreads the gap proportionally over everyone).

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::{CoreError, Result};
use crate::position::Position;
use crate::roster::Roster;

/// Size of a starting lineup.
pub const STARTERS: usize = 5;

/// Minutes assigned to one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinuteShare {
    /// Index into the roster's player list.
    pub player: usize,
    /// Rescaled, unrounded minutes.
    pub exact: f64,
    /// Rounded minutes after drift correction.
    pub minutes: u32,
    pub starter: bool,
}

/// Playing time for one team in one game. Starters come first, then bench
/// players grouped by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinutePlan {
    pub shares: Vec<MinuteShare>,
}

impl MinutePlan {
    /// Sum of rounded minutes.
    pub fn total(&self) -> u32 {
        self.shares.iter().map(|s| s.minutes).sum()
    }

    /// Rounded minutes for a roster index, if the player plays.
    pub fn minutes_for(&self, player: usize) -> Option<u32> {
        self.shares
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.minutes)
    }

    pub fn starters(&self) -> impl Iterator<Item = &MinuteShare> {
        self.shares.iter().filter(|s| s.starter)
    }
}

/// Roster indices ordered by overall, best first. Ties keep roster order.
fn by_overall(roster: &Roster) -> Vec<usize> {
    let mut order: Vec<usize> = (0..roster.players.len()).collect();
    order.sort_by(|a, b| roster.players[*b].overall.cmp(&roster.players[*a].overall));
    order
}

/// Pick the starting five: best player per position in PG → C order,
/// then the best remaining players if a position is missing. Returns
/// fewer than five only when the roster is that small.
pub fn select_starters(roster: &Roster) -> Vec<usize> {
    let order = by_overall(roster);
    let mut starters: Vec<usize> = Position::ALL
        .iter()
        .filter_map(|pos| {
            order
                .iter()
                .copied()
                .find(|i| roster.players[*i].position == *pos)
        })
        .collect();

    for i in order {
        if starters.len() >= STARTERS {
            break;
        }
        if !starters.contains(&i) {
            starters.push(i);
        }
    }
    starters
}

fn check_starters(roster: &Roster, starters: &[usize]) -> Result<()> {
    if starters.is_empty() || starters.len() > STARTERS {
        return Err(CoreError::Configuration(format!(
            "a starting lineup needs 1..={} players, got {}",
            STARTERS,
            starters.len()
        )));
    }
    for (n, i) in starters.iter().enumerate() {
        if *i >= roster.players.len() {
            return Err(CoreError::Configuration(format!(
                "starter index {} is outside roster '{}' ({} players)",
                i,
                roster.name,
                roster.players.len()
            )));
        }
        if starters[..n].contains(i) {
            return Err(CoreError::Configuration(format!(
                "starter index {} listed twice",
                i
            )));
        }
    }
    Ok(())
}

/// Allocate minutes for a roster.
///
/// `starters` overrides the automatic lineup; `None` uses
/// [`select_starters`]. Fails with [`CoreError::Configuration`] for an
/// empty roster or a malformed lineup.
pub fn allocate_minutes(
    roster: &Roster,
    starters: Option<&[usize]>,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<MinutePlan> {
    if roster.is_empty() {
        return Err(CoreError::Configuration(format!(
            "roster '{}' has no players to allocate minutes to",
            roster.name
        )));
    }

    let starters = match starters {
        Some(s) => {
            check_starters(roster, s)?;
            s.to_vec()
        }
        None => select_starters(roster),
    };

    // Bench pools by position, best first.
    let mut bench: [Vec<usize>; 5] = Default::default();
    for i in by_overall(roster) {
        if !starters.contains(&i) {
            bench[roster.players[i].position.index()].push(i);
        }
    }

    // Starter minutes, weighted by overall.
    let starter_overall: u32 = starters
        .iter()
        .map(|i| roster.players[*i].overall as u32)
        .sum();
    let starter_minutes: Vec<f64> = starters
        .iter()
        .map(|i| {
            let weight = if starter_overall > 0 {
                roster.players[*i].overall as f64 / starter_overall as f64
            } else {
                1.0 / starters.len() as f64
            };
            config.team_minutes * weight * config.starter_share
        })
        .collect();

    // Bench minutes, per position.
    let mut bench_minutes: Vec<(usize, f64)> = Vec::new();
    for pos in Position::ALL {
        let pool = &bench[pos.index()];
        let starter_min = starters
            .iter()
            .position(|i| roster.players[*i].position == pos)
            .map(|n| starter_minutes[n])
            .unwrap_or(0.0);

        if pool.is_empty() {
            if starter_min > 0.0 {
                log::debug!(
                    "{}: no {} bench; {:.1} target minutes unused",
                    roster.name,
                    pos,
                    (config.slot_minutes - starter_min).max(0.0)
                );
            }
            continue;
        }

        let target = (config.slot_minutes - starter_min).max(0.0);
        let n_playing = rng.gen_range(1..=pool.len());
        let playing: Vec<usize> = pool.choose_multiple(rng, n_playing).copied().collect();
        // Weights in (0, 1].
        let weights: Vec<f64> = (0..n_playing).map(|_| 1.0 - rng.gen::<f64>()).collect();
        let weight_sum: f64 = weights.iter().sum();

        // Keep pool order so the plan lists bench players best-first.
        for i in pool.iter().copied() {
            if let Some(k) = playing.iter().position(|p| *p == i) {
                bench_minutes.push((i, target * weights[k] / weight_sum));
            }
        }
    }

    let mut entries: Vec<(usize, f64, bool)> = starters
        .iter()
        .zip(&starter_minutes)
        .map(|(i, m)| (*i, *m, true))
        .chain(bench_minutes.into_iter().map(|(i, m)| (i, m, false)))
        .collect();

    // Rescale to exactly team_minutes.
    let raw_total: f64 = entries.iter().map(|e| e.1).sum();
    let scale = if raw_total > 0.0 {
        config.team_minutes / raw_total
    } else {
        0.0
    };
    for e in entries.iter_mut() {
        e.1 *= scale;
    }

    let exact: Vec<f64> = entries.iter().map(|e| e.1).collect();
    let rounded = round_to_total(&exact, config.team_minutes.round() as i64);

    let shares: Vec<MinuteShare> = entries
        .iter()
        .zip(rounded)
        .map(|((player, exact, starter), minutes)| MinuteShare {
            player: *player,
            exact: *exact,
            minutes,
            starter: *starter,
        })
        .collect();

    log::debug!(
        "{}: starters {:?}, {} bench players used",
        roster.name,
        starters
            .iter()
            .map(|i| roster.players[*i].name.as_str())
            .collect::<Vec<_>>(),
        shares.len() - starters.len()
    );

    Ok(MinutePlan { shares })
}

/// Round each value (halves to even) and fix the drift so the result
/// sums to `total`.
///
/// The remainder is added to the last entry. If that would push the last
/// entry below zero, the part it cannot absorb moves to the entry before
/// it, and so on.
pub fn round_to_total(values: &[f64], total: i64) -> Vec<u32> {
    let mut rounded: Vec<i64> = values
        .iter()
        .map(|v| v.round_ties_even().max(0.0) as i64)
        .collect();
    let mut diff = total - rounded.iter().sum::<i64>();

    for slot in rounded.iter_mut().rev() {
        if diff == 0 {
            break;
        }
        let adjusted = *slot + diff;
        if adjusted >= 0 {
            *slot = adjusted;
            diff = 0;
        } else {
            diff = adjusted;
            *slot = 0;
        }
    }
    if diff != 0 {
        log::warn!("could not absorb {} minutes of rounding drift", diff);
    }

    rounded.into_iter().map(|m| m as u32).collect()
}
