//! Matchup evaluator — collapses a roster into offense/defense sums.
//!
//! ```
//! use courtside_logic::matchup::{offensive_factor, TeamStrength};
//!
//! let home = TeamStrength { offense: 5000, defense: 4500 };
//! let away = TeamStrength { offense: 4800, defense: 4700 };
//! let f = offensive_factor(&home, &away, 50.0);
//! assert!((f - 5000.0 / 9750.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::roster::Roster;

/// Aggregate offensive and defensive strength of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStrength {
    /// Σ (three_point + mid_range + close_shot + driving_layup + driving_dunk)
    pub offense: u32,
    /// Σ (perimeter_def + interior_def + steal + block + defensive_rebounding)
    pub defense: u32,
}

/// Per-team matchup factors for one game. Derived fresh each game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupFactor {
    /// `own_offense / (own_offense + opp_defense + damping)`
    pub offense_factor: f64,
    /// The opponent's raw defense sum.
    pub opponent_defense: u32,
}

/// Sum offense and defense over every rostered player.
pub fn evaluate(roster: &Roster) -> TeamStrength {
    roster
        .players
        .iter()
        .fold(TeamStrength { offense: 0, defense: 0 }, |acc, p| TeamStrength {
            offense: acc.offense + p.offense_sum(),
            defense: acc.defense + p.defense_sum(),
        })
}

/// Offensive factor of `own` against `opponent`. The additive `damping`
/// keeps the ratio finite for empty or zero-rated rosters.
pub fn offensive_factor(own: &TeamStrength, opponent: &TeamStrength, damping: f64) -> f64 {
    own.offense as f64 / (own.offense as f64 + opponent.defense as f64 + damping)
}

/// Both teams' factors for a home/away pairing.
pub fn matchup_factors(
    home: &TeamStrength,
    away: &TeamStrength,
    damping: f64,
) -> (MatchupFactor, MatchupFactor) {
    (
        MatchupFactor {
            offense_factor: offensive_factor(home, away, damping),
            opponent_defense: away.defense,
        },
        MatchupFactor {
            offense_factor: offensive_factor(away, home, damping),
            opponent_defense: home.defense,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::profile::AttributeProfile;
    use crate::ratings::Ratings;

    fn uniform_roster(value: u8, size: usize) -> Roster {
        let players = (0..size)
            .map(|i| {
                AttributeProfile::new(
                    format!("P{i}"),
                    Position::ALL[i % 5],
                    Ratings::uniform(value),
                    78,
                    210,
                )
            })
            .collect();
        Roster::new("U", players)
    }

    #[test]
    fn test_evaluate_sums() {
        let s = evaluate(&uniform_roster(70, 15));
        assert_eq!(s.offense, 15 * 5 * 70);
        assert_eq!(s.defense, 15 * 5 * 70);
    }

    #[test]
    fn test_evaluate_separates_offense_and_defense() {
        let mut r = Ratings::uniform(10);
        r.three_point_shot = 90;
        r.steal = 50;
        r.free_throw = 99; // not part of either sum
        let roster = Roster::new(
            "S",
            vec![AttributeProfile::new("X", Position::PointGuard, r, 72, 180)],
        );
        let s = evaluate(&roster);
        assert_eq!(s.offense, 90 + 4 * 10);
        assert_eq!(s.defense, 50 + 4 * 10);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let roster = uniform_roster(63, 15);
        assert_eq!(evaluate(&roster), evaluate(&roster));
    }

    #[test]
    fn test_empty_roster_factor_is_finite() {
        let empty = evaluate(&Roster::new("E", vec![]));
        assert_eq!(empty, TeamStrength { offense: 0, defense: 0 });
        let f = offensive_factor(&empty, &empty, 50.0);
        assert_eq!(f, 0.0);
        assert!(f.is_finite());
    }

    #[test]
    fn test_factor_decreases_with_opponent_defense() {
        let own = TeamStrength { offense: 5000, defense: 0 };
        let soft = TeamStrength { offense: 0, defense: 1000 };
        let hard = TeamStrength { offense: 0, defense: 7000 };
        assert!(offensive_factor(&own, &soft, 50.0) > offensive_factor(&own, &hard, 50.0));
    }

    #[test]
    fn test_matchup_factors_pairing() {
        let home = TeamStrength { offense: 5250, defense: 5000 };
        let away = TeamStrength { offense: 4000, defense: 6000 };
        let (h, a) = matchup_factors(&home, &away, 50.0);
        assert_eq!(h.opponent_defense, 6000);
        assert_eq!(a.opponent_defense, 5000);
        assert!((h.offense_factor - 5250.0 / 11300.0).abs() < 1e-12);
        assert!((a.offense_factor - 4000.0 / 9050.0).abs() < 1e-12);
    }
}
