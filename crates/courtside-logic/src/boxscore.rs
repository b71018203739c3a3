//! Box-score simulation for a single player in a single game.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::position::Position;
use crate::profile::AttributeProfile;

/// Minutes in one full game at one slot; stat rates are per 40 minutes.
const PER_GAME: f64 = 40.0;

/// One player's statistical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxScoreLine {
    /// Index into the roster's player list.
    pub player: usize,
    pub name: String,
    pub position: Position,
    pub minutes: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    /// Whether the breakout multiplier fired.
    pub breakout: bool,
}

/// Column sums of a team's box score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub minutes: u32,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
}

impl TeamTotals {
    pub fn from_lines(lines: &[BoxScoreLine]) -> Self {
        lines.iter().fold(Self::default(), |t, l| Self {
            minutes: t.minutes + l.minutes,
            points: t.points + l.points,
            rebounds: t.rebounds + l.rebounds,
            assists: t.assists + l.assists,
            steals: t.steals + l.steals,
            blocks: t.blocks + l.blocks,
            turnovers: t.turnovers + l.turnovers,
        })
    }
}

/// Weighted scoring ability before matchup and playing-time scaling.
pub fn scoring_skill(player: &AttributeProfile) -> f64 {
    let r = &player.ratings;
    r.close_shot as f64 * 0.25
        + r.driving_layup as f64 * 0.15
        + r.driving_dunk as f64 * 0.10
        + r.mid_range_shot as f64 * 0.20
        + r.three_point_shot as f64 * 0.20
        + r.free_throw as f64 * 0.10
}

/// Nearest whole stat, halves to even.
fn count(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

/// Simulate one player's line. `index` is the player's slot in its roster
/// and is carried onto the line unchanged.
///
/// `team_offense` is the team's matchup factor already multiplied by
/// [`SimConfig::offense_scale`]; `opponent_defense` is the opponent's raw
/// defense sum already multiplied by [`SimConfig::defense_scale`].
///
/// Random draws, in order: performance multiplier, breakout roll, and the
/// breakout multiplier when the roll hits.
pub fn simulate_player(
    player: &AttributeProfile,
    index: usize,
    minutes: u32,
    team_offense: f64,
    opponent_defense: f64,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> BoxScoreLine {
    let r = &player.ratings;
    let performance = rng.gen_range(config.performance_min..=config.performance_max);
    let share = minutes as f64 / PER_GAME;

    let productivity = scoring_skill(player) * performance * team_offense / (opponent_defense + 1.0);
    let mut points = productivity * share;
    let breakout = rng.gen_bool(config.breakout_chance);
    if breakout {
        points *= rng.gen_range(config.breakout_min..=config.breakout_max);
    }

    let rebounds = (r.offensive_rebounding as f64 * 0.4 + r.defensive_rebounding as f64 * 0.6)
        * performance
        / 10.0
        * share;
    let assists =
        (r.pass_accuracy as f64 * 0.3 + r.ball_handle as f64 * 0.2) * performance / 6.5 * share;
    let steals = r.steal as f64 * performance / 25.0 * share;
    let blocks = r.block as f64 * performance / 20.0 * share;
    let turnovers =
        share * (5.0 - (r.ball_handle as f64 + r.pass_accuracy as f64) / 50.0) * performance;

    BoxScoreLine {
        player: index,
        name: player.name.clone(),
        position: player.position,
        minutes,
        points: count(points),
        rebounds: count(rebounds),
        assists: count(assists),
        steals: count(steals),
        blocks: count(blocks),
        turnovers: count(turnovers),
        breakout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::Ratings;
    use crate::seeded_rng;

    fn steady() -> SimConfig {
        SimConfig {
            performance_min: 1.0,
            performance_max: 1.0,
            breakout_chance: 0.0,
            ..SimConfig::default()
        }
    }

    fn player(value: u8) -> AttributeProfile {
        AttributeProfile::new("Test Player", Position::SmallForward, Ratings::uniform(value), 79, 215)
    }

    #[test]
    fn test_scoring_weights_sum_to_one() {
        assert!((scoring_skill(&player(70)) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_line() {
        let mut rng = seeded_rng(1);
        // 70 × 10 / (4 + 1) = 140 per 40 minutes.
        let line = simulate_player(&player(70), 0, 40, 10.0, 4.0, &steady(), &mut rng);
        assert_eq!(line.minutes, 40);
        assert_eq!(line.points, 140);
        assert_eq!(line.rebounds, 7);
        assert_eq!(line.assists, 5); // 35 / 6.5 = 5.38
        assert_eq!(line.steals, 3); // 2.8
        assert_eq!(line.blocks, 4); // 3.5
        assert_eq!(line.turnovers, 2); // 5 − 2.8 = 2.2
        assert!(!line.breakout);
    }

    #[test]
    fn test_zero_minutes_is_empty_line() {
        let mut rng = seeded_rng(2);
        let line = simulate_player(&player(99), 0, 0, 20.0, 0.0, &SimConfig::default(), &mut rng);
        assert_eq!(
            (line.points, line.rebounds, line.assists, line.steals, line.blocks, line.turnovers),
            (0, 0, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_better_handling_means_fewer_turnovers() {
        let mut rng = seeded_rng(3);
        let mut sloppy = Ratings::uniform(60);
        sloppy.ball_handle = 1;
        sloppy.pass_accuracy = 1;
        let mut slick = sloppy;
        slick.ball_handle = 99;
        slick.pass_accuracy = 99;
        let sloppy = AttributeProfile::new("A", Position::PointGuard, sloppy, 73, 180);
        let slick = AttributeProfile::new("B", Position::PointGuard, slick, 73, 180);

        let a = simulate_player(&sloppy, 0, 40, 10.0, 50.0, &steady(), &mut rng);
        let b = simulate_player(&slick, 1, 40, 10.0, 50.0, &steady(), &mut rng);
        assert_eq!(a.turnovers, 5); // 5 − 0.04
        assert_eq!(b.turnovers, 1); // 5 − 3.96
    }

    #[test]
    fn test_breakout_always_fires_at_probability_one() {
        let config = SimConfig {
            breakout_chance: 1.0,
            performance_min: 1.0,
            performance_max: 1.0,
            ..SimConfig::default()
        };
        let mut rng = seeded_rng(4);
        for _ in 0..50 {
            let line = simulate_player(&player(70), 0, 40, 10.0, 4.0, &config, &mut rng);
            assert!(line.breakout);
            // 140 × [1.4, 1.8]
            assert!((196..=252).contains(&line.points), "{}", line.points);
        }
    }

    #[test]
    fn test_stronger_defense_lowers_points() {
        let config = steady();
        let mut rng = seeded_rng(5);
        let soft = simulate_player(&player(70), 0, 40, 10.0, 1.0, &config, &mut rng);
        let hard = simulate_player(&player(70), 0, 40, 10.0, 70.0, &config, &mut rng);
        assert!(hard.points < soft.points);
    }

    #[test]
    fn test_team_totals() {
        let mut rng = seeded_rng(6);
        let lines: Vec<_> = (0..3)
            .map(|i| simulate_player(&player(60), i, 30, 9.0, 50.0, &steady(), &mut rng))
            .collect();
        let t = TeamTotals::from_lines(&lines);
        assert_eq!(t.minutes, 90);
        assert_eq!(t.points, lines.iter().map(|l| l.points).sum::<u32>());
        assert_eq!(t.rebounds, 3 * lines[0].rebounds);
    }

    #[test]
    fn test_line_carries_roster_index() {
        let mut rng = seeded_rng(7);
        let line = simulate_player(&player(70), 11, 40, 10.0, 4.0, &steady(), &mut rng);
        assert_eq!(line.player, 11);
        assert_eq!(line.name, "Test Player");
    }

    #[test]
    fn test_count_rounds_halves_to_even() {
        assert_eq!(count(2.5), 2);
        assert_eq!(count(3.5), 4);
        assert_eq!(count(2.6), 3);
        assert_eq!(count(-0.4), 0);
    }
}
