//! Courtside Headless Simulation Harness
//!
//! Builds a seeded league, generates players and a recruiting class,
//! allocates minutes and simulates a slate of games, checking the
//! invariants of each stage.
//! Runs entirely in-process with no database or network.
//!
//! Usage:
//!   cargo run -p courtside-simtest
//!   cargo run -p courtside-simtest -- --verbose --seed 7 --games 40
//!   cargo run -p courtside-simtest -- --dump-game

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use courtside_logic::game::{simulate_slate, GameResult, Side};
use courtside_logic::generator::generate_profile;
use courtside_logic::league::{build_league, League, LeagueConfig};
use courtside_logic::matchup::evaluate;
use courtside_logic::minutes::allocate_minutes;
use courtside_logic::names::NamePool;
use courtside_logic::position::Position;
use courtside_logic::profile::{overall, SPECIALIZATION_SIZE};
use courtside_logic::ratings::RATING_MAX;
use courtside_logic::recruiting::{generate_recruiting_class, DEFAULT_CLASS_SIZE};
use courtside_logic::roster::Roster;
use courtside_logic::tables::PositionTable;
use courtside_logic::tier::SkillTier;
use courtside_logic::{seeded_rng, SimConfig};

// ── League recipe (bundled JSON) ────────────────────────────────────────
const LEAGUE_JSON: &str = include_str!("../../../data/league.json");

/// Profiles generated per position and tier in the generation sweep.
const PROFILES_PER_CELL: usize = 200;

#[derive(Parser)]
#[command(name = "courtside-simtest")]
#[command(about = "Headless validation harness for Courtside generation and game logic")]
#[command(version)]
struct Cli {
    /// Print every check, and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for league construction and the game slate
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of games in the slate
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Year stamped on the generated recruiting class
    #[arg(long, default_value_t = 2025)]
    class_year: u16,

    /// Print the first game of the slate as JSON
    #[arg(long)]
    dump_game: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    println!("=== Courtside Simulation Harness (seed {}) ===\n", cli.seed);

    let table = PositionTable::standard();
    let names = NamePool::standard();
    let config = SimConfig::default();

    let mut results = Vec::new();

    // 1. Configuration
    let league_config = match LeagueConfig::from_json(LEAGUE_JSON) {
        Ok(c) => {
            results.push(TestResult::new(
                "league_config_parse",
                true,
                format!("{} conferences", c.conferences.len()),
            ));
            c
        }
        Err(e) => {
            results.push(TestResult::new("league_config_parse", false, e.to_string()));
            LeagueConfig::default()
        }
    };
    results.extend(validate_configuration(&table, &names, &config, &league_config));

    // 2. Player generation sweep
    results.extend(validate_generation(&table, &names, cli.seed, cli.verbose));

    // 3. Recruiting class
    results.extend(validate_recruiting(&table, &names, cli.seed, cli.class_year, cli.verbose));

    // 4. League and rosters
    let mut rng = seeded_rng(cli.seed);
    let league = match build_league("Harness League", &league_config, &config, &table, &names, &mut rng)
    {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult::new("league_build", false, e.to_string()));
            return finish(results, cli.verbose);
        }
    };
    results.extend(validate_league(&league, &league_config, cli.verbose));

    // 5. Minute allocation
    results.extend(validate_minutes(&league, &config, cli.seed));

    // 6. Game slate
    let teams: Vec<&Roster> = league.teams().collect();
    let matchups = schedule(&teams, cli.games);
    match simulate_slate(&matchups, &config, cli.seed) {
        Ok(games) => {
            results.extend(validate_games(&matchups, &games, cli.verbose));

            // 7. Determinism
            let rerun = simulate_slate(&matchups, &config, cli.seed);
            let same = rerun.as_ref().map(|r| *r == games).unwrap_or(false);
            results.push(TestResult::new(
                "slate_deterministic",
                same,
                if same {
                    "rerun with the same seed matched".to_string()
                } else {
                    "rerun with the same seed diverged".to_string()
                },
            ));

            if cli.dump_game {
                dump_first_game(&games);
            }
        }
        Err(e) => results.push(TestResult::new("slate_simulate", false, e.to_string())),
    }

    finish(results, cli.verbose);
}

fn finish(results: Vec<TestResult>, verbose: bool) {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    tracing::info!(passed, failed, "harness finished");

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(
    table: &PositionTable,
    names: &NamePool,
    config: &SimConfig,
    league: &LeagueConfig,
) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let checks = [
        ("position_table_valid", table.validate()),
        ("name_pool_valid", names.validate()),
        ("sim_config_valid", config.validate()),
        ("league_config_valid", league.validate()),
    ];
    checks
        .into_iter()
        .map(|(name, outcome)| match outcome {
            Ok(()) => TestResult::new(name, true, "ok"),
            Err(e) => TestResult::new(name, false, e.to_string()),
        })
        .collect()
}

// ── 2. Player Generation ────────────────────────────────────────────────

fn validate_generation(
    table: &PositionTable,
    names: &NamePool,
    seed: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Player Generation ---");
    let mut results = Vec::new();
    let mut rng = seeded_rng(seed ^ 0x5eed);

    let tiers = [
        None,
        Some(SkillTier::Elite),
        Some(SkillTier::Good),
        Some(SkillTier::Mid),
        Some(SkillTier::Bad),
    ];

    let mut out_of_bounds = 0usize;
    let mut bad_overall = 0usize;
    let mut bad_specialization = 0usize;
    let mut generated = 0usize;
    let mut tier_means = Vec::new();

    for tier in tiers {
        let mut overall_sum = 0u64;
        for pos in Position::ALL {
            for _ in 0..PROFILES_PER_CELL {
                let p = generate_profile(table, names, Some(pos), tier, &mut rng);
                generated += 1;
                overall_sum += p.overall as u64;

                let ranges = table.get(pos);
                let in_bounds = p.ratings.iter().all(|(field, value)| {
                    value as u16 >= ranges.rating(field).low && value <= RATING_MAX
                }) && ranges.height.contains(p.height)
                    && ranges.weight.contains(p.weight);
                if !in_bounds {
                    out_of_bounds += 1;
                }
                if p.overall != overall(&p.ratings) {
                    bad_overall += 1;
                }
                if p.specialization.len() != SPECIALIZATION_SIZE
                    || !p.specialization.iter().all(|f| f.is_skill())
                {
                    bad_specialization += 1;
                }
            }
        }
        let mean = overall_sum as f64 / (PROFILES_PER_CELL * Position::ALL.len()) as f64;
        if verbose {
            let label = tier.map(|t| t.label()).unwrap_or("untiered");
            println!("  {:<9} mean overall {:.1}", label, mean);
        }
        tier_means.push(mean);
    }

    results.push(TestResult::new(
        "ratings_within_bounds",
        out_of_bounds == 0,
        format!("{} of {} profiles out of bounds", out_of_bounds, generated),
    ));
    results.push(TestResult::new(
        "overall_is_floored_mean",
        bad_overall == 0,
        format!("{} mismatches", bad_overall),
    ));
    results.push(TestResult::new(
        "specialization_shape",
        bad_specialization == 0,
        format!("{} malformed", bad_specialization),
    ));

    // Order of tiers above: untiered, elite, good, mid, bad.
    let ordered = tier_means[1] > tier_means[2]
        && tier_means[2] > tier_means[3]
        && tier_means[3] > tier_means[4];
    results.push(TestResult::new(
        "tier_means_ordered",
        ordered,
        format!(
            "elite {:.1} > good {:.1} > mid {:.1} > bad {:.1}",
            tier_means[1], tier_means[2], tier_means[3], tier_means[4]
        ),
    ));

    results
}

// ── 3. Recruiting ───────────────────────────────────────────────────────

fn validate_recruiting(
    table: &PositionTable,
    names: &NamePool,
    seed: u64,
    year: u16,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Recruiting Class ---");
    let mut rng = seeded_rng(seed ^ 0xc1a55);
    let class = generate_recruiting_class(DEFAULT_CLASS_SIZE, year, table, names, &mut rng);
    let mut results = Vec::new();

    results.push(TestResult::new(
        "recruiting_class_shape",
        class.len() == DEFAULT_CLASS_SIZE && class.year == year,
        format!("{} recruits for {}", class.len(), class.year),
    ));

    let out_of_bounds = class
        .players
        .iter()
        .filter(|p| {
            let ranges = table.get(p.position);
            !(p.ratings.iter().all(|(field, value)| {
                value as u16 >= ranges.rating(field).low && value <= RATING_MAX
            }) && ranges.height.contains(p.height)
                && ranges.weight.contains(p.weight))
        })
        .count();
    results.push(TestResult::new(
        "recruits_within_bounds",
        out_of_bounds == 0,
        format!("{} of {} recruits out of bounds", out_of_bounds, class.len()),
    ));

    let ranked = class.ranked();
    let sorted = ranked
        .windows(2)
        .all(|w| w[0].ratings.potential >= w[1].ratings.potential);
    results.push(TestResult::new(
        "recruits_ranked_by_potential",
        sorted && ranked.len() == class.len(),
        "ranked() is non-increasing in potential",
    ));

    if verbose {
        for p in ranked {
            println!(
                "  {:<22} {} pot {:>2}  ovr {:>2}  {}*",
                p.name,
                p.position,
                p.ratings.potential,
                p.overall,
                p.star_rating()
            );
        }
    }

    results
}

// ── 4. League ───────────────────────────────────────────────────────────

fn validate_league(league: &League, config: &LeagueConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- League ---");
    let mut results = Vec::new();

    let expected = config.conferences.len() * config.teams_per_conference;
    results.push(TestResult::new(
        "league_team_count",
        league.team_count() == expected,
        format!("{} teams (expected {})", league.team_count(), expected),
    ));

    let quota_total = config.quota.total();
    let short: Vec<&str> = league
        .teams()
        .filter(|t| {
            t.len() != quota_total
                || Position::ALL
                    .iter()
                    .any(|p| t.count_at(*p) < config.quota.per_position)
        })
        .map(|t| t.name.as_str())
        .collect();
    results.push(TestResult::new(
        "rosters_meet_quota",
        short.is_empty(),
        if short.is_empty() {
            format!("every roster has {} players", quota_total)
        } else {
            format!("quota missed: {}", short.join(", "))
        },
    ));

    let idempotent = league
        .teams()
        .all(|t| evaluate(t) == evaluate(t));
    results.push(TestResult::new(
        "matchup_evaluation_idempotent",
        idempotent,
        "evaluate(roster) repeated for every team",
    ));

    if verbose {
        for conf in &league.conferences {
            println!(
                "  {} (strength {:.1}): average overall {}",
                conf.name,
                conf.strength,
                conf.average_overall().unwrap_or_default()
            );
            for team in &conf.teams {
                let s = evaluate(team);
                println!(
                    "    {:<22} ovr {:>2}  off {:>5}  def {:>5}",
                    team.name,
                    team.overall(),
                    s.offense,
                    s.defense
                );
            }
        }
    }

    results
}

// ── 5. Minutes ──────────────────────────────────────────────────────────

fn validate_minutes(league: &League, config: &SimConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Minute Allocation ---");
    let mut rng = seeded_rng(seed.wrapping_add(1));
    let mut failures = Vec::new();
    let mut plans = 0usize;

    for team in league.teams() {
        for _ in 0..10 {
            plans += 1;
            match allocate_minutes(team, None, config, &mut rng) {
                Ok(plan) if plan.total() == 200 && plan.starters().count() == 5 => {}
                Ok(plan) => failures.push(format!("{}: total {}", team.name, plan.total())),
                Err(e) => failures.push(format!("{}: {}", team.name, e)),
            }
        }
    }

    vec![TestResult::new(
        "minutes_sum_to_200",
        failures.is_empty(),
        if failures.is_empty() {
            format!("{} plans checked", plans)
        } else {
            failures.join("; ")
        },
    )]
}

// ── 6. Games ────────────────────────────────────────────────────────────

/// Ordered pairings of distinct teams, cycling home teams, capped at
/// `games`.
fn schedule<'a>(teams: &[&'a Roster], games: usize) -> Vec<(&'a Roster, &'a Roster)> {
    let n = teams.len();
    (1..n)
        .flat_map(|offset| (0..n).map(move |home| (home, (home + offset) % n)))
        .take(games)
        .map(|(h, a)| (teams[h], teams[a]))
        .collect()
}

fn validate_games(
    matchups: &[(&Roster, &Roster)],
    games: &[GameResult],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Games ({}) ---", games.len());
    let mut results = Vec::new();

    let bad_sums = games
        .iter()
        .filter(|g| {
            g.home_score != g.totals(Side::Home).points || g.away_score != g.totals(Side::Away).points
        })
        .count();
    results.push(TestResult::new(
        "scores_are_point_totals",
        bad_sums == 0,
        format!("{} mismatches", bad_sums),
    ));

    let bad_winner = games
        .iter()
        .filter(|g| match g.winner {
            Side::Home => g.home_score < g.away_score,
            Side::Away => g.away_score <= g.home_score,
        })
        .count();
    results.push(TestResult::new(
        "winner_rule",
        bad_winner == 0,
        format!("{} games with the wrong winner", bad_winner),
    ));

    let bad_minutes = games
        .iter()
        .filter(|g| g.totals(Side::Home).minutes != 200 || g.totals(Side::Away).minutes != 200)
        .count();
    results.push(TestResult::new(
        "box_minutes_200",
        bad_minutes == 0,
        format!("{} games off 200 minutes", bad_minutes),
    ));

    let unmapped = matchups
        .iter()
        .zip(games)
        .filter(|((home, away), g)| {
            let maps = |roster: &Roster, side: Side| {
                g.box_score(side).iter().all(|line| {
                    roster
                        .players
                        .get(line.player)
                        .is_some_and(|p| p.name == line.name && p.position == line.position)
                })
            };
            !maps(*home, Side::Home) || !maps(*away, Side::Away)
        })
        .count();
    results.push(TestResult::new(
        "box_lines_map_to_roster",
        unmapped == 0,
        format!("{} games with a line that does not match its roster slot", unmapped),
    ));

    let scores: Vec<u32> = games
        .iter()
        .flat_map(|g| [g.home_score, g.away_score])
        .collect();
    if !scores.is_empty() {
        let mean = scores.iter().sum::<u32>() as f64 / scores.len() as f64;
        let (lo, hi) = (
            scores.iter().min().copied().unwrap_or(0),
            scores.iter().max().copied().unwrap_or(0),
        );
        results.push(TestResult::new(
            "scoring_level",
            (45.0..=110.0).contains(&mean),
            format!("mean {:.1} points/team, range {}..{}", mean, lo, hi),
        ));
    }

    if verbose {
        for g in games {
            println!(
                "  {:<22} {:>3} - {:<3} {:<22}",
                g.home_team, g.home_score, g.away_score, g.away_team
            );
        }
    }

    results
}

fn dump_first_game(games: &[GameResult]) {
    let Some(game) = games.first() else {
        return;
    };
    match serde_json::to_string_pretty(game) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("could not serialize game: {}", e),
    }
}
