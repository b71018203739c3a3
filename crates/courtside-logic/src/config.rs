//! Simulation calibration — every tunable constant of the game model.
//!
//! `SimConfig::default()` is the calibrated college-basketball model:
//! teams land roughly in the 50–100 point range. Changing the matchup
//! damping or the offense/defense scales shifts league-wide scoring, so
//! JSON overrides should be used deliberately.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Per-roster caps on skill-tier labels during tiered roster building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCaps {
    pub elite: usize,
    pub good: usize,
}

impl Default for TierCaps {
    fn default() -> Self {
        Self { elite: 3, good: 5 }
    }
}

/// Calibration constants for matchup evaluation, minute allocation, and
/// box-score simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Additive damping in `own / (own + opp_defense + damping)`.
    pub matchup_damping: f64,
    /// Multiplier applied to the matchup factor before box-score simulation.
    pub offense_scale: f64,
    /// Multiplier applied to the opponent's raw defense sum.
    pub defense_scale: f64,
    /// Per-player performance draw range.
    pub performance_min: f64,
    pub performance_max: f64,
    /// Chance of a breakout game for any one player.
    pub breakout_chance: f64,
    /// Breakout points multiplier range.
    pub breakout_min: f64,
    pub breakout_max: f64,
    /// Total player-minutes per team per game.
    pub team_minutes: f64,
    /// Minutes of one full game at one slot.
    pub slot_minutes: f64,
    /// Share of team minutes handed to the starting five.
    pub starter_share: f64,
    /// Tier label caps per roster.
    pub tier_caps: TierCaps,
    /// Upper bound on redraws when a drawn tier label is capped out.
    pub max_tier_redraws: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            matchup_damping: 50.0,
            offense_scale: 20.0,
            defense_scale: 0.01,
            performance_min: 0.95,
            performance_max: 1.05,
            breakout_chance: 0.05,
            breakout_min: 1.4,
            breakout_max: 1.8,
            team_minutes: 200.0,
            slot_minutes: 40.0,
            starter_share: 0.85,
            tier_caps: TierCaps::default(),
            max_tier_redraws: 16,
        }
    }
}

impl SimConfig {
    /// Load from JSON. Missing keys keep their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce NaN/Inf or empty sampling ranges.
    pub fn validate(&self) -> Result<()> {
        if self.matchup_damping <= 0.0 {
            return Err(CoreError::Configuration(
                "matchup_damping must be positive".into(),
            ));
        }
        if self.defense_scale < 0.0 || self.offense_scale < 0.0 {
            return Err(CoreError::Configuration(
                "offense_scale and defense_scale must be non-negative".into(),
            ));
        }
        if !(0.0 < self.performance_min && self.performance_min <= self.performance_max) {
            return Err(CoreError::Configuration(format!(
                "performance range {}..{} is invalid",
                self.performance_min, self.performance_max
            )));
        }
        if !(0.0..=1.0).contains(&self.breakout_chance) {
            return Err(CoreError::Configuration(
                "breakout_chance must be within 0..=1".into(),
            ));
        }
        if self.breakout_min > self.breakout_max {
            return Err(CoreError::Configuration(format!(
                "breakout range {}..{} is inverted",
                self.breakout_min, self.breakout_max
            )));
        }
        if self.team_minutes <= 0.0 || self.slot_minutes <= 0.0 {
            return Err(CoreError::Configuration(
                "team_minutes and slot_minutes must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.starter_share) {
            return Err(CoreError::Configuration(
                "starter_share must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_calibrated_values() {
        let c = SimConfig::default();
        assert_eq!(c.matchup_damping, 50.0);
        assert_eq!(c.offense_scale, 20.0);
        assert_eq!(c.defense_scale, 0.01);
        assert_eq!(c.team_minutes, 200.0);
        assert_eq!(c.starter_share, 0.85);
        assert_eq!(c.tier_caps, TierCaps { elite: 3, good: 5 });
        c.validate().unwrap();
    }

    #[test]
    fn test_partial_json_override() {
        let c = SimConfig::from_json(r#"{"breakout_chance": 0.0, "tier_caps": {"elite": 1}}"#)
            .unwrap();
        assert_eq!(c.breakout_chance, 0.0);
        assert_eq!(c.tier_caps.elite, 1);
        assert_eq!(c.tier_caps.good, 5);
        assert_eq!(c.matchup_damping, 50.0);
    }

    #[test]
    fn test_rejects_zero_damping() {
        let err = SimConfig::from_json(r#"{"matchup_damping": 0.0}"#).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn test_rejects_inverted_performance() {
        let c = SimConfig {
            performance_min: 1.1,
            performance_max: 0.9,
            ..SimConfig::default()
        };
        assert!(c.validate().is_err());
    }
}
