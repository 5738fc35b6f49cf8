//! Waterfall configuration
//!
//! The improvement ladder is a static, ordered table of per-card utilization
//! rungs (most severe first) followed by an aggregate-utilization target.
//! `WaterfallConfig::default()` is the standard 89 / 49 / 29 / 10 ladder;
//! callers may load a custom ladder from JSON.
//!
//! Every constructor validates, so a `WaterfallConfig` in hand is always
//! well-formed:
//! - rung names are non-empty
//! - thresholds are percentages in `0..=100`
//! - rung thresholds are strictly descending

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard per-card ladder: (threshold percent, phase name)
pub const DEFAULT_LADDER: [(u32, &str); 3] = [
    (89, "Emergency Recovery"),
    (49, "Critical Threshold"),
    (29, "Good Standing"),
];

/// Standard aggregate utilization target for premium qualification
pub const DEFAULT_OVERALL_THRESHOLD_PCT: u32 = 10;

/// Errors raised while building or loading a [`WaterfallConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Ladder rung {0} has an empty name")]
    EmptyRungName(usize),

    #[error("Threshold {threshold_pct}% is out of range (0-100)")]
    ThresholdOutOfRange { threshold_pct: u32 },

    #[error("Ladder thresholds must be strictly descending: {previous}% is followed by {next}%")]
    LadderNotDescending { previous: u32, next: u32 },

    #[error("Failed to parse waterfall config: {0}")]
    Parse(String),
}

/// One per-card rung of the improvement ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderRung {
    /// Phase name reported while this rung is active (e.g. "Emergency Recovery")
    pub name: String,

    /// A card is "over" this rung when its utilization is strictly above it
    pub threshold_pct: u32,
}

impl LadderRung {
    pub fn new(name: impl Into<String>, threshold_pct: u32) -> Self {
        Self {
            name: name.into(),
            threshold_pct,
        }
    }
}

/// Validated waterfall configuration
///
/// # Example
/// ```
/// use debt_waterfall_core_rs::waterfall::{LadderRung, WaterfallConfig};
///
/// let config = WaterfallConfig::new(
///     vec![LadderRung::new("Over Limit", 100), LadderRung::new("Half Way", 50)],
///     30,
/// )
/// .unwrap();
/// assert_eq!(config.ladder().len(), 2);
///
/// assert!(WaterfallConfig::new(vec![LadderRung::new("Low", 10), LadderRung::new("High", 90)], 5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWaterfallConfig")]
pub struct WaterfallConfig {
    ladder: Vec<LadderRung>,
    overall_threshold_pct: u32,
}

#[derive(Debug, Deserialize)]
struct RawWaterfallConfig {
    #[serde(default = "default_ladder")]
    ladder: Vec<LadderRung>,
    #[serde(default = "default_overall_threshold")]
    overall_threshold_pct: u32,
}

fn default_ladder() -> Vec<LadderRung> {
    DEFAULT_LADDER
        .iter()
        .map(|(threshold_pct, name)| LadderRung::new(*name, *threshold_pct))
        .collect()
}

fn default_overall_threshold() -> u32 {
    DEFAULT_OVERALL_THRESHOLD_PCT
}

impl TryFrom<RawWaterfallConfig> for WaterfallConfig {
    type Error = ConfigError;

    fn try_from(raw: RawWaterfallConfig) -> Result<Self, Self::Error> {
        WaterfallConfig::new(raw.ladder, raw.overall_threshold_pct)
    }
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            ladder: default_ladder(),
            overall_threshold_pct: DEFAULT_OVERALL_THRESHOLD_PCT,
        }
    }
}

impl WaterfallConfig {
    /// Build a config from an ordered ladder and an overall threshold
    ///
    /// # Errors
    /// Returns `ConfigError` if a rung is unnamed, a threshold is above 100,
    /// or the ladder is not strictly descending.
    pub fn new(ladder: Vec<LadderRung>, overall_threshold_pct: u32) -> Result<Self, ConfigError> {
        for (index, rung) in ladder.iter().enumerate() {
            if rung.name.trim().is_empty() {
                return Err(ConfigError::EmptyRungName(index));
            }
            check_percent(rung.threshold_pct)?;
        }

        for pair in ladder.windows(2) {
            if pair[1].threshold_pct >= pair[0].threshold_pct {
                return Err(ConfigError::LadderNotDescending {
                    previous: pair[0].threshold_pct,
                    next: pair[1].threshold_pct,
                });
            }
        }

        check_percent(overall_threshold_pct)?;

        Ok(Self {
            ladder,
            overall_threshold_pct,
        })
    }

    /// Parse and validate a JSON config; omitted fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Per-card rungs, most severe first
    pub fn ladder(&self) -> &[LadderRung] {
        &self.ladder
    }

    pub fn overall_threshold_pct(&self) -> u32 {
        self.overall_threshold_pct
    }
}

fn check_percent(threshold_pct: u32) -> Result<(), ConfigError> {
    if threshold_pct > 100 {
        return Err(ConfigError::ThresholdOutOfRange { threshold_pct });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladder_order() {
        let config = WaterfallConfig::default();
        let thresholds: Vec<u32> = config.ladder().iter().map(|r| r.threshold_pct).collect();
        assert_eq!(thresholds, vec![89, 49, 29]);
        assert_eq!(config.overall_threshold_pct(), 10);
    }

    #[test]
    fn test_equal_thresholds_rejected() {
        let result = WaterfallConfig::new(
            vec![LadderRung::new("A", 50), LadderRung::new("B", 50)],
            10,
        );
        assert_eq!(
            result,
            Err(ConfigError::LadderNotDescending {
                previous: 50,
                next: 50
            })
        );
    }

    #[test]
    fn test_empty_ladder_is_allowed() {
        let config = WaterfallConfig::new(vec![], 10).unwrap();
        assert!(config.ladder().is_empty());
    }
}
