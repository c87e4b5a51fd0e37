//! Party configuration
//!
//! Every tunable is a `RandRange` sampled at reset time. Missing keys in a
//! JSON config fall back to the per-type defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{BalloonConfig, ConfettiConfig, RibbonConfig};

/// Errors raised while loading a [`PartyConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid party config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timescale must be finite and non-negative, got {0}")]
    Timescale(f32),
}

/// A randomized parameter: `min + random() * rand`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandRange {
    pub min: f32,
    pub rand: f32,
}

impl RandRange {
    pub const fn new(min: f32, rand: f32) -> Self {
        Self { min, rand }
    }

    /// Range that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, 0.0)
    }

    /// Draw one value from the range
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * self.rand
    }

    /// Largest value `sample` can produce
    pub fn max(&self) -> f32 {
        self.min + self.rand
    }
}

/// How many entities of each type a party holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityCounts {
    pub confetti: usize,
    pub balloon: usize,
    pub ribbon: usize,
}

impl Default for EntityCounts {
    fn default() -> Self {
        Self {
            confetti: DEFAULT_CONFETTI_COUNT,
            balloon: DEFAULT_BALLOON_COUNT,
            ribbon: DEFAULT_RIBBON_COUNT,
        }
    }
}

impl EntityCounts {
    /// Total entity count across all types
    pub fn total(&self) -> usize {
        self.confetti + self.balloon + self.ribbon
    }

    fn scaled(&self, factor: f32) -> Self {
        let scale = |n: usize| (n as f32 * factor).round() as usize;
        Self {
            confetti: scale(self.confetti),
            balloon: scale(self.balloon),
            ribbon: scale(self.ribbon),
        }
    }
}

/// Density presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Low => "Low",
            Density::Medium => "Medium",
            Density::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Density::Low),
            "medium" | "med" => Some(Density::Medium),
            "high" => Some(Density::High),
            _ => None,
        }
    }

    /// Multiplier applied to the configured entity counts
    pub fn count_factor(&self) -> f32 {
        match self {
            Density::Low => 0.25,
            Density::Medium => 1.0,
            Density::High => 2.0,
        }
    }
}

/// Full party configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Simulation speed multiplier (1.0 = real time)
    pub timescale: f32,
    pub counts: EntityCounts,
    pub confetti: ConfettiConfig,
    pub balloon: BalloonConfig,
    pub ribbon: RibbonConfig,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            timescale: 1.0,
            counts: EntityCounts::default(),
            confetti: ConfettiConfig::default(),
            balloon: BalloonConfig::default(),
            ribbon: RibbonConfig::default(),
        }
    }
}

impl PartyConfig {
    /// Parse a JSON config. Absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "Loaded party config ({} entities, timescale {})",
            config.counts.total(),
            config.timescale
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Scale the entity counts by a density preset
    pub fn with_density(mut self, density: Density) -> Self {
        self.counts = self.counts.scaled(density.count_factor());
        self
    }

    /// Host-side config assembly: optional JSON, then an optional density
    /// name. Bad input is logged and falls back to defaults.
    pub fn from_host(json: Option<&str>, density: Option<&str>) -> Self {
        let config = match json.map(Self::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::error!("{}; using defaults", e);
                Self::default()
            }
            None => Self::default(),
        };

        let density = match density {
            Some(name) => Density::from_str(name).unwrap_or_else(|| {
                log::warn!("Unknown density '{}', using {}", name, Density::default().as_str());
                Density::default()
            }),
            None => Density::default(),
        };
        config.with_density(density)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.timescale.is_finite() || self.timescale < 0.0 {
            return Err(ConfigError::Timescale(self.timescale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rand_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let range = RandRange::new(10.0, 5.0);
        for _ in 0..1000 {
            let v = range.sample(&mut rng);
            assert!((10.0..15.0).contains(&v));
        }
        assert_eq!(range.max(), 15.0);
        assert_eq!(RandRange::fixed(3.0).sample(&mut rng), 3.0);
    }

    #[test]
    fn test_from_host_applies_density() {
        let config = PartyConfig::from_host(Some(r#"{"timescale": 2.0}"#), Some("LOW"));
        assert_eq!(config.timescale, 2.0);
        assert_eq!(config.counts.confetti, 50);
        assert_eq!(config.counts.ribbon, 2);

        let high = PartyConfig::from_host(None, Some("high"));
        assert_eq!(high.counts.total(), 416);
    }

    #[test]
    fn test_from_host_falls_back_on_bad_input() {
        let config = PartyConfig::from_host(Some("{not json"), Some("enormous"));
        assert_eq!(config, PartyConfig::default());
        assert_eq!(PartyConfig::from_host(None, None), PartyConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PartyConfig::from_json("{}").unwrap();
        assert_eq!(config, PartyConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "timescale": 0.5,
            "counts": { "balloon": 5 },
            "balloon": { "string_length": 60.0 },
            "ribbon": { "pieces": 12, "drag": 0.1 }
        }"#;
        let config = PartyConfig::from_json(json).unwrap();
        assert_eq!(config.timescale, 0.5);
        assert_eq!(config.counts.balloon, 5);
        assert_eq!(config.counts.confetti, DEFAULT_CONFETTI_COUNT);
        assert_eq!(config.balloon.string_length, 60.0);
        assert_eq!(config.balloon.width, 80.0);
        assert_eq!(config.balloon.height, 100.0);
        assert_eq!(config.ribbon.pieces, 12);
        assert_eq!(config.ribbon.drag, 0.1);
        assert_eq!(config.ribbon.length, 8.0);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = PartyConfig::default().to_json().unwrap();
        assert_eq!(PartyConfig::from_json(&json).unwrap(), PartyConfig::default());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = PartyConfig::from_json("{ timescale: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_timescale_rejected() {
        let err = PartyConfig::from_json(r#"{ "timescale": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Timescale(t) if t == -1.0));
    }

    #[test]
    fn test_density_scales_counts() {
        let low = PartyConfig::default().with_density(Density::Low);
        assert_eq!(low.counts.confetti, 50);
        assert_eq!(low.counts.balloon, 1);
        let high = PartyConfig::default().with_density(Density::High);
        assert_eq!(high.counts.ribbon, 12);
        assert_eq!(Density::from_str("HIGH"), Some(Density::High));
        assert_eq!(Density::from_str("med"), Some(Density::Medium));
        assert_eq!(Density::from_str("loud"), None);
        assert_eq!(Density::default().as_str(), "Medium");
    }
}
