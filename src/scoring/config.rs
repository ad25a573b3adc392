use serde::{Deserialize, Serialize};

use super::adjust::AdjustParams;
use super::assign::TierParams;
use super::tier::Tier;
use crate::error::Result;

pub const DEFAULT_K: f64 = 10.0;
pub const DEFAULT_THRESHOLD: u64 = 10;
pub const DEFAULT_FALLBACK_AVG_VOTES: f64 = 3.0;

/// Main scoring configuration.
///
/// Every field is optional; missing fields fall back to the defaults used by
/// [`ScoringConfig::default`].
///
/// Example YAML:
/// ```yaml
/// scoring:
///   k: 10
///   threshold: 10
///   fallback_avg_votes: 3
///   tiers:
///     - tier: God
///       share: 0.01
///     - tier: S
///       share: 0.08
///     # ...
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Prior strength: how many pseudo-votes at the global average are mixed
    /// into an entity that is still below `threshold` (default: 10)
    #[serde(default)]
    pub k: Option<f64>,

    /// Vote count from which the raw win rate is trusted as-is (default: 10)
    #[serde(default)]
    pub threshold: Option<u64>,

    /// Average votes per entity below which tiers collapse to B/C (default: 3)
    #[serde(default)]
    pub fallback_avg_votes: Option<f64>,

    /// Tier bands, best tier first. Shares must sum to 1.0.
    #[serde(default)]
    pub tiers: Option<Vec<TierBand>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            k: Some(DEFAULT_K),
            threshold: Some(DEFAULT_THRESHOLD),
            fallback_avg_votes: Some(DEFAULT_FALLBACK_AVG_VOTES),
            tiers: Some(default_bands()),
        }
    }
}

impl ScoringConfig {
    pub fn k(&self) -> f64 {
        self.k.unwrap_or(DEFAULT_K)
    }

    pub fn threshold(&self) -> u64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn fallback_avg_votes(&self) -> f64 {
        self.fallback_avg_votes.unwrap_or(DEFAULT_FALLBACK_AVG_VOTES)
    }

    pub fn bands(&self) -> Vec<TierBand> {
        self.tiers.clone().unwrap_or_else(default_bands)
    }

    pub fn adjust_params(&self) -> Result<AdjustParams> {
        AdjustParams::new(self.k(), self.threshold())
    }

    pub fn tier_params(&self) -> Result<TierParams> {
        TierParams::new(self.bands(), self.fallback_avg_votes())
    }
}

/// One tier and the share of the population it receives.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierBand {
    pub tier: Tier,
    pub share: f64,
}

impl TierBand {
    pub const fn new(tier: Tier, share: f64) -> Self {
        Self { tier, share }
    }
}

/// Default bands.
///
/// The extremes keep 1% each and S/A/D/F keep 8/15/15/4%; B and C split the
/// remaining 56% so the shares add up to the whole population.
pub fn default_bands() -> Vec<TierBand> {
    vec![
        TierBand::new(Tier::God, 0.01),
        TierBand::new(Tier::S, 0.08),
        TierBand::new(Tier::A, 0.15),
        TierBand::new(Tier::B, 0.28),
        TierBand::new(Tier::C, 0.28),
        TierBand::new(Tier::D, 0.15),
        TierBand::new(Tier::F, 0.04),
        TierBand::new(Tier::Shit, 0.01),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.k, Some(10.0));
        assert_eq!(config.threshold, Some(10));
        assert_eq!(config.fallback_avg_votes, Some(3.0));
        assert_eq!(config.tiers.as_ref().map(Vec::len), Some(8));
    }

    #[test]
    fn test_default_bands_sum_to_one() {
        let sum: f64 = default_bands().iter().map(|b| b.share).sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum was {}", sum);
    }

    #[test]
    fn test_default_bands_in_rank_order() {
        let tiers: Vec<Tier> = default_bands().iter().map(|b| b.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.k.is_none());
        assert_eq!(config.k(), DEFAULT_K);
        assert_eq!(config.threshold(), DEFAULT_THRESHOLD);
        assert_eq!(config.fallback_avg_votes(), DEFAULT_FALLBACK_AVG_VOTES);
        assert_eq!(config.bands(), default_bands());
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
k: 25
threshold: 20
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.k(), 25.0);
        assert_eq!(config.threshold(), 20);
        assert!(config.tiers.is_none());
    }

    #[test]
    fn test_custom_tiers_parse() {
        let yaml = r#"
tiers:
  - tier: S
    share: 0.25
  - tier: B
    share: 0.5
  - tier: F
    share: 0.25
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let bands = config.bands();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0], TierBand::new(Tier::S, 0.25));
        assert_eq!(bands[2].tier, Tier::F);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "kk: 3";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }
}
