use owo_colors::OwoColorize;
use serde::Serialize;

use crate::scoring::{expected_counts, is_low_signal, Tier, TierBand, TieredEntity};

/// How a role's entities spread over the tiers, next to what the bands ask for.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub role: String,
    pub entity_count: usize,
    pub vote_count: u64,
    /// True when the B/C fallback was used instead of the bands.
    pub low_signal: bool,
    pub actual: Vec<(Tier, usize)>,
    /// `ceil(n * share)` per band, before the one-per-tier floor and balancing.
    pub expected: Vec<(Tier, usize)>,
}

impl DistributionReport {
    pub fn build(
        role: &str,
        tiered: &[TieredEntity],
        bands: &[TierBand],
        fallback_avg_votes: f64,
    ) -> Self {
        let entity_count = tiered.len();
        let vote_count = tiered
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.scored.total_votes));

        let actual = Tier::ALL
            .iter()
            .map(|tier| (*tier, tiered.iter().filter(|t| t.tier == *tier).count()))
            .collect();

        Self {
            role: role.to_string(),
            entity_count,
            vote_count,
            low_signal: entity_count > 0
                && is_low_signal(vote_count, entity_count, fallback_avg_votes),
            actual,
            expected: expected_counts(entity_count, bands),
        }
    }

    pub fn actual_count(&self, tier: Tier) -> usize {
        self.actual
            .iter()
            .find(|(t, _)| *t == tier)
            .map_or(0, |(_, c)| *c)
    }

    /// Expected count, or `None` for tiers that have no band.
    pub fn expected_count(&self, tier: Tier) -> Option<usize> {
        self.expected
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, c)| *c)
    }
}

/// Format the report as a small table: tier, actual, expected.
pub fn format_distribution(report: &DistributionReport, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let header = format!(
        "{}: {} champions, {} votes",
        report.role, report.entity_count, report.vote_count
    );
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    if report.low_signal {
        lines.push("Low vote count: tiers collapsed to B/C".to_string());
    }

    lines.push(format!("{:<5} {:>6} {:>8}", "Tier", "Actual", "Expected"));
    for tier in Tier::ALL {
        let actual = report.actual_count(tier);
        let expected = report.expected_count(tier);
        if actual == 0 && expected.is_none() {
            continue;
        }
        let expected = expected.map_or_else(|| "-".to_string(), |c| c.to_string());
        lines.push(format!("{:<5} {:>6} {:>8}", tier.as_str(), actual, expected));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{default_bands, rank, ScoringConfig};
    use crate::votes::VoteCount;

    fn population(n: u64, votes_each: u64) -> Vec<VoteCount> {
        (0..n)
            .map(|i| VoteCount::new(i, i % (votes_each + 1), votes_each - i % (votes_each + 1)))
            .collect()
    }

    #[test]
    fn test_report_counts_every_entity() {
        let rows = population(40, 6);
        let tiered = rank(&rows, &ScoringConfig::default()).unwrap();
        let report = DistributionReport::build("Top", &tiered, &default_bands(), 3.0);

        assert_eq!(report.entity_count, 40);
        assert_eq!(report.vote_count, 240);
        assert!(!report.low_signal);
        let total: usize = report.actual.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 40);
        assert_eq!(report.expected_count(Tier::God), Some(1));
        assert_eq!(report.expected_count(Tier::B), Some(12));
    }

    #[test]
    fn test_report_flags_low_signal() {
        let rows = population(10, 1);
        let tiered = rank(&rows, &ScoringConfig::default()).unwrap();
        let report = DistributionReport::build("Mid", &tiered, &default_bands(), 3.0);

        assert!(report.low_signal);
        assert_eq!(report.actual_count(Tier::B), 5);
        assert_eq!(report.actual_count(Tier::C), 5);
        assert_eq!(report.actual_count(Tier::God), 0);
    }

    #[test]
    fn test_format_distribution() {
        let rows = population(10, 1);
        let tiered = rank(&rows, &ScoringConfig::default()).unwrap();
        let report = DistributionReport::build("Mid", &tiered, &default_bands(), 3.0);
        let text = format_distribution(&report, false);

        assert!(text.starts_with("Mid: 10 champions, 10 votes"));
        assert!(text.contains("Low vote count"));
        assert!(text.contains("B          5        3"));
    }

    #[test]
    fn test_format_skips_unconfigured_empty_tiers() {
        let report = DistributionReport {
            role: "ADC".to_string(),
            entity_count: 0,
            vote_count: 0,
            low_signal: false,
            actual: Tier::ALL.iter().map(|t| (*t, 0)).collect(),
            expected: vec![(Tier::S, 0)],
        };
        let text = format_distribution(&report, false);
        assert!(text.contains("S "));
        assert!(!text.contains("God"));
    }
}
