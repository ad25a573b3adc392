//! Percentage-based tier bucketing.
//!
//! Scored entities are sorted best first and cut into consecutive bands whose
//! sizes come from the configured shares. Every configured tier gets at least
//! one slot; when that overshoots the population the middle tiers give slots
//! back first. Populations with too few votes to tell anything apart are split
//! into B and C halves instead.

use serde::Serialize;

use super::adjust::ScoredEntity;
use super::config::{default_bands, TierBand, DEFAULT_FALLBACK_AVG_VOTES};
use super::tier::Tier;
use super::validation::{check_bands, check_fallback_avg_votes};
use crate::error::{Result, TierError};

/// `n * share` can land a hair above an integer (100 * 0.28 = 28.000000000000004).
const CEIL_EPSILON: f64 = 1e-9;

/// Validated parameters for [`assign_tiers`].
#[derive(Debug, Clone, PartialEq)]
pub struct TierParams {
    bands: Vec<TierBand>,
    fallback_avg_votes: f64,
}

impl Default for TierParams {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            fallback_avg_votes: DEFAULT_FALLBACK_AVG_VOTES,
        }
    }
}

impl TierParams {
    pub fn new(bands: Vec<TierBand>, fallback_avg_votes: f64) -> Result<Self> {
        let mut errors = check_bands(&bands);
        errors.extend(check_fallback_avg_votes(fallback_avg_votes));
        if !errors.is_empty() {
            return Err(TierError::InvalidInput(errors.join("; ")));
        }
        Ok(Self {
            bands,
            fallback_avg_votes,
        })
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    pub fn fallback_avg_votes(&self) -> f64 {
        self.fallback_avg_votes
    }
}

/// A scored entity with its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TieredEntity {
    #[serde(flatten)]
    pub scored: ScoredEntity,
    pub tier: Tier,
}

/// True when the population averages fewer than `fallback_avg_votes` votes per entity.
pub fn is_low_signal(total_votes: u64, entities: usize, fallback_avg_votes: f64) -> bool {
    (total_votes as f64) < fallback_avg_votes * entities as f64
}

fn ceil_share(n: usize, share: f64) -> usize {
    let raw = n as f64 * share - CEIL_EPSILON;
    raw.ceil().max(0.0) as usize
}

/// `ceil(n * share)` per band, without the one-per-tier floor or any balancing.
pub fn expected_counts(n: usize, bands: &[TierBand]) -> Vec<(Tier, usize)> {
    bands
        .iter()
        .map(|band| (band.tier, ceil_share(n, band.share)))
        .collect()
}

/// Number of entities each band receives for a population of `n`.
///
/// Counts start at `max(1, ceil(n * share))`. Overshoot is trimmed one slot at
/// a time in [`Tier::ADJUSTMENT_ORDER`], never below one. Anything still over
/// `n` after that (fewer entities than tiers) is cut from the bottom, so the
/// returned counts always sum to exactly `n`.
pub fn tier_counts(n: usize, bands: &[TierBand]) -> Vec<(Tier, usize)> {
    let mut counts: Vec<(Tier, usize)> = expected_counts(n, bands)
        .into_iter()
        .map(|(tier, count)| (tier, count.max(1)))
        .collect();

    let allocated: usize = counts.iter().map(|(_, c)| c).sum();

    if allocated > n {
        let mut excess = allocated - n;
        for tier in Tier::ADJUSTMENT_ORDER {
            if excess == 0 {
                break;
            }
            if let Some((_, count)) = counts.iter_mut().find(|(t, _)| *t == tier) {
                let give = excess.min(count.saturating_sub(1));
                *count -= give;
                excess -= give;
            }
        }
        if excess > 0 {
            tracing::debug!(n, excess, "more tiers than entities, trailing tiers left empty");
        }
    } else if allocated < n {
        // Only reachable through float drift in shares that sum to ~1.0
        let deficit = n - allocated;
        let slot = Tier::ADJUSTMENT_ORDER
            .iter()
            .find_map(|tier| counts.iter().position(|(t, _)| t == tier));
        if let Some(idx) = slot {
            counts[idx].1 += deficit;
        }
    }

    let mut remaining = n;
    for (_, count) in counts.iter_mut() {
        *count = (*count).min(remaining);
        remaining -= *count;
    }

    counts
}

/// Sort by adjusted score and label every entity with a tier.
///
/// The sort is stable: entities with equal scores keep their input order, which
/// decides who lands on which side of a band boundary. Output is best first.
pub fn assign_tiers(mut scored: Vec<ScoredEntity>, params: &TierParams) -> Vec<TieredEntity> {
    if scored.is_empty() {
        return Vec::new();
    }

    scored.sort_by(|a, b| b.adjusted_score.total_cmp(&a.adjusted_score));

    let n = scored.len();
    let total_votes = scored
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.total_votes));

    if is_low_signal(total_votes, n, params.fallback_avg_votes) {
        let half = n / 2;
        tracing::debug!(n, total_votes, "low vote count, splitting into B/C");
        return scored
            .into_iter()
            .enumerate()
            .map(|(i, scored)| TieredEntity {
                scored,
                tier: if i < half { Tier::B } else { Tier::C },
            })
            .collect();
    }

    let counts = tier_counts(n, &params.bands);
    tracing::debug!(n, total_votes, ?counts, "assigning tiers");

    let mut entities = scored.into_iter();
    let mut tiered = Vec::with_capacity(n);
    for (tier, count) in counts {
        tiered.extend(
            entities
                .by_ref()
                .take(count)
                .map(|scored| TieredEntity { scored, tier }),
        );
    }
    tiered
}
