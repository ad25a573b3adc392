//! Bayesian score adjustment.
//!
//! Entities with few votes are pulled toward the population's average win
//! rate; once an entity has `threshold` votes its raw rate is used as-is.

use serde::Serialize;

use super::config::{DEFAULT_K, DEFAULT_THRESHOLD};
use super::validation::check_k;
use crate::error::{Result, TierError};
use crate::votes::VoteCount;

/// Prior used when nobody has voted on anything yet.
pub const NO_DATA_PRIOR: f64 = 0.5;

/// Validated parameters for [`adjust`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustParams {
    k: f64,
    threshold: u64,
}

impl Default for AdjustParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AdjustParams {
    /// `k` must be finite and non-negative.
    pub fn new(k: f64, threshold: u64) -> Result<Self> {
        if let Some(msg) = check_k(k) {
            return Err(TierError::InvalidInput(msg));
        }
        Ok(Self { k, threshold })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }
}

/// A vote row with its adjusted score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntity {
    #[serde(flatten)]
    pub votes: VoteCount,
    pub total_votes: u64,
    pub adjusted_score: f64,
}

/// Share of upvotes across every row, or [`NO_DATA_PRIOR`] when there are no votes at all.
pub fn global_average(rows: &[VoteCount]) -> f64 {
    let (up, total) = rows.iter().fold((0u64, 0u64), |(up, total), row| {
        (
            up.saturating_add(row.upvotes),
            total.saturating_add(row.total_votes()),
        )
    });

    if total > 0 {
        up as f64 / total as f64
    } else {
        NO_DATA_PRIOR
    }
}

/// Score a single entity against a precomputed global average.
pub fn adjusted_score(upvotes: u64, total_votes: u64, global_avg: f64, params: &AdjustParams) -> f64 {
    if total_votes == 0 {
        global_avg
    } else if total_votes < params.threshold {
        (upvotes as f64 + params.k * global_avg) / (total_votes as f64 + params.k)
    } else {
        upvotes as f64 / total_votes as f64
    }
}

/// Score every row. Output order matches input order.
pub fn adjust(rows: &[VoteCount], params: &AdjustParams) -> Vec<ScoredEntity> {
    let global_avg = global_average(rows);
    tracing::debug!(
        entities = rows.len(),
        global_avg,
        k = params.k,
        threshold = params.threshold,
        "adjusting scores"
    );

    rows.iter()
        .map(|row| {
            let total_votes = row.total_votes();
            ScoredEntity {
                adjusted_score: adjusted_score(row.upvotes, total_votes, global_avg, params),
                total_votes,
                votes: row.clone(),
            }
        })
        .collect()
}
