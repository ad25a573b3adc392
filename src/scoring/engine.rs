use super::adjust::adjust;
use super::assign::{assign_tiers, TieredEntity};
use super::config::ScoringConfig;
use super::validation::validate_scoring;
use crate::error::{Result, TierError};
use crate::votes::VoteCount;

/// Score and tier a population in one call.
///
/// Rejects the whole call with [`TierError::InvalidInput`] when the config is
/// invalid, listing every problem found.
pub fn rank(rows: &[VoteCount], config: &ScoringConfig) -> Result<Vec<TieredEntity>> {
    validate_scoring(config).map_err(|errors| TierError::InvalidInput(errors.join("; ")))?;

    let adjust_params = config.adjust_params()?;
    let tier_params = config.tier_params()?;

    let scored = adjust(rows, &adjust_params);
    Ok(assign_tiers(scored, &tier_params))
}
