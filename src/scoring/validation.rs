use super::config::{ScoringConfig, TierBand};

/// How far the band shares may drift from 1.0.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(k) = config.k {
        errors.extend(check_k(k));
    }

    if let Some(avg) = config.fallback_avg_votes {
        errors.extend(check_fallback_avg_votes(avg));
    }

    if let Some(ref bands) = config.tiers {
        errors.extend(check_bands(bands));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub(crate) fn check_k(k: f64) -> Option<String> {
    if !k.is_finite() {
        Some(format!("scoring.k: must be a finite number, got {}", k))
    } else if k < 0.0 {
        Some(format!("scoring.k: must be non-negative, got {}", k))
    } else {
        None
    }
}

pub(crate) fn check_fallback_avg_votes(avg: f64) -> Option<String> {
    if !avg.is_finite() || avg < 0.0 {
        Some(format!(
            "scoring.fallback_avg_votes: must be a finite non-negative number, got {}",
            avg
        ))
    } else {
        None
    }
}

pub(crate) fn check_bands(bands: &[TierBand]) -> Vec<String> {
    let mut errors = Vec::new();

    if bands.is_empty() {
        errors.push("scoring.tiers: at least one tier is required".to_string());
        return errors;
    }

    for (i, band) in bands.iter().enumerate() {
        if !band.share.is_finite() || band.share < 0.0 {
            errors.push(format!(
                "scoring.tiers[{}].share: must be a finite non-negative number, got {}",
                i, band.share
            ));
        }
        if i > 0 {
            let prev = bands[i - 1].tier;
            if band.tier <= prev {
                errors.push(format!(
                    "scoring.tiers[{}].tier: '{}' is duplicated or listed after a lower tier ('{}')",
                    i, band.tier, prev
                ));
            }
        }
    }

    let sum: f64 = bands.iter().map(|b| b.share).sum();
    if sum.is_finite() && (sum - 1.0).abs() > SHARE_TOLERANCE {
        errors.push(format!(
            "scoring.tiers: shares must sum to 1.0, got {:.4}",
            sum
        ));
    }

    errors
}
