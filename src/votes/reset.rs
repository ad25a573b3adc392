use super::types::VoteCount;
use crate::error::{Result, TierError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResetMode {
    /// Shrink every count by this percentage, rounding to the nearest vote.
    Percentage(f64),
    /// Drop every vote.
    Clear,
}

impl ResetMode {
    pub fn validate(&self) -> Result<()> {
        match self {
            ResetMode::Percentage(p) if !p.is_finite() || *p <= 0.0 || *p > 100.0 => Err(
                TierError::invalid(format!("reset percentage must be in (0, 100], got {}", p)),
            ),
            _ => Ok(()),
        }
    }
}

/// Apply a soft reset to every row. Relative standing is roughly kept while
/// old votes weigh less against new ones.
pub fn soft_reset(rows: &[VoteCount], mode: ResetMode) -> Result<Vec<VoteCount>> {
    mode.validate()?;

    let scale = |count: u64| -> u64 {
        match mode {
            ResetMode::Clear => 0,
            ResetMode::Percentage(p) => (count as f64 * (1.0 - p / 100.0)).round() as u64,
        }
    };

    Ok(rows
        .iter()
        .map(|row| VoteCount {
            upvotes: scale(row.upvotes),
            downvotes: scale(row.downvotes),
            ..row.clone()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_reset_rounds() {
        let rows = vec![VoteCount::new("a", 10, 5), VoteCount::new("b", 3, 1)];
        let reset = soft_reset(&rows, ResetMode::Percentage(50.0)).unwrap();

        assert_eq!((reset[0].upvotes, reset[0].downvotes), (5, 3)); // 2.5 rounds up
        assert_eq!((reset[1].upvotes, reset[1].downvotes), (2, 1)); // 1.5 -> 2, 0.5 -> 1
    }

    #[test]
    fn test_full_percentage_clears() {
        let rows = vec![VoteCount::new("a", 10, 5)];
        let reset = soft_reset(&rows, ResetMode::Percentage(100.0)).unwrap();
        assert_eq!(reset[0].total_votes(), 0);
    }

    #[test]
    fn test_clear_keeps_other_fields() {
        let rows = vec![VoteCount::new(1, 4, 4).with_field("name", "Ahri")];
        let reset = soft_reset(&rows, ResetMode::Clear).unwrap();
        assert_eq!(reset[0].total_votes(), 0);
        assert_eq!(reset[0].name(), Some("Ahri"));
    }

    #[test]
    fn test_invalid_percentage() {
        let rows = vec![VoteCount::new("a", 1, 1)];
        for p in [0.0, -5.0, 100.5, f64::NAN] {
            assert!(
                matches!(soft_reset(&rows, ResetMode::Percentage(p)), Err(TierError::InvalidInput(_))),
                "percentage {} should be rejected",
                p
            );
        }
    }
}
