pub mod adjust;
pub mod assign;
pub mod config;
pub mod engine;
pub mod tier;
pub mod validation;

pub use adjust::{adjust, adjusted_score, global_average, AdjustParams, ScoredEntity};
pub use assign::{assign_tiers, expected_counts, is_low_signal, tier_counts, TierParams, TieredEntity};
pub use config::*;
pub use engine::rank;
pub use tier::Tier;
pub use validation::validate_scoring;
