pub mod formatter;
pub mod report;

pub use formatter::{format_json, format_score, format_tier_table, format_tsv, should_use_colors};
pub use report::{format_distribution, DistributionReport};
