pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
pub mod snapshot;
pub mod votes;

pub use error::TierError;
