use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;
use crate::votes::default_roles;

/// Top-level config file (`~/.config/champ-tiers/config.yaml`).
///
/// ```yaml
/// roles: [Top, Jungle, Mid, ADC, Support]
/// scoring:
///   k: 10
///   threshold: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Roles accepted by `--role` (default: Top, Jungle, Mid, ADC, Support)
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl Config {
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn roles(&self) -> Vec<String> {
        match &self.roles {
            Some(roles) if !roles.is_empty() => roles.clone(),
            _ => default_roles(),
        }
    }
}
