use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::TierError;

/// Entity identifier. Vote exports use numeric champion ids; hand-written
/// files often use names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

/// Aggregated votes for one entity.
///
/// Any other fields on the row (name, role, portrait url, ...) are carried in
/// `fields` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteCount {
    pub id: EntityId,
    pub upvotes: u64,
    pub downvotes: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl VoteCount {
    pub fn new(id: impl Into<EntityId>, upvotes: u64, downvotes: u64) -> Self {
        Self {
            id: id.into(),
            upvotes,
            downvotes,
            fields: Map::new(),
        }
    }

    /// Builder-style setter for a pass-through string field.
    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn total_votes(&self) -> u64 {
        self.upvotes.saturating_add(self.downvotes)
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Role label(s). The champions table stores these comma separated.
    pub fn role(&self) -> Option<&str> {
        self.fields.get("role").and_then(Value::as_str)
    }

    /// Name if present, id otherwise.
    pub fn display_name(&self) -> String {
        self.name()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Total votes over every row, saturating at `u64::MAX`.
pub fn sum_votes(rows: &[VoteCount]) -> u64 {
    rows.iter()
        .fold(0u64, |acc, row| acc.saturating_add(row.total_votes()))
}

impl<'de> Deserialize<'de> for VoteCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawVoteRow::deserialize(deserializer)?;
        VoteCount::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Keys written by ranking output. They are recomputed on every run, so a
/// ranked file fed back in drops them instead of carrying stale copies.
pub const DERIVED_KEYS: [&str; 3] = ["total_votes", "adjusted_score", "tier"];

/// A vote row as found on disk, before the boundary checks.
///
/// Counts are signed so that a negative value produces a clear
/// [`TierError::InvalidInput`] instead of a generic parse failure. Missing
/// counts are zero.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVoteRow {
    #[serde(alias = "champion_id")]
    pub id: EntityId,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TryFrom<RawVoteRow> for VoteCount {
    type Error = TierError;

    fn try_from(raw: RawVoteRow) -> Result<Self, Self::Error> {
        let check = |label: &str, value: i64| {
            u64::try_from(value).map_err(|_| {
                TierError::invalid(format!(
                    "{} for '{}' must be non-negative, got {}",
                    label, raw.id, value
                ))
            })
        };
        let upvotes = check("upvotes", raw.upvotes)?;
        let downvotes = check("downvotes", raw.downvotes)?;

        let mut fields = raw.fields;
        for key in DERIVED_KEYS {
            fields.remove(key);
        }

        Ok(VoteCount {
            id: raw.id,
            upvotes,
            downvotes,
            fields,
        })
    }
}
