use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TierError;
use crate::votes::VoteCount;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotState {
    pub version: u32,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub votes: Vec<VoteCount>,
}

impl Snapshot {
    pub fn total_votes(&self) -> u64 {
        crate::votes::sum_votes(&self.votes)
    }

    /// Age in human-friendly form ("3d ago", "5h ago", "just now")
    pub fn format_age(&self, now: DateTime<Utc>) -> String {
        let age = now - self.created_at;
        let days = age.num_days();
        let hours = age.num_hours();
        let minutes = age.num_minutes();

        if days >= 7 {
            format!("{}w ago", days / 7)
        } else if days >= 1 {
            format!("{}d ago", days)
        } else if hours >= 1 {
            format!("{}h ago", hours)
        } else if minutes >= 1 {
            format!("{}m ago", minutes)
        } else {
            "just now".to_string()
        }
    }
}

/// Name for snapshots taken automatically before a destructive command,
/// e.g. `pre-reset-2024-05-01T12:00:00Z`.
pub fn auto_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", prefix, at.format("%Y-%m-%dT%H:%M:%SZ"))
}

impl Default for SnapshotState {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotState {
    /// Create a new empty snapshot state with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            snapshots: Vec::new(),
        }
    }

    /// Store a snapshot. An existing snapshot with the same name is replaced.
    pub fn add(&mut self, name: String, votes: Vec<VoteCount>, at: DateTime<Utc>) {
        self.snapshots.retain(|s| s.name != name);
        self.snapshots.push(Snapshot {
            name,
            created_at: at,
            votes,
        });
    }

    /// Store `votes` under an auto-generated `prefix-<timestamp>` name before
    /// they are overwritten. Returns the snapshot name.
    pub fn backup(&mut self, prefix: &str, votes: Vec<VoteCount>, at: DateTime<Utc>) -> String {
        let name = auto_name(prefix, at);
        self.add(name.clone(), votes, at);
        name
    }

    pub fn find(&self, name: &str) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.name == name)
    }

    /// Vote rows stored under `name`, ready to be written back to a vote file.
    pub fn restore(&self, name: &str) -> Result<Vec<VoteCount>, TierError> {
        self.find(name)
            .map(|s| s.votes.clone())
            .ok_or_else(|| TierError::SnapshotNotFound(name.to_string()))
    }

    /// Remove a snapshot. Returns true if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.snapshots.len();
        self.snapshots.retain(|s| s.name != name);
        self.snapshots.len() != before
    }

    /// Snapshots sorted newest first.
    pub fn newest_first(&self) -> Vec<&Snapshot> {
        let mut sorted: Vec<&Snapshot> = self.snapshots.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_state_empty() {
        let state = SnapshotState::new();
        assert_eq!(state.version, 1);
        assert!(state.snapshots.is_empty());
    }

    #[test]
    fn test_add_and_find() {
        let mut state = SnapshotState::new();
        state.add("daily".to_string(), vec![VoteCount::new(1, 2, 3)], at(0));

        let snap = state.find("daily").unwrap();
        assert_eq!(snap.total_votes(), 5);
        assert!(state.find("weekly").is_none());
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut state = SnapshotState::new();
        state.add("daily".to_string(), vec![], at(0));
        state.add("daily".to_string(), vec![VoteCount::new(1, 1, 0)], at(1));

        assert_eq!(state.snapshots.len(), 1);
        assert_eq!(state.find("daily").unwrap().created_at, at(1));
    }

    #[test]
    fn test_restore() {
        let mut state = SnapshotState::new();
        state.add("a".to_string(), vec![VoteCount::new(7, 1, 1)], at(0));

        assert_eq!(state.restore("a").unwrap(), vec![VoteCount::new(7, 1, 1)]);
        assert_eq!(
            state.restore("b").unwrap_err(),
            TierError::SnapshotNotFound("b".to_string())
        );
    }

    #[test]
    fn test_remove() {
        let mut state = SnapshotState::new();
        state.add("a".to_string(), vec![], at(0));
        assert!(state.remove("a"));
        assert!(!state.remove("a"));
    }

    #[test]
    fn test_newest_first() {
        let mut state = SnapshotState::new();
        state.add("old".to_string(), vec![], at(1));
        state.add("new".to_string(), vec![], at(5));
        state.add("mid".to_string(), vec![], at(3));

        let names: Vec<&str> = state.newest_first().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_backup_before_overwrite() {
        let mut state = SnapshotState::new();
        let current = vec![VoteCount::new(1, 3, 2).with_field("name", "Ahri")];

        let name = state.backup("pre-import", current.clone(), at(9));

        assert_eq!(name, "pre-import-2024-05-01T09:00:00Z");
        assert_eq!(state.restore(&name).unwrap(), current);
    }

    #[test]
    fn test_auto_name() {
        assert_eq!(auto_name("pre-reset", at(12)), "pre-reset-2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_format_age() {
        let snap = Snapshot {
            name: "s".to_string(),
            created_at: at(0),
            votes: vec![],
        };
        assert_eq!(snap.format_age(at(0) + Duration::seconds(30)), "just now");
        assert_eq!(snap.format_age(at(0) + Duration::minutes(5)), "5m ago");
        assert_eq!(snap.format_age(at(0) + Duration::hours(3)), "3h ago");
        assert_eq!(snap.format_age(at(0) + Duration::days(2)), "2d ago");
        assert_eq!(snap.format_age(at(0) + Duration::weeks(3)), "3w ago");
    }
}
