//! Import of pasted tier-list tables.
//!
//! Input is a header line followed by one row per champion:
//!
//! ```text
//! Champion    Tier  Score  Votes
//! Jarvan IV   B     0.554  1/1
//! ```
//!
//! Columns are separated by tabs or by two or more spaces, so single spaces
//! inside champion names survive. The last column is `upvotes/total`.

use std::collections::HashMap;

use super::roles::normalize_role;
use super::types::VoteCount;
use crate::error::{Result, TierError};

/// Assigns ids by first appearance of a champion name, so the same
/// champion keeps its id across several imported roles.
#[derive(Debug)]
pub struct VoteImporter {
    ids: HashMap<String, u64>,
    next_id: u64,
}

impl Default for VoteImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteImporter {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 1,
        }
    }

    fn id_for(&mut self, name: &str) -> u64 {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Parse one role's table. Rows with fewer than four columns are skipped.
    pub fn parse(&mut self, raw: &str, role: &str) -> Result<Vec<VoteCount>> {
        let role = normalize_role(role);
        let mut rows = Vec::new();

        for (line_no, line) in raw.trim().lines().enumerate().skip(1) {
            let parts = split_columns(line);
            if parts.len() < 4 {
                continue;
            }

            let name = parts[..parts.len() - 3].join(" ");
            let votes = parts[parts.len() - 1];
            let (upvotes, total) = parse_votes(votes).map_err(|e| {
                TierError::invalid(format!("line {}: '{}' - {}", line_no + 1, line.trim(), e))
            })?;

            let id = self.id_for(&name);
            rows.push(
                VoteCount::new(id, upvotes, total - upvotes)
                    .with_field("name", name)
                    .with_field("role", role.as_str()),
            );
        }

        Ok(rows)
    }
}

/// Parse a single table with fresh ids.
pub fn parse_tabular(raw: &str, role: &str) -> Result<Vec<VoteCount>> {
    VoteImporter::new().parse(raw, role)
}

/// Split on tabs and on runs of two or more spaces.
fn split_columns(line: &str) -> Vec<&str> {
    line.trim()
        .split('\t')
        .flat_map(|chunk| chunk.split("  "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_votes(s: &str) -> std::result::Result<(u64, u64), String> {
    let (up, total) = s
        .split_once('/')
        .ok_or_else(|| format!("votes must look like 'up/total', got '{}'", s))?;
    let up: u64 = up
        .trim()
        .parse()
        .map_err(|_| format!("invalid upvote count '{}'", up.trim()))?;
    let total: u64 = total
        .trim()
        .parse()
        .map_err(|_| format!("invalid vote total '{}'", total.trim()))?;
    if up > total {
        return Err(format!("{} upvotes out of only {} votes", up, total));
    }
    Ok((up, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votes::EntityId;

    const TOP: &str = "
Champion\tTier\tScore\tVotes
Jayce\tB\t0.604\t5/6
Dr. Mundo\tB\t0.472\t1/2
Tahm Kench\tC\t0.424\t0/1
";

    #[test]
    fn test_parse_tab_separated() {
        let rows = parse_tabular(TOP, "Top").unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].name(), Some("Jayce"));
        assert_eq!(rows[0].upvotes, 5);
        assert_eq!(rows[0].downvotes, 1);
        assert_eq!(rows[0].role(), Some("Top"));
        assert_eq!(rows[0].id, EntityId::Number(1));

        assert_eq!(rows[1].name(), Some("Dr. Mundo"));
        assert_eq!(rows[2].name(), Some("Tahm Kench"));
        assert_eq!(rows[2].upvotes, 0);
        assert_eq!(rows[2].downvotes, 1);
    }

    #[test]
    fn test_parse_space_aligned_columns() {
        let raw = "Champion      Tier  Score  Votes\nJarvan IV     B     0.554  1/1\nNunu & Willump  C  0.463  0/1";
        let rows = parse_tabular(raw, "JUNGLE").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), Some("Jarvan IV"));
        assert_eq!(rows[1].name(), Some("Nunu & Willump"));
        assert_eq!(rows[1].role(), Some("Jungle"));
    }

    #[test]
    fn test_zero_vote_rows() {
        let raw = "Champion\tTier\tScore\tVotes\nXayah\tC\t0.860\t0/0";
        let rows = parse_tabular(raw, "ADC").unwrap();
        assert_eq!(rows[0].total_votes(), 0);
    }

    #[test]
    fn test_short_rows_skipped() {
        let raw = "Champion\tTier\tScore\tVotes\nbroken\t1/1\n\nLux\tB\t0.8\t1/1";
        let rows = parse_tabular(raw, "Mid").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name(), Some("Lux"));
    }

    #[test]
    fn test_upvotes_above_total_rejected() {
        let raw = "Champion\tTier\tScore\tVotes\nZed\tB\t0.8\t5/3";
        let err = parse_tabular(raw, "Mid").unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {}", err);
    }

    #[test]
    fn test_malformed_votes_rejected() {
        let raw = "Champion\tTier\tScore\tVotes\nZed\tB\t0.8\tmany";
        assert!(matches!(
            parse_tabular(raw, "Mid"),
            Err(TierError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ids_stable_across_roles() {
        let mut importer = VoteImporter::new();
        let mid = importer
            .parse("h\th\th\th\nIrelia\tB\t0.8\t4/4\nZed\tB\t0.8\t4/4", "Mid")
            .unwrap();
        let top = importer
            .parse("h\th\th\th\nJayce\tB\t0.6\t5/6\nIrelia\tB\t0.5\t3/4", "Top")
            .unwrap();

        assert_eq!(mid[0].id, EntityId::Number(1));
        assert_eq!(mid[1].id, EntityId::Number(2));
        assert_eq!(top[0].id, EntityId::Number(3));
        assert_eq!(top[1].id, EntityId::Number(1));
    }

    #[test]
    fn test_split_columns() {
        assert_eq!(split_columns("a b\tc   d"), vec!["a b", "c", "d"]);
    }
}
