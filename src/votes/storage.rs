use super::role_update::RoleMapping;
use super::types::{RawVoteRow, VoteCount};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::path::Path;

/// Parse a JSON array of vote rows, rejecting negative counts.
pub fn parse_votes(json: &str) -> Result<Vec<VoteCount>> {
    let raw: Vec<RawVoteRow> = serde_json::from_str(json).context("Invalid vote JSON")?;

    raw.into_iter()
        .enumerate()
        .map(|(i, row)| {
            VoteCount::try_from(row).with_context(|| format!("Invalid vote row at index {}", i))
        })
        .collect()
}

/// Load vote rows from a JSON file.
pub fn load_votes(path: &Path) -> Result<Vec<VoteCount>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read vote file at {}", path.display()))?;

    parse_votes(&content).with_context(|| format!("Failed to load votes from {}", path.display()))
}

/// Save vote rows to a JSON file atomically
///
/// Uses atomic-write-file so a crash mid-write never leaves a truncated vote file.
pub fn save_votes(path: &Path, rows: &[VoteCount]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, rows).context("Failed to serialize votes")?;

    file.commit()
        .with_context(|| format!("Failed to save votes to {}", path.display()))?;

    Ok(())
}

/// Load a champion-name to roles mapping (`{"Aatrox": ["TOP"], ...}`).
pub fn load_role_mapping(path: &Path) -> Result<RoleMapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read role mapping at {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid role mapping in {}", path.display()))
}
