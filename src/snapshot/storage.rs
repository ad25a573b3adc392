use super::types::SnapshotState;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default snapshot file path (~/.config/champ-tiers/snapshots.json)
pub fn get_snapshot_path() -> PathBuf {
    crate::config::get_config_dir().join("snapshots.json")
}

/// Load snapshot state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_snapshot_state(path: &Path) -> Result<SnapshotState> {
    if !path.exists() {
        return Ok(SnapshotState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file at {}", path.display()))?;

    let state: SnapshotState =
        serde_json::from_reader(file).context("Failed to load snapshot state")?;

    if state.version != 1 {
        anyhow::bail!("Unsupported snapshot state version: {}", state.version);
    }

    Ok(state)
}

/// Save snapshot state to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_snapshot_state(path: &Path, state: &SnapshotState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize snapshot state")?;

    file.commit().context("Failed to save snapshot state")?;

    Ok(())
}
