pub mod storage;
pub mod types;

pub use storage::{get_snapshot_path, load_snapshot_state, save_snapshot_state};
pub use types::{auto_name, Snapshot, SnapshotState};
