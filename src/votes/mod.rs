pub mod filter;
pub mod import;
pub mod reset;
pub mod role_update;
pub mod roles;
pub mod storage;
pub mod types;

pub use filter::{filter_by_role, roles_present};
pub use import::{parse_tabular, VoteImporter};
pub use reset::{soft_reset, ResetMode};
pub use role_update::{apply_role_mapping, set_roles, RoleMapping, RoleUpdateStats};
pub use roles::{default_roles, normalize_role, resolve_role, DEFAULT_ROLES};
pub use storage::{load_role_mapping, load_votes, parse_votes, save_votes};
pub use types::{sum_votes, EntityId, RawVoteRow, VoteCount, DERIVED_KEYS};
