//! Editing the role labels stored on vote rows.

use std::collections::BTreeMap;

use super::roles::{normalize_role, resolve_role};
use super::types::VoteCount;
use crate::error::{Result, TierError};

/// Champion name to Riot position names, as produced by the role mapping script:
/// `{ "Aatrox": ["TOP"], "Sona": ["UTILITY", "MIDDLE"] }`.
pub type RoleMapping = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RoleUpdateStats {
    pub updated: usize,
    pub unchanged: usize,
    /// Names in the mapping with no matching row.
    pub unmatched: Vec<String>,
}

/// Replace the roles of the row whose id is `id`.
///
/// Every role must resolve against `known`. Duplicates are dropped and the
/// result is stored comma separated.
pub fn set_roles(
    rows: &mut [VoteCount],
    id: &str,
    roles: &[String],
    known: &[String],
) -> Result<String> {
    if roles.is_empty() {
        return Err(TierError::invalid(format!("no roles given for '{}'", id)));
    }

    let mut resolved: Vec<String> = Vec::with_capacity(roles.len());
    for role in roles {
        let role = resolve_role(role, known)?;
        if !resolved.contains(&role) {
            resolved.push(role);
        }
    }

    let row = rows
        .iter_mut()
        .find(|row| row.id.to_string() == id)
        .ok_or_else(|| TierError::EntityNotFound(id.to_string()))?;

    let joined = resolved.join(",");
    row.fields
        .insert("role".to_string(), serde_json::Value::String(joined.clone()));
    Ok(joined)
}

/// Apply a name-keyed role mapping to every matching row.
///
/// Roles are normalized from Riot spelling; entries with an empty list are
/// left alone.
pub fn apply_role_mapping(rows: &mut [VoteCount], mapping: &RoleMapping) -> RoleUpdateStats {
    let mut stats = RoleUpdateStats::default();

    for (name, roles) in mapping {
        let Some(row) = rows.iter_mut().find(|row| row.name() == Some(name.as_str())) else {
            stats.unmatched.push(name.clone());
            continue;
        };
        if roles.is_empty() {
            stats.unchanged += 1;
            continue;
        }

        let joined = roles
            .iter()
            .map(|r| normalize_role(r))
            .collect::<Vec<_>>()
            .join(",");
        if row.role() == Some(joined.as_str()) {
            stats.unchanged += 1;
            continue;
        }

        tracing::debug!(champion = %name, roles = %joined, "updating roles");
        row.fields
            .insert("role".to_string(), serde_json::Value::String(joined));
        stats.updated += 1;
    }

    stats
}
