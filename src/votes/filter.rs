use super::roles::{resolve_role, split_roles};
use super::types::VoteCount;

/// Keep only rows voted in `role`. A row's role field may list several
/// roles (`"Top,Mid"`); rows without a role never match.
pub fn filter_by_role(rows: Vec<VoteCount>, role: &str) -> Vec<VoteCount> {
    rows.into_iter()
        .filter(|row| {
            row.role()
                .map(|roles| split_roles(roles).iter().any(|r| r.eq_ignore_ascii_case(role)))
                .unwrap_or(false)
        })
        .collect()
}

/// Known roles present in the rows, in order of first appearance.
/// Labels that do not resolve against `known` (exports write `"None"` for
/// champions nobody voted on) are skipped.
pub fn roles_present(rows: &[VoteCount], known: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for roles in rows.iter().filter_map(VoteCount::role) {
        for role in split_roles(roles) {
            let Ok(role) = resolve_role(&role, known) else {
                continue;
            };
            if !seen.contains(&role) {
                seen.push(role);
            }
        }
    }
    seen
}
