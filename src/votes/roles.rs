use crate::error::TierError;

/// Roles a champion can be voted for, in display order.
pub const DEFAULT_ROLES: [&str; 5] = ["Top", "Jungle", "Mid", "ADC", "Support"];

/// Map Riot's position names onto the role labels used in vote files.
/// Unknown spellings pass through trimmed.
pub fn normalize_role(role: &str) -> String {
    let role = role.trim();
    match role.to_ascii_uppercase().as_str() {
        "TOP" => "Top",
        "JUNGLE" => "Jungle",
        "MIDDLE" | "MID" => "Mid",
        "BOTTOM" | "ADC" => "ADC",
        "UTILITY" | "SUPPORT" => "Support",
        _ => role,
    }
    .to_string()
}

/// Resolve user input to one of the known roles, case-insensitively.
pub fn resolve_role(input: &str, known: &[String]) -> Result<String, TierError> {
    let normalized = normalize_role(input);
    known
        .iter()
        .find(|r| r.eq_ignore_ascii_case(&normalized))
        .cloned()
        .ok_or_else(|| TierError::UnknownRole {
            role: input.trim().to_string(),
            known: known.join(", "),
        })
}

/// Split a comma-separated role list (`"Top,Mid"`) into normalized labels.
pub fn split_roles(roles: &str) -> Vec<String> {
    roles
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(normalize_role)
        .collect()
}

pub fn default_roles() -> Vec<String> {
    DEFAULT_ROLES.iter().map(|r| r.to_string()).collect()
}
