use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Tier, TieredEntity};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a score with three decimals (0.604)
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Format votes as "up/total"
fn format_votes(entity: &TieredEntity) -> String {
    format!("{}/{}", entity.scored.votes.upvotes, entity.scored.total_votes)
}

/// Format a tier label padded to the widest label ("Shit")
fn format_tier_label(tier: Tier, use_colors: bool) -> String {
    let label = format!("{:<4}", tier.as_str());
    if use_colors {
        let (r, g, b) = tier.color();
        label.truecolor(r, g, b).bold().to_string()
    } else {
        label
    }
}

/// Format a tier list as a table, one entity per line, best first.
/// Columns: rank, tier, score, name, votes. A blank line separates tiers.
pub fn format_tier_table(entities: &[TieredEntity], use_colors: bool) -> String {
    if entities.is_empty() {
        return "No champions found.".to_string();
    }

    let term_width = get_terminal_width();

    // rank 4 + tier 4 + score 5 + votes ~9, plus separators
    let rank_width = 4;
    let separator = "  ";
    let votes_width = entities
        .iter()
        .map(|e| format_votes(e).len())
        .max()
        .unwrap_or(3);
    let fixed_width = rank_width + 4 + 5 + votes_width + separator.len() * 4;

    let name_width = match term_width {
        Some(width) if width > fixed_width + 10 => Some(width - fixed_width),
        Some(_) => Some(20),
        None => None,
    };
    let widest_name = entities
        .iter()
        .map(|e| e.scored.votes.display_name().chars().count())
        .max()
        .unwrap_or(0);
    let pad = name_width.map_or(widest_name, |w| widest_name.min(w));

    let mut lines = Vec::with_capacity(entities.len() + 8);
    let mut previous: Option<Tier> = None;

    for (idx, entity) in entities.iter().enumerate() {
        if previous.is_some_and(|t| t != entity.tier) {
            lines.push(String::new());
        }
        previous = Some(entity.tier);

        let rank = format!("{:>3}.", idx + 1);
        let name = entity.scored.votes.display_name();
        let name = match name_width {
            Some(w) => truncate_name(&name, w),
            None => name,
        };
        let name = format!("{:<width$}", name, width = pad);
        let score = format_score(entity.scored.adjusted_score);
        let votes = format!("{:>width$}", format_votes(entity), width = votes_width);

        let line = if use_colors {
            format!(
                "{}{}{}{}{}{}{}{}{}",
                rank.dimmed(),
                separator,
                format_tier_label(entity.tier, true),
                separator,
                score.bold(),
                separator,
                name,
                separator,
                votes.dimmed()
            )
        } else {
            format!(
                "{}{}{}{}{}{}{}{}{}",
                rank,
                separator,
                format_tier_label(entity.tier, false),
                separator,
                score,
                separator,
                name,
                separator,
                votes
            )
        };
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format a tier list as tab-separated values.
///
/// Same layout as the import format (`Champion Tier Score Votes`), so the output
/// of one run can be pasted back in through `import`.
pub fn format_tsv(entities: &[TieredEntity]) -> String {
    let mut lines = vec!["Champion\tTier\tScore\tVotes".to_string()];
    lines.extend(entities.iter().map(|e| {
        format!(
            "{}\t{}\t{}\t{}",
            e.scored.votes.display_name(),
            e.tier,
            format_score(e.scored.adjusted_score),
            format_votes(e)
        )
    }));
    lines.join("\n")
}

/// Format a tier list as pretty-printed JSON, keeping every pass-through field.
pub fn format_json(entities: &[TieredEntity]) -> Result<String> {
    serde_json::to_string_pretty(entities).context("Failed to serialize tier list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoredEntity;
    use crate::votes::VoteCount;

    fn entity(name: &str, tier: Tier, score: f64, up: u64, down: u64) -> TieredEntity {
        TieredEntity {
            scored: ScoredEntity {
                votes: VoteCount::new(name, up, down).with_field("name", name),
                total_votes: up + down,
                adjusted_score: score,
            },
            tier,
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.6041), "0.604");
        assert_eq!(format_score(1.0), "1.000");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Aurelion Sol", 20), "Aurelion Sol");
        assert_eq!(truncate_name("Aurelion Sol", 8), "Aurel...");
        assert_eq!(truncate_name("Aurelion Sol", 3), "Aur");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_tier_table(&[], false), "No champions found.");
    }

    #[test]
    fn test_table_groups_tiers() {
        let entities = vec![
            entity("Jinx", Tier::God, 0.9, 9, 1),
            entity("Vayne", Tier::S, 0.8, 8, 2),
            entity("Ezreal", Tier::S, 0.7, 7, 3),
        ];
        let table = format_tier_table(&entities, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4); // three rows plus one tier break
        assert!(lines[0].contains("God"));
        assert!(lines[0].contains("Jinx"));
        assert!(lines[0].contains("9/10"));
        assert!(lines[1].is_empty());
        assert!(lines[2].starts_with("  2."));
        assert!(lines[3].contains("0.700"));
    }

    #[test]
    fn test_tsv_matches_import_layout() {
        let entities = vec![entity("Dr. Mundo", Tier::B, 0.472, 1, 1)];
        let tsv = format_tsv(&entities);
        assert_eq!(tsv, "Champion\tTier\tScore\tVotes\nDr. Mundo\tB\t0.472\t1/2");

        let reimported = crate::votes::parse_tabular(&tsv, "Top").unwrap();
        assert_eq!(reimported[0].name(), Some("Dr. Mundo"));
        assert_eq!(reimported[0].upvotes, 1);
        assert_eq!(reimported[0].downvotes, 1);
    }

    #[test]
    fn test_json_keeps_fields() {
        let entities = vec![entity("Lux", Tier::C, 0.5, 1, 1)];
        let json = format_json(&entities).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["name"], "Lux");
        assert_eq!(value[0]["tier"], "C");
        assert_eq!(value[0]["total_votes"], 2);
        assert_eq!(value[0]["adjusted_score"], 0.5);
    }

    #[test]
    fn test_json_output_ranks_again_without_duplicate_keys() {
        let rows: Vec<VoteCount> = (0..3)
            .map(|i| VoteCount::new(i, 10 - i, i).with_field("name", format!("c{}", i)))
            .collect();
        let first = crate::scoring::rank(&rows, &Default::default()).unwrap();
        let json = format_json(&first).unwrap();

        let reloaded = crate::votes::parse_votes(&json).unwrap();
        let second = crate::scoring::rank(&reloaded, &Default::default()).unwrap();
        let json = format_json(&second).unwrap();

        assert_eq!(json.matches("\"tier\"").count(), 3);
        assert_eq!(json.matches("\"total_votes\"").count(), 3);
        assert_eq!(json.matches("\"adjusted_score\"").count(), 3);
        assert_eq!(second, first);
    }
}
