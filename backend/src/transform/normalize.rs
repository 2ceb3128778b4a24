//! Column name canonicalization.
//!
//! `"Hero (Player 1)"` becomes `hero_player_1`, `"Submission ID"` becomes
//! `submission_id`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::error::TableResult;
use crate::table::Table;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Canonicalize one column name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into one
/// underscore, then strips leading and trailing underscores. Idempotent.
pub fn clean_name(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_ALNUM
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

/// Copy of `table` with every column name canonicalized.
///
/// Two raw names that clean to the same identifier are not rejected; the
/// collision is logged.
pub fn normalize_column_names(table: &Table) -> TableResult<Table> {
    let cleaned: Vec<String> = table.columns().iter().map(|c| clean_name(c)).collect();

    let mut seen = HashSet::new();
    for name in &cleaned {
        if !seen.insert(name.as_str()) {
            log::warn!("Several source columns normalize to '{}'", name);
        }
    }

    table.clone().with_columns(cleaned)
}
