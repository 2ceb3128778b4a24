//! Bucket free-text categories outside an allow-list into "Other".

use serde_json::Value;

use crate::error::TableResult;
use crate::roster::OTHER;
use crate::table::Table;

/// Replace every value of `col` that is not exactly one of `allowed` with
/// `"Other"`. Null and empty values are replaced too.
pub fn replace_with_other(table: &Table, allowed: &[&str], col: &str) -> TableResult<Table> {
    let idx = table.column_index(col)?;

    let mut out = table.clone();
    let mut replaced = 0;
    for row in out.rows_mut() {
        let keep = matches!(&row[idx], Value::String(s) if allowed.contains(&s.as_str()));
        if !keep {
            row[idx] = Value::String(OTHER.to_string());
            replaced += 1;
        }
    }

    log::debug!("Collapsed {} '{}' values into '{}'", replaced, col, OTHER);

    Ok(out)
}
