//! Split multi-select answers into fractionally weighted rows.
//!
//! A player who ran `"Leadership, Aggression"` counts half a play for each
//! aspect, so totals over the exploded table still add up to one per seat.

use serde_json::Value;

use crate::error::TableResult;
use crate::table::{as_text, Table};

/// Separator used by the survey's multi-select answers.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Weight column appended by [`explode_with_weights`].
pub const WEIGHT_COLUMN: &str = "weight";

/// Split a cell into its items. Always yields at least one item; a null
/// cell yields a single null item.
pub fn split_items(value: &Value, sep: &str) -> Vec<Value> {
    match as_text(value) {
        Some(text) if !sep.is_empty() => text
            .split(sep)
            .map(|item| Value::String(item.to_string()))
            .collect(),
        _ => vec![value.clone()],
    }
}

/// One output row per item of `col`, with the item in `new_col` and
/// `weight = 1 / item count`. Other columns are copied unchanged.
pub fn explode_with_weights(
    table: &Table,
    col: &str,
    new_col: &str,
    sep: &str,
) -> TableResult<Table> {
    let idx = table.column_index(col)?;

    let mut columns = table.columns().to_vec();
    columns.push(new_col.to_string());
    columns.push(WEIGHT_COLUMN.to_string());

    let mut out = Table::new(columns);
    for row in table.rows() {
        let items = split_items(&row[idx], sep);
        // split_items never returns an empty list
        let weight = 1.0 / items.len() as f64;

        for item in items {
            let mut exploded = row.clone();
            exploded.push(item);
            exploded.push(Value::from(weight));
            out.push_row(exploded)?;
        }
    }

    log::debug!("Exploded {} rows into {} on '{}'", table.len(), out.len(), col);

    Ok(out)
}
