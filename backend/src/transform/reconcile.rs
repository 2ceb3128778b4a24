//! Merge the two historical aspect questions into one column.
//!
//! Early survey versions asked for a single aspect; later ones added a
//! multi-select question. A response fills one or the other.

use crate::error::TableResult;
use crate::table::{is_absent, Table};

/// Fill `primary` from `alternate` where `primary` is empty, then drop
/// `alternate`. When both are filled, `primary` wins.
pub fn merge_category(table: &Table, primary: &str, alternate: &str) -> TableResult<Table> {
    let primary_idx = table.column_index(primary)?;
    let alternate_idx = table.column_index(alternate)?;

    let mut merged = table.clone();
    let mut filled = 0;
    for row in merged.rows_mut() {
        if is_absent(&row[primary_idx]) && !is_absent(&row[alternate_idx]) {
            row[primary_idx] = row[alternate_idx].clone();
            filled += 1;
        }
    }

    log::debug!("Filled {} '{}' values from '{}'", filled, primary, alternate);

    merged.drop_column(alternate)
}
