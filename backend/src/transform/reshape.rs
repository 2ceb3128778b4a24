//! Wide-to-long player reshape.
//!
//! ```text
//! submission_id | name_player_1 | hero_player_1 | name_player_2 | hero_player_2
//! 1             | Alice         | Thor          | Bob           | Hulk
//!
//!                              ↓
//!
//! submission_id | player_num | name  | hero
//! 1             | 1          | Alice | Thor
//! 1             | 2          | Bob   | Hulk
//! ```
//!
//! Seats where every feature is empty (seat 4 in a 3-player game) produce
//! no row.

use serde_json::Value;
use std::collections::HashMap;

use super::schema::PlayerSchema;
use crate::error::TableResult;
use crate::table::{as_text, is_absent, Table};

/// Seat number column added by the reshape.
pub const PLAYER_NUM_COLUMN: &str = "player_num";

/// Values collected for one (session, seat) pair.
struct SeatGroup {
    session_order: usize,
    id: Value,
    player: u32,
    values: Vec<Value>,
}

/// Reshape the wide per-seat columns described by `schema` into one row per
/// (session, seat).
///
/// Output columns are `[id_col, "player_num", features...]` with features in
/// `schema.features` order. Rows follow session order of first appearance,
/// then seat number. When a session id repeats, the first present value per
/// feature wins. Rows with an empty id are skipped.
pub fn reshape_players(table: &Table, id_col: &str, schema: &PlayerSchema) -> TableResult<Table> {
    let id_idx = table.column_index(id_col)?;

    let mut columns = vec![id_col.to_string(), PLAYER_NUM_COLUMN.to_string()];
    columns.extend(schema.features.iter().cloned());

    // Output position of each recognized column's feature
    let feature_slots: Vec<usize> = schema
        .columns
        .iter()
        .map(|c| schema.feature_position(&c.feature).unwrap_or_default())
        .collect();

    let mut sessions: HashMap<String, usize> = HashMap::new();
    let mut lookup: HashMap<(usize, u32), usize> = HashMap::new();
    let mut groups: Vec<SeatGroup> = Vec::new();
    let mut skipped_ids = 0;

    for row in table.rows() {
        let id = &row[id_idx];
        let Some(key) = as_text(id).filter(|_| !is_absent(id)) else {
            skipped_ids += 1;
            continue;
        };

        let next_order = sessions.len();
        let session_order = *sessions.entry(key).or_insert(next_order);

        // Un-pivot: one (id, feature, seat, value) tuple per player column
        for (col, &slot) in schema.columns.iter().zip(&feature_slots) {
            let group_idx = *lookup.entry((session_order, col.player)).or_insert_with(|| {
                groups.push(SeatGroup {
                    session_order,
                    id: id.clone(),
                    player: col.player,
                    values: vec![Value::Null; schema.features.len()],
                });
                groups.len() - 1
            });

            let value = &row[col.index];
            let cell = &mut groups[group_idx].values[slot];
            if is_absent(cell) && !is_absent(value) {
                *cell = value.clone();
            }
        }
    }

    if skipped_ids > 0 {
        log::warn!("Skipped {} rows with an empty '{}'", skipped_ids, id_col);
    }

    groups.sort_by_key(|g| (g.session_order, g.player));

    let mut out = Table::new(columns);
    let mut empty_seats = 0;
    for group in groups {
        if group.values.iter().all(is_absent) {
            empty_seats += 1;
            continue;
        }
        let mut row = Vec::with_capacity(group.values.len() + 2);
        row.push(group.id);
        row.push(Value::from(group.player));
        row.extend(group.values);
        out.push_row(row)?;
    }

    log::debug!(
        "Reshaped {} player rows ({} empty seats dropped)",
        out.len(),
        empty_seats
    );

    Ok(out)
}
