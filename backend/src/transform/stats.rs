//! Aggregates shown on the dashboard's stats page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::error::TableResult;
use crate::roster::{
    ASPECT_COLUMN, HERO_COLUMN, ID_COLUMN, NAME_COLUMN, OUTCOME_COLUMN, SCENARIO_COLUMN, WIN,
};
use crate::table::{as_f64, as_text, is_absent, Table};

/// Count column added by [`count_by`].
pub const COUNT_COLUMN: &str = "count";

/// Weighted total column added by [`sum_weights_by`].
pub const PLAYS_COLUMN: &str = "plays";

/// Headline metrics for the stats page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub games_played: usize,
    pub players: usize,
    pub scenarios: usize,
    pub heroes: usize,
    /// Share of sessions won, rounded to two decimals
    pub win_rate: f64,
    pub hero_aspect_combinations: usize,
}

impl SummaryStats {
    pub fn compute(sessions: &Table, players: &Table) -> TableResult<Self> {
        let outcomes = sessions.column_values(OUTCOME_COLUMN)?;
        let wins = outcomes.iter().filter(|v| **v == WIN).count();
        let win_rate = if outcomes.is_empty() {
            0.0
        } else {
            (wins as f64 / outcomes.len() as f64 * 100.0).round() / 100.0
        };

        let heroes = players.column_values(HERO_COLUMN)?;
        let aspects = players.column_values(ASPECT_COLUMN)?;
        let combinations: HashSet<(String, Option<String>)> = heroes
            .iter()
            .zip(&aspects)
            .filter_map(|(h, a)| Some((present_text(h)?, present_text(a))))
            .collect();

        Ok(Self {
            games_played: count_distinct(sessions, ID_COLUMN)?,
            players: count_distinct(players, NAME_COLUMN)?,
            scenarios: count_distinct(sessions, SCENARIO_COLUMN)?,
            heroes: count_distinct(players, HERO_COLUMN)?,
            win_rate,
            hero_aspect_combinations: combinations.len(),
        })
    }
}

/// Number of distinct present values in a column.
pub fn count_distinct(table: &Table, col: &str) -> TableResult<usize> {
    let distinct: HashSet<String> = table
        .column_values(col)?
        .into_iter()
        .filter_map(present_text)
        .collect();
    Ok(distinct.len())
}

/// Most common present value of a column. Ties go to the value seen first.
pub fn most_frequent_value(table: &Table, col: &str) -> TableResult<Option<String>> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (order, value) in table.column_values(col)?.into_iter().enumerate() {
        if let Some(text) = present_text(value) {
            counts.entry(text).or_insert((0, order)).0 += 1;
        }
    }

    Ok(counts
        .into_iter()
        .max_by(|(_, (ca, oa)), (_, (cb, ob))| ca.cmp(cb).then(ob.cmp(oa)))
        .map(|(value, _)| value))
}

/// Row counts per distinct combination of `cols`, in first-seen order.
/// Rows with an empty key cell are not counted.
pub fn count_by(table: &Table, cols: &[&str]) -> TableResult<Table> {
    let indices = cols
        .iter()
        .map(|c| table.column_index(c))
        .collect::<TableResult<Vec<_>>>()?;

    let mut order: Vec<Vec<Value>> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in table.rows() {
        let key: Vec<Value> = indices.iter().map(|&i| row[i].clone()).collect();
        if key.iter().any(is_absent) {
            continue;
        }
        let entry = counts.entry(Value::Array(key.clone()).to_string()).or_insert_with(|| {
            order.push(key);
            0
        });
        *entry += 1;
    }

    let mut columns: Vec<&str> = cols.to_vec();
    columns.push(COUNT_COLUMN);
    let mut out = Table::new(columns);
    for key in order {
        let count = counts[&Value::Array(key.clone()).to_string()];
        let mut row = key;
        row.push(Value::from(count));
        out.push_row(row)?;
    }

    Ok(out)
}

/// Sum of `weight_col` per value of `col`, in first-seen order.
pub fn sum_weights_by(table: &Table, col: &str, weight_col: &str) -> TableResult<Table> {
    let idx = table.column_index(col)?;
    let weight_idx = table.column_index(weight_col)?;

    let mut order: Vec<Value> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in table.rows() {
        let Some(key) = present_text(&row[idx]) else {
            continue;
        };
        let weight = as_f64(&row[weight_idx]).unwrap_or(0.0);
        totals
            .entry(key)
            .and_modify(|t| *t += weight)
            .or_insert_with(|| {
                order.push(row[idx].clone());
                weight
            });
    }

    let mut out = Table::new([col, PLAYS_COLUMN]);
    for key in order {
        let total = present_text(&key).map(|k| totals[&k]).unwrap_or(0.0);
        out.push_row(vec![key, Value::from(total)])?;
    }

    Ok(out)
}

fn present_text(value: &Value) -> Option<String> {
    if is_absent(value) {
        None
    } else {
        as_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use serde_json::json;

    fn sessions() -> Table {
        Table::from_rows(
            ["submission_id", "scenario", "outcome"],
            vec![
                vec![json!("1"), json!("Rhino"), json!("Win")],
                vec![json!("2"), json!("Rhino"), json!("Loss")],
                vec![json!("3"), json!("Ultron"), json!("Win")],
            ],
        )
        .unwrap()
    }

    fn players() -> Table {
        Table::from_rows(
            ["submission_id", "player_num", "name", "hero", "aspect"],
            vec![
                vec![json!("1"), json!(1), json!("Alice"), json!("Thor"), json!("Aggression")],
                vec![json!("1"), json!(2), json!("Bob"), json!("Hulk"), json!("Basic")],
                vec![json!("2"), json!(1), json!("Alice"), json!("Thor"), json!("Aggression")],
                vec![json!("3"), json!(1), json!("Alice"), json!("Thor"), json!("Justice")],
                vec![json!("3"), json!(2), Value::Null, json!("Storm"), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::compute(&sessions(), &players()).unwrap();
        assert_eq!(
            stats,
            SummaryStats {
                games_played: 3,
                players: 2,
                scenarios: 2,
                heroes: 3,
                win_rate: 0.67,
                hero_aspect_combinations: 4,
            }
        );
    }

    #[test]
    fn test_summary_stats_empty_sessions() {
        let empty = Table::new(["submission_id", "scenario", "outcome"]);
        let stats = SummaryStats::compute(&empty, &players()).unwrap();
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn test_most_frequent_value() {
        assert_eq!(most_frequent_value(&players(), "hero").unwrap(), Some("Thor".to_string()));
        assert_eq!(most_frequent_value(&sessions(), "outcome").unwrap(), Some("Win".to_string()));
        assert_eq!(
            most_frequent_value(&sessions(), "region"),
            Err(TableError::MissingColumn("region".into()))
        );
    }

    #[test]
    fn test_most_frequent_value_tie_and_empty() {
        let table = Table::from_rows(
            ["hero"],
            vec![
                vec![json!("Nova")],
                vec![json!("Echo")],
                vec![json!("Echo")],
                vec![json!("Nova")],
            ],
        )
        .unwrap();
        assert_eq!(most_frequent_value(&table, "hero").unwrap(), Some("Nova".to_string()));

        let blank = Table::from_rows(["hero"], vec![vec![Value::Null]]).unwrap();
        assert_eq!(most_frequent_value(&blank, "hero").unwrap(), None);
    }

    #[test]
    fn test_count_by() {
        let counts = count_by(&sessions(), &["scenario", "outcome"]).unwrap();
        assert_eq!(counts.columns(), ["scenario", "outcome", "count"]);
        assert_eq!(
            counts.rows(),
            [
                vec![json!("Rhino"), json!("Win"), json!(1)],
                vec![json!("Rhino"), json!("Loss"), json!(1)],
                vec![json!("Ultron"), json!("Win"), json!(1)],
            ]
        );

        let heroes = count_by(&players(), &["hero"]).unwrap();
        assert_eq!(heroes.rows()[0], vec![json!("Thor"), json!(3)]);
    }

    #[test]
    fn test_sum_weights_by() {
        let aspects = Table::from_rows(
            ["individual_aspect", "weight"],
            vec![
                vec![json!("Leadership"), json!(0.5)],
                vec![json!("Aggression"), json!(0.5)],
                vec![json!("Leadership"), json!(1.0)],
                vec![Value::Null, json!(1.0)],
            ],
        )
        .unwrap();

        let plays = sum_weights_by(&aspects, "individual_aspect", "weight").unwrap();
        assert_eq!(plays.columns(), ["individual_aspect", "plays"]);
        assert_eq!(
            plays.rows(),
            [
                vec![json!("Leadership"), json!(1.5)],
                vec![json!("Aggression"), json!(0.5)],
            ]
        );
    }
}
