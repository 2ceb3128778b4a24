//! Dense hero × aspect presence grid.
//!
//! The heatmap needs one cell for every pair in the full cross-product of
//! the roster and the aspect list, whether or not anyone played it. Cells
//! are a presence flag, not a count.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::TableResult;
use crate::roster::{HERO_COLUMN, INDIVIDUAL_ASPECT_COLUMN};
use crate::table::{as_f64, as_text, Table};

use super::explode::WEIGHT_COLUMN;

/// Presence flag column of the grid.
pub const OBSERVED_COLUMN: &str = "observed";

/// Names of the observation columns feeding the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapSpec {
    pub entity_col: String,
    pub category_col: String,
    pub weight_col: String,
}

impl Default for HeatmapSpec {
    fn default() -> Self {
        Self {
            entity_col: HERO_COLUMN.to_string(),
            category_col: INDIVIDUAL_ASPECT_COLUMN.to_string(),
            weight_col: WEIGHT_COLUMN.to_string(),
        }
    }
}

/// Build the dense grid from sparse `(entity, category, weight)` rows.
///
/// The output has exactly `entities.len() * categories.len()` rows with
/// columns `[entity_col, category_col, "observed"]`, ordered by each
/// entity's position in `entities` and then by `categories` order.
/// `observed` is 1 when the summed weight for the pair is positive, else 0.
/// Observations outside either enumeration are ignored.
pub fn build_heatmap(
    observations: &Table,
    spec: &HeatmapSpec,
    entities: &[&str],
    categories: &[&str],
) -> TableResult<Table> {
    let entity_idx = observations.column_index(&spec.entity_col)?;
    let category_idx = observations.column_index(&spec.category_col)?;
    let weight_idx = observations.column_index(&spec.weight_col)?;

    // Aggregate before joining so repeated observations cannot fan out the grid
    let mut totals: HashMap<(String, String), f64> = HashMap::new();
    for row in observations.rows() {
        let (Some(entity), Some(category)) =
            (as_text(&row[entity_idx]), as_text(&row[category_idx]))
        else {
            continue;
        };
        let weight = as_f64(&row[weight_idx]).unwrap_or(0.0);
        *totals.entry((entity, category)).or_insert(0.0) += weight;
    }

    // Cross-product in enumeration order; entity-major order doubles as the sort
    let mut grid = Table::new([
        spec.entity_col.as_str(),
        spec.category_col.as_str(),
        OBSERVED_COLUMN,
    ]);
    for entity in entities {
        for category in categories {
            let total = totals
                .get(&(entity.to_string(), category.to_string()))
                .copied()
                .unwrap_or(0.0);
            let observed = if total > 0.0 { 1 } else { 0 };
            grid.push_row(vec![
                Value::from(*entity),
                Value::from(*category),
                Value::from(observed),
            ])?;
        }
    }

    let grid = grid.drop_duplicates();

    log::debug!(
        "Heatmap grid: {} cells, {} observed",
        grid.len(),
        grid.rows().iter().filter(|r| r[2] == 1).count()
    );

    Ok(grid)
}

/// Split the grid into `parts` contiguous chunks without cutting an
/// entity's row group in half. Chunks may be empty when there are fewer
/// entities than parts.
pub fn heatmap_chunks(grid: &Table, categories_per_entity: usize, parts: usize) -> Vec<Table> {
    if parts == 0 {
        return Vec::new();
    }

    let group = categories_per_entity.max(1);
    let entities = grid.len().div_ceil(group);
    let per_part = entities.div_ceil(parts).max(1) * group;

    (0..parts)
        .map(|part| {
            let start = (part * per_part).min(grid.len());
            let end = ((part + 1) * per_part).min(grid.len());
            let rows = grid.rows()[start..end].to_vec();
            // Rows come from a valid table, widths already match
            Table::from_rows(grid.columns().to_vec(), rows).unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{ASPECTS, HEROES};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn observations(rows: Vec<(&str, &str, f64)>) -> Table {
        Table::from_rows(
            ["hero", "individual_aspect", "weight"],
            rows.into_iter()
                .map(|(h, a, w)| vec![json!(h), json!(a), json!(w)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_small_grid() {
        let obs = observations(vec![("Hulk", "Basic", 1.0)]);
        let grid = build_heatmap(
            &obs,
            &HeatmapSpec::default(),
            &["Hulk", "Thor"],
            &["Basic", "Aggression"],
        )
        .unwrap();

        assert_eq!(grid.columns(), ["hero", "individual_aspect", "observed"]);
        assert_eq!(
            grid.rows(),
            [
                vec![json!("Hulk"), json!("Basic"), json!(1)],
                vec![json!("Hulk"), json!("Aggression"), json!(0)],
                vec![json!("Thor"), json!("Basic"), json!(0)],
                vec![json!("Thor"), json!("Aggression"), json!(0)],
            ]
        );
    }

    #[test]
    fn test_repeated_observations_collapse_to_one() {
        let obs = observations(vec![
            ("Thor", "Leadership", 0.5),
            ("Thor", "Leadership", 0.5),
            ("Thor", "Leadership", 1.0),
        ]);
        let grid =
            build_heatmap(&obs, &HeatmapSpec::default(), &["Thor"], &["Leadership", "Justice"])
                .unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.rows()[0][2], json!(1));
        assert_eq!(grid.rows()[1][2], json!(0));
    }

    #[test]
    fn test_full_roster_size_regardless_of_sparsity() {
        let empty = observations(vec![]);
        let grid = build_heatmap(&empty, &HeatmapSpec::default(), &HEROES, &ASPECTS).unwrap();
        assert_eq!(grid.len(), HEROES.len() * ASPECTS.len());
        assert_eq!(grid.drop_duplicates().len(), grid.len());

        let busy = observations(vec![
            ("Thor", "Aggression", 1.0),
            ("Unknown Hero", "Basic", 1.0),
            ("Hulk", "Other", 1.0),
        ]);
        let grid = build_heatmap(&busy, &HeatmapSpec::default(), &HEROES, &ASPECTS).unwrap();
        assert_eq!(grid.len(), HEROES.len() * ASPECTS.len());
        let observed = grid.rows().iter().filter(|r| r[2] == 1).count();
        assert_eq!(observed, 1);
    }

    #[test]
    fn test_sorted_by_roster_position_not_name() {
        let obs = observations(vec![]);
        let grid =
            build_heatmap(&obs, &HeatmapSpec::default(), &["Thor", "Hulk"], &["Basic"]).unwrap();
        assert_eq!(grid.rows()[0][0], json!("Thor"));
        assert_eq!(grid.rows()[1][0], json!("Hulk"));
    }

    #[test]
    fn test_zero_weight_is_not_observed() {
        let obs = observations(vec![("Hulk", "Basic", 0.0)]);
        let grid = build_heatmap(&obs, &HeatmapSpec::default(), &["Hulk"], &["Basic"]).unwrap();
        assert_eq!(grid.rows()[0][2], json!(0));
    }

    #[test]
    fn test_missing_weight_column() {
        let obs = Table::new(["hero", "individual_aspect"]);
        assert!(build_heatmap(&obs, &HeatmapSpec::default(), &["Hulk"], &["Basic"]).is_err());
    }

    #[test]
    fn test_chunks_keep_entities_whole() {
        let obs = observations(vec![]);
        let grid = build_heatmap(&obs, &HeatmapSpec::default(), &HEROES, &ASPECTS).unwrap();
        let chunks = heatmap_chunks(&grid, ASPECTS.len(), 3);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.iter().map(Table::len).sum::<usize>(), grid.len());
        for chunk in &chunks {
            assert_eq!(chunk.len() % ASPECTS.len(), 0);
        }
        assert_eq!(chunks[0].len(), 23 * ASPECTS.len());
    }
}
