//! Reshape stages.
//!
//! Each stage is a pure function from tables to a new table:
//! - Normalize: canonical column names
//! - Schema + Reshape: wide per-seat columns to one row per player
//! - Reconcile: merge the two aspect questions
//! - Explode + Collapse: weighted single-aspect rows, unknowns to "Other"
//! - Grid: dense hero × aspect presence table
//! - Join: players enriched with session fields
//! - Stats: dashboard aggregates
//! - Pipeline: all of the above over one read of the source

pub mod collapse;
pub mod explode;
pub mod grid;
pub mod join;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod reshape;
pub mod schema;
pub mod stats;

pub use collapse::replace_with_other;
pub use explode::{explode_with_weights, split_items, DEFAULT_SEPARATOR, WEIGHT_COLUMN};
pub use grid::{build_heatmap, heatmap_chunks, HeatmapSpec, OBSERVED_COLUMN};
pub use join::full_join;
pub use normalize::{clean_name, normalize_column_names};
pub use pipeline::*;
pub use reconcile::merge_category;
pub use reshape::{reshape_players, PLAYER_NUM_COLUMN};
pub use schema::{parse_player_column, PlayerColumn, PlayerSchema};
pub use stats::{count_by, count_distinct, most_frequent_value, sum_weights_by, SummaryStats};
