//! High-level pipeline API: survey export to dashboard tables.
//!
//! Every call re-reads the source and rebuilds all tables; nothing is kept
//! between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcdc::transform::pipeline::{run_pipeline_file, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tables = run_pipeline_file("responses.csv", &PipelineConfig::default())?;
//!     println!("{} sessions, {} player rows", tables.sessions.len(), tables.players.len());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::collapse::replace_with_other;
use super::explode::{explode_with_weights, DEFAULT_SEPARATOR};
use super::grid::{build_heatmap, HeatmapSpec};
use super::join::full_join;
use super::normalize::normalize_column_names;
use super::reconcile::merge_category;
use super::reshape::reshape_players;
use super::schema::PlayerSchema;
use super::stats::SummaryStats;
use crate::error::{PipelineResult, TableResult};
use crate::logs::RunLog;
use crate::parser::parse_bytes_auto;
use crate::roster;
use crate::table::Table;

/// Names accepted by [`PipelineTables::table`], in output order.
pub const TABLE_NAMES: [&str; 6] = ["raw", "sessions", "players", "aspects", "heatmap", "full"];

/// Compiled-in constants driving the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Session identifier column (normalized name)
    pub id_column: String,
    /// Columns copied into the session table
    pub session_columns: Vec<String>,
    pub aspect_column: String,
    /// Historical multi-select aspect column, merged into `aspect_column`
    pub multi_aspect_column: String,
    /// Column receiving one exploded aspect per row
    pub individual_aspect_column: String,
    /// Multi-select separator
    pub separator: String,
    /// Aspect allow-list; anything else becomes "Other"
    pub aspects: Vec<String>,
    /// Hero roster for the heatmap, in display order
    pub heroes: Vec<String>,
    pub heatmap: HeatmapSpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            id_column: roster::ID_COLUMN.to_string(),
            session_columns: roster::SESSION_COLUMNS.iter().map(|c| c.to_string()).collect(),
            aspect_column: roster::ASPECT_COLUMN.to_string(),
            multi_aspect_column: roster::MULTI_ASPECT_COLUMN.to_string(),
            individual_aspect_column: roster::INDIVIDUAL_ASPECT_COLUMN.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            aspects: roster::ASPECTS.iter().map(|a| a.to_string()).collect(),
            heroes: roster::HEROES.iter().map(|h| h.to_string()).collect(),
            heatmap: HeatmapSpec::default(),
        }
    }
}

/// All tables derived from one read of the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineTables {
    /// Source table with normalized column names
    pub raw: Table,
    /// One row per session
    pub sessions: Table,
    /// One row per occupied seat
    pub players: Table,
    /// Exploded, collapsed aspects with weights
    pub aspects: Table,
    /// Dense hero × aspect presence grid
    pub heatmap: Table,
    /// Players joined with their session
    pub full: Table,
}

impl PipelineTables {
    /// Look up one table by name (see [`TABLE_NAMES`]).
    pub fn table(&self, name: &str) -> Option<&Table> {
        match name {
            "raw" => Some(&self.raw),
            "sessions" => Some(&self.sessions),
            "players" => Some(&self.players),
            "aspects" => Some(&self.aspects),
            "heatmap" => Some(&self.heatmap),
            "full" => Some(&self.full),
            _ => None,
        }
    }

    pub fn summary(&self) -> TableResult<SummaryStats> {
        SummaryStats::compute(&self.sessions, &self.players)
    }
}

/// Run every stage over an already-loaded source table.
///
/// A source with a header but no rows is valid: every table comes back
/// empty except the heatmap, which is the full all-zero grid.
pub fn run_pipeline(source: &Table, config: &PipelineConfig) -> PipelineResult<PipelineTables> {
    run_logged(source, config, RunLog::start())
}

/// Load CSV bytes, then run the pipeline.
pub fn run_pipeline_bytes(bytes: &[u8], config: &PipelineConfig) -> PipelineResult<PipelineTables> {
    let log = RunLog::start();
    let parsed = parse_bytes_auto(bytes).map_err(|e| {
        log.error(e.to_string());
        e
    })?;
    log.success(format!(
        "Detected encoding: {}, delimiter: {:?}",
        parsed.encoding, parsed.delimiter
    ));
    run_logged(&parsed.table, config, log)
}

/// Read a CSV file, then run the pipeline.
pub fn run_pipeline_file<P: AsRef<Path>>(
    path: P,
    config: &PipelineConfig,
) -> PipelineResult<PipelineTables> {
    let bytes = fs::read(path.as_ref())?;
    run_pipeline_bytes(&bytes, config)
}

fn run_logged(
    source: &Table,
    config: &PipelineConfig,
    log: RunLog,
) -> PipelineResult<PipelineTables> {
    let result = build_tables(source, config, &log);
    if let Err(e) = &result {
        log.error(e.to_string());
    }
    result
}

fn build_tables(
    source: &Table,
    config: &PipelineConfig,
    log: &RunLog,
) -> PipelineResult<PipelineTables> {
    log.info(format!(
        "📖 {} session rows, {} columns",
        source.len(),
        source.columns().len()
    ));

    let raw = normalize_column_names(source)?;

    let session_columns: Vec<&str> = config.session_columns.iter().map(String::as_str).collect();
    let sessions = raw.select(&session_columns)?.drop_duplicates();
    log.success(format!("{} sessions", sessions.len()));

    log.info("🔄 Reshaping player columns...");
    let schema = PlayerSchema::scan(&raw);
    log.info_indent(
        format!("features: {} (up to {} players)", schema.features.join(", "), schema.max_player),
        1,
    );
    let players = reshape_players(&raw, &config.id_column, &schema)?;

    let players = if players.has_column(&config.multi_aspect_column) {
        merge_category(&players, &config.aspect_column, &config.multi_aspect_column)?
    } else {
        log.warning(format!(
            "No '{}' column, keeping '{}' as is",
            config.multi_aspect_column, config.aspect_column
        ));
        players
    };
    log.success(format!("{} player rows", players.len()));

    log.info("✂️  Splitting aspects...");
    let aspects = explode_with_weights(
        &players,
        &config.aspect_column,
        &config.individual_aspect_column,
        &config.separator,
    )?;
    let allowed: Vec<&str> = config.aspects.iter().map(String::as_str).collect();
    let aspects = replace_with_other(&aspects, &allowed, &config.individual_aspect_column)?;
    log.success(format!("{} aspect rows", aspects.len()));

    let heroes: Vec<&str> = config.heroes.iter().map(String::as_str).collect();
    let heatmap = build_heatmap(&aspects, &config.heatmap, &heroes, &allowed)?;
    log.success(format!("{} heatmap cells", heatmap.len()));

    let full = full_join(&players, &sessions, &config.id_column)?;

    Ok(PipelineTables {
        raw,
        sessions,
        players,
        aspects,
        heatmap,
        full,
    })
}
