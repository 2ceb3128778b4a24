//! # MC/DC Game Tracker - data layer
//!
//! Turns the game-logging survey export (one row per session, with a
//! repeated column group per seat) into the normalized tables the
//! dashboard charts read.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │ CSV export │──▶│   Parser   │──▶│ Normalize  │──▶│  Reshape   │──▶│ Reconcile  │
//! │ (wide)     │   │ (auto-enc) │   │ (columns)  │   │ (per seat) │   │ (aspects)  │
//! └────────────┘   └────────────┘   └────────────┘   └─────┬──────┘   └─────┬──────┘
//!                                                          │                │
//!                  ┌────────────┐   ┌────────────┐   ┌─────▼──────┐   ┌─────▼──────┐
//!                  │  Heatmap   │◀──│  Collapse  │◀──│  Explode   │   │    Join    │
//!                  │  (dense)   │   │  (Other)   │   │ (weights)  │   │ (sessions) │
//!                  └────────────┘   └────────────┘   └────────────┘   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mcdc::{run_pipeline_file, PipelineConfig};
//!
//! let tables = run_pipeline_file("responses.csv", &PipelineConfig::default())?;
//! println!("{} heatmap cells", tables.heatmap.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`table`] - In-memory table shared by all stages
//! - [`parser`] - CSV loading with auto-detection
//! - [`transform`] - Reshape stages and the pipeline entry point
//! - [`roster`] - Compiled-in hero and aspect lists
//! - [`logs`] - Progress feed

// Core modules
pub mod error;
pub mod table;
pub mod roster;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Progress feed
pub mod logs;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, PipelineError, TableError};

// =============================================================================
// Re-exports - Table
// =============================================================================

pub use table::{as_f64, as_text, is_absent, Row, Table};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    csv_to_table,
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_csv_file_auto,
    ParseResult,
};

// =============================================================================
// Re-exports - Stages
// =============================================================================

pub use transform::{
    build_heatmap,
    clean_name,
    explode_with_weights,
    full_join,
    merge_category,
    most_frequent_value,
    normalize_column_names,
    replace_with_other,
    reshape_players,
    HeatmapSpec,
    PlayerSchema,
    SummaryStats,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    run_pipeline,
    run_pipeline_bytes,
    run_pipeline_file,
    PipelineConfig,
    PipelineTables,
    TABLE_NAMES,
};

// =============================================================================
// Re-exports - Logs
// =============================================================================

pub use logs::{LogEntry, LogLevel, RunLog, LOG_BROADCASTER};
