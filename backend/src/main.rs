//! mcdc CLI - inspect the tables built from a survey export
//!
//! ```bash
//! mcdc tables responses.csv            # All six tables as JSON
//! mcdc table players responses.csv     # One table as JSON records
//! mcdc summary responses.csv           # Headline stats
//! mcdc heatmap responses.csv --parts 3 # Heatmap grid split for display
//! mcdc schema responses.csv            # Detected per-player columns
//! ```

use clap::{Parser, Subcommand};
use mcdc::transform::{
    count_by, heatmap_chunks, normalize_column_names, sum_weights_by, WEIGHT_COLUMN,
};
use mcdc::{parse_csv_file_auto, run_pipeline_file, PipelineConfig, PlayerSchema, TABLE_NAMES};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mcdc")]
#[command(about = "Reshape MC/DC game tracker exports into dashboard tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every table and print them as JSON
    Tables {
        /// Input CSV export
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one table as JSON records
    Table {
        /// Table name: raw, sessions, players, aspects, heatmap, full
        name: String,

        /// Input CSV export
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print headline stats and breakdowns
    Summary {
        /// Input CSV export
        input: PathBuf,
    },

    /// Print the heatmap grid split into display columns
    Heatmap {
        /// Input CSV export
        input: PathBuf,

        /// Number of display columns
        #[arg(short, long, default_value = "3")]
        parts: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the detected per-player column layout
    Schema {
        /// Input CSV export
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PipelineConfig::default();

    let result = match cli.command {
        Commands::Tables { input, output } => cmd_tables(&input, &config, output.as_deref()),
        Commands::Table {
            name,
            input,
            output,
        } => cmd_table(&name, &input, &config, output.as_deref()),
        Commands::Summary { input } => cmd_summary(&input, &config),
        Commands::Heatmap {
            input,
            parts,
            output,
        } => cmd_heatmap(&input, parts, &config, output.as_deref()),
        Commands::Schema { input } => cmd_schema(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_tables(
    input: &Path,
    config: &PipelineConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tables = run_pipeline_file(input, config)?;

    let mut all = Map::new();
    for name in TABLE_NAMES {
        if let Some(table) = tables.table(name) {
            all.insert(name.to_string(), Value::Array(table.to_records()));
        }
    }

    let json = serde_json::to_string_pretty(&Value::Object(all))?;
    write_output(&json, output)
}

fn cmd_table(
    name: &str,
    input: &Path,
    config: &PipelineConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tables = run_pipeline_file(input, config)?;
    let table = tables.table(name).ok_or_else(|| {
        format!(
            "Unknown table '{}' (expected one of: {})",
            name,
            TABLE_NAMES.join(", ")
        )
    })?;

    let json = serde_json::to_string_pretty(&table.to_records())?;
    write_output(&json, output)
}

fn cmd_summary(input: &Path, config: &PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tables = run_pipeline_file(input, config)?;
    let stats = tables.summary()?;

    let players_per_game = count_by(&tables.sessions, &["number_of_players"])?;
    let scenarios = count_by(&tables.sessions, &["scenario", "outcome"])?;
    let difficulty = count_by(&tables.sessions, &["difficulty", "outcome"])?;
    let aspect_plays =
        sum_weights_by(&tables.aspects, &config.individual_aspect_column, WEIGHT_COLUMN)?;
    let leaderboard = count_by(&tables.players, &["name"])?;

    let report = json!({
        "stats": stats,
        "mostPlayedHero": mcdc::most_frequent_value(&tables.players, "hero")?,
        "playerCount": players_per_game.to_records(),
        "scenarios": scenarios.to_records(),
        "difficulty": difficulty.to_records(),
        "aspects": aspect_plays.to_records(),
        "leaderboard": leaderboard.to_records(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_heatmap(
    input: &Path,
    parts: usize,
    config: &PipelineConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tables = run_pipeline_file(input, config)?;
    let chunks: Vec<Value> = heatmap_chunks(&tables.heatmap, config.aspects.len(), parts)
        .iter()
        .map(|chunk| Value::Array(chunk.to_records()))
        .collect();

    let json = serde_json::to_string_pretty(&chunks)?;
    write_output(&json, output)
}

fn cmd_schema(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Scanning: {}", input.display());

    let parsed = parse_csv_file_auto(input)?;
    let raw = normalize_column_names(&parsed.table)?;
    let schema = PlayerSchema::scan(&raw);

    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Rows: {}", parsed.table.len());
    println!("Features: {}", schema.features.join(", "));
    println!("Max players: {}", schema.max_player);
    for col in &schema.columns {
        println!(
            "  [{:2}] {} → {} (player {})",
            col.index,
            raw.columns()[col.index],
            col.feature,
            col.player
        );
    }

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
