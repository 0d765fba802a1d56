//! sgt CLI - generate Go data-access models from YAML configs and MySQL schemas

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use sgt::codegen::orchestration::{emit_entities, load_entities, GenerationConfig};
use sgt::codegen::project_config::{resolve_config_path, ProjectConfig, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "sgt")]
#[command(version, about = "Generate Go data-access models from YAML configs and live MySQL schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models code from a yaml config file
    Model {
        /// Path to the yaml config file; the .yaml extension may be omitted
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        yaml: String,

        /// Output root; files land under <output>/models/
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Skip the formatter pass after writing
        #[arg(long)]
        no_format: bool,
    },

    /// Validate a yaml config file (and configured schemas) without writing code
    Check {
        /// Path to the yaml config file; the .yaml extension may be omitted
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        yaml: String,

        /// Print the normalized models as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // Load environment variables (password_env lookups)
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Model { yaml, output, no_format } => generate_models(&yaml, output, !no_format),
        Commands::Check { yaml, json } => check_config(&yaml, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_project(yaml: &str, announce: bool) -> Result<ProjectConfig, String> {
    let path = resolve_config_path(yaml);
    let project = ProjectConfig::from_file(&path).map_err(|e| e.to_string())?;
    if announce {
        println!("📋 Using yaml config file: {}", path.display());
    }
    Ok(project)
}

/// Generate Go model files from a yaml config
fn generate_models(yaml: &str, output: PathBuf, format: bool) -> Result<(), String> {
    let project = load_project(yaml, true)?;

    let entities = load_entities(&project).map_err(|e| e.to_string())?;
    println!("  ✓ Loaded {} models", entities.len());

    let mut config = GenerationConfig::new(project, output);
    config.format = format;

    let written = emit_entities(&config, &entities).map_err(|e| e.to_string())?;
    for path in &written {
        println!("  ✓ Generated {}", path.display());
    }

    println!("✨ Created success!");
    Ok(())
}

/// Validate a yaml config without writing anything
fn check_config(yaml: &str, json: bool) -> Result<(), String> {
    // stdout carries only the JSON document in --json mode
    let project = load_project(yaml, !json)?;

    let entities = load_entities(&project).map_err(|e| e.to_string())?;

    if json {
        let dump = serde_json::to_string_pretty(&entities)
            .map_err(|e| format!("Failed to serialize models: {}", e))?;
        println!("{}", dump);
        return Ok(());
    }

    for entity in &entities {
        let columns = entity.column_fields().count();
        println!(
            "  ✓ {} (table {}, {} fields, {} columns)",
            entity.name,
            entity.table_name,
            entity.fields.len(),
            columns
        );
    }
    println!("✅ {} models are valid!", entities.len());

    Ok(())
}
