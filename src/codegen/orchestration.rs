//! Run driver: configuration, introspection, normalization, rendering and
//! emission, in that order.
//!
//! Every configuration error surfaces before the first file is written.
//! The first error of any kind ends the run.

use std::path::{Path, PathBuf};

use crate::codegen::fs_utils;
use crate::codegen::go_model::{render_all, RenderedFile};
use crate::codegen::normalizer::Normalizer;
use crate::codegen::project_config::ProjectConfig;
use crate::codegen::types::Entity;
use crate::error::Result;
use crate::schema_loader::{self, TableMetadata};

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub project: ProjectConfig,
    /// Root the `models/...` paths are resolved against.
    pub output_dir: PathBuf,
    /// Run the configured formatter after writing.
    pub format: bool,
}

impl GenerationConfig {
    pub fn new(project: ProjectConfig, output_dir: impl Into<PathBuf>) -> Self {
        GenerationConfig {
            project,
            output_dir: output_dir.into(),
            format: true,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub entities: Vec<Entity>,
    pub written: Vec<PathBuf>,
}

/// Build the canonical entity list. Declared models are normalized before
/// any database is contacted, so their errors win over connection errors.
pub fn build_entities<F>(project: &ProjectConfig, load_tables: F) -> Result<Vec<Entity>>
where
    F: FnOnce(&ProjectConfig) -> Result<Vec<TableMetadata>>,
{
    let mut normalizer = Normalizer::new();
    for model in &project.models {
        normalizer.add_model(model)?;
    }

    for table in load_tables(project)? {
        normalizer.add_table(&table)?;
    }

    Ok(normalizer.into_entities())
}

/// Entities from the configuration and every configured database.
pub fn load_entities(project: &ProjectConfig) -> Result<Vec<Entity>> {
    build_entities(project, |project| schema_loader::load_all(&project.db_configs))
}

/// Render and write already-normalized entities.
pub fn emit_entities(config: &GenerationConfig, entities: &[Entity]) -> Result<Vec<PathBuf>> {
    let files: Vec<RenderedFile> = render_all(entities, &config.project.codegen)?;
    let formatter: &[String] = if config.format {
        &config.project.codegen.formatter
    } else {
        &[]
    };
    fs_utils::emit(&config.output_dir, &files, formatter)
}

/// Full run with tables supplied by the caller instead of a live database.
pub fn generate_with_tables(config: &GenerationConfig, tables: Vec<TableMetadata>) -> Result<GenerationReport> {
    let entities = build_entities(&config.project, |_| Ok(tables))?;
    let written = emit_entities(config, &entities)?;
    Ok(GenerationReport { entities, written })
}

/// Full run: introspect configured databases, then generate.
pub fn generate_all_from_config(config: &GenerationConfig) -> Result<GenerationReport> {
    let entities = load_entities(&config.project)?;
    let written = emit_entities(config, &entities)?;
    Ok(GenerationReport { entities, written })
}

/// Load a configuration file and run the full pipeline.
pub fn generate_from_file(config_path: &Path, output_dir: &Path, format: bool) -> Result<GenerationReport> {
    let project = ProjectConfig::from_file(config_path)?;
    let mut config = GenerationConfig::new(project, output_dir);
    config.format = format;
    generate_all_from_config(&config)
}
