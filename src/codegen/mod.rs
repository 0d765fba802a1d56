//! Code generation: from configuration and schema metadata to Go model files.
//!
//! Stages, leaf first: name conversion ([`utils`]), type mapping
//! ([`type_map`]), normalization ([`normalizer`]), rendering
//! ([`go_model`]) and emission ([`fs_utils`]), driven by
//! [`orchestration`].

pub mod fs_utils;
pub mod go_model;
pub mod normalizer;
pub mod orchestration;
pub mod project_config;
pub mod type_map;
pub mod types;
pub mod utils;

// Re-export key types
pub use go_model::{render_all, render_model, RenderedFile};
pub use normalizer::{normalize, Normalizer};
pub use orchestration::{
    generate_all_from_config, generate_from_file, generate_with_tables, load_entities, GenerationConfig,
    GenerationReport,
};
pub use project_config::{CodegenOptions, DbConfig, FieldDef, ModelDef, ProjectConfig};
pub use types::{Entity, Field};
