//! Error taxonomy for a generation run.
//!
//! Configuration errors are detected before anything is rendered, so a run
//! that fails on one of them leaves the output tree untouched. Boundary
//! errors (database, filesystem) abort at the point of failure. The
//! formatter error is reported after the generated files are on disk.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("model name can not be empty")]
    EmptyModelName,

    #[error("model name must start with a letter: {name}")]
    InvalidModelName { name: String },

    #[error("field name can not be empty: model: {model}")]
    EmptyFieldName { model: String },

    #[error("field type can not be empty: model: {model}, field: {field}")]
    EmptyFieldType { model: String, field: String },

    #[error("unsupported type {native_type}")]
    UnsupportedType { native_type: String },

    #[error("duplicate defined: model: {name}")]
    DuplicateModel { name: String },

    #[error("duplicate defined: table: {table}, models: {first}, {second}")]
    DuplicateTable {
        table: String,
        first: String,
        second: String,
    },

    /// `field` is the name as written in the input, before canonicalization.
    #[error("duplicate defined: {scope}: {entity}, field: {field}")]
    DuplicateField {
        scope: &'static str,
        entity: String,
        field: String,
    },

    #[error("database error while {action}: {source}")]
    Database {
        action: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("db_config entries require database support; rebuild with `--features mysql`")]
    DatabaseUnavailable,

    #[error("failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: askama::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run formatter `{command}`: {source}")]
    FormatterSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{command}` exited with {status}")]
    FormatterFailed { command: String, status: ExitStatus },
}

impl CodegenError {
    /// True for errors raised before rendering starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CodegenError::ReadConfig { .. }
                | CodegenError::ParseConfig { .. }
                | CodegenError::EmptyModelName
                | CodegenError::InvalidModelName { .. }
                | CodegenError::EmptyFieldName { .. }
                | CodegenError::EmptyFieldType { .. }
                | CodegenError::UnsupportedType { .. }
                | CodegenError::DuplicateModel { .. }
                | CodegenError::DuplicateTable { .. }
                | CodegenError::DuplicateField { .. }
        )
    }

    pub(crate) fn database<E>(action: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CodegenError::Database {
            action: action.into(),
            source: Box::new(source),
        }
    }
}
