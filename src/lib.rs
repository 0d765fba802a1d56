//! # sgt: schema-to-source generator
//!
//! `sgt` turns a YAML description of models, or the live schema of a MySQL
//! database, into Go data-access files for the beego ORM. Each entity gets
//! one file at `models/<snake>/gen_<snake>.go` holding its struct and the
//! insert, get, query, count and update procedures.
//!
//! ## Example
//!
//! ```yaml
//! models:
//!   - name: user_profile
//!     fields:
//!       - name: nick_name
//!         type: string
//! ```
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let report = sgt::codegen::generate_from_file(Path::new("init.yaml"), Path::new("."), true)?;
//! println!("wrote {} files", report.written.len());
//! # Ok::<(), sgt::CodegenError>(())
//! ```
//!
//! Database introspection needs the `mysql` feature.

pub mod codegen;
pub mod error;
pub mod schema_loader;

pub use codegen::{Entity, Field, GenerationConfig, GenerationReport, ProjectConfig, RenderedFile};
pub use error::{CodegenError, Result};
pub use schema_loader::{ColumnInfo, SchemaSource, TableFilter, TableMetadata};
