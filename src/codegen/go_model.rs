//! Go data-access model rendering.
//!
//! Each entity renders to one Go file for the beego ORM: the model struct
//! (with the implicit `Id`, `Created`, `Updated` and `Deleted` fields) and
//! the `Add`, `Get`, `GetByWhere`, `SelectByWhere`, `CountByWhere` and
//! `Update` procedures. `Get` reads through the cache and `Update`
//! invalidates it.
//!
//! The template lives in `templates/gen_model.go.txt` and is compiled into
//! the binary, so rendering is a pure function of the entity and options.

use askama::Template;
use std::path::PathBuf;

use crate::codegen::project_config::CodegenOptions;
use crate::codegen::types::Entity;
use crate::codegen::utils::escape_go_string;
use crate::error::{CodegenError, Result};

/// A rendered source file, written once by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    pub content: Vec<u8>,
}

/// Struct line of one field, flattened for the template.
struct FieldView {
    name: String,
    go_type: String,
    tag: String,
    comment: String,
}

#[derive(Template)]
#[template(path = "gen_model.go.txt", escape = "none")]
struct GoModelTemplate<'a> {
    entity: &'a Entity,
    options: &'a CodegenOptions,
    doc: String,
    table_name: String,
    recv: &'a str,
    fields: Vec<FieldView>,
    query_columns: String,
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl<'a> GoModelTemplate<'a> {
    fn new(entity: &'a Entity, options: &'a CodegenOptions) -> Self {
        let fields = entity
            .fields
            .iter()
            .map(|field| FieldView {
                name: field.name.clone(),
                go_type: field.field_type.clone(),
                tag: field.tag.clone().unwrap_or_default(),
                comment: field.comment.as_deref().map(single_line).unwrap_or_default(),
            })
            .collect();

        GoModelTemplate {
            entity,
            options,
            doc: entity
                .comment
                .as_deref()
                .map(single_line)
                .unwrap_or_else(|| "struct".to_string()),
            table_name: escape_go_string(&entity.table_name),
            recv: &entity.lower_first_letter,
            fields,
            query_columns: entity.query_columns(),
        }
    }
}

/// Render the Go model file of one entity.
pub fn render_model(entity: &Entity, options: &CodegenOptions) -> Result<RenderedFile> {
    let path = entity.output_path(&options.models_dir);
    let content = GoModelTemplate::new(entity, options)
        .render()
        .map_err(|source| CodegenError::Render {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(model = %entity.name, path = %path.display(), bytes = content.len(), "rendered model");
    Ok(RenderedFile {
        path,
        content: content.into_bytes(),
    })
}

/// Render every entity, in order. Nothing is written here.
pub fn render_all(entities: &[Entity], options: &CodegenOptions) -> Result<Vec<RenderedFile>> {
    entities.iter().map(|entity| render_model(entity, options)).collect()
}
