//! Entity normalization: declared models and introspected tables in,
//! canonical [`Entity`] values out.
//!
//! Both inputs converge on the same shape. All derived name forms are
//! assigned here, field tags are resolved once, and uniqueness is checked
//! for entity names, table names and field names. Any failure rejects the
//! whole run.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::codegen::project_config::ModelDef;
use crate::codegen::type_map::map_go_type;
use crate::codegen::types::{Entity, Field};
use crate::codegen::utils::{lower_first, lower_first_letter, to_camel_case, to_snake_case};
use crate::error::{CodegenError, Result};
use crate::schema_loader::TableMetadata;

/// Columns every generated model carries implicitly; the template emits
/// them itself, so introspected copies are dropped.
pub const IMPLICIT_COLUMNS: [&str; 4] = ["id", "created", "updated", "deleted"];

const FIELD_SCOPE: &str = "model";

/// A field before canonicalization.
struct RawField<'a> {
    origin_name: &'a str,
    field_type: String,
    tag: Option<&'a str>,
    comment: Option<&'a str>,
}

/// Accumulates canonical entities while enforcing run-wide uniqueness.
#[derive(Debug, Default)]
pub struct Normalizer {
    entities: IndexMap<String, Entity>,
    /// table name -> canonical entity name
    tables: HashMap<String, String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Add an explicitly declared model.
    pub fn add_model(&mut self, model: &ModelDef) -> Result<()> {
        let mut entity = entity_shell(&model.name, model.table_name.as_deref(), model.comment.clone())?;
        self.check_new_entity(&entity, &model.name)?;

        let mut raw_fields = Vec::with_capacity(model.fields.len());
        for field in &model.fields {
            if field.name.trim().is_empty() {
                return Err(CodegenError::EmptyFieldName {
                    model: entity.name.clone(),
                });
            }
            if field.field_type.trim().is_empty() {
                return Err(CodegenError::EmptyFieldType {
                    model: entity.name.clone(),
                    field: field.name.clone(),
                });
            }
            raw_fields.push(RawField {
                origin_name: &field.name,
                field_type: field.field_type.trim().to_string(),
                tag: field.tag.as_deref(),
                comment: field.comment.as_deref(),
            });
        }

        entity.fields = resolve_fields(&entity.name, raw_fields, true)?;
        self.insert(entity);
        Ok(())
    }

    /// Add an entity synthesized from introspected table metadata.
    pub fn add_table(&mut self, table: &TableMetadata) -> Result<()> {
        let mut entity = entity_shell(table.entity_name(), Some(table.table_name.as_str()), None)?;
        self.check_new_entity(&entity, table.entity_name())?;

        let mut raw_fields = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            if IMPLICIT_COLUMNS.contains(&column.name.as_str()) {
                tracing::debug!(table = %table.table_name, column = %column.name, "skipping implicit column");
                continue;
            }
            let go_type = map_go_type(&column.native_type).inspect_err(|_| {
                tracing::error!(
                    table = %table.table_name,
                    column = %column.name,
                    native_type = %column.native_type,
                    "unsupported column type"
                );
            })?;
            raw_fields.push(RawField {
                origin_name: &column.name,
                field_type: go_type.to_string(),
                tag: None,
                comment: None,
            });
        }

        entity.fields = resolve_fields(&entity.name, raw_fields, true)?;
        self.insert(entity);
        Ok(())
    }

    /// Canonical entities in the order they were added.
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities.into_values().collect()
    }

    fn check_new_entity(&self, entity: &Entity, origin_name: &str) -> Result<()> {
        if self.entities.contains_key(&entity.name) {
            return Err(CodegenError::DuplicateModel {
                name: origin_name.to_string(),
            });
        }
        if let Some(first) = self.tables.get(&entity.table_name) {
            return Err(CodegenError::DuplicateTable {
                table: entity.table_name.clone(),
                first: first.clone(),
                second: entity.name.clone(),
            });
        }
        Ok(())
    }

    fn insert(&mut self, entity: Entity) {
        tracing::info!(
            model = %entity.name,
            table = %entity.table_name,
            fields = entity.fields.len(),
            "normalized model"
        );
        self.tables.insert(entity.table_name.clone(), entity.name.clone());
        self.entities.insert(entity.name.clone(), entity);
    }
}

/// Normalize declared models followed by introspected tables.
pub fn normalize(models: &[ModelDef], tables: &[TableMetadata]) -> Result<Vec<Entity>> {
    let mut normalizer = Normalizer::new();
    for model in models {
        normalizer.add_model(model)?;
    }
    for table in tables {
        normalizer.add_table(table)?;
    }
    Ok(normalizer.into_entities())
}

/// Entity with all name forms derived and no fields yet.
fn entity_shell(raw_name: &str, table_name: Option<&str>, comment: Option<String>) -> Result<Entity> {
    let raw_name = raw_name.trim();
    if raw_name.is_empty() {
        return Err(CodegenError::EmptyModelName);
    }

    let name = to_camel_case(raw_name);
    // The first letter becomes the Go receiver name.
    if !name.starts_with(char::is_alphabetic) {
        return Err(CodegenError::InvalidModelName {
            name: raw_name.to_string(),
        });
    }
    let snake_name = to_snake_case(&name);
    let table_name = table_name
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_else(|| snake_name.clone());

    Ok(Entity {
        lower_name: name.to_ascii_lowercase(),
        lower_first_name: lower_first(&name),
        lower_first_letter: lower_first_letter(&name),
        snake_name,
        table_name,
        comment: comment.filter(|c| !c.trim().is_empty()),
        fields: Vec::new(),
        name,
    })
}

fn resolve_fields(entity_name: &str, raw_fields: Vec<RawField<'_>>, persistent: bool) -> Result<Vec<Field>> {
    let mut seen = HashSet::with_capacity(raw_fields.len());
    let mut fields = Vec::with_capacity(raw_fields.len());

    for raw in raw_fields {
        let origin_name = raw.origin_name.trim();
        let name = to_camel_case(origin_name);
        if !seen.insert(name.clone()) {
            return Err(CodegenError::DuplicateField {
                scope: FIELD_SCOPE,
                entity: entity_name.to_string(),
                field: origin_name.to_string(),
            });
        }

        let tag = resolve_tag(origin_name, &name, raw.tag, persistent);
        tracing::debug!(model = %entity_name, field = %name, tag = ?tag, "resolved field tag");

        fields.push(Field {
            origin_name: origin_name.to_string(),
            snake_name: to_snake_case(&name),
            field_type: raw.field_type,
            tag,
            comment: raw.comment.map(str::trim).filter(|c| !c.is_empty()).map(String::from),
            name,
        });
    }

    Ok(fields)
}

/// Resolve the struct tag of one field. Rules, first match wins:
///
/// 1. suppressed field (canonical name starts with `_`): the supplied tag
///    verbatim, or none;
/// 2. no supplied tag on a persistent entity: JSON key plus ORM column;
/// 3. no supplied tag otherwise: JSON key only;
/// 4. supplied tag without a `json:"` clause: JSON key prepended;
/// 5. supplied tag with a `json:"` clause: unchanged.
///
/// Generated keys always use the original field name.
pub(crate) fn resolve_tag(origin_name: &str, canonical_name: &str, supplied: Option<&str>, persistent: bool) -> Option<String> {
    let supplied = supplied.map(trim_tag).filter(|tag| !tag.is_empty());

    if canonical_name.starts_with('_') {
        return supplied.map(String::from);
    }

    match supplied {
        None if persistent => Some(format!("json:\"{origin_name}\" orm:\"column({origin_name})\"")),
        None => Some(format!("json:\"{origin_name}\"")),
        Some(tag) if !has_json_clause(tag) => Some(format!("json:\"{origin_name}\" {tag}")),
        Some(tag) => Some(tag.to_string()),
    }
}

/// Strip surrounding whitespace and backtick quoting.
fn trim_tag(tag: &str) -> &str {
    tag.trim().trim_matches('`').trim()
}

fn has_json_clause(tag: &str) -> bool {
    let compact: String = tag.split_whitespace().collect();
    compact.contains("json:\"")
}
