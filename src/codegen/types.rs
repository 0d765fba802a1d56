//! Canonical entity graph produced by the normalizer and consumed by the
//! renderer.

use serde::Serialize;
use std::path::PathBuf;

/// One generated data-access unit, mapping to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Canonical CamelCase name, unique within a run.
    pub name: String,
    /// All-lowercase canonical name; used as the Go package name.
    pub lower_name: String,
    pub snake_name: String,
    /// Canonical name with the first letter lowercased.
    pub lower_first_name: String,
    /// Receiver variable name in the generated procedures.
    pub lower_first_letter: String,
    pub table_name: String,
    pub comment: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// The name as written in the config or reported by the database.
    pub origin_name: String,
    /// Canonical CamelCase name, unique within the owning entity.
    pub name: String,
    pub snake_name: String,
    pub field_type: String,
    /// Resolved struct tag without the surrounding backticks.
    pub tag: Option<String>,
    pub comment: Option<String>,
}

impl Field {
    /// Suppressed fields stay in the struct but are left out of the
    /// generated column lists.
    pub fn is_suppressed(&self) -> bool {
        self.name.starts_with('_')
    }
}

impl Entity {
    /// Fields that take part in generated queries and updates, in input order.
    pub fn column_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.is_suppressed())
    }

    /// Backtick-quoted original column names, each followed by `, `.
    ///
    /// The implicit `created`, `updated` and `deleted` columns are appended
    /// by the template after this list.
    pub fn query_columns(&self) -> String {
        self.column_fields()
            .map(|field| format!("`{}`, ", field.origin_name))
            .collect()
    }

    /// Output path relative to the output root:
    /// `<models_dir>/<snake>/gen_<snake>.go`.
    pub fn output_path(&self, models_dir: &str) -> PathBuf {
        PathBuf::from(models_dir)
            .join(&self.snake_name)
            .join(format!("gen_{}.go", self.snake_name))
    }
}
