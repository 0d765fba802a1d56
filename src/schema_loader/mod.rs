//! Live schema introspection.
//!
//! The loader talks to the database through [`SchemaSource`] and turns what
//! it reports into [`TableMetadata`] records, one per table selected by the
//! descriptor's filter. Every call is blocking and sequential; the first
//! failure aborts the whole load.

#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::MysqlSchema;

use crate::codegen::project_config::DbConfig;
use crate::error::Result;

/// One column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Native type string, e.g. `varchar(64)`.
    pub native_type: String,
    pub nullable: bool,
    /// Key flag: `PRI`, `UNI`, `MUL` or empty.
    pub key: String,
}

/// Columns of one introspected table. Consumed once to build an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub table_name: String,
    pub alias: Option<String>,
    pub columns: Vec<ColumnInfo>,
}

impl TableMetadata {
    /// Name the entity is derived from: the alias when one applies,
    /// otherwise the table name.
    pub fn entity_name(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|alias| !alias.is_empty())
            .unwrap_or(&self.table_name)
    }
}

/// Boundary to a database that can describe its own schema.
pub trait SchemaSource {
    /// Table names in the current database, in the order reported.
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Columns of `table`, in ordinal order.
    fn list_columns(&mut self, table: &str) -> Result<Vec<ColumnInfo>>;
}

/// Table selection parsed from a descriptor's `table` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFilter {
    All,
    Only(Vec<String>),
}

impl TableFilter {
    /// `*` selects every table; anything else is a comma-separated allow-list.
    pub fn parse(expr: &str) -> Self {
        if expr.trim() == "*" {
            return TableFilter::All;
        }
        TableFilter::Only(
            expr.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn matches(&self, table: &str) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Only(names) => names.iter().any(|name| name == table),
        }
    }

    /// An alias can only name an entity when exactly one table is selected.
    fn selects_single_table(&self) -> bool {
        matches!(self, TableFilter::Only(names) if names.len() == 1)
    }
}

/// Load metadata for every table of `source` selected by `filter`.
pub fn load_tables(
    source: &mut dyn SchemaSource,
    filter: &TableFilter,
    alias: Option<&str>,
) -> Result<Vec<TableMetadata>> {
    let alias = alias.filter(|alias| !alias.is_empty());
    let alias = match alias {
        Some(alias) if !filter.selects_single_table() => {
            tracing::warn!(alias, ?filter, "alias ignored: filter selects more than one table");
            None
        }
        other => other,
    };

    let mut tables = Vec::new();
    for table in source.list_tables()? {
        if !filter.matches(&table) {
            continue;
        }
        let columns = source.list_columns(&table)?;
        tracing::info!(table = %table, columns = columns.len(), "loaded table metadata");
        tables.push(TableMetadata {
            table_name: table,
            alias: alias.map(String::from),
            columns,
        });
    }
    Ok(tables)
}

/// Introspect every configured database, in configuration order.
#[cfg(feature = "mysql")]
pub fn load_all(configs: &[DbConfig]) -> Result<Vec<TableMetadata>> {
    let mut tables = Vec::new();
    for config in configs {
        let mut source = MysqlSchema::connect(&config.connection_url())?;
        let filter = TableFilter::parse(&config.table);
        tables.extend(load_tables(&mut source, &filter, config.alias_name.as_deref())?);
    }
    Ok(tables)
}

/// Without a database backend only configs with no `db_config` entries work.
#[cfg(not(feature = "mysql"))]
pub fn load_all(configs: &[DbConfig]) -> Result<Vec<TableMetadata>> {
    if configs.is_empty() {
        Ok(Vec::new())
    } else {
        Err(crate::error::CodegenError::DatabaseUnavailable)
    }
}
