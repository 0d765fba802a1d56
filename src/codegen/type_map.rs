//! Native column type to Go type mapping.

use crate::error::{CodegenError, Result};

/// Prefix table scanned in order; the first prefix that starts the native
/// type wins. Prefixes sharing a stem list the longer one first
/// (`datetime` before `date`, `timestamp` before `time`).
const TYPE_MAP: &[(&str, &str)] = &[
    ("tinyint", "int8"),
    ("smallint", "int16"),
    ("mediumint", "int32"),
    ("bigint", "int64"),
    ("int", "int32"),
    ("varchar", "string"),
    ("char", "string"),
    ("tinytext", "string"),
    ("mediumtext", "string"),
    ("longtext", "string"),
    ("text", "string"),
    ("json", "string"),
    ("enum", "string"),
    ("datetime", "time.Time"),
    ("date", "time.Time"),
    ("timestamp", "time.Time"),
    ("time", "string"),
    ("year", "int16"),
    ("decimal", "float64"),
    ("double", "float64"),
    ("float", "float32"),
    ("bool", "bool"),
];

/// Map a native column type such as `varchar(64)` or `int(10) unsigned`
/// to the Go type used in the generated struct.
pub fn map_go_type(native_type: &str) -> Result<&'static str> {
    let normalized = native_type.trim().to_ascii_lowercase();
    TYPE_MAP
        .iter()
        .find(|(prefix, _)| normalized.starts_with(prefix))
        .map(|(_, go_type)| *go_type)
        .ok_or_else(|| CodegenError::UnsupportedType {
            native_type: native_type.to_string(),
        })
}
