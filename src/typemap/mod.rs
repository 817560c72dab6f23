pub mod mysql;

use crate::describe::FieldDescriptor;

/// The result of mapping a field to its column type and client record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// The DDL type token (e.g. "INTEGER", "VARCHAR", "JSON").
    pub sql_type: String,
    /// Length/precision rendered as `TYPE(size)`.
    pub size: Option<u32>,
    pub unsigned: bool,
    /// The Rust type used for the field in generated client records (e.g. "i32", "Vec<u8>").
    pub rust_type: &'static str,
}

/// Map a field descriptor to its column type.
///
/// An explicit type override replaces the mapping table entirely: only the
/// explicit size survives and the column is never unsigned.
pub fn map_field_type(field: &FieldDescriptor) -> MappedType {
    let mapped = mysql::map_kind(field.kind);
    match field.type_override {
        Some(ref typ) => MappedType {
            sql_type: typ.clone(),
            size: field.size,
            unsigned: false,
            rust_type: mapped.rust_type,
        },
        None => MappedType {
            size: field.size.or(mapped.size),
            ..mapped
        },
    }
}

/// Helper to create a MappedType without a default size.
pub fn simple(sql_type: &str, rust_type: &'static str, unsigned: bool) -> MappedType {
    MappedType {
        sql_type: sql_type.to_string(),
        size: None,
        unsigned,
        rust_type,
    }
}
