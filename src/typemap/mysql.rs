use crate::describe::FieldKind;

use super::{simple, MappedType};

/// Map a field kind to its MySQL column type.
pub fn map_kind(kind: FieldKind) -> MappedType {
    match kind {
        FieldKind::Bool => MappedType {
            size: Some(1),
            ..simple("TINYINT", "bool", false)
        },
        FieldKind::I8 => simple("TINYINT", "i8", false),
        FieldKind::I16 => simple("SMALLINT", "i16", false),
        FieldKind::I32 => simple("INTEGER", "i32", false),
        FieldKind::I64 => simple("BIGINT", "i64", false),
        FieldKind::U8 => simple("TINYINT", "u8", true),
        FieldKind::U16 => simple("SMALLINT", "u16", true),
        FieldKind::U32 => simple("INTEGER", "u32", true),
        FieldKind::U64 => simple("BIGINT", "u64", true),
        FieldKind::F32 => simple("FLOAT", "f32", false),
        FieldKind::F64 => simple("DOUBLE", "f64", false),
        // 191 characters keeps a utf8mb4 index key under 767 bytes.
        FieldKind::String => MappedType {
            size: Some(191),
            ..simple("VARCHAR", "String", false)
        },
        FieldKind::Bytes => MappedType {
            size: Some(767),
            ..simple("VARBINARY", "Vec<u8>", false)
        },
        FieldKind::DateTime => MappedType {
            size: Some(6),
            ..simple("DATETIME", "String", false)
        },
        FieldKind::Json => simple("JSON", "String", false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool() {
        let m = map_kind(FieldKind::Bool);
        assert_eq!(m.sql_type, "TINYINT");
        assert_eq!(m.size, Some(1));
        assert_eq!(m.rust_type, "bool");
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(map_kind(FieldKind::I8).sql_type, "TINYINT");
        assert_eq!(map_kind(FieldKind::I16).sql_type, "SMALLINT");
        assert_eq!(map_kind(FieldKind::I32).sql_type, "INTEGER");
        assert_eq!(map_kind(FieldKind::I64).sql_type, "BIGINT");
        assert!(!map_kind(FieldKind::I64).unsigned);
    }

    #[test]
    fn test_unsigned_types() {
        let m = map_kind(FieldKind::U32);
        assert_eq!(m.sql_type, "INTEGER");
        assert!(m.unsigned);
        assert_eq!(m.rust_type, "u32");
        assert!(map_kind(FieldKind::U8).unsigned);
        assert_eq!(map_kind(FieldKind::U64).sql_type, "BIGINT");
    }

    #[test]
    fn test_float_types() {
        assert_eq!(map_kind(FieldKind::F32).sql_type, "FLOAT");
        assert_eq!(map_kind(FieldKind::F64).sql_type, "DOUBLE");
    }

    #[test]
    fn test_string_types() {
        let m = map_kind(FieldKind::String);
        assert_eq!(m.sql_type, "VARCHAR");
        assert_eq!(m.size, Some(191));

        let m = map_kind(FieldKind::Bytes);
        assert_eq!(m.sql_type, "VARBINARY");
        assert_eq!(m.rust_type, "Vec<u8>");
    }

    #[test]
    fn test_datetime_and_json() {
        assert_eq!(map_kind(FieldKind::DateTime).size, Some(6));
        let m = map_kind(FieldKind::Json);
        assert_eq!(m.sql_type, "JSON");
        assert_eq!(m.size, None);
    }
}
