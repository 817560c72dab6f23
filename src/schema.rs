use heck::ToSnakeCase;

use crate::describe::{Description, ForeignKey, FullTextIndex, Index, PrimaryKey, SpatialIndex};
use crate::error::MakerError;
use crate::introspect::{introspect, Introspected, ResolvedField};

/// A table built from one description.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// SQL table name; unique across one compilation.
    pub name: String,
    /// Record name the table was described by, used for generated client code.
    pub record: String,
    pub columns: Vec<Column>,
    pub primary_key: PrimaryKey,
    pub indexes: Vec<Index>,
    pub unique_indexes: Vec<Index>,
    pub fulltext_indexes: Vec<FullTextIndex>,
    pub spatial_indexes: Vec<SpatialIndex>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// A single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Record field the column is read from and scanned into.
    pub field: String,
    pub sql_type: String,
    pub size: Option<u32>,
    pub unsigned: bool,
    pub nullable: bool,
    pub default: Option<String>,
    pub auto_increment: bool,
    pub comment: Option<String>,
    pub invisible: bool,
    pub charset: Option<String>,
    pub collate: Option<String>,
    pub srid: Option<u32>,
    /// Rust type of the record field, without the `Option` wrapper.
    pub rust_type: &'static str,
}

impl Column {
    /// Whether two columns can be joined by a foreign key.
    pub fn same_type(&self, other: &Column) -> bool {
        self.sql_type.eq_ignore_ascii_case(&other.sql_type)
            && self.size == other.size
            && self.unsigned == other.unsigned
    }
}

impl From<ResolvedField> for Column {
    fn from(f: ResolvedField) -> Self {
        Column {
            name: f.column,
            field: f.field,
            sql_type: f.mapped.sql_type,
            size: f.mapped.size,
            unsigned: f.mapped.unsigned,
            nullable: f.nullable,
            default: f.default,
            auto_increment: f.auto_increment,
            comment: f.comment,
            invisible: f.invisible,
            charset: f.charset,
            collate: f.collate,
            srid: f.srid,
            rust_type: f.mapped.rust_type,
        }
    }
}

impl Table {
    fn from_introspected(desc: Introspected) -> Self {
        let name = desc
            .table
            .unwrap_or_else(|| desc.name.to_snake_case());
        Table {
            name,
            record: desc.name,
            columns: desc.fields.into_iter().map(Column::from).collect(),
            primary_key: desc.primary_key,
            indexes: desc.indexes,
            unique_indexes: desc.unique_indexes,
            fulltext_indexes: desc.fulltext_indexes,
            spatial_indexes: desc.spatial_indexes,
            foreign_keys: desc.foreign_keys,
        }
    }

    /// Look up a column by its (case-sensitive) name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key.columns.iter().any(|c| c == name)
    }

    /// Primary key columns in key order. Names that do not resolve are skipped.
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.primary_key
            .columns
            .iter()
            .filter_map(|name| self.column(name))
            .collect()
    }
}

/// Build one table per description, preserving input order.
pub fn build_tables(descriptions: &[Description]) -> Result<Vec<Table>, MakerError> {
    descriptions
        .iter()
        .map(|desc| {
            let introspected = introspect(desc)?;
            tracing::debug!(
                "Built table for {} with {} column(s)",
                desc.name,
                introspected.fields.len()
            );
            Ok(Table::from_introspected(introspected))
        })
        .collect()
}
