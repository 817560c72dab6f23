use heck::ToSnakeCase;

use crate::describe::{
    Capability, Description, FieldDescriptor, ForeignKey, FullTextIndex, Index, PrimaryKey,
    SpatialIndex, UniqueIndex,
};
use crate::error::MakerError;
use crate::typemap::{map_field_type, MappedType};

/// A field with its column name and type resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Record field name.
    pub field: String,
    /// Column name.
    pub column: String,
    pub mapped: MappedType,
    pub nullable: bool,
    pub default: Option<String>,
    pub auto_increment: bool,
    pub comment: Option<String>,
    pub invisible: bool,
    pub charset: Option<String>,
    pub collate: Option<String>,
    pub srid: Option<u32>,
}

/// Everything the schema builder needs from one description.
#[derive(Debug, Clone, PartialEq)]
pub struct Introspected {
    pub name: String,
    pub fields: Vec<ResolvedField>,
    pub table: Option<String>,
    pub primary_key: PrimaryKey,
    pub indexes: Vec<Index>,
    pub unique_indexes: Vec<UniqueIndex>,
    pub fulltext_indexes: Vec<FullTextIndex>,
    pub spatial_indexes: Vec<SpatialIndex>,
    pub foreign_keys: Vec<ForeignKey>,
}

/// Resolve the fields of a description and collect its capabilities.
///
/// A missing primary key, or a capability supplied twice, fails immediately:
/// no table can be built from such a description.
pub fn introspect(desc: &Description) -> Result<Introspected, MakerError> {
    let mut table = None;
    let mut primary_key = None;
    let mut indexes = None;
    let mut unique_indexes = None;
    let mut fulltext_indexes = None;
    let mut spatial_indexes = None;
    let mut foreign_keys = None;

    for capability in &desc.capabilities {
        let duplicated = match capability {
            Capability::Table(name) => table.replace(name.clone()).is_some(),
            Capability::PrimaryKey(pk) => primary_key.replace(pk.clone()).is_some(),
            Capability::Indexes(v) => indexes.replace(v.clone()).is_some(),
            Capability::UniqueIndexes(v) => unique_indexes.replace(v.clone()).is_some(),
            Capability::FullTextIndexes(v) => fulltext_indexes.replace(v.clone()).is_some(),
            Capability::SpatialIndexes(v) => spatial_indexes.replace(v.clone()).is_some(),
            Capability::ForeignKeys(v) => foreign_keys.replace(v.clone()).is_some(),
        };
        if duplicated {
            return Err(MakerError::DuplicateCapability {
                description: desc.name.clone(),
                capability: capability.label(),
            });
        }
    }

    let primary_key = primary_key.ok_or_else(|| MakerError::MissingPrimaryKey {
        description: desc.name.clone(),
    })?;

    let fields = desc
        .fields
        .iter()
        .filter(|f| !f.skip)
        .map(resolve_field)
        .collect();

    Ok(Introspected {
        name: desc.name.clone(),
        fields,
        table,
        primary_key,
        indexes: indexes.unwrap_or_default(),
        unique_indexes: unique_indexes.unwrap_or_default(),
        fulltext_indexes: fulltext_indexes.unwrap_or_default(),
        spatial_indexes: spatial_indexes.unwrap_or_default(),
        foreign_keys: foreign_keys.unwrap_or_default(),
    })
}

fn resolve_field(field: &FieldDescriptor) -> ResolvedField {
    ResolvedField {
        field: field.name.clone(),
        column: field
            .column
            .clone()
            .unwrap_or_else(|| field.name.to_snake_case()),
        mapped: map_field_type(field),
        nullable: field.nullable,
        default: field.default.clone(),
        auto_increment: field.auto_increment,
        comment: field.comment.clone(),
        invisible: field.invisible,
        charset: field.charset.clone(),
        collate: field.collate.clone(),
        srid: field.srid,
    }
}
