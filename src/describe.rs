//! Schema description values.
//!
//! A [`Description`] is what callers hand to the compiler: a record name, the
//! already-resolved field descriptors, and whichever optional capabilities the
//! record supports. Capabilities form a closed set; an absent capability means
//! "none", except for the primary key which every description must carry.

use std::fmt;

use serde::Deserialize;

/// The value kind of a record field. Decides the default DDL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    DateTime,
    Json,
}

/// Per-field metadata, extracted ahead of time by whoever builds the description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Record field name; also the source of the default column name.
    pub name: String,
    pub kind: FieldKind,
    /// Column name override.
    #[serde(default)]
    pub column: Option<String>,
    /// Explicit DDL type; bypasses the kind mapping.
    #[serde(default, rename = "type")]
    pub type_override: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    /// Raw SQL default literal, quoted already if it is a string.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default, alias = "auto")]
    pub auto_increment: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub invisible: bool,
    #[serde(default)]
    pub charset: Option<String>,
    #[serde(default)]
    pub collate: Option<String>,
    #[serde(default)]
    pub srid: Option<u32>,
    /// Suppress the field entirely.
    #[serde(default)]
    pub skip: bool,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            column: None,
            type_override: None,
            size: None,
            nullable: false,
            default: None,
            auto_increment: false,
            comment: None,
            invisible: false,
            charset: None,
            collate: None,
            srid: None,
            skip: false,
        }
    }

    pub fn column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    pub fn sql_type(mut self, typ: &str) -> Self {
        self.type_override = Some(typ.to_string());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, literal: &str) -> Self {
        self.default = Some(literal.to_string());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    pub fn charset(mut self, charset: &str, collate: &str) -> Self {
        self.charset = Some(charset.to_string());
        self.collate = Some(collate.to_string());
        self
    }

    pub fn srid(mut self, srid: u32) -> Self {
        self.srid = Some(srid);
        self
    }

    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub invisible: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Index {
    pub fn new<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            invisible: false,
            comment: None,
        }
    }

    pub fn invisible(mut self) -> Self {
        self.invisible = true;
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

/// A unique index has the same shape as a regular one.
pub type UniqueIndex = Index;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FullTextIndex {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub parser: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FullTextIndex {
    pub fn new<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            parser: None,
            comment: None,
        }
    }

    pub fn with_parser(mut self, parser: &str) -> Self {
        self.parser = Some(parser.to_string());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpatialIndex {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SpatialIndex {
    pub fn new<I, S>(name: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            comment: None,
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

/// Referential action for `ON UPDATE` / `ON DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ReferenceOption {
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "NO ACTION")]
    NoAction,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

impl fmt::Display for ReferenceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceOption::Restrict => "RESTRICT",
            ReferenceOption::Cascade => "CASCADE",
            ReferenceOption::SetNull => "SET NULL",
            ReferenceOption::NoAction => "NO ACTION",
            ReferenceOption::SetDefault => "SET DEFAULT",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub table: String,
    pub references: Vec<String>,
    #[serde(default)]
    pub on_update: Option<ReferenceOption>,
    #[serde(default)]
    pub on_delete: Option<ReferenceOption>,
}

impl ForeignKey {
    pub fn new<I, S, J, T>(name: &str, columns: I, table: &str, references: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            table: table.to_string(),
            references: references.into_iter().map(Into::into).collect(),
            on_update: None,
            on_delete: None,
        }
    }

    pub fn on_update(mut self, option: ReferenceOption) -> Self {
        self.on_update = Some(option);
        self
    }

    pub fn on_delete(mut self, option: ReferenceOption) -> Self {
        self.on_delete = Some(option);
        self
    }
}

/// An optional extension point a description may support.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    Table(String),
    PrimaryKey(PrimaryKey),
    Indexes(Vec<Index>),
    UniqueIndexes(Vec<UniqueIndex>),
    FullTextIndexes(Vec<FullTextIndex>),
    SpatialIndexes(Vec<SpatialIndex>),
    ForeignKeys(Vec<ForeignKey>),
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Table(_) => "table name",
            Capability::PrimaryKey(_) => "primary key",
            Capability::Indexes(_) => "indexes",
            Capability::UniqueIndexes(_) => "unique indexes",
            Capability::FullTextIndexes(_) => "fulltext indexes",
            Capability::SpatialIndexes(_) => "spatial indexes",
            Capability::ForeignKeys(_) => "foreign keys",
        }
    }
}

/// One record's schema description.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    /// Record name, e.g. `UserProfile`. The default table name is its snake_case form.
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub capabilities: Vec<Capability>,
}

impl Description {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn table(self, name: &str) -> Self {
        self.with(Capability::Table(name.to_string()))
    }

    pub fn primary_key<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(Capability::PrimaryKey(PrimaryKey::new(columns)))
    }

    pub fn indexes(self, indexes: Vec<Index>) -> Self {
        self.with(Capability::Indexes(indexes))
    }

    pub fn unique_indexes(self, indexes: Vec<UniqueIndex>) -> Self {
        self.with(Capability::UniqueIndexes(indexes))
    }

    pub fn fulltext_indexes(self, indexes: Vec<FullTextIndex>) -> Self {
        self.with(Capability::FullTextIndexes(indexes))
    }

    pub fn spatial_indexes(self, indexes: Vec<SpatialIndex>) -> Self {
        self.with(Capability::SpatialIndexes(indexes))
    }

    pub fn foreign_keys(self, keys: Vec<ForeignKey>) -> Self {
        self.with(Capability::ForeignKeys(keys))
    }
}
