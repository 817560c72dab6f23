//! TOML manifest listing the descriptions to compile.
//!
//! ```toml
//! [database]
//! engine = "InnoDB"
//!
//! [[table]]
//! name = "User"
//! primary_key = ["id"]
//!
//! [[table.field]]
//! name = "id"
//! kind = "i64"
//! auto_increment = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::config::DbConfig;
use crate::describe::{
    Capability, Description, FieldDescriptor, ForeignKey, FullTextIndex, Index, PrimaryKey,
    SpatialIndex,
};
use crate::error::MakerError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub table: Vec<ManifestTable>,
}

/// One `[[table]]` entry. Every present key becomes a capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestTable {
    pub name: String,
    pub table: Option<String>,
    pub primary_key: Option<Vec<String>>,
    #[serde(default)]
    pub field: Vec<FieldDescriptor>,
    pub index: Option<Vec<Index>>,
    pub unique_index: Option<Vec<Index>>,
    pub fulltext_index: Option<Vec<FullTextIndex>>,
    pub spatial_index: Option<Vec<SpatialIndex>>,
    pub foreign_key: Option<Vec<ForeignKey>>,
}

impl From<ManifestTable> for Description {
    fn from(t: ManifestTable) -> Self {
        let mut desc = Description::new(&t.name);
        desc.fields = t.field;
        let capabilities = [
            t.table.map(Capability::Table),
            t.primary_key
                .map(|columns| Capability::PrimaryKey(PrimaryKey::new(columns))),
            t.index.map(Capability::Indexes),
            t.unique_index.map(Capability::UniqueIndexes),
            t.fulltext_index.map(Capability::FullTextIndexes),
            t.spatial_index.map(Capability::SpatialIndexes),
            t.foreign_key.map(Capability::ForeignKeys),
        ];
        desc.capabilities = capabilities.into_iter().flatten().collect();
        desc
    }
}

impl Manifest {
    pub fn parse(source: &str, path: &str) -> Result<Self, MakerError> {
        toml::from_str(source).map_err(|source| MakerError::Manifest {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, MakerError> {
        let source = std::fs::read_to_string(path)?;
        let manifest = Self::parse(&source, &path.display().to_string())?;
        tracing::debug!(
            "Loaded {} table description(s) from {}",
            manifest.table.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Descriptions in manifest order.
    pub fn descriptions(&self) -> Vec<Description> {
        self.table.iter().cloned().map(Description::from).collect()
    }
}
