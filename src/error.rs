use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MakerError {
    #[error("description {description:?} does not declare a primary key")]
    MissingPrimaryKey { description: String },

    #[error("description {description:?} declares {capability} more than once")]
    DuplicateCapability {
        description: String,
        capability: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to write {label}: {source}")]
    Write {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to format {label}: {source}")]
    Format {
        label: String,
        #[source]
        source: syn::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Category of a validation diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Duplicate table, column, index or constraint name.
    Structural,
    /// Unknown column or table referenced by a key or index.
    Reference,
    /// Foreign key column type mismatch.
    Type,
    /// Foreign key columns without a covering index.
    Integrity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every problem found by one validation pass, in the order it was found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s)", self.diagnostics.len())?;
        for d in &self.diagnostics {
            write!(f, "\n  {d}")?;
        }
        Ok(())
    }
}
