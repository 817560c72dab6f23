//! Cross-referential validation of built tables.
//!
//! Every check runs; problems are appended to one [`Diagnostics`] list and
//! reported together. The order of the list is part of the contract:
//!
//! 1. duplicate table names, across all tables;
//! 2. per table: duplicate columns, primary key columns, then the shared index
//!    namespace (regular, unique, fulltext, spatial), then foreign keys one by one.

use std::collections::HashSet;

use crate::error::{Diagnostic, DiagnosticKind, ValidationError};
use crate::schema::Table;

#[derive(Debug, Default)]
struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    fn push(&mut self, kind: DiagnosticKind, message: String) {
        self.items.push(Diagnostic { kind, message });
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.items))
        }
    }
}

/// Validate a whole set of tables compiled together.
pub fn validate(tables: &[Table]) -> Result<(), ValidationError> {
    let mut diags = Diagnostics::default();

    let mut names = HashSet::new();
    for table in tables {
        if !names.insert(table.name.as_str()) {
            diags.push(
                DiagnosticKind::Structural,
                format!("duplicated name of table: {:?}", table.name),
            );
        }
    }

    for table in tables {
        validate_columns(table, &mut diags);
        validate_primary_key(table, &mut diags);
        validate_indexes(table, &mut diags);
        validate_foreign_keys(table, tables, &mut diags);
    }

    tracing::debug!("Validation found {} problem(s)", diags.items.len());
    diags.into_result()
}

fn validate_columns(table: &Table, diags: &mut Diagnostics) {
    let mut seen = HashSet::new();
    for col in &table.columns {
        if !seen.insert(col.name.as_str()) {
            diags.push(
                DiagnosticKind::Structural,
                format!(
                    "table {:?}: duplicated name of column: {:?}",
                    table.name, col.name
                ),
            );
        }
    }
}

fn validate_primary_key(table: &Table, diags: &mut Diagnostics) {
    if table.primary_key.columns.is_empty() {
        diags.push(
            DiagnosticKind::Structural,
            format!("table {:?}: primary key has no columns", table.name),
        );
    }
    for name in &table.primary_key.columns {
        if table.column(name).is_none() {
            diags.push(
                DiagnosticKind::Reference,
                format!(
                    "table {:?}, primary key: column {:?} not found",
                    table.name, name
                ),
            );
        }
    }
}

fn validate_indexes(table: &Table, diags: &mut Diagnostics) {
    // Every index kind shares one namespace.
    let all = table
        .indexes
        .iter()
        .map(|idx| ("index", &idx.name, &idx.columns))
        .chain(
            table
                .unique_indexes
                .iter()
                .map(|idx| ("unique index", &idx.name, &idx.columns)),
        )
        .chain(
            table
                .fulltext_indexes
                .iter()
                .map(|idx| ("fulltext index", &idx.name, &idx.columns)),
        )
        .chain(
            table
                .spatial_indexes
                .iter()
                .map(|idx| ("spatial index", &idx.name, &idx.columns)),
        );

    let mut seen = HashSet::new();
    for (kind, name, columns) in all {
        if !seen.insert(name.as_str()) {
            diags.push(
                DiagnosticKind::Structural,
                format!(
                    "table {:?}: duplicated name of index: {:?}",
                    table.name, name
                ),
            );
        }
        if columns.is_empty() {
            diags.push(
                DiagnosticKind::Structural,
                format!("table {:?}, {} {:?}: no columns", table.name, kind, name),
            );
        }
        for col in columns {
            if table.column(col).is_none() {
                diags.push(
                    DiagnosticKind::Reference,
                    format!(
                        "table {:?}, {} {:?}: column {:?} not found",
                        table.name, kind, name, col
                    ),
                );
            }
        }
    }
}

fn validate_foreign_keys(table: &Table, tables: &[Table], diags: &mut Diagnostics) {
    let mut seen = HashSet::new();
    for fk in &table.foreign_keys {
        if !seen.insert(fk.name.as_str()) {
            diags.push(
                DiagnosticKind::Structural,
                format!(
                    "table {:?}: duplicated name of foreign key constraint: {:?}",
                    table.name, fk.name
                ),
            );
        }

        let prefix = format!("table {:?}, foreign key {:?}", table.name, fk.name);

        if fk.columns.is_empty() {
            diags.push(DiagnosticKind::Structural, format!("{prefix}: no columns"));
        }

        let mut local_ok = true;
        for col in &fk.columns {
            if table.column(col).is_none() {
                local_ok = false;
                diags.push(
                    DiagnosticKind::Reference,
                    format!("{prefix}: column {col:?} not found"),
                );
            }
        }

        // InnoDB needs an index whose leading columns are the foreign key columns.
        if local_ok && !fk.columns.is_empty() && !has_covering_index(table, &fk.columns) {
            diags.push(
                DiagnosticKind::Integrity,
                format!("{prefix}: index required on table {:?}", table.name),
            );
        }

        let Some(target) = tables.iter().find(|t| t.name == fk.table) else {
            diags.push(
                DiagnosticKind::Reference,
                format!("{prefix}: referenced table {:?} not found", fk.table),
            );
            continue;
        };

        for col in &fk.references {
            if target.column(col).is_none() {
                diags.push(
                    DiagnosticKind::Reference,
                    format!(
                        "{prefix}: referenced column {:?}.{:?} not found",
                        target.name, col
                    ),
                );
            }
        }

        if fk.columns.len() != fk.references.len() {
            diags.push(
                DiagnosticKind::Structural,
                format!(
                    "{prefix}: {} columns reference {} columns",
                    fk.columns.len(),
                    fk.references.len()
                ),
            );
            continue;
        }

        for (local, remote) in fk.columns.iter().zip(&fk.references) {
            let (Some(l), Some(r)) = (table.column(local), target.column(remote)) else {
                continue;
            };
            if !l.same_type(r) {
                diags.push(
                    DiagnosticKind::Type,
                    format!(
                        "{prefix}: column {:?} and referenced column {:?}.{:?} type mismatch",
                        local, target.name, remote
                    ),
                );
            }
        }
    }
}

fn has_covering_index(table: &Table, columns: &[String]) -> bool {
    table.primary_key.columns.starts_with(columns)
        || table
            .unique_indexes
            .iter()
            .any(|idx| idx.columns.starts_with(columns))
        || table.indexes.iter().any(|idx| idx.columns.starts_with(columns))
}
