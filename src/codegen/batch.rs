//! Statement text for generated client helpers.
//!
//! Bulk inserts are sent as one multi-row `INSERT` per chunk of records. The
//! statement for a full chunk is built once; a shorter final chunk uses a
//! prefix of the same text, which is byte-identical to building the shorter
//! statement from scratch.

use crate::escape::quote_ident;
use crate::schema::{Column, Table};

/// The MySQL protocol allows at most this many placeholders in one prepared statement.
/// <https://stackoverflow.com/questions/18100782/import-of-50k-records-in-mysql-gives-general-error-1390-prepared-statement-con>
pub const MAX_PLACEHOLDER_COUNT: usize = 65535;

/// Upper bound on records per statement, regardless of width.
pub const MAX_BATCH_SIZE: usize = 32;

/// A bulk insert statement sized for the largest chunk of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    /// Statement text with `batch_cap` value tuples.
    pub text: String,
    /// Number of placeholders per record (non auto-increment columns).
    pub field_count: usize,
    /// Maximum number of records per statement.
    pub batch_cap: usize,
    /// Length of `", (?, ...)"`: one additional tuple.
    pub tuple_len: usize,
    /// Statement length minus `rows * tuple_len`, for any row count.
    pub head_len: usize,
}

impl InsertStatement {
    pub fn new(table: &Table) -> Self {
        let field_count = insert_columns(table).count();
        let batch_cap = batch_cap(field_count);
        let (head, tuple) = insert_parts(table);

        let mut text = String::with_capacity(head.len() + batch_cap * (tuple.len() + 2));
        text.push_str(&head);
        for i in 0..batch_cap {
            text.push_str(if i == 0 { " " } else { ", " });
            text.push_str(&tuple);
        }

        let tuple_len = tuple.len() + 2;
        Self {
            head_len: head.len() + 1 + tuple.len() - tuple_len,
            text,
            field_count,
            batch_cap,
            tuple_len,
        }
    }
}

/// Largest number of records one statement may carry.
pub fn batch_cap(field_count: usize) -> usize {
    (MAX_PLACEHOLDER_COUNT / field_count.max(1)).min(MAX_BATCH_SIZE)
}

/// Columns that receive a value on insert.
pub fn insert_columns(table: &Table) -> impl Iterator<Item = &Column> {
    table.columns.iter().filter(|c| !c.auto_increment)
}

/// `INSERT INTO t (a, b) VALUES` and `(?, ?)`.
fn insert_parts(table: &Table) -> (String, String) {
    let columns: Vec<String> = insert_columns(table).map(|c| quote_ident(&c.name)).collect();
    let placeholders = vec!["?"; columns.len()];
    let head = format!(
        "INSERT INTO {} ({}) VALUES",
        quote_ident(&table.name),
        columns.join(", ")
    );
    let tuple = format!("({})", placeholders.join(", "));
    (head, tuple)
}

/// `WHERE a = ? AND b = ?` over the primary key, in key order.
fn primary_key_condition(table: &Table) -> String {
    table
        .primary_key
        .columns
        .iter()
        .map(|c| format!("{} = ?", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Select every column of one row by primary key.
///
/// Conditions, and so the bound values, follow primary key order. For a
/// composite key declared in a different order than its columns this is not
/// column declaration order.
pub fn build_select(table: &Table) -> String {
    let fields: Vec<String> = table.columns.iter().map(|c| quote_ident(&c.name)).collect();
    format!(
        "SELECT {} FROM {} WHERE {}",
        fields.join(", "),
        quote_ident(&table.name),
        primary_key_condition(table)
    )
}

/// Update every non-key column by primary key.
///
/// `SET` values are bound in column order, followed by the key values in
/// primary key order. Returns `None` when there is nothing to set.
pub fn build_update(table: &Table) -> Option<String> {
    let sets: Vec<String> = table
        .columns
        .iter()
        .filter(|c| !table.is_primary_key_column(&c.name))
        .map(|c| format!("{} = ?", quote_ident(&c.name)))
        .collect();
    if sets.is_empty() {
        return None;
    }
    Some(format!(
        "UPDATE {} SET {} WHERE {}",
        quote_ident(&table.name),
        sets.join(", "),
        primary_key_condition(table)
    ))
}
