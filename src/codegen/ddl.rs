use std::fmt::Write;

use crate::codegen::Generator;
use crate::config::DbConfig;
use crate::escape::{quote_ident, quote_idents, quote_string};
use crate::schema::{Column, Table};

/// Renders the MySQL DDL script.
pub struct DdlGenerator<'a> {
    pub config: &'a DbConfig,
}

impl Generator for DdlGenerator<'_> {
    fn generate(&self, tables: &[Table]) -> syn::Result<String> {
        // Foreign key checks are off so tables can be dropped and created in any order.
        let mut output = String::from("SET foreign_key_checks=0;\n\n");
        for (i, table) in tables.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&generate_table(table, self.config));
        }
        output.push_str("SET foreign_key_checks=1;\n");
        Ok(output)
    }
}

fn generate_table(table: &Table, config: &DbConfig) -> String {
    let name = quote_ident(&table.name);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("DROP TABLE IF EXISTS {name};"));
    lines.push(String::new());
    lines.push(format!("CREATE TABLE {name} ("));

    for col in &table.columns {
        lines.push(format!("    {},", column_definition(col)));
    }

    for idx in &table.indexes {
        let mut line = format!("    INDEX {} ({})", quote_ident(&idx.name), quote_idents(&idx.columns));
        push_index_options(&mut line, idx.invisible, idx.comment.as_deref());
        lines.push(line + ",");
    }

    for idx in &table.unique_indexes {
        let mut line = format!("    UNIQUE {} ({})", quote_ident(&idx.name), quote_idents(&idx.columns));
        push_index_options(&mut line, idx.invisible, idx.comment.as_deref());
        lines.push(line + ",");
    }

    for idx in &table.fulltext_indexes {
        let mut line = format!(
            "    FULLTEXT INDEX {} ({})",
            quote_ident(&idx.name),
            quote_idents(&idx.columns)
        );
        if let Some(ref parser) = idx.parser {
            let _ = write!(line, " WITH PARSER {parser}");
        }
        push_index_options(&mut line, false, idx.comment.as_deref());
        lines.push(line + ",");
    }

    for idx in &table.spatial_indexes {
        let mut line = format!(
            "    SPATIAL INDEX {} ({})",
            quote_ident(&idx.name),
            quote_idents(&idx.columns)
        );
        push_index_options(&mut line, false, idx.comment.as_deref());
        lines.push(line + ",");
    }

    for fk in &table.foreign_keys {
        let mut line = format!(
            "    CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote_ident(&fk.name),
            quote_idents(&fk.columns),
            quote_ident(&fk.table),
            quote_idents(&fk.references)
        );
        if let Some(action) = fk.on_delete {
            let _ = write!(line, " ON DELETE {action}");
        }
        if let Some(action) = fk.on_update {
            let _ = write!(line, " ON UPDATE {action}");
        }
        lines.push(line + ",");
    }

    lines.push(format!(
        "    PRIMARY KEY ({})",
        quote_idents(&table.primary_key.columns)
    ));
    lines.push(format!("){};", table_options(config)));

    let mut block = lines.join("\n");
    block.push_str("\n\n");
    block
}

fn column_definition(col: &Column) -> String {
    let mut def = format!("{} {}", quote_ident(&col.name), col.sql_type);
    if let Some(size) = col.size {
        let _ = write!(def, "({size})");
    }
    if col.unsigned {
        def.push_str(" unsigned");
    }
    if let Some(ref charset) = col.charset {
        let _ = write!(def, " CHARACTER SET {charset}");
    }
    if let Some(ref collate) = col.collate {
        let _ = write!(def, " COLLATE {collate}");
    }
    def.push_str(if col.nullable { " NULL" } else { " NOT NULL" });
    if let Some(srid) = col.srid {
        let _ = write!(def, " SRID {srid}");
    }
    if let Some(ref default) = col.default {
        let _ = write!(def, " DEFAULT {default}");
    }
    if col.auto_increment {
        def.push_str(" AUTO_INCREMENT");
    }
    if col.invisible {
        def.push_str(" INVISIBLE");
    }
    if let Some(ref comment) = col.comment {
        let _ = write!(def, " COMMENT {}", quote_string(comment));
    }
    def
}

fn push_index_options(line: &mut String, invisible: bool, comment: Option<&str>) {
    if invisible {
        line.push_str(" INVISIBLE");
    }
    if let Some(comment) = comment {
        line.push_str(" COMMENT ");
        line.push_str(&quote_string(comment));
    }
}

fn table_options(config: &DbConfig) -> String {
    let mut opts = String::new();
    if !config.engine.is_empty() {
        let _ = write!(opts, " ENGINE={}", config.engine);
    }
    if !config.charset.is_empty() {
        let _ = write!(opts, " DEFAULT CHARACTER SET={}", config.charset);
    }
    if !config.collate.is_empty() {
        let _ = write!(opts, " DEFAULT COLLATE={}", config.collate);
    }
    opts
}
