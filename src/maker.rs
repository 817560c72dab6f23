use std::fs;
use std::io::Write;
use std::path::Path;

use crate::codegen::client::ClientGenerator;
use crate::codegen::ddl::DdlGenerator;
use crate::codegen::Generator;
use crate::config::DbConfig;
use crate::describe::Description;
use crate::error::MakerError;
use crate::schema::{build_tables, Table};
use crate::validate::validate;

/// One compilation: a set of descriptions plus the table options they share.
///
/// Every render rebuilds and revalidates the tables from scratch.
#[derive(Debug, Clone, Default)]
pub struct Maker {
    pub config: DbConfig,
    descriptions: Vec<Description>,
}

impl Maker {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            descriptions: Vec::new(),
        }
    }

    pub fn add_descriptions<I>(&mut self, descriptions: I)
    where
        I: IntoIterator<Item = Description>,
    {
        self.descriptions.extend(descriptions);
    }

    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    /// Build and validate the tables, in description order.
    pub fn compile(&self) -> Result<Vec<Table>, MakerError> {
        let tables = build_tables(&self.descriptions)?;
        tracing::debug!("Validating {} table(s)", tables.len());
        validate(&tables)?;
        Ok(tables)
    }

    pub fn render_ddl(&self) -> Result<String, MakerError> {
        self.render_ddl_as("DDL")
    }

    pub fn render_client(&self) -> Result<String, MakerError> {
        self.render_client_as("client code")
    }

    pub fn generate_ddl<W: Write>(&self, out: &mut W, label: &str) -> Result<(), MakerError> {
        let ddl = self.render_ddl_as(label)?;
        write_to(out, &ddl, label)
    }

    pub fn generate_client<W: Write>(&self, out: &mut W, label: &str) -> Result<(), MakerError> {
        let code = self.render_client_as(label)?;
        write_to(out, &code, label)
    }

    /// Write the DDL script to `path`. Nothing is created if compilation fails.
    pub fn generate_ddl_file(&self, path: &Path) -> Result<(), MakerError> {
        let ddl = self.render_ddl_as(&path.display().to_string())?;
        write_file(path, &ddl)
    }

    /// Write the client code to `path`. Nothing is created if compilation fails.
    pub fn generate_client_file(&self, path: &Path) -> Result<(), MakerError> {
        let code = self.render_client_as(&path.display().to_string())?;
        write_file(path, &code)
    }

    fn render_ddl_as(&self, label: &str) -> Result<String, MakerError> {
        self.render(&DdlGenerator { config: &self.config }, label)
    }

    fn render_client_as(&self, label: &str) -> Result<String, MakerError> {
        self.render(&ClientGenerator, label)
    }

    /// `label` names the artifact in a formatting error.
    fn render<G: Generator>(&self, generator: &G, label: &str) -> Result<String, MakerError> {
        let tables = self.compile()?;
        generator.generate(&tables).map_err(|source| MakerError::Format {
            label: label.to_string(),
            source,
        })
    }
}

/// Write already rendered output to a sink.
pub fn write_to<W: Write>(out: &mut W, text: &str, label: &str) -> Result<(), MakerError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| MakerError::Write {
            label: label.to_string(),
            source,
        })
}

/// Write already rendered output to `path`.
pub fn write_file(path: &Path, text: &str) -> Result<(), MakerError> {
    fs::write(path, text).map_err(|source| MakerError::Write {
        label: path.display().to_string(),
        source,
    })?;
    tracing::info!("Output written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{FieldDescriptor, FieldKind, ForeignKey, FullTextIndex, Index, SpatialIndex};
    use indoc::indoc;

    fn maker(descriptions: Vec<Description>) -> Maker {
        let mut maker = Maker::new(DbConfig::new("InnoDB", "utf8mb4", "utf8mb4_bin"));
        maker.add_descriptions(descriptions);
        maker
    }

    fn id_only(name: &str) -> Description {
        Description::new(name)
            .field(FieldDescriptor::new("id", FieldKind::I32))
            .primary_key(["id"])
    }

    fn messages(maker: &Maker) -> Vec<String> {
        match maker.compile() {
            Err(MakerError::Validation(e)) => e.messages().into_iter().map(String::from).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_table_script() {
        let ddl = maker(vec![id_only("Foo1")]).render_ddl().unwrap();
        assert_eq!(
            ddl,
            indoc! {"
                SET foreign_key_checks=0;

                DROP TABLE IF EXISTS `foo1`;

                CREATE TABLE `foo1` (
                    `id` INTEGER NOT NULL,
                    PRIMARY KEY (`id`)
                ) ENGINE=InnoDB DEFAULT CHARACTER SET=utf8mb4 DEFAULT COLLATE=utf8mb4_bin;

                SET foreign_key_checks=1;
            "}
        );
    }

    #[test]
    fn test_duplicate_display_name() {
        let m = maker(vec![id_only("Foo11"), id_only("Foo12").table("foo11")]);
        assert_eq!(messages(&m), vec![r#"duplicated name of table: "foo11""#]);
    }

    #[test]
    fn test_uncovered_foreign_key_with_type_mismatch() {
        let m = maker(vec![
            id_only("Child")
                .field(FieldDescriptor::new("parent_id", FieldKind::U32))
                .foreign_keys(vec![ForeignKey::new("fk_parent", ["parent_id"], "parent", ["id"])]),
            id_only("Parent"),
        ]);
        assert_eq!(
            messages(&m),
            vec![
                r#"table "child", foreign key "fk_parent": index required on table "child""#,
                r#"table "child", foreign key "fk_parent": column "parent_id" and referenced column "parent"."id" type mismatch"#,
            ]
        );
    }

    #[test]
    fn test_index_name_reused_across_kinds() {
        let m = maker(vec![id_only("Foo15")
            .field(FieldDescriptor::new("body", FieldKind::String))
            .field(FieldDescriptor::new("place", FieldKind::Bytes).sql_type("GEOMETRY").srid(4326))
            .indexes(vec![Index::new("idx", ["id"])])
            .unique_indexes(vec![Index::new("idx", ["id"])])
            .fulltext_indexes(vec![FullTextIndex::new("idx", ["body"])])
            .spatial_indexes(vec![SpatialIndex::new("idx", ["place"])])]);
        let dup = r#"table "foo15": duplicated name of index: "idx""#;
        assert_eq!(messages(&m), vec![dup, dup, dup]);
    }

    #[test]
    fn test_missing_primary_key_fails_before_validation() {
        let m = maker(vec![id_only("Foo11"), Description::new("NoKey"), id_only("Foo11")]);
        let err = m.compile().unwrap_err();
        assert!(matches!(err, MakerError::MissingPrimaryKey { ref description } if description == "NoKey"));
    }

    #[test]
    fn test_renders_are_deterministic() {
        let m = maker(vec![
            id_only("Foo1"),
            id_only("Foo4")
                .field(FieldDescriptor::new("name", FieldKind::String).nullable())
                .foreign_keys(vec![ForeignKey::new("fk_foo1", ["id"], "foo1", ["id"])]),
        ]);
        assert_eq!(m.render_ddl().unwrap(), m.render_ddl().unwrap());
        assert_eq!(m.render_client().unwrap(), m.render_client().unwrap());
    }

    #[test]
    fn test_generate_to_sink() {
        let m = maker(vec![id_only("Foo1")]);
        let mut ddl = Vec::new();
        m.generate_ddl(&mut ddl, "buffer").unwrap();
        assert_eq!(String::from_utf8(ddl).unwrap(), m.render_ddl().unwrap());

        let mut code = Vec::new();
        m.generate_client(&mut code, "buffer").unwrap();
        let code = String::from_utf8(code).unwrap();
        assert!(code.contains("pub fn insert_foo1"));
        syn::parse_file(&code).unwrap();
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_carries_label() {
        let m = maker(vec![id_only("Foo1")]);
        let err = m.generate_ddl(&mut BrokenSink, "schema.sql").unwrap_err();
        assert!(matches!(err, MakerError::Write { ref label, .. } if label == "schema.sql"));
        assert_eq!(err.to_string(), "failed to write schema.sql: disk full");
    }

    #[test]
    fn test_failed_compile_leaves_existing_file_untouched() {
        let dir = std::env::temp_dir().join(format!("ddlmaker-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("schema.sql");
        fs::write(&path, "previous").unwrap();

        let m = maker(vec![id_only("Foo11"), id_only("Foo12").table("foo11")]);
        assert!(m.generate_ddl_file(&path).is_err());
        assert!(m.generate_client_file(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");

        let ok = maker(vec![id_only("Foo1")]);
        ok.generate_ddl_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ok.render_ddl().unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_failure_is_labelled_with_destination() {
        let m = maker(vec![Description::new("Bad Name")
            .field(FieldDescriptor::new("id", FieldKind::I32))
            .table("bad")
            .primary_key(["id"])]);
        let path = std::env::temp_dir().join(format!("ddlmaker-format-{}.rs", std::process::id()));

        let err = m.generate_client_file(&path).unwrap_err();
        assert!(matches!(err, MakerError::Format { ref label, .. } if *label == path.display().to_string()));
        assert!(!path.exists());

        let err = m.generate_client(&mut Vec::new(), "buffer").unwrap_err();
        assert!(matches!(err, MakerError::Format { ref label, .. } if label == "buffer"));
    }

    #[test]
    fn test_write_rendered_output() {
        let m = maker(vec![id_only("Foo1")]);
        let ddl = m.render_ddl().unwrap();

        let mut out = Vec::new();
        write_to(&mut out, &ddl, "stdout").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ddl);

        let path = std::env::temp_dir().join(format!("ddlmaker-write-{}.sql", std::process::id()));
        write_file(&path, &ddl).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ddl);
        fs::remove_file(&path).unwrap();
    }
}
