use std::path::PathBuf;

use clap::Parser;

use ddlmaker::DbConfig;

/// Compile table descriptions into a MySQL DDL script and Rust client helpers.
#[derive(Parser, Debug)]
#[command(name = "ddlmaker", version, about)]
pub struct Cli {
    /// TOML manifest listing the table descriptions
    pub manifest: PathBuf,

    /// DDL output file (default: stdout)
    #[arg(long)]
    pub out_ddl: Option<PathBuf>,

    /// Rust client code output file
    #[arg(long)]
    pub out_client: Option<PathBuf>,

    /// Storage engine, overrides the manifest
    #[arg(long, env = "DDLMAKER_ENGINE")]
    pub engine: Option<String>,

    /// Default character set, overrides the manifest
    #[arg(long, env = "DDLMAKER_CHARSET")]
    pub charset: Option<String>,

    /// Default collation, overrides the manifest
    #[arg(long, env = "DDLMAKER_COLLATE")]
    pub collate: Option<String>,

    /// Apply the DDL to a scratch database on this MySQL server (e.g. mysql://root@localhost:3306)
    #[arg(long, env = "DDLMAKER_VERIFY_URL")]
    pub verify_url: Option<String>,
}

impl Cli {
    /// Table options given on the command line; unset values are empty.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(
            self.engine.as_deref().unwrap_or_default(),
            self.charset.as_deref().unwrap_or_default(),
            self.collate.as_deref().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ddlmaker", "schema.toml"]).unwrap();
        assert_eq!(cli.manifest, PathBuf::from("schema.toml"));
        assert!(cli.out_ddl.is_none());
        assert!(cli.out_client.is_none());
    }

    #[test]
    fn test_flag_overrides_manifest_values() {
        let cli = Cli::try_parse_from([
            "ddlmaker",
            "schema.toml",
            "--out-ddl",
            "schema.sql",
            "--engine",
            "MyISAM",
        ])
        .unwrap();
        assert_eq!(cli.out_ddl, Some(PathBuf::from("schema.sql")));
        let config = DbConfig::new("InnoDB", "utf8mb4", "").merge(cli.db_config());
        assert_eq!(config.engine, "MyISAM");
        assert_eq!(config.charset, "utf8mb4");
    }
}
