mod cli;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ddlmaker::maker::{write_file, write_to};
use ddlmaker::{verify, Maker, Manifest};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let manifest = Manifest::load(&cli.manifest)?;
    let config = manifest.database.clone().merge(cli.db_config());
    let mut maker = Maker::new(config);
    maker.add_descriptions(manifest.descriptions());

    tracing::debug!("Compiling {} description(s)", maker.descriptions().len());

    // Render before touching any output so a failed compile writes nothing.
    let ddl = maker.render_ddl()?;

    if let Some(ref url) = cli.verify_url {
        tracing::debug!("Verifying DDL against a scratch database");
        verify::verify_ddl(url, &ddl).await?;
    }

    match cli.out_ddl {
        Some(ref path) => write_file(path, &ddl)?,
        None => write_to(&mut io::stdout().lock(), &ddl, "stdout")?,
    }

    if let Some(ref path) = cli.out_client {
        maker.generate_client_file(path)?;
    }

    Ok(())
}
