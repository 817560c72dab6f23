use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlConnection;

use crate::error::MakerError;
use crate::escape::quote_ident;

/// Apply a DDL script to a throwaway database on the server at `url`.
///
/// The scratch database is dropped again whether or not the script succeeds.
pub async fn verify_ddl(url: &str, ddl: &str) -> Result<(), MakerError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(url)
        .await?;

    let database = scratch_database_name();
    let result = match pool.acquire().await {
        Ok(mut conn) => apply_in_scratch(&mut *conn, &database, ddl).await,
        Err(e) => Err(e.into()),
    };
    pool.close().await;

    result?;
    tracing::info!("DDL applied cleanly to scratch database {database}");
    Ok(())
}

/// Runs one statement over the text protocol; `USE` cannot be prepared.
trait Session {
    async fn run(&mut self, sql: &str) -> Result<(), MakerError>;
}

impl Session for MySqlConnection {
    async fn run(&mut self, sql: &str) -> Result<(), MakerError> {
        sqlx::raw_sql(sql).execute(&mut *self).await?;
        Ok(())
    }
}

async fn apply_in_scratch<S: Session>(
    session: &mut S,
    database: &str,
    ddl: &str,
) -> Result<(), MakerError> {
    let quoted = quote_ident(database);
    tracing::debug!("Creating scratch database {database}");
    session.run(&format!("CREATE DATABASE {quoted}")).await?;

    let applied = apply(session, &quoted, ddl).await;
    let dropped = session
        .run(&format!("DROP DATABASE IF EXISTS {quoted}"))
        .await;
    applied.and(dropped)
}

async fn apply<S: Session>(session: &mut S, quoted: &str, ddl: &str) -> Result<(), MakerError> {
    session.run(&format!("USE {quoted}")).await?;
    session.run(ddl).await
}

fn scratch_database_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("ddlmaker_{nanos:x}")
}
