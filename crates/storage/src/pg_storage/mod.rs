//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod defects;
mod orders;
mod queries;
mod schema;

use std::time::Duration;

use retail_agents_core::{PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

/// Connection to the retail database. Opened once and reused for its lifetime.
#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects to `database_url`. Does not touch the schema.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .connect(database_url)
            .await?;
        tracing::info!("PgStorage connected");
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the retail tables if missing.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        run_pg_migrations(&self.pool).await
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Quote a table or column name as a PostgreSQL identifier.
pub fn quote_ident(name: &str) -> Result<String, StorageError> {
    if name.trim().is_empty() || name.contains('\0') {
        return Err(StorageError::InvalidIdentifier(name.to_owned()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Drops trailing `;` and whitespace so a statement can be embedded as a subquery.
#[must_use]
pub fn strip_trailing_semicolons(sql: &str) -> &str {
    sql.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// Renders `CREATE TABLE` text from `(column, type)` pairs in column order.
#[must_use]
pub fn render_create_table(table: &str, columns: &[(String, String)]) -> String {
    if columns.is_empty() {
        return format!("CREATE TABLE {table} (\n);");
    }
    let body = columns
        .iter()
        .map(|(name, data_type)| format!("{name} {data_type}"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {table} (\n{body}\n);")
}
