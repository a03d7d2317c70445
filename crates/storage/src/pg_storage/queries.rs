//! QueryStore implementation for PgStorage.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgConnection;

use super::{PgStorage, quote_ident, strip_trailing_semicolons};
use crate::error::StorageError;
use crate::traits::{JsonRow, QueryStore};

/// Wraps a statement so Postgres serializes every row to JSON itself;
/// timestamps and dates arrive already in ISO-8601 form.
///
/// The statement becomes a top-level CTE on its own lines: data-modifying
/// statements with `RETURNING` stay legal and a trailing `--` comment ends
/// before the closing parenthesis.
fn json_rows_sql(sql: &str) -> Result<String, StorageError> {
    let inner = strip_trailing_semicolons(sql);
    if inner.is_empty() {
        return Err(StorageError::InvalidInput("empty SQL statement".to_owned()));
    }
    Ok(format!("WITH t AS (\n{inner}\n) SELECT row_to_json(t) FROM t"))
}

fn into_json_row(value: Value) -> Result<JsonRow, StorageError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::DataCorruption {
            context: format!("row_to_json returned non-object: {other}"),
            source: "expected JSON object".into(),
        }),
    }
}

async fn fetch_json_rows(conn: &mut PgConnection, sql: &str) -> Result<Vec<JsonRow>, StorageError> {
    let wrapped = json_rows_sql(sql)?;
    let rows: Vec<Value> = sqlx::query_scalar(&wrapped).fetch_all(&mut *conn).await?;
    rows.into_iter().map(into_json_row).collect()
}

#[async_trait]
impl QueryStore for PgStorage {
    async fn run_sql(&self, sql: &str) -> Result<Vec<JsonRow>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let rows = fetch_json_rows(&mut conn, sql).await?;
        tracing::debug!(rows = rows.len(), "run_sql");
        Ok(rows)
    }

    async fn recommend_product(&self, sql: &str) -> Result<Vec<JsonRow>, StorageError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY").execute(&mut *tx).await?;
        let result = fetch_json_rows(&mut tx, sql).await;
        if let Err(e) = tx.rollback().await {
            tracing::warn!(error = %e, "failed to close read-only transaction");
        }
        let rows = result?;
        tracing::debug!(rows = rows.len(), "recommend_product");
        Ok(rows)
    }

    async fn get_row(
        &self,
        table: &str,
        key_column: &str,
        id: i32,
    ) -> Result<Option<JsonRow>, StorageError> {
        let sql = format!(
            "SELECT row_to_json(t) FROM (SELECT * FROM {} WHERE {} = $1) AS t LIMIT 1",
            quote_ident(table)?,
            quote_ident(key_column)?
        );
        let row: Option<Value> =
            sqlx::query_scalar(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(into_json_row).transpose()
    }

    async fn get_all(&self, table: &str) -> Result<Vec<JsonRow>, StorageError> {
        let sql = format!("SELECT * FROM {}", quote_ident(table)?);
        self.run_sql(&sql).await
    }

    async fn delete(&self, table: &str, key_column: &str, id: i32) -> Result<bool, StorageError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1",
            quote_ident(table)?,
            quote_ident(key_column)?
        );
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
