use async_trait::async_trait;

use crate::error::StorageError;

/// One result row keyed by column name.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;

/// Free-form and generic table queries.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Run a query and return its rows. Date/time values come back as ISO-8601 strings.
    async fn run_sql(&self, sql: &str) -> Result<Vec<JsonRow>, StorageError>;

    /// Run a model-authored product query inside a read-only transaction.
    async fn recommend_product(&self, sql: &str) -> Result<Vec<JsonRow>, StorageError>;

    /// Fetch one row of `table` whose `key_column` equals `id`.
    async fn get_row(
        &self,
        table: &str,
        key_column: &str,
        id: i32,
    ) -> Result<Option<JsonRow>, StorageError>;

    /// Fetch every row of `table`.
    async fn get_all(&self, table: &str) -> Result<Vec<JsonRow>, StorageError>;

    /// Delete rows of `table` whose `key_column` equals `id`. Returns `true` if a row was deleted.
    async fn delete(&self, table: &str, key_column: &str, id: i32) -> Result<bool, StorageError>;
}
