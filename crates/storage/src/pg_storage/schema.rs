//! SchemaStore implementation for PgStorage.

use async_trait::async_trait;

use super::{PgStorage, render_create_table};
use crate::error::StorageError;
use crate::traits::SchemaStore;

#[async_trait]
impl SchemaStore for PgStorage {
    async fn get_all_table_names(&self) -> Result<Vec<String>, StorageError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT tablename::text FROM pg_tables WHERE schemaname = 'public' ORDER BY tablename",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn get_table_definition(&self, table: &str) -> Result<String, StorageError> {
        let columns: Vec<(String, String)> = sqlx::query_as(
            "SELECT pg_attribute.attname::text,
                    format_type(pg_attribute.atttypid, pg_attribute.atttypmod)
             FROM pg_class
             JOIN pg_namespace ON pg_namespace.oid = pg_class.relnamespace
             JOIN pg_attribute ON pg_attribute.attrelid = pg_class.oid
             WHERE pg_attribute.attnum > 0
               AND NOT pg_attribute.attisdropped
               AND pg_class.relname = $1
               AND pg_namespace.nspname = 'public'
             ORDER BY pg_attribute.attnum",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;
        Ok(render_create_table(table, &columns))
    }
}
