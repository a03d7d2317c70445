use async_trait::async_trait;

use crate::error::StorageError;

/// Schema introspection used to build prompt context.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Names of all tables in the `public` schema.
    async fn get_all_table_names(&self) -> Result<Vec<String>, StorageError>;

    /// `CREATE TABLE` text for one public table.
    async fn get_table_definition(&self, table: &str) -> Result<String, StorageError>;

    /// Definitions of every public table separated by a blank line.
    async fn get_table_definitions_for_prompt(&self) -> Result<String, StorageError> {
        let mut definitions = Vec::new();
        for table in self.get_all_table_names().await? {
            definitions.push(self.get_table_definition(&table).await?);
        }
        Ok(definitions.join("\n\n"))
    }
}
