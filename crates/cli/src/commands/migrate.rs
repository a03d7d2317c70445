//! Creates the retail tables. Safe to run repeatedly.

use anyhow::Result;
use retail_agents_storage::{PgStorage, SchemaStore};

pub(crate) async fn run() -> Result<()> {
    let storage = PgStorage::new(&crate::get_database_url()?).await?;
    storage.run_migrations().await?;
    let tables = storage.get_all_table_names().await?;
    println!("Migrations applied. Tables: {}", tables.join(", "));
    Ok(())
}
