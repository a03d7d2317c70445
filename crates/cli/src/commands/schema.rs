use anyhow::Result;
use retail_agents_storage::{PgStorage, SchemaStore};

pub(crate) async fn run() -> Result<()> {
    let storage = PgStorage::new(&crate::get_database_url()?).await?;
    let definitions = storage.get_table_definitions_for_prompt().await?;
    if definitions.is_empty() {
        println!("No tables in the public schema. Run `retail-agents migrate` first.");
    } else {
        println!("{definitions}");
    }
    Ok(())
}
