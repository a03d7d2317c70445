//! Storage layer for retail-agents
//!
//! PostgreSQL access over sqlx: parameterized queries returning JSON rows,
//! schema introspection for prompt context, and transactional order placement.

pub mod error;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::{PgStorage, quote_ident, render_create_table, strip_trailing_semicolons};
pub use traits::{DefectStore, JsonRow, OrderStore, QueryStore, RetailStore, SchemaStore};
