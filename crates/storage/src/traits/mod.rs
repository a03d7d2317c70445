//! Storage trait abstraction.
//!
//! Async domain traits implemented by [`crate::PgStorage`]; the agent layer
//! depends on [`RetailStore`] so tool dispatch can be exercised without a database.

mod defect;
mod order;
mod query;
mod schema;

pub use defect::DefectStore;
pub use order::OrderStore;
pub use query::{JsonRow, QueryStore};
pub use schema::SchemaStore;

/// Everything the retail agents may call on the database.
pub trait RetailStore: QueryStore + SchemaStore + OrderStore + DefectStore {}

impl<T> RetailStore for T where T: QueryStore + SchemaStore + OrderStore + DefectStore {}
