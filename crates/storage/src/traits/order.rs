use async_trait::async_trait;
use retail_agents_core::{Customer, OrderStatus, Purchase};

use crate::error::StorageError;

/// Customer and order operations.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert the customer, price the product and insert a pending order in one
    /// transaction. Returns the new order id. Nothing is committed on failure.
    async fn buy_product(&self, purchase: &Purchase) -> Result<i32, StorageError>;

    /// Insert or update a customer keyed by `customerid`.
    async fn save_customer(&self, customer: &Customer) -> Result<(), StorageError>;

    /// Order date and status, `None` if the order does not exist.
    async fn get_order_status(&self, order_id: i32) -> Result<Option<OrderStatus>, StorageError>;

    /// Stored total price, `None` if the order does not exist.
    async fn get_totalprice(&self, order_id: i32) -> Result<Option<f64>, StorageError>;
}
