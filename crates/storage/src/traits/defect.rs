use async_trait::async_trait;

use crate::error::StorageError;

/// Image evidence attached to damaged-package and defective-product reports.
#[async_trait]
pub trait DefectStore: Send + Sync {
    async fn fetch_damaged_package_url(&self, order_id: i32) -> Result<Option<String>, StorageError>;

    async fn fetch_defect_product_url(&self, order_id: i32) -> Result<Option<String>, StorageError>;
}
