//! DefectStore implementation for PgStorage.

use async_trait::async_trait;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::DefectStore;

#[async_trait]
impl DefectStore for PgStorage {
    async fn fetch_damaged_package_url(&self, order_id: i32) -> Result<Option<String>, StorageError> {
        let url = sqlx::query_scalar(
            "SELECT damaged_package_img FROM package_damaged WHERE orderid = $1 LIMIT 1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }

    async fn fetch_defect_product_url(&self, order_id: i32) -> Result<Option<String>, StorageError> {
        let url = sqlx::query_scalar(
            "SELECT defect_product_img FROM product_defect WHERE orderid = $1 LIMIT 1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(url)
    }
}
