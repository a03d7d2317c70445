//! OrderStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use retail_agents_core::{Customer, ORDER_STATUS_PENDING, OrderStatus, Purchase};
use sqlx::PgConnection;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::OrderStore;

/// Customer insert, product price lookup and order insert. Runs inside the
/// caller's transaction; any error leaves it to be rolled back.
async fn place_order(conn: &mut PgConnection, purchase: &Purchase) -> Result<i32, StorageError> {
    let customer = &purchase.customer;
    let customerid: i32 = sqlx::query_scalar(
        "INSERT INTO customers (firstname, lastname, email, phonenumber, shippingaddress, creditcardnumber)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING customerid",
    )
    .bind(&customer.firstname)
    .bind(&customer.lastname)
    .bind(&customer.email)
    .bind(&customer.phonenumber)
    .bind(&customer.shippingaddress)
    .bind(&customer.creditcardnumber)
    .fetch_one(&mut *conn)
    .await?;

    let price: Option<f64> =
        sqlx::query_scalar("SELECT price::float8 FROM products WHERE productid = $1")
            .bind(purchase.productid)
            .fetch_optional(&mut *conn)
            .await?;
    let price = price.ok_or_else(|| StorageError::NotFound {
        entity: "product",
        id: purchase.productid.to_string(),
    })?;
    let total_price = price * f64::from(purchase.quantity);

    let orderid: i32 = sqlx::query_scalar(
        "INSERT INTO orders (customerid, productid, orderdate, quantity, totalprice, orderstatus)
         VALUES ($1, $2, LOCALTIMESTAMP, $3, ROUND($4::numeric, 2), $5)
         RETURNING orderid",
    )
    .bind(customerid)
    .bind(purchase.productid)
    .bind(purchase.quantity)
    .bind(total_price)
    .bind(ORDER_STATUS_PENDING)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(customerid, orderid, total_price, "order rows inserted");
    Ok(orderid)
}

#[async_trait]
impl OrderStore for PgStorage {
    async fn buy_product(&self, purchase: &Purchase) -> Result<i32, StorageError> {
        if purchase.quantity <= 0 {
            return Err(StorageError::InvalidInput(format!(
                "quantity must be positive, got {}",
                purchase.quantity
            )));
        }

        let mut tx = self.pool.begin().await?;
        match place_order(&mut tx, purchase).await {
            Ok(orderid) => {
                tx.commit().await?;
                tracing::info!(orderid, productid = purchase.productid, "order placed");
                Ok(orderid)
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed purchase failed");
                }
                tracing::warn!(error = %e, productid = purchase.productid, "purchase rolled back");
                Err(e)
            },
        }
    }

    async fn save_customer(&self, customer: &Customer) -> Result<(), StorageError> {
        let details = &customer.details;
        sqlx::query(
            "INSERT INTO customers (customerid, firstname, lastname, email, phonenumber, shippingaddress, creditcardnumber)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (customerid) DO UPDATE SET
               firstname = EXCLUDED.firstname,
               lastname = EXCLUDED.lastname,
               email = EXCLUDED.email,
               phonenumber = EXCLUDED.phonenumber,
               shippingaddress = EXCLUDED.shippingaddress,
               creditcardnumber = EXCLUDED.creditcardnumber",
        )
        .bind(customer.customerid)
        .bind(&details.firstname)
        .bind(&details.lastname)
        .bind(&details.email)
        .bind(&details.phonenumber)
        .bind(&details.shippingaddress)
        .bind(&details.creditcardnumber)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_order_status(&self, order_id: i32) -> Result<Option<OrderStatus>, StorageError> {
        let row: Option<(NaiveDateTime, String)> = sqlx::query_as(
            "SELECT orderdate::timestamp, orderstatus FROM orders WHERE orderid = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(orderdate, orderstatus)| OrderStatus { orderdate, orderstatus }))
    }

    async fn get_totalprice(&self, order_id: i32) -> Result<Option<f64>, StorageError> {
        let total = sqlx::query_scalar("SELECT totalprice::float8 FROM orders WHERE orderid = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(total)
    }
}
