//! PostgreSQL schema migrations for the retail tables.

use sqlx::PgPool;

use crate::error::StorageError;

const RETAIL_SCHEMA: &[(&str, &str)] = &[
    (
        "customers",
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            customerid SERIAL PRIMARY KEY,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT NOT NULL,
            phonenumber TEXT,
            shippingaddress TEXT,
            creditcardnumber TEXT
        )
        "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE IF NOT EXISTS products (
            productid SERIAL PRIMARY KEY,
            productname TEXT NOT NULL,
            productbrand TEXT,
            gender TEXT,
            price NUMERIC(10, 2) NOT NULL,
            description TEXT,
            primarycolor TEXT,
            size TEXT
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            orderid SERIAL PRIMARY KEY,
            customerid INTEGER NOT NULL REFERENCES customers (customerid),
            productid INTEGER NOT NULL REFERENCES products (productid),
            orderdate TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            totalprice NUMERIC(12, 2) NOT NULL,
            orderstatus TEXT NOT NULL DEFAULT 'pending'
        )
        "#,
    ),
    (
        "package_damaged",
        r#"
        CREATE TABLE IF NOT EXISTS package_damaged (
            id SERIAL PRIMARY KEY,
            orderid INTEGER NOT NULL REFERENCES orders (orderid),
            damaged_package_img TEXT NOT NULL
        )
        "#,
    ),
    (
        "product_defect",
        r#"
        CREATE TABLE IF NOT EXISTS product_defect (
            id SERIAL PRIMARY KEY,
            orderid INTEGER NOT NULL REFERENCES orders (orderid),
            defect_product_img TEXT NOT NULL
        )
        "#,
    ),
];

const RETAIL_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders (customerid)",
    "CREATE INDEX IF NOT EXISTS idx_package_damaged_order ON package_damaged (orderid)",
    "CREATE INDEX IF NOT EXISTS idx_product_defect_order ON product_defect (orderid)",
];

/// Create the retail tables if they do not exist. Safe to run repeatedly.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    for (table, ddl) in RETAIL_SCHEMA {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(format!("{table}: {e}")))?;
    }
    for ddl in RETAIL_INDEXES {
        sqlx::query(ddl).execute(pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    tracing::info!(tables = RETAIL_SCHEMA.len(), "retail schema migrations applied");
    Ok(())
}
