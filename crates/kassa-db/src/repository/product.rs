//! # Product Repository
//!
//! Database operations for products, inventory, and purchase cost.
//!
//! ## Implicit Creation
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                  How get_or_create Stays Race-Safe                   │
//! │                                                                      │
//! │  Two callers record the first sale of "Widget" at the same time:     │
//! │                                                                      │
//! │  Caller A ──► INSERT .. ON CONFLICT(name) DO NOTHING  ← row created  │
//! │  Caller B ──► INSERT .. ON CONFLICT(name) DO NOTHING  ← no-op        │
//! │  Both    ──► SELECT id FROM products WHERE name = ?   ← same id      │
//! │                                                                      │
//! │  The UNIQUE constraint on products.name does the arbitration, so     │
//! │  correctness holds across processes - no in-memory lock involved.    │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use kassa_core::StockLevel;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Looks a product up by trimmed name, creating it (with a
    /// zero-quantity inventory row) when absent.
    ///
    /// Idempotent under concurrent calls for the same name: at most one
    /// product row ever exists per distinct trimmed name.
    pub async fn get_or_create(&self, name: &str) -> DbResult<i64> {
        let mut tx = self.pool.begin().await?;
        let id = get_or_create_in_tx(&mut tx, name).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Sets the purchase (cost) price for a product, creating the product
    /// first if it was never referenced.
    ///
    /// Positivity of `price` is the caller's responsibility; the store
    /// applies whatever it is handed.
    pub async fn set_purchase_price(&self, name: &str, price: f64) -> DbResult<()> {
        debug!(product = %name.trim(), price, "Setting purchase price");

        let mut tx = self.pool.begin().await?;
        let id = get_or_create_in_tx(&mut tx, name).await?;

        sqlx::query("UPDATE products SET purchase_price = ?1 WHERE id = ?2")
            .bind(price)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Adds `qty` units to a product's inventory, creating the product
    /// first if it was never referenced.
    pub async fn add_stock(&self, name: &str, qty: i64) -> DbResult<()> {
        debug!(product = %name.trim(), qty, "Adding stock");

        let mut tx = self.pool.begin().await?;
        let id = get_or_create_in_tx(&mut tx, name).await?;

        sqlx::query("UPDATE inventory SET quantity = quantity + ?1 WHERE product_id = ?2")
            .bind(qty)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets quantity on hand and purchase price for a product.
    ///
    /// ## Returns
    /// * `Ok(Some(StockLevel))` - product exists
    /// * `Ok(None)` - product was never referenced (explicit not-found,
    ///   never a defaulted zero)
    pub async fn get_stock(&self, name: &str) -> DbResult<Option<StockLevel>> {
        let row: Option<(i64, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT inv.quantity, prod.purchase_price
            FROM products prod
            JOIN inventory inv ON inv.product_id = prod.id
            WHERE prod.name = ?1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(quantity, purchase_price)| StockLevel {
            quantity,
            purchase_price,
        }))
    }

    /// Counts products (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Resolves-or-creates a product inside an existing transaction.
///
/// Used by every mutating operation so that product creation commits (or
/// rolls back) together with the operation that triggered it.
pub(crate) async fn get_or_create_in_tx(tx: &mut SqliteConnection, name: &str) -> DbResult<i64> {
    let name = name.trim();

    sqlx::query("INSERT INTO products (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(&mut *tx)
        .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM products WHERE name = ?1")
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO inventory (product_id, quantity) VALUES (?1, 0) ON CONFLICT(product_id) DO NOTHING")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    Ok(id)
}
