//! # Sale Repository
//!
//! Database operations for unit-sale facts.
//!
//! ## Unit-Fact Model
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                  One Row Per Unit Sold                               │
//! │                                                                      │
//! │  Notice: "MacBook - 150000 - наличные x2"                            │
//! │       │                                                              │
//! │       ▼ record_sale("MacBook", 150000.0, Cash, 2)                    │
//! │  ┌──────────────────────────────────────────────┐                    │
//! │  │ BEGIN                                        │                    │
//! │  │   get-or-create product "MacBook"            │                    │
//! │  │   INSERT sales(…, 150000, 'нал')  ← unit 1   │                    │
//! │  │   INSERT sales(…, 150000, 'нал')  ← unit 2   │                    │
//! │  │   UPDATE inventory SET qty = qty - 2         │                    │
//! │  │ COMMIT                            ← all-or-nothing                │
//! │  └──────────────────────────────────────────────┘                    │
//! │                                                                      │
//! │  Aggregation is then a plain SUM over rows - no quantity column to   │
//! │  multiply through, at the cost of storage density.                   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::product::get_or_create_in_tx;
use kassa_core::{DailyTotals, PaymentMethod, SaleRecord};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale of `qty` units, each sold at `unit_price`.
    ///
    /// One transaction: product resolution, the `qty` sale-fact inserts and
    /// the inventory decrement commit together or not at all. Inventory may
    /// go negative - oversell is deliberately not rejected here.
    pub async fn record_sale(
        &self,
        name: &str,
        unit_price: f64,
        payment: PaymentMethod,
        qty: u32,
    ) -> DbResult<()> {
        debug!(product = %name.trim(), unit_price, %payment, qty, "Recording sale");

        let mut tx = self.pool.begin().await?;
        let product_id = get_or_create_in_tx(&mut tx, name).await?;

        for _ in 0..qty {
            sqlx::query("INSERT INTO sales (product_id, sale_price, payment_type) VALUES (?1, ?2, ?3)")
                .bind(product_id)
                .bind(unit_price)
                .bind(payment.as_str())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE inventory SET quantity = quantity - ?1 WHERE product_id = ?2")
            .bind(qty as i64)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Returns the last `limit` unit-sale facts, most recent first.
    pub async fn get_recent(&self, limit: u32) -> DbResult<Vec<SaleRecord>> {
        let rows: Vec<(String, f64, String, NaiveDateTime)> = sqlx::query_as(
            r#"
            SELECT prod.name, s.sale_price, s.payment_type, s.created_at
            FROM sales s
            JOIN products prod ON prod.id = s.product_id
            ORDER BY s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    /// Returns all unit-sale facts for a calendar date, chronological.
    pub async fn get_by_date(&self, date: NaiveDate) -> DbResult<Vec<SaleRecord>> {
        let rows: Vec<(String, f64, String, NaiveDateTime)> = sqlx::query_as(
            r#"
            SELECT prod.name, s.sale_price, s.payment_type, s.created_at
            FROM sales s
            JOIN products prod ON prod.id = s.product_id
            WHERE date(s.created_at) = date(?1)
            ORDER BY s.created_at, s.id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    /// Sums sale prices per payment method for a calendar date.
    ///
    /// Every enumerated method is present in the result, zero when no
    /// sales occurred. Unknown payment tokens already in storage are
    /// skipped rather than failing the whole report.
    pub async fn totals_for_date(&self, date: NaiveDate) -> DbResult<DailyTotals> {
        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT payment_type, SUM(sale_price)
            FROM sales
            WHERE date(created_at) = date(?1)
            GROUP BY payment_type
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut totals = DailyTotals::default();
        for (token, sum) in rows {
            if let Ok(method) = token.parse::<PaymentMethod>() {
                totals.add(method, sum.unwrap_or(0.0));
            }
        }

        Ok(totals)
    }
}

/// Maps a raw sales row into a [`SaleRecord`], rejecting tokens the
/// enumerated payment set does not contain.
fn row_to_record(row: (String, f64, String, NaiveDateTime)) -> DbResult<SaleRecord> {
    let (product, price, token, created_at) = row;
    let payment = token
        .parse::<PaymentMethod>()
        .map_err(|()| DbError::CorruptRow(format!("unknown payment token '{token}'")))?;

    Ok(SaleRecord {
        product,
        price,
        payment,
        created_at,
    })
}
