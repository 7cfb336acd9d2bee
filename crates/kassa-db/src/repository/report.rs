//! # Report Repository
//!
//! Database operations for the per-date daily reports.
//!
//! The calendar date is the natural key: saving twice for the same date
//! overwrites the previous totals rather than double-counting them.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kassa_core::DailyTotals;

/// Repository for daily-report database operations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Upserts the totals for a date, overwriting any existing record.
    pub async fn save(&self, date: NaiveDate, totals: &DailyTotals) -> DbResult<()> {
        debug!(%date, grand_total = totals.grand_total(), "Saving daily report");

        sqlx::query(
            r#"
            INSERT INTO daily_reports (date, cash_total, transfer_total, terminal_total)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(date) DO UPDATE SET
                cash_total = excluded.cash_total,
                transfer_total = excluded.transfer_total,
                terminal_total = excluded.terminal_total
            "#,
        )
        .bind(date)
        .bind(totals.cash)
        .bind(totals.transfer)
        .bind(totals.terminal)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the stored totals for a date.
    ///
    /// ## Returns
    /// * `Ok(Some(DailyTotals))` - a report was saved for that date
    /// * `Ok(None)` - no report yet
    pub async fn get(&self, date: NaiveDate) -> DbResult<Option<DailyTotals>> {
        let row: Option<(f64, f64, f64)> = sqlx::query_as(
            "SELECT cash_total, transfer_total, terminal_total FROM daily_reports WHERE date = ?1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(cash, transfer, terminal)| DailyTotals {
            cash,
            transfer,
            terminal,
        }))
    }
}
