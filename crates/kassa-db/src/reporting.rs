//! # Reporting Engine
//!
//! Aggregates a day's unit-sale facts into per-payment-method totals and
//! snapshots them into the daily report record.
//!
//! Invoked once per calendar day by an external scheduler; the engine only
//! exposes the pure operation, not the scheduling.

use chrono::NaiveDate;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use kassa_core::DailyTotals;

/// Computes and persists the daily report for `date`, returning the totals
/// for delivery to the notification collaborator.
///
/// Idempotent: recomputing for the same date overwrites the stored record,
/// so running twice with no new sales yields identical results and a
/// single report row.
pub async fn run_daily_report(db: &Database, date: NaiveDate) -> DbResult<DailyTotals> {
    let totals = db.sales().totals_for_date(date).await?;
    db.reports().save(date, &totals).await?;

    info!(%date, grand_total = totals.grand_total(), "Daily report saved");
    Ok(totals)
}
