//! # Plain-Text Rendering
//!
//! Human-readable summaries returned to the chat transport for display.
//!
//! These strings are presentation only: the programmatic contract is the
//! typed values they are rendered from, and the wording here may be
//! reformatted freely without breaking any caller.

use chrono::NaiveDate;

use crate::types::{DailyTotals, PaymentMethod, SaleIntent, SaleRecord, StockLevel};

/// Stock summary for one product, e.g. a reply to a stock query.
///
/// `None` means the product was never referenced by the ledger.
pub fn stock_summary(product: &str, stock: Option<&StockLevel>) -> String {
    match stock {
        Some(stock) => {
            let purchase = match stock.purchase_price {
                Some(price) => format!("{price:.2}"),
                None => "не установлена".to_string(),
            };
            format!(
                "Остаток '{product}': {} шт.; закупочная = {purchase}",
                stock.quantity
            )
        }
        None => format!("Товар '{product}' не найден."),
    }
}

/// Daily report summary: one line per payment method plus the grand total.
pub fn report_summary(date: NaiveDate, totals: &DailyTotals) -> String {
    let mut out = format!("Отчёт за {date}:\n");
    for method in PaymentMethod::ALL {
        out.push_str(&format!("  {method}: {:.2}\n", totals.get(method)));
    }
    out.push_str(&format!("  итого: {:.2}", totals.grand_total()));
    out
}

/// Confirmation line for one recorded sale.
pub fn sale_confirmation(intent: &SaleIntent) -> String {
    format!(
        "Продано: {} - {:.2} - {} x{}",
        intent.product, intent.unit_price, intent.payment, intent.quantity
    )
}

/// Recent-sales history, most recent first, one line per unit-sale fact.
pub fn sales_history(records: &[SaleRecord]) -> String {
    if records.is_empty() {
        return "Продаж пока нет.".to_string();
    }
    records
        .iter()
        .map(|r| {
            format!(
                "{} | {} - {:.2} - {}",
                r.created_at.format("%Y-%m-%d %H:%M:%S"),
                r.product,
                r.price,
                r.payment
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
