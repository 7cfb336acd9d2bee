//! Integration tests for the Kassa ledger store.
//!
//! Every test runs against an isolated in-memory SQLite database, exercising
//! the full stack: migrations, repositories, reporting, and the accounting
//! workflow.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use kassa_core::{DailyTotals, PaymentMethod};
use kassa_db::workflow::{process_sale_notice, AlertSink, NullAlertSink};
use kassa_db::{run_daily_report, Database, DbConfig, WorkflowError};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

fn today() -> NaiveDate {
    // created_at is assigned by SQLite's CURRENT_TIMESTAMP, which is UTC.
    Utc::now().date_naive()
}

/// Alert sink that records every message for later assertions.
#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl AlertSink for RecordingSink {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// =============================================================================
// Products and inventory
// =============================================================================

#[tokio::test]
async fn get_or_create_is_idempotent_and_trims() {
    let db = test_db().await;
    let products = db.products();

    let a = products.get_or_create("Widget").await.unwrap();
    let b = products.get_or_create("  Widget  ").await.unwrap();

    assert_eq!(a, b);
    assert_eq!(products.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_get_or_create_yields_one_product() {
    // An in-memory database is pinned to a single connection, which would
    // serialize the calls and hide a racy SELECT-then-INSERT. A file-backed
    // pool with several connections lets the creations actually collide on
    // the UNIQUE constraint.
    let path = std::env::temp_dir().join(format!(
        "kassa-race-{}-{}.db",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let db = Database::new(DbConfig::new(&path).max_connections(8))
        .await
        .expect("file-backed database");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.products().get_or_create("Widget").await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }

    assert!(ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(db.products().count().await.unwrap(), 1);

    db.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

#[tokio::test]
async fn new_product_starts_with_zero_stock_and_no_price() {
    let db = test_db().await;
    db.products().get_or_create("Кабель").await.unwrap();

    let stock = db.products().get_stock("Кабель").await.unwrap().unwrap();
    assert_eq!(stock.quantity, 0);
    assert_eq!(stock.purchase_price, None);
}

#[tokio::test]
async fn unknown_product_reads_as_not_found() {
    let db = test_db().await;
    assert!(db.products().get_stock("Призрак").await.unwrap().is_none());
}

#[tokio::test]
async fn add_stock_and_set_price_create_implicitly() {
    let db = test_db().await;
    let products = db.products();

    products.add_stock("SSD", 10).await.unwrap();
    products.set_purchase_price("SSD", 3200.0).await.unwrap();

    let stock = products.get_stock("SSD").await.unwrap().unwrap();
    assert_eq!(stock.quantity, 10);
    assert_eq!(stock.purchase_price, Some(3200.0));
    assert_eq!(products.count().await.unwrap(), 1);
}

// =============================================================================
// Sales
// =============================================================================

#[tokio::test]
async fn record_sale_round_trip() {
    let db = test_db().await;
    db.products().add_stock("Чехол", 5).await.unwrap();

    db.sales()
        .record_sale("Чехол", 100.0, PaymentMethod::Cash, 3)
        .await
        .unwrap();

    // Inventory decreased by exactly the sold quantity.
    let stock = db.products().get_stock("Чехол").await.unwrap().unwrap();
    assert_eq!(stock.quantity, 2);

    // Three individual unit-sale facts, newest first.
    let recent = db.sales().get_recent(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    for record in &recent {
        assert_eq!(record.product, "Чехол");
        assert_eq!(record.price, 100.0);
        assert_eq!(record.payment, PaymentMethod::Cash);
    }
}

#[tokio::test]
async fn oversell_drives_inventory_negative() {
    let db = test_db().await;

    // No stock was ever added; the sale must still go through.
    db.sales()
        .record_sale("Монитор", 15000.0, PaymentMethod::Terminal, 2)
        .await
        .unwrap();

    let stock = db.products().get_stock("Монитор").await.unwrap().unwrap();
    assert_eq!(stock.quantity, -2);
}

#[tokio::test]
async fn recent_sales_are_most_recent_first_and_limited() {
    let db = test_db().await;
    let sales = db.sales();

    sales
        .record_sale("A", 1.0, PaymentMethod::Cash, 1)
        .await
        .unwrap();
    sales
        .record_sale("B", 2.0, PaymentMethod::Transfer, 1)
        .await
        .unwrap();
    sales
        .record_sale("C", 3.0, PaymentMethod::Terminal, 1)
        .await
        .unwrap();

    let recent = sales.get_recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].product, "C");
    assert_eq!(recent[1].product, "B");
}

#[tokio::test]
async fn sales_by_date_sees_todays_facts_only() {
    let db = test_db().await;

    db.sales()
        .record_sale("Кофе", 250.0, PaymentMethod::Cash, 2)
        .await
        .unwrap();

    let todays = db.sales().get_by_date(today()).await.unwrap();
    assert_eq!(todays.len(), 2);

    let other_day = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    assert!(db.sales().get_by_date(other_day).await.unwrap().is_empty());
}

// =============================================================================
// Totals and daily reports
// =============================================================================

#[tokio::test]
async fn totals_for_empty_date_are_zero_filled() {
    let db = test_db().await;

    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let totals = db.sales().totals_for_date(date).await.unwrap();

    for method in PaymentMethod::ALL {
        assert_eq!(totals.get(method), 0.0);
    }
}

#[tokio::test]
async fn totals_bucket_by_payment_method() {
    let db = test_db().await;
    let sales = db.sales();

    sales
        .record_sale("A", 100.0, PaymentMethod::Cash, 2)
        .await
        .unwrap();
    sales
        .record_sale("B", 50.0, PaymentMethod::Terminal, 1)
        .await
        .unwrap();

    let totals = sales.totals_for_date(today()).await.unwrap();
    assert_eq!(totals.cash, 200.0);
    assert_eq!(totals.transfer, 0.0);
    assert_eq!(totals.terminal, 50.0);
    assert_eq!(totals.grand_total(), 250.0);
}

#[tokio::test]
async fn run_daily_report_is_idempotent() {
    let db = test_db().await;
    db.sales()
        .record_sale("A", 100.0, PaymentMethod::Cash, 3)
        .await
        .unwrap();

    let first = run_daily_report(&db, today()).await.unwrap();
    let second = run_daily_report(&db, today()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        db.reports().get(today()).await.unwrap(),
        Some(DailyTotals {
            cash: 300.0,
            transfer: 0.0,
            terminal: 0.0,
        })
    );
}

#[tokio::test]
async fn rerunning_report_overwrites_instead_of_double_counting() {
    let db = test_db().await;

    db.sales()
        .record_sale("A", 100.0, PaymentMethod::Cash, 1)
        .await
        .unwrap();
    run_daily_report(&db, today()).await.unwrap();

    db.sales()
        .record_sale("B", 40.0, PaymentMethod::Transfer, 1)
        .await
        .unwrap();
    let totals = run_daily_report(&db, today()).await.unwrap();

    assert_eq!(totals.cash, 100.0);
    assert_eq!(totals.transfer, 40.0);
    assert_eq!(db.reports().get(today()).await.unwrap(), Some(totals));
}

#[tokio::test]
async fn report_for_unreported_date_is_absent() {
    let db = test_db().await;
    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    assert_eq!(db.reports().get(date).await.unwrap(), None);
}

// =============================================================================
// Accounting workflow
// =============================================================================

#[tokio::test]
async fn workflow_records_notice_and_alerts_on_missing_price() {
    let db = test_db().await;
    let sink = RecordingSink::default();

    let outcome = process_sale_notice(&db, &sink, "MacBook - 150000 - наличные x2")
        .await
        .unwrap();

    assert_eq!(outcome.intent.product, "MacBook");
    assert_eq!(outcome.intent.unit_price, 150000.0);
    assert_eq!(outcome.intent.payment, PaymentMethod::Cash);
    assert_eq!(outcome.intent.quantity, 2);
    assert!(outcome.purchase_price_missing);

    let messages = sink.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("MacBook"));

    // Two unit facts, inventory at -2.
    let stock = db.products().get_stock("MacBook").await.unwrap().unwrap();
    assert_eq!(stock.quantity, -2);
    assert_eq!(db.sales().get_recent(10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn workflow_stays_quiet_once_price_is_set() {
    let db = test_db().await;
    let sink = RecordingSink::default();

    db.products()
        .set_purchase_price("MacBook", 95000.0)
        .await
        .unwrap();

    let outcome = process_sale_notice(&db, &sink, "MacBook - 150000 - нал")
        .await
        .unwrap();

    assert!(!outcome.purchase_price_missing);
    assert!(sink.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn workflow_surfaces_parse_errors_with_raw_text() {
    let db = test_db().await;

    let err = process_sale_notice(&db, &NullAlertSink, "Phone - 100 - крипта")
        .await
        .unwrap_err();

    match err {
        WorkflowError::Notice { text, .. } => assert_eq!(text, "Phone - 100 - крипта"),
        other => panic!("expected a notice error, got: {other}"),
    }

    // A malformed notice never touches the store.
    assert_eq!(db.products().count().await.unwrap(), 0);
    assert!(db.sales().get_recent(1).await.unwrap().is_empty());
}
