//! # kassa-db: Ledger Store for Kassa
//!
//! This crate owns all persistent state for the Kassa ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Kassa Data Flow                              │
//! │                                                                      │
//! │  Chat transport (external)                                           │
//! │       │ sale notices, admin commands, daily timer                    │
//! │       ▼                                                              │
//! │  ┌──────────────────────────────────────────────────────────────┐    │
//! │  │                    kassa-db (THIS CRATE)                     │    │
//! │  │                                                              │    │
//! │  │  ┌────────────┐  ┌──────────────┐  ┌────────────────────┐    │    │
//! │  │  │  Database  │  │ Repositories │  │ workflow/reporting │    │    │
//! │  │  │ (pool.rs)  │  │  product     │  │ process notice,    │    │    │
//! │  │  │ SqlitePool │◄─│  sale        │  │ run daily report,  │    │    │
//! │  │  │ Migrations │  │  report      │  │ AlertSink boundary │    │    │
//! │  │  └────────────┘  └──────────────┘  └────────────────────┘    │    │
//! │  └──────────────────────────────────────────────────────────────┘    │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  SQLite database (four tables: products, inventory, sales,           │
//! │  daily_reports - see migrations/sqlite/)                             │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Ledger store error types
//! - [`repository`] - Repository implementations (product, sale, report)
//! - [`reporting`] - Daily report aggregation
//! - [`workflow`] - Notice processing and the alerting boundary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kassa_db::{Database, DbConfig};
//! use kassa_db::workflow::{process_sale_notice, NullAlertSink};
//!
//! let db = Database::new(DbConfig::new("path/to/kassa.db")).await?;
//!
//! let outcome = process_sale_notice(&db, &NullAlertSink, "MacBook - 150000 - наличные x2").await?;
//! let stock = db.products().get_stock("MacBook").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod reporting;
pub mod repository;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use reporting::run_daily_report;
pub use workflow::{process_sale_notice, AlertSink, NullAlertSink, SaleOutcome, WorkflowError};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
