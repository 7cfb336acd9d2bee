//! # Repository Module
//!
//! Repository implementations for ledger access.
//!
//! ## Repository Pattern
//! Each repository owns a clone of the connection pool and encapsulates the
//! SQL for one slice of the ledger:
//!
//! - [`product::ProductRepository`] - products, inventory, purchase cost
//! - [`sale::SaleRepository`] - unit-sale facts and date-bucketed reads
//! - [`report::ReportRepository`] - daily report upserts
//!
//! Mutating operations run as single transactions: a failure partway leaves
//! no observable partial state.

pub mod product;
pub mod report;
pub mod sale;
