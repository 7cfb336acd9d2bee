//! # kassa-core: Pure Business Logic for Kassa
//!
//! This crate is the **heart** of Kassa. It contains the sale-notice parser
//! and the domain types as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Kassa Data Flow                              │
//! │                                                                      │
//! │  Chat transport (external)                                           │
//! │       │ one line of free text: "MacBook - 150000 - наличные x2"      │
//! │       ▼                                                              │
//! │  ┌──────────────────────────────────────────────────────────────┐    │
//! │  │                ★ kassa-core (THIS CRATE) ★                   │    │
//! │  │                                                              │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐               │    │
//! │  │   │  parser   │  │   types   │  │  render   │               │    │
//! │  │   │SaleIntent │  │ Payment   │  │ stock /   │               │    │
//! │  │   │ParseError │  │ Totals    │  │ report    │               │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘               │    │
//! │  │                                                              │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │    │
//! │  └──────────────────────────────────────────────────────────────┘    │
//! │       │ validated SaleIntent                                         │
//! │       ▼                                                              │
//! │  kassa-db (Ledger store: SQLite repositories, reporting)             │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PaymentMethod, SaleIntent, DailyTotals, ...)
//! - [`parser`] - Sale-notice parser (`"<product> - <price> - <payment> [xN]"`)
//! - [`error`] - Parse-error taxonomy
//! - [`render`] - Plain-text summaries for the chat transport
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: parsing is deterministic - same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: all failures are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kassa_core::{parse_notice, PaymentMethod};
//!
//! let intent = parse_notice("MacBook - 150000 - наличные x2").unwrap();
//! assert_eq!(intent.product, "MacBook");
//! assert_eq!(intent.unit_price, 150000.0);
//! assert_eq!(intent.payment, PaymentMethod::Cash);
//! assert_eq!(intent.quantity, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod parser;
pub mod render;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kassa_core::SaleIntent` instead of
// `use kassa_core::types::SaleIntent`

pub use error::{ParseError, ParseResult};
pub use parser::parse_notice;
pub use types::*;
