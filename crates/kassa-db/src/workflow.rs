//! # Accounting Workflow
//!
//! The glue between the notice parser, the ledger store, and the alerting
//! collaborator.
//!
//! ## Control Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                  process_sale_notice(db, sink, text)                 │
//! │                                                                      │
//! │  raw text ──► parse_notice ──► SaleIntent                            │
//! │                   │                │                                 │
//! │                   │ ParseError     ▼                                 │
//! │                   │            record_sale (atomic)                  │
//! │                   │                │                                 │
//! │                   ▼                ▼                                 │
//! │   WorkflowError::Notice        get_stock                             │
//! │   (raw text attached,              │                                 │
//! │    caller routes it to an          ├── purchase price set? done      │
//! │    operator channel)               │                                 │
//! │                                    └── unset? sink.alert(...)        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The alert delivery mechanism (an admin chat in the reference deployment)
//! stays behind the [`AlertSink`] trait; this crate never sends anything
//! itself.

use thiserror::Error;
use tracing::{info, warn};

use crate::error::DbError;
use crate::pool::Database;
use kassa_core::{parse_notice, ParseError, SaleIntent};

// =============================================================================
// Alerting Boundary
// =============================================================================

/// Collaborator interface for surfacing operator-facing conditions.
///
/// Implementations deliver the message out-of-band (chat message, log
/// line, ...). The trait is synchronous and infallible from the workflow's
/// point of view: delivery problems are the collaborator's concern and must
/// never roll back a recorded sale.
pub trait AlertSink {
    fn alert(&self, message: &str);
}

/// Sink that drops every alert. Useful for tests and batch imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlertSink;

impl AlertSink for NullAlertSink {
    fn alert(&self, _message: &str) {}
}

// =============================================================================
// Workflow Errors
// =============================================================================

/// Failure while applying one sale notice.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The notice could not be parsed. The offending raw text stays
    /// attached so the operator channel can show it verbatim.
    #[error("could not process notice '{text}': {source}")]
    Notice {
        text: String,
        #[source]
        source: ParseError,
    },

    /// The ledger store rejected or failed the operation.
    #[error(transparent)]
    Storage(#[from] DbError),
}

// =============================================================================
// Workflow
// =============================================================================

/// The result of successfully applying one sale notice.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleOutcome {
    /// The parsed intent that was recorded.
    pub intent: SaleIntent,
    /// True when the product still has no purchase price set; an alert was
    /// sent to the sink in that case.
    pub purchase_price_missing: bool,
}

/// Parses a raw sale notice, records it atomically, and runs the
/// purchase-price post-condition check.
///
/// A malformed notice is returned as [`WorkflowError::Notice`] without
/// touching the store; a store failure leaves neither sale facts nor an
/// inventory change behind.
pub async fn process_sale_notice(
    db: &Database,
    sink: &dyn AlertSink,
    text: &str,
) -> Result<SaleOutcome, WorkflowError> {
    let intent = parse_notice(text).map_err(|source| WorkflowError::Notice {
        text: text.to_string(),
        source,
    })?;

    db.sales()
        .record_sale(
            &intent.product,
            intent.unit_price,
            intent.payment,
            intent.quantity,
        )
        .await?;

    info!(product = %intent.product, qty = intent.quantity, "Sale recorded");

    let stock = db.products().get_stock(&intent.product).await?;
    let purchase_price_missing = stock.map_or(true, |s| s.purchase_price_missing());

    if purchase_price_missing {
        warn!(product = %intent.product, "Purchase price not set");
        sink.alert(&format!(
            "Для товара '{}' не задана закупочная цена. Установите её командой установки цены.",
            intent.product
        ));
    }

    Ok(SaleOutcome {
        intent,
        purchase_price_missing,
    })
}
