//! # Domain Types
//!
//! Core domain types used throughout Kassa.
//!
//! ## Type Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                                │
//! │                                                                      │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐     │
//! │  │   SaleIntent    │   │   SaleRecord    │   │   StockLevel    │     │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │     │
//! │  │  product        │   │  product        │   │  quantity       │     │
//! │  │  unit_price     │   │  price          │   │  purchase_price │     │
//! │  │  payment        │   │  payment        │   └─────────────────┘     │
//! │  │  quantity       │   │  created_at     │                           │
//! │  └─────────────────┘   └─────────────────┘                           │
//! │                                                                      │
//! │  ┌─────────────────┐   ┌─────────────────┐                           │
//! │  │ PaymentMethod   │   │  DailyTotals    │                           │
//! │  │  ─────────────  │   │  ─────────────  │                           │
//! │  │  Cash "нал"     │   │  cash: f64      │                           │
//! │  │  Transfer       │   │  transfer: f64  │                           │
//! │  │  Terminal       │   │  terminal: f64  │                           │
//! │  └─────────────────┘   └─────────────────┘                           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `SaleIntent` is what the parser produces; `SaleRecord` is what the store
//! reads back. The intent has a quantity, the record does not: a sale of
//! quantity N is persisted as N individual unit-sale facts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Payment Method
// =============================================================================

/// The fixed set of accepted payment methods.
///
/// Canonical storage tokens are the Russian words the cashiers type:
/// `нал` (cash), `перевод` (bank transfer), `терминал` (card terminal).
/// Parsing also accepts the spoken-form aliases `наличные` and `карта`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment (`нал`, `наличные`).
    Cash,
    /// Bank transfer (`перевод`).
    Transfer,
    /// Card payment on the terminal (`терминал`, `карта`).
    Terminal,
}

impl PaymentMethod {
    /// Every payment method, in report-column order.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Terminal,
    ];

    /// Canonical token, used both for storage and for display.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "нал",
            PaymentMethod::Transfer => "перевод",
            PaymentMethod::Terminal => "терминал",
        }
    }

    /// Accepted input tokens, for error messages.
    pub const ACCEPTED: [&'static str; 5] = ["нал", "наличные", "перевод", "терминал", "карта"];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    /// Resolves a trimmed, lower-cased token to a payment method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "нал" | "наличные" => Ok(PaymentMethod::Cash),
            "перевод" => Ok(PaymentMethod::Transfer),
            "терминал" | "карта" => Ok(PaymentMethod::Terminal),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Sale Intent
// =============================================================================

/// A validated sale notice, ready to be applied to the ledger.
///
/// Produced by [`crate::parse_notice`]; consumed by the store's
/// `record_sale`, which expands `quantity` into individual unit-sale facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleIntent {
    /// Trimmed product name.
    pub product: String,
    /// Per-unit sale price.
    pub unit_price: f64,
    /// How the customer paid.
    pub payment: PaymentMethod,
    /// Number of units sold. Always >= 1.
    pub quantity: u32,
}

// =============================================================================
// Stock Level
// =============================================================================

/// Quantity on hand and cost basis for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Units on hand. May be negative: oversell is not rejected.
    pub quantity: i64,
    /// Per-unit purchase cost. Absent until explicitly set by an operator.
    pub purchase_price: Option<f64>,
}

impl StockLevel {
    /// True when the operator still has to set the purchase price.
    pub const fn purchase_price_missing(&self) -> bool {
        self.purchase_price.is_none()
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One persisted unit-sale fact, as read back from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub product: String,
    pub price: f64,
    pub payment: PaymentMethod,
    pub created_at: NaiveDateTime,
}

// =============================================================================
// Daily Totals
// =============================================================================

/// Per-payment-method revenue totals for one calendar date.
///
/// Every method is always present (zero when no sales occurred), so report
/// consumers never have to handle an absent bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyTotals {
    pub cash: f64,
    pub transfer: f64,
    pub terminal: f64,
}

impl DailyTotals {
    /// Returns the total for one payment method.
    pub const fn get(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Transfer => self.transfer,
            PaymentMethod::Terminal => self.terminal,
        }
    }

    /// Adds an amount to one payment method's bucket.
    pub fn add(&mut self, method: PaymentMethod, amount: f64) {
        match method {
            PaymentMethod::Cash => self.cash += amount,
            PaymentMethod::Transfer => self.transfer += amount,
            PaymentMethod::Terminal => self.terminal += amount,
        }
    }

    /// Revenue across all payment methods.
    pub fn grand_total(&self) -> f64 {
        self.cash + self.transfer + self.terminal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
