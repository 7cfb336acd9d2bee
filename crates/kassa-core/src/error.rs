//! # Error Types
//!
//! The parse-error taxonomy for sale notices.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                 │
//! │                                                                      │
//! │  kassa-core errors (this file)                                       │
//! │  └── ParseError       - malformed sale notices                       │
//! │                                                                      │
//! │  kassa-db errors (separate crate)                                    │
//! │  ├── DbError          - storage operation failures                   │
//! │  └── WorkflowError    - ParseError + raw text, or DbError            │
//! │                                                                      │
//! │  Flow: ParseError → WorkflowError → operator-visible channel         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (offending segment, accepted set)
//! 3. Errors are enum variants, never String
//! 4. Every variant maps to a message an operator can act on

use thiserror::Error;

use crate::types::PaymentMethod;

/// A sale notice that could not be turned into a [`crate::SaleIntent`].
///
/// Each variant is one category the caller must handle explicitly; a
/// malformed notice never panics and never partially applies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The notice does not split into three segments, or the product
    /// segment is empty after trimming.
    #[error("bad notice format, expected: <товар> - <цена> - <тип оплаты> [xN]")]
    Format,

    /// The price segment is not a number.
    #[error("price '{segment}' is not a number")]
    Price { segment: String },

    /// The payment segment (after stripping any multiplier) is not in the
    /// accepted set.
    #[error("unknown payment type '{given}', expected one of: {}", PaymentMethod::ACCEPTED.join(", "))]
    Payment { given: String },

    /// The multiplier is present but not a positive integer.
    #[error("quantity '{given}' must be a positive integer")]
    Quantity { given: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Unit Tests
// =============================================================================
