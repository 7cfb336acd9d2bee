//! # Sale-Notice Parser
//!
//! Turns one line of free text into a structured [`SaleIntent`].
//!
//! ## Notice Grammar
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │               <product> - <price> - <payment> [xN]                   │
//! │                                                                      │
//! │  "iPhone 15 - 120000 - карта"                                        │
//! │       │          │        │                                          │
//! │       │          │        └── payment token, one of the fixed set    │
//! │       │          └── decimal, comma accepted, optional trailing ₽    │
//! │       └── trimmed product name                                       │
//! │                                                                      │
//! │  "MacBook - 150000 - наличные x2"                                    │
//! │                               │                                      │
//! │                               └── optional multiplier: quantity 2    │
//! │                                   (Latin "x" or Cyrillic "х")        │
//! │                                                                      │
//! │  Splitting uses at most two '-' splits; price and payment segments   │
//! │  may therefore never contain a '-' themselves.                       │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing is pure and deterministic: no side effects, safe to call
//! repeatedly on the same input.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ParseError, ParseResult};
use crate::types::{PaymentMethod, SaleIntent};

/// Trailing multiplier token: "x2", "х 3" (Cyrillic х), case-insensitive,
/// anchored to the end of the payment segment.
fn multiplier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[xх]\s*(\d+)$").expect("multiplier regex is valid"))
}

/// Parses a sale notice of the form `<product> - <price> - <payment> [xN]`.
///
/// ## Errors
/// - [`ParseError::Format`] - wrong segment count or empty product
/// - [`ParseError::Price`] - price segment is not a number
/// - [`ParseError::Payment`] - payment token not in the accepted set
/// - [`ParseError::Quantity`] - multiplier is zero or overflows
///
/// ## Example
/// ```rust
/// use kassa_core::{parse_notice, PaymentMethod};
///
/// let intent = parse_notice("AirPods - 12000,50₽ - карта х3").unwrap();
/// assert_eq!(intent.product, "AirPods");
/// assert_eq!(intent.unit_price, 12000.50);
/// assert_eq!(intent.payment, PaymentMethod::Terminal);
/// assert_eq!(intent.quantity, 3);
/// ```
pub fn parse_notice(text: &str) -> ParseResult<SaleIntent> {
    let parts: Vec<&str> = text.splitn(3, '-').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ParseError::Format);
    }
    let (product, price_segment, payment_segment) = (parts[0], parts[1], parts[2]);

    if product.is_empty() {
        return Err(ParseError::Format);
    }

    // A '-' surviving in the payment segment means the notice had more than
    // three segments ("A - B - C - D"): a format problem, not a payment one.
    if payment_segment.contains('-') {
        return Err(ParseError::Format);
    }

    let unit_price = parse_price(price_segment)?;
    let (payment_token, quantity) = split_multiplier(payment_segment)?;

    let payment = payment_token
        .parse::<PaymentMethod>()
        .map_err(|()| ParseError::Payment {
            given: payment_token.to_lowercase(),
        })?;

    Ok(SaleIntent {
        product: product.to_string(),
        unit_price,
        payment,
        quantity,
    })
}

/// Parses the price segment: comma as decimal separator, optional Rouble
/// sign, surrounding whitespace ignored. Anything else, including interior
/// spaces, rejects the segment - a mistyped price must never be silently
/// accepted at a wrong value.
fn parse_price(segment: &str) -> ParseResult<f64> {
    let normalized = segment.replace(',', ".").replace('₽', "");

    normalized
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::Price {
            segment: segment.to_string(),
        })
}

/// Splits an optional trailing multiplier off the payment segment.
///
/// Returns the remaining payment token and the quantity (1 when absent).
fn split_multiplier(segment: &str) -> ParseResult<(&str, u32)> {
    let Some(caps) = multiplier_re().captures(segment) else {
        return Ok((segment, 1));
    };

    let digits = &caps[1];
    let quantity = digits.parse::<u32>().unwrap_or(0);
    if quantity == 0 {
        return Err(ParseError::Quantity {
            given: digits.to_string(),
        });
    }

    let token = segment[..caps.get(0).expect("capture 0 always present").start()].trim_end();
    Ok((token, quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_notice() {
        let intent = parse_notice("iPhone 15 - 120000 - карта").unwrap();
        assert_eq!(intent.product, "iPhone 15");
        assert_eq!(intent.unit_price, 120000.0);
        assert_eq!(intent.payment, PaymentMethod::Terminal);
        assert_eq!(intent.quantity, 1);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        for notice in ["Чехол - 500 - нал", "Кабель - 300 - перевод", "SSD - 4500 - терминал"] {
            let intent = parse_notice(notice).unwrap();
            assert_eq!(intent.quantity, 1, "notice: {notice}");
        }
    }

    #[test]
    fn test_latin_multiplier() {
        let intent = parse_notice("MacBook - 150000 - наличные x2").unwrap();
        assert_eq!(intent.product, "MacBook");
        assert_eq!(intent.unit_price, 150000.0);
        assert_eq!(intent.payment, PaymentMethod::Cash);
        assert_eq!(intent.quantity, 2);
    }

    #[test]
    fn test_cyrillic_multiplier() {
        let intent = parse_notice("AirPods - 12000 - карта х3").unwrap();
        assert_eq!(intent.payment, PaymentMethod::Terminal);
        assert_eq!(intent.quantity, 3);
    }

    #[test]
    fn test_multiplier_case_insensitive_with_space() {
        let intent = parse_notice("Мышь - 900 - нал X 4").unwrap();
        assert_eq!(intent.payment, PaymentMethod::Cash);
        assert_eq!(intent.quantity, 4);
    }

    #[test]
    fn test_comma_decimal_and_rouble_sign() {
        let intent = parse_notice("Кофе - 249,90₽ - нал").unwrap();
        assert_eq!(intent.unit_price, 249.90);
    }

    #[test]
    fn test_too_few_segments() {
        assert_eq!(parse_notice("A-B"), Err(ParseError::Format));
        assert_eq!(parse_notice("просто текст"), Err(ParseError::Format));
    }

    #[test]
    fn test_too_many_segments() {
        assert_eq!(parse_notice("A-B-C-D"), Err(ParseError::Format));
    }

    #[test]
    fn test_empty_product_rejected() {
        assert_eq!(parse_notice(" - 100 - нал"), Err(ParseError::Format));
    }

    #[test]
    fn test_unknown_payment_type() {
        let err = parse_notice("Phone - 100 - крипта").unwrap_err();
        assert_eq!(
            err,
            ParseError::Payment {
                given: "крипта".to_string()
            }
        );
        assert!(err.to_string().contains("терминал"));
    }

    #[test]
    fn test_interior_space_in_price_rejected() {
        // "1 0" must not be read as 10 - the whole segment is the number.
        let err = parse_notice("Phone - 1 0 - нал").unwrap_err();
        assert_eq!(
            err,
            ParseError::Price {
                segment: "1 0".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_price() {
        let err = parse_notice("Phone - abc - нал").unwrap_err();
        assert_eq!(
            err,
            ParseError::Price {
                segment: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = parse_notice("Phone - 100 - нал x0").unwrap_err();
        assert_eq!(
            err,
            ParseError::Quantity {
                given: "0".to_string()
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let a = parse_notice("MacBook - 150000 - наличные x2").unwrap();
        let b = parse_notice("MacBook - 150000 - наличные x2").unwrap();
        assert_eq!(a, b);
    }
}
