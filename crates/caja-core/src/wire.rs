//! # Wire Module
//!
//! The JSON contract between Caja and its callers.
//!
//! ## Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Request (cart submission)                                          │
//! │    {"items": [{"producto_id": "...",                                │
//! │               "cantidad": 3,                                        │
//! │               "precio_unitario": "10.99"}]}                         │
//! │                                                                     │
//! │  Success (sale confirmation)                                        │
//! │    {"venta_id": "...", "total": "32.97",                            │
//! │     "cantidad_items": 1, "fecha": "2026-08-22T17:03:09+00:00"}      │
//! │                                                                     │
//! │  Failure                                                            │
//! │    {"error": "Insufficient stock for ...: available 3, requested 5"}│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are part of the contract and never change with refactors;
//! Rust-side names stay idiomatic through `#[serde(rename)]`.
//!
//! A payload that cannot be parsed into a cart AT ALL (wrong types, bad
//! decimals) is a [`MalformedRequest`]. A cart that parses but breaks
//! business rules is rejected later with the aggregated item errors. The
//! two never mix.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::cart::CartItem;
use crate::money::Money;
use crate::types::SaleReceipt;

// =============================================================================
// Malformed Request
// =============================================================================

/// The payload was not a cart: bad JSON, wrong types, unparseable amounts.
///
/// Strictly distinct from business validation. "cantidad": -3 parses fine
/// and is rejected as an invalid item; "cantidad": "three" lands here.
#[derive(Debug, Error)]
#[error("malformed request: {0}")]
pub struct MalformedRequest(pub String);

impl MalformedRequest {
    /// HTTP-style status code: always a client error.
    pub fn http_status(&self) -> u16 {
        400
    }
}

// =============================================================================
// Cart Submission (request)
// =============================================================================

/// A submitted cart, as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CartSubmission {
    pub items: Vec<CartItemRequest>,
}

impl CartSubmission {
    /// Converts the wire shape into domain cart items, preserving order.
    pub fn into_cart(self) -> Vec<CartItem> {
        self.items.into_iter().map(CartItem::from).collect()
    }
}

/// One cart line on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: String,

    #[serde(rename = "cantidad")]
    pub quantity: i64,

    /// Unit price, normalized to cents on the way in. Accepts a decimal
    /// string ("10.99"), an integer (whole currency units) or a JSON
    /// number with at most two decimal places.
    #[serde(rename = "precio_unitario", deserialize_with = "deserialize_amount")]
    pub unit_price: Money,
}

impl From<CartItemRequest> for CartItem {
    fn from(request: CartItemRequest) -> Self {
        CartItem {
            product_id: request.product_id,
            quantity: request.quantity,
            unit_price: request.unit_price,
        }
    }
}

/// Parses a JSON cart submission.
///
/// ## Example
/// ```rust
/// use caja_core::wire::parse_cart_submission;
///
/// let cart = parse_cart_submission(
///     r#"{"items": [{"producto_id": "p1", "cantidad": 3, "precio_unitario": "10.99"}]}"#,
/// )
/// .unwrap();
/// assert_eq!(cart.items[0].unit_price.cents(), 1099);
///
/// assert!(parse_cart_submission(r#"{"items": "nope"}"#).is_err());
/// ```
pub fn parse_cart_submission(json: &str) -> Result<CartSubmission, MalformedRequest> {
    serde_json::from_str(json).map_err(|err| MalformedRequest(err.to_string()))
}

/// Deserializes a wire amount into integer cents.
///
/// Three accepted spellings, tried in order:
/// - string: exact decimal, the preferred form
/// - integer: whole currency units (10 means 10.00)
/// - number: tolerated for sloppy clients, rejected unless it is exactly
///   representable at two decimal places
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Integer(i64),
        Number(f64),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Text(text) => Money::parse_decimal(&text).map_err(serde::de::Error::custom),
        RawAmount::Integer(units) => {
            Money::parse_decimal(&units.to_string()).map_err(serde::de::Error::custom)
        }
        RawAmount::Number(value) => {
            let scaled = value * 100.0;
            let cents = scaled.round();
            if (scaled - cents).abs() > 1e-6 {
                return Err(serde::de::Error::custom(format!(
                    "amount has more than two decimal places: {value}"
                )));
            }
            Money::parse_decimal(&format!("{value:.2}")).map_err(serde::de::Error::custom)
        }
    }
}

// =============================================================================
// Sale Confirmation (success response)
// =============================================================================

/// What a successful checkout looks like on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfirmation {
    #[serde(rename = "venta_id")]
    pub sale_id: String,

    /// Grand total as a two-decimal string. Never a float.
    pub total: String,

    #[serde(rename = "cantidad_items")]
    pub item_count: usize,

    /// RFC 3339 timestamp of the sale.
    #[serde(rename = "fecha")]
    pub occurred_at: String,
}

impl From<&SaleReceipt> for SaleConfirmation {
    fn from(receipt: &SaleReceipt) -> Self {
        SaleConfirmation {
            sale_id: receipt.sale_id.clone(),
            total: receipt.total().to_decimal_string(),
            item_count: receipt.item_count,
            occurred_at: receipt.occurred_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Error Reply (failure response)
// =============================================================================

/// The failure body: one human-readable message naming the offending
/// item(s) or rule. The HTTP-style status travels out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    /// Creates a reply from a message.
    pub fn new(message: impl Into<String>) -> Self {
        ErrorReply {
            error: message.into(),
        }
    }

    /// Creates a reply from any displayable error.
    pub fn from_error<E: std::fmt::Display>(err: &E) -> Self {
        ErrorReply {
            error: err.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
