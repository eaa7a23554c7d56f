//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  caja-core errors (this file)                                       │
//! │  ├── CoreError        - Domain failures (unknown/inactive/oversell) │
//! │  ├── CartError        - Structural cart failures, aggregated        │
//! │  └── ValidationError  - Field-level input failures                  │
//! │                                                                     │
//! │  caja-db errors (separate crate)                                    │
//! │  ├── DbError          - Storage operation failures                  │
//! │  └── CheckoutError    - What a checkout caller sees                 │
//! │                                                                     │
//! │  Flow: ValidationError / CartError → CoreError → CheckoutError      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, index, counts)
//! 3. Errors are enum variants, never String
//! 4. Structural cart errors report EVERY bad item in one value

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product id doesn't exist in the catalog
    /// - Product was removed between validation and commit
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but has been retired from sale.
    ///
    /// A cart naming an inactive product rejects the whole transaction;
    /// history keeps its line items, but no new ones may be created.
    #[error("Product is inactive: {0}")]
    ProductInactive(String),

    /// Insufficient stock to complete the sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart line (qty: 5)
    ///      │
    ///      ▼
    /// Conditional decrement observes stock=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 left in stock"
    /// ```
    ///
    /// `available` is what the failing check observed inside the checkout
    /// transaction, so earlier lines of the same cart are already counted.
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Structural cart error (wraps CartError).
    #[error("cart validation failed: {0}")]
    Cart(#[from] CartError),

    /// Field validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Cart Error
// =============================================================================

/// Structural failure of a submitted cart.
///
/// Validation never stops at the first bad item: every offending item is
/// reported, in index order, in a single `InvalidItems` value.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart has no items at all.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more items are structurally unusable.
    #[error("invalid items: {}", join_item_errors(.0))]
    InvalidItems(Vec<ItemError>),
}

/// A single bad cart item: which one, and what is wrong with it.
#[derive(Debug, Error)]
#[error("item {index}: {reason}")]
pub struct ItemError {
    /// Zero-based position in the submitted cart.
    pub index: usize,
    pub reason: ItemIssue,
}

/// What exactly is wrong with a cart item.
#[derive(Debug, Error)]
pub enum ItemIssue {
    /// The product reference is blank.
    #[error("product reference is missing")]
    MissingProduct,

    /// The referenced product does not exist in the catalog.
    #[error("unknown product {product_id}")]
    UnknownProduct { product_id: String },

    /// Quantity is zero or negative.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: i64 },

    /// Quantity is above the per-line cap.
    #[error("quantity {quantity} exceeds the maximum of {max}")]
    QuantityTooLarge { quantity: i64, max: i64 },

    /// Unit price is zero or negative.
    #[error("unit price must be positive, got {price}")]
    NonPositivePrice { price: Money },
}

fn join_item_errors(items: &[ItemError]) -> String {
    items
        .iter()
        .map(ItemError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a single field doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., non-digit barcode, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
