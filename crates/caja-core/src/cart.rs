//! # Cart Module
//!
//! Cart items and structural validation.
//!
//! ## What "structural" Means
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Structural (HERE, pure)          Transactional (checkout engine)   │
//! │  ─────────────────────────        ────────────────────────────────  │
//! │  • cart not empty                 • product still exists            │
//! │  • quantity positive, capped      • product still active            │
//! │  • unit price positive            • stock covers the quantity       │
//! │  • product reference present      • decrement + insert, atomically  │
//! │                                                                     │
//! │  Checked up front, ALL failures   Checked inside ONE database       │
//! │  reported together, nothing       transaction; any failure rolls    │
//! │  touched.                         everything back.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity and unit price are taken as given: the till may override the
//! catalog price, so the engine never second-guesses either. Stock is the
//! one thing it re-checks transactionally.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, ItemError, ItemIssue};
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// One line of a submitted cart: what the caller wants to buy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog id of the product being bought.
    pub product_id: String,
    /// Units requested.
    pub quantity: i64,
    /// Price per unit as submitted (may differ from the catalog price).
    pub unit_price: Money,
}

impl CartItem {
    /// Creates a cart item.
    pub fn new(product_id: &str, quantity: i64, unit_price: Money) -> Self {
        CartItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price,
        }
    }

    /// The line total: unit price × quantity.
    ///
    /// ## Example
    /// ```rust
    /// use caja_core::cart::CartItem;
    /// use caja_core::money::Money;
    ///
    /// let item = CartItem::new("p1", 3, Money::from_cents(1099));
    /// assert_eq!(item.line_total(), Money::from_cents(3297));
    /// ```
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Structural Validation
// =============================================================================

/// Runs every pure per-item check and collects ALL failures.
///
/// Issues come back ordered by item index. An item can contribute more than
/// one issue (say, a blank product reference AND a zero quantity).
///
/// Catalog existence is deliberately not checked here: that needs I/O, so
/// the checkout engine probes it and merges its findings into the same
/// aggregated error before anything is persisted.
pub fn structural_issues(items: &[CartItem]) -> Vec<ItemError> {
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            issues.push(ItemError {
                index,
                reason: ItemIssue::MissingProduct,
            });
        }

        if item.quantity <= 0 {
            issues.push(ItemError {
                index,
                reason: ItemIssue::NonPositiveQuantity {
                    quantity: item.quantity,
                },
            });
        } else if item.quantity > MAX_ITEM_QUANTITY {
            issues.push(ItemError {
                index,
                reason: ItemIssue::QuantityTooLarge {
                    quantity: item.quantity,
                    max: MAX_ITEM_QUANTITY,
                },
            });
        }

        if !item.unit_price.is_positive() {
            issues.push(ItemError {
                index,
                reason: ItemIssue::NonPositivePrice {
                    price: item.unit_price,
                },
            });
        }
    }

    issues
}

/// Validates a cart structurally.
///
/// ## Returns
/// - `Err(CartError::EmptyCart)` for a cart with no items
/// - `Err(CartError::InvalidItems(..))` listing every bad item
/// - `Ok(())` when every line is structurally sellable
///
/// ## Example
/// ```rust
/// use caja_core::cart::{validate_cart, CartItem};
/// use caja_core::error::CartError;
/// use caja_core::money::Money;
///
/// assert!(matches!(validate_cart(&[]), Err(CartError::EmptyCart)));
///
/// let good = vec![CartItem::new("p1", 2, Money::from_cents(500))];
/// assert!(validate_cart(&good).is_ok());
/// ```
pub fn validate_cart(items: &[CartItem]) -> Result<(), CartError> {
    if items.is_empty() {
        return Err(CartError::EmptyCart);
    }

    let issues = structural_issues(items);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CartError::InvalidItems(issues))
    }
}

/// Sum of all line totals.
///
/// The committed sale total is recomputed from the written line items
/// inside the checkout transaction; this pure version exists for display
/// and for asserting the two always agree.
pub fn cart_total(items: &[CartItem]) -> Money {
    items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.line_total())
}

// =============================================================================
// Unit Tests
// =============================================================================
