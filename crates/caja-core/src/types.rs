//! # Domain Types
//!
//! Core domain types used throughout Caja.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │    Product      │   │      Sale       │   │    LineItem     │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │    │
//! │  │  barcode        │   │  occurred_at    │   │  sale_id (FK)   │    │
//! │  │  name           │   │  total_cents    │   │  product_id(FK) │    │
//! │  │  *_price_cents  │   │  status         │   │  quantity       │    │
//! │  │  stock          │   │  notes          │   │  unit_price     │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘    │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │   SaleStatus    │   │  ActiveFilter   │   │   SaleReceipt   │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  Pending        │   │  Any            │   │  what a caller  │    │
//! │  │  Completed      │   │  ActiveOnly     │   │  gets back from │    │
//! │  │  Cancelled      │   │  InactiveOnly   │   │  checkout       │    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries an `id`: UUID v4, immutable, generated by the
//! application (no database round-trip, no coordination). Products also
//! carry a `barcode` business key (EAN-13, unique).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Restock threshold applied to new products unless overridden.
pub const DEFAULT_REORDER_LEVEL: i64 = 5;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// `stock` is the on-hand count and is only ever mutated by the checkout
/// transaction (atomically, never below zero). Retiring a product flips
/// `is_active` instead of deleting the row, so sale history keeps valid
/// references forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// EAN-13 barcode - business identifier, unique per catalog.
    pub barcode: String,

    /// Display name shown to the cashier and on the ticket.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Optional path to a product image.
    pub image_path: Option<String>,

    /// What the store pays per unit, in cents.
    pub purchase_price_cents: i64,

    /// What the customer pays per unit, in cents.
    pub sale_price_cents: i64,

    /// Current on-hand stock. Never negative.
    pub stock: i64,

    /// Restock alert threshold.
    pub reorder_level: i64,

    /// Whether the product can be sold (soft delete).
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new active product with a fresh UUID and timestamps.
    ///
    /// Surrounding whitespace on the barcode is stripped; the catalog keys
    /// on the exact stored string.
    ///
    /// ## Example
    /// ```rust
    /// use caja_core::money::Money;
    /// use caja_core::types::Product;
    ///
    /// let cola = Product::new(
    ///     "7501055300891",
    ///     "Coca-Cola 600ml",
    ///     Money::from_cents(1200),
    ///     Money::from_cents(1800),
    ///     24,
    /// );
    /// assert!(cola.is_active);
    /// assert_eq!(cola.reorder_level, 5);
    /// ```
    pub fn new(
        barcode: &str,
        name: &str,
        purchase_price: Money,
        sale_price: Money,
        stock: i64,
    ) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            barcode: barcode.trim().to_string(),
            name: name.to_string(),
            description: None,
            image_path: None,
            purchase_price_cents: purchase_price.cents(),
            sale_price_cents: sale_price.cents(),
            stock,
            reorder_level: DEFAULT_REORDER_LEVEL,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the restock threshold (builder style).
    pub fn with_reorder_level(mut self, level: i64) -> Self {
        self.reorder_level = level;
        self
    }

    /// Returns the customer-facing price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the acquisition cost as Money.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Per-unit profit: sale price minus purchase price.
    ///
    /// ## Example
    /// ```rust
    /// use caja_core::money::Money;
    /// use caja_core::types::Product;
    ///
    /// let p = Product::new("7501055300891", "Cola", Money::from_cents(1200),
    ///                      Money::from_cents(1800), 10);
    /// assert_eq!(p.margin(), Money::from_cents(600));
    /// ```
    #[inline]
    pub fn margin(&self) -> Money {
        self.sale_price() - self.purchase_price()
    }

    /// Whether stock has fallen to the restock threshold.
    ///
    /// At-threshold counts: stock 5 with threshold 5 needs reordering.
    #[inline]
    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.reorder_level
    }

    /// Whether the product has an image attached.
    #[inline]
    pub fn has_image(&self) -> bool {
        self.image_path.is_some()
    }

    /// Whether current stock covers the requested quantity.
    ///
    /// Advisory only: the checkout transaction re-checks this inside the
    /// database so concurrent sales can never oversell.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.is_active && self.stock >= quantity
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale.
///
/// Checkout only ever writes `Completed` sales. `Pending` and `Cancelled`
/// exist for administrative flows (bulk status changes on the ledger) and
/// are never produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Recorded but not finalized.
    Pending,
    /// Finalized; stock was decremented when this sale committed.
    Completed,
    /// Administratively cancelled.
    Cancelled,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Pending
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale on the ledger.
///
/// `total_cents` is derived: it always equals the sum of this sale's line
/// item subtotals. It is recomputed from the line items whenever they
/// change, never adjusted independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    /// When the sale happened (defaults to creation time).
    pub occurred_at: DateTime<Utc>,
    pub total_cents: i64,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item in a sale.
///
/// `unit_price_cents` is a snapshot taken at sale time; later catalog price
/// changes never rewrite history. `subtotal_cents` is always
/// `quantity × unit_price_cents`, computed when the line is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Quantity sold. Always positive.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Line subtotal (unit_price × quantity).
    pub subtotal_cents: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Sale Ticket
// =============================================================================

/// One line of a rendered ticket: a line item joined with the product it
/// references, since line items carry no name snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TicketLine {
    pub product_id: String,
    /// Current catalog name of the product.
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

/// A sale plus everything needed to render its ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTicket {
    pub sale: Sale,
    /// Ticket lines in the order the cart listed them.
    pub lines: Vec<TicketLine>,
}

impl SaleTicket {
    /// Number of distinct lines on the ticket.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines (3 colas + 2 chips = 5).
    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Sale Receipt
// =============================================================================

/// What a successful checkout hands back to the caller.
///
/// Pure data: the wire layer turns this into the JSON confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// Id of the committed sale.
    pub sale_id: String,
    /// Grand total in cents.
    pub total_cents: i64,
    /// Number of line items written.
    pub item_count: usize,
    /// When the sale occurred.
    pub occurred_at: DateTime<Utc>,
}

impl SaleReceipt {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Operator
// =============================================================================

/// Who is driving the terminal.
///
/// Threaded through checkout for audit logging only: the engine never uses
/// it in business logic and never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    /// Caller identity (login name, employee code, service account).
    pub id: String,
    /// Terminal or till identifier, when known.
    pub terminal: Option<String>,
}

impl Operator {
    /// Creates an operator with no terminal attribution.
    pub fn new(id: &str) -> Self {
        Operator {
            id: id.to_string(),
            terminal: None,
        }
    }

    /// Creates an operator tied to a specific terminal.
    pub fn at_terminal(id: &str, terminal: &str) -> Self {
        Operator {
            id: id.to_string(),
            terminal: Some(terminal.to_string()),
        }
    }
}

// =============================================================================
// Query Filters
// =============================================================================

/// Active-state filter for catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveFilter {
    /// Both active and inactive products.
    Any,
    /// Only products currently on sale.
    ActiveOnly,
    /// Only retired products.
    InactiveOnly,
}

impl Default for ActiveFilter {
    fn default() -> Self {
        ActiveFilter::Any
    }
}

/// Filter for ledger listings. All fields optional; default lists everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleFilter {
    /// Keep only sales with this status.
    pub status: Option<SaleStatus>,
    /// Keep only sales at or after this instant.
    pub since: Option<DateTime<Utc>>,
    /// Keep only sales at or before this instant.
    pub until: Option<DateTime<Utc>>,
    /// Cap the number of rows returned.
    pub limit: Option<u32>,
}

impl SaleFilter {
    /// Filter by status only.
    pub fn by_status(status: SaleStatus) -> Self {
        SaleFilter {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Restricts to sales at or after `since` (builder style).
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Restricts to sales at or before `until` (builder style).
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Caps the number of rows returned (builder style).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> Product {
        Product::new(
            "7501055300891",
            "Coca-Cola 600ml",
            Money::from_cents(1200),
            Money::from_cents(1800),
            24,
        )
    }

    #[test]
    fn test_new_product_defaults() {
        let p = cola();
        assert!(p.is_active);
        assert_eq!(p.reorder_level, DEFAULT_REORDER_LEVEL);
        assert!(p.description.is_none());
        assert!(!p.has_image());
        assert_eq!(p.created_at, p.updated_at);
    }

    #[test]
    fn test_new_product_trims_barcode() {
        let p = Product::new(
            " 7501055300891 ",
            "Coca-Cola 600ml",
            Money::from_cents(1200),
            Money::from_cents(1800),
            24,
        );
        assert_eq!(p.barcode, "7501055300891");
    }

    #[test]
    fn test_margin() {
        assert_eq!(cola().margin(), Money::from_cents(600));
    }

    #[test]
    fn test_needs_reorder_at_threshold() {
        let mut p = cola().with_reorder_level(10);
        p.stock = 11;
        assert!(!p.needs_reorder());
        p.stock = 10; // at the threshold counts
        assert!(p.needs_reorder());
        p.stock = 0;
        assert!(p.needs_reorder());
    }

    #[test]
    fn test_can_fulfill() {
        let mut p = cola();
        assert!(p.can_fulfill(24));
        assert!(!p.can_fulfill(25));

        p.is_active = false;
        assert!(!p.can_fulfill(1));
    }

    #[test]
    fn test_sale_status_default() {
        assert_eq!(SaleStatus::default(), SaleStatus::Pending);
    }

    #[test]
    fn test_ticket_counters() {
        let sale = Sale {
            id: "s1".to_string(),
            occurred_at: Utc::now(),
            total_cents: 7800,
            status: SaleStatus::Completed,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let ticket = SaleTicket {
            sale,
            lines: vec![
                TicketLine {
                    product_id: "p1".to_string(),
                    product_name: "Coca-Cola 600ml".to_string(),
                    quantity: 3,
                    unit_price_cents: 1800,
                    subtotal_cents: 5400,
                },
                TicketLine {
                    product_id: "p2".to_string(),
                    product_name: "Sabritas 45g".to_string(),
                    quantity: 2,
                    unit_price_cents: 1200,
                    subtotal_cents: 2400,
                },
            ],
        };
        assert_eq!(ticket.line_count(), 2);
        assert_eq!(ticket.total_units(), 5);
    }
}
