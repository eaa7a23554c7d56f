//! # caja-core: Pure Business Logic for Caja
//!
//! This crate is the **heart** of Caja. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Caja Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 Caller (HTTP handler, terminal UI)            │  │
//! │  │        submits a cart ──► receives confirmation / error       │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │ JSON wire contract                 │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                 ★ caja-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐  ┌─────────┐  ┌─────────┐ ┌──────────┐ ┌──────┐ │  │
//! │  │  │  types  │  │  money  │  │  cart   │ │validation│ │ wire │ │  │
//! │  │  │ Product │  │  Money  │  │CartItem │ │  rules   │ │ JSON │ │  │
//! │  │  │  Sale   │  │ (cents) │  │ checks  │ │  checks  │ │ DTOs │ │  │
//! │  │  └─────────┘  └─────────┘  └─────────┘ └──────────┘ └──────┘ │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                   caja-db (Database Layer)                    │  │
//! │  │     SQLite repositories, migrations, checkout transaction     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, LineItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//! - [`cart`] - Cart items and structural validation
//! - [`wire`] - The JSON wire contract (requests, confirmations, errors)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caja_core::cart::{validate_cart, CartItem};
//! use caja_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1099); // $10.99
//!
//! let items = vec![CartItem::new("8f1c...", 3, price)];
//! assert!(validate_cart(&items).is_ok());
//!
//! // Line totals are plain integer arithmetic
//! assert_eq!(items[0].line_total(), Money::from_cents(3297));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Money` instead of
// `use caja_core::money::Money`

pub use cart::CartItem;
pub use error::{CartError, CoreError, ItemError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a catalog search query, in characters.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;

/// Number of digits in a product barcode (EAN-13).
pub const BARCODE_LENGTH: usize = 13;
