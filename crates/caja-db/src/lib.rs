//! # caja-db: Storage Layer for Caja
//!
//! This crate provides database access for the Caja point-of-sale engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Caja Data Flow                                  │
//! │                                                                         │
//! │  Caller (terminal UI, HTTP adapter, admin tool)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      caja-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌─────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database   │   │  Repositories   │   │   Checkout   │   │   │
//! │  │   │  (pool.rs)   │   │ (repository/*)  │   │ (checkout.rs)│   │   │
//! │  │   │              │   │                 │   │              │   │   │
//! │  │   │ SqlitePool   │◄──│ ProductRepo     │   │ one atomic   │   │   │
//! │  │   │ WAL mode     │   │ CatalogQuery    │◄──│ transaction  │   │   │
//! │  │   │ Migrations   │   │ SaleRepo        │   │ per sale     │   │   │
//! │  │   └──────────────┘   └─────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (caja.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog store, catalog queries, sale ledger
//! - [`checkout`] - The sale transaction engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caja_db::{Database, DbConfig};
//! use caja_core::{CartItem, Money, Operator};
//!
//! let db = Database::new(DbConfig::new("path/to/caja.db")).await?;
//!
//! let cart = vec![CartItem::new(&cola.id, 3, Money::from_cents(1800))];
//! let receipt = db.checkout().process_sale(&cart, &Operator::new("maria")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutEngine, CheckoutError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::query::CatalogQuery;
pub use repository::sale::SaleRepository;
