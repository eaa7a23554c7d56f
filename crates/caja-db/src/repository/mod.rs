//! # Repository Module
//!
//! Database repository implementations for Caja.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern Explained                        │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  db.catalog().search("coca", ActiveFilter::ActiveOnly)          │
//! │       ▼                                                                 │
//! │  CatalogQuery                                                           │
//! │  ├── search(&self, text, filter)                                        │
//! │  └── needing_reorder(&self)                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Writes are split the same way: ProductRepository owns catalog rows,    │
//! │  SaleRepository owns the ledger, and stock is touched ONLY by the       │
//! │  checkout engine's transaction.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog writes (save, deactivate, remove)
//! - [`query::CatalogQuery`] - Catalog reads (search, restock report)
//! - [`sale::SaleRepository`] - Sale ledger reads and administrative updates

pub mod product;
pub mod query;
pub mod sale;
