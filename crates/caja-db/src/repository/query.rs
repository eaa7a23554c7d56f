//! # Catalog Query Service
//!
//! Read-only catalog lookups: the search box and the restock report.
//!
//! ## Search Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Catalog Search Works                           │
//! │                                                                         │
//! │  User types: "coca"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim + cap at 100 chars, escape %, _ and \                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name LIKE '%coca%' OR barcode LIKE '%coca%'   (ASCII case-insensitive) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────┐                           │
//! │  │ Coca-Cola 600ml   | 7501055300891 | ✓    │ ← name match              │
//! │  │ Coca-Cola 2L      | 7501055301234 | ✓    │ ← name match              │
//! │  │ Sabritas Sal 45g  | 7501011100123 |      │                           │
//! │  └──────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ordered: active first, then name (case-insensitive), then id           │
//! │                                                                         │
//! │  Empty text = list everything the active filter allows.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs on WAL snapshot reads, so a checkout committing in
//! parallel never blocks a search.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use caja_core::validation::validate_search_query;
use caja_core::{ActiveFilter, Product};

/// Read-only catalog queries.
///
/// ## Usage
/// ```rust,ignore
/// let query = CatalogQuery::new(pool);
///
/// let hits = query.search("coca", ActiveFilter::ActiveOnly).await?;
/// let low = query.needing_reorder().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pool: SqlitePool,
}

impl CatalogQuery {
    /// Creates a new CatalogQuery.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogQuery { pool }
    }

    /// Searches the catalog by name or barcode substring.
    ///
    /// ## Rules
    /// - `text` is trimmed; longer than 100 chars is rejected
    /// - Empty text matches everything (the filter still applies)
    /// - Matching is case-insensitive for ASCII (SQLite LIKE)
    /// - `%`, `_` and `\` in the text are treated literally
    ///
    /// ## Ordering
    /// Active products first, then name (case-insensitive), then `id` as a
    /// stable tie-break, so identical names don't reshuffle between calls.
    pub async fn search(&self, text: &str, filter: ActiveFilter) -> DbResult<Vec<Product>> {
        let text = validate_search_query(text)?;

        debug!(query = %text, ?filter, "Searching catalog");

        let pattern: Option<String> = if text.is_empty() {
            None
        } else {
            Some(format!("%{}%", escape_like(&text)))
        };

        let active: Option<bool> = match filter {
            ActiveFilter::Any => None,
            ActiveFilter::ActiveOnly => Some(true),
            ActiveFilter::InactiveOnly => Some(false),
        };

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, description, image_path,
                   purchase_price_cents, sale_price_cents,
                   stock, reorder_level, is_active,
                   created_at, updated_at
            FROM products
            WHERE (?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR barcode LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR is_active = ?2)
            ORDER BY is_active DESC, name COLLATE NOCASE ASC, id ASC
            "#,
        )
        .bind(&pattern)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists active products at or below their restock threshold.
    ///
    /// Backs the restock report: `stock <= reorder_level`, most depleted
    /// first. Retired products never need reordering.
    pub async fn needing_reorder(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, description, image_path,
                   purchase_price_cents, sale_price_cents,
                   stock, reorder_level, is_active,
                   created_at, updated_at
            FROM products
            WHERE is_active = 1 AND stock <= reorder_level
            ORDER BY stock ASC, name COLLATE NOCASE ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

/// Escapes SQLite LIKE wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
