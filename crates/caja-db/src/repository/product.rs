//! # Product Repository
//!
//! Catalog writes: saving, retiring and deleting products.
//!
//! ## Save Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       save() is an upsert                               │
//! │                                                                         │
//! │  save(product)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate fields (barcode, name, prices, stock)  ← rejects before SQL   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT(id) DO UPDATE                                   │
//! │       │                                                                 │
//! │       ├── new id      → row inserted                                    │
//! │       └── known id    → row updated, created_at preserved               │
//! │                                                                         │
//! │  Either way updated_at is refreshed and the stored row returned.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is deliberately NOT special-cased here: the checkout engine is the
//! only code path that decrements it, inside its own transaction. `save`
//! writes whatever stock the caller provides, which is how receiving new
//! inventory is expressed.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caja_core::validation::validate_product;
use caja_core::Product;

/// Repository for catalog write operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let stored = repo.save(&product).await?;
/// let found = repo.find_by_barcode("7501055300891").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Saves a product, inserting or updating by `id`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The row as stored (barcode trimmed, `updated_at`
    ///   refreshed)
    /// * `Err(DbError::Validation)` - A field constraint failed; no SQL ran
    /// * `Err(DbError::UniqueViolation)` - Barcode belongs to another product
    pub async fn save(&self, product: &Product) -> DbResult<Product> {
        validate_product(product)?;

        debug!(id = %product.id, barcode = %product.barcode, "Saving product");

        let mut stored = product.clone();
        // Validation accepts padded barcodes; storage keeps the canonical form.
        stored.barcode = stored.barcode.trim().to_string();
        stored.updated_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, barcode, name, description, image_path,
                purchase_price_cents, sale_price_cents,
                stock, reorder_level, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(id) DO UPDATE SET
                barcode = excluded.barcode,
                name = excluded.name,
                description = excluded.description,
                image_path = excluded.image_path,
                purchase_price_cents = excluded.purchase_price_cents,
                sale_price_cents = excluded.sale_price_cents,
                stock = excluded.stock,
                reorder_level = excluded.reorder_level,
                is_active = excluded.is_active,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.barcode)
        .bind(&stored.name)
        .bind(&stored.description)
        .bind(&stored.image_path)
        .bind(stored.purchase_price_cents)
        .bind(stored.sale_price_cents)
        .bind(stored.stock)
        .bind(stored.reorder_level)
        .bind(stored.is_active)
        .bind(stored.created_at)
        .bind(stored.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            // The only UNIQUE index besides the primary key is the barcode,
            // so name the actual value instead of the generic message.
            if let sqlx::Error::Database(ref db_err) = err {
                if db_err.message().contains("products.barcode") {
                    return DbError::duplicate("barcode", stored.barcode.as_str());
                }
            }
            DbError::from(err)
        })?;

        Ok(stored)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, description, image_path,
                   purchase_price_cents, sale_price_cents,
                   stock, reorder_level, is_active,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Looks a product up by its scanned barcode.
    ///
    /// The main lookup at the till: the scanner produces a barcode and the
    /// lane needs the matching product (or a miss) immediately.
    pub async fn find_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, barcode, name, description, image_path,
                   purchase_price_cents, sale_price_cents,
                   stock, reorder_level, is_active,
                   created_at, updated_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Retires a product by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// Historical line items still reference this product, so the row must
    /// survive. A retired product stops matching active searches and every
    /// checkout containing it is rejected.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Hard-deletes a product row.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Sale history still references
    ///   the product (`ON DELETE RESTRICT`); use [`deactivate`] instead
    /// * `Err(DbError::NotFound)` - No such product
    ///
    /// [`deactivate`]: ProductRepository::deactivate
    pub async fn remove(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products, active or not.
    ///
    /// Used by the seed binary to avoid double-seeding, and by diagnostics.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
