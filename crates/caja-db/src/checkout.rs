//! # Sale Transaction Engine
//!
//! Turns a validated cart into a committed sale: one atomic SQLite
//! transaction that decrements stock, writes the sale with its line items
//! and derives the total.
//!
//! ## Two Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      process_sale(cart, operator)                       │
//! │                                                                         │
//! │  PHASE 1 · Validation (no writes)                                       │
//! │    empty cart?  bad quantities?  bad prices?  unknown product ids?      │
//! │    → ALL problems for ALL items collected into ONE reply,               │
//! │      sorted by item index. Nothing touched the database.                │
//! │                                                                         │
//! │  PHASE 2 · One transaction                                              │
//! │    BEGIN                                                                │
//! │    INSERT sale (completed, total 0)   ← FIRST statement: takes the      │
//! │    for each cart item, in order:        write lock up front             │
//! │      UPDATE products SET stock = stock - qty                            │
//! │        WHERE id = ? AND is_active = 1 AND stock >= qty                  │
//! │      0 rows? → re-read row, classify:                                   │
//! │         missing → ProductNotFound                                       │
//! │         retired → ProductInactive                                       │
//! │         else    → InsufficientStock { available, requested }            │
//! │        → return Err (tx drops, EVERYTHING rolls back)                   │
//! │      INSERT line item (price snapshot, subtotal = qty × price)          │
//! │    UPDATE sale total from SUM(line subtotals)                           │
//! │    COMMIT                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the sale INSERT goes first
//! A deferred SQLite transaction only takes the write lock at its first
//! write. Starting with the INSERT means the lock is held before any stock
//! is read, so the check-then-decrement pairs are serialized against every
//! other checkout: two lanes selling the last unit cannot both pass the
//! check. It also avoids the read-then-upgrade path that fails immediately
//! with `SQLITE_BUSY` instead of waiting on the busy timeout.
//!
//! The conditional `stock >= qty` guard plus `rows_affected` makes the
//! check and the decrement a single statement; there is no window between
//! them for another writer to slip through.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use caja_core::cart::structural_issues;
use caja_core::error::ItemIssue;
use caja_core::{CartError, CartItem, CoreError, ItemError, Operator, SaleReceipt};

// =============================================================================
// Checkout Error
// =============================================================================

/// What can go wrong while processing a sale.
///
/// Two arms with very different retry semantics: `Domain` means the cart
/// itself is unacceptable and will stay unacceptable; `Storage` means the
/// attempt failed mid-flight and, because nothing partial survives a
/// rollback, the same cart is safe to submit again.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A business rule rejected the cart. Nothing was persisted.
    #[error("{0}")]
    Domain(#[from] CoreError),

    /// The storage layer failed. Safe to retry: no partial write survives.
    #[error("storage failure: {0}")]
    Storage(#[from] DbError),
}

impl From<CartError> for CheckoutError {
    fn from(err: CartError) -> Self {
        CheckoutError::Domain(CoreError::Cart(err))
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Storage(DbError::from(err))
    }
}

impl CheckoutError {
    /// HTTP-style status code for wire replies.
    ///
    /// ## Mapping
    /// - malformed/invalid cart → 400
    /// - unknown product → 404
    /// - retired product → 422
    /// - insufficient stock → 409
    /// - storage failure → 500
    pub fn http_status(&self) -> u16 {
        match self {
            CheckoutError::Domain(core) => match core {
                CoreError::Cart(_) | CoreError::Validation(_) => 400,
                CoreError::ProductNotFound(_) => 404,
                CoreError::ProductInactive(_) => 422,
                CoreError::InsufficientStock { .. } => 409,
            },
            CheckoutError::Storage(_) => 500,
        }
    }

    /// True when the caller sent a bad cart (4xx), false on storage faults.
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}

// =============================================================================
// Checkout Engine
// =============================================================================

/// The sale transaction engine.
///
/// ## Usage
/// ```rust,ignore
/// let engine = db.checkout();
///
/// let cart = vec![CartItem::new(&cola.id, 3, Money::from_cents(1800))];
/// let receipt = engine.process_sale(&cart, &Operator::new("maria")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
}

impl CheckoutEngine {
    /// Creates a new CheckoutEngine.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutEngine { pool }
    }

    /// Processes a cart into a committed sale.
    ///
    /// ## Rules
    /// - The whole cart commits or none of it does
    /// - Line items snapshot the unit price the cart carried
    /// - Duplicate product references are independent lines; the second
    ///   line's stock check sees the first line's decrement
    /// - The sale total is derived from the written line items, never
    ///   trusted from the caller
    ///
    /// The operator identity is logged for audit and nothing else.
    ///
    /// ## Returns
    /// * `Ok(SaleReceipt)` - Sale committed, stock decremented
    /// * `Err(CheckoutError::Domain)` - Cart rejected, nothing persisted
    /// * `Err(CheckoutError::Storage)` - Storage fault, nothing persisted
    pub async fn process_sale(
        &self,
        items: &[CartItem],
        operator: &Operator,
    ) -> Result<SaleReceipt, CheckoutError> {
        debug!(items = items.len(), operator = %operator.id, "Processing sale");

        // -----------------------------------------------------------------
        // Phase 1: validate everything, report everything, write nothing
        // -----------------------------------------------------------------
        if items.is_empty() {
            return Err(CartError::EmptyCart.into());
        }

        let mut issues = structural_issues(items);

        // Existence probes run even when structural issues already exist,
        // so one reply lists everything wrong with the cart. Blank ids are
        // already reported as MissingProduct and cannot be probed.
        for (index, item) in items.iter().enumerate() {
            if item.product_id.trim().is_empty() {
                continue;
            }
            let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
                .bind(&item.product_id)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                issues.push(ItemError {
                    index,
                    reason: ItemIssue::UnknownProduct {
                        product_id: item.product_id.clone(),
                    },
                });
            }
        }

        if !issues.is_empty() {
            issues.sort_by_key(|issue| issue.index);
            return Err(CartError::InvalidItems(issues).into());
        }

        // -----------------------------------------------------------------
        // Phase 2: one transaction, rolled back whole on any failure
        // -----------------------------------------------------------------
        let sale_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // First statement on purpose: acquires the write lock before any
        // stock is read (see module docs).
        sqlx::query(
            r#"
            INSERT INTO sales (id, occurred_at, total_cents, status, notes, created_at, updated_at)
            VALUES (?1, ?2, 0, 'completed', NULL, ?2, ?2)
            "#,
        )
        .bind(&sale_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for item in items {
            // Check and decrement in one statement. The WHERE clause is the
            // whole oversell defense: zero rows means the product cannot
            // fulfill this line right now.
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?2, updated_at = ?3
                WHERE id = ?1 AND is_active = 1 AND stock >= ?2
                "#,
            )
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let reason = diagnose_failed_line(&mut tx, item).await?;
                // Dropping tx rolls back the sale row and every decrement.
                return Err(reason.into());
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale_id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price.cents())
            .bind(item.line_total().cents())
            .execute(&mut *tx)
            .await?;
        }

        // The total derives from what was actually written, not from the
        // cart the caller sent.
        sqlx::query(
            r#"
            UPDATE sales
            SET total_cents = (
                SELECT COALESCE(SUM(subtotal_cents), 0)
                FROM sale_items
                WHERE sale_id = ?1
            )
            WHERE id = ?1
            "#,
        )
        .bind(&sale_id)
        .execute(&mut *tx)
        .await?;

        let total_cents: i64 = sqlx::query_scalar("SELECT total_cents FROM sales WHERE id = ?1")
            .bind(&sale_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            sale_id = %sale_id,
            total_cents,
            items = items.len(),
            operator = %operator.id,
            terminal = ?operator.terminal,
            "Sale completed"
        );

        Ok(SaleReceipt {
            sale_id,
            total_cents,
            item_count: items.len(),
            occurred_at: now,
        })
    }
}

/// Classifies a failed conditional decrement by re-reading the product row
/// inside the same transaction.
///
/// The `available` a caller sees is the stock the failing check observed,
/// already net of earlier lines in the same cart.
async fn diagnose_failed_line(
    tx: &mut Transaction<'_, Sqlite>,
    item: &CartItem,
) -> DbResult<CoreError> {
    let row: Option<(bool, i64)> =
        sqlx::query_as("SELECT is_active, stock FROM products WHERE id = ?1")
            .bind(&item.product_id)
            .fetch_optional(&mut **tx)
            .await?;

    Ok(match row {
        None => CoreError::ProductNotFound(item.product_id.clone()),
        Some((false, _)) => CoreError::ProductInactive(item.product_id.clone()),
        Some((true, available)) => CoreError::InsufficientStock {
            product_id: item.product_id.clone(),
            available,
            requested: item.quantity,
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use caja_core::cart::cart_total;
    use caja_core::wire::{parse_cart_submission, SaleConfirmation};
    use caja_core::{Money, Product, SaleFilter};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, barcode: &str, name: &str, stock: i64) -> Product {
        let product = Product::new(
            barcode,
            name,
            Money::from_cents(1200),
            Money::from_cents(1800),
            stock,
        );
        db.products().save(&product).await.unwrap()
    }

    fn operator() -> Operator {
        Operator::at_terminal("maria", "caja-1")
    }

    #[tokio::test]
    async fn test_happy_path_commits_everything() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;
        let chips = seed_product(&db, "7501011100123", "Sabritas Sal 45g", 12).await;

        let cart = vec![
            CartItem::new(&cola.id, 3, Money::from_cents(1800)),
            CartItem::new(&chips.id, 2, Money::from_cents(1550)),
        ];

        let receipt = db.checkout().process_sale(&cart, &operator()).await.unwrap();

        // 3 × 18.00 + 2 × 15.50 = 85.00
        assert_eq!(receipt.total_cents, 8500);
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.total_cents, cart_total(&cart).cents());

        // Stock moved
        let cola_after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        let chips_after = db.products().get_by_id(&chips.id).await.unwrap().unwrap();
        assert_eq!(cola_after.stock, 21);
        assert_eq!(chips_after.stock, 10);

        // Ledger agrees, in cart order
        let ticket = db.sales().get_ticket(&receipt.sale_id).await.unwrap().unwrap();
        assert_eq!(ticket.sale.status, caja_core::SaleStatus::Completed);
        assert_eq!(ticket.sale.total_cents, 8500);
        assert_eq!(ticket.line_count(), 2);
        assert_eq!(ticket.total_units(), 5);
        assert_eq!(ticket.lines[0].product_name, "Coca-Cola 600ml");
        assert_eq!(ticket.lines[1].product_name, "Sabritas Sal 45g");
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_nothing_persisted() {
        let db = test_db().await;

        let err = db.checkout().process_sale(&[], &operator()).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::Cart(CartError::EmptyCart))
        ));

        let sales = db.sales().list_sales(&SaleFilter::default()).await.unwrap();
        assert!(sales.is_empty());
    }

    #[tokio::test]
    async fn test_all_item_problems_reported_at_once() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;

        let cart = vec![
            CartItem::new(&cola.id, 0, Money::from_cents(1800)),
            CartItem::new("no-such-product", 1, Money::from_cents(500)),
            CartItem::new(&cola.id, 2, Money::from_cents(-100)),
            CartItem::new("", 1, Money::from_cents(500)),
        ];

        let err = db.checkout().process_sale(&cart, &operator()).await.unwrap_err();
        let issues = match err {
            CheckoutError::Domain(CoreError::Cart(CartError::InvalidItems(issues))) => issues,
            other => panic!("expected InvalidItems, got {other:?}"),
        };

        let indexes: Vec<usize> = issues.iter().map(|i| i.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
        assert!(matches!(issues[0].reason, ItemIssue::NonPositiveQuantity { quantity: 0 }));
        assert!(matches!(issues[1].reason, ItemIssue::UnknownProduct { .. }));
        assert!(matches!(issues[2].reason, ItemIssue::NonPositivePrice { .. }));
        assert!(matches!(issues[3].reason, ItemIssue::MissingProduct));

        // Validation never touches stock or the ledger.
        let cola_after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(cola_after.stock, 24);
        assert!(db.sales().list_sales(&SaleFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quantity_cap() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;

        let cart = vec![CartItem::new(&cola.id, 1000, Money::from_cents(1800))];
        let err = db.checkout().process_sale(&cart, &operator()).await.unwrap_err();

        match err {
            CheckoutError::Domain(CoreError::Cart(CartError::InvalidItems(issues))) => {
                assert!(matches!(
                    issues[0].reason,
                    ItemIssue::QuantityTooLarge { quantity: 1000, .. }
                ));
            }
            other => panic!("expected InvalidItems, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_oversell_rolls_back_earlier_lines() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;
        let chips = seed_product(&db, "7501011100123", "Sabritas Sal 45g", 3).await;

        let cart = vec![
            CartItem::new(&cola.id, 5, Money::from_cents(1800)),
            CartItem::new(&chips.id, 4, Money::from_cents(1550)),
        ];

        let err = db.checkout().process_sale(&cart, &operator()).await.unwrap_err();
        match err {
            CheckoutError::Domain(CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            }) => {
                assert_eq!(product_id, chips.id);
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // The cola decrement from the first line was rolled back.
        let cola_after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(cola_after.stock, 24);
        assert!(db.sales().list_sales(&SaleFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inactive_product_rejects_whole_cart() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;
        let retired = seed_product(&db, "7501011100123", "Cigarros Sueltos", 50).await;
        db.products().deactivate(&retired.id).await.unwrap();

        let cart = vec![
            CartItem::new(&cola.id, 1, Money::from_cents(1800)),
            CartItem::new(&retired.id, 1, Money::from_cents(300)),
        ];

        let err = db.checkout().process_sale(&cart, &operator()).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::ProductInactive(ref id)) if *id == retired.id
        ));

        let cola_after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(cola_after.stock, 24);
    }

    #[tokio::test]
    async fn test_duplicate_lines_share_the_same_stock() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 5).await;

        // 3 + 3 > 5: the second line must see the first line's decrement.
        let cart = vec![
            CartItem::new(&cola.id, 3, Money::from_cents(1800)),
            CartItem::new(&cola.id, 3, Money::from_cents(1800)),
        ];
        let err = db.checkout().process_sale(&cart, &operator()).await.unwrap_err();
        match err {
            CheckoutError::Domain(CoreError::InsufficientStock { available, requested, .. }) => {
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        let after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 5);

        // 3 + 2 = 5 fits and writes two separate lines.
        let cart = vec![
            CartItem::new(&cola.id, 3, Money::from_cents(1800)),
            CartItem::new(&cola.id, 2, Money::from_cents(1800)),
        ];
        let receipt = db.checkout().process_sale(&cart, &operator()).await.unwrap();
        assert_eq!(receipt.total_cents, 9000);

        let after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
        let items = db.sales().get_items(&receipt.sale_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_catalog_changes() {
        let db = test_db().await;
        let mut cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;

        let cart = vec![CartItem::new(&cola.id, 1, Money::from_cents(1800))];
        let receipt = db.checkout().process_sale(&cart, &operator()).await.unwrap();

        // Reprice after the sale.
        cola.sale_price_cents = 2500;
        db.products().save(&cola).await.unwrap();

        let items = db.sales().get_items(&receipt.sale_id).await.unwrap();
        assert_eq!(items[0].unit_price_cents, 1800);
        assert_eq!(items[0].subtotal_cents, 1800);

        let sale = db.sales().get_sale(&receipt.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 1800);
    }

    #[tokio::test]
    async fn test_sequential_sales_deplete_stock() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 6).await;
        let engine = db.checkout();

        for _ in 0..3 {
            let cart = vec![CartItem::new(&cola.id, 2, Money::from_cents(1800))];
            engine.process_sale(&cart, &operator()).await.unwrap();
        }

        let cart = vec![CartItem::new(&cola.id, 2, Money::from_cents(1800))];
        let err = engine.process_sale(&cart, &operator()).await.unwrap_err();
        match err {
            CheckoutError::Domain(CoreError::InsufficientStock { available, .. }) => {
                assert_eq!(available, 0);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let sales = db.sales().list_sales(&SaleFilter::default()).await.unwrap();
        assert_eq!(sales.len(), 3);
    }

    #[tokio::test]
    async fn test_receipt_total_matches_ledger() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;

        let cart = vec![CartItem::new(&cola.id, 3, Money::from_cents(1099))];
        let receipt = db.checkout().process_sale(&cart, &operator()).await.unwrap();

        assert_eq!(receipt.total_cents, 3297);

        let recomputed = db.sales().recompute_total(&receipt.sale_id).await.unwrap();
        assert_eq!(recomputed.cents(), 3297);

        let items = db.sales().get_items(&receipt.sale_id).await.unwrap();
        let sum: i64 = items.iter().map(|i| i.subtotal_cents).sum();
        assert_eq!(sum, receipt.total_cents);
    }

    #[tokio::test]
    async fn test_wire_submission_end_to_end() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 24).await;

        let json = format!(
            r#"{{"items": [{{"producto_id": "{}", "cantidad": 3, "precio_unitario": "18.00"}}]}}"#,
            cola.id
        );
        let cart = parse_cart_submission(&json).unwrap().into_cart();
        let receipt = db.checkout().process_sale(&cart, &operator()).await.unwrap();

        let confirmation = SaleConfirmation::from(&receipt);
        assert_eq!(confirmation.sale_id, receipt.sale_id);
        assert_eq!(confirmation.total, "54.00");
        assert_eq!(confirmation.item_count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_single_winner() {
        // File-backed so two connections really race on the write lock.
        let path = std::env::temp_dir().join(format!("caja-test-{}.db", Uuid::new_v4()));
        let db = Database::new(DbConfig::new(&path).max_connections(4))
            .await
            .unwrap();

        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml", 10).await;

        let engine_a = db.checkout();
        let engine_b = db.checkout();
        let cart_a = vec![CartItem::new(&cola.id, 6, Money::from_cents(1800))];
        let cart_b = cart_a.clone();

        let task_a = tokio::spawn(async move {
            engine_a.process_sale(&cart_a, &Operator::at_terminal("maria", "caja-1")).await
        });
        let task_b = tokio::spawn(async move {
            engine_b.process_sale(&cart_b, &Operator::at_terminal("pedro", "caja-2")).await
        });

        let result_a = task_a.await.unwrap();
        let result_b = task_b.await.unwrap();

        let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one lane wins the last units");

        let loser = if result_a.is_err() {
            result_a.unwrap_err()
        } else {
            result_b.unwrap_err()
        };
        match loser {
            CheckoutError::Domain(CoreError::InsufficientStock { available, requested, .. }) => {
                assert_eq!(available, 4);
                assert_eq!(requested, 6);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let after = db.products().get_by_id(&cola.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 4);
        let sales = db.sales().list_sales(&SaleFilter::default()).await.unwrap();
        assert_eq!(sales.len(), 1);

        db.close().await;
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(path.with_extension("db-wal"));
        let _ = std::fs::remove_file(path.with_extension("db-shm"));
    }

    #[test]
    fn test_http_status_mapping() {
        let not_found = CheckoutError::Domain(CoreError::ProductNotFound("x".to_string()));
        assert_eq!(not_found.http_status(), 404);
        assert!(not_found.is_client_error());

        let inactive = CheckoutError::Domain(CoreError::ProductInactive("x".to_string()));
        assert_eq!(inactive.http_status(), 422);

        let oversell = CheckoutError::Domain(CoreError::InsufficientStock {
            product_id: "x".to_string(),
            available: 1,
            requested: 2,
        });
        assert_eq!(oversell.http_status(), 409);

        let empty = CheckoutError::from(CartError::EmptyCart);
        assert_eq!(empty.http_status(), 400);

        let storage = CheckoutError::Storage(DbError::PoolExhausted);
        assert_eq!(storage.http_status(), 500);
        assert!(!storage.is_client_error());
    }
}
