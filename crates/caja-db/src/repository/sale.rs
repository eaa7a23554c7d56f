//! # Sale Ledger
//!
//! Read and administrative operations over recorded sales.
//!
//! ## What Lives Here vs. the Checkout Engine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sale Data Ownership                              │
//! │                                                                         │
//! │  checkout::CheckoutEngine                 repository::SaleRepository    │
//! │  ─────────────────────────                ───────────────────────────   │
//! │  WRITES sales + line items                READS sales, items, tickets   │
//! │  (one atomic transaction,                 recompute_total (repair)      │
//! │   always status 'completed')              set_status (administrative)   │
//! │                                                                         │
//! │  The ledger never touches stock and the engine never goes through       │
//! │  the ledger; they only share the schema.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caja_core::{LineItem, Money, Sale, SaleFilter, SaleStatus, SaleTicket, TicketLine};

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by ID.
    pub async fn get_sale(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, occurred_at, total_cents, status, notes, created_at, updated_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all line items for a sale, in the order they were rung up.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Assembles a full ticket: the sale plus its lines with product names
    /// joined in for display.
    ///
    /// The join is INNER because `product_id` is `ON DELETE RESTRICT`; a
    /// referenced product row cannot disappear.
    pub async fn get_ticket(&self, sale_id: &str) -> DbResult<Option<SaleTicket>> {
        let sale = match self.get_sale(sale_id).await? {
            Some(sale) => sale,
            None => return Ok(None),
        };

        let lines = sqlx::query_as::<_, TicketLine>(
            r#"
            SELECT li.product_id,
                   p.name AS product_name,
                   li.quantity,
                   li.unit_price_cents,
                   li.subtotal_cents
            FROM sale_items li
            INNER JOIN products p ON p.id = li.product_id
            WHERE li.sale_id = ?1
            ORDER BY li.rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleTicket { sale, lines }))
    }

    /// Lists sales newest first, with optional filters.
    ///
    /// ## Filters
    /// - `status` - only sales in that state
    /// - `since` / `until` - inclusive window on `occurred_at`
    /// - `limit` - cap the result size (unset = everything)
    pub async fn list_sales(&self, filter: &SaleFilter) -> DbResult<Vec<Sale>> {
        debug!(?filter, "Listing sales");

        // LIMIT -1 is SQLite for "no limit"
        let limit: i64 = filter.limit.map(i64::from).unwrap_or(-1);

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, occurred_at, total_cents, status, notes, created_at, updated_at
            FROM sales
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR occurred_at >= ?2)
              AND (?3 IS NULL OR occurred_at <= ?3)
            ORDER BY occurred_at DESC, id DESC
            LIMIT ?4
            "#,
        )
        .bind(filter.status)
        .bind(filter.since)
        .bind(filter.until)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Recomputes a sale's total from its stored line items.
    ///
    /// The checkout engine already derives the total inside its transaction,
    /// so this is a repair/audit tool: run it after hand-editing line items
    /// or to verify a ticket. Idempotent.
    ///
    /// ## Returns
    /// The recomputed total, or `DbError::NotFound` for an unknown sale.
    pub async fn recompute_total(&self, sale_id: &str) -> DbResult<Money> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET total_cents = (
                    SELECT COALESCE(SUM(subtotal_cents), 0)
                    FROM sale_items
                    WHERE sale_id = ?1
                ),
                updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(sale_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", sale_id));
        }

        let total: i64 = sqlx::query_scalar("SELECT total_cents FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Money::from_cents(total))
    }

    /// Bulk administrative status change.
    ///
    /// Marks every listed sale as `status` and returns how many rows
    /// actually changed. Unknown ids are skipped, not errors. The checkout
    /// engine never calls this; it exists for back-office corrections.
    pub async fn set_status(&self, sale_ids: &[String], status: SaleStatus) -> DbResult<u64> {
        if sale_ids.is_empty() {
            return Ok(0);
        }

        debug!(count = sale_ids.len(), ?status, "Bulk status update");

        // IN lists cannot be bound as one parameter; build the placeholders.
        let placeholders = vec!["?"; sale_ids.len()].join(", ");
        let sql = format!(
            "UPDATE sales SET status = ?1, updated_at = ?2 WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql).bind(status).bind(Utc::now());
        for id in sale_ids {
            query = query.bind(id);
        }

        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use caja_core::{Money, Product};
    use chrono::{DateTime, TimeZone};
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    async fn insert_sale(
        db: &Database,
        occurred_at: DateTime<Utc>,
        status: SaleStatus,
        total_cents: i64,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO sales (id, occurred_at, total_cents, status, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, NULL, ?2, ?2)
            "#,
        )
        .bind(&id)
        .bind(occurred_at)
        .bind(total_cents)
        .bind(status)
        .execute(db.pool())
        .await
        .unwrap();
        id
    }

    async fn insert_item(
        db: &Database,
        sale_id: &str,
        product_id: &str,
        quantity: i64,
        unit_price_cents: i64,
    ) {
        sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price_cents)
        .bind(quantity * unit_price_cents)
        .execute(db.pool())
        .await
        .unwrap();
    }

    async fn seed_product(db: &Database, barcode: &str, name: &str) -> Product {
        let product = Product::new(
            barcode,
            name,
            Money::from_cents(800),
            Money::from_cents(1200),
            50,
        );
        db.products().save(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_get_sale() {
        let db = test_db().await;
        let id = insert_sale(&db, at(20, 10), SaleStatus::Completed, 3600).await;

        let sale = db.sales().get_sale(&id).await.unwrap().unwrap();
        assert_eq!(sale.id, id);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.total(), Money::from_cents(3600));

        assert!(db.sales().get_sale("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_items_keep_cart_order() {
        let db = test_db().await;
        let zap = seed_product(&db, "7501055300891", "Zapato Escolar").await;
        let agua = seed_product(&db, "7501011100123", "Agua 1L").await;

        let sale_id = insert_sale(&db, at(20, 10), SaleStatus::Completed, 0).await;
        // Rung up Z first, A second; alphabetical order would flip them.
        insert_item(&db, &sale_id, &zap.id, 1, 25000).await;
        insert_item(&db, &sale_id, &agua.id, 2, 1200).await;

        let items = db.sales().get_items(&sale_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, zap.id);
        assert_eq!(items[1].product_id, agua.id);
        assert_eq!(items[1].subtotal_cents, 2400);
    }

    #[tokio::test]
    async fn test_ticket_joins_product_names() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml").await;

        let sale_id = insert_sale(&db, at(20, 10), SaleStatus::Completed, 3600).await;
        insert_item(&db, &sale_id, &cola.id, 2, 1800).await;

        let ticket = db.sales().get_ticket(&sale_id).await.unwrap().unwrap();
        assert_eq!(ticket.sale.id, sale_id);
        assert_eq!(ticket.lines.len(), 1);
        assert_eq!(ticket.lines[0].product_name, "Coca-Cola 600ml");
        assert_eq!(ticket.lines[0].subtotal_cents, 3600);
        assert_eq!(ticket.line_count(), 1);
        assert_eq!(ticket.total_units(), 2);

        assert!(db.sales().get_ticket("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sales_newest_first() {
        let db = test_db().await;
        let oldest = insert_sale(&db, at(18, 9), SaleStatus::Completed, 100).await;
        let newest = insert_sale(&db, at(21, 9), SaleStatus::Completed, 300).await;
        let middle = insert_sale(&db, at(20, 9), SaleStatus::Completed, 200).await;

        let sales = db.sales().list_sales(&SaleFilter::default()).await.unwrap();
        let ids: Vec<&str> = sales.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![newest.as_str(), middle.as_str(), oldest.as_str()]);
    }

    #[tokio::test]
    async fn test_list_sales_filters() {
        let db = test_db().await;
        insert_sale(&db, at(18, 9), SaleStatus::Completed, 100).await;
        insert_sale(&db, at(19, 9), SaleStatus::Cancelled, 200).await;
        insert_sale(&db, at(20, 9), SaleStatus::Completed, 300).await;
        insert_sale(&db, at(21, 9), SaleStatus::Pending, 400).await;

        let completed = db
            .sales()
            .list_sales(&SaleFilter::by_status(SaleStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 2);
        assert!(completed.iter().all(|s| s.status == SaleStatus::Completed));

        // Inclusive window: exactly the 19th through the 20th.
        let windowed = db
            .sales()
            .list_sales(&SaleFilter::default().since(at(19, 0)).until(at(20, 23)))
            .await
            .unwrap();
        assert_eq!(windowed.len(), 2);

        let capped = db
            .sales()
            .list_sales(&SaleFilter::default().with_limit(3))
            .await
            .unwrap();
        assert_eq!(capped.len(), 3);
    }

    #[tokio::test]
    async fn test_recompute_total_repairs_drift() {
        let db = test_db().await;
        let cola = seed_product(&db, "7501055300891", "Coca-Cola 600ml").await;

        // Total recorded wrong on purpose.
        let sale_id = insert_sale(&db, at(20, 10), SaleStatus::Completed, 999).await;
        insert_item(&db, &sale_id, &cola.id, 2, 1800).await;
        insert_item(&db, &sale_id, &cola.id, 1, 1200).await;

        let total = db.sales().recompute_total(&sale_id).await.unwrap();
        assert_eq!(total, Money::from_cents(4800));

        // Idempotent.
        let again = db.sales().recompute_total(&sale_id).await.unwrap();
        assert_eq!(again, Money::from_cents(4800));
        let sale = db.sales().get_sale(&sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 4800);
    }

    #[tokio::test]
    async fn test_recompute_total_empty_and_missing() {
        let db = test_db().await;

        let empty = insert_sale(&db, at(20, 10), SaleStatus::Pending, 500).await;
        let total = db.sales().recompute_total(&empty).await.unwrap();
        assert_eq!(total, Money::zero());

        let err = db.sales().recompute_total("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_status_bulk() {
        let db = test_db().await;
        let a = insert_sale(&db, at(18, 9), SaleStatus::Pending, 100).await;
        let b = insert_sale(&db, at(19, 9), SaleStatus::Pending, 200).await;
        let c = insert_sale(&db, at(20, 9), SaleStatus::Pending, 300).await;

        let ids = vec![a.clone(), b.clone(), "no-such-sale".to_string()];
        let changed = db
            .sales()
            .set_status(&ids, SaleStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(changed, 2);

        let cancelled = db
            .sales()
            .list_sales(&SaleFilter::by_status(SaleStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 2);

        let untouched = db.sales().get_sale(&c).await.unwrap().unwrap();
        assert_eq!(untouched.status, SaleStatus::Pending);

        assert_eq!(
            db.sales().set_status(&[], SaleStatus::Completed).await.unwrap(),
            0
        );
    }
}
