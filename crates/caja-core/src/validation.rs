//! # Validation Module
//!
//! Field-level validation for Caja.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Wire (serde)                                              │
//! │  ├── Shape and type checks (deserialization)                        │
//! │  └── Failures are MalformedRequest, not business errors             │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE + cart::structural_issues                     │
//! │  ├── Field rules (barcode format, lengths, sign checks)             │
//! │  └── Cart rules (positive quantities/prices, aggregated)            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / UNIQUE constraints                                  │
//! │  ├── CHECK (stock >= 0)                                             │
//! │  └── Foreign key constraints                                        │
//! │                                                                     │
//! │  Multiple layers catch different errors                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::validation::{validate_barcode, validate_quantity};
//!
//! validate_barcode("7501055300891").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::Product;
use crate::{BARCODE_LENGTH, MAX_ITEM_QUANTITY, MAX_PRODUCT_NAME_LENGTH, MAX_SEARCH_QUERY_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product barcode.
///
/// ## Rules
/// - Must not be empty
/// - Must be exactly 13 ASCII digits (EAN-13)
/// - Surrounding whitespace is tolerated here; `Product::new` and the
///   catalog store persist the trimmed form
///
/// The check digit is not verified: store-internal codes commonly fail the
/// EAN checksum and still need to scan.
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_barcode;
///
/// assert!(validate_barcode("7501055300891").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("12345").is_err());
/// assert!(validate_barcode("75010553008AB").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() != BARCODE_LENGTH || !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: format!("must be exactly {BARCODE_LENGTH} digits (EAN-13)"),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coca-Cola 600ml").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_SEARCH_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Cart: line quantity                                                │
/// │                                                                     │
/// │  Cashier enters quantity: 5                                         │
/// │       │                                                             │
/// │       ▼                                                             │
/// │  validate_quantity(5) ← THIS FUNCTION                               │
/// │       │                                                             │
/// │       ├── qty <= 0? → Error: "quantity must be positive"            │
/// │       │                                                             │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"  │
/// │       │                                                             │
/// │       └── OK → item is structurally sellable                        │
/// │                                                                     │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional giveaways)
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("sale_price", 1099).is_ok());
/// assert!(validate_price_cents("sale_price", 0).is_ok());
/// assert!(validate_price_cents("sale_price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0); the ledger never records negative stock
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a restock threshold.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero disables the reorder alert
pub fn validate_reorder_level(level: i64) -> ValidationResult<()> {
    if level < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "reorder_level".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field constraint on a product before it is persisted.
///
/// This is field validation only. Barcode uniqueness lives in the storage
/// layer (UNIQUE index), and business rules (stock movements) live in the
/// checkout transaction.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_uuid(&product.id)?;
    validate_barcode(&product.barcode)?;
    validate_product_name(&product.name)?;
    validate_price_cents("purchase_price", product.purchase_price_cents)?;
    validate_price_cents("sale_price", product.sale_price_cents)?;
    validate_stock(product.stock)?;
    validate_reorder_level(product.reorder_level)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_barcode() {
        // Valid EAN-13 strings
        assert!(validate_barcode("7501055300891").is_ok());
        assert!(validate_barcode("0000000000000").is_ok());
        assert!(validate_barcode(" 7501055300891 ").is_ok());

        // Invalid
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode("12345").is_err());
        assert!(validate_barcode("75010553008912").is_err());
        assert!(validate_barcode("75010553008AB").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 600ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  cola  ").unwrap(), "cola");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("sale_price", 0).is_ok());
        assert!(validate_price_cents("sale_price", 1099).is_ok());
        assert!(validate_price_cents("sale_price", -100).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_product_composite() {
        let good = Product::new(
            "7501055300891",
            "Coca-Cola 600ml",
            Money::from_cents(1200),
            Money::from_cents(1800),
            24,
        );
        assert!(validate_product(&good).is_ok());

        let mut bad_barcode = good.clone();
        bad_barcode.barcode = "123".to_string();
        assert!(validate_product(&bad_barcode).is_err());

        let mut negative_price = good.clone();
        negative_price.sale_price_cents = -1;
        assert!(validate_product(&negative_price).is_err());

        let mut negative_stock = good;
        negative_stock.stock = -5;
        assert!(validate_product(&negative_stock).is_err());
    }
}
