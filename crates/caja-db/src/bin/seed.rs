//! # Seed Data Generator
//!
//! Populates the database with a starter catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p caja-db --bin seed
//!
//! # Specify database path
//! cargo run -p caja-db --bin seed -- --db ./data/caja.db
//! ```
//!
//! ## Catalog
//! A fixed list of tiendita staples: sodas, botanas, abarrotes and
//! cleaning products, with real-looking EAN-13 barcodes (750 prefix) and
//! purchase/sale prices in centavos. A few entries start at or below
//! their reorder level so the low-stock report has something to show.

use std::env;

use caja_core::{ActiveFilter, Money, Product};
use caja_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

struct SeedProduct {
    barcode: &'static str,
    name: &'static str,
    description: Option<&'static str>,
    purchase_cents: i64,
    sale_cents: i64,
    stock: i64,
    reorder_level: i64,
}

const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        barcode: "7501055300891",
        name: "Coca-Cola 600ml",
        description: Some("Refresco de cola, botella PET"),
        purchase_cents: 1200,
        sale_cents: 1800,
        stock: 24,
        reorder_level: 6,
    },
    SeedProduct {
        barcode: "7501011100124",
        name: "Sabritas Sal 45g",
        description: None,
        purchase_cents: 1000,
        sale_cents: 1550,
        stock: 18,
        reorder_level: 5,
    },
    SeedProduct {
        barcode: "7501000111305",
        name: "Bimbo Pan Blanco Grande",
        description: None,
        purchase_cents: 3200,
        sale_cents: 4500,
        stock: 10,
        reorder_level: 3,
    },
    SeedProduct {
        barcode: "7501020511406",
        name: "Leche Lala Entera 1L",
        description: Some("Leche entera ultrapasteurizada"),
        purchase_cents: 1900,
        sale_cents: 2600,
        stock: 15,
        reorder_level: 6,
    },
    SeedProduct {
        barcode: "7502268110507",
        name: "Huevo San Juan 12 piezas",
        description: None,
        purchase_cents: 3800,
        sale_cents: 4900,
        stock: 8,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501017005608",
        name: "Maseca Harina de Maiz 1kg",
        description: None,
        purchase_cents: 1700,
        sale_cents: 2300,
        stock: 12,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501008042709",
        name: "Frijol La Sierra Bayos 580g",
        description: None,
        purchase_cents: 2100,
        sale_cents: 2900,
        stock: 9,
        reorder_level: 3,
    },
    SeedProduct {
        barcode: "7501017301810",
        name: "Atun Dolores en Agua 140g",
        description: None,
        purchase_cents: 1600,
        sale_cents: 2200,
        stock: 20,
        reorder_level: 6,
    },
    SeedProduct {
        barcode: "7501026005911",
        name: "Jabon Zote Rosa 200g",
        description: None,
        purchase_cents: 900,
        sale_cents: 1400,
        stock: 14,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501019006012",
        name: "Papel Higienico Regio 4 rollos",
        description: None,
        purchase_cents: 2800,
        sale_cents: 3900,
        stock: 7,
        reorder_level: 3,
    },
    SeedProduct {
        barcode: "7501003300113",
        name: "Aceite 1-2-3 900ml",
        description: None,
        purchase_cents: 3400,
        sale_cents: 4400,
        stock: 6,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501071100214",
        name: "Arroz Verde Valle 900g",
        description: None,
        purchase_cents: 2000,
        sale_cents: 2800,
        stock: 2,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501005100315",
        name: "Azucar Estandar 1kg",
        description: None,
        purchase_cents: 2200,
        sale_cents: 3000,
        stock: 3,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501025100416",
        name: "Sal La Fina 1kg",
        description: None,
        purchase_cents: 700,
        sale_cents: 1200,
        stock: 11,
        reorder_level: 3,
    },
    SeedProduct {
        barcode: "7501059900517",
        name: "Cafe Legal Clasico 90g",
        description: Some("Cafe tostado con azucar"),
        purchase_cents: 2900,
        sale_cents: 3900,
        stock: 5,
        reorder_level: 5,
    },
    SeedProduct {
        barcode: "7501000125618",
        name: "Galletas Marias Gamesa 170g",
        description: None,
        purchase_cents: 1100,
        sale_cents: 1600,
        stock: 16,
        reorder_level: 5,
    },
    SeedProduct {
        barcode: "7501086801719",
        name: "Agua Ciel 1L",
        description: None,
        purchase_cents: 600,
        sale_cents: 1000,
        stock: 30,
        reorder_level: 10,
    },
    SeedProduct {
        barcode: "7501053900820",
        name: "Jugo del Valle Mango 1L",
        description: None,
        purchase_cents: 1800,
        sale_cents: 2500,
        stock: 0,
        reorder_level: 6,
    },
    SeedProduct {
        barcode: "7501026900921",
        name: "Detergente Roma 500g",
        description: None,
        purchase_cents: 1500,
        sale_cents: 2100,
        stock: 13,
        reorder_level: 4,
    },
    SeedProduct {
        barcode: "7501031356022",
        name: "Veladora La Milagrosa",
        description: None,
        purchase_cents: 1000,
        sale_cents: 1700,
        stock: 4,
        reorder_level: 2,
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./caja_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Caja Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./caja_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Caja Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Insert the catalog
    println!();
    println!("Seeding catalog...");

    for entry in CATALOG {
        let mut product = Product::new(
            entry.barcode,
            entry.name,
            Money::from_cents(entry.purchase_cents),
            Money::from_cents(entry.sale_cents),
            entry.stock,
        )
        .with_reorder_level(entry.reorder_level);

        if let Some(text) = entry.description {
            product = product.with_description(text);
        }

        db.products().save(&product).await?;
        println!("  + {} (stock {})", entry.name, entry.stock);
    }

    println!();
    println!("✓ Seeded {} products", CATALOG.len());

    // Exercise the catalog queries
    println!();
    println!("Verifying catalog...");

    let results = db.catalog().search("coca", ActiveFilter::ActiveOnly).await?;
    println!("  Search 'coca': {} results", results.len());

    let low = db.catalog().needing_reorder().await?;
    println!("  At or below reorder level: {} products", low.len());
    for product in &low {
        println!(
            "    {} ({} left, reorder at {})",
            product.name, product.stock, product.reorder_level
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Console logging, overridable with RUST_LOG.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,caja=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
