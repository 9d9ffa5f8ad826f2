//! Static product catalog for the demo.
//!
//! The catalog is external to the state core: the `seed` command writes a
//! YAML file into the data directory and the cart commands read it back to
//! resolve product ids.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_decimal::Decimal;

use walmartchain_core::{Product, ProductId};

/// File name of the catalog inside the data directory.
pub const CATALOG_FILE: &str = "products.yaml";

fn product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    subcategory: &str,
    price: Decimal,
    hint: &str,
) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        brand: brand.to_owned(),
        category: category.to_owned(),
        subcategory: subcategory.to_owned(),
        price,
        description: format!("{name} from {brand}."),
        images: vec!["https://placehold.co/600x400.png".to_owned()],
        rating: 4.5,
        review_count: 128,
        in_stock: true,
        stock_count: 50,
        weight: None,
        dimensions: None,
        created_at: now,
        updated_at: now,
        slug: id.replace('_', "-"),
        data_ai_hint: Some(hint.to_owned()),
    }
}

/// The demo catalog written by `wmc seed`.
#[must_use]
pub fn default_products() -> Vec<Product> {
    vec![
        product(
            "walmart_grocery_001",
            "Organic Whole Milk",
            "Great Value",
            "Groceries",
            "Dairy",
            Decimal::new(349, 2),
            "milk carton",
        ),
        product(
            "walmart_grocery_002",
            "Banana Bunch",
            "Fresh Produce",
            "Groceries",
            "Fruit",
            Decimal::new(129, 2),
            "banana bunch",
        ),
        product(
            "walmart_electronics_001",
            "Latest Smartwatch Model X",
            "NovaTech",
            "Electronics",
            "Wearables",
            Decimal::new(4_999, 2),
            "smartwatch gadget",
        ),
        product(
            "walmart_electronics_002",
            "Wireless Earbuds Pro",
            "NovaTech",
            "Electronics",
            "Audio",
            Decimal::new(2_999, 2),
            "wireless earbuds",
        ),
        product(
            "walmart_home_001",
            "Non-Stick Frying Pan 28cm",
            "HomeChef",
            "Home Goods",
            "Kitchen",
            Decimal::new(1_899, 2),
            "frying pan",
        ),
        product(
            "walmart_fashion_001",
            "Classic Denim Jacket",
            "George",
            "Fashion",
            "Outerwear",
            Decimal::new(3_499, 2),
            "denim jacket",
        ),
    ]
}

/// Write the default catalog into `dir`, returning the file path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn write_default(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let path = dir.join(CATALOG_FILE);
    let yaml = serde_yaml::to_string(&default_products())?;
    fs::write(&path, yaml)?;
    Ok(path)
}

/// Load the catalog from `dir`.
///
/// # Errors
///
/// Returns an error if the catalog file is missing (run `wmc seed` first) or
/// cannot be parsed.
pub fn load(dir: &Path) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let path = dir.join(CATALOG_FILE);
    if !path.exists() {
        return Err(format!(
            "product catalog not found at {}; run `wmc seed` first",
            path.display()
        )
        .into());
    }

    let yaml = fs::read_to_string(&path)?;
    Ok(serde_yaml::from_str(&yaml)?)
}

/// Resolve one product by id.
#[must_use]
pub fn find<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|product| product.id == *id)
}
