//! Demo catalogue used by `memory://` stores and the seed binary.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Map;

use crate::models::Product;

fn added_on(day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).single()
}

fn product(id: u32, name: &str, brand: &str, category: &str, price: f64, day: u32) -> Product {
    Product {
        id: format!("demo-{id:02}"),
        product_name: name.to_string(),
        brand_name: brand.to_string(),
        category_name: category.to_string(),
        price,
        created_at: added_on(day),
        extra: Map::new(),
    }
}

pub fn demo_products() -> Vec<Product> {
    vec![
        product(1, "Air Max 90", "Nike", "Shoes", 120.0, 1),
        product(2, "Air Zoom Pegasus", "Nike", "Shoes", 95.0, 2),
        product(3, "Dri-FIT Running Tee", "Nike", "Apparel", 30.0, 3),
        product(4, "Ultraboost Light", "Adidas", "Shoes", 180.0, 4),
        product(5, "Samba OG", "Adidas", "Shoes", 95.0, 5),
        product(6, "Essentials Hoodie", "Adidas", "Apparel", 55.0, 6),
        product(7, "Suede Classic", "Puma", "Shoes", 70.0, 7),
        product(8, "Velocity Nitro", "Puma", "Shoes", 110.0, 8),
        product(9, "AirPods Pro", "Apple", "Electronics", 249.0, 9),
        product(10, "iPhone 15", "Apple", "Electronics", 799.0, 10),
        product(11, "Galaxy Buds", "Samsung", "Electronics", 99.0, 11),
        product(12, "Galaxy Watch", "Samsung", "Electronics", 299.0, 12),
        product(13, "Club Fleece Joggers", "Nike", "Apparel", 60.0, 13),
        product(14, "Tiro Track Jacket", "Adidas", "Apparel", 75.0, 14),
    ]
}
