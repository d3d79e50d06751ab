//! Fixed sample catalogue used by `POST /api/seed`

use crate::models::{LobsterProduct, ProductType, StockUnit};

pub fn sample_products() -> Vec<LobsterProduct> {
    vec![
        LobsterProduct {
            name: "Benih Lobster Air Tawar 2-3 cm".to_string(),
            product_type: ProductType::Seed,
            size: Some("2-3 cm".to_string()),
            price: 3500.0,
            stock: 5000,
            unit: StockUnit::Count,
            description: Some("Benih sehat siap tebar untuk pembesaran.".to_string()),
            image_url: Some(
                "https://images.unsplash.com/photo-1544551763-7ef039d2fd88?q=80&w=1200".to_string(),
            ),
        },
        LobsterProduct {
            name: "Lobster Konsumsi 100-150 gr".to_string(),
            product_type: ProductType::Consumption,
            size: Some("100-150 gr".to_string()),
            price: 230000.0,
            stock: 120,
            unit: StockUnit::WeightKg,
            description: Some(
                "Lobster air tawar segar untuk restoran dan rumah tangga.".to_string(),
            ),
            image_url: Some(
                "https://images.unsplash.com/photo-1504674900247-0877df9cc836?q=80&w=1200".to_string(),
            ),
        },
        LobsterProduct {
            name: "Induk Lobster Siap Pijah".to_string(),
            product_type: ProductType::Broodstock,
            size: Some("Siap pijah".to_string()),
            price: 120000.0,
            stock: 60,
            unit: StockUnit::Count,
            description: Some("Indukan pilihan produktif untuk pembenihan.".to_string()),
            image_url: Some(
                "https://images.unsplash.com/photo-1544025162-d76694265947?q=80&w=1200".to_string(),
            ),
        },
    ]
}
