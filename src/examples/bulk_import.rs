//! Bulk Import Example
//!
//! Loads connection settings from a JSON config file and imports a batch of
//! generic documents, reporting per-document failures.
//!
//! Run with: cargo run --example bulk_import -- typesense.json

use serde_json::json;
use tracing_subscriber::EnvFilter;
use typesense_rs::{Client, ClientConfig, CreateField, Document, ImportAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "typesense.json".to_string());
    let config = ClientConfig::load(&path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load {}: {}, using defaults", path, e);
        ClientConfig::default()
    });

    let client = Client::builder(&config.url, &config.api_key)
        .debug_hook(|msg| tracing::info!("{}", msg))
        .build()
        .await?;

    if client.collection("products").await.is_err() {
        client
            .create_collection(
                "products",
                "",
                &[
                    CreateField::new("name", "string").infix(),
                    CreateField::new("price", "float"),
                    CreateField::new("sku", "string").no_index(),
                ],
            )
            .await?;
    }

    let docs: Vec<Document> = (0..100)
        .map(|i| {
            let doc = json!({
                "id": format!("p{}", i),
                "name": format!("Product {}", i),
                "price": if i % 10 == 0 { json!("free") } else { json!(i as f64 * 1.5) },
                "sku": format!("SKU-{:04}", i),
            });
            match doc {
                serde_json::Value::Object(map) => map,
                _ => Document::new(),
            }
        })
        .collect();

    let results = client
        .import_results("products", Some(ImportAction::Upsert), &docs)
        .await?;

    let imported = results.iter().filter(|r| r.success).count();
    println!("✅ Imported {}/{} documents", imported, docs.len());
    for (doc, result) in docs.iter().zip(&results).filter(|(_, r)| !r.success) {
        println!(
            "   ❌ {}: {}",
            doc["id"],
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}
