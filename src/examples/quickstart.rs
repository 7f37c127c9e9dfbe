//! Quickstart Example
//!
//! Creates a collection, adds a few books and searches them.
//!
//! Run against a local server with:
//! TYPESENSE_API_KEY=xyz cargo run --example quickstart

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use typesense_rs::{Client, ClientError, CreateField, SearchParameters};

#[derive(Debug, Serialize, Deserialize)]
struct Book {
    id: String,
    title: String,
    authors: Vec<String>,
    year: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("typesense_rs=debug")),
        )
        .with_target(false)
        .init();

    let url =
        std::env::var("TYPESENSE_URL").unwrap_or_else(|_| "http://localhost:8108".to_string());
    let api_key = std::env::var("TYPESENSE_API_KEY").unwrap_or_else(|_| "xyz".to_string());

    let client = Client::new(url, api_key).await?;
    println!("✅ Connected to {}\n", client.base_url());

    match client.delete_collection("books").await {
        Ok(_) | Err(ClientError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let col = client
        .create_collection(
            "books",
            "year",
            &[
                CreateField::new("title", "string"),
                CreateField::new("authors", "string[]").facet(),
                CreateField::new("year", "int32").facet(),
            ],
        )
        .await?;
    println!(
        "📚 Created collection '{}' with {} fields",
        col.name,
        col.fields.len()
    );

    let books = [
        Book {
            id: "1".into(),
            title: "Dune".into(),
            authors: vec!["Frank Herbert".into()],
            year: 1965,
        },
        Book {
            id: "2".into(),
            title: "Dune Messiah".into(),
            authors: vec!["Frank Herbert".into()],
            year: 1969,
        },
        Book {
            id: "3".into(),
            title: "The Left Hand of Darkness".into(),
            authors: vec!["Ursula K. Le Guin".into()],
            year: 1969,
        },
    ];
    for book in &books {
        client.insert("books", book).await?;
    }
    println!("📝 Inserted {} books\n", books.len());

    let params = SearchParameters {
        facet_by: vec!["year".into()],
        sort_by: vec!["year:asc".into()],
        ..SearchParameters::new("dune", &["title"])
    };
    let result = client.search("books", &params).await?;

    println!(
        "🔍 {} of {} books match 'dune' ({} ms):",
        result.found, result.out_of, result.search_time_ms
    );
    for (i, hit) in result.hits.iter().enumerate() {
        let book: Book = hit.decode()?;
        println!(
            "   {}. {} ({}) score: {}",
            i + 1,
            book.title,
            book.year,
            hit.text_match
        );
    }

    let fetched = client.document("books", "3").await?;
    let book: Book = fetched.decode()?;
    println!(
        "\n📖 Document {}: {} by {}",
        fetched.id,
        book.title,
        book.authors.join(", ")
    );

    let deleted = client.delete_by_query("books", "year:>=1969", 0).await?;
    println!("🗑  Deleted {} books published in or after 1969", deleted);

    Ok(())
}
