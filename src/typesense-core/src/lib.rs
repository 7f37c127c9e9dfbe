//! Typesense Core Library
//!
//! Wire model and request builders for the Typesense REST API:
//! - Collection schemas and the create-collection body
//! - Documents, bulk import encoding and result decoding
//! - Search parameters and search results
//! - Deferred-decode JSON payloads
//! - Client configuration
//!
//! Apart from [`ClientConfig::load`] reading a config file, nothing in this
//! crate performs I/O; see `typesense-rs` for the HTTP client.

pub mod collection;
pub mod config;
pub mod document;
pub mod health;
pub mod query;
pub mod raw;
pub mod search;

// Re-export commonly used types
pub use collection::{Collection, CreateField, Field};
pub use config::ClientConfig;
pub use document::{
    DeleteByQueryResponse, Document, DocumentId, FetchedDocument, ImportAction, ImportResult,
};
pub use health::HealthStatus;
pub use query::QueryValues;
pub use raw::RawJson;
pub use search::{FacetCount, FacetValueCount, Highlight, SearchHit, SearchParameters, SearchResult};
