//! Typesense Client Library
//!
//! HTTP client for the Typesense search engine REST API: collections,
//! documents, bulk import and search.

mod client;
mod collections;
mod documents;
pub mod options;
mod search;

pub use client::{Client, ClientBuilder, DebugHook, API_KEY_HEADER, VERSION};
pub use options::{PendingRequest, RequestOption};
pub use reqwest::header::HeaderMap;
pub use reqwest::Method;
pub use typesense_core::{
    ClientConfig, Collection, CreateField, DeleteByQueryResponse, Document, DocumentId,
    FacetCount, FacetValueCount, FetchedDocument, Field, HealthStatus, Highlight, ImportAction,
    ImportResult, QueryValues, RawJson, SearchHit, SearchParameters, SearchResult,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("401 unauthorized")]
    Unauthorized,

    #[error("404 not found")]
    NotFound,

    #[error("409 resource already exists")]
    AlreadyExists,

    #[error("422 unprocessable entity")]
    Unprocessable,

    #[error("503 service unavailable")]
    Unavailable,

    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    #[error("slice expected")]
    NotSequence,

    #[error("path segment {0:?} cannot be sent")]
    DotSegment(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
