use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::raw::RawJson;

/// Document is an open JSON object; only `id` has meaning to the client.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Minimal decode of a document response, used to extract its id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentId {
    #[serde(default)]
    pub id: String,
}

/// A document fetched by id: its id, plus the full body for on-demand decoding
#[derive(Debug, Clone, Default)]
pub struct FetchedDocument {
    pub id: String,
    pub raw: RawJson,
}

impl FetchedDocument {
    /// Decode a response body. Fails only if the body is not JSON; a missing
    /// `id` or a `null` body gives an empty string.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let raw: RawJson = serde_json::from_slice(body)?;
        let DocumentId { id } = raw.decode::<Option<DocumentId>>()?.unwrap_or_default();
        Ok(Self { id, raw })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        self.raw.decode()
    }

    pub fn to_map(&self) -> serde_json::Result<Document> {
        self.raw.to_map()
    }
}

/// Response of a delete-by-filter request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteByQueryResponse {
    #[serde(default)]
    pub num_deleted: u64,
}

/// How the server treats documents that already exist during an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Create,
    Upsert,
    Update,
    Emplace,
}

impl ImportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportAction::Create => "create",
            ImportAction::Upsert => "upsert",
            ImportAction::Update => "update",
            ImportAction::Emplace => "emplace",
        }
    }
}

impl fmt::Display for ImportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an import response, in the same position as its input document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub success: bool,
    /// Reason reported for a failed line
    #[serde(default)]
    pub error: Option<String>,
    /// The offending input line, echoed back on failure
    #[serde(default)]
    pub document: Option<RawJson>,
}

/// Encode documents as JSON Lines: one compact JSON value per line.
pub fn encode_json_lines<I, T>(docs: I) -> serde_json::Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut buf = Vec::new();
    for doc in docs {
        serde_json::to_writer(&mut buf, &doc)?;
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Decode a newline-delimited import response, keeping input order.
/// Stops at the first malformed record.
pub fn decode_import_results(body: &[u8]) -> serde_json::Result<Vec<ImportResult>> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<ImportResult>()
        .collect()
}
