use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::query::QueryValues;
use crate::raw::RawJson;

/// SearchParameters configures a search request.
///
/// Every field maps to one query parameter. Empty strings and lists, and
/// `None`, mean "use the server default" and are left out of the request.
/// Boolean knobs are named for the non-default behavior (`no_prefix`,
/// `disable_overrides`, ...) so that `Default` reproduces the server's
/// defaults; they are inverted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    /// Text to search for
    pub query: String,
    /// Fields to search in
    pub query_by: Vec<String>,
    /// Relative weight of each `query_by` field
    pub query_by_weights: Vec<u32>,
    /// Treat the last query word as a whole word instead of a prefix
    pub no_prefix: bool,

    /// Filter expression, e.g. `num_pages:>100`
    pub filter_by: String,
    /// Up to three sort expressions, e.g. `year:desc`
    pub sort_by: Vec<String>,

    pub facet_by: Vec<String>,
    pub max_facet_values: Option<u32>,
    /// Filters facet values; matching text is highlighted
    pub facet_query: String,

    /// Do not rank exact field matches first
    pub no_prioritize_exact_match: bool,

    pub page: Option<u32>,
    pub per_page: Option<u32>,

    /// Group hits by these (faceted) fields
    pub group_by: Vec<String>,
    /// Hits returned per group
    pub group_limit: Option<u32>,

    pub include_fields: Vec<String>,
    pub exclude_fields: Vec<String>,

    /// Fields to highlight with snippets
    pub highlight_fields: Vec<String>,
    /// Fields to highlight in full
    pub highlight_full_fields: Vec<String>,
    /// Tokens around a highlight on each side
    pub highlight_affix_num_tokens: Option<u32>,
    pub highlight_start_tag: Option<String>,
    pub highlight_end_tag: Option<String>,
    /// Values shorter than this are highlighted in full
    pub snippet_threshold: Option<u32>,

    /// Maximum typos tolerated (0, 1 or 2)
    pub num_typos: Option<u32>,
    /// Search with more typos until this many results are found; 0 disables
    pub typo_tokens_threshold: Option<u32>,
    /// Drop query tokens until this many results are found; 0 disables
    pub drop_tokens_threshold: Option<u32>,

    /// `record_id:hit_position` entries, e.g. `123:1`
    pub pinned_hits: Vec<String>,
    /// Record ids to hide
    pub hidden_hits: Vec<String>,
    pub disable_overrides: bool,

    /// Let the server tokenize the query instead of splitting on spaces
    pub no_pre_segmented_query: bool,

    /// Upper bound on hits reachable through pagination
    pub limit_hits: Option<u32>,
}

impl SearchParameters {
    pub fn new(query: impl Into<String>, query_by: &[&str]) -> Self {
        Self {
            query: query.into(),
            query_by: query_by.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Build the query string for `GET /collections/{c}/documents/search`.
    pub fn to_query(&self) -> QueryValues {
        let mut v = QueryValues::new();

        v.set("q", self.query.as_str());
        v.set("query_by", self.query_by.join(","));
        v.set("prefix", (!self.no_prefix).to_string());
        v.set("prioritize_exact_match", (!self.no_prioritize_exact_match).to_string());
        v.set("enable_overrides", (!self.disable_overrides).to_string());
        v.set("pre_segmented_query", (!self.no_pre_segmented_query).to_string());

        if !self.query_by_weights.is_empty() {
            let weights: Vec<String> = self.query_by_weights.iter().map(u32::to_string).collect();
            v.set("query_by_weights", weights.join(","));
        }

        set_str(&mut v, "filter_by", &self.filter_by);
        set_list(&mut v, "sort_by", &self.sort_by);
        set_list(&mut v, "facet_by", &self.facet_by);
        set_num(&mut v, "max_facet_values", self.max_facet_values);
        set_str(&mut v, "facet_query", &self.facet_query);
        set_num(&mut v, "page", self.page);
        set_num(&mut v, "per_page", self.per_page);
        set_list(&mut v, "group_by", &self.group_by);
        set_num(&mut v, "group_limit", self.group_limit);
        set_list(&mut v, "include_fields", &self.include_fields);
        set_list(&mut v, "exclude_fields", &self.exclude_fields);
        set_list(&mut v, "highlight_fields", &self.highlight_fields);
        set_list(&mut v, "highlight_full_fields", &self.highlight_full_fields);
        set_num(&mut v, "highlight_affix_num_tokens", self.highlight_affix_num_tokens);
        if let Some(tag) = &self.highlight_start_tag {
            v.set("highlight_start_tag", tag.as_str());
        }
        if let Some(tag) = &self.highlight_end_tag {
            v.set("highlight_end_tag", tag.as_str());
        }
        set_num(&mut v, "snippet_threshold", self.snippet_threshold);
        set_num(&mut v, "num_typos", self.num_typos);
        set_num(&mut v, "typo_tokens_threshold", self.typo_tokens_threshold);
        set_num(&mut v, "drop_tokens_threshold", self.drop_tokens_threshold);
        set_list(&mut v, "pinned_hits", &self.pinned_hits);
        set_list(&mut v, "hidden_hits", &self.hidden_hits);
        set_num(&mut v, "limit_hits", self.limit_hits);

        v
    }
}

fn set_str(v: &mut QueryValues, key: &str, value: &str) {
    if !value.is_empty() {
        v.set(key, value);
    }
}

fn set_list(v: &mut QueryValues, key: &str, values: &[String]) {
    if !values.is_empty() {
        v.set(key, values.join(","));
    }
}

fn set_num(v: &mut QueryValues, key: &str, value: Option<u32>) {
    if let Some(n) = value {
        v.set(key, n.to_string());
    }
}

/// SearchResult is the decoded body of a search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub facet_counts: Vec<FacetCount>,
    /// Number of matching documents
    pub found: u64,
    /// Number of documents searched
    pub out_of: u64,
    pub page: u32,
    /// Search latency in milliseconds
    pub search_time_ms: u64,
    pub hits: Vec<SearchHit>,
}

/// Value counts for one `facet_by` field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetCount {
    pub field_name: String,
    pub counts: Vec<FacetValueCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetValueCount {
    pub value: String,
    pub count: u64,
    pub highlighted: String,
}

/// SearchHit is one matched document.
///
/// The document is kept as raw JSON; call [`SearchHit::decode`] for a typed
/// value or [`SearchHit::to_map`] for a generic map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub document: RawJson,
    pub highlights: Vec<Highlight>,
    /// Relevance score
    pub text_match: u64,
}

impl SearchHit {
    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        self.document.decode()
    }

    pub fn to_map(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        self.document.to_map()
    }
}

/// Highlight is the matched portion of one field in a hit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    /// The matched field name
    pub field: String,
    pub indices: Vec<u32>,
    pub matched_tokens: RawJson,
    /// Present for scalar string fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Present for string array fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<Vec<String>>,
}
