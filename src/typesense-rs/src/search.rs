use crate::options::with_query;
use crate::{Client, Result};
use reqwest::Method;
use typesense_core::{SearchParameters, SearchResult};

impl Client {
    /// Search a collection
    pub async fn search(
        &self,
        collection: &str,
        params: &SearchParameters,
    ) -> Result<SearchResult> {
        let body = self
            .request(
                Method::GET,
                &format!("/collections/{}/documents/search", collection),
                vec![with_query(params.to_query())],
            )
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{client_for, healthy_server, last_request};
    use crate::ClientError;
    use serde::Deserialize;
    use serde_json::json;
    use typesense_core::SearchParameters;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Book {
        title: String,
        year: u32,
    }

    fn result_body() -> serde_json::Value {
        json!({
            "facet_counts": [],
            "found": 2,
            "out_of": 120,
            "page": 1,
            "search_time_ms": 3,
            "hits": [
                {
                    "document": {"id": "124", "title": "Dune", "year": 1965},
                    "highlights": [
                        {"field": "title", "matched_tokens": ["Dune"], "snippet": "<mark>Dune</mark>"}
                    ],
                    "text_match": 130816
                },
                {
                    "document": {"id": "125", "title": "Dune Messiah", "year": 1969},
                    "highlights": [
                        {"field": "title", "matched_tokens": ["Dune"], "snippet": "<mark>Dune</mark> Messiah"}
                    ],
                    "text_match": 130560
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_search_query_string() {
        let server = healthy_server().await;
        Mock::given(method("GET"))
            .and(path("/collections/books/documents/search"))
            .and(query_param("q", "dune"))
            .and(query_param("query_by", "title"))
            .respond_with(ResponseTemplate::new(200).set_body_json(result_body()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        client
            .search("books", &SearchParameters::new("dune", &["title"]))
            .await
            .unwrap();

        let req = last_request(&server).await;
        let query = req.url.query().unwrap();
        assert!(query.contains("q=dune&query_by=title"));
        assert!(query.contains("prefix=true&prioritize_exact_match=true"));

        let keys: Vec<String> = req.url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(
            keys,
            vec![
                "enable_overrides",
                "pre_segmented_query",
                "prefix",
                "prioritize_exact_match",
                "q",
                "query_by"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_decodes_hits_lazily() {
        let server = healthy_server().await;
        Mock::given(method("GET"))
            .and(path("/collections/books/documents/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(result_body()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let params = SearchParameters {
            query: "dune".to_string(),
            query_by: vec!["title".to_string(), "description".to_string()],
            query_by_weights: vec![3, 1],
            filter_by: "year:<1970".to_string(),
            sort_by: vec!["year:asc".to_string()],
            per_page: Some(2),
            typo_tokens_threshold: Some(0),
            ..Default::default()
        };
        let result = client.search("books", &params).await.unwrap();

        assert_eq!(result.found, 2);
        assert_eq!(result.out_of, 120);
        assert_eq!(result.search_time_ms, 3);
        assert_eq!(result.hits.len(), 2);

        let titles: Vec<String> = result
            .hits
            .iter()
            .map(|hit| hit.decode::<Book>().unwrap().title)
            .collect();
        assert_eq!(titles, vec!["Dune", "Dune Messiah"]);
        assert_eq!(result.hits[1].decode::<Book>().unwrap().year, 1969);
        assert_eq!(result.hits[0].to_map().unwrap()["id"], json!("124"));
        assert_eq!(
            result.hits[1].highlights[0].snippet.as_deref(),
            Some("<mark>Dune</mark> Messiah")
        );

        let req = last_request(&server).await;
        let sent: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert!(sent.contains(&("query_by".to_string(), "title,description".to_string())));
        assert!(sent.contains(&("query_by_weights".to_string(), "3,1".to_string())));
        assert!(sent.contains(&("filter_by".to_string(), "year:<1970".to_string())));
        assert!(sent.contains(&("per_page".to_string(), "2".to_string())));
        assert!(sent.contains(&("typo_tokens_threshold".to_string(), "0".to_string())));
        assert!(!sent.iter().any(|(k, _)| k == "page"));
    }

    #[tokio::test]
    async fn test_search_missing_collection() {
        let server = healthy_server().await;
        Mock::given(method("GET"))
            .and(path("/collections/nope/documents/search"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let err = client
            .search("nope", &SearchParameters::new("dune", &["title"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }
}
