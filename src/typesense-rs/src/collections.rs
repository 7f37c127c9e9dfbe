use crate::options::with_json_body;
use crate::{Client, Result};
use reqwest::Method;
use typesense_core::{Collection, CreateField};

impl Client {
    /// Get a collection by name
    pub async fn collection(&self, name: &str) -> Result<Collection> {
        let body = self
            .request(Method::GET, &format!("/collections/{}", name), Vec::new())
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// List all collections, most recently created first
    pub async fn collections(&self) -> Result<Vec<Collection>> {
        let body = self.request(Method::GET, "/collections", Vec::new()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Create a collection. `default_sorting_field` may be empty.
    pub async fn create_collection(
        &self,
        name: &str,
        default_sorting_field: &str,
        fields: &[CreateField],
    ) -> Result<Collection> {
        let schema = Collection::schema(name, default_sorting_field, fields);
        let body = self
            .request(Method::POST, "/collections", vec![with_json_body(&schema)])
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Drop a collection and all its documents. Returns its last metadata.
    pub async fn delete_collection(&self, name: &str) -> Result<Collection> {
        let body = self
            .request(Method::DELETE, &format!("/collections/{}", name), Vec::new())
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{client_for, healthy_server, last_request};
    use crate::ClientError;
    use serde_json::{json, Value};
    use typesense_core::{Collection, CreateField};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn books() -> Value {
        json!({
            "name": "books",
            "num_documents": 3,
            "fields": [
                {"name": "title", "type": "string", "facet": false, "index": true, "infix": false},
                {"name": "year", "type": "int32", "facet": true, "index": true, "infix": false}
            ],
            "default_sorting_field": "year"
        })
    }

    #[tokio::test]
    async fn test_get_collection() {
        let server = healthy_server().await;
        Mock::given(method("GET"))
            .and(path("/collections/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(books()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let col = client.collection("books").await.unwrap();
        assert_eq!(col.name, "books");
        assert_eq!(col.num_documents, 3);
        assert_eq!(col.fields.len(), 2);
        assert_eq!(col.default_sorting_field, "year");
    }

    #[tokio::test]
    async fn test_get_missing_collection() {
        let server = healthy_server().await;
        Mock::given(method("GET"))
            .and(path("/collections/nope"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let err = client.collection("nope").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn test_list_keeps_server_order() {
        let server = healthy_server().await;
        let mut older = books();
        older["name"] = json!("authors");
        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([books(), older])))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let cols = client.collections().await.unwrap();
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["books", "authors"]);
    }

    #[tokio::test]
    async fn test_create_collection_body() {
        let server = healthy_server().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(201).set_body_json(books()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let col = client
            .create_collection("books", "", &[CreateField::new("title", "string")])
            .await
            .unwrap();
        assert_eq!(col.name, "books");

        let req = last_request(&server).await;
        assert_eq!(req.headers["content-type"], "application/json");
        let sent: Value = req.body_json().unwrap();
        assert_eq!(
            sent,
            json!({
                "name": "books",
                "fields": [
                    {"name": "title", "type": "string", "facet": false, "index": true, "infix": false}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_create_collection_no_index_and_sort_field() {
        let server = healthy_server().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(201).set_body_json(books()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        client
            .create_collection(
                "books",
                "year",
                &[
                    CreateField::new("cover_url", "string").no_index(),
                    CreateField::new("year", "int32").facet(),
                ],
            )
            .await
            .unwrap();

        let sent: Value = last_request(&server).await.body_json().unwrap();
        assert_eq!(sent["default_sorting_field"], json!("year"));
        assert_eq!(sent["fields"][0]["index"], json!(false));
        assert_eq!(sent["fields"][1]["index"], json!(true));
        assert_eq!(sent["fields"][1]["facet"], json!(true));
    }

    #[tokio::test]
    async fn test_create_existing_collection() {
        let server = healthy_server().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let err = client
            .create_collection("books", "", &[CreateField::new("title", "string")])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_create_bad_request_decodes_leniently() {
        // 400 bodies are passed through and decoded like any other response
        let server = healthy_server().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"message": "Field `year` has an invalid type."})),
            )
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let col = client
            .create_collection("books", "", &[CreateField::new("year", "integer")])
            .await
            .unwrap();
        assert_eq!(col, Collection::default());
    }

    #[tokio::test]
    async fn test_delete_collection() {
        let server = healthy_server().await;
        Mock::given(method("DELETE"))
            .and(path("/collections/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(books()))
            .mount(&server)
            .await;
        let client = client_for(&server).await;

        let col = client.delete_collection("books").await.unwrap();
        assert_eq!(col.num_documents, 3);
    }
}
