use crate::options::{with_body, with_headers, with_json_body, with_query};
use crate::{Client, ClientError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use typesense_core::document::{decode_import_results, encode_json_lines};
use typesense_core::{
    DeleteByQueryResponse, FetchedDocument, ImportAction, ImportResult, QueryValues,
};

fn documents_path(collection: &str) -> String {
    format!("/collections/{}/documents", collection)
}

fn document_path(collection: &str, id: &str) -> String {
    format!("/collections/{}/documents/{}", collection, id)
}

impl Client {
    /// Insert a document, discarding the stored copy the server returns
    pub async fn insert<D>(&self, collection: &str, doc: &D) -> Result<()>
    where
        D: Serialize + Sync + ?Sized,
    {
        self.request(Method::POST, &documents_path(collection), vec![with_json_body(doc)])
            .await?;
        Ok(())
    }

    /// Insert a document and decode the stored copy, including server-assigned fields
    pub async fn insert_as<D, T>(&self, collection: &str, doc: &D) -> Result<T>
    where
        D: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .request(Method::POST, &documents_path(collection), vec![with_json_body(doc)])
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Insert a document, replacing it if the id already exists
    pub async fn upsert<D>(&self, collection: &str, doc: &D) -> Result<()>
    where
        D: Serialize + Sync + ?Sized,
    {
        self.upsert_raw(collection, doc).await?;
        Ok(())
    }

    pub async fn upsert_as<D, T>(&self, collection: &str, doc: &D) -> Result<T>
    where
        D: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.upsert_raw(collection, doc).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn upsert_raw<D>(&self, collection: &str, doc: &D) -> Result<Vec<u8>>
    where
        D: Serialize + Sync + ?Sized,
    {
        let mut query = QueryValues::new();
        query.set("action", ImportAction::Upsert.as_str());

        self.request(
            Method::POST,
            &documents_path(collection),
            vec![with_json_body(doc), with_query(query)],
        )
        .await
    }

    /// Fetch a document by id.
    ///
    /// The id is extracted up front; the rest of the document is decoded on
    /// demand through [`FetchedDocument::decode`].
    pub async fn document(&self, collection: &str, id: &str) -> Result<FetchedDocument> {
        let body = self
            .request(Method::GET, &document_path(collection, id), Vec::new())
            .await?;
        Ok(FetchedDocument::from_slice(&body)?)
    }

    pub async fn document_as<T>(&self, collection: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.document(collection, id).await?.decode()?)
    }

    /// Apply a partial update to a document
    pub async fn update_document<D>(&self, collection: &str, id: &str, doc: &D) -> Result<()>
    where
        D: Serialize + Sync + ?Sized,
    {
        self.request(
            Method::PATCH,
            &document_path(collection, id),
            vec![with_json_body(doc)],
        )
        .await?;
        Ok(())
    }

    /// Apply a partial update and decode the updated fields the server returns
    pub async fn update_document_as<D, T>(&self, collection: &str, id: &str, doc: &D) -> Result<T>
    where
        D: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .request(
                Method::PATCH,
                &document_path(collection, id),
                vec![with_json_body(doc)],
            )
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        self.request(Method::DELETE, &document_path(collection, id), Vec::new())
            .await?;
        Ok(())
    }

    /// Delete a document and decode the deleted copy
    pub async fn delete_document_as<T>(&self, collection: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self
            .request(Method::DELETE, &document_path(collection, id), Vec::new())
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Delete every document matching `filter`, returning how many were deleted.
    /// A `batch_size` of 0 leaves batching to the server.
    pub async fn delete_by_query(
        &self,
        collection: &str,
        filter: &str,
        batch_size: u32,
    ) -> Result<u64> {
        let mut query = QueryValues::new();
        query.set("filter_by", filter);
        if batch_size != 0 {
            query.set("batch_size", batch_size.to_string());
        }

        let body = self
            .request(
                Method::DELETE,
                &documents_path(collection),
                vec![with_query(query)],
            )
            .await?;
        let resp: DeleteByQueryResponse = serde_json::from_slice(&body)?;
        Ok(resp.num_deleted)
    }

    /// Import documents in one request, returning one success flag per
    /// document in input order.
    pub async fn import<I, T>(
        &self,
        collection: &str,
        action: Option<ImportAction>,
        docs: I,
    ) -> Result<Vec<bool>>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let results = self.import_results(collection, action, docs).await?;
        Ok(results.iter().map(|r| r.success).collect())
    }

    /// Like [`Client::import`], keeping the server's per-document error details
    pub async fn import_results<I, T>(
        &self,
        collection: &str,
        action: Option<ImportAction>,
        docs: I,
    ) -> Result<Vec<ImportResult>>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let body = encode_json_lines(docs)?;
        self.import_lines(collection, action, body).await
    }

    /// Import a JSON array of documents. Anything other than an array is
    /// rejected with [`ClientError::NotSequence`] before any request is sent.
    pub async fn import_value(
        &self,
        collection: &str,
        action: Option<ImportAction>,
        docs: &serde_json::Value,
    ) -> Result<Vec<bool>> {
        let docs = docs.as_array().ok_or(ClientError::NotSequence)?;
        self.import(collection, action, docs).await
    }

    async fn import_lines(
        &self,
        collection: &str,
        action: Option<ImportAction>,
        lines: Vec<u8>,
    ) -> Result<Vec<ImportResult>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut opts = vec![with_body(lines), with_headers(headers)];
        if let Some(action) = action {
            let mut query = QueryValues::new();
            query.set("action", action.as_str());
            opts.push(with_query(query));
        }

        let body = self
            .request(
                Method::POST,
                &format!("{}/import", documents_path(collection)),
                opts,
            )
            .await?;
        Ok(decode_import_results(&body)?)
    }
}
