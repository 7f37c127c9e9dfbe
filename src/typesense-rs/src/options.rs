//! Composable request options.
//!
//! An option mutates a [`PendingRequest`] before it is sent. Options run in
//! the order given and the first failure aborts the request, so later options
//! win where they overlap (a body option always replaces an earlier body).

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use std::time::Duration;
use typesense_core::QueryValues;

use crate::Result;

/// A request under construction
#[derive(Debug)]
pub struct PendingRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl PendingRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }
}

pub type RequestOption<'a> = Box<dyn FnOnce(&mut PendingRequest) -> Result<()> + Send + 'a>;

/// Add headers. Values are appended to any already present under the same name.
pub fn with_headers(headers: HeaderMap) -> RequestOption<'static> {
    Box::new(move |req| {
        for (name, value) in headers.iter() {
            req.headers.append(name.clone(), value.clone());
        }
        Ok(())
    })
}

/// Replace the query string.
pub fn with_query(values: QueryValues) -> RequestOption<'static> {
    Box::new(move |req| {
        let encoded = values.encode();
        if encoded.is_empty() {
            req.url.set_query(None);
        } else {
            req.url.set_query(Some(&encoded));
        }
        Ok(())
    })
}

/// Replace the body.
pub fn with_body(body: impl Into<Vec<u8>>) -> RequestOption<'static> {
    let body = body.into();
    Box::new(move |req| {
        req.body = Some(body);
        Ok(())
    })
}

/// Replace the body with `value` encoded as JSON.
///
/// Encoding happens when the option is applied, not when it is created. A
/// value that encodes to JSON `null` (such as `None`) leaves the request
/// untouched: no body and no `Content-Type`.
pub fn with_json_body<'a, T>(value: &'a T) -> RequestOption<'a>
where
    T: Serialize + Sync + ?Sized,
{
    Box::new(move |req| {
        let body = serde_json::to_vec(value)?;
        if body == b"null" {
            return Ok(());
        }
        req.headers
            .append(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req.body = Some(body);
        Ok(())
    })
}

/// Fail the request if it has not completed within `timeout`.
pub fn with_timeout(timeout: Duration) -> RequestOption<'static> {
    Box::new(move |req| {
        req.timeout = Some(timeout);
        Ok(())
    })
}
