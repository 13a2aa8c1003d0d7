//! Inventory Service Client
//!
//! HTTP bindings to the remote inventory service, organized by resource.

mod category;
mod error;
mod item;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::models::ItemPage;
use crate::table::FilterCriteria;

pub use error::*;

/// Characters escaped inside a single path segment (ids, category names)
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Operations the table coordination layer depends on
#[async_trait(?Send)]
pub trait InventoryApi {
    async fn list_items(&self, criteria: &FilterCriteria) -> Result<ItemPage, ApiError>;
    async fn mark_out_of_stock(&self, id: &str) -> Result<(), ApiError>;
    async fn mark_in_stock(&self, id: &str) -> Result<(), ApiError>;
}

/// Client for every endpoint of the inventory service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send with the shared JSON header; non-2xx becomes `ApiError::Status`
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "inventory service rejected request");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and discard any body
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[async_trait(?Send)]
impl InventoryApi for ApiClient {
    async fn list_items(&self, criteria: &FilterCriteria) -> Result<ItemPage, ApiError> {
        ApiClient::list_items(self, criteria).await
    }

    async fn mark_out_of_stock(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::mark_out_of_stock(self, id).await
    }

    async fn mark_in_stock(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::mark_in_stock(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client = ApiClient::new("http://localhost:9090/");
        assert_eq!(client.base_url(), "http://localhost:9090");
        assert_eq!(client.url("/items"), "http://localhost:9090/items");
    }

    #[test]
    fn test_encode_segment_escapes_reserved() {
        assert_eq!(encode_segment("Frozen Food"), "Frozen%20Food");
        assert_eq!(encode_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(encode_segment("plain-id_42"), "plain-id_42");
    }
}
