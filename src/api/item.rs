//! Item Endpoints
//!
//! `/items` collection, single-item CRUD, stock flips and metrics.

use crate::models::{InventoryMetricsReport, Item, ItemPage, ItemPayload};
use crate::table::FilterCriteria;

use super::{encode_segment, ApiClient, ApiError};

impl ApiClient {
    /// `GET /items` with the criteria encoded as query parameters
    pub async fn list_items(&self, criteria: &FilterCriteria) -> Result<ItemPage, ApiError> {
        let request = self
            .http
            .get(self.url("/items"))
            .query(&criteria.query_pairs());
        self.send_json(request).await
    }

    pub async fn get_item(&self, id: &str) -> Result<Item, ApiError> {
        let request = self.http.get(self.url(&format!("/items/{}", encode_segment(id))));
        self.send_json(request).await
    }

    pub async fn create_item(&self, payload: &ItemPayload) -> Result<Item, ApiError> {
        let request = self.http.post(self.url("/items")).json(payload);
        self.send_json(request).await
    }

    pub async fn update_item(&self, id: &str, payload: &ItemPayload) -> Result<Item, ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/items/{}", encode_segment(id))))
            .json(payload);
        self.send_json(request).await
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let request = self.http.delete(self.url(&format!("/items/{}", encode_segment(id))));
        self.send_empty(request).await
    }

    pub async fn mark_out_of_stock(&self, id: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/items/{}/outofstock", encode_segment(id))));
        self.send_empty(request).await
    }

    pub async fn mark_in_stock(&self, id: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/items/{}/instock", encode_segment(id))));
        self.send_empty(request).await
    }

    pub async fn get_metrics(&self) -> Result<InventoryMetricsReport, ApiError> {
        let request = self.http.get(self.url("/items/metrics"));
        self.send_json(request).await
    }
}
