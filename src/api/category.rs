//! Category Endpoints

use serde::Serialize;

use crate::models::Category;

use super::{encode_segment, ApiClient, ApiError};

#[derive(Serialize)]
struct CreateCategoryArgs<'a> {
    #[serde(rename = "categoryName")]
    category_name: &'a str,
}

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.http.get(self.url("/categories"));
        self.send_json(request).await
    }

    pub async fn get_category(&self, name: &str) -> Result<Category, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/categories/{}", encode_segment(name))));
        self.send_json(request).await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        let request = self
            .http
            .post(self.url("/categories"))
            .json(&CreateCategoryArgs { category_name: name });
        self.send_json(request).await
    }
}
