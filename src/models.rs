//! Frontend Models
//!
//! Data structures matching the remote inventory service's JSON.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category reference (its name is also its key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "categoryName")]
    pub name: String,
}

/// Stock-keeping item as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub unit_price: Decimal,
    /// Units on hand (the service calls this `inStock`)
    #[serde(rename = "inStock")]
    pub stock: u32,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

impl Item {
    /// Expiration as an instant (start of day, UTC)
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Body of create/update item requests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub name: String,
    pub category_name: String,
    pub unit_price: Decimal,
    pub in_stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_elements: u64,
    pub total_pages: u32,
}

/// One server page of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub content: Vec<Item>,
    pub page: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    pub total_products_in_stock: u64,
    pub total_value_in_stock: Decimal,
    pub average_price_in_stock: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetrics {
    pub category_name: String,
    pub total_products_in_stock: u64,
    pub total_value_in_stock: Decimal,
    pub average_price_in_stock: Decimal,
}

/// Pre-aggregated report rendered by the metrics panel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMetricsReport {
    #[serde(default)]
    pub overall_metrics: OverallMetrics,
    #[serde(default)]
    pub category_metrics: Vec<CategoryMetrics>,
}
