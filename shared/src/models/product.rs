//! Product model

use serde::{Deserialize, Serialize};

/// Product status discriminant (catalog-owned).
///
/// The order lifecycle references product status but never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ProductStatus {
    /// Waiting for an admin review decision
    #[default]
    PendingReview,
    /// Listed and purchasable
    Listed,
    /// Taken down by the seller
    Unlisted,
    /// Sold through a completed or in-flight order
    Sold,
    /// Rejected by the admin review
    Rejected,
    /// Discriminant this client version does not know
    Unknown(i32),
}

impl From<i32> for ProductStatus {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::PendingReview,
            1 => Self::Listed,
            2 => Self::Unlisted,
            3 => Self::Sold,
            4 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }
}

impl From<ProductStatus> for i32 {
    fn from(value: ProductStatus) -> Self {
        match value {
            ProductStatus::PendingReview => 0,
            ProductStatus::Listed => 1,
            ProductStatus::Unlisted => 2,
            ProductStatus::Sold => 3,
            ProductStatus::Rejected => 4,
            ProductStatus::Unknown(other) => other,
        }
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in currency unit
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<i32>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub favorite_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Catalog sort orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSort {
    Latest,
    PriceAsc,
    PriceDesc,
    Hot,
}

/// Product list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<ProductSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
}

/// Publish / update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishProductRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub images: Vec<String>,
    pub category_id: i64,
    pub condition: String,
    pub transaction_type: i32,
}
