//! Catalog operations
//!
//! Thin CRUD over the product and category endpoints. No lifecycle state
//! lives here; listing decisions belong to the server-side review flow.

use shared::PageResult;
use shared::models::{Category, Product, ProductQuery, ProductStatus, PublishProductRequest};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// Product catalog operations
#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Browsable categories
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.api.get("/api/category/list").await
    }

    /// Search the catalog
    pub async fn list(&self, query: &ProductQuery) -> ClientResult<PageResult<Product>> {
        self.api.get_query("/api/product/list", query).await
    }

    /// Fetch one product
    pub async fn get(&self, id: i64) -> ClientResult<Product> {
        self.api.get(&format!("/api/product/{id}")).await
    }

    /// Publish a product; it enters the review queue and returns its id.
    pub async fn publish(&self, request: &PublishProductRequest) -> ClientResult<i64> {
        self.api.post("/api/product", request).await
    }

    /// Update a product the current user owns.
    pub async fn update(&self, id: i64, request: &PublishProductRequest) -> ClientResult<()> {
        self.api.put(&format!("/api/product/{id}"), request).await
    }

    /// Delete a product the current user owns.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/product/{id}")).await
    }

    /// Favorite or unfavorite a product.
    pub async fn set_favorite(&self, id: i64, favorite: bool) -> ClientResult<()> {
        let path = format!("/api/product/{id}/favorite");
        if favorite {
            self.api.post_empty(&path).await
        } else {
            self.api.delete(&path).await
        }
    }

    /// Products published by the current user.
    pub async fn my_products(
        &self,
        page_num: i32,
        page_size: i32,
        status: Option<ProductStatus>,
    ) -> ClientResult<PageResult<Product>> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query {
            page_num: i32,
            page_size: i32,
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<ProductStatus>,
        }

        self.api
            .get_query(
                "/api/product/my",
                &Query {
                    page_num,
                    page_size,
                    status,
                },
            )
            .await
    }

    /// List or unlist a product the current user owns.
    pub async fn set_status(&self, id: i64, status: ProductStatus) -> ClientResult<()> {
        #[derive(serde::Serialize)]
        struct Query {
            status: ProductStatus,
        }

        self.api
            .put_query(&format!("/api/product/{id}/status"), &Query { status })
            .await
    }

    /// The current user's favorites.
    pub async fn favorites(
        &self,
        page_num: i32,
        page_size: i32,
    ) -> ClientResult<PageResult<Product>> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query {
            page_num: i32,
            page_size: i32,
        }

        self.api
            .get_query("/api/product/favorite", &Query { page_num, page_size })
            .await
    }
}
