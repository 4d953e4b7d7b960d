//! Admin console operations
//!
//! Elevated operations gated by the session role. Every method checks the
//! role locally and rejects before issuing a request when the caller is
//! not an admin. This only saves a round trip; the server enforces the
//! same rule on its side.

use shared::PageResult;
use shared::models::{
    AdminOrderQuery, AdminProduct, AdminProductQuery, AdminUser, AdminUserQuery, CategoryDistribution,
    CategoryForm, CategoryNode, DashboardStats, DepartmentStats, Order, ProductReviewRequest,
    ProductStats, RankItem, StatsQuery, TradeMethodStats, TradeStats, UserStats,
};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

/// Admin review console operations
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn ensure_admin(&self) -> ClientResult<()> {
        if !self.api.session().role().is_admin() {
            return Err(ClientError::Authorization(
                "admin role required".to_string(),
            ));
        }
        Ok(())
    }

    // ==================== Dashboard ====================

    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.ensure_admin()?;
        self.api.get("/api/admin/stats/dashboard").await
    }

    // ==================== User management ====================

    pub async fn users(&self, query: &AdminUserQuery) -> ClientResult<PageResult<AdminUser>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/users", query).await
    }

    pub async fn user(&self, id: i64) -> ClientResult<AdminUser> {
        self.ensure_admin()?;
        self.api.get(&format!("/api/admin/users/{id}")).await
    }

    /// Enable or disable an account.
    pub async fn set_user_status(&self, id: i64, status: i32) -> ClientResult<()> {
        self.ensure_admin()?;

        #[derive(serde::Serialize)]
        struct Body {
            status: i32,
        }

        self.api
            .put(&format!("/api/admin/users/{id}/status"), &Body { status })
            .await
    }

    // ==================== Product review ====================

    /// Products waiting for a review decision.
    pub async fn pending_products(
        &self,
        query: &AdminProductQuery,
    ) -> ClientResult<PageResult<AdminProduct>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/products/pending", query).await
    }

    /// All products, any status.
    pub async fn products(
        &self,
        query: &AdminProductQuery,
    ) -> ClientResult<PageResult<AdminProduct>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/products", query).await
    }

    /// Approve or reject one product.
    pub async fn review_product(&self, request: &ProductReviewRequest) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api.post("/api/admin/products/review", request).await
    }

    /// Approve or reject a batch of products.
    pub async fn batch_review(&self, requests: &[ProductReviewRequest]) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api
            .post("/api/admin/products/review/batch", &requests)
            .await
    }

    /// Remove a product from the marketplace.
    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api.delete(&format!("/api/admin/products/{id}")).await
    }

    // ==================== Order oversight ====================

    pub async fn orders(&self, query: &AdminOrderQuery) -> ClientResult<PageResult<Order>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/orders", query).await
    }

    pub async fn order(&self, id: i64) -> ClientResult<Order> {
        self.ensure_admin()?;
        self.api.get(&format!("/api/admin/orders/{id}")).await
    }

    // ==================== Category management ====================

    pub async fn category_tree(&self) -> ClientResult<Vec<CategoryNode>> {
        self.ensure_admin()?;
        self.api.get("/api/admin/categories/tree").await
    }

    pub async fn categories(&self) -> ClientResult<Vec<CategoryNode>> {
        self.ensure_admin()?;
        self.api.get("/api/admin/categories").await
    }

    pub async fn create_category(&self, form: &CategoryForm) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api.post("/api/admin/categories", form).await
    }

    pub async fn update_category(&self, id: i64, form: &CategoryForm) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api.put(&format!("/api/admin/categories/{id}"), form).await
    }

    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.ensure_admin()?;
        self.api.delete(&format!("/api/admin/categories/{id}")).await
    }

    pub async fn set_category_status(&self, id: i64, status: i32) -> ClientResult<()> {
        self.ensure_admin()?;

        #[derive(serde::Serialize)]
        struct Body {
            status: i32,
        }

        self.api
            .put(
                &format!("/api/admin/categories/{id}/status"),
                &Body { status },
            )
            .await
    }

    // ==================== Statistics reports ====================

    pub async fn user_stats(&self, query: &StatsQuery) -> ClientResult<Vec<UserStats>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/stats/users", query).await
    }

    pub async fn department_stats(&self) -> ClientResult<Vec<DepartmentStats>> {
        self.ensure_admin()?;
        self.api.get("/api/admin/stats/departments").await
    }

    pub async fn product_stats(&self, query: &StatsQuery) -> ClientResult<Vec<ProductStats>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/stats/products", query).await
    }

    pub async fn category_distribution(&self) -> ClientResult<Vec<CategoryDistribution>> {
        self.ensure_admin()?;
        self.api.get("/api/admin/stats/categories").await
    }

    pub async fn trade_stats(&self, query: &StatsQuery) -> ClientResult<Vec<TradeStats>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/stats/trades", query).await
    }

    pub async fn trade_method_stats(
        &self,
        query: &StatsQuery,
    ) -> ClientResult<Vec<TradeMethodStats>> {
        self.ensure_admin()?;
        self.api
            .get_query("/api/admin/stats/trade-methods", query)
            .await
    }

    pub async fn buyer_rank(&self, query: &StatsQuery) -> ClientResult<Vec<RankItem>> {
        self.ensure_admin()?;
        self.api.get_query("/api/admin/stats/rank/buyers", query).await
    }

    pub async fn seller_rank(&self, query: &StatsQuery) -> ClientResult<Vec<RankItem>> {
        self.ensure_admin()?;
        self.api
            .get_query("/api/admin/stats/rank/sellers", query)
            .await
    }

    pub async fn hot_products(&self, query: &StatsQuery) -> ClientResult<Vec<AdminProduct>> {
        self.ensure_admin()?;
        self.api
            .get_query("/api/admin/stats/hot-products", query)
            .await
    }
}
