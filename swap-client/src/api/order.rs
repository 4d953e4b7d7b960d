//! Order lifecycle operations
//!
//! Transitions are server-authoritative. The client validates only what it
//! can know without a round trip, and never touches the order timeline:
//! entries arrive append-ordered by server-assigned time and are passed
//! through as-is.

use shared::PageResult;
use shared::models::{
    CreateOrderRequest, Order, OrderQuery, Review, ReviewRequest, TransactionType,
};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

/// Order lifecycle operations
#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create an order for a currently-listed product.
    ///
    /// A shipping order must carry the full receiver address; that is
    /// rejected here, before any network call. Product-gone and
    /// buy-your-own-product conflicts are server-detected.
    pub async fn create(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        if request.transaction_type == TransactionType::Ship && !has_full_address(request) {
            return Err(ClientError::Validation(
                "shipping orders require receiver name, phone, and address".to_string(),
            ));
        }

        let order: Order = self.api.post("/api/order", request).await?;
        tracing::debug!(order_no = %order.order_no, "order created");
        Ok(order)
    }

    /// List orders from the buyer or seller perspective.
    pub async fn list(&self, query: &OrderQuery) -> ClientResult<PageResult<Order>> {
        self.api.get_query("/api/order/list", query).await
    }

    /// Fetch one order.
    pub async fn get(&self, id: i64) -> ClientResult<Order> {
        self.api.get(&format!("/api/order/{id}")).await
    }

    /// Cancel an order (buyer side). Only accepted while the order is
    /// still pending delivery; anything else is a state rejection.
    pub async fn cancel(&self, id: i64) -> ClientResult<()> {
        self.api.delete(&format!("/api/order/{id}")).await
    }

    /// Ship the goods or confirm the meet-up (seller side).
    pub async fn deliver(&self, id: i64) -> ClientResult<()> {
        self.api.put_empty(&format!("/api/order/{id}/deliver")).await
    }

    /// Confirm receipt, completing the order (buyer side).
    pub async fn confirm_receive(&self, id: i64) -> ClientResult<()> {
        self.api.put_empty(&format!("/api/order/{id}/confirm")).await
    }

    /// Review a completed order. Accepted once per order; a second
    /// attempt is a conflict rejection.
    pub async fn review(&self, request: &ReviewRequest) -> ClientResult<()> {
        if !(1..=5).contains(&request.rating) {
            return Err(ClientError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        self.api.post("/api/review", request).await
    }

    /// Reviews attached to an order.
    pub async fn reviews_by_order(&self, order_id: i64) -> ClientResult<Vec<Review>> {
        self.api.get(&format!("/api/review/by-order/{order_id}")).await
    }

    /// Reviews written by the current user.
    pub async fn my_reviews(
        &self,
        page_num: i32,
        page_size: i32,
    ) -> ClientResult<PageResult<Review>> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query {
            page_num: i32,
            page_size: i32,
        }

        self.api
            .get_query("/api/review/by-user", &Query { page_num, page_size })
            .await
    }
}

fn has_full_address(request: &CreateOrderRequest) -> bool {
    [
        &request.receiver_name,
        &request.receiver_phone,
        &request.receiver_address,
    ]
    .iter()
    .all(|field| field.as_deref().is_some_and(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address_requires_all_three_fields() {
        let bare = CreateOrderRequest::new(1, TransactionType::Ship);
        assert!(!has_full_address(&bare));

        let partial = CreateOrderRequest {
            receiver_name: Some("Wei".to_string()),
            receiver_phone: Some("  ".to_string()),
            ..CreateOrderRequest::new(1, TransactionType::Ship)
        };
        assert!(!has_full_address(&partial));

        let full = CreateOrderRequest::new(1, TransactionType::Ship).with_address(
            "Wei",
            "13800000000",
            "Dorm 5, Room 301",
        );
        assert!(has_full_address(&full));
    }
}
