//! Order model
//!
//! The order lifecycle is server-authoritative: the client reads the status
//! discriminant and triggers transitions through dedicated endpoints, it
//! never mutates an order locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order status discriminant.
///
/// Owned by the server; values outside the known set round-trip unchanged
/// through [`OrderStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum OrderStatus {
    /// Awaiting payment (not reachable through the current checkout flow)
    #[default]
    PendingPayment,
    /// Paid, waiting for the seller to deliver or confirm the meet-up
    PendingDelivery,
    /// Shipped, waiting for the buyer to confirm receipt
    PendingReceipt,
    /// Terminal: received and confirmed
    Completed,
    /// Terminal: cancelled while still cancellable
    Cancelled,
    /// Discriminant this client version does not know
    Unknown(i32),
}

impl From<i32> for OrderStatus {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::PendingPayment,
            1 => Self::PendingDelivery,
            2 => Self::PendingReceipt,
            3 => Self::Completed,
            4 => Self::Cancelled,
            other => Self::Unknown(other),
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::PendingPayment => 0,
            OrderStatus::PendingDelivery => 1,
            OrderStatus::PendingReceipt => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 4,
            OrderStatus::Unknown(other) => other,
        }
    }
}

impl OrderStatus {
    /// Whether the server will accept a cancel for this status.
    pub fn is_cancellable(self) -> bool {
        self == Self::PendingDelivery
    }

    /// Whether the order has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// How buyer and seller exchange the goods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TransactionType {
    /// Meet in person on campus
    Meet,
    /// Ship to the buyer's address
    Ship,
    /// Seller accepts either
    Either,
}

impl TryFrom<i32> for TransactionType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Meet),
            1 => Ok(Self::Ship),
            2 => Ok(Self::Either),
            other => Err(format!("invalid transaction type: {other}")),
        }
    }
}

impl From<TransactionType> for i32 {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Meet => 0,
            TransactionType::Ship => 1,
            TransactionType::Either => 2,
        }
    }
}

/// Shipping address attached to a shipped order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_address: String,
}

/// Audit entry in the order timeline.
///
/// The sequence is append-only and ordered by server-assigned time; the
/// client never reorders or deduplicates entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub time: String,
    pub content: String,
}

/// Order entity
///
/// Product fields are a snapshot taken at order-creation time, so later
/// edits to the product do not alter historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Server-assigned, unique, opaque
    pub order_no: String,
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub product_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub buyer_id: i64,
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub seller_id: i64,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub quantity: i32,
    /// Amount in currency unit
    #[serde(default)]
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OrderAddress>,
    /// Set only after delivery when shipping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Transitions false -> true exactly once, never back
    #[serde(default)]
    pub has_reviewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

/// Create-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl CreateOrderRequest {
    /// Convenience constructor for a single-quantity order.
    pub fn new(product_id: i64, transaction_type: TransactionType) -> Self {
        Self {
            product_id,
            quantity: 1,
            transaction_type,
            receiver_name: None,
            receiver_phone: None,
            receiver_address: None,
            remark: None,
        }
    }

    /// Attach the shipping address fields.
    pub fn with_address(
        mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.receiver_name = Some(name.into());
        self.receiver_phone = Some(phone.into());
        self.receiver_address = Some(address.into());
        self
    }
}

/// Which side of the order the caller wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderViewType {
    Buyer,
    Seller,
}

/// Order list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<OrderViewType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_num: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
}

/// Create-review request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub order_id: i64,
    /// 1..=5
    pub rating: i32,
    pub comment: String,
}

/// Review read model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub reviewer_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub reviewed_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_name: Option<String>,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_integers() {
        for (code, status) in [
            (0, OrderStatus::PendingPayment),
            (1, OrderStatus::PendingDelivery),
            (2, OrderStatus::PendingReceipt),
            (3, OrderStatus::Completed),
            (4, OrderStatus::Cancelled),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), code.to_string());
            let parsed: OrderStatus = serde_json::from_str(&code.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let parsed: OrderStatus = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, OrderStatus::Unknown(9));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "9");
        assert!(!parsed.is_cancellable());
    }

    #[test]
    fn transaction_type_rejects_out_of_range() {
        assert!(serde_json::from_str::<TransactionType>("3").is_err());
        let ship: TransactionType = serde_json::from_str("1").unwrap();
        assert_eq!(ship, TransactionType::Ship);
    }

    #[test]
    fn only_pending_delivery_is_cancellable() {
        assert!(OrderStatus::PendingDelivery.is_cancellable());
        assert!(!OrderStatus::PendingReceipt.is_cancellable());
        assert!(!OrderStatus::Completed.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn order_tolerates_partial_replies() {
        let order: Order = serde_json::from_str(r#"{"id":7,"orderNo":"ORD7"}"#).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.order_no, "ORD7");
        assert!(!order.has_reviewed);
        assert!(order.timeline.is_empty());
    }
}
