// swap-client/tests/client_integration.rs
//
// Drives the real gateway and services against in-process axum routers
// through the oneshot transport.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::Query;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{Value, json};

use shared::models::{
    CreateOrderRequest, OrderQuery, OrderStatus, OrderViewType, ReviewRequest, TransactionType,
    UserInfo, UserRole,
};
use shared::{ApiResponse, PageResult};
use swap_client::{ClientError, ClientEvent, NoticeLevel, SwapClient};

fn sample_user(role: UserRole) -> UserInfo {
    UserInfo {
        id: 1,
        username: "wei".to_string(),
        role,
        nickname: None,
        email: None,
        phone: None,
        department: None,
        avatar: None,
    }
}

fn client_over(router: Router) -> SwapClient {
    SwapClient::builder()
        .router(router)
        .build()
        .expect("in-process client builds")
}

/// Drain every event currently queued on a subscription.
fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ==================== Envelope unwrapping ====================

#[tokio::test]
async fn create_order_unwraps_the_legacy_200_envelope() {
    let router = Router::new().route(
        "/api/order",
        post(|| async {
            Json(json!({
                "code": 200,
                "data": {"id": 7, "orderNo": "ORD7"}
            }))
        }),
    );

    let client = client_over(router);
    let request = CreateOrderRequest::new(3, TransactionType::Meet);
    let order = client.orders().create(&request).await.unwrap();

    // the caller sees the unwrapped payload, no enclosing envelope
    assert_eq!(order.id, 7);
    assert_eq!(order.order_no, "ORD7");
}

#[tokio::test]
async fn zero_success_code_unwraps_identically() {
    let router = Router::new().route(
        "/api/order/{id}",
        get(|| async {
            Json(json!({
                "code": 0,
                "message": "success",
                "data": {
                    "id": 9,
                    "orderNo": "ORD9",
                    "status": 2,
                    "timeline": [
                        {"time": "2026-08-01 10:00:00", "content": "order created"},
                        {"time": "2026-08-02 09:30:00", "content": "seller shipped"}
                    ]
                }
            }))
        }),
    );

    let client = client_over(router);
    let order = client.orders().get(9).await.unwrap();

    assert_eq!(order.status, OrderStatus::PendingReceipt);
    // timeline order is preserved exactly as the server sent it
    assert_eq!(order.timeline.len(), 2);
    assert_eq!(order.timeline[0].content, "order created");
    assert_eq!(order.timeline[1].content, "seller shipped");
}

#[tokio::test]
async fn void_replies_deserialize_from_null_data() {
    let router = Router::new().route(
        "/api/order/{id}/confirm",
        put(|| async { Json(ApiResponse::<Value>::ok_empty()) }),
    );

    let client = client_over(router);
    client.orders().confirm_receive(4).await.unwrap();
}

// ==================== Credential attachment ====================

#[tokio::test]
async fn bearer_token_is_attached_after_login() {
    let router = Router::new()
        .route(
            "/api/user/login",
            post(|| async {
                Json(json!({
                    "code": 0,
                    "message": "success",
                    "data": {
                        "token": "tok-123",
                        "user": {"id": 1, "username": "wei", "role": "user"}
                    }
                }))
            }),
        )
        .route(
            "/api/user/info",
            get(|headers: http::HeaderMap| async move {
                let auth = headers
                    .get(http::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                // echo the credential back through the nickname field
                Json(json!({
                    "code": 0,
                    "message": "success",
                    "data": {"id": 1, "username": "wei", "role": "user", "nickname": auth}
                }))
            }),
        );

    let client = client_over(router);
    let login = client.auth().login("wei", "secret").await.unwrap();
    assert_eq!(login.token, "tok-123");
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().user().unwrap().username, "wei");

    let user = client.auth().fetch_user_info().await.unwrap();
    assert_eq!(user.nickname.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn logged_out_requests_go_out_unauthenticated() {
    let router = Router::new().route(
        "/api/category/list",
        get(|headers: http::HeaderMap| async move {
            assert!(headers.get(http::header::AUTHORIZATION).is_none());
            Json(ApiResponse::ok(Vec::<Value>::new()))
        }),
    );

    let client = client_over(router);
    let categories = client.catalog().categories().await.unwrap();
    assert!(categories.is_empty());
}

// ==================== Pre-dispatch validation ====================

#[tokio::test]
async fn ship_order_without_address_fails_without_a_network_call() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/order",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(ApiResponse::<Value>::ok_empty())
            }
        }),
    );

    let client = client_over(router);
    let request = CreateOrderRequest::new(3, TransactionType::Ship);
    let err = client.orders().create(&request).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn out_of_range_rating_fails_without_a_network_call() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/review",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(ApiResponse::<Value>::ok_empty())
            }
        }),
    );

    let client = client_over(router);
    for rating in [0, 6] {
        let request = ReviewRequest {
            order_id: 7,
            rating,
            comment: "great".to_string(),
        };
        let err = client.orders().review(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

// ==================== Failure classification ====================

#[tokio::test]
async fn business_failure_notifies_and_leaves_the_session_alone() {
    let router = Router::new().route(
        "/api/order",
        post(|| async { Json(ApiResponse::<Value>::error(500, "product is not on sale")) }),
    );

    let client = client_over(router);
    client.session().set_login("tok", sample_user(UserRole::User));
    let mut events = client.subscribe();

    let request = CreateOrderRequest::new(3, TransactionType::Meet);
    let err = client.orders().create(&request).await.unwrap_err();

    match err {
        ClientError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "product is not on sale");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    // the failure was surfaced, the session untouched
    assert_eq!(
        drain_events(&mut events),
        vec![ClientEvent::Notice {
            level: NoticeLevel::Error,
            message: "product is not on sale".to_string(),
        }]
    );
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn cancel_on_a_finished_order_is_a_state_rejection() {
    let router = Router::new().route(
        "/api/order/{id}",
        delete(|| async { Json(ApiResponse::<Value>::error(422, "order can no longer be cancelled")) }),
    );

    let client = client_over(router);
    let err = client.orders().cancel(9).await.unwrap_err();
    assert!(matches!(err, ClientError::State(_)));
}

#[tokio::test]
async fn second_review_is_a_conflict_and_first_still_counts() {
    let reviews = Arc::new(AtomicUsize::new(0));
    let counter = reviews.clone();
    let router = Router::new().route(
        "/api/review",
        post(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Json(ApiResponse::<Value>::ok_empty())
                } else {
                    Json(ApiResponse::<Value>::error(409, "order already reviewed"))
                }
            }
        }),
    );

    let client = client_over(router);
    let request = ReviewRequest {
        order_id: 7,
        rating: 5,
        comment: "great seller".to_string(),
    };

    client.orders().review(&request).await.unwrap();
    let err = client.orders().review(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn deliver_by_a_non_seller_is_an_authorization_rejection() {
    let router = Router::new().route(
        "/api/order/{id}/deliver",
        put(|| async { Json(ApiResponse::<Value>::error(403, "not the seller of this order")) }),
    );

    let client = client_over(router);
    client.session().set_login("tok", sample_user(UserRole::User));

    let err = client.orders().deliver(9).await.unwrap_err();
    assert!(matches!(err, ClientError::Authorization(_)));
    // an authorization rejection is not an authentication failure
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn unavailable_product_is_a_conflict_on_create() {
    let router = Router::new().route(
        "/api/order",
        post(|| async { Json(ApiResponse::<Value>::error(409, "product already sold")) }),
    );

    let client = client_over(router);
    let request = CreateOrderRequest::new(3, TransactionType::Meet);
    let err = client.orders().create(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

// ==================== Authentication teardown ====================

#[tokio::test]
async fn envelope_401_tears_the_session_down_exactly_once() {
    let router = Router::new().route(
        "/api/order/{id}",
        get(|| async { Json(ApiResponse::<Value>::error(401, "token invalid or expired")) }),
    );

    let client = client_over(router);
    client.session().set_login("tok", sample_user(UserRole::User));
    let mut events = client.subscribe();

    let err = client.orders().get(7).await.unwrap_err();

    assert!(matches!(err, ClientError::Authentication(_)));
    assert!(client.session().token().is_none());
    assert!(client.session().user().is_none());

    let events = drain_events(&mut events);
    let expired = events
        .iter()
        .filter(|e| **e == ClientEvent::SessionExpired)
        .count();
    assert_eq!(expired, 1);
}

#[tokio::test]
async fn concurrent_401s_emit_a_single_redirect() {
    let router = Router::new().route(
        "/api/order/{id}",
        get(|| async { Json(ApiResponse::<Value>::error(401, "token invalid or expired")) }),
    );

    let client = client_over(router);
    client.session().set_login("tok", sample_user(UserRole::User));
    let mut events = client.subscribe();

    let orders = client.orders();
    let (first, second) = tokio::join!(orders.get(1), orders.get(2));
    assert!(matches!(first.unwrap_err(), ClientError::Authentication(_)));
    assert!(matches!(second.unwrap_err(), ClientError::Authentication(_)));

    // both calls reject, but the store empties exactly once
    assert!(!client.session().is_authenticated());
    let events = drain_events(&mut events);
    let expired = events
        .iter()
        .filter(|e| **e == ClientEvent::SessionExpired)
        .count();
    assert_eq!(expired, 1);
}

#[tokio::test]
async fn transport_status_401_also_tears_down() {
    let router = Router::new().route(
        "/api/user/info",
        get(|| async { (StatusCode::UNAUTHORIZED, "unauthorized") }),
    );

    let client = client_over(router);
    client.session().set_login("tok", sample_user(UserRole::User));

    let err = client.auth().fetch_user_info().await.unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn teardown_removes_the_durable_entries_too() {
    let tmp = tempfile::TempDir::new().unwrap();
    let router = Router::new().route(
        "/api/order/{id}",
        get(|| async { Json(ApiResponse::<Value>::error(401, "token invalid or expired")) }),
    );

    let client = SwapClient::builder()
        .router(router)
        .data_dir(tmp.path())
        .build()
        .unwrap();
    client.session().set_login("tok", sample_user(UserRole::User));

    client.orders().get(7).await.unwrap_err();

    // a fresh store over the same directory sees a logged-out session
    let reopened = swap_client::SessionStore::load(tmp.path()).unwrap();
    assert!(!reopened.is_authenticated());
}

#[tokio::test]
async fn transport_failure_notifies_and_keeps_the_session() {
    // nothing listens on the discard port; the connect fails immediately
    let client = SwapClient::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(2)
        .build()
        .unwrap();
    client.session().set_login("tok", sample_user(UserRole::User));
    let mut events = client.subscribe();

    let err = client.orders().get(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(client.session().is_authenticated());
    let events = drain_events(&mut events);
    assert!(matches!(
        events.as_slice(),
        [ClientEvent::Notice {
            level: NoticeLevel::Error,
            ..
        }]
    ));
}

// ==================== Admin gating ====================

#[tokio::test]
async fn admin_calls_reject_locally_for_regular_users() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/admin/stats/dashboard",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(ApiResponse::ok(json!({
                    "userCount": 10,
                    "productCount": 20,
                    "orderCount": 5,
                    "totalAmount": 123.5,
                    "pendingReviewCount": 2
                })))
            }
        }),
    );

    let client = client_over(router);

    // logged out: least-privileged role applies
    let err = client.admin().dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Authorization(_)));

    client.session().set_login("tok", sample_user(UserRole::User));
    let err = client.admin().dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Authorization(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    // admins go through
    client.session().set_login("tok", sample_user(UserRole::Admin));
    let stats = client.admin().dashboard_stats().await.unwrap();
    assert_eq!(stats.pending_review_count, 2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

// ==================== Query encoding ====================

#[tokio::test]
async fn order_list_sends_typed_query_parameters() {
    let router = Router::new().route(
        "/api/order/list",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let expected = [
                ("viewType", "buyer"),
                ("status", "1"),
                ("startDate", "2026-08-01"),
                ("pageNum", "1"),
                ("pageSize", "10"),
            ];
            for (key, value) in expected {
                if params.get(key).map(String::as_str) != Some(value) {
                    return Json(ApiResponse::<Value>::error(500, format!("bad query: {key}")));
                }
            }
            Json(ApiResponse::ok(
                serde_json::to_value(PageResult::<Value>::new(vec![], 0, 1, 10)).unwrap(),
            ))
        }),
    );

    let client = client_over(router);
    let query = OrderQuery {
        view_type: Some(OrderViewType::Buyer),
        status: Some(OrderStatus::PendingDelivery),
        start_date: Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),
        page_num: Some(1),
        page_size: Some(10),
        ..Default::default()
    };

    let page = client.orders().list(&query).await.unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.page_num, 1);
}
