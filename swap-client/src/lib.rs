//! Swap Client - HTTP client for the campus-swap marketplace API
//!
//! Provides session management, a single request gateway with envelope
//! unwrapping and authentication teardown, and typed services for the
//! order lifecycle, catalog, and admin console.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod session;

pub use api::{AdminService, AuthService, CatalogService, OrderService};
pub use client::{SwapClient, SwapClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use event::{ClientEvent, EventBus, NoticeLevel};
pub use session::{SessionStore, SessionStoreError};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
pub use shared::models::{
    CreateOrderRequest, Order, OrderQuery, OrderStatus, Product, ProductQuery, ReviewRequest,
    TransactionType, UserInfo, UserRole,
};
pub use shared::{ApiResponse, PageResult};
