//! Shared types for the campus-swap marketplace client
//!
//! Common types used across the client crates: the API response envelope,
//! pagination, domain models, and request/response DTOs.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use response::{ApiResponse, PageResult};
pub use serde::{Deserialize, Serialize};
