//! Request gateway and transports
//!
//! A single outbound path for every API call: transports move bytes, the
//! gateway attaches credentials, unwraps the response envelope, and reacts
//! to authentication failures.

mod gateway;
mod network;
#[cfg(feature = "in-process")]
mod oneshot;
mod transport;

pub use gateway::ApiClient;
pub use network::NetworkTransport;
#[cfg(feature = "in-process")]
pub use oneshot::OneshotTransport;
pub use transport::{ApiRequest, HttpTransport, RawReply};
