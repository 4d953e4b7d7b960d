//! Network transport - reqwest-based HTTP calls

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::transport::{ApiRequest, HttpTransport, RawReply};

/// Network transport for making requests to the marketplace server
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: reqwest::Client,
    base_url: String,
}

impl NetworkTransport {
    /// Create a network transport from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for NetworkTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<RawReply> {
        let mut url = format!("{}{}", self.base_url, request.path);
        if let Some(query) = &request.query {
            url.push('?');
            url.push_str(query);
        }

        let mut req = self.client.request(request.method, &url);
        if let Some(token) = &request.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(RawReply { status, body })
    }
}
