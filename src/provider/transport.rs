//! HTTP transport seam between the provider and the network.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::Result;

/// Status and body of a finished request; status handling is up to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Issues a GET request for a fully assembled URL.
pub trait Transport: Send + Sync {
    fn get(&self, url: Url) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// `reqwest` backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
