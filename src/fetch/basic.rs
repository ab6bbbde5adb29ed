use super::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::HttpConfig;

/// Plain `reqwest` client with the configured timeouts and user agent.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .build()
            .context("building reqwest client")?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
