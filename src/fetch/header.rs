use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that adds a header to every request that does
/// not already carry it.
///
/// The SPARQL endpoint picks its response format from `Accept`, so the
/// knowledge-graph client is wrapped with [`DefaultHeader::accept_json`].
pub struct DefaultHeader<C> {
    inner: C,
    name: HeaderName,
    value: HeaderValue,
}

impl<C> DefaultHeader<C> {
    pub fn new(inner: C, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("invalid header name '{name}'"))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header '{name}'"))?;
        Ok(Self { inner, name, value })
    }

    /// `Accept: application/json`.
    pub fn accept_json(inner: C) -> Self {
        Self {
            inner,
            name: ACCEPT,
            value: HeaderValue::from_static("application/json"),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for DefaultHeader<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .entry(self.name.clone())
            .or_insert_with(|| self.value.clone());
        self.inner.execute(req).await
    }
}
