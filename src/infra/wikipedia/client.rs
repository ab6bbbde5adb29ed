use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::fetch::{HttpClient, build_url, fetch_json};
use crate::services::knowledge_api::Encyclopedia;

/// MediaWiki `query&prop=extracts` lookups against English Wikipedia.
pub struct WikipediaClient<C> {
    http: C,
    api_url: String,
}

impl<C: HttpClient> WikipediaClient<C> {
    pub fn new(http: C, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }
}

pub(crate) fn parse_extract(body: &Value, title: &str) -> Result<String, FetchError> {
    let pages = body
        .pointer("/query/pages")
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::shape("query.pages"))?;

    pages
        .values()
        .next()
        .and_then(|page| page.get("extract"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FetchError::NoExtract {
            title: title.to_string(),
        })
}

#[async_trait]
impl<C: HttpClient> Encyclopedia for WikipediaClient<C> {
    async fn intro(&self, title: &str) -> Result<String, FetchError> {
        let url = build_url(
            &self.api_url,
            &[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", ""),
                ("explaintext", ""),
                ("titles", title),
                ("format", "json"),
            ],
        )?;

        parse_extract(&fetch_json(&self.http, url).await?, title)
    }
}
