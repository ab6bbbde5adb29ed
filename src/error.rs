//! Error types shared by the fetch layer and the statistics pipeline.

use thiserror::Error;

/// Outcome of a failed lookup against one of the remote sources.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response is missing `{path}`")]
    Shape { path: String },

    #[error("entity {entity_id} has no English Wikipedia article")]
    NoEnglishArticle { entity_id: String },

    #[error("Wikipedia page '{title}' has no extract")]
    NoExtract { title: String },
}

impl FetchError {
    pub(crate) fn shape(path: impl Into<String>) -> Self {
        FetchError::Shape { path: path.into() }
    }
}

/// Fatal problems while turning raw statistics records into observations.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("record {index} could not be read: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index} ({area}) has unparseable date '{value}': {source}")]
    InvalidDate {
        index: usize,
        area: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
