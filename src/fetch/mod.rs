mod basic;
mod client;
mod header;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use header::DefaultHeader;

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

/// Builds `base?k=v&...`, percent-encoding the parameters.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    Url::parse_with_params(base, params).map_err(|source| FetchError::InvalidUrl {
        url: base.to_string(),
        source,
    })
}

/// Issues a GET and returns the body of a successful response.
///
/// # Errors
///
/// [`FetchError::Transport`] when the request cannot be completed and
/// [`FetchError::HttpStatus`] for any non-2xx status.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: Url,
) -> Result<Vec<u8>, FetchError> {
    let url_str = url.to_string();
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .map_err(|source| FetchError::Transport {
            url: url_str.clone(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url_str,
        });
    }

    let bytes = resp.bytes().await.map_err(|source| FetchError::Transport {
        url: url_str.clone(),
        source,
    })?;
    debug!(url = %url_str, status = status.as_u16(), bytes = bytes.len(), "Response received");

    Ok(bytes.to_vec())
}

/// Issues a GET and decodes the body as JSON. An empty body (HTTP 204)
/// decodes to [`Value::Null`].
pub async fn fetch_json<C: HttpClient + ?Sized>(client: &C, url: Url) -> Result<Value, FetchError> {
    let url_str = url.to_string();
    let bytes = fetch_bytes(client, url).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
        url: url_str,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_params() {
        let url = build_url(
            "https://api.example.org/v1/data",
            &[("filters", "areaType=nation"), ("structure", r#"{"date":"date"}"#)],
        )
        .unwrap();

        assert_eq!(url.host_str(), Some("api.example.org"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("filters".to_string(), "areaType=nation".to_string()));
        assert_eq!(pairs[1].1, r#"{"date":"date"}"#);
    }

    #[test]
    fn test_build_url_rejects_relative_base() {
        let err = build_url("not a url", &[]).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
