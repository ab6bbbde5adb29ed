use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::fetch::{HttpClient, build_url, fetch_json};
use crate::services::statistics_api::StatisticsApi;

/// Client for the UK coronavirus dashboard `v1/data` endpoint.
pub struct CoronavirusClient<C> {
    http: C,
    base_url: String,
    max_pages: u32,
}

impl<C: HttpClient> CoronavirusClient<C> {
    /// `max_pages` caps how many pages are requested per query; the
    /// dashboard paginates large result sets.
    pub fn new(http: C, base_url: impl Into<String>, max_pages: u32) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            max_pages: max_pages.max(1),
        }
    }
}

/// One page of the `{ data: [...], pagination: { next } }` envelope.
#[derive(Debug, Default)]
pub(crate) struct DataPage {
    pub(crate) records: Vec<Value>,
    pub(crate) has_next: bool,
}

/// Extracts the records of one page. An empty body (HTTP 204) is an empty
/// final page.
pub(crate) fn parse_data_page(body: Value) -> Result<DataPage, FetchError> {
    if body.is_null() {
        return Ok(DataPage::default());
    }

    let has_next = body
        .pointer("/pagination/next")
        .is_some_and(|next| !next.is_null());

    match body {
        Value::Object(mut envelope) => match envelope.remove("data") {
            Some(Value::Array(records)) => Ok(DataPage { records, has_next }),
            _ => Err(FetchError::shape("data")),
        },
        _ => Err(FetchError::shape("data")),
    }
}

fn structure_json(structure: &[(&str, &str)]) -> String {
    let map: Map<String, Value> = structure
        .iter()
        .map(|(name, metric)| (name.to_string(), Value::from(*metric)))
        .collect();
    Value::Object(map).to_string()
}

#[async_trait]
impl<C: HttpClient> StatisticsApi for CoronavirusClient<C> {
    async fn fetch_records(
        &self,
        filters: &str,
        structure: &[(&str, &str)],
    ) -> Result<Vec<Value>, FetchError> {
        let structure = structure_json(structure);
        let mut records = Vec::new();

        for page in 1..=self.max_pages {
            let page_param = page.to_string();
            let url = build_url(
                &self.base_url,
                &[
                    ("filters", filters),
                    ("structure", structure.as_str()),
                    ("page", page_param.as_str()),
                ],
            )?;

            let data = parse_data_page(fetch_json(&self.http, url).await?)?;
            info!(filters, page, records = data.records.len(), "Statistics page fetched");
            records.extend(data.records);

            if !data.has_next {
                break;
            }
            if page == self.max_pages {
                warn!(
                    filters,
                    max_pages = self.max_pages,
                    "More pages available; stopping at page limit"
                );
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Request, Response};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves queued (status, body) pairs in order and records request URLs.
    struct CannedClient {
        responses: Mutex<VecDeque<(u16, String)>>,
        requested: Mutex<Vec<reqwest::Url>>,
    }

    impl CannedClient {
        fn new(responses: Vec<(u16, String)>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn pages_requested(&self) -> Vec<String> {
            self.requested
                .lock()
                .unwrap()
                .iter()
                .map(|url| {
                    url.query_pairs()
                        .find(|(k, _)| k == "page")
                        .map(|(_, v)| v.into_owned())
                        .unwrap_or_default()
                })
                .collect()
        }
    }

    #[async_trait]
    impl HttpClient for CannedClient {
        async fn execute(&self, req: Request) -> reqwest::Result<Response> {
            self.requested.lock().unwrap().push(req.url().clone());
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request");
            let resp = hyper::Response::builder()
                .status(status)
                .body(body)
                .unwrap();
            Ok(Response::from(resp))
        }
    }

    fn page(day: u32, next: Option<&str>) -> (u16, String) {
        let body = json!({
            "data": [{"date": format!("2021-01-{day:02}"), "areaName": "Wales"}],
            "pagination": {"next": next}
        });
        (200, body.to_string())
    }

    fn client(responses: Vec<(u16, String)>, max_pages: u32) -> CoronavirusClient<CannedClient> {
        CoronavirusClient::new(
            CannedClient::new(responses),
            "https://api.example.org/v1/data",
            max_pages,
        )
    }

    #[tokio::test]
    async fn test_paging_stops_at_max_pages() {
        let api = client(
            vec![
                page(1, Some("/v1/data?page=2")),
                page(2, Some("/v1/data?page=3")),
                page(3, None),
            ],
            2,
        );

        let records = api.fetch_records("areaType=nation", &[("date", "date")]).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(api.http.pages_requested(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_paging_follows_next_until_last_page() {
        let api = client(vec![page(1, Some("/v1/data?page=2")), page(2, None)], 5);

        let records = api.fetch_records("areaType=region", &[("date", "date")]).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(api.http.pages_requested(), vec!["1", "2"]);
        let url = api.http.requested.lock().unwrap()[0].clone();
        assert!(url.query_pairs().any(|(k, v)| k == "filters" && v == "areaType=region"));
    }

    #[tokio::test]
    async fn test_no_content_ends_paging() {
        let api = client(vec![page(1, Some("/v1/data?page=2")), (204, String::new())], 5);

        let records = api.fetch_records("areaType=nation", &[("date", "date")]).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(api.http.pages_requested(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_error_status_aborts_fetch() {
        let api = client(vec![(503, String::new())], 3);

        let err = api.fetch_records("areaType=nation", &[("date", "date")]).await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus { status: 503, .. }));
    }

    #[test]
    fn test_parse_page_with_next() {
        let body = json!({
            "length": 2,
            "data": [{"date": "2021-01-01"}, {"date": "2021-01-02"}],
            "pagination": {"current": "/v1/data?page=1", "next": "/v1/data?page=2"}
        });
        let page = parse_data_page(body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.has_next);
    }

    #[test]
    fn test_parse_last_page() {
        let body = json!({"data": [], "pagination": {"next": null}});
        let page = parse_data_page(body).unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_parse_no_content() {
        let page = parse_data_page(Value::Null).unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(
            parse_data_page(json!({"data": {"not": "a list"}})),
            Err(FetchError::Shape { .. })
        ));
        assert!(matches!(parse_data_page(json!([1, 2])), Err(FetchError::Shape { .. })));
    }

    #[test]
    fn test_structure_json() {
        let s = structure_json(&[("date", "date"), ("daily_cases", "newCasesByPublishDate")]);
        let parsed: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(parsed["daily_cases"], "newCasesByPublishDate");
    }
}
