use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;
use crate::fetch::{HttpClient, build_url, fetch_json};
use crate::services::knowledge_api::{Entity, KnowledgeGraph, Recipient};

/// Wikidata SPARQL endpoint plus the `wbgetentities` action API.
pub struct WikidataClient<C> {
    http: C,
    sparql_url: String,
    api_url: String,
}

impl<C: HttpClient> WikidataClient<C> {
    pub fn new(http: C, sparql_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http,
            sparql_url: sparql_url.into(),
            api_url: api_url.into(),
        }
    }
}

/// Humans (`wdt:P166` award received) holding `award_id`, labelled.
fn recipients_query(award_id: &str) -> String {
    format!(
        r#"SELECT ?human ?humanLabel WHERE {{
  ?human wdt:P166 wd:{award_id} .
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "[AUTO_LANGUAGE],en". }}
}}"#
    )
}

pub(crate) fn parse_bindings(body: &Value) -> Result<Vec<Recipient>, FetchError> {
    let bindings = body
        .pointer("/results/bindings")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::shape("results.bindings"))?;

    bindings
        .iter()
        .map(|b| {
            let entity_uri = b.pointer("/human/value").and_then(Value::as_str);
            let label = b.pointer("/humanLabel/value").and_then(Value::as_str);
            match (entity_uri, label) {
                (Some(uri), Some(label)) => Ok(Recipient {
                    entity_uri: uri.to_string(),
                    label: label.to_string(),
                }),
                _ => Err(FetchError::shape("results.bindings[].human.value")),
            }
        })
        .collect()
}

pub(crate) fn parse_entity(body: &Value, entity_id: &str) -> Result<Entity, FetchError> {
    let entity = body
        .get("entities")
        .and_then(|e| e.get(entity_id))
        .ok_or_else(|| FetchError::shape(format!("entities.{entity_id}")))?;

    let claims = entity
        .get("claims")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let enwiki_title = entity
        .pointer("/sitelinks/enwiki/title")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Entity {
        claims,
        enwiki_title,
    })
}

#[async_trait]
impl<C: HttpClient> KnowledgeGraph for WikidataClient<C> {
    async fn award_recipients(&self, award_id: &str) -> Result<Vec<Recipient>, FetchError> {
        let query = recipients_query(award_id);
        let url = build_url(&self.sparql_url, &[("query", query.as_str()), ("format", "json")])?;

        let recipients = parse_bindings(&fetch_json(&self.http, url).await?)?;
        debug!(award_id, count = recipients.len(), "Award recipients fetched");
        Ok(recipients)
    }

    async fn entity(&self, entity_id: &str) -> Result<Entity, FetchError> {
        let url = build_url(
            &self.api_url,
            &[
                ("action", "wbgetentities"),
                ("ids", entity_id),
                ("format", "json"),
            ],
        )?;

        parse_entity(&fetch_json(&self.http, url).await?, entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_mentions_award() {
        let q = recipients_query("Q185667");
        assert!(q.contains("wdt:P166 wd:Q185667"));
        assert!(q.contains("[AUTO_LANGUAGE],en"));
    }

    #[test]
    fn test_parse_bindings() {
        let body = json!({
            "head": {"vars": ["human", "humanLabel"]},
            "results": {"bindings": [
                {"human": {"type": "uri", "value": "http://www.wikidata.org/entity/Q92638"},
                 "humanLabel": {"type": "literal", "value": "Donald Knuth"}}
            ]}
        });
        let recipients = parse_bindings(&body).unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].id(), "Q92638");
        assert_eq!(recipients[0].label, "Donald Knuth");
    }

    #[test]
    fn test_parse_bindings_wrong_shape() {
        assert!(matches!(parse_bindings(&json!({"results": {}})), Err(FetchError::Shape { .. })));
        let incomplete = json!({"results": {"bindings": [{"human": {"value": "x"}}]}});
        assert!(parse_bindings(&incomplete).is_err());
    }

    #[test]
    fn test_parse_entity() {
        let body = json!({"entities": {"Q92638": {
            "claims": {"P21": []},
            "sitelinks": {"enwiki": {"site": "enwiki", "title": "Donald Knuth"}}
        }}});
        let entity = parse_entity(&body, "Q92638").unwrap();
        assert_eq!(entity.enwiki_title.as_deref(), Some("Donald Knuth"));
        assert!(entity.claims.contains_key("P21"));
    }

    #[test]
    fn test_parse_entity_without_sitelinks() {
        let body = json!({"entities": {"Q1": {"id": "Q1", "missing": ""}}});
        let entity = parse_entity(&body, "Q1").unwrap();
        assert!(entity.enwiki_title.is_none());
        assert!(entity.claims.is_empty());
    }

    #[test]
    fn test_parse_entity_missing_id() {
        let body = json!({"entities": {}});
        assert!(matches!(parse_entity(&body, "Q1"), Err(FetchError::Shape { .. })));
    }
}
