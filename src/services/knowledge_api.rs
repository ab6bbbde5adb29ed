//! Traits and types for the knowledge-graph and encyclopedia sources.

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

/// An award recipient as listed by the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Full entity URI, e.g. `http://www.wikidata.org/entity/Q92743`.
    pub entity_uri: String,
    pub label: String,
}

impl Recipient {
    /// The entity id, i.e. the last path segment of the URI.
    pub fn id(&self) -> &str {
        self.entity_uri
            .rsplit('/')
            .next()
            .unwrap_or(&self.entity_uri)
    }
}

/// Zero, one or several values of a single property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Single(Value),
    Many(Vec<Value>),
}

/// Claims and sitelinks of one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub claims: serde_json::Map<String, Value>,
    pub enwiki_title: Option<String>,
}

#[async_trait::async_trait]
pub trait KnowledgeGraph {
    /// Every human holding the award entity `award_id`.
    async fn award_recipients(&self, award_id: &str) -> Result<Vec<Recipient>, FetchError>;

    async fn entity(&self, entity_id: &str) -> Result<Entity, FetchError>;
}

#[async_trait::async_trait]
pub trait Encyclopedia {
    /// Plain-text introduction of the article titled `title`.
    async fn intro(&self, title: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_id_is_last_segment() {
        let r = Recipient {
            entity_uri: "http://www.wikidata.org/entity/Q92743".to_string(),
            label: "Tim Berners-Lee".to_string(),
        };
        assert_eq!(r.id(), "Q92743");
    }

    #[test]
    fn test_claim_value_serializes_untagged() {
        let single = serde_json::to_value(ClaimValue::Single(Value::from("x"))).unwrap();
        let many = serde_json::to_value(ClaimValue::Many(vec![1.into(), 2.into()])).unwrap();
        assert_eq!(single, Value::from("x"));
        assert_eq!(many, serde_json::json!([1, 2]));
    }
}
