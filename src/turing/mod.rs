//! ACM Turing Award recipients: listing, biographies and intro statistics.

pub mod corpus;
pub mod details;

pub use corpus::{IntroEntry, collect_intros, summarize_intros};
pub use details::{WinnerDetails, winner_details};

use crate::error::FetchError;
use crate::services::knowledge_api::{Encyclopedia, KnowledgeGraph, Recipient};

/// Wikidata id of the ACM Turing Award.
pub const TURING_AWARD: &str = "Q185667";

pub async fn recipients<K>(kg: &K) -> Result<Vec<Recipient>, FetchError>
where
    K: KnowledgeGraph + ?Sized,
{
    kg.award_recipients(TURING_AWARD).await
}

/// Recipient names in alphabetical order.
pub fn sorted_names(recipients: &[Recipient]) -> Vec<String> {
    let mut names: Vec<String> = recipients.iter().map(|r| r.label.clone()).collect();
    names.sort();
    names
}

/// The English Wikipedia introduction of `entity_id`.
///
/// # Errors
///
/// [`FetchError::NoEnglishArticle`] when the entity has no `enwiki`
/// sitelink, plus any error from either source.
pub async fn intro_for<K, E>(
    kg: &K,
    encyclopedia: &E,
    entity_id: &str,
) -> Result<String, FetchError>
where
    K: KnowledgeGraph + ?Sized,
    E: Encyclopedia + ?Sized,
{
    let entity = kg.entity(entity_id).await?;
    let title = entity
        .enwiki_title
        .ok_or_else(|| FetchError::NoEnglishArticle {
            entity_id: entity_id.to_string(),
        })?;
    encyclopedia.intro(&title).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(label: &str) -> Recipient {
        Recipient {
            entity_uri: format!("http://www.wikidata.org/entity/{label}"),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_sorted_names() {
        let list = vec![recipient("Yao"), recipient("Allen"), recipient("Knuth")];
        assert_eq!(sorted_names(&list), vec!["Allen", "Knuth", "Yao"]);
    }
}
