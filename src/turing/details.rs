use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::FetchError;
use crate::services::knowledge_api::{ClaimValue, Encyclopedia, KnowledgeGraph};

const GENDER: &str = "P21";
const BIRTH_DATE: &str = "P569";
const BIRTH_PLACE: &str = "P19";
const EMPLOYER: &str = "P108";
const EDUCATED_AT: &str = "P69";

/// Biographical claims of one award winner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WinnerDetails {
    pub gender: Option<ClaimValue>,
    pub birth_date: Option<ClaimValue>,
    pub birth_place: Option<ClaimValue>,
    pub employer: Option<ClaimValue>,
    pub educated_at: Option<ClaimValue>,
    pub intro: Option<String>,
}

/// `mainsnak.datavalue.value` of every statement for `property`. Statements
/// without a value ("unknown value", "no value") are skipped.
pub fn claim_values(claims: &Map<String, Value>, property: &str) -> Option<ClaimValue> {
    let mut values: Vec<Value> = claims
        .get(property)?
        .as_array()?
        .iter()
        .filter_map(|statement| statement.pointer("/mainsnak/datavalue/value").cloned())
        .collect();

    match values.len() {
        0 => None,
        1 => values.pop().map(ClaimValue::Single),
        _ => Some(ClaimValue::Many(values)),
    }
}

/// Fetches claims for `entity_id` and its Wikipedia introduction.
///
/// A failed intro lookup leaves `intro` empty instead of failing the whole
/// record.
pub async fn winner_details<K, E>(
    kg: &K,
    encyclopedia: &E,
    entity_id: &str,
) -> Result<WinnerDetails, FetchError>
where
    K: KnowledgeGraph + ?Sized,
    E: Encyclopedia + ?Sized,
{
    let entity = kg.entity(entity_id).await?;

    let intro = match &entity.enwiki_title {
        Some(title) => match encyclopedia.intro(title).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(entity_id, error = %e, "Intro lookup failed");
                None
            }
        },
        None => None,
    };

    Ok(WinnerDetails {
        gender: claim_values(&entity.claims, GENDER),
        birth_date: claim_values(&entity.claims, BIRTH_DATE),
        birth_place: claim_values(&entity.claims, BIRTH_PLACE),
        employer: claim_values(&entity.claims, EMPLOYER),
        educated_at: claim_values(&entity.claims, EDUCATED_AT),
        intro,
    })
}
