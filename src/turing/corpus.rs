use tracing::{info, warn};

use crate::error::FetchError;
use crate::services::knowledge_api::{Encyclopedia, KnowledgeGraph, Recipient};
use crate::text::{TextSummary, TextToolkit, summarize};
use crate::turing::intro_for;

/// One recipient with the outcome of its intro lookup.
#[derive(Debug)]
pub struct IntroEntry {
    pub name: String,
    pub entity_id: String,
    pub intro: Result<String, FetchError>,
}

/// Looks up the Wikipedia introduction of every recipient, one at a time.
/// Failures are recorded per entry and do not stop the run.
pub async fn collect_intros<K, E>(
    kg: &K,
    encyclopedia: &E,
    recipients: &[Recipient],
) -> Vec<IntroEntry>
where
    K: KnowledgeGraph + ?Sized,
    E: Encyclopedia + ?Sized,
{
    let mut entries = Vec::with_capacity(recipients.len());

    for recipient in recipients {
        let entity_id = recipient.id().to_string();
        let intro = intro_for(kg, encyclopedia, &entity_id).await;
        if let Err(e) = &intro {
            warn!(name = %recipient.label, entity_id = %entity_id, error = %e, "No intro");
        }
        entries.push(IntroEntry {
            name: recipient.label.clone(),
            entity_id,
            intro,
        });
    }

    let found = entries.iter().filter(|e| e.intro.is_ok()).count();
    info!(recipients = entries.len(), found, "Intros collected");
    entries
}

/// Summaries for the entries whose intro was found, in input order.
pub fn summarize_intros(
    entries: &[IntroEntry],
    toolkit: &TextToolkit,
    top_n: usize,
) -> Vec<TextSummary> {
    entries
        .iter()
        .filter_map(|entry| {
            let text = entry.intro.as_ref().ok()?;
            Some(summarize(&entry.name, text, toolkit, top_n))
        })
        .collect()
}
