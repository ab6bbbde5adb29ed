use serde::Serialize;
use std::collections::HashMap;

use crate::text::TextToolkit;

/// Descriptive statistics of one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub name: String,
    pub count_words: usize,
    pub count_sentences: usize,
    pub count_paragraphs: usize,
    pub common_words: Vec<String>,
    pub common_words_processed: Vec<String>,
}

/// The `n` most frequent tokens, most frequent first. Equal counts keep the
/// order in which the tokens first appeared.
pub fn top_tokens<S: AsRef<str>>(tokens: &[S], n: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in tokens {
        let token = token.as_ref();
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(token, _)| token.to_string())
        .collect()
}

pub fn summarize(name: &str, text: &str, toolkit: &TextToolkit, top_n: usize) -> TextSummary {
    let words = toolkit.tokenizer.words(text);
    let sentences = toolkit.tokenizer.sentences(text);
    let processed = toolkit.content_words(&words);

    TextSummary {
        name: name.to_string(),
        count_words: words.len(),
        count_sentences: sentences.len(),
        count_paragraphs: text.matches('\n').count() + 1,
        common_words: top_tokens(&words, top_n),
        common_words_processed: top_tokens(&processed, top_n),
    }
}
