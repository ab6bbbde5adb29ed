//! Text statistics for encyclopedia introductions.
//!
//! [`TextToolkit`] bundles the compiled tokenizer and the stopword list. It is
//! built once at startup and handed to [`summarize`]; nothing here keeps
//! process-wide state.

pub mod stopwords;
pub mod summary;
pub mod tokenize;

pub use stopwords::StopwordSet;
pub use summary::{TextSummary, summarize, top_tokens};
pub use tokenize::Tokenizer;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::TextConfig;

/// Immutable resources shared by every summary.
#[derive(Debug, Clone)]
pub struct TextToolkit {
    pub tokenizer: Tokenizer,
    pub stopwords: StopwordSet,
}

impl TextToolkit {
    pub fn init(config: &TextConfig) -> Result<Self> {
        let tokenizer = Tokenizer::new().context("compiling tokenizer patterns")?;
        let stopwords = match &config.stopwords_path {
            Some(path) => StopwordSet::from_path(path)?,
            None => StopwordSet::english(),
        };
        debug!(stopwords = stopwords.len(), "Text toolkit ready");
        Ok(Self {
            tokenizer,
            stopwords,
        })
    }

    /// Lowercased alphabetic tokens that are not stopwords.
    pub fn content_words(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !t.is_empty() && t.chars().all(char::is_alphabetic))
            .map(|t| t.to_lowercase())
            .filter(|t| !self.stopwords.contains(t))
            .collect()
    }
}
