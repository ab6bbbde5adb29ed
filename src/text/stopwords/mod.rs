use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

const ENGLISH: &str = include_str!("english.txt");

/// Lowercase words ignored when ranking "meaningful" tokens.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The bundled English list (179 words).
    pub fn english() -> Self {
        Self::parse(ENGLISH)
    }

    /// Reads a newline-separated list. Blank lines and `#` comments are
    /// skipped; words are lowercased.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading stopword list {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
