//! Sentence and word tokenization in the Penn Treebank style.

use regex::Regex;

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "no", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "dept", "univ", "approx", "fig", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Compiled patterns for splitting text. Build once with [`Tokenizer::new`]
/// and reuse.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    sentence_end: Regex,
    rules: Vec<(Regex, &'static str)>,
    clitics: Vec<(Regex, &'static str)>,
}

impl Tokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        const RULES: &[(&str, &str)] = &[
            // opening quotes
            (r#"^""#, " `` "),
            (r#"([ (\[{<])""#, "$1 `` "),
            // punctuation
            (r"([:,])([^\d])", " $1 $2"),
            (r"([:,])$", " $1 "),
            (r"\.\.\.", " ... "),
            (r"[;@#$%&]", " $0 "),
            (r#"([^.])(\.)([\]\)}>"']*)\s*$"#, "$1 $2$3 "),
            (r"[?!]", " $0 "),
            (r"([^'])' ", "$1 ' "),
            // brackets and dashes
            (r"[\]\[\(\)\{\}<>]", " $0 "),
            (r"--", " -- "),
            // closing quotes
            (r#"""#, " '' "),
            (r"(\S)('')", "$1 $2 "),
        ];
        const CLITICS: &[(&str, &str)] = &[
            (r"(?i)([^' ])('s|'m|'d|') ", "$1 $2 "),
            (r"(?i)([^' ])('ll|'re|'ve|n't) ", "$1 $2 "),
        ];

        Ok(Self {
            sentence_end: Regex::new(r#"[.!?]+["')\]]*\s+"#)?,
            rules: compile(RULES)?,
            clitics: compile(CLITICS)?,
        })
    }

    /// Splits `text` after `.`, `!` or `?` followed by whitespace. A period
    /// after a known abbreviation or a single-letter initial, or one followed
    /// by a lowercase word, does not end the sentence.
    pub fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut out = Vec::new();
        let mut start = 0;

        for m in self.sentence_end.find_iter(text) {
            if !self.is_boundary(text, m.start(), m.end()) {
                continue;
            }
            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            out.push(rest);
        }
        out
    }

    fn is_boundary(&self, text: &str, punct_start: usize, match_end: usize) -> bool {
        if text[match_end..]
            .chars()
            .next()
            .is_some_and(char::is_lowercase)
        {
            return false;
        }

        let punct = &text[punct_start..match_end];
        if !punct.starts_with('.') || punct.trim_end().starts_with("..") {
            return true;
        }

        let word = text[..punct_start]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(['(', '"', '\'']);
        let mut chars = word.chars();
        let single_initial =
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase());

        !(single_initial || ABBREVIATIONS.contains(&word.to_lowercase().as_str()))
    }

    /// Word tokens of `text`: sentences first, then Treebank rules on each.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.sentences(text)
            .into_iter()
            .flat_map(|sentence| self.treebank(sentence))
            .collect()
    }

    fn treebank(&self, sentence: &str) -> Vec<String> {
        let mut s = apply(&self.rules, sentence.to_string());
        // clitic rules need a space after every word, the last one included
        s = apply(&self.clitics, format!(" {s} "));
        s.split_whitespace().map(str::to_string).collect()
    }
}

fn compile(rules: &[(&str, &'static str)]) -> Result<Vec<(Regex, &'static str)>, regex::Error> {
    rules
        .iter()
        .map(|&(pattern, replacement)| Ok((Regex::new(pattern)?, replacement)))
        .collect()
}

fn apply(rules: &[(Regex, &'static str)], mut s: String) -> String {
    for (re, replacement) in rules {
        s = re.replace_all(&s, *replacement).into_owned();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn test_simple_text() {
        let t = tok();
        let text = "Cats run. Dogs run fast.";
        assert_eq!(t.words(text), vec!["Cats", "run", ".", "Dogs", "run", "fast", "."]);
        assert_eq!(t.sentences(text), vec!["Cats run.", "Dogs run fast."]);
    }

    #[test]
    fn test_punctuation_split() {
        let t = tok();
        assert_eq!(
            t.words("Hello, world (really)!"),
            vec!["Hello", ",", "world", "(", "really", ")", "!"]
        );
    }

    #[test]
    fn test_numbers_keep_commas() {
        let t = tok();
        assert_eq!(t.words("It cost 1,000 dollars."), vec!["It", "cost", "1,000", "dollars", "."]);
    }

    #[test]
    fn test_clitics() {
        let t = tok();
        assert_eq!(
            t.words("He didn't know it's here."),
            vec!["He", "did", "n't", "know", "it", "'s", "here", "."]
        );
    }

    #[test]
    fn test_quotes_converted() {
        let t = tok();
        assert_eq!(
            t.words(r#"He said "hi" today."#),
            vec!["He", "said", "``", "hi", "''", "today", "."]
        );
    }

    #[test]
    fn test_abbreviation_and_initial_do_not_split() {
        let t = tok();
        let text = "Dr. Smith met John F. Kennedy. Then he left.";
        assert_eq!(t.sentences(text), vec!["Dr. Smith met John F. Kennedy.", "Then he left."]);
    }

    #[test]
    fn test_question_and_exclamation() {
        let t = tok();
        assert_eq!(t.sentences("Really? Yes! Fine.").len(), 3);
    }

    #[test]
    fn test_lowercase_continuation_is_not_boundary() {
        let t = tok();
        assert_eq!(t.sentences("It was approx. ten metres. The end.").len(), 2);
        assert_eq!(t.sentences("The U.S. army arrived.").len(), 1);
    }

    #[test]
    fn test_empty_text() {
        let t = tok();
        assert!(t.sentences("").is_empty());
        assert!(t.words("   ").is_empty());
    }
}
