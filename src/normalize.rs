//! Question normalization: lowercase, tokenize, strip punctuation, rejoin.
//!
//! The word tokenizer follows conventional English rules: whitespace always
//! separates tokens, punctuation is split off the edges of words, and
//! word-internal apostrophes, periods and hyphens stay attached so that
//! contractions survive as a single token (`what's` normalizes to `whats`).

use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Token rules, tried leftmost-first at every position of a whitespace chunk:
/// ellipsis, dash runs, words with internal joiners, then any single
/// remaining character.
const WORD_RULES: &str = r"\.\.\.|--+|\w+(?:['’.\-]\w+)*|\S";

/// Rule-based English word tokenizer.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    rules: Regex,
}

impl WordTokenizer {
    /// Compile the token rules. Called once at startup.
    pub fn new() -> Result<Self> {
        let rules = Regex::new(WORD_RULES)?;
        Ok(Self { rules })
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace()
            .flat_map(|chunk| self.rules.find_iter(chunk).map(|m| m.as_str()))
            .collect()
    }
}

/// Remove every ASCII punctuation character from a token.
pub fn strip_ascii_punctuation(token: &str) -> String {
    token.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Turns free text into its canonical comparable form.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tokenizer: WordTokenizer,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        let tokenizer = WordTokenizer::new()?;
        debug!("Word tokenizer rules compiled");
        Ok(Self { tokenizer })
    }

    /// Lowercase, tokenize, strip ASCII punctuation per token, drop empty
    /// tokens and join the rest with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.tokenizer
            .tokenize(&lowered)
            .into_iter()
            .map(strip_ascii_punctuation)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new().unwrap()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("   \t\n "), "");
    }

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(normalizer().normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn contractions_collapse_and_whitespace_is_single() {
        assert_eq!(
            normalizer().normalize("What's   the   weather?"),
            "whats the weather"
        );
    }

    #[test]
    fn punctuation_only_input_is_dropped() {
        assert_eq!(normalizer().normalize("?!... -- ;"), "");
    }

    #[test]
    fn tokenizer_splits_edge_punctuation() {
        let tok = WordTokenizer::new().unwrap();
        assert_eq!(
            tok.tokenize("\"quoted\" (text), e-mail... u.s."),
            vec!["\"", "quoted", "\"", "(", "text", ")", ",", "e-mail", "...", "u.s", "."]
        );
    }

    #[test]
    fn internal_joiners_are_removed_after_tokenizing() {
        assert_eq!(
            normalizer().normalize("Is an e-mail from the U.S. at 3.14pm?"),
            "is an email from the us at 314pm"
        );
    }

    #[test]
    fn non_ascii_punctuation_survives() {
        assert_eq!(normalizer().normalize("¿Qué tal?"), "¿ qué tal");
    }

    #[test]
    fn unicode_lowercasing_is_locale_independent() {
        assert_eq!(normalizer().normalize("ÉCOLE STRASSE"), "école strasse");
    }

    #[test]
    fn normalize_is_idempotent() {
        let n = normalizer();
        for input in [
            "Hello, World!",
            "What's   the   weather?",
            "Don't stop -- believin'... (1986)",
            "¿Qué tal? «Bien»",
            "email me at a.b@example.com!!",
        ] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "input: {input}");
        }
    }
}
