//! Fixed-delimiter tokenization for tag and ingredient fields.
//!
//! Multi-word entries ("hyaluronic acid") stay atomic; there is no
//! natural-language splitting, stemming or case folding.

use std::collections::HashSet;

/// Splits a delimiter-joined field into trimmed, non-empty tokens.
///
/// The delimiter is a string, so `", "` keeps names such as
/// `1,2-Hexanediol` whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedTokenizer {
    delimiter: String,
}

impl Default for DelimitedTokenizer {
    fn default() -> Self {
        Self::new(",")
    }
}

impl DelimitedTokenizer {
    /// Tokenizer splitting on `delimiter`.
    #[must_use]
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Tokens in field order. Duplicates are kept (term frequency needs them).
    ///
    /// An empty delimiter yields the whole trimmed field as one token.
    #[must_use]
    pub fn tokens(&self, text: &str) -> Vec<String> {
        if self.delimiter.is_empty() {
            let token = text.trim();
            return if token.is_empty() {
                Vec::new()
            } else {
                vec![token.to_string()]
            };
        }
        text.split(self.delimiter.as_str())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Deduplicated token set.
    #[must_use]
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokens(text).into_iter().collect()
    }
}
