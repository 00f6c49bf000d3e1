//! Text tokenizer for scoring
//!
//! Two rules, selected engine-wide by [`Tokenization`]:
//! - Whitespace (default): lowercase, split on runs of whitespace. Punctuation
//!   stays attached, so `"cake."` and `"cake"` are different terms.
//! - Words: UAX#29 word boundaries (`unicode_words`), lowercase. Punctuation
//!   is dropped.

use ranklab_core::Tokenization;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text by whitespace
///
/// # Example
///
/// ```
/// use ranklab_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Chocolate  CAKE recipe!");
/// assert_eq!(tokens, vec!["chocolate", "cake", "recipe!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Tokenize text into Unicode words
///
/// # Example
///
/// ```
/// use ranklab_search::tokenizer::tokenize_words;
///
/// let tokens = tokenize_words("Chocolate cake, perfect!");
/// assert_eq!(tokens, vec!["chocolate", "cake", "perfect"]);
/// ```
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// Tokenize text with the given rule
pub fn tokenize_with(rule: Tokenization, text: &str) -> Vec<String> {
    match rule {
        Tokenization::Whitespace => tokenize(text),
        Tokenization::Words => tokenize_words(text),
    }
}

/// Tokenize by whitespace and deduplicate for query processing
///
/// # Example
///
/// ```
/// use ranklab_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("test test TEST");
/// assert_eq!(tokens, vec!["test"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    dedup_terms(tokenize(text))
}

/// Tokenize with the given rule and deduplicate, keeping first occurrences
pub fn tokenize_unique_with(rule: Tokenization, text: &str) -> Vec<String> {
    dedup_terms(tokenize_with(rule, text))
}

/// Drop repeated terms, keeping first occurrences in order
pub fn dedup_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .map(Into::into)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Hello World");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        let tokens = tokenize("Hello, World!");
        assert_eq!(tokens, vec!["hello,", "world!"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace_runs() {
        let tokens = tokenize("  a\t\tb \n c  ");
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_keeps_short_tokens() {
        let tokens = tokenize("I am a test");
        assert_eq!(tokens, vec!["i", "am", "a", "test"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_tokenize_words_strips_punctuation() {
        let tokens = tokenize_words("The chocolate frosting makes the cake perfect!");
        assert_eq!(
            tokens,
            vec!["the", "chocolate", "frosting", "makes", "the", "cake", "perfect"]
        );
    }

    #[test]
    fn test_tokenize_words_contractions() {
        // UAX#29 keeps "don't" as one word
        let tokens = tokenize_words("Don't stop");
        assert_eq!(tokens, vec!["don't", "stop"]);
    }

    #[test]
    fn test_tokenize_words_only_punctuation() {
        assert!(tokenize_words("...---...").is_empty());
    }

    #[test]
    fn test_rules_differ_on_punctuated_text() {
        let text = "amazing. cake!";
        assert_ne!(
            tokenize_with(Tokenization::Whitespace, text),
            tokenize_with(Tokenization::Words, text)
        );
    }

    #[test]
    fn test_tokenize_unique() {
        let tokens = tokenize_unique("test test TEST");
        assert_eq!(tokens, vec!["test"]);
    }

    #[test]
    fn test_tokenize_unique_preserves_order() {
        let tokens = tokenize_unique("apple banana apple cherry");
        assert_eq!(tokens, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_dedup_terms() {
        let terms = dedup_terms(["b", "a", "b"]);
        assert_eq!(terms, vec!["b", "a"]);
    }
}
