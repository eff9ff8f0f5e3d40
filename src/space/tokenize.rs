// N-gram extraction for the three token units.
//
// Word tokens are runs of two or more word characters (letters, digits,
// underscore). They go through the Unicode-aware `regex` engine so Greek and
// Spanish text tokenize the same way English does. Character analyzers
// collapse whitespace first.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::config::{TokenUnit, VectorSpaceConfig};

static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static word pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

/// Produces the n-grams of a document under one configuration.
pub struct Tokenizer {
    config: VectorSpaceConfig,
    stopwords: BTreeSet<String>,
}

impl Tokenizer {
    pub fn new(config: &VectorSpaceConfig) -> Self {
        let stopwords = match config.unit {
            TokenUnit::Word => config.stopwords.resolve(),
            _ => BTreeSet::new(),
        };
        Self {
            config: config.clone(),
            stopwords,
        }
    }

    /// All n-grams of the document, in order of occurrence, duplicates kept.
    pub fn ngrams(&self, document: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        match self.config.unit {
            TokenUnit::Word => self.word_ngrams(&text),
            TokenUnit::Character => self.char_ngrams(&text),
            TokenUnit::CharacterWordBounded => self.char_wb_ngrams(&text),
        }
    }

    fn word_ngrams(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = word_tokens(text)
            .into_iter()
            .filter(|t| !self.stopwords.contains(*t))
            .collect();

        let mut ngrams = Vec::new();
        for n in self.config.ngram_range.sizes() {
            if n > tokens.len() {
                break;
            }
            ngrams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        ngrams
    }

    fn char_ngrams(&self, text: &str) -> Vec<String> {
        let collapsed = WHITESPACE_RUN.replace_all(text, " ");
        let chars: Vec<char> = collapsed.chars().collect();

        let mut ngrams = Vec::new();
        for n in self.config.ngram_range.sizes() {
            if n > chars.len() {
                break;
            }
            ngrams.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
        }
        ngrams
    }

    fn char_wb_ngrams(&self, text: &str) -> Vec<String> {
        let collapsed = WHITESPACE_RUN.replace_all(text, " ");

        let mut ngrams = Vec::new();
        for word in collapsed.split_whitespace() {
            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();
            for n in self.config.ngram_range.sizes() {
                if n >= padded.len() {
                    // A padded word no longer than the window is its own n-gram,
                    // counted once across the whole range.
                    ngrams.push(padded.iter().collect());
                    break;
                }
                ngrams.extend(padded.windows(n).map(|w| w.iter().collect::<String>()));
            }
        }
        ngrams
    }
}

/// Maximal runs of word characters with at least two characters.
pub fn word_tokens(text: &str) -> Vec<&str> {
    WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::config::{StopwordLanguage, Stopwords};

    #[test]
    fn test_word_tokens_skip_single_chars() {
        assert_eq!(word_tokens("I saw a cat, then 42 dogs."), vec!["saw", "cat", "then", "42", "dogs"]);
    }

    #[test]
    fn test_word_tokens_unicode() {
        assert_eq!(word_tokens("Καλημέρα κόσμε"), vec!["Καλημέρα", "κόσμε"]);
    }

    #[test]
    fn test_word_tokens_accents_and_underscore() {
        assert_eq!(word_tokens("el ñandú, snake_case y café"), vec!["el", "ñandú", "snake_case", "café"]);
    }

    #[test]
    fn test_word_bigrams() {
        let tokenizer = Tokenizer::new(&VectorSpaceConfig::new(TokenUnit::Word, 2));
        assert_eq!(tokenizer.ngrams("The cat sat."), vec!["the cat", "cat sat"]);
    }

    #[test]
    fn test_word_range() {
        let config = VectorSpaceConfig::new(TokenUnit::Word, 1).with_ngram_range(1, 2);
        let tokenizer = Tokenizer::new(&config);
        assert_eq!(tokenizer.ngrams("red fox"), vec!["red", "fox", "red fox"]);
    }

    #[test]
    fn test_stopwords_removed_before_ngrams() {
        let config = VectorSpaceConfig::new(TokenUnit::Word, 2)
            .with_stopwords(Stopwords::Language(StopwordLanguage::English));
        let tokenizer = Tokenizer::new(&config);
        assert_eq!(tokenizer.ngrams("the cat and the dog"), vec!["cat dog"]);
    }

    #[test]
    fn test_char_ngrams_collapse_whitespace() {
        let tokenizer = Tokenizer::new(&VectorSpaceConfig::new(TokenUnit::Character, 3));
        assert_eq!(tokenizer.ngrams("Ab  \n c"), vec!["ab ", "b c"]);
    }

    #[test]
    fn test_char_wb_pads_words() {
        let tokenizer = Tokenizer::new(&VectorSpaceConfig::new(TokenUnit::CharacterWordBounded, 3));
        assert_eq!(tokenizer.ngrams("cat a"), vec![" ca", "cat", "at ", " a "]);
    }

    #[test]
    fn test_char_wb_short_word_kept_whole() {
        let tokenizer = Tokenizer::new(&VectorSpaceConfig::new(TokenUnit::CharacterWordBounded, 8));
        assert_eq!(tokenizer.ngrams("to"), vec![" to "]);
    }

    #[test]
    fn test_lowercase_can_be_disabled() {
        let config = VectorSpaceConfig::new(TokenUnit::Word, 1).with_lowercase(false);
        let tokenizer = Tokenizer::new(&config);
        assert_eq!(tokenizer.ngrams("Hello hello"), vec!["Hello", "hello"]);
    }

    #[test]
    fn test_document_shorter_than_window() {
        let tokenizer = Tokenizer::new(&VectorSpaceConfig::new(TokenUnit::Character, 8));
        assert!(tokenizer.ngrams("short").is_empty());
    }
}
