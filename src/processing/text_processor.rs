//! Tokenization and word-frequency counting

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Token to occurrence count. Keys keep the order in which they were first seen,
/// which is what breaks ties when selecting the most frequent words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&position) => self.entries[position].count += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&position| self.entries[position].count)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens in the source text
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// The `n` most frequent words, highest count first. Equal counts keep their
    /// first-occurrence order.
    pub fn top_n(&self, n: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// All entries ranked by count, same ordering rule as [`FrequencyTable::top_n`].
    pub fn ranked(&self) -> Vec<WordCount> {
        self.top_n(self.entries.len())
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in self.iter() {
            map.serialize_entry(&entry.word, &entry.count)?;
        }
        map.end()
    }
}

pub struct TextProcessor {
    word_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Unicode-aware: letters, digits and underscore
        let word_regex = Regex::new(r"\w+").expect("Invalid word regex");
        Self { word_regex }
    }

    /// Lower-case the text and split it into word tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Count every token occurrence in the text
    pub fn word_frequencies(&self, text: &str) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for token in self.tokenize(text) {
            table.record(&token);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_counting() {
        let processor = TextProcessor::new();
        let table = processor.word_frequencies("Cat cat");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("cat"), Some(2));
        assert_eq!(table.get("Cat"), None);
    }

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Hello, world! snake_case 42 isn't e-mail; Ünïcode");
        assert_eq!(
            tokens,
            vec!["hello", "world", "snake_case", "42", "isn", "t", "e", "mail", "ünïcode"]
        );
    }

    #[test]
    fn test_total_matches_token_count() {
        let processor = TextProcessor::new();
        let samples = [
            "",
            "   ...   ",
            "one two two three three three",
            "Mixed CASE case, with_punct! and 123 456 123",
        ];
        for text in samples {
            let table = processor.word_frequencies(text);
            assert_eq!(table.total(), processor.tokenize(text).len(), "text: {:?}", text);
        }
    }

    #[test]
    fn test_empty_text() {
        let processor = TextProcessor::new();
        let table = processor.word_frequencies("");
        assert!(table.is_empty());
        assert!(table.top_n(20).is_empty());
    }

    #[test]
    fn test_top_n_orders_by_count_then_first_occurrence() {
        let processor = TextProcessor::new();
        let table = processor.word_frequencies("b a c a b d c a");
        let top = table.top_n(3);
        let words: Vec<(&str, usize)> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(words, vec![("a", 3), ("b", 2), ("c", 2)]);
    }

    #[test]
    fn test_top_n_length() {
        let processor = TextProcessor::new();
        let few = processor.word_frequencies("alpha beta gamma");
        assert_eq!(few.top_n(20).len(), 3);

        let many: String = (0..50).map(|i| format!("w{} ", i)).collect();
        let table = processor.word_frequencies(&many);
        assert_eq!(table.len(), 50);
        assert_eq!(table.top_n(20).len(), 20);
    }

    #[test]
    fn test_digits_and_single_letters_count() {
        let processor = TextProcessor::new();
        let table = processor.word_frequencies("a 1 a 2024 2024");
        assert_eq!(table.get("a"), Some(2));
        assert_eq!(table.get("1"), Some(1));
        assert_eq!(table.get("2024"), Some(2));
    }

    #[test]
    fn test_serializes_as_map() {
        let processor = TextProcessor::new();
        let table = processor.word_frequencies("x y x");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"x":2,"y":1}"#);
    }
}
