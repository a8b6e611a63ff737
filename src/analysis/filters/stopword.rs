use std::collections::BTreeSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};

/// Immutable set of words dropped from documents and queries.
#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    stop_words: BTreeSet<String>,
}

impl StopWordFilter {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(Error::invalid_input(format!("Stop word {:?} is invalid", word)));
            }
            let trimmed = word.trim();
            if trimmed.is_empty() {
                return Err(Error::invalid_input("Stop word is empty"));
            }
            words.insert(trimmed.to_string());
        }
        Ok(StopWordFilter { stop_words: words })
    }

    /// Parse a space separated stop word list, e.g. `"and in at"`.
    pub fn from_text(text: &str) -> Result<Self> {
        StopWordFilter::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn filter<'a>(&self, words: Vec<&'a str>) -> Vec<&'a str> {
        words.into_iter()
            .filter(|word| !self.contains(word))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stop_words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn text_form_deduplicates() {
        let filter = StopWordFilter::from_text("and in  at in").unwrap();
        assert_eq!(filter.len(), 3);
        assert!(filter.contains("in"));
        assert!(!filter.contains("cat"));
    }

    #[test]
    fn rejects_empty_and_control_words() {
        let err = StopWordFilter::new(["in", "  "]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);

        let err = StopWordFilter::new(["in", "th\x02e"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn filter_keeps_order() {
        let filter = StopWordFilter::from_text("in the").unwrap();
        assert_eq!(filter.filter(vec!["cat", "in", "the", "city"]), vec!["cat", "city"]);
    }
}
