use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, Tokenizer, WhitespaceTokenizer};
use crate::core::error::{Error, Result};

/// Text analysis pipeline: tokenize, validate, drop stop words
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub stop_words: StopWordFilter,
}

impl Analyzer {
    pub fn new(tokenizer: Box<dyn Tokenizer>, stop_words: StopWordFilter) -> Self {
        Analyzer { tokenizer, stop_words }
    }

    pub fn whitespace(stop_words: StopWordFilter) -> Self {
        Analyzer::new(Box::new(WhitespaceTokenizer), stop_words)
    }

    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.tokenizer.tokenize(text)
    }

    /// Terms of a document, stop words removed.
    /// Fails with `InvalidInput` if any word carries a control character.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let words = self.split(text);
        if let Some(bad) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(Error::invalid_input(format!("Word {:?} is invalid", bad)));
        }
        Ok(self.stop_words.filter(words))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            stop_words: self.stop_words.clone(),
        }
    }
}
