use crate::analysis::analyzer::Analyzer;
use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, Result};
use crate::core::types::ExecutionPolicy;
use crate::query::ast::{ParsedQuery, QueryWord};

/// Query parser for converting raw query strings into plus/minus word sets
///
/// Grammar, per space separated word:
/// - `word`   -> required term
/// - `-word`  -> excluded term
/// - `-`, `--word` and words with control characters are rejected
///
/// Stop words are dropped after the sign is stripped.
pub struct QueryParser<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> QueryParser<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        QueryParser { analyzer }
    }

    pub fn parse_word<'q>(&self, text: &'q str) -> Result<QueryWord<'q>> {
        if text.is_empty() {
            return Err(Error::invalid_query("Query word is empty"));
        }
        let (data, is_minus) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if data.is_empty() {
            return Err(Error::invalid_query(format!("Query word {:?} has no text after '-'", text)));
        }
        if data.starts_with('-') {
            return Err(Error::invalid_query(format!("Query word {:?} has a doubled '-'", text)));
        }
        if !is_valid_word(data) {
            return Err(Error::invalid_query(format!("Query word {:?} is invalid", text)));
        }

        Ok(QueryWord {
            data,
            is_minus,
            is_stop: self.analyzer.is_stop_word(data),
        })
    }

    /// Words in query order, duplicates kept.
    pub fn parse_raw<'q>(&self, text: &'q str) -> Result<ParsedQuery<'q>> {
        let mut query = ParsedQuery::default();
        for word in self.analyzer.split(text) {
            let query_word = self.parse_word(word)?;
            if query_word.is_stop {
                continue;
            }
            if query_word.is_minus {
                query.minus_words.push(query_word.data);
            } else {
                query.plus_words.push(query_word.data);
            }
        }
        Ok(query)
    }

    /// Sorted, duplicate free word sets.
    pub fn parse<'q>(&self, text: &'q str) -> Result<ParsedQuery<'q>> {
        self.parse_with_policy(ExecutionPolicy::Sequential, text)
    }

    pub fn parse_with_policy<'q>(&self, policy: ExecutionPolicy, text: &'q str) -> Result<ParsedQuery<'q>> {
        let mut query = self.parse_raw(text)?;
        query.normalize(policy);
        Ok(query)
    }
}
