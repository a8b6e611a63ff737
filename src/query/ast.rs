use rayon::prelude::*;
use crate::core::types::ExecutionPolicy;

/// One word of a raw query after sign handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'q> {
    pub data: &'q str,
    pub is_minus: bool,
    pub is_stop: bool,
}

/// Required (plus) and excluded (minus) terms of a query.
/// Words borrow from the raw query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

impl<'q> ParsedQuery<'q> {
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }

    /// Sort both word lists and coalesce duplicates.
    pub fn normalize(&mut self, policy: ExecutionPolicy) {
        sort_unique(&mut self.plus_words, policy);
        sort_unique(&mut self.minus_words, policy);
    }
}

pub(crate) fn sort_unique(words: &mut Vec<&str>, policy: ExecutionPolicy) {
    match policy {
        ExecutionPolicy::Sequential => words.sort_unstable(),
        ExecutionPolicy::Parallel => words.par_sort_unstable(),
    }
    words.dedup();
}
