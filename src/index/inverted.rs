use std::collections::BTreeMap;
use std::sync::Arc;
use rayon::prelude::*;
use crate::core::types::{DocId, ExecutionPolicy};
use crate::index::arena::TermArena;

/// Interned term handle shared by both index maps
pub type Term = Arc<str>;

/// term -> share of the document's words that are this term
pub type WordFrequencies = BTreeMap<Term, f64>;

/// document -> term frequency of one term in that document
pub type PostingList = BTreeMap<DocId, f64>;

static EMPTY_FREQUENCIES: WordFrequencies = BTreeMap::new();

/// ln(N / df) for a term found in `document_freq` of `document_count` documents.
pub fn inverse_document_freq(document_count: usize, document_freq: usize) -> f64 {
    (document_count as f64 / document_freq as f64).ln()
}

/// Forward (document -> terms) and inverse (term -> documents) frequency maps.
///
/// Every (term, doc, tf) triple lives in both maps or in neither. Posting lists
/// that become empty on removal are dropped, so a term present in the inverse
/// map always has at least one document.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    arena: TermArena,
    word_to_document_freqs: BTreeMap<Term, PostingList>,
    document_to_word_freqs: BTreeMap<DocId, WordFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Index the (already analyzed) words of a new document.
    /// Callers guarantee `doc_id` is not indexed yet.
    pub fn add_document(&mut self, doc_id: DocId, words: &[&str]) {
        let mut frequencies = WordFrequencies::new();

        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let term = self.arena.intern(word);
                *self.word_to_document_freqs
                    .entry(Arc::clone(&term))
                    .or_default()
                    .entry(doc_id)
                    .or_insert(0.0) += inv_word_count;
                *frequencies.entry(term).or_insert(0.0) += inv_word_count;
            }
        }

        self.document_to_word_freqs.insert(doc_id, frequencies);
    }

    /// Retract every entry of `doc_id`. Returns false if it was not indexed.
    ///
    /// The parallel path detaches the document's posting lists from the term map,
    /// updates them on the current rayon pool, and puts the non-empty ones back.
    /// Only the document's own terms are touched, and the term map is only
    /// restructured on this thread.
    pub fn remove_document(&mut self, policy: ExecutionPolicy, doc_id: DocId) -> bool {
        let Some(frequencies) = self.document_to_word_freqs.remove(&doc_id) else {
            return false;
        };

        match policy {
            ExecutionPolicy::Sequential => {
                for term in frequencies.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(term) {
                        postings.remove(&doc_id);
                        if postings.is_empty() {
                            self.word_to_document_freqs.remove(term);
                        }
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                let mut detached: Vec<(Term, PostingList)> = frequencies
                    .keys()
                    .filter_map(|term| self.word_to_document_freqs.remove_entry(term))
                    .collect();

                detached.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&doc_id);
                });

                self.word_to_document_freqs.extend(
                    detached.into_iter().filter(|(_, postings)| !postings.is_empty()),
                );
            }
        }
        true
    }

    pub fn postings(&self, word: &str) -> Option<&PostingList> {
        self.word_to_document_freqs.get(word)
    }

    /// Term frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocId) -> &WordFrequencies {
        self.document_to_word_freqs
            .get(&doc_id)
            .unwrap_or(&EMPTY_FREQUENCIES)
    }

    pub fn contains(&self, doc_id: DocId, word: &str) -> bool {
        self.document_to_word_freqs
            .get(&doc_id)
            .is_some_and(|frequencies| frequencies.contains_key(word))
    }

    /// Distinct terms currently referenced by at least one document
    pub fn vocabulary_len(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    pub fn arena(&self) -> &TermArena {
        &self.arena
    }

    /// Check that the forward and inverse maps mirror each other exactly.
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.document_to_word_freqs.iter().all(|(doc_id, frequencies)| {
            frequencies.iter().all(|(term, tf)| {
                self.word_to_document_freqs
                    .get(term)
                    .and_then(|postings| postings.get(doc_id))
                    .is_some_and(|inverse_tf| inverse_tf == tf)
            })
        });
        let inverse_ok = self.word_to_document_freqs.iter().all(|(term, postings)| {
            !postings.is_empty()
                && postings.keys().all(|doc_id| self.contains(*doc_id, term))
        });
        forward_ok && inverse_ok
    }
}
