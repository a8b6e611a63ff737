use std::collections::BTreeMap;
use std::collections::btree_map::Keys;
use std::iter::Copied;
use std::time::Instant;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document, DocumentData, DocumentPredicate, DocumentStatus, ExecutionPolicy};
use crate::index::inverted::{inverse_document_freq, InvertedIndex, WordFrequencies};
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::ast::{sort_unique, ParsedQuery};
use crate::query::parser::QueryParser;
use crate::search::results::rank_documents;

/// In-memory TF-IDF search index over short documents.
///
/// Mutation (`add_document`, `remove_document`) needs `&mut self`; queries take
/// `&self` and may run from many threads at once. Parallel variants of an
/// operation run on the server's own rayon pool.
pub struct SearchServer {
    config: Config,
    analyzer: Analyzer,
    index: InvertedIndex,
    documents: BTreeMap<DocId, DocumentData>,
    pool: ThreadPool,
}

impl SearchServer {
    /// Stop words given as one space separated string, e.g. `"and in at"`.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Self::with_stop_words(StopWordFilter::from_text(stop_words_text)?, Config::default())
    }

    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_stop_words(StopWordFilter::new(stop_words)?, Config::default())
    }

    pub fn with_config<I, S>(stop_words: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_stop_words(StopWordFilter::new(stop_words)?, config)
    }

    pub fn with_stop_words(stop_words: StopWordFilter, config: Config) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("searchdex-worker-{}", i))
            .build()?;

        debug!(
            stop_words = stop_words.len(),
            workers = config.worker_threads,
            buckets = config.bucket_count,
            "search server created"
        );

        Ok(SearchServer {
            config,
            analyzer: Analyzer::whitespace(stop_words),
            index: InvertedIndex::new(),
            documents: BTreeMap::new(),
            pool,
        })
    }

    pub fn add_document(
        &mut self,
        doc_id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if doc_id < 0 {
            return Err(Error::invalid_input(format!("Document id {} is negative", doc_id)));
        }
        if self.documents.contains_key(&doc_id) {
            return Err(Error::invalid_input(format!("Document id {} already exists", doc_id)));
        }
        // validation happens here, before either map is touched
        let words = self.analyzer.analyze(document)?;

        self.index.add_document(doc_id, &words);
        self.documents.insert(doc_id, DocumentData {
            rating: compute_average_rating(ratings),
            status,
        });

        debug!(doc_id, words = words.len(), %status, "document added");
        Ok(())
    }

    /// Removing an unknown id is a no-op.
    pub fn remove_document(&mut self, doc_id: DocId) {
        self.remove_document_policy(ExecutionPolicy::Sequential, doc_id);
    }

    pub fn remove_document_policy(&mut self, policy: ExecutionPolicy, doc_id: DocId) {
        let removed = match policy {
            ExecutionPolicy::Sequential => self.index.remove_document(policy, doc_id),
            ExecutionPolicy::Parallel => {
                let index = &mut self.index;
                self.pool.install(|| index.remove_document(policy, doc_id))
            }
        };
        self.documents.remove(&doc_id);

        if removed {
            debug!(doc_id, ?policy, "document removed");
        } else {
            debug!(doc_id, "remove of unknown document ignored");
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.iter()
    }

    pub fn iter(&self) -> Copied<Keys<'_, DocId, DocumentData>> {
        self.documents.keys().copied()
    }

    pub fn document(&self, doc_id: DocId) -> Option<DocumentData> {
        self.documents.get(&doc_id).copied()
    }

    /// Term frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocId) -> &WordFrequencies {
        self.index.word_frequencies(doc_id)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Run `op` inside this server's worker pool.
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status)
    }

    /// Top documents accepted by `predicate`: a `DocumentStatus` or a
    /// `Fn(DocId, DocumentStatus, i32) -> bool` closure.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn find_top_documents_policy<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let start = Instant::now();

        let ranked = match policy {
            ExecutionPolicy::Sequential => {
                let query = self.parse_query(policy, raw_query)?;
                let matched = self.find_all_documents(&query, &predicate);
                rank_documents(policy, matched)
            }
            ExecutionPolicy::Parallel => self.pool.install(|| -> Result<Vec<Document>> {
                let query = self.parse_query(policy, raw_query)?;
                let matched = self.find_all_documents_par(&query, &predicate);
                Ok(rank_documents(policy, matched))
            })?,
        };

        debug!(
            ?policy,
            hits = ranked.len(),
            took_us = start.elapsed().as_micros() as u64,
            "query evaluated"
        );
        Ok(ranked)
    }

    /// Required words of `raw_query` found in the document, plus its status.
    /// A matching minus word empties the word list.
    pub fn match_document<'q>(&self, raw_query: &'q str, doc_id: DocId) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.match_document_policy(ExecutionPolicy::Sequential, raw_query, doc_id)
    }

    pub fn match_document_policy<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        doc_id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        match policy {
            ExecutionPolicy::Sequential => {
                let query = self.parse_query(policy, raw_query)?;
                let status = self.document_status(doc_id)?;

                if query.minus_words.iter().any(|word| self.index.contains(doc_id, word)) {
                    return Ok((Vec::new(), status));
                }
                let matched = query.plus_words
                    .iter()
                    .copied()
                    .filter(|word| self.index.contains(doc_id, word))
                    .collect();
                Ok((matched, status))
            }
            ExecutionPolicy::Parallel => self.pool.install(|| -> Result<(Vec<&'q str>, DocumentStatus)> {
                // raw parse: duplicates are removed from the (smaller) result instead
                let query = self.parser().parse_raw(raw_query)?;
                let status = self.document_status(doc_id)?;

                if query.minus_words.par_iter().any(|word| self.index.contains(doc_id, word)) {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&'q str> = query.plus_words
                    .par_iter()
                    .copied()
                    .filter(|word| self.index.contains(doc_id, word))
                    .collect();
                sort_unique(&mut matched, policy);
                Ok((matched, status))
            }),
        }
    }

    fn parser(&self) -> QueryParser<'_> {
        QueryParser::new(&self.analyzer)
    }

    fn parse_query<'q>(&self, policy: ExecutionPolicy, raw_query: &'q str) -> Result<ParsedQuery<'q>> {
        self.parser()
            .parse_with_policy(policy, raw_query)
            .inspect_err(|err| warn!(query = raw_query, %err, "query rejected"))
    }

    fn document_status(&self, doc_id: DocId) -> Result<DocumentStatus> {
        self.documents
            .get(&doc_id)
            .map(|data| data.status)
            .ok_or_else(|| Error::not_found(format!("Document {} not found", doc_id)))
    }

    fn find_all_documents<P: DocumentPredicate>(&self, query: &ParsedQuery<'_>, predicate: &P) -> Vec<Document> {
        let document_count = self.document_count();
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = inverse_document_freq(document_count, postings.len());
            for (doc_id, term_freq) in postings {
                if let Some(data) = self.documents.get(doc_id) {
                    if predicate.matches(*doc_id, data.status, data.rating) {
                        *document_to_relevance.entry(*doc_id).or_insert(0.0) += term_freq * idf;
                    }
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for doc_id in postings.keys() {
                    document_to_relevance.remove(doc_id);
                }
            }
        }

        self.materialize(document_to_relevance)
    }

    /// Must run inside `self.pool`.
    fn find_all_documents_par<P: DocumentPredicate>(&self, query: &ParsedQuery<'_>, predicate: &P) -> Vec<Document> {
        let document_count = self.document_count();
        let document_to_relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.config.bucket_count);

        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = inverse_document_freq(document_count, postings.len());
            postings.par_iter().for_each(|(doc_id, term_freq)| {
                if let Some(data) = self.documents.get(doc_id) {
                    if predicate.matches(*doc_id, data.status, data.rating) {
                        *document_to_relevance.access(*doc_id) += term_freq * idf;
                    }
                }
            });
        });

        query.minus_words.par_iter().for_each(|word| {
            if let Some(postings) = self.index.postings(word) {
                for doc_id in postings.keys() {
                    document_to_relevance.erase(*doc_id);
                }
            }
        });

        self.materialize(document_to_relevance.into_ordinary_map())
    }

    fn materialize(&self, document_to_relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        document_to_relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.documents
                    .get(&doc_id)
                    .map(|data| Document::new(doc_id, relevance, data.rating))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Copied<Keys<'a, DocId, DocumentData>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mean of the ratings, truncated toward zero; 0 for no ratings.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
