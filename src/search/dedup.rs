use std::collections::HashSet;
use tracing::info;
use crate::core::search_server::SearchServer;
use crate::core::types::DocId;
use crate::index::inverted::Term;

/// Remove documents whose set of distinct words equals that of a lower id.
///
/// Term frequencies, rating and status are ignored: `"cat cat dog"` and
/// `"dog cat"` are duplicates. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<Vec<Term>> = HashSet::new();
    let mut duplicates = Vec::new();

    for doc_id in server.document_ids() {
        // keys of a BTreeMap are sorted, so equal sets give equal vectors
        let fingerprint: Vec<Term> = server.word_frequencies(doc_id).keys().cloned().collect();
        if !seen.insert(fingerprint) {
            duplicates.push(doc_id);
        }
    }

    for &doc_id in &duplicates {
        info!(doc_id, "found duplicate document id {}", doc_id);
        server.remove_document(doc_id);
    }
    duplicates
}
