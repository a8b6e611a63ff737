use rayon::prelude::*;
use crate::core::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_TOLERANCE};
use crate::core::types::{Document, ExecutionPolicy};

/// Order hits by relevance (descending) and keep the top `MAX_RESULT_DOCUMENT_COUNT`.
///
/// A tie group starts at the best remaining hit and takes every following hit
/// within `RELEVANCE_TOLERANCE` of it; the group is ordered by rating (descending). Sorting runs on exact relevance
/// first so the comparator stays a total order.
pub fn rank_documents(policy: ExecutionPolicy, mut documents: Vec<Document>) -> Vec<Document> {
    let by_relevance = |lhs: &Document, rhs: &Document| rhs.relevance.total_cmp(&lhs.relevance);
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(by_relevance),
        ExecutionPolicy::Parallel => documents.par_sort_by(by_relevance),
    }
    break_ties_by_rating(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}

fn break_ties_by_rating(documents: &mut [Document]) {
    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && documents[start].relevance - documents[end].relevance < RELEVANCE_TOLERANCE
        {
            end += 1;
        }
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(documents: &[Document]) -> Vec<i32> {
        documents.iter().map(|document| document.id).collect()
    }

    #[test]
    fn sorts_by_relevance_then_rating() {
        let documents = vec![
            Document::new(1, 0.2 + 1e-9, 1),
            Document::new(2, 0.5, 0),
            Document::new(3, 0.2, 7),
            Document::new(4, 0.9, -3),
        ];
        let ranked = rank_documents(ExecutionPolicy::Sequential, documents);
        assert_eq!(ids(&ranked), vec![4, 2, 3, 1]);
    }

    #[test]
    fn near_ties_do_not_chain() {
        let documents = vec![
            Document::new(1, 1.0, 0),
            Document::new(2, 1.0 - 0.9e-6, 0),
            Document::new(3, 1.0 - 1.8e-6, 9),
        ];
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let ranked = rank_documents(policy, documents.clone());
            // 3 is within tolerance of 2 only, so it stays below 1
            assert_eq!(ids(&ranked), vec![1, 2, 3]);
        }
    }

    #[test]
    fn truncates_to_top_five() {
        let documents: Vec<Document> = (0..12)
            .map(|id| Document::new(id, id as f64 / 10.0, 0))
            .collect();
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let ranked = rank_documents(policy, documents.clone());
            assert_eq!(ids(&ranked), vec![11, 10, 9, 8, 7]);
        }
    }

    #[test]
    fn display_matches_record_format() {
        let document = Document::new(2, 0.5, -1);
        assert_eq!(document.to_string(), "{ document_id = 2, relevance = 0.5, rating = -1 }");
    }
}
