use std::collections::HashSet;
use std::sync::Arc;

/// Append-only store of every distinct term ever indexed.
///
/// Both index maps key on `Arc<str>` handles taken from here, so a term's text
/// is allocated once no matter how many documents or postings refer to it.
/// Entries are never evicted; a handle stays valid for as long as any map holds it.
#[derive(Debug, Default)]
pub struct TermArena {
    terms: HashSet<Arc<str>>,
}

impl TermArena {
    pub fn new() -> Self {
        TermArena::default()
    }

    /// Canonical handle for `word`, allocating it on first sight.
    pub fn intern(&mut self, word: &str) -> Arc<str> {
        if let Some(term) = self.terms.get(word) {
            return Arc::clone(term);
        }
        let term: Arc<str> = Arc::from(word);
        self.terms.insert(Arc::clone(&term));
        term
    }

    pub fn get(&self, word: &str) -> Option<&Arc<str>> {
        self.terms.get(word)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
