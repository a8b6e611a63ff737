use std::collections::VecDeque;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::core::types::{Document, DocumentPredicate, DocumentStatus};

/// One answered request kept in the rolling window
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub is_empty: bool,
    pub query: Vec<String>,
    pub documents: Vec<Document>,
    pub issued_at: DateTime<Utc>,
}

/// Rolling-window statistics for monitoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    pub window_len: usize,
    pub capacity: usize,
    pub no_result_requests: usize,
    pub oldest_request: Option<DateTime<Utc>>,
}

/// Forwards searches to a `SearchServer` and remembers the last
/// `request_window` of them (1440 by default, one per minute of a day),
/// counting how many came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    capacity: usize,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        let capacity = server.config().request_window;
        RequestQueue::with_capacity(server, capacity)
    }

    /// A zero capacity is raised to one.
    pub fn with_capacity(server: &'a SearchServer, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RequestQueue {
            server,
            requests: VecDeque::new(),
            capacity,
            no_result_requests: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, DocumentStatus::Actual)
    }

    /// Rejected queries are returned as errors and not recorded.
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let documents = self.server.find_top_documents_with(raw_query, predicate)?;
        let is_empty = documents.is_empty();

        self.requests.push_back(QueryResult {
            is_empty,
            query: self.server
                .analyzer()
                .split(raw_query)
                .into_iter()
                .map(String::from)
                .collect(),
            documents: documents.clone(),
            issued_at: Utc::now(),
        });
        if is_empty {
            self.no_result_requests += 1;
        }

        if self.requests.len() > self.capacity {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.is_empty {
                    self.no_result_requests = self.no_result_requests.saturating_sub(1);
                }
            }
        }
        Ok(documents)
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests in the window, oldest first.
    pub fn requests(&self) -> impl Iterator<Item = &QueryResult> {
        self.requests.iter()
    }

    pub fn stats(&self) -> RequestStats {
        RequestStats {
            window_len: self.requests.len(),
            capacity: self.capacity,
            no_result_requests: self.no_result_requests,
            oldest_request: self.requests.front().map(|request| request.issued_at),
        }
    }
}
