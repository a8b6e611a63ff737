use serde::{Deserialize, Serialize};
use crate::core::error::{Error, Result};

/// Upper bound on the number of hits `find_top_documents` returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_TOLERANCE: f64 = 1e-6;

/// Requests kept by a `RequestQueue` (one per minute of a day).
pub const REQUEST_WINDOW: usize = 1440;

pub const DEFAULT_BUCKET_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bucket_count: usize,      // ConcurrentMap shards used by parallel scoring
    pub worker_threads: usize,    // Size of the engine's rayon pool
    pub request_window: usize,    // RequestQueue history length
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bucket_count: DEFAULT_BUCKET_COUNT,
            worker_threads: num_cpus::get(),
            request_window: REQUEST_WINDOW,
        }
    }
}

impl Config {
    /// Read a config from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(Error::invalid_input("bucket_count must be positive"));
        }
        if self.worker_threads == 0 {
            return Err(Error::invalid_input("worker_threads must be positive"));
        }
        if self.request_window == 0 {
            return Err(Error::invalid_input("request_window must be positive"));
        }
        Ok(())
    }
}
