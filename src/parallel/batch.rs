use std::time::Instant;
use rayon::prelude::*;
use tracing::info;
use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::core::types::Document;

/// Run every query through `find_top_documents` on the server's worker pool.
///
/// Results come back in input order. The first malformed query fails the whole batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let start = Instant::now();

    let results = server.install(|| {
        queries
            .par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect::<Result<Vec<_>>>()
    })?;

    info!(
        queries = queries.len(),
        took_ms = start.elapsed().as_millis() as u64,
        "query batch processed"
    );
    Ok(results)
}

/// Same as `process_queries`, flattened: query order first, then rank order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
