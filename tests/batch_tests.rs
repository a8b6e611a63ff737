use Searchdex::core::config::Config;
use Searchdex::core::error::ErrorKind;
use Searchdex::core::search_server::SearchServer;
use Searchdex::core::types::{DocId, DocumentStatus};
use Searchdex::parallel::batch::{process_queries, process_queries_joined};

fn server() -> SearchServer {
    let config = Config { worker_threads: 3, ..Config::default() };
    let mut server = SearchServer::with_config(["and", "with"], config).unwrap();
    let texts = [
        "funny pet and nasty rat",
        "funny pet with curly hair",
        "funny pet and not very nasty rat",
        "pet with rat and rat and rat",
        "nasty rat with curly hair",
    ];
    for (id, text) in texts.iter().enumerate() {
        server.add_document(id as DocId + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
    }
    server
}

#[test]
fn test_batch_preserves_query_order() {
    let server = server();
    let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair", "nothing"];

    let results = process_queries(&server, &queries).unwrap();
    assert_eq!(results.len(), queries.len());
    for (query, found) in queries.iter().zip(&results) {
        assert_eq!(found, &server.find_top_documents(query).unwrap());
    }
    assert_eq!(results.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 5, 2, 0]);
}

#[test]
fn test_joined_batch_flattens_in_order() {
    let server = server();
    let queries = vec!["nasty rat -not".to_string(), "curly hair".to_string()];

    let nested = process_queries(&server, &queries).unwrap();
    let joined = process_queries_joined(&server, &queries).unwrap();

    assert_eq!(joined.len(), 5);
    assert_eq!(joined, nested.into_iter().flatten().collect::<Vec<_>>());
}

#[test]
fn test_malformed_query_fails_batch() {
    let server = server();
    let err = process_queries(&server, &["curly", "pet --rat"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidQuery);

    let empty: [&str; 0] = [];
    assert!(process_queries_joined(&server, &empty).unwrap().is_empty());
}
