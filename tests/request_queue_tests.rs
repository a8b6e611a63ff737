use Searchdex::core::config::Config;
use Searchdex::core::error::ErrorKind;
use Searchdex::core::search_server::SearchServer;
use Searchdex::core::stats::RequestQueue;
use Searchdex::core::types::DocumentStatus;

fn server() -> SearchServer {
    let mut server = SearchServer::new("and in at").unwrap();
    server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
    server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
    server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();
    server
}

#[test]
fn test_window_counts_empty_requests() {
    let server = server();
    let mut queue = RequestQueue::new(&server);

    for _ in 0..1439 {
        assert!(queue.add_find_request("empty request").unwrap().is_empty());
    }
    assert_eq!(queue.no_result_requests(), 1439);

    // still 1439 empty in the window
    assert!(!queue.add_find_request("curly dog").unwrap().is_empty());
    assert_eq!(queue.no_result_requests(), 1439);

    // the first empty request falls out of the window
    queue.add_find_request("big collar").unwrap();
    assert_eq!(queue.no_result_requests(), 1438);

    queue.add_find_request("sparrow").unwrap();
    assert_eq!(queue.no_result_requests(), 1437);
    assert_eq!(queue.len(), 1440);
}

#[test]
fn test_small_window() {
    let server = server();
    let mut queue = RequestQueue::with_capacity(&server, 2);

    queue.add_find_request("nothing").unwrap();
    queue.add_find_request("nothing").unwrap();
    assert_eq!(queue.no_result_requests(), 2);

    queue.add_find_request("sparrow").unwrap();
    assert_eq!(queue.no_result_requests(), 1);
    queue.add_find_request("curly").unwrap();
    assert_eq!(queue.no_result_requests(), 0);

    let recorded: Vec<Vec<String>> = queue.requests().map(|request| request.query.clone()).collect();
    assert_eq!(recorded, vec![vec!["sparrow".to_string()], vec!["curly".to_string()]]);
}

#[test]
fn test_zero_capacity_keeps_one_request() {
    let server = server();
    let mut queue = RequestQueue::with_capacity(&server, 0);
    queue.add_find_request("nothing").unwrap();
    queue.add_find_request("nothing").unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.no_result_requests(), 1);
}

#[test]
fn test_huge_window_from_config() {
    let config = Config::from_json(r#"{ "request_window": 18446744073709551615, "worker_threads": 2 }"#).unwrap();
    let mut server = SearchServer::with_config(["and"], config).unwrap();
    server.add_document(1, "big dog and sparrow", DocumentStatus::Actual, &[4]).unwrap();
    let mut queue = RequestQueue::new(&server);

    queue.add_find_request("nothing").unwrap();
    queue.add_find_request("sparrow").unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.no_result_requests(), 1);
    assert_eq!(queue.stats().capacity, usize::MAX);

    let mut queue = RequestQueue::with_capacity(&server, usize::MAX);
    queue.add_find_request("nothing").unwrap();
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_rejected_queries_are_not_recorded() {
    let server = server();
    let mut queue = RequestQueue::new(&server);

    let err = queue.add_find_request("cat --dog").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidQuery);
    assert!(queue.is_empty());
    assert_eq!(queue.no_result_requests(), 0);
}

#[test]
fn test_predicate_requests_and_stats() {
    let server = server();
    let mut queue = RequestQueue::new(&server);
    assert_eq!(queue.stats().oldest_request, None);

    let banned = queue.add_find_request_with("curly", DocumentStatus::Banned).unwrap();
    assert!(banned.is_empty());
    let rated = queue
        .add_find_request_with("big", |_id: i32, _status: DocumentStatus, rating: i32| rating >= 2)
        .unwrap();
    assert_eq!(rated.iter().map(|document| document.id).collect::<Vec<_>>(), vec![3, 4]);

    let stats = queue.stats();
    assert_eq!(stats.window_len, 2);
    assert_eq!(stats.capacity, 1440);
    assert_eq!(stats.no_result_requests, 1);
    assert!(stats.oldest_request.is_some());

    let json = serde_json::to_string(&stats).unwrap();
    let restored: Searchdex::core::stats::RequestStats = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, stats);
}
