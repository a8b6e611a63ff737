use Searchdex::core::search_server::SearchServer;
use Searchdex::core::types::{DocId, DocumentStatus};
use Searchdex::search::dedup::remove_duplicates;

fn add(server: &mut SearchServer, id: DocId, text: &str, ratings: &[i32]) {
    server.add_document(id, text, DocumentStatus::Actual, ratings).unwrap();
}

#[test]
fn test_duplicates_keep_lowest_id() {
    let mut server = SearchServer::new("and with").unwrap();

    add(&mut server, 1, "funny pet and nasty rat", &[7, 2, 7]);
    add(&mut server, 2, "funny pet with curly hair", &[1, 2]);
    // same words as 2
    add(&mut server, 3, "funny pet with curly hair", &[1, 2]);
    // differs only in stop words
    add(&mut server, 4, "funny pet and curly hair", &[1, 2]);
    // same set, different frequencies
    add(&mut server, 5, "funny funny pet and nasty nasty rat", &[1, 2]);
    // same set, different order
    add(&mut server, 6, "funny pet and not very nasty rat", &[1, 2]);
    add(&mut server, 7, "very nasty rat and not very funny pet", &[1, 2]);
    // a subset is not a duplicate
    add(&mut server, 8, "pet with rat and rat and rat", &[1, 2]);
    add(&mut server, 9, "nasty rat with curly hair", &[1, 2]);

    assert_eq!(server.document_count(), 9);
    let removed = remove_duplicates(&mut server);

    assert_eq!(removed, vec![3, 4, 5, 7]);
    assert_eq!(server.document_count(), 5);
    assert_eq!(server.iter().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
    assert!(server.index().is_consistent());
}

#[test]
fn test_status_and_rating_are_ignored() {
    let mut server = SearchServer::new("").unwrap();
    server.add_document(10, "cat dog", DocumentStatus::Banned, &[9]).unwrap();
    server.add_document(20, "dog cat", DocumentStatus::Actual, &[1]).unwrap();

    assert_eq!(remove_duplicates(&mut server), vec![20]);
    assert_eq!(server.document(10).map(|data| data.status), Some(DocumentStatus::Banned));
}

#[test]
fn test_empty_documents_are_duplicates_of_each_other() {
    let mut server = SearchServer::new("the").unwrap();
    add(&mut server, 1, "", &[]);
    add(&mut server, 2, "the", &[]);
    add(&mut server, 3, "cat", &[]);

    assert_eq!(remove_duplicates(&mut server), vec![2]);
    assert!(remove_duplicates(&mut server).is_empty());
}
