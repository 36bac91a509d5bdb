//! Request shaping for the collection operations.

mod helpers;

use bunny_stream::ListCollectionsOptions;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{body_as_json, lib_path, owned_pairs, query_pairs, test_client};

#[tokio::test]
async fn test_list_collections_defaults() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(lib_path("collections")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    test_client(&mock_server).list_collections(None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        query_pairs(&requests[0]),
        owned_pairs(&[
            ("page", "1"),
            ("itemsPerPage", "100"),
            ("includeThumbnails", "false"),
            ("orderBy", "date"),
        ])
    );
}

#[tokio::test]
async fn test_list_collections_serializes_booleans_as_strings() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(lib_path("collections")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&mock_server)
        .await;

    test_client(&mock_server)
        .list_collections(Some(ListCollectionsOptions {
            search: Some("season".into()),
            page: 2,
            items_per_page: 10,
            order_by: "title".into(),
            include_thumbnails: true,
        }))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        query_pairs(&requests[0]),
        owned_pairs(&[
            ("page", "2"),
            ("itemsPerPage", "10"),
            ("includeThumbnails", "true"),
            ("orderBy", "title"),
            ("search", "season"),
        ])
    );
}

#[tokio::test]
async fn test_get_collection_defaults_to_no_thumbnails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(lib_path("collections/col-7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "guid": "col-7" })))
        .expect(2)
        .mount(&mock_server)
        .await;
    let client = test_client(&mock_server);

    client.get_collection("col-7", None).await.unwrap();
    client.get_collection("col-7", Some(true)).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        query_pairs(&requests[0]),
        owned_pairs(&[("includeThumbnails", "false")])
    );
    assert_eq!(
        query_pairs(&requests[1]),
        owned_pairs(&[("includeThumbnails", "true")])
    );
}

#[tokio::test]
async fn test_create_collection_sends_the_name() {
    let mock_server = MockServer::start().await;
    let collection = json!({ "guid": "col-new", "name": "Trailers", "videoCount": 0 });
    Mock::given(method("POST"))
        .and(path(lib_path("collections")))
        .and(body_json(json!({ "name": "Trailers" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&collection))
        .mount(&mock_server)
        .await;

    let created = test_client(&mock_server)
        .create_collection("Trailers")
        .await
        .unwrap();

    assert_eq!(created, collection);
}

#[tokio::test]
async fn test_update_collection_sends_the_new_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(lib_path("collections/col-7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;

    test_client(&mock_server)
        .update_collection("col-7", "Renamed")
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(body_as_json(&requests[0]), json!({ "name": "Renamed" }));
}

#[tokio::test]
async fn test_delete_collection_hits_the_collection_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(lib_path("collections/col-7")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&mock_server)
        .await;

    assert!(test_client(&mock_server).delete_collection("col-7").await.is_ok());
}
