mod common;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use wdb_client_sdk::Page;

use crate::common::{client, ok};

const USER_SG: &str = "d87ba560a88f868a79423cde713e0432ecaec0c3c53b71db8ad04637133392e3";

#[tokio::test]
async fn create_index_sends_index_keys_and_raw_values() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/index/create").json_body(json!({
            "indexkey": ["age", "city"],
            "key": "user1",
            "indexraw": ["30", "Paris"],
            "time": 1_700_000_000,
            "sg": USER_SG,
        }));
        then.status(200).json_body(ok(""));
    });

    let rsp = client
        .create_index(&["age", "city"], "user1", &["30", "Paris"])
        .await;

    mock.assert();
    assert!(rsp.is_success());
    Ok(())
}

#[tokio::test]
async fn update_index_moves_between_keys() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/index/update").json_body(json!({
            "oindexkey": ["age"],
            "cindexkey": ["age"],
            "key": "user1",
            "indexraw": ["31"],
            "time": 1_700_000_000,
            "sg": USER_SG,
        }));
        then.status(200).json_body(ok(""));
    });

    let rsp = client
        .update_index(&["age"], &["age"], "user1", &["31"])
        .await;

    mock.assert();
    assert!(rsp.is_success());
    Ok(())
}

#[tokio::test]
async fn delete_index_signs_document_key() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/index/del").json_body(json!({
            "indexkey": ["age"],
            "key": "user1",
            "time": 1_700_000_000,
            "sg": USER_SG,
        }));
        then.status(200)
            .json_body(json!({ "code": 404, "msg": "index not found", "data": "" }));
    });

    let rsp = client.delete_index(&["age"], "user1").await;

    mock.assert();
    assert_eq!(rsp.code, 404);
    assert_eq!(rsp.msg, "index not found");
    Ok(())
}

#[tokio::test]
async fn list_index_posts_query_and_decodes_list() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/index/list").json_body(json!({
            "indexkey": "age",
            "condition": ">= 30",
            "offset": 1,
            "limit": 2,
            "order": "asc",
            "time": 1_700_000_000,
            "sg": "884e9736ac2b3e83e14cd00167442db040b0c2615a1b92936109ef7ae661a8cc",
        }));
        then.status(200)
            .json_body(ok(r#"{"total":5,"list":["user2","user3"]}"#));
    });

    let page = Page::builder().offset(1).limit(2).order("asc").build();
    let rsp = client.list_index("age", ">= 30", &page).await;

    mock.assert();
    assert_eq!(rsp.code, 200);
    assert_eq!(rsp.total, 5);
    assert_eq!(rsp.list, vec!["user2", "user3"]);
    Ok(())
}

#[tokio::test]
async fn list_index_without_list_field_is_empty() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    server.mock(|when, then| {
        when.method(POST).path("/api/index/list");
        then.status(200).json_body(ok(r#"{"total":0}"#));
    });

    let rsp = client.list_index("age", "", &Page::default()).await;

    assert!(rsp.is_success());
    assert_eq!(rsp.total, 0);
    assert!(rsp.list.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_index_with_null_list_is_empty() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    server.mock(|when, then| {
        when.method(POST).path("/api/index/list");
        then.status(200).json_body(ok(r#"{"total":0,"list":null}"#));
    });

    let rsp = client.list_index("age", "", &Page::default()).await;

    assert!(rsp.is_success(), "{}", rsp.msg);
    assert!(rsp.list.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_index_empty_body_is_list_failure() -> anyhow::Result<()> {
    let server = MockServer::start();
    let client = client(&server);

    server.mock(|when, then| {
        when.method(POST).path("/api/index/list");
        then.status(200);
    });

    let rsp = client.list_index("age", "", &Page::default()).await;

    assert_eq!(rsp.code, 400);
    assert_eq!(rsp.msg, "body is empty");
    assert!(rsp.list.is_empty());
    Ok(())
}
