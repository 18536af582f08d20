mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{failing_app, memory_app, send, send_json};

#[tokio::test]
async fn quantit_scenario() {
    let (app, _) = memory_app();
    let created = send_json(&app, "POST", "/stocks", json!({"quantit": 10, "item_id": 1})).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json(), json!({"id": 1, "quantit": 10, "item_id": 1}));

    let fetched = send(&app, "GET", "/stocks/1", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created.json());
}

#[tokio::test]
async fn stock_may_reference_missing_item() {
    let (app, _) = memory_app();
    let created = send_json(&app, "POST", "/stocks", json!({"quantit": 3, "item_id": 404})).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(send(&app, "GET", "/items/404", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn absent_fields_default_to_zero() {
    let (app, _) = memory_app();
    let created = send_json(&app, "POST", "/stocks", json!({})).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json(), json!({"id": 1, "quantit": 0, "item_id": 0}));
}

#[tokio::test]
async fn spelled_out_quantity_is_ignored() {
    let (app, _) = memory_app();
    let created = send_json(&app, "POST", "/stocks", json!({"quantity": 10, "item_id": 2})).await;
    assert_eq!(created.json()["quantit"], 0);
}

#[tokio::test]
async fn negative_quantit_is_bad_request() {
    let (app, _) = memory_app();
    let resp = send_json(&app, "POST", "/stocks", json!({"quantit": -1, "item_id": 1})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), Some("invalid_body"));
    assert!(resp.json()["error"].is_string());
}

#[tokio::test]
async fn quantit_past_bigint_is_bad_request() {
    let (app, _) = memory_app();
    let resp = send(&app, "POST", "/stocks", Some(r#"{"quantit": 18446744073709551615, "item_id": 1}"#)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), Some("value_out_of_range"));
    assert_eq!(send(&app, "GET", "/stocks", None).await.json(), json!([]));
}

#[tokio::test]
async fn delete_is_hard_and_repeatable() {
    let (app, _) = memory_app();
    send_json(&app, "POST", "/stocks", json!({"quantit": 1, "item_id": 1})).await;
    send_json(&app, "POST", "/stocks", json!({"quantit": 2, "item_id": 1})).await;

    for _ in 0..2 {
        let resp = send(&app, "DELETE", "/stocks/1", None).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json(), json!({"message": "Stock deleted"}));
    }

    let gone = send(&app, "GET", "/stocks/1", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.json(), json!({"error": "Stock not found"}));
    assert_eq!(gone.error_code(), Some("stock_not_found"));

    let listed = send(&app, "GET", "/stocks", None).await;
    assert_eq!(listed.json(), json!([{"id": 2, "quantit": 2, "item_id": 1}]));
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let (app, _) = memory_app();
    send_json(&app, "POST", "/stocks", json!({"quantit": 10, "item_id": 1})).await;

    let updated = send_json(&app, "PUT", "/stocks/1", json!({"quantit": 0})).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json(), json!({"id": 1, "quantit": 0, "item_id": 1}));

    let moved = send_json(&app, "PUT", "/stocks/1", json!({"item_id": 9})).await;
    assert_eq!(moved.json(), json!({"id": 1, "quantit": 0, "item_id": 9}));
}

#[tokio::test]
async fn update_missing_stock_is_not_found() {
    let (app, _) = memory_app();
    let resp = send_json(&app, "PUT", "/stocks/5", json!({"quantit": 1})).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json(), json!({"error": "Stock not found"}));
}

#[tokio::test]
async fn array_bodies_are_rejected() {
    let (app, _) = memory_app();
    let resp = send(&app, "POST", "/stocks", Some("[10,1]")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), Some("invalid_body"));

    send_json(&app, "POST", "/stocks", json!({"quantit": 10, "item_id": 1})).await;
    let resp = send(&app, "PUT", "/stocks/1", Some("[7,7]")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), Some("invalid_body"));
    assert_eq!(
        send(&app, "GET", "/stocks", None).await.json(),
        json!([{"id": 1, "quantit": 10, "item_id": 1}])
    );
}

#[tokio::test]
async fn database_failure_is_internal_error() {
    let app = failing_app();
    for (method, uri) in [("GET", "/stocks"), ("GET", "/stocks/1"), ("DELETE", "/stocks/1")] {
        let resp = send(&app, method, uri, None).await;
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(resp.error_code(), Some("internal_error"));
    }
    let resp = send_json(&app, "POST", "/stocks", json!({"quantit": 1, "item_id": 1})).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}
