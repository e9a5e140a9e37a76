mod common;

use axum::http::StatusCode;
use common::{app, login, send};
use serde_json::json;

#[tokio::test]
async fn featured_post_is_listed_first() {
    let app = app().await;
    let cookie = login(&app).await;

    let a = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({"title": "A", "content": "<p>x</p>", "category": "Trauma"})),
    )
    .await;
    assert_eq!(a.status, StatusCode::CREATED);
    assert_eq!(a.body["id"], 1);
    assert_eq!(a.body["tags"], json!(["Trauma"]));
    assert_eq!(a.body["isFeatured"], false);
    assert!(a.body["createdAt"].is_string());

    let list = send(&app, "GET", "/posts/list", None, None).await;
    assert_eq!(list.status, StatusCode::OK);
    let ids: Vec<i64> = list.body.as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1]);

    let b = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({
            "title": "B",
            "content": "<p>y</p>",
            "category": "[\"Ansiedad\"]",
            "isFeatured": true
        })),
    )
    .await;
    assert_eq!(b.status, StatusCode::CREATED);
    assert_eq!(b.body["tags"], json!(["Ansiedad"]));

    let list = send(&app, "GET", "/posts/list", None, None).await;
    let titles: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[tokio::test]
async fn get_returns_created_post_publicly() {
    let app = app().await;
    let cookie = login(&app).await;
    let created = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({
            "title": "Sobre la ansiedad",
            "excerpt": "Breve",
            "content": "<p>cuerpo</p>",
            "category": ["Ansiedad", "Ansiedad", "Estrés"],
            "readTime": "4 min",
            "image": "https://cdn.example.com/a.jpg"
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let id = created.body["id"].as_i64().unwrap();
    let fetched = send(&app, "GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);
    assert_eq!(fetched.body["tags"], json!(["Ansiedad", "Estrés"]));
    assert_eq!(fetched.body["readTime"], "4 min");
}

#[tokio::test]
async fn create_requires_title_content_and_category() {
    let app = app().await;
    let cookie = login(&app).await;

    let resp = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({"title": "A", "content": "<p>x</p>"})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"]["code"], "VALIDATION_ERROR");

    let list = send(&app, "GET", "/posts/list", None, None).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app().await;
    let cookie = login(&app).await;
    let resp = send(&app, "POST", "/posts", Some(&cookie), Some(json!("not an object"))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_is_a_full_replacement() {
    let app = app().await;
    let cookie = login(&app).await;
    let created = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({
            "title": "A",
            "excerpt": "old excerpt",
            "content": "<p>x</p>",
            "category": "Trauma",
            "image": "https://cdn.example.com/a.jpg",
            "isFeatured": true
        })),
    )
    .await;
    let id = created.body["id"].as_i64().unwrap();

    let updated = send(
        &app,
        "PUT",
        &format!("/posts/{id}"),
        Some(&cookie),
        Some(json!({"title": "A2", "content": "<p>z</p>", "category": "Duelo"})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "A2");
    assert_eq!(updated.body["excerpt"], json!(null));
    assert_eq!(updated.body["image"], json!(null));
    assert_eq!(updated.body["isFeatured"], false);
    assert_eq!(updated.body["tags"], json!(["Duelo"]));
    assert_eq!(updated.body["createdAt"], created.body["createdAt"]);

    let fetched = send(&app, "GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(fetched.body, updated.body);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app().await;
    let cookie = login(&app).await;
    let created = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({"title": "A", "content": "c", "category": "x"})),
    )
    .await;
    let id = created.body["id"].as_i64().unwrap();

    let deleted = send(&app, "DELETE", &format!("/posts/{id}"), Some(&cookie), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body["message"].is_string());

    let fetched = send(&app, "GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["error"]["code"], "NOT_FOUND");

    let again = send(&app, "DELETE", &format!("/posts/{id}"), Some(&cookie), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unauthenticated_mutations_are_rejected() {
    let app = app().await;
    let cookie = login(&app).await;
    send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({"title": "A", "content": "c", "category": "x"})),
    )
    .await;

    let delete = send(&app, "DELETE", "/posts/1", None, None).await;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);
    assert_eq!(delete.body["error"]["code"], "UNAUTHORIZED");

    let create = send(
        &app,
        "POST",
        "/posts",
        None,
        Some(json!({"title": "B", "content": "c", "category": "x"})),
    )
    .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);

    // authorization is checked before the body
    let update = send(&app, "PUT", "/posts/1", None, Some(json!("garbage"))).await;
    assert_eq!(update.status, StatusCode::UNAUTHORIZED);

    let forged = send(&app, "DELETE", "/posts/1", Some("cms_session=forged"), None).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let fetched = send(&app, "GET", "/posts/1", None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], "A");
}

#[tokio::test]
async fn non_numeric_ids_are_not_found() {
    let app = app().await;
    let cookie = login(&app).await;

    let get = send(&app, "GET", "/posts/abc", None, None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let put = send(
        &app,
        "PUT",
        "/posts/abc",
        Some(&cookie),
        Some(json!({"title": "A", "content": "c", "category": "x"})),
    )
    .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = send(&app, "DELETE", "/posts/1.5", Some(&cookie), None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_returns_413() {
    let app = app().await;
    let cookie = login(&app).await;
    let content = "a".repeat(128 * 1024);
    let resp = send(
        &app,
        "POST",
        "/posts",
        Some(&cookie),
        Some(json!({"title": "A", "content": content, "category": "x"})),
    )
    .await;
    assert_eq!(resp.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(resp.body["error"]["code"], "PAYLOAD_TOO_LARGE");
}
