mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use publications::infrastructure::cache::publication_key;
use sqlx::PgPool;
use std::sync::Arc;

async fn count_publications(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM publication")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn rubric_ids(body: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = body["rubrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}

// ─── POST ────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_create_publication(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let tech = common::create_test_rubric(&pool, "Tech").await;

    let server = common::create_test_server(pool.clone());
    assert_eq!(count_publications(&pool).await, 0);

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Rust 2026",
            "text": "What is new this year",
            "publicationDate": "2026-01-01T10:00:00Z",
            "author": { "id": author_id },
            "rubrics": [{ "id": news }, { "id": tech }]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["title"], "Rust 2026");
    assert_eq!(body["text"], "What is new this year");
    assert_eq!(body["publicationDate"], "2026-01-01T10:00:00Z");
    assert_eq!(body["author"]["id"], author_id);
    assert_eq!(body["author"]["login"], "jdoe");
    assert_eq!(rubric_ids(&body), vec![news, tech]);
    assert_eq!(body["rubrics"][0]["name"], "News");

    assert_eq!(response.header("location"), format!("/api/publications/{id}"));
    assert_eq!(
        response.header("x-publications-alert"),
        "publicationsApp.publication.created"
    );
    assert_eq!(count_publications(&pool).await, 1);
}

#[sqlx::test]
async fn test_create_publication_defaults_date_and_rubrics(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    let before = chrono::Utc::now() - chrono::Duration::seconds(5);

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Hello",
            "text": "World",
            "author": { "id": author_id }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let date: chrono::DateTime<chrono::Utc> = body["publicationDate"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(date >= before);
    assert!(body["rubrics"].as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_create_publication_null_date_defaults_to_now(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    let before = chrono::Utc::now() - chrono::Duration::seconds(5);

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Undated",
            "text": "No date given",
            "publicationDate": null,
            "author": { "id": author_id }
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let date: chrono::DateTime<chrono::Utc> = response.json::<Value>()["publicationDate"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(date >= before);
}

#[sqlx::test]
async fn test_create_publication_duplicate_rubric_refs_collapse(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Twice",
            "text": "Same rubric twice",
            "author": { "id": author_id },
            "rubrics": [{ "id": news }, { "id": news }]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(rubric_ids(&response.json::<Value>()), vec![news]);
}

#[sqlx::test]
async fn test_create_publication_with_id_rejected(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool.clone());

    let response = server
        .post("/api/publications")
        .json(&json!({
            "id": 1,
            "title": "Hello",
            "text": "World",
            "author": { "id": author_id }
        }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "idexists");
    assert_eq!(body["error"]["details"]["entity"], "publication");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publication")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_create_publication_invalid_fields(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    // Missing title.
    server
        .post("/api/publications")
        .json(&json!({ "text": "World", "author": { "id": author_id } }))
        .await
        .assert_status_bad_request();

    // Text too short.
    let response = server
        .post("/api/publications")
        .json(&json!({ "title": "Hello", "text": "W", "author": { "id": author_id } }))
        .await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>()["error"]["details"].get("text").is_some());

    // Missing author.
    server
        .post("/api/publications")
        .json(&json!({ "title": "Hello", "text": "World" }))
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_publication_unknown_author(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/publications")
        .json(&json!({ "title": "Hello", "text": "World", "author": { "id": 404 } }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_publication_unknown_rubric(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool.clone());

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Hello",
            "text": "World",
            "author": { "id": author_id },
            "rubrics": [{ "id": 999 }]
        }))
        .await;

    response.assert_status_bad_request();

    // The publication row is rolled back with the failed link.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publication")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn test_create_publication_unsaved_rubric_rejected(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    let response = server
        .post("/api/publications")
        .json(&json!({
            "title": "Hello",
            "text": "World",
            "author": { "id": author_id },
            "rubrics": [{ "name": "Brand new" }]
        }))
        .await;

    response.assert_status_bad_request();
}

// ─── PUT ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_update_publication_replaces_rubrics(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let tech = common::create_test_rubric(&pool, "Tech").await;
    let id = common::create_test_publication(&pool, "Draft", author_id, &[news]).await;

    let server = common::create_test_server(pool.clone());

    let response = server
        .put("/api/publications")
        .json(&json!({
            "id": id,
            "title": "Final",
            "text": "Edited body",
            "publicationDate": "2026-02-01T08:30:00Z",
            "author": { "id": author_id },
            "rubrics": [{ "id": tech }]
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("x-publications-alert"),
        "publicationsApp.publication.updated"
    );

    let body = response.json::<Value>();
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "Final");
    assert_eq!(body["publicationDate"], "2026-02-01T08:30:00Z");
    assert_eq!(rubric_ids(&body), vec![tech]);

    assert_eq!(common::count_rubric_links(&pool, id).await, 1);
}

#[sqlx::test]
async fn test_update_publication_clears_rubrics(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let id = common::create_test_publication(&pool, "Draft", author_id, &[news]).await;

    let server = common::create_test_server(pool.clone());

    let response = server
        .put("/api/publications")
        .json(&json!({
            "id": id,
            "title": "Draft",
            "text": "Body text",
            "author": { "id": author_id },
            "rubrics": []
        }))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["rubrics"].as_array().unwrap().is_empty());
    assert_eq!(common::count_rubric_links(&pool, id).await, 0);
}

#[sqlx::test]
async fn test_update_publication_without_id_creates(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    let response = server
        .put("/api/publications")
        .json(&json!({ "title": "Hello", "text": "World", "author": { "id": author_id } }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["id"].is_i64());
}

#[sqlx::test]
async fn test_update_publication_unknown_id(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let server = common::create_test_server(pool);

    let response = server
        .put("/api/publications")
        .json(&json!({
            "id": 31337,
            "title": "Hello",
            "text": "World",
            "author": { "id": author_id }
        }))
        .await;

    response.assert_status_not_found();
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_publication_with_rubrics(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let tech = common::create_test_rubric(&pool, "Tech").await;
    let id = common::create_test_publication(&pool, "Linked", author_id, &[tech, news]).await;

    let server = common::create_test_server(pool);

    let response = server.get(&format!("/api/publications/{id}")).await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "Linked");
    assert_eq!(body["author"]["login"], "jdoe");
    assert_eq!(rubric_ids(&body), vec![news, tech]);
}

#[sqlx::test]
async fn test_get_publication_not_found(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/api/publications/123456").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_list_publications_paginated(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;

    let first = common::create_test_publication(&pool, "First", author_id, &[news]).await;
    common::create_test_publication(&pool, "Second", author_id, &[]).await;
    common::create_test_publication(&pool, "Third", author_id, &[]).await;

    let server = common::create_test_server(pool);

    let response = server
        .get("/api/publications")
        .add_query_param("size", 2)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-total-count"), "3");

    let items = response.json::<Vec<Value>>();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first);
    assert_eq!(rubric_ids(&items[0]), vec![news]);
    assert!(items[1]["rubrics"].as_array().unwrap().is_empty());
}

#[sqlx::test]
async fn test_list_publications_sorted_by_title_desc(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    for title in ["Banana", "Apple", "Cherry"] {
        common::create_test_publication(&pool, title, author_id, &[]).await;
    }

    let server = common::create_test_server(pool);

    let response = server
        .get("/api/publications")
        .add_query_param("sort", "title,desc")
        .await;

    response.assert_status_ok();
    let titles: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Cherry", "Banana", "Apple"]);
}

#[sqlx::test]
async fn test_list_publications_by_author(pool: PgPool) {
    let jdoe = common::create_test_author(&pool, "jdoe").await;
    let asmith = common::create_test_author(&pool, "asmith").await;
    common::create_test_publication(&pool, "By jdoe", jdoe, &[]).await;
    common::create_test_publication(&pool, "By asmith", asmith, &[]).await;
    common::create_test_publication(&pool, "Also asmith", asmith, &[]).await;

    let server = common::create_test_server(pool);

    let response = server
        .get("/api/publications")
        .add_query_param("author", "asmith")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-total-count"), "2");

    let items = response.json::<Vec<Value>>();
    assert!(items.iter().all(|p| p["author"]["login"] == "asmith"));
}

#[sqlx::test]
async fn test_list_publications_invalid_params(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .get("/api/publications")
        .add_query_param("size", 0)
        .await
        .assert_status_bad_request();

    server
        .get("/api/publications")
        .add_query_param("sort", "author,asc")
        .await
        .assert_status_bad_request();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_delete_publication_keeps_rubrics(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let news = common::create_test_rubric(&pool, "News").await;
    let id = common::create_test_publication(&pool, "Gone soon", author_id, &[news]).await;

    let server = common::create_test_server(pool.clone());
    assert_eq!(count_publications(&pool).await, 1);

    let response = server.delete(&format!("/api/publications/{id}")).await;

    response.assert_status_ok();
    assert_eq!(count_publications(&pool).await, 0);
    assert_eq!(
        response.header("x-publications-alert"),
        "publicationsApp.publication.deleted"
    );

    server
        .get(&format!("/api/publications/{id}"))
        .await
        .assert_status_not_found();

    assert_eq!(common::count_rubric_links(&pool, id).await, 0);
    server
        .get(&format!("/api/rubrics/{news}"))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_delete_publication_not_found(pool: PgPool) {
    let server = common::create_test_server(pool);

    server
        .delete("/api/publications/8080")
        .await
        .assert_status_not_found();
}

// ─── CACHE ───────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_publication_served_from_cache(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let id = common::create_test_publication(&pool, "Cached", author_id, &[]).await;

    let cache = Arc::new(common::MapCache::default());
    let server = common::create_cached_test_server(pool.clone(), cache.clone());

    server
        .get(&format!("/api/publications/{id}"))
        .await
        .assert_status_ok();
    assert!(cache.contains(&publication_key(id)));

    // Bypasses the API, so the cached copy is not invalidated.
    sqlx::query("UPDATE publication SET title = 'Changed behind the cache' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let response = server.get(&format!("/api/publications/{id}")).await;
    assert_eq!(response.json::<Value>()["title"], "Cached");
}

#[sqlx::test]
async fn test_update_publication_refreshes_cached_copy(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let id = common::create_test_publication(&pool, "Draft", author_id, &[]).await;

    let cache = Arc::new(common::MapCache::default());
    let server = common::create_cached_test_server(pool, cache.clone());

    let before = server.get(&format!("/api/publications/{id}")).await;
    assert_eq!(before.json::<Value>()["title"], "Draft");

    server
        .put("/api/publications")
        .json(&json!({
            "id": id,
            "title": "Published",
            "text": "Body text",
            "author": { "id": author_id }
        }))
        .await
        .assert_status_ok();
    assert!(!cache.contains(&publication_key(id)));

    let after = server.get(&format!("/api/publications/{id}")).await;
    assert_eq!(after.json::<Value>()["title"], "Published");
}

#[sqlx::test]
async fn test_delete_publication_drops_cached_copy(pool: PgPool) {
    let author_id = common::create_test_author(&pool, "jdoe").await;
    let id = common::create_test_publication(&pool, "Doomed", author_id, &[]).await;

    let cache = Arc::new(common::MapCache::default());
    let server = common::create_cached_test_server(pool, cache.clone());

    server
        .get(&format!("/api/publications/{id}"))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/api/publications/{id}"))
        .await
        .assert_status_ok();

    assert!(!cache.contains(&publication_key(id)));
    server
        .get(&format!("/api/publications/{id}"))
        .await
        .assert_status_not_found();
}
