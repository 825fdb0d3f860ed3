#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use publications::api::routes::entity_routes;
use publications::infrastructure::cache::{CacheResult, CacheService, NullCache};
use publications::server::build_state;
use publications::state::AppState;

pub async fn create_test_author(pool: &PgPool, login: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO author (login) VALUES ($1) RETURNING id")
        .bind(login)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_rubric(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO rubric (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_publication(
    pool: &PgPool,
    title: &str,
    author_id: i64,
    rubric_ids: &[i64],
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO publication (title, text, author_id) VALUES ($1, 'Body text', $2) RETURNING id",
    )
    .bind(title)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap();

    for rubric_id in rubric_ids {
        sqlx::query("INSERT INTO publication_rubrics (publications_id, rubrics_id) VALUES ($1, $2)")
            .bind(id)
            .bind(rubric_id)
            .execute(pool)
            .await
            .unwrap();
    }

    id
}

pub async fn count_rubric_links(pool: &PgPool, publication_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM publication_rubrics WHERE publications_id = $1")
        .bind(publication_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// In-memory cache that keeps entries until invalidated.
#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MapCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CacheService for MapCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    build_state(pool, Arc::new(NullCache::new()), 20)
}

fn entity_server(state: AppState) -> TestServer {
    let app = Router::new().nest("/api", entity_routes()).with_state(state);

    TestServer::new(app).unwrap()
}

/// Test server exposing the entity routes under `/api`.
pub fn create_test_server(pool: PgPool) -> TestServer {
    entity_server(create_test_state(pool))
}

/// Test server whose handlers read and write through `cache`.
pub fn create_cached_test_server(pool: PgPool, cache: Arc<MapCache>) -> TestServer {
    entity_server(build_state(pool, cache, 20))
}
