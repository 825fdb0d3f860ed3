//! PostgreSQL implementation of the rubric repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Rubric;
use crate::domain::page::{Page, PageRequest, RubricSort};
use crate::domain::repositories::RubricRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(sqlx::FromRow)]
struct RubricRow {
    id: i64,
    name: String,
}

impl From<RubricRow> for Rubric {
    fn from(row: RubricRow) -> Self {
        Rubric::persisted(row.id, row.name)
    }
}

/// PostgreSQL repository for rubrics.
pub struct PgRubricRepository {
    pool: Arc<PgPool>,
}

impl PgRubricRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RubricRepository for PgRubricRepository {
    async fn insert(&self, rubric: Rubric) -> Result<Rubric, AppError> {
        let row = sqlx::query_as::<_, RubricRow>(
            r#"
            INSERT INTO rubric (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&rubric.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, rubric: Rubric) -> Result<Option<Rubric>, AppError> {
        let Some(id) = rubric.id else {
            return Err(AppError::internal(
                "Cannot update a rubric without an id",
                json!({}),
            ));
        };

        let row = sqlx::query_as::<_, RubricRow>(
            r#"
            UPDATE rubric SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(&rubric.name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Rubric::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rubric>, AppError> {
        let row = sqlx::query_as::<_, RubricRow>("SELECT id, name FROM rubric WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Rubric::from))
    }

    async fn find_page(&self, request: PageRequest<RubricSort>) -> Result<Page<Rubric>, AppError> {
        // ORDER BY is built from a whitelisted column, never from raw input.
        let sql = format!(
            "SELECT r.id, r.name FROM rubric r ORDER BY {} LIMIT $1 OFFSET $2",
            request.sort.order_by("r.id")
        );

        let rows = sqlx::query_as::<_, RubricRow>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(self.pool.as_ref())
            .await?;

        let total = self.count().await?;

        Ok(Page::new(rows.into_iter().map(Rubric::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rubric WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_foreign_key_violation(&e, None) => Err(AppError::conflict(
                "Rubric is still referenced by publications",
                json!({ "id": id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rubric")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
