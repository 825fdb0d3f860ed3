//! PostgreSQL implementation of the author repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Author, AuthorSummary, NewAuthor};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    login: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author::new(row.id, row.login, row.first_name, row.last_name)
    }
}

#[derive(sqlx::FromRow)]
struct AuthorSummaryRow {
    #[sqlx(flatten)]
    author: AuthorRow,
    created_at: DateTime<Utc>,
    publications: i64,
}

/// PostgreSQL repository for authors.
pub struct PgAuthorRepository {
    pool: Arc<PgPool>,
}

impl PgAuthorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO author (login, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, login, first_name, last_name
            "#,
        )
        .bind(&new_author.login)
        .bind(&new_author.first_name)
        .bind(&new_author.last_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, login, first_name, last_name FROM author WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, login, first_name, last_name FROM author WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn list(&self) -> Result<Vec<AuthorSummary>, AppError> {
        let rows = sqlx::query_as::<_, AuthorSummaryRow>(
            r#"
            SELECT a.id, a.login, a.first_name, a.last_name, a.created_at,
                   COUNT(p.id) AS publications
            FROM author a
            LEFT JOIN publication p ON p.author_id = a.id
            GROUP BY a.id
            ORDER BY a.login
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AuthorSummary {
                author: r.author.into(),
                publications: r.publications,
                created_at: r.created_at,
            })
            .collect())
    }
}
