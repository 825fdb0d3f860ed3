//! PostgreSQL implementation of the publication repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Author, Publication, Rubric};
use crate::domain::page::{Page, PageRequest, PublicationSort};
use crate::domain::repositories::{PublicationFilter, PublicationRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PublicationRow {
    id: i64,
    title: String,
    text: String,
    publication_date: DateTime<Utc>,
    author_id: i64,
    author_login: String,
    author_first_name: Option<String>,
    author_last_name: Option<String>,
}

impl From<PublicationRow> for Publication {
    fn from(row: PublicationRow) -> Self {
        let author = Author::new(
            row.author_id,
            row.author_login,
            row.author_first_name,
            row.author_last_name,
        );

        Publication::new(row.title, row.text, author)
            .with_id(row.id)
            .with_publication_date(row.publication_date)
    }
}

/// One row of the eager join: a publication repeated once per rubric.
#[derive(sqlx::FromRow)]
struct PublicationRubricRow {
    #[sqlx(flatten)]
    publication: PublicationRow,
    rubric_id: Option<i64>,
    rubric_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct RubricLinkRow {
    publication_id: i64,
    id: i64,
    name: String,
}

/// Collapses eager join rows into publications, keeping the row order.
///
/// Rows of one publication must be adjacent.
fn group_eager_rows(rows: Vec<PublicationRubricRow>) -> Vec<Publication> {
    let mut publications: Vec<Publication> = Vec::new();

    for row in rows {
        let rubric = match (row.rubric_id, row.rubric_name) {
            (Some(id), Some(name)) => Some(Rubric::persisted(id, name)),
            _ => None,
        };

        let continues_last = publications
            .last()
            .is_some_and(|last| last.id == Some(row.publication.id));

        if !continues_last {
            publications.push(row.publication.into());
        }

        if let (Some(rubric), Some(current)) = (rubric, publications.last_mut()) {
            current.add_rubric(rubric);
        }
    }

    publications
}

const EAGER_SELECT: &str = r#"
    SELECT p.id, p.title, p.text, p.publication_date,
           a.id AS author_id, a.login AS author_login,
           a.first_name AS author_first_name, a.last_name AS author_last_name,
           r.id AS rubric_id, r.name AS rubric_name
    FROM publication p
    JOIN author a ON a.id = p.author_id
    LEFT JOIN publication_rubrics pr ON pr.publications_id = p.id
    LEFT JOIN rubric r ON r.id = pr.rubrics_id
"#;

/// PostgreSQL repository for publications.
///
/// Writes run in a transaction that updates the publication row and replaces
/// its `publication_rubrics` links, then re-read the eager view.
pub struct PgPublicationRepository {
    pool: Arc<PgPool>,
}

impl PgPublicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn link_rubrics(
        tx: &mut Transaction<'_, Postgres>,
        publication_id: i64,
        rubric_ids: &[i64],
    ) -> Result<(), AppError> {
        if rubric_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO publication_rubrics (publications_id, rubrics_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(publication_id)
        .bind(rubric_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Loads the rubrics of many publications with one query.
    async fn rubrics_for(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<Rubric>>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, RubricLinkRow>(
            r#"
            SELECT pr.publications_id AS publication_id, r.id, r.name
            FROM publication_rubrics pr
            JOIN rubric r ON r.id = pr.rubrics_id
            WHERE pr.publications_id = ANY($1)
            ORDER BY r.id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_publication: HashMap<i64, Vec<Rubric>> = HashMap::new();
        for row in rows {
            by_publication
                .entry(row.publication_id)
                .or_default()
                .push(Rubric::persisted(row.id, row.name));
        }

        Ok(by_publication)
    }

    async fn reload(&self, id: i64) -> Result<Publication, AppError> {
        self.find_by_id_with_rubrics(id).await?.ok_or_else(|| {
            AppError::internal("Publication missing after write", json!({ "id": id }))
        })
    }
}

#[async_trait]
impl PublicationRepository for PgPublicationRepository {
    async fn insert(&self, publication: Publication) -> Result<Publication, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO publication (title, text, publication_date, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&publication.title)
        .bind(&publication.text)
        .bind(publication.publication_date)
        .bind(publication.author.id)
        .fetch_one(&mut *tx)
        .await?;

        Self::link_rubrics(&mut tx, id, &publication.rubric_ids()).await?;

        tx.commit().await?;

        self.reload(id).await
    }

    async fn update(&self, publication: Publication) -> Result<Option<Publication>, AppError> {
        let Some(id) = publication.id else {
            return Err(AppError::internal(
                "Cannot update a publication without an id",
                json!({}),
            ));
        };

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE publication SET
                title            = $2,
                text             = $3,
                publication_date = $4,
                author_id        = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&publication.title)
        .bind(&publication.text)
        .bind(publication.publication_date)
        .bind(publication.author.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM publication_rubrics WHERE publications_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::link_rubrics(&mut tx, id, &publication.rubric_ids()).await?;

        tx.commit().await?;

        self.reload(id).await.map(Some)
    }

    async fn find_by_id_with_rubrics(&self, id: i64) -> Result<Option<Publication>, AppError> {
        let sql = format!("{EAGER_SELECT} WHERE p.id = $1 ORDER BY r.id");

        let rows = sqlx::query_as::<_, PublicationRubricRow>(&sql)
            .bind(id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(group_eager_rows(rows).into_iter().next())
    }

    async fn find_page(
        &self,
        request: PageRequest<PublicationSort>,
        filter: PublicationFilter,
    ) -> Result<Page<Publication>, AppError> {
        // ORDER BY is built from a whitelisted column, never from raw input.
        let sql = format!(
            r#"
            SELECT p.id, p.title, p.text, p.publication_date,
                   a.id AS author_id, a.login AS author_login,
                   a.first_name AS author_first_name, a.last_name AS author_last_name
            FROM publication p
            JOIN author a ON a.id = p.author_id
            WHERE ($1::TEXT IS NULL OR a.login = $1)
            ORDER BY {}
            LIMIT $2 OFFSET $3
            "#,
            request.sort.order_by("p.id")
        );

        let rows = sqlx::query_as::<_, PublicationRow>(&sql)
            .bind(&filter.author_login)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(self.pool.as_ref())
            .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM publication p
            JOIN author a ON a.id = p.author_id
            WHERE ($1::TEXT IS NULL OR a.login = $1)
            "#,
        )
        .bind(&filter.author_login)
        .fetch_one(self.pool.as_ref())
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut rubrics = self.rubrics_for(&ids).await?;

        let items = rows
            .into_iter()
            .map(|row| {
                let attached = rubrics.remove(&row.id).unwrap_or_default();
                Publication::from(row).with_rubrics(attached)
            })
            .collect();

        Ok(Page::new(items, total))
    }

    async fn find_all_with_rubrics(&self) -> Result<Vec<Publication>, AppError> {
        let sql = format!("{EAGER_SELECT} ORDER BY p.id, r.id");

        let rows = sqlx::query_as::<_, PublicationRubricRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(group_eager_rows(rows))
    }

    async fn find_ids_by_rubric(&self, rubric_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT publications_id
            FROM publication_rubrics
            WHERE rubrics_id = $1
            ORDER BY publications_id
            "#,
        )
        .bind(rubric_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM publication WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publication")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
