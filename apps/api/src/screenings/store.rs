//! Screening Store — every persistence operation is a single statement over
//! one flat table. The database's own primary-key constraint resolves races
//! between concurrent creates; no multi-statement transactions exist.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::screenings::models::Screening;

/// SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("screening '{0}' already exists")]
    Duplicate(String),

    #[error("screening '{0}' not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields required to insert a new screening. `created_at` is set by the
/// database and never supplied by callers.
pub struct NewScreening<'a> {
    pub id: &'a str,
    pub prompt: &'a str,
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub job_description: &'a str,
    pub candidate_name: Option<&'a str>,
    pub candidate_email: Option<&'a str>,
}

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, StoreError> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Ensures the screenings table exists. Idempotent: safe to run on every
/// start, including concurrently with other instances.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS screenings (
            id TEXT PRIMARY KEY,
            prompt TEXT NOT NULL,
            job_title TEXT,
            company_name TEXT,
            job_description TEXT,
            candidate_name TEXT,
            candidate_email TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("screenings table ready");
    Ok(())
}

/// Inserts a new screening. The loser of a concurrent create race with the
/// same id gets `StoreError::Duplicate`.
pub async fn create(pool: &PgPool, screening: NewScreening<'_>) -> Result<(), StoreError> {
    let result = sqlx::query(
        r#"
        INSERT INTO screenings
            (id, prompt, job_title, company_name, job_description,
             candidate_name, candidate_email)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(screening.id)
    .bind(screening.prompt)
    .bind(screening.job_title)
    .bind(screening.company_name)
    .bind(screening.job_description)
    .bind(screening.candidate_name)
    .bind(screening.candidate_email)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!("created screening {}", screening.id);
            Ok(())
        }
        Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(screening.id.to_string())),
        Err(e) => Err(StoreError::Database(e)),
    }
}

/// Fetches a screening by id.
pub async fn get(pool: &PgPool, id: &str) -> Result<Option<Screening>, StoreError> {
    Ok(
        sqlx::query_as::<_, Screening>("SELECT * FROM screenings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Overwrites both candidate fields on an existing screening. The stored
/// prompt is never touched.
pub async fn update_candidate_info(
    pool: &PgPool,
    id: &str,
    candidate_name: &str,
    candidate_email: &str,
) -> Result<(), StoreError> {
    let result = sqlx::query(
        "UPDATE screenings SET candidate_name = $2, candidate_email = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(candidate_name)
    .bind(candidate_email)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id.to_string()));
    }

    info!("recorded candidate info for screening {id}");
    Ok(())
}

/// Returns the `limit` most recently created screenings, newest first.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Screening>, StoreError> {
    Ok(sqlx::query_as::<_, Screening>(
        "SELECT * FROM screenings ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}
