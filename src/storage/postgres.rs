//! Person store backed by a PostgreSQL `people` table.
//!
//! Ids are UUIDs generated by the service. Names are unique case-insensitively through the
//! `people_name_lower_key` index, which also serves as the conflict target for the atomic
//! upsert-by-name.

use crate::domain::{Person, PersonDraft, PersonId};
use crate::storage::{PersonStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresPersonStore {
    pool: PgPool,
}

impl PostgresPersonStore {
    /// Connects to `database_url` and ensures the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS people (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                number TEXT NOT NULL,
                date TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS people_name_lower_key ON people (lower(name))")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for every connection to be returned and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn parse_id(id: &str) -> StoreResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
    }

    fn row_to_person(row: &PgRow) -> StoreResult<Person> {
        let id: Uuid = row.try_get("id")?;
        let date: DateTime<Utc> = row.try_get("date")?;
        Ok(Person {
            id: PersonId::Uuid(id),
            name: row.try_get("name")?,
            number: row.try_get("number")?,
            date,
        })
    }

    async fn insert(&self, draft: &PersonDraft) -> StoreResult<Person> {
        let row = sqlx::query(
            "INSERT INTO people (id, name, number, date) VALUES ($1, $2, $3, $4)
             RETURNING id, name, number, date",
        )
        .bind(Uuid::new_v4())
        .bind(draft.name())
        .bind(draft.number())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, draft.name()))?;
        Self::row_to_person(&row)
    }
}

/// Maps a unique-index violation to `DuplicateName`, everything else to `Database`.
fn map_write_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateName(name.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl PersonStore for PostgresPersonStore {
    async fn list_all(&self) -> StoreResult<Vec<Person>> {
        let rows = sqlx::query("SELECT id, name, number, date FROM people")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_person).collect()
    }

    async fn count(&self) -> StoreResult<usize> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
            .fetch_one(&self.pool)
            .await?;
        Ok(n as usize)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id = Self::parse_id(id)?;
        let row = sqlx::query("SELECT id, name, number, date FROM people WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_person).transpose()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        let row = sqlx::query("SELECT id, name, number, date FROM people WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_person).transpose()
    }

    async fn create(&self, draft: PersonDraft) -> StoreResult<Person> {
        draft.check_schema().map_err(StoreError::Validation)?;
        self.insert(&draft).await
    }

    async fn create_unique(&self, draft: PersonDraft) -> StoreResult<Person> {
        // The unique index already rejects case-insensitive duplicates.
        self.create(draft).await
    }

    async fn update_by_id(&self, id: &str, draft: PersonDraft) -> StoreResult<Option<Person>> {
        let id = Self::parse_id(id)?;
        draft.check_schema().map_err(StoreError::Validation)?;

        let row = sqlx::query(
            "UPDATE people SET name = $2, number = $3 WHERE id = $1
             RETURNING id, name, number, date",
        )
        .bind(id)
        .bind(draft.name())
        .bind(draft.number())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, draft.name()))?;
        row.as_ref().map(Self::row_to_person).transpose()
    }

    async fn upsert_by_name(&self, draft: PersonDraft) -> StoreResult<Person> {
        let draft = draft.normalized();
        draft.check_schema().map_err(StoreError::Validation)?;

        let row = sqlx::query(
            "INSERT INTO people (id, name, number, date) VALUES ($1, $2, $3, $4)
             ON CONFLICT ((lower(name))) DO UPDATE SET number = EXCLUDED.number
             RETURNING id, name, number, date",
        )
        .bind(Uuid::new_v4())
        .bind(draft.name())
        .bind(draft.number())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Self::row_to_person(&row)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Person>> {
        let id = Self::parse_id(id)?;
        let row = sqlx::query("DELETE FROM people WHERE id = $1 RETURNING id, name, number, date")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_person).transpose()
    }
}
