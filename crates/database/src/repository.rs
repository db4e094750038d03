use crate::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific
/// interface to the database. It encapsulates all SQL queries and data
/// access logic for the records domain.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row from the `records` table: one analyzable data point.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Aggregate statistics over the whole `records` table.
///
/// The averages are `None` when the table is empty.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AggregateRow {
    pub count: i64,
    pub avg_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a single record by id. Absence is `Ok(None)`, not an error.
    pub async fn find_record(&self, id: i64) -> Result<Option<RecordRow>, DbError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT id, name, value, score, created_at FROM records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Fetches every record whose id appears in `ids`, in one query.
    ///
    /// The database returns rows in arbitrary order and silently skips
    /// absent ids; callers that need ordering or absence detection
    /// handle both on top of this method.
    pub async fn find_records(&self, ids: &[i64]) -> Result<Vec<RecordRow>, DbError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT id, name, value, score, created_at FROM records WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetches one page of records, newest first.
    pub async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<RecordRow>, DbError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT id, name, value, score, created_at FROM records \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Counts all records, for pagination totals.
    pub async fn count_records(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Computes aggregate statistics over all records in a single query.
    pub async fn aggregate(&self) -> Result<AggregateRow, DbError> {
        let row = sqlx::query_as::<_, AggregateRow>(
            "SELECT COUNT(*) AS count, AVG(value) AS avg_value, \
             MIN(value) AS min_value, MAX(value) AS max_value FROM records",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Inserts a new record and returns the stored row.
    pub async fn insert_record(
        &self,
        name: &str,
        value: f64,
        score: f64,
    ) -> Result<RecordRow, DbError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "INSERT INTO records (name, value, score) VALUES ($1, $2, $3) \
             RETURNING id, name, value, score, created_at",
        )
        .bind(name)
        .bind(value)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
