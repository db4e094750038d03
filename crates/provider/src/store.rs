use async_trait::async_trait;
use database::{AggregateRow, DbError, DbRepository, RecordRow};

/// The data-access seam consumed by the providers.
///
/// The contract is record-or-absent: absence is `Ok(None)` (or a row
/// simply missing from a batch result), and an `Err` always means a
/// lower-level I/O failure. Implementations must be safe to share
/// across concurrent request tasks.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Resolves a single record by id.
    async fn find_record(&self, id: i64) -> Result<Option<RecordRow>, DbError>;

    /// Resolves every record whose id appears in `ids`; order and
    /// absence handling are the caller's concern.
    async fn find_records(&self, ids: &[i64]) -> Result<Vec<RecordRow>, DbError>;

    /// One page of records, newest first.
    async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<RecordRow>, DbError>;

    /// Total record count, for pagination.
    async fn count_records(&self) -> Result<i64, DbError>;

    /// Aggregate statistics over all records.
    async fn aggregate(&self) -> Result<AggregateRow, DbError>;

    /// Persists a new record and returns the stored row.
    async fn insert_record(&self, name: &str, value: f64, score: f64)
    -> Result<RecordRow, DbError>;
}

// The Postgres repository is the production implementation of the seam.
#[async_trait]
impl RecordStore for DbRepository {
    async fn find_record(&self, id: i64) -> Result<Option<RecordRow>, DbError> {
        DbRepository::find_record(self, id).await
    }

    async fn find_records(&self, ids: &[i64]) -> Result<Vec<RecordRow>, DbError> {
        DbRepository::find_records(self, ids).await
    }

    async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<RecordRow>, DbError> {
        DbRepository::list_records(self, limit, offset).await
    }

    async fn count_records(&self) -> Result<i64, DbError> {
        DbRepository::count_records(self).await
    }

    async fn aggregate(&self) -> Result<AggregateRow, DbError> {
        DbRepository::aggregate(self).await
    }

    async fn insert_record(
        &self,
        name: &str,
        value: f64,
        score: f64,
    ) -> Result<RecordRow, DbError> {
        DbRepository::insert_record(self, name, value, score).await
    }
}
