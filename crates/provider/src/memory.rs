use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::Utc;
use database::{AggregateRow, DbError, RecordRow};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of the [`RecordStore`] seam.
///
/// Useful for tests and for running the server without a database
/// (`prism serve --memory`). The map is guarded by an async RwLock and
/// the store is cheap to clone; clones share the same storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<i64, RecordRow>>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given rows.
    pub async fn with_records(rows: Vec<RecordRow>) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.write().await;
            for row in rows {
                records.insert(row.id, row);
            }
        }
        store
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_record(&self, id: i64) -> Result<Option<RecordRow>, DbError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_records(&self, ids: &[i64]) -> Result<Vec<RecordRow>, DbError> {
        let records = self.records.read().await;
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<RecordRow>, DbError> {
        let records = self.records.read().await;
        let mut rows: Vec<RecordRow> = records.values().cloned().collect();
        // Same ordering contract as the SQL implementation.
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_records(&self) -> Result<i64, DbError> {
        Ok(self.records.read().await.len() as i64)
    }

    async fn aggregate(&self) -> Result<AggregateRow, DbError> {
        let records = self.records.read().await;
        let count = records.len() as i64;
        if count == 0 {
            return Ok(AggregateRow { count, avg_value: None, min_value: None, max_value: None });
        }
        let values: Vec<f64> = records.values().map(|r| r.value).collect();
        let sum: f64 = values.iter().sum();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Ok(AggregateRow {
            count,
            avg_value: Some(sum / count as f64),
            min_value: Some(min),
            max_value: Some(max),
        })
    }

    async fn insert_record(
        &self,
        name: &str,
        value: f64,
        score: f64,
    ) -> Result<RecordRow, DbError> {
        let mut records = self.records.write().await;
        let id = records.keys().next_back().copied().unwrap_or(0) + 1;
        let row = RecordRow {
            id,
            name: name.to_string(),
            value,
            score,
            created_at: Utc::now(),
        };
        records.insert(id, row.clone());
        Ok(row)
    }
}
