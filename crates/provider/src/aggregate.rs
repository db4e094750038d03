use crate::store::RecordStore;
use core_types::DomainError;
use database::AggregateRow;
use serde::Serialize;
use std::sync::Arc;

/// Aggregate statistics over the record set, zeroed when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub count: i64,
    pub avg_value: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl From<AggregateRow> for AggregateReport {
    fn from(row: AggregateRow) -> Self {
        Self {
            count: row.count,
            avg_value: row.avg_value.unwrap_or(0.0),
            min_value: row.min_value.unwrap_or(0.0),
            max_value: row.max_value.unwrap_or(0.0),
        }
    }
}

/// Provides table-wide statistics instead of a single record. Follows
/// the same wrapping discipline as [`crate::RecordProvider`].
#[derive(Clone)]
pub struct AggregateProvider {
    store: Arc<dyn RecordStore>,
}

impl AggregateProvider {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn provide(&self) -> Result<AggregateReport, DomainError> {
        let row = self.store.aggregate().await.map_err(|e| {
            DomainError::provider(format!("Failed to aggregate records: {e}"))
                .with_detail("scope", "records")
        })?;
        Ok(AggregateReport::from(row))
    }
}
