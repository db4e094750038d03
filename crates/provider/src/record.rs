use crate::store::RecordStore;
use core_types::DomainError;
use database::RecordRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Identifies the record a provider call should resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProviderInput {
    pub record_id: i64,
}

/// The resolved record, shaped for the domain. Constructed per call and
/// discarded after the service consumes it; never a partial object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderOutput {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub score: f64,
}

impl From<RecordRow> for ProviderOutput {
    fn from(row: RecordRow) -> Self {
        Self { id: row.id, name: row.name, value: row.value, score: row.score }
    }
}

/// Resolves records from the data source behind the [`RecordStore`]
/// seam.
///
/// Error discipline: invalid input fails with `Validation`, an absent
/// record with `NotFound` (never re-wrapped), and any store failure is
/// wrapped into `Provider` carrying the id that was being looked up.
#[derive(Clone)]
pub struct RecordProvider {
    store: Arc<dyn RecordStore>,
}

impl RecordProvider {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolves a single record.
    pub async fn provide(&self, input: &ProviderInput) -> Result<ProviderOutput, DomainError> {
        self.validate(input)?;
        tracing::debug!(record_id = input.record_id, "providing record");

        let row = self
            .store
            .find_record(input.record_id)
            .await
            .map_err(|e| {
                DomainError::provider(format!("Failed to provide record: {e}"))
                    .with_detail("record_id", input.record_id)
            })?
            .ok_or_else(|| {
                DomainError::not_found(format!("Record with id {} not found", input.record_id))
                    .with_detail("record_id", input.record_id)
            })?;

        Ok(ProviderOutput::from(row))
    }

    /// Resolves a batch of records with a single store query.
    ///
    /// The output sequence preserves the input id ordering. The default
    /// batch policy is fail-fast: the first invalid or absent id fails
    /// the whole call, and no partial batch is ever returned. A
    /// provider with per-item recovery semantics must document that
    /// explicitly instead of inheriting this one.
    pub async fn provide_many(&self, ids: &[i64]) -> Result<Vec<ProviderOutput>, DomainError> {
        for id in ids {
            self.validate(&ProviderInput { record_id: *id })?;
        }

        let rows = self.store.find_records(ids).await.map_err(|e| {
            DomainError::provider(format!("Failed to provide records: {e}"))
                .with_detail("record_ids", ids.to_vec())
        })?;

        let mut by_id: HashMap<i64, RecordRow> = HashMap::with_capacity(rows.len());
        for row in rows {
            by_id.insert(row.id, row);
        }

        ids.iter()
            .map(|id| {
                by_id.get(id).cloned().map(ProviderOutput::from).ok_or_else(|| {
                    DomainError::not_found(format!("Record with id {id} not found"))
                        .with_detail("record_id", *id)
                })
            })
            .collect()
    }

    fn validate(&self, input: &ProviderInput) -> Result<(), DomainError> {
        if input.record_id <= 0 {
            return Err(DomainError::validation(format!(
                "Record id must be positive, got {}",
                input.record_id
            ))
            .with_detail("record_id", input.record_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::Utc;
    use core_types::ErrorKind;

    fn row(id: i64, value: f64) -> RecordRow {
        RecordRow {
            id,
            name: format!("Record {id}"),
            value,
            score: 0.85,
            created_at: Utc::now(),
        }
    }

    async fn provider_with(rows: Vec<RecordRow>) -> RecordProvider {
        RecordProvider::new(Arc::new(MemoryStore::with_records(rows).await))
    }

    #[tokio::test]
    async fn provides_an_existing_record() {
        let provider = provider_with(vec![row(1, 42.5)]).await;

        let output = provider.provide(&ProviderInput { record_id: 1 }).await.unwrap();
        assert_eq!(output.id, 1);
        assert_eq!(output.name, "Record 1");
        assert_eq!(output.value, 42.5);
        assert_eq!(output.score, 0.85);
    }

    #[tokio::test]
    async fn absent_record_fails_with_not_found() {
        let provider = provider_with(vec![row(1, 42.5)]).await;

        let err = provider.provide(&ProviderInput { record_id: 7 }).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.details().get("record_id"), Some(&7.into()));
    }

    #[tokio::test]
    async fn non_positive_id_fails_with_validation() {
        let provider = provider_with(vec![]).await;

        let err = provider.provide(&ProviderInput { record_id: 0 }).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn batch_preserves_input_ordering() {
        let provider = provider_with(vec![row(1, 1.0), row(2, 2.0), row(3, 3.0)]).await;

        let outputs = provider.provide_many(&[3, 1, 2]).await.unwrap();
        let ids: Vec<i64> = outputs.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn batch_fails_fast_on_the_first_absent_id() {
        let provider = provider_with(vec![row(1, 1.0), row(3, 3.0)]).await;

        let err = provider.provide_many(&[1, 2, 3]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.details().get("record_id"), Some(&2.into()));
    }

    #[tokio::test]
    async fn batch_rejects_invalid_ids_before_touching_the_store() {
        let provider = provider_with(vec![row(1, 1.0)]).await;

        let err = provider.provide_many(&[1, -4]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
