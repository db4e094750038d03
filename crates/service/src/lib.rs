//! # Prism Service Crate
//!
//! The service orchestrator: the sole entry point into the analysis
//! core from any transport.
//!
//! ## Architectural Principles
//!
//! - **Sole Composer:** The service owns one provider and one
//!   calculator and sequences them. The two collaborators never see
//!   each other, which keeps data access and computation decoupled.
//! - **Total Execution:** `execute` never returns a raw error and
//!   never panics under its documented preconditions. Every failure is
//!   converted into the [`Outcome`] envelope at this layer; the
//!   transport boundary only ever unwraps one shape.
//! - **Single Attempt:** No retries here. Retry and backoff, where
//!   needed, belong to the data-source client behind the provider.
//!
//! ## Public API
//!
//! - `AnalysisService`: the orchestrator.
//! - `AnalysisRequest` / `AnalysisResponse`: the execution contract.

pub mod schemas;

pub use schemas::{AnalysisRequest, AnalysisResponse};

use calculator::{AnalysisCalculator, CalculatorInput};
use chrono::Utc;
use configuration::AnalysisConfig;
use core_types::{DomainError, Identity, Outcome};
use provider::{ProviderInput, RecordProvider, RecordStore};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// The subject of a calculation after resolution: either taken straight
/// from the request or augmented from a stored record.
struct ResolvedSubject {
    value: f64,
    score: Option<f64>,
    record_id: Option<i64>,
    record_name: Option<String>,
}

/// Orchestrates one analysis: resolve the subject, run the calculation,
/// assemble the response.
#[derive(Clone)]
pub struct AnalysisService {
    provider: RecordProvider,
    calculator: AnalysisCalculator,
}

impl AnalysisService {
    pub fn new(provider: RecordProvider, calculator: AnalysisCalculator) -> Self {
        Self { provider, calculator }
    }

    /// Convenience constructor wiring both collaborators off a shared
    /// store handle, the way the boundary builds one service per
    /// request.
    pub fn from_store(store: Arc<dyn RecordStore>, config: AnalysisConfig) -> Self {
        Self::new(RecordProvider::new(store), AnalysisCalculator::new(config))
    }

    /// Executes one analysis request.
    ///
    /// The steps run strictly in order and short-circuit: a provider
    /// failure returns immediately and the calculator is never invoked.
    /// Every outcome, success or failure, is representable as an
    /// [`Outcome`] — this method does not raise.
    pub async fn execute(
        &self,
        request: AnalysisRequest,
        identity: Option<Identity>,
    ) -> Outcome<AnalysisResponse> {
        tracing::info!(
            kind = %request.kind,
            record_id = request.record_id,
            user_id = ?identity.map(|i| i.user_id),
            "executing analysis"
        );

        // 1. Resolve the subject, through the provider when the request
        //    names a stored record.
        let subject = match self.resolve_subject(&request).await {
            Ok(subject) => subject,
            Err(error) => {
                tracing::warn!(error = %error, kind = ?error.kind(), "subject resolution failed");
                return Outcome::fail(error);
            }
        };

        // 2. Run the calculation.
        let input = CalculatorInput {
            kind: request.kind,
            value: subject.value,
            score: subject.score,
            threshold: request.threshold,
        };
        let output = match self.calculator.calculate(&input) {
            Ok(output) => output,
            Err(error) => {
                tracing::warn!(error = %error, kind = ?error.kind(), "calculation failed");
                return Outcome::fail(error);
            }
        };

        // 3. Assemble the response.
        let details = request.include_details.then(|| effective_input_details(&input));
        Outcome::ok(AnalysisResponse {
            kind: request.kind,
            record_id: subject.record_id,
            record_name: subject.record_name,
            metrics: output.metrics,
            insights: output.insights,
            details,
            requested_by: identity.map(|i| i.user_id),
            generated_at: Utc::now(),
        })
    }

    async fn resolve_subject(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ResolvedSubject, DomainError> {
        if let Some(record_id) = request.record_id {
            // Provider errors propagate unchanged; in particular a
            // NotFound keeps its kind all the way to the boundary.
            let record = self.provider.provide(&ProviderInput { record_id }).await?;
            return Ok(ResolvedSubject {
                value: record.value,
                score: request.score.or(Some(record.score)),
                record_id: Some(record.id),
                record_name: Some(record.name),
            });
        }

        let value = request.value.ok_or_else(|| {
            DomainError::validation("Either record_id or value must be provided")
        })?;
        Ok(ResolvedSubject {
            value,
            score: request.score,
            record_id: None,
            record_name: None,
        })
    }
}

/// The effective calculation input, echoed into the response when the
/// caller asked for details.
fn effective_input_details(input: &CalculatorInput) -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("analysis_kind".to_string(), json!(input.kind.as_str()));
    details.insert("value".to_string(), json!(input.value));
    details.insert("score".to_string(), json!(input.score));
    details.insert("threshold".to_string(), json!(input.threshold));
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::{AnalysisKind, ErrorKind};
    use database::RecordRow;
    use provider::MemoryStore;
    use uuid::Uuid;

    fn request(kind: AnalysisKind) -> AnalysisRequest {
        AnalysisRequest {
            kind,
            record_id: None,
            value: None,
            score: None,
            threshold: None,
            include_details: false,
        }
    }

    async fn service_with(rows: Vec<RecordRow>) -> AnalysisService {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::with_records(rows).await);
        AnalysisService::from_store(store, AnalysisConfig::default())
    }

    fn row(id: i64, value: f64, score: f64) -> RecordRow {
        RecordRow {
            id,
            name: format!("Record {id}"),
            value,
            score,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn resolves_the_subject_from_a_stored_record() {
        let service = service_with(vec![row(1, 10.0, 0.85)]).await;

        let outcome = service
            .execute(
                AnalysisRequest { record_id: Some(1), ..request(AnalysisKind::Statistical) },
                None,
            )
            .await;

        let response = outcome.into_data();
        assert_eq!(response.record_id, Some(1));
        assert_eq!(response.record_name.as_deref(), Some("Record 1"));
        assert_eq!(response.metrics["mean"], 10.0);
    }

    #[tokio::test]
    async fn analyzes_an_inline_value_without_touching_the_store() {
        let service = service_with(vec![]).await;

        let outcome = service
            .execute(
                AnalysisRequest { value: Some(10.0), ..request(AnalysisKind::Statistical) },
                None,
            )
            .await;

        let response = outcome.into_data();
        assert_eq!(response.record_id, None);
        assert_eq!(response.metrics["median"], 9.5);
        assert_eq!(response.insights.len(), 2);
    }

    #[tokio::test]
    async fn provider_not_found_propagates_unchanged() {
        let service = service_with(vec![]).await;

        let outcome = service
            .execute(
                AnalysisRequest { record_id: Some(7), ..request(AnalysisKind::Statistical) },
                None,
            )
            .await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.error().kind(), ErrorKind::NotFound);
        assert_eq!(outcome.error().details().get("record_id"), Some(&7.into()));
    }

    #[tokio::test]
    async fn missing_subject_fails_with_validation() {
        let service = service_with(vec![]).await;

        let outcome = service.execute(request(AnalysisKind::Statistical), None).await;

        assert_eq!(outcome.error().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn calculator_failures_become_failure_outcomes() {
        let service = service_with(vec![]).await;

        let outcome = service
            .execute(
                AnalysisRequest { value: Some(-3.0), ..request(AnalysisKind::Trend) },
                None,
            )
            .await;

        assert_eq!(outcome.error().kind(), ErrorKind::Calculator);
        assert_eq!(outcome.error().details().get("analysis_kind"), Some(&"trend".into()));
    }

    #[tokio::test]
    async fn request_score_overrides_the_stored_score() {
        // Stored score 0.9 would not be anomalous; the request's 0.25 is.
        let service = service_with(vec![row(1, 5.0, 0.9)]).await;

        let outcome = service
            .execute(
                AnalysisRequest {
                    record_id: Some(1),
                    score: Some(0.25),
                    ..request(AnalysisKind::Anomaly)
                },
                None,
            )
            .await;

        assert_eq!(outcome.into_data().metrics["is_anomaly"], 1.0);
    }

    #[tokio::test]
    async fn attributes_the_result_to_the_caller() {
        let service = service_with(vec![]).await;
        let user_id = Uuid::new_v4();

        let outcome = service
            .execute(
                AnalysisRequest { value: Some(1.0), ..request(AnalysisKind::Default) },
                Some(Identity::new(user_id)),
            )
            .await;

        assert_eq!(outcome.into_data().requested_by, Some(user_id));
    }

    #[tokio::test]
    async fn details_echo_the_effective_input_only_when_requested() {
        let service = service_with(vec![row(1, 42.5, 0.85)]).await;

        let outcome = service
            .execute(
                AnalysisRequest {
                    record_id: Some(1),
                    include_details: true,
                    ..request(AnalysisKind::Default)
                },
                None,
            )
            .await;
        let details = outcome.into_data().details.expect("details requested");
        assert_eq!(details.get("value"), Some(&serde_json::json!(42.5)));
        assert_eq!(details.get("score"), Some(&serde_json::json!(0.85)));

        let outcome = service
            .execute(
                AnalysisRequest { record_id: Some(1), ..request(AnalysisKind::Default) },
                None,
            )
            .await;
        assert!(outcome.into_data().details.is_none());
    }
}
