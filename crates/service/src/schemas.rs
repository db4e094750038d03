use chrono::{DateTime, Utc};
use core_types::AnalysisKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// An analysis request, exactly as accepted at the transport boundary.
///
/// The subject of the analysis is either a stored record (when
/// `record_id` is present, the provider resolves it) or the inline
/// `value`. Supplying neither is a validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Which computation strategy to run. Absent or unrecognized kinds
    /// fall back to the default analysis.
    #[serde(default)]
    pub kind: AnalysisKind,
    pub record_id: Option<i64>,
    /// The subject value; required when no record is resolved.
    pub value: Option<f64>,
    /// The subject score in [0, 1]. Takes precedence over a resolved
    /// record's stored score.
    pub score: Option<f64>,
    /// Threshold for the statistical comparison insight.
    pub threshold: Option<f64>,
    /// When set, the response echoes the effective calculation input.
    #[serde(default)]
    pub include_details: bool,
}

/// The uniform analysis payload returned on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub kind: AnalysisKind,
    pub record_id: Option<i64>,
    pub record_name: Option<String>,
    pub metrics: HashMap<String, f64>,
    pub insights: Vec<String>,
    /// Echo of the effective input, present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    /// The caller this result is attributed to, when identity was
    /// supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<Uuid>,
    pub generated_at: DateTime<Utc>,
}
