//! # Prism Calculator Crate
//!
//! This crate contains the pure computation logic of the analysis
//! service. It defines the analysis calculator that turns a validated
//! input into metrics and insights, and a composite score calculator.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate performs no I/O, holds no mutable
//!   state, and uses no randomness. The same input always yields the
//!   same output, which makes every calculator safe to share across
//!   concurrent request tasks.
//! - **Closed Dispatch:** The analysis strategy is selected by matching
//!   on the [`AnalysisKind`] enum. The compiler guarantees every kind
//!   is handled, and unrecognized wire values land on the `Default`
//!   branch before they ever reach this crate.
//! - **Classify or Wrap:** Every failure leaving [`AnalysisCalculator::
//!   calculate`] is the `Calculator` kind and names the attempted
//!   analysis kind in its details; validation failures additionally
//!   carry a `validation` flag so callers can still tell bad input from
//!   a broken computation.
//!
//! ## Public API
//!
//! - `AnalysisCalculator`: kind-dispatched metrics and insights.
//! - `CalculatorInput` / `CalculatorOutput`: the computation contract.
//! - `ScoreCalculator` / `ComponentScores`: weighted composite scoring.

pub mod score;

pub use score::{ComponentScores, ScoreCalculator};

use configuration::AnalysisConfig;
use core_types::{AnalysisKind, DomainError, ErrorKind};
use std::collections::HashMap;

/// Everything a calculation needs, mirrored from the request (and the
/// provider output, when a record was resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorInput {
    pub kind: AnalysisKind,
    /// The subject value. Must be non-negative.
    pub value: f64,
    /// The subject score. Must lie in [0, 1] when present.
    pub score: Option<f64>,
    /// Threshold for the statistical comparison insight.
    pub threshold: Option<f64>,
}

/// The result of a successful calculation: named numeric metrics plus
/// an ordered sequence of human-readable insights.
///
/// Invariant: after a successful calculation the metrics map is never
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorOutput {
    pub metrics: HashMap<String, f64>,
    pub insights: Vec<String>,
}

/// The kind-dispatched analysis calculator.
///
/// Constructed once from the immutable [`AnalysisConfig`]; the stub
/// strategy bodies below are the documented placeholder computations,
/// kept deliberately simple so the orchestration contract around them
/// stays the interesting part.
#[derive(Debug, Clone)]
pub struct AnalysisCalculator {
    config: AnalysisConfig,
}

impl AnalysisCalculator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Runs the analysis selected by `input.kind`.
    ///
    /// Validates before dispatching, checks the non-empty-metrics
    /// post-condition after, and wraps every failure (validation
    /// included) into the `Calculator` kind carrying the attempted
    /// analysis kind.
    pub fn calculate(&self, input: &CalculatorInput) -> Result<CalculatorOutput, DomainError> {
        self.run(input).map_err(|e| {
            let mut wrapped =
                DomainError::calculator(format!("Analysis calculation failed: {}", e.message()))
                    .with_detail("analysis_kind", input.kind.as_str());
            if e.kind() == ErrorKind::Validation {
                wrapped = wrapped.with_detail("validation", true);
            }
            wrapped
        })
    }

    fn run(&self, input: &CalculatorInput) -> Result<CalculatorOutput, DomainError> {
        validate_input(input)?;

        let (metrics, insights) = match input.kind {
            AnalysisKind::Statistical => self.statistical_analysis(input),
            AnalysisKind::Trend => self.trend_analysis(input),
            AnalysisKind::Anomaly => self.anomaly_detection(input),
            AnalysisKind::Default => self.default_analysis(input),
        };

        let output = CalculatorOutput { metrics, insights };
        validate_output(&output)?;

        Ok(output)
    }

    /// Central-tendency metrics derived from the subject value, plus a
    /// threshold-comparison insight when both score and threshold are
    /// supplied and the score exceeds the threshold.
    fn statistical_analysis(&self, input: &CalculatorInput) -> (HashMap<String, f64>, Vec<String>) {
        let std_dev = input.value * 0.1;

        let mut metrics = HashMap::new();
        metrics.insert("mean".to_string(), input.value);
        metrics.insert("median".to_string(), input.value * 0.95);
        metrics.insert("std_dev".to_string(), std_dev);
        metrics.insert("variance".to_string(), std_dev * std_dev);

        let mut insights = vec![
            "Data follows a normal distribution".to_string(),
            format!("The mean value is {:.2}", input.value),
        ];

        if let (Some(score), Some(threshold)) = (input.score, input.threshold) {
            if score > threshold {
                insights.push(format!(
                    "Score ({score:.2}) exceeds the threshold ({threshold:.2})"
                ));
            }
        }

        (metrics, insights)
    }

    /// Direction (+1 rising, -1 falling, 0 flat), strength in [0, 1]
    /// and rate of change of the observed series.
    fn trend_analysis(&self, _input: &CalculatorInput) -> (HashMap<String, f64>, Vec<String>) {
        let mut metrics = HashMap::new();
        metrics.insert("trend_direction".to_string(), 1.0);
        metrics.insert("trend_strength".to_string(), 0.7);
        metrics.insert("change_rate".to_string(), 0.05);

        let insights = vec![
            "Upward trend observed".to_string(),
            "Trend strength is moderate".to_string(),
        ];

        (metrics, insights)
    }

    /// Flags the subject as anomalous when its score falls strictly
    /// below the configured cutoff.
    fn anomaly_detection(&self, input: &CalculatorInput) -> (HashMap<String, f64>, Vec<String>) {
        let is_anomaly = input.score.is_some_and(|s| s < self.config.anomaly_cutoff);

        let mut metrics = HashMap::new();
        metrics.insert("anomaly_score".to_string(), if is_anomaly { 0.2 } else { 0.8 });
        metrics.insert("is_anomaly".to_string(), if is_anomaly { 1.0 } else { 0.0 });
        metrics.insert("confidence".to_string(), 0.85);

        let insights = if is_anomaly {
            vec![
                "Anomaly detected in the data".to_string(),
                "Further review is recommended".to_string(),
            ]
        } else {
            vec!["Data is within the normal range".to_string()]
        };

        (metrics, insights)
    }

    /// Fallback analysis: echoes the inputs as metrics.
    fn default_analysis(&self, input: &CalculatorInput) -> (HashMap<String, f64>, Vec<String>) {
        let mut metrics = HashMap::new();
        metrics.insert("value".to_string(), input.value);
        metrics.insert("score".to_string(), input.score.unwrap_or(0.0));

        let insights = vec![
            format!("Value: {}", input.value),
            match input.score {
                Some(score) => format!("Score: {score}"),
                None => "Score: n/a".to_string(),
            },
        ];

        (metrics, insights)
    }
}

/// Precondition: the subject value is non-negative and the score, when
/// present, lies in [0, 1]. Checked before any computation runs.
fn validate_input(input: &CalculatorInput) -> Result<(), DomainError> {
    if input.value < 0.0 {
        return Err(DomainError::validation("Value must be non-negative")
            .with_detail("value", input.value));
    }

    if let Some(score) = input.score {
        if !(0.0..=1.0).contains(&score) {
            return Err(DomainError::validation("Score must be between 0 and 1")
                .with_detail("score", score));
        }
    }

    Ok(())
}

/// Post-condition: an empty metrics map is never a successful result.
fn validate_output(output: &CalculatorOutput) -> Result<(), DomainError> {
    if output.metrics.is_empty() {
        return Err(DomainError::calculator("Calculation produced no metrics"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> AnalysisCalculator {
        AnalysisCalculator::new(AnalysisConfig::default())
    }

    fn input(kind: AnalysisKind, value: f64) -> CalculatorInput {
        CalculatorInput { kind, value, score: None, threshold: None }
    }

    #[test]
    fn statistical_metrics_for_value_ten() {
        let output = calculator().calculate(&input(AnalysisKind::Statistical, 10.0)).unwrap();

        assert_eq!(output.metrics["mean"], 10.0);
        assert_eq!(output.metrics["median"], 9.5);
        assert_eq!(output.metrics["std_dev"], 1.0);
        assert_eq!(output.metrics["variance"], 1.0);
        assert_eq!(output.insights.len(), 2);
    }

    #[test]
    fn statistical_appends_threshold_insight_when_score_exceeds_threshold() {
        let output = calculator()
            .calculate(&CalculatorInput {
                kind: AnalysisKind::Statistical,
                value: 10.0,
                score: Some(0.9),
                threshold: Some(0.5),
            })
            .unwrap();

        assert_eq!(output.insights.len(), 3);
        assert!(output.insights[2].contains("0.90"));
        assert!(output.insights[2].contains("0.50"));
    }

    #[test]
    fn statistical_omits_threshold_insight_when_score_is_below_threshold() {
        let output = calculator()
            .calculate(&CalculatorInput {
                kind: AnalysisKind::Statistical,
                value: 10.0,
                score: Some(0.4),
                threshold: Some(0.5),
            })
            .unwrap();

        assert_eq!(output.insights.len(), 2);
    }

    #[test]
    fn trend_reports_direction_strength_and_rate() {
        let output = calculator().calculate(&input(AnalysisKind::Trend, 5.0)).unwrap();

        assert_eq!(output.metrics["trend_direction"], 1.0);
        assert!((0.0..=1.0).contains(&output.metrics["trend_strength"]));
        assert_eq!(output.metrics["change_rate"], 0.05);
    }

    #[test]
    fn anomaly_flags_scores_below_the_cutoff() {
        let output = calculator()
            .calculate(&CalculatorInput {
                kind: AnalysisKind::Anomaly,
                value: 5.0,
                score: Some(0.25),
                threshold: None,
            })
            .unwrap();

        assert_eq!(output.metrics["is_anomaly"], 1.0);
        assert_eq!(output.metrics["anomaly_score"], 0.2);
        assert_eq!(output.metrics["confidence"], 0.85);
        assert!(output.insights.iter().any(|i| i.contains("Anomaly detected")));
    }

    #[test]
    fn anomaly_passes_scores_at_or_above_the_cutoff() {
        let output = calculator()
            .calculate(&CalculatorInput {
                kind: AnalysisKind::Anomaly,
                value: 5.0,
                score: Some(0.5),
                threshold: None,
            })
            .unwrap();

        assert_eq!(output.metrics["is_anomaly"], 0.0);
        assert_eq!(output.metrics["anomaly_score"], 0.8);
        assert!(output.insights.iter().any(|i| i.contains("normal range")));
    }

    #[test]
    fn anomaly_without_a_score_is_not_flagged() {
        let output = calculator().calculate(&input(AnalysisKind::Anomaly, 5.0)).unwrap();
        assert_eq!(output.metrics["is_anomaly"], 0.0);
    }

    #[test]
    fn default_kind_echoes_the_inputs() {
        let output = calculator().calculate(&input(AnalysisKind::Default, 42.5)).unwrap();

        assert_eq!(output.metrics["value"], 42.5);
        assert_eq!(output.metrics["score"], 0.0);
        assert_eq!(output.insights.len(), 2);
    }

    #[test]
    fn negative_value_fails_before_any_metric_is_computed() {
        let err = calculator().calculate(&input(AnalysisKind::Statistical, -1.0)).unwrap_err();

        assert_eq!(err.kind(), core_types::ErrorKind::Calculator);
        assert_eq!(err.details().get("analysis_kind"), Some(&"statistical".into()));
        assert_eq!(err.details().get("validation"), Some(&true.into()));
    }

    #[test]
    fn out_of_range_score_fails_with_the_attempted_kind_in_details() {
        let err = calculator()
            .calculate(&CalculatorInput {
                kind: AnalysisKind::Anomaly,
                value: 1.0,
                score: Some(1.5),
                threshold: None,
            })
            .unwrap_err();

        assert_eq!(err.kind(), core_types::ErrorKind::Calculator);
        assert_eq!(err.details().get("analysis_kind"), Some(&"anomaly".into()));
    }

    #[test]
    fn every_successful_calculation_yields_metrics() {
        for kind in [
            AnalysisKind::Statistical,
            AnalysisKind::Trend,
            AnalysisKind::Anomaly,
            AnalysisKind::Default,
        ] {
            let output = calculator().calculate(&input(kind, 3.5)).unwrap();
            assert!(!output.metrics.is_empty(), "empty metrics for {kind}");
        }
    }

    #[test]
    fn calculate_is_idempotent() {
        let calc = calculator();
        let input = CalculatorInput {
            kind: AnalysisKind::Statistical,
            value: 17.25,
            score: Some(0.75),
            threshold: Some(0.5),
        };

        assert_eq!(calc.calculate(&input).unwrap(), calc.calculate(&input).unwrap());
    }
}
