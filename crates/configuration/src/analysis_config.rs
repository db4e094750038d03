use serde::Deserialize;

/// Configuration for the analysis calculators.
///
/// Loaded once at startup and supplied to each calculator at
/// construction. The struct is immutable after loading; there is no
/// global mutable state behind the computations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Subject scores strictly below this cutoff are flagged anomalous.
    pub anomaly_cutoff: f64,
    /// Weights for the composite score calculation. Must sum to 1.0.
    pub score_weights: ScoreWeights,
}

/// Weights for the composite score calculation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub quality: f64,
    pub performance: f64,
    pub reliability: f64,
}

// --- Default Implementations ---
// This allows a user to omit the `[analysis]` section from their toml
// and still have it work with sensible defaults.

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anomaly_cutoff: 0.3,
            score_weights: ScoreWeights::default(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { quality: 0.4, performance: 0.3, reliability: 0.3 }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.anomaly_cutoff) {
            return Err(format!(
                "analysis.anomaly_cutoff must be within [0, 1], got {}",
                self.anomaly_cutoff
            ));
        }
        self.score_weights.validate()
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), String> {
        let weights = [self.quality, self.performance, self.reliability];
        if weights.iter().any(|w| *w < 0.0) {
            return Err("analysis.score_weights must be non-negative".to_string());
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(format!(
                "analysis.score_weights must sum to 1.0, got {total}"
            ));
        }
        Ok(())
    }
}
