use configuration::ScoreWeights;
use core_types::DomainError;

/// The individual factors combined into a composite score, each in
/// [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub quality: f64,
    pub performance: f64,
    pub reliability: f64,
}

/// Combines component scores into one composite score through the
/// immutable weights supplied at construction.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoreWeights,
}

impl ScoreCalculator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// The weighted sum of the components, clamped to [0, 1].
    ///
    /// A component outside [0, 1] fails the whole calculation; partial
    /// composites are never produced.
    pub fn calculate(&self, components: &ComponentScores) -> Result<f64, DomainError> {
        for (name, score) in [
            ("quality", components.quality),
            ("performance", components.performance),
            ("reliability", components.reliability),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(DomainError::calculator(format!(
                    "Component score must be between 0 and 1, got {score}"
                ))
                .with_detail("component", name)
                .with_detail("validation", true));
            }
        }

        let total = components.quality * self.weights.quality
            + components.performance * self.weights.performance
            + components.reliability * self.weights.reliability;

        Ok(total.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_components_through_the_weights() {
        let calc = ScoreCalculator::new(ScoreWeights::default());
        let score = calc
            .calculate(&ComponentScores { quality: 1.0, performance: 0.5, reliability: 0.0 })
            .unwrap();

        // 1.0 * 0.4 + 0.5 * 0.3 + 0.0 * 0.3
        assert!((score - 0.55).abs() < 1e-12);
    }

    #[test]
    fn perfect_components_score_one() {
        let calc = ScoreCalculator::new(ScoreWeights::default());
        let score = calc
            .calculate(&ComponentScores { quality: 1.0, performance: 1.0, reliability: 1.0 })
            .unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_components() {
        let calc = ScoreCalculator::new(ScoreWeights::default());
        let err = calc
            .calculate(&ComponentScores { quality: 1.2, performance: 0.5, reliability: 0.5 })
            .unwrap_err();

        assert_eq!(err.kind(), core_types::ErrorKind::Calculator);
        assert_eq!(err.details().get("component"), Some(&"quality".into()));
    }

    #[test]
    fn result_is_deterministic() {
        let calc = ScoreCalculator::new(ScoreWeights::default());
        let components = ComponentScores { quality: 0.9, performance: 0.8, reliability: 0.7 };
        assert_eq!(calc.calculate(&components).unwrap(), calc.calculate(&components).unwrap());
    }
}
