use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which computation strategy the calculator runs.
///
/// The wire format is a lowercase string. Any unrecognized value
/// deserializes to [`AnalysisKind::Default`] so request handling stays
/// total instead of rejecting kinds this version does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AnalysisKind {
    /// Central-tendency metrics derived from the subject value.
    Statistical,
    /// Direction, strength and rate-of-change of the observed series.
    Trend,
    /// Cutoff-based anomaly flagging of the subject score.
    Anomaly,
    /// Fallback analysis: echoes the inputs as metrics.
    #[default]
    Default,
}

impl AnalysisKind {
    /// The canonical wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Statistical => "statistical",
            AnalysisKind::Trend => "trend",
            AnalysisKind::Anomaly => "anomaly",
            AnalysisKind::Default => "default",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "statistical" => AnalysisKind::Statistical,
            "trend" => AnalysisKind::Trend,
            "anomaly" => AnalysisKind::Anomaly,
            _ => AnalysisKind::Default,
        })
    }
}

impl From<String> for AnalysisKind {
    fn from(s: String) -> Self {
        // Infallible by construction: unknown kinds fall back to Default.
        s.parse().unwrap_or(AnalysisKind::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_round_trip() {
        for kind in [
            AnalysisKind::Statistical,
            AnalysisKind::Trend,
            AnalysisKind::Anomaly,
            AnalysisKind::Default,
        ] {
            let parsed: AnalysisKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unrecognized_kind_falls_back_to_default() {
        let parsed: AnalysisKind = "spectral".parse().unwrap();
        assert_eq!(parsed, AnalysisKind::Default);
    }

    #[test]
    fn deserializes_from_lowercase_json_string() {
        let kind: AnalysisKind = serde_json::from_str("\"anomaly\"").unwrap();
        assert_eq!(kind, AnalysisKind::Anomaly);

        let kind: AnalysisKind = serde_json::from_str("\"no-such-kind\"").unwrap();
        assert_eq!(kind, AnalysisKind::Default);
    }
}
