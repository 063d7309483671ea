// Stock sub-risk collaborators: fixed results and JSON result files
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::risk::{RiskError, SubRiskResult, SubRiskSource};

pub const RSI_OVERBOUGHT: &str = "rsi_overbought";
pub const RSI_DIVERGENCE: &str = "rsi_divergence";
pub const TREND_RISK: &str = "trend_risk";

/// Collaborator that always returns the same result
#[derive(Debug, Clone)]
pub struct StaticSubRiskSource {
    name: String,
    result: SubRiskResult,
}

impl StaticSubRiskSource {
    pub fn new(name: &str, result: SubRiskResult) -> Self {
        Self {
            name: name.to_string(),
            result,
        }
    }

    /// Zero-score RSI overbought stub (max 5 points)
    pub fn rsi_overbought() -> Self {
        Self::new(RSI_OVERBOUGHT, SubRiskResult::empty("RSI Overbought", 5.0))
    }

    /// Zero-score RSI divergence stub (max 5 points)
    pub fn rsi_divergence() -> Self {
        Self::new(RSI_DIVERGENCE, SubRiskResult::empty("RSI Divergences", 5.0))
    }

    /// Zero-score trend stub (max 10 points)
    pub fn trend() -> Self {
        Self::new(TREND_RISK, SubRiskResult::empty("Trend Analysis", 10.0))
    }
}

impl SubRiskSource for StaticSubRiskSource {
    fn evaluate(&self) -> Result<SubRiskResult, RiskError> {
        Ok(self.result.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Collaborator whose result is read from a JSON document on every call.
///
/// A missing file or a document without `score`, `max_score` or `alerts` is a
/// collaborator failure naming this collaborator.
#[derive(Debug, Clone)]
pub struct JsonFileSubRiskSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSubRiskSource {
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
        }
    }
}

impl SubRiskSource for JsonFileSubRiskSource {
    fn evaluate(&self) -> Result<SubRiskResult, RiskError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            RiskError::collaborator(&self.name, format!("{}: {}", self.path.display(), e))
        })?;
        let result: SubRiskResult = serde_json::from_str(&raw).map_err(|e| {
            RiskError::collaborator(&self.name, format!("{}: {}", self.path.display(), e))
        })?;

        debug!(
            collaborator = %self.name,
            path = %self.path.display(),
            score = result.score,
            alert_count = result.alerts.len(),
            "Loaded sub-risk result"
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_stubs_score_zero() {
        for source in [
            StaticSubRiskSource::rsi_overbought(),
            StaticSubRiskSource::rsi_divergence(),
            StaticSubRiskSource::trend(),
        ] {
            let result = source.evaluate().unwrap();
            assert_eq!(result.score, 0.0);
            assert!(result.alerts.is_empty());
        }
        assert_eq!(StaticSubRiskSource::trend().evaluate().unwrap().max_score, 10.0);
    }

    #[test]
    fn test_json_file_source_reads_result() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"component": "RSI Overbought", "score": 1.6, "max_score": 5.0,
                "alerts": ["RSI overbought (74.2) on 1d"], "values": {{"1d": 74.2}}}}"#
        )
        .unwrap();

        let source = JsonFileSubRiskSource::new(RSI_OVERBOUGHT, file.path());
        let result = source.evaluate().unwrap();
        assert_eq!(result.score, 1.6);
        assert_eq!(result.values.get("1d"), Some(&74.2));
        assert_eq!(source.name(), "rsi_overbought");
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSubRiskSource::new(TREND_RISK, "/nonexistent/trend.json");
        let err = source.evaluate().unwrap_err();
        assert!(matches!(err, RiskError::CollaboratorError { ref collaborator, .. } if collaborator == "trend_risk"));
    }

    #[test]
    fn test_json_file_source_malformed_result() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_score": 5.0, "alerts": []}}"#).unwrap();

        let source = JsonFileSubRiskSource::new(RSI_DIVERGENCE, file.path());
        let err = source.evaluate().unwrap_err();
        assert!(matches!(err, RiskError::CollaboratorError { ref collaborator, .. } if collaborator == "rsi_divergence"));
        assert!(err.to_string().contains("missing field `score`"));
    }
}
