// Risk calculator traits and collaborator interfaces
use crate::risk::{CategoryResult, RiskCategory, RiskError, SubRiskResult};

/// Core trait that all category risk calculators implement
pub trait CategoryRiskCalculator: Send + Sync {
    /// Evaluate the category and return its weighted result
    fn calculate(&self) -> Result<CategoryResult, RiskError>;

    /// The category this calculator scores
    fn category(&self) -> RiskCategory;

    /// Risk factors feeding the raw score
    fn risk_factors(&self) -> Vec<&'static str>;

    fn weight(&self) -> f64 {
        self.category().weight()
    }

    fn get_config(&self) -> serde_json::Value {
        serde_json::json!({
            "category": self.category().name(),
            "weight": self.weight(),
            "documented_max_score": self.category().documented_max_score(),
            "risk_factors": self.risk_factors()
        })
    }
}

/// External sub-risk calculator (RSI overbought, RSI divergence, trend).
///
/// The scoring internals live outside this crate; implementations only have to
/// hand back a well-formed [`SubRiskResult`].
pub trait SubRiskSource: Send + Sync {
    fn evaluate(&self) -> Result<SubRiskResult, RiskError>;

    /// Collaborator name used in logs and errors
    fn name(&self) -> &str;
}

/// Supplies the raw inputs of one category, so live data can replace the
/// fixed constants without touching the scoring rules.
pub trait RiskInputProvider<I>: Send + Sync {
    fn provide(&self) -> Result<I, RiskError>;
}

/// Provider returning the same inputs on every call
#[derive(Debug, Clone, Default)]
pub struct FixedInputProvider<I> {
    inputs: I,
}

impl<I> FixedInputProvider<I> {
    pub fn new(inputs: I) -> Self {
        Self { inputs }
    }
}

impl<I: Clone + Send + Sync> RiskInputProvider<I> for FixedInputProvider<I> {
    fn provide(&self) -> Result<I, RiskError> {
        Ok(self.inputs.clone())
    }
}
