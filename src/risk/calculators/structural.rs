// Structural BTC risk: fundamental models and Fear & Greed
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::risk::{
    CategoryResult, CategoryRiskCalculator, FixedInputProvider, RiskCategory, RiskError,
    RiskInputProvider,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralInputs {
    /// Model variance, MVRV and VDD; up to +3 points
    pub fundamental_models_risk: f64,
    /// Progressive scale over an index of 80-100; up to +3 points
    pub fear_greed_risk: f64,
    /// Current Fear & Greed index, quoted in the alert
    pub fear_greed_index: u8,
}

impl Default for StructuralInputs {
    fn default() -> Self {
        Self {
            fundamental_models_risk: 1.0,
            fear_greed_risk: 1.5,
            fear_greed_index: 87,
        }
    }
}

pub struct StructuralRiskCalculator {
    inputs: Box<dyn RiskInputProvider<StructuralInputs>>,
}

impl StructuralRiskCalculator {
    pub fn new(inputs: Box<dyn RiskInputProvider<StructuralInputs>>) -> Self {
        Self { inputs }
    }

    pub fn with_inputs(inputs: StructuralInputs) -> Self {
        Self::new(Box::new(FixedInputProvider::new(inputs)))
    }
}

impl Default for StructuralRiskCalculator {
    fn default() -> Self {
        Self::with_inputs(StructuralInputs::default())
    }
}

impl CategoryRiskCalculator for StructuralRiskCalculator {
    fn calculate(&self) -> Result<CategoryResult, RiskError> {
        let inputs = self.inputs.provide()?;
        let raw_score = inputs.fundamental_models_risk + inputs.fear_greed_risk;

        let mut alerts = Vec::new();
        if inputs.fundamental_models_risk > 0.0 {
            alerts.push("Stretched fundamentals".to_string());
        }
        if inputs.fear_greed_risk > 0.0 {
            alerts.push(format!("Fear & Greed: {} (greed)", inputs.fear_greed_index));
        }

        let result = CategoryResult::new(self.category(), raw_score, alerts);

        info!(
            category = %result.category,
            score = result.score,
            fundamental_models_risk = inputs.fundamental_models_risk,
            fear_greed_risk = inputs.fear_greed_risk,
            "Completed structural risk calculation"
        );

        Ok(result)
    }

    fn category(&self) -> RiskCategory {
        RiskCategory::StructuralBtc
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["fundamental_models", "fear_and_greed"]
    }
}
