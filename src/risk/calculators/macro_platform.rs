// Macro & platform risk
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::risk::{
    CategoryResult, CategoryRiskCalculator, FixedInputProvider, RiskCategory, RiskError,
    RiskInputProvider,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroPlatformInputs {
    /// MOVE, DXY, VIX, US10Y, gold and M2; up to +6 points
    pub macro_risk: f64,
    /// Critical events on AAVE, ETH or USDC; up to +5 points
    pub platform_risk: f64,
}

impl Default for MacroPlatformInputs {
    fn default() -> Self {
        Self {
            macro_risk: 1.0,
            platform_risk: 0.0,
        }
    }
}

pub struct MacroPlatformRiskCalculator {
    inputs: Box<dyn RiskInputProvider<MacroPlatformInputs>>,
}

impl MacroPlatformRiskCalculator {
    pub fn new(inputs: Box<dyn RiskInputProvider<MacroPlatformInputs>>) -> Self {
        Self { inputs }
    }

    pub fn with_inputs(inputs: MacroPlatformInputs) -> Self {
        Self::new(Box::new(FixedInputProvider::new(inputs)))
    }
}

impl Default for MacroPlatformRiskCalculator {
    fn default() -> Self {
        Self::with_inputs(MacroPlatformInputs::default())
    }
}

impl CategoryRiskCalculator for MacroPlatformRiskCalculator {
    fn calculate(&self) -> Result<CategoryResult, RiskError> {
        let inputs = self.inputs.provide()?;
        let raw_score = inputs.macro_risk + inputs.platform_risk;

        let mut alerts = Vec::new();
        if inputs.macro_risk > 0.0 {
            alerts.push("Gold in strong uptrend".to_string());
        }
        if inputs.platform_risk > 0.0 {
            alerts.push("Platform risk detected".to_string());
        }

        let result = CategoryResult::new(self.category(), raw_score, alerts);

        info!(
            category = %result.category,
            score = result.score,
            macro_risk = inputs.macro_risk,
            platform_risk = inputs.platform_risk,
            "Completed macro & platform risk calculation"
        );

        Ok(result)
    }

    fn category(&self) -> RiskCategory {
        RiskCategory::MacroPlatform
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["macro_indicators", "platform_events"]
    }
}
