// Direct financial risk: health factor, leverage and WBTC backing
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::risk::{
    CategoryResult, CategoryRiskCalculator, FixedInputProvider, RiskCategory, RiskError,
    RiskInputProvider,
};
use crate::utils::math::display_float;

/// `(upper bound, score)`; first bracket with `hf < bound` wins
const HEALTH_FACTOR_BRACKETS: [(f64, f64); 4] = [(1.10, 7.0), (1.15, 5.0), (1.30, 3.0), (1.50, 2.0)];
const SAFE_HEALTH_FACTOR_SCORE: f64 = 0.0;

/// `(lower bound, score)`; first bracket with `leverage > bound` wins
const LEVERAGE_BRACKETS: [(f64, f64); 3] = [(3.0, 5.0), (2.0, 4.0), (1.5, 2.0)];
const BASE_LEVERAGE_SCORE: f64 = 1.0;

const CRITICAL_HEALTH_FACTOR_SCORE: f64 = 3.0;
const HIGH_LEVERAGE_SCORE: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInputs {
    pub health_factor: f64,
    pub leverage: f64,
    /// +3 when WBTC supply is abnormal
    pub wbtc_supply_abnormal: f64,
    /// Up to +7 by WBTC-BTC depeg percentage
    pub wbtc_parity: f64,
}

impl Default for FinancialInputs {
    fn default() -> Self {
        Self {
            health_factor: 1.13,
            leverage: 3.2,
            wbtc_supply_abnormal: 0.0,
            wbtc_parity: 0.0,
        }
    }
}

pub fn health_factor_score(health_factor: f64) -> f64 {
    HEALTH_FACTOR_BRACKETS
        .iter()
        .find(|(bound, _)| health_factor < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(SAFE_HEALTH_FACTOR_SCORE)
}

pub fn leverage_score(leverage: f64) -> f64 {
    LEVERAGE_BRACKETS
        .iter()
        .find(|(bound, _)| leverage > *bound)
        .map(|(_, score)| *score)
        .unwrap_or(BASE_LEVERAGE_SCORE)
}

pub struct FinancialRiskCalculator {
    inputs: Box<dyn RiskInputProvider<FinancialInputs>>,
}

impl FinancialRiskCalculator {
    pub fn new(inputs: Box<dyn RiskInputProvider<FinancialInputs>>) -> Self {
        Self { inputs }
    }

    pub fn with_inputs(inputs: FinancialInputs) -> Self {
        Self::new(Box::new(FixedInputProvider::new(inputs)))
    }
}

impl Default for FinancialRiskCalculator {
    fn default() -> Self {
        Self::with_inputs(FinancialInputs::default())
    }
}

impl CategoryRiskCalculator for FinancialRiskCalculator {
    fn calculate(&self) -> Result<CategoryResult, RiskError> {
        let inputs = self.inputs.provide()?;

        let hf_score = health_factor_score(inputs.health_factor);
        let lev_score = leverage_score(inputs.leverage);
        let raw_score = hf_score + lev_score + inputs.wbtc_supply_abnormal + inputs.wbtc_parity;

        debug!(
            health_factor = inputs.health_factor,
            hf_score = hf_score,
            leverage = inputs.leverage,
            leverage_score = lev_score,
            "Scored health factor and leverage"
        );

        let mut alerts = Vec::new();
        if hf_score >= CRITICAL_HEALTH_FACTOR_SCORE {
            alerts.push(format!("Critical HF: {}", display_float(inputs.health_factor)));
        }
        if lev_score >= HIGH_LEVERAGE_SCORE {
            alerts.push(format!("High leverage: {}x", display_float(inputs.leverage)));
        }
        if inputs.wbtc_supply_abnormal > 0.0 {
            alerts.push("Abnormal WBTC supply".to_string());
        }
        if inputs.wbtc_parity > 0.0 {
            alerts.push("WBTC-BTC parity deviation".to_string());
        }

        let result = CategoryResult::new(self.category(), raw_score, alerts);

        info!(
            category = %result.category,
            score = result.score,
            alert_count = result.alerts.len(),
            "Completed direct financial risk calculation"
        );

        Ok(result)
    }

    fn category(&self) -> RiskCategory {
        RiskCategory::DirectFinancial
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["health_factor", "leverage", "wbtc_supply", "wbtc_parity"]
    }
}
