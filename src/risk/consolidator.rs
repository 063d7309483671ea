// Risk Consolidator - combines the four category results into the final report
use std::cmp::Ordering;
use std::path::Path;

use tracing::{info, warn};

use crate::config::Settings;
use crate::risk::{
    classify, CategoryResult, CategoryRiskCalculator, ConsolidatedReport, FinancialRiskCalculator,
    FixedInputProvider, JsonFileSubRiskSource, MacroPlatformRiskCalculator, ReportSummary,
    RiskError, StaticSubRiskSource, StructuralRiskCalculator, SubRiskSource,
    TechnicalRiskCalculator, RSI_DIVERGENCE, RSI_OVERBOUGHT, TREND_RISK,
};
use crate::utils::math::{round_dp, weighted_sum};

/// Maximum attainable weighted sum under the documented per-category caps.
///
/// Not derived from the calculators. Raw category scores are not capped, so the
/// normalized score can exceed 10.
pub const THEORETICAL_MAX_WEIGHTED_SCORE: f64 = 14.1;

/// Upper end of the normalized scale
pub const NORMALIZED_SCALE: f64 = 10.0;

/// Number of categories named in the summary alert
pub const TOP_ALERT_COMPONENTS: usize = 2;

/// Runs the category calculators in fixed order and consolidates their results
pub struct RiskConsolidator {
    calculators: [Box<dyn CategoryRiskCalculator>; 4],
}

impl RiskConsolidator {
    pub fn new(
        technical: Box<dyn CategoryRiskCalculator>,
        structural: Box<dyn CategoryRiskCalculator>,
        macro_platform: Box<dyn CategoryRiskCalculator>,
        financial: Box<dyn CategoryRiskCalculator>,
    ) -> Self {
        Self {
            calculators: [technical, structural, macro_platform, financial],
        }
    }

    /// Build the calculators from configured inputs and collaborator files
    pub fn from_settings(settings: &Settings) -> Self {
        let collaborators = &settings.collaborators;
        let rsi_overbought = sub_risk_source(
            RSI_OVERBOUGHT,
            collaborators.rsi_overbought.as_deref(),
            StaticSubRiskSource::rsi_overbought,
        );
        let rsi_divergence = sub_risk_source(
            RSI_DIVERGENCE,
            collaborators.rsi_divergence.as_deref(),
            StaticSubRiskSource::rsi_divergence,
        );
        let trend = sub_risk_source(TREND_RISK, collaborators.trend.as_deref(), StaticSubRiskSource::trend);

        let inputs = &settings.inputs;
        Self::new(
            Box::new(TechnicalRiskCalculator::new(
                Box::new(FixedInputProvider::new(inputs.technical.clone())),
                rsi_overbought,
                rsi_divergence,
                trend,
            )),
            Box::new(StructuralRiskCalculator::with_inputs(inputs.structural.clone())),
            Box::new(MacroPlatformRiskCalculator::with_inputs(inputs.macro_platform.clone())),
            Box::new(FinancialRiskCalculator::with_inputs(inputs.financial.clone())),
        )
    }

    /// Evaluate every category and assemble the consolidated report.
    ///
    /// Any calculator failure aborts the whole analysis.
    pub fn consolidate(&self) -> Result<ConsolidatedReport, RiskError> {
        info!(
            categories = self.calculators.len(),
            "Starting consolidated risk analysis"
        );

        let categories = self
            .calculators
            .iter()
            .map(|calculator| calculator.calculate())
            .collect::<Result<Vec<CategoryResult>, RiskError>>()?;

        let consolidated_score = weighted_sum(categories.iter().map(|c| (&c.score, &c.weight)));
        let final_score = normalize_score(consolidated_score);

        if final_score > NORMALIZED_SCALE {
            warn!(
                consolidated_score = consolidated_score,
                final_score = final_score,
                theoretical_max = THEORETICAL_MAX_WEIGHTED_SCORE,
                "Normalized score exceeds the 0-10 scale; category scores are above their documented caps"
            );
        }

        let classification = classify(final_score);

        let weighted: Vec<(&str, f64)> = categories
            .iter()
            .map(|c| (c.category.as_str(), c.weighted_score()))
            .collect();
        let top_alert = top_alert_message(&top_weighted_categories(&weighted, TOP_ALERT_COMPONENTS));

        info!(
            consolidated_score = consolidated_score,
            final_score = final_score,
            tier = ?classification.tier,
            "Completed consolidated risk analysis"
        );

        Ok(ConsolidatedReport {
            final_score,
            classification,
            categories,
            summary: ReportSummary { top_alert },
        })
    }

    /// Configuration of each registered calculator, in report order
    pub fn describe(&self) -> serde_json::Value {
        serde_json::Value::Array(self.calculators.iter().map(|c| c.get_config()).collect())
    }
}

impl Default for RiskConsolidator {
    fn default() -> Self {
        Self::new(
            Box::new(TechnicalRiskCalculator::default()),
            Box::new(StructuralRiskCalculator::default()),
            Box::new(MacroPlatformRiskCalculator::default()),
            Box::new(FinancialRiskCalculator::default()),
        )
    }
}

fn sub_risk_source(
    name: &str,
    path: Option<&Path>,
    stub: fn() -> StaticSubRiskSource,
) -> Box<dyn SubRiskSource> {
    match path {
        Some(path) => Box::new(JsonFileSubRiskSource::new(name, path)),
        None => Box::new(stub()),
    }
}

/// Scale a weighted sum onto 0-10 and round to two decimals
pub fn normalize_score(consolidated_score: f64) -> f64 {
    round_dp(
        consolidated_score / THEORETICAL_MAX_WEIGHTED_SCORE * NORMALIZED_SCALE,
        2,
    )
}

/// Names of the `count` highest weighted scores. Ties keep input order.
pub fn top_weighted_categories<'a>(weighted: &[(&'a str, f64)], count: usize) -> Vec<&'a str> {
    let mut ranked = weighted.to_vec();
    // sort_by is stable; -0.0 == 0.0 and unordered (NaN) pairs count as ties
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().take(count).map(|(name, _)| name).collect()
}

pub fn top_alert_message(categories: &[&str]) -> String {
    format!(
        "Monitor the components with the highest risk weight: {}.",
        categories.join(" and ")
    )
}

/// Consolidated analysis over the fixed inputs and zero-score collaborator stubs
pub fn get_consolidated_risk_analysis() -> Result<ConsolidatedReport, RiskError> {
    RiskConsolidator::default().consolidate()
}
