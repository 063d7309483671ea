// Technical risk: EMA alignment, RSI overbought, RSI divergence and trend
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::risk::{
    CategoryResult, CategoryRiskCalculator, ComponentScore, FixedInputProvider, RiskCategory,
    RiskError, RiskInputProvider, RsiDivergenceSummary, RsiOverboughtSummary, StaticSubRiskSource,
    SubRiskSource, TechnicalAssessment, TechnicalIndicatorSummary, TrendRiskSummary,
};
use crate::utils::math::round_dp;

/// Documented cap of the EMA alignment component. Not enforced.
pub const EMA_ALIGNMENT_MAX_SCORE: f64 = 5.0;

const LOWER_TIMEFRAME_EMA_ALERT: &str = "Missing EMA alignment on 4H and intraday";
const HIGHER_TIMEFRAME_EMA_ALERT: &str = "Missing EMA alignment on higher timeframes";

/// Per-timeframe penalties for weak EMA alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaAlignmentPenalties {
    /// 1W, up to +2.0 when weak
    pub weekly: f64,
    /// 1D, up to +1.5 when weak
    pub daily: f64,
    /// 4H, up to +1.0 when weak
    pub four_hour: f64,
    /// 1H/30M/15M, up to +0.5 when weak
    pub intraday: f64,
}

impl Default for EmaAlignmentPenalties {
    fn default() -> Self {
        Self {
            weekly: 0.0,
            daily: 0.0,
            four_hour: 0.0,
            intraday: 0.5,
        }
    }
}

impl EmaAlignmentPenalties {
    pub fn total(&self) -> f64 {
        self.weekly + self.daily + self.four_hour + self.intraday
    }

    fn lower_timeframes_weak(&self) -> bool {
        self.four_hour > 0.0 || self.intraday > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalInputs {
    pub ema: EmaAlignmentPenalties,
}

pub struct TechnicalRiskCalculator {
    inputs: Box<dyn RiskInputProvider<TechnicalInputs>>,
    rsi_overbought: Box<dyn SubRiskSource>,
    rsi_divergence: Box<dyn SubRiskSource>,
    trend: Box<dyn SubRiskSource>,
}

impl TechnicalRiskCalculator {
    pub fn new(
        inputs: Box<dyn RiskInputProvider<TechnicalInputs>>,
        rsi_overbought: Box<dyn SubRiskSource>,
        rsi_divergence: Box<dyn SubRiskSource>,
        trend: Box<dyn SubRiskSource>,
    ) -> Self {
        Self {
            inputs,
            rsi_overbought,
            rsi_divergence,
            trend,
        }
    }

    /// Fixed EMA penalties with the given collaborators
    pub fn with_sources(
        rsi_overbought: Box<dyn SubRiskSource>,
        rsi_divergence: Box<dyn SubRiskSource>,
        trend: Box<dyn SubRiskSource>,
    ) -> Self {
        Self::new(
            Box::new(FixedInputProvider::new(TechnicalInputs::default())),
            rsi_overbought,
            rsi_divergence,
            trend,
        )
    }

    /// Run every sub-component and keep the full breakdown
    pub fn assess(&self) -> Result<TechnicalAssessment, RiskError> {
        let inputs = self.inputs.provide()?;

        let rsi = self.rsi_overbought.evaluate()?;
        let divergence = self.rsi_divergence.evaluate()?;
        let trend = self.trend.evaluate()?;

        let ema_risk = inputs.ema.total();
        let raw_score = ema_risk + rsi.score + divergence.score + trend.score;

        debug!(
            ema_risk = ema_risk,
            rsi_overbought = rsi.score,
            rsi_divergence = divergence.score,
            trend_risk = trend.score,
            "Calculated technical sub-components"
        );

        let mut alerts = Vec::new();
        if ema_risk > 0.0 {
            if inputs.ema.lower_timeframes_weak() {
                alerts.push(LOWER_TIMEFRAME_EMA_ALERT.to_string());
            } else {
                alerts.push(HIGHER_TIMEFRAME_EMA_ALERT.to_string());
            }
        }
        alerts.extend(rsi.alerts.iter().cloned());
        alerts.extend(divergence.alerts.iter().cloned());
        alerts.extend(trend.alerts.iter().cloned());

        let components = vec![
            ComponentScore {
                name: "EMA Alignment".to_string(),
                score: round_dp(ema_risk, 2),
                max_score: EMA_ALIGNMENT_MAX_SCORE,
            },
            ComponentScore {
                name: rsi.component.clone(),
                score: rsi.score,
                max_score: rsi.max_score,
            },
            ComponentScore {
                name: divergence.component.clone(),
                score: divergence.score,
                max_score: divergence.max_score,
            },
            ComponentScore {
                name: trend.component.clone(),
                score: trend.score,
                max_score: trend.max_score,
            },
        ];

        let indicators = TechnicalIndicatorSummary {
            rsi_overbought: RsiOverboughtSummary {
                score: rsi.score,
                max_score: rsi.max_score,
                values: rsi.values,
            },
            rsi_divergence: RsiDivergenceSummary {
                score: divergence.score,
                max_score: divergence.max_score,
                divergences: divergence.detected_divergences,
            },
            trend_risk: TrendRiskSummary {
                score: trend.score,
                max_score: trend.max_score,
                original_strength_score: trend.details.original_strength_score.unwrap_or(0.0),
            },
        };

        let result = CategoryResult::new(RiskCategory::Technical, raw_score, alerts);

        info!(
            category = %result.category,
            score = result.score,
            alert_count = result.alerts.len(),
            "Completed technical risk calculation"
        );

        Ok(TechnicalAssessment {
            result,
            components,
            indicators,
        })
    }
}

impl Default for TechnicalRiskCalculator {
    fn default() -> Self {
        Self::with_sources(
            Box::new(StaticSubRiskSource::rsi_overbought()),
            Box::new(StaticSubRiskSource::rsi_divergence()),
            Box::new(StaticSubRiskSource::trend()),
        )
    }
}

impl CategoryRiskCalculator for TechnicalRiskCalculator {
    fn calculate(&self) -> Result<CategoryResult, RiskError> {
        Ok(self.assess()?.result)
    }

    fn category(&self) -> RiskCategory {
        RiskCategory::Technical
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["ema_alignment", "rsi_overbought", "rsi_divergence", "trend_strength"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{DivergenceDetail, SubRiskResult};

    fn source(name: &str, score: f64, alerts: &[&str]) -> Box<dyn SubRiskSource> {
        let mut result = SubRiskResult::empty(name, 5.0);
        result.score = score;
        result.alerts = alerts.iter().map(|a| a.to_string()).collect();
        Box::new(StaticSubRiskSource::new(name, result))
    }

    fn calculator_with_ema(ema: EmaAlignmentPenalties) -> TechnicalRiskCalculator {
        TechnicalRiskCalculator::new(
            Box::new(FixedInputProvider::new(TechnicalInputs { ema })),
            Box::new(StaticSubRiskSource::rsi_overbought()),
            Box::new(StaticSubRiskSource::rsi_divergence()),
            Box::new(StaticSubRiskSource::trend()),
        )
    }

    #[test]
    fn test_default_technical_risk() {
        let result = TechnicalRiskCalculator::default().calculate().unwrap();
        assert_eq!(result.category, "Technical");
        assert_eq!(result.weight, 0.15);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.alerts, vec![LOWER_TIMEFRAME_EMA_ALERT.to_string()]);
    }

    #[test]
    fn test_higher_timeframe_ema_alert() {
        let calculator = calculator_with_ema(EmaAlignmentPenalties {
            weekly: 2.0,
            daily: 1.5,
            four_hour: 0.0,
            intraday: 0.0,
        });
        let result = calculator.calculate().unwrap();
        assert_eq!(result.score, 3.5);
        assert_eq!(result.alerts, vec![HIGHER_TIMEFRAME_EMA_ALERT.to_string()]);
    }

    #[test]
    fn test_lower_timeframe_alert_wins_tie() {
        let calculator = calculator_with_ema(EmaAlignmentPenalties {
            weekly: 2.0,
            daily: 0.0,
            four_hour: 1.0,
            intraday: 0.0,
        });
        let result = calculator.calculate().unwrap();
        assert_eq!(result.alerts, vec![LOWER_TIMEFRAME_EMA_ALERT.to_string()]);
    }

    #[test]
    fn test_no_alerts_falls_back_to_sentinel() {
        let calculator = calculator_with_ema(EmaAlignmentPenalties {
            weekly: 0.0,
            daily: 0.0,
            four_hour: 0.0,
            intraday: 0.0,
        });
        let result = calculator.calculate().unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.alerts, vec!["No technical alerts".to_string()]);
    }

    #[test]
    fn test_collaborator_alerts_keep_order() {
        let calculator = TechnicalRiskCalculator::with_sources(
            source("RSI Overbought", 1.6, &["RSI overbought (74.2) on 1d"]),
            source("RSI Divergences", 1.0, &["Bearish divergence on 4h", "Bearish divergence on 1h"]),
            source("Trend Analysis", 2.37, &["Minor signs of technical weakness"]),
        );
        let result = calculator.calculate().unwrap();

        // 0.5 + 1.6 + 1.0 + 2.37 = 5.47
        assert_eq!(result.score, 5.5);
        assert_eq!(
            result.alerts,
            vec![
                LOWER_TIMEFRAME_EMA_ALERT.to_string(),
                "RSI overbought (74.2) on 1d".to_string(),
                "Bearish divergence on 4h".to_string(),
                "Bearish divergence on 1h".to_string(),
                "Minor signs of technical weakness".to_string(),
            ]
        );
    }

    #[test]
    fn test_raw_score_is_not_capped() {
        let calculator = TechnicalRiskCalculator::with_sources(
            source("RSI Overbought", 10.0, &[]),
            source("RSI Divergences", 10.0, &[]),
            source("Trend Analysis", 10.0, &[]),
        );
        assert_eq!(calculator.calculate().unwrap().score, 30.5);
    }

    #[test]
    fn test_assessment_passes_through_indicators() {
        let mut rsi = SubRiskResult::empty("RSI Overbought", 4.9);
        rsi.values.insert("1w".to_string(), 71.3);
        let mut divergence = SubRiskResult::empty("RSI Divergences", 5.0);
        divergence.detected_divergences.insert(
            "4h".to_string(),
            DivergenceDetail {
                kind: "bearish".to_string(),
                date: "2025-04-02 12:00".to_string(),
            },
        );
        let mut trend = SubRiskResult::empty("Trend Analysis", 10.0);
        trend.details.original_strength_score = Some(8.4);

        let calculator = TechnicalRiskCalculator::with_sources(
            Box::new(StaticSubRiskSource::new("rsi", rsi)),
            Box::new(StaticSubRiskSource::new("divergence", divergence)),
            Box::new(StaticSubRiskSource::new("trend", trend)),
        );
        let assessment = calculator.assess().unwrap();

        assert_eq!(assessment.components.len(), 4);
        assert_eq!(assessment.components[0].name, "EMA Alignment");
        assert_eq!(assessment.components[0].max_score, EMA_ALIGNMENT_MAX_SCORE);
        assert_eq!(assessment.indicators.rsi_overbought.values.get("1w"), Some(&71.3));
        assert_eq!(assessment.indicators.rsi_overbought.max_score, 4.9);
        assert_eq!(assessment.indicators.rsi_divergence.divergences["4h"].kind, "bearish");
        assert_eq!(assessment.indicators.trend_risk.original_strength_score, 8.4);
    }

    #[test]
    fn test_collaborator_failure_propagates() {
        struct Unavailable;
        impl SubRiskSource for Unavailable {
            fn evaluate(&self) -> Result<SubRiskResult, RiskError> {
                Err(RiskError::collaborator("trend_risk", "EMA endpoint returned 503"))
            }
            fn name(&self) -> &str {
                "trend_risk"
            }
        }

        let calculator = TechnicalRiskCalculator::with_sources(
            Box::new(StaticSubRiskSource::rsi_overbought()),
            Box::new(StaticSubRiskSource::rsi_divergence()),
            Box::new(Unavailable),
        );
        assert!(matches!(calculator.calculate(), Err(RiskError::CollaboratorError { .. })));
    }
}
