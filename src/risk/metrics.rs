// Risk result definitions shared by the category calculators and the consolidator
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::math::round_dp;

/// The four risk blocks of the consolidated analysis, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Technical,
    StructuralBtc,
    MacroPlatform,
    DirectFinancial,
}

impl RiskCategory {
    /// Fixed order used for evaluation, report assembly and tie-breaking.
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Technical,
        RiskCategory::StructuralBtc,
        RiskCategory::MacroPlatform,
        RiskCategory::DirectFinancial,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RiskCategory::Technical => "Technical",
            RiskCategory::StructuralBtc => "Structural BTC",
            RiskCategory::MacroPlatform => "Macro & Platform",
            RiskCategory::DirectFinancial => "Direct Financial",
        }
    }

    /// Strategic weight of the category in the consolidated score.
    pub fn weight(&self) -> f64 {
        match self {
            RiskCategory::Technical => 0.15,
            RiskCategory::StructuralBtc => 0.20,
            RiskCategory::MacroPlatform => 0.30,
            RiskCategory::DirectFinancial => 0.35,
        }
    }

    /// Documented maximum raw score. Informational only, never enforced.
    pub fn documented_max_score(&self) -> f64 {
        match self {
            RiskCategory::Technical => 25.0,
            RiskCategory::StructuralBtc => 6.0,
            RiskCategory::MacroPlatform => 11.0,
            RiskCategory::DirectFinancial => 21.0,
        }
    }

    /// Alert reported when the category produced no alerts of its own.
    pub fn default_alert(&self) -> &'static str {
        match self {
            RiskCategory::Technical => "No technical alerts",
            RiskCategory::StructuralBtc => "Normal fundamentals, neutral Fear & Greed",
            RiskCategory::MacroPlatform => "Macro indicators and platforms normal",
            RiskCategory::DirectFinancial => "Healthy financial metrics",
        }
    }
}

/// Result of a single category calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: String,
    pub score: f64,
    pub weight: f64,
    pub alerts: Vec<String>,
}

impl CategoryResult {
    /// Build a result from the unrounded raw score. The score is rounded to one
    /// decimal and an empty alert list is replaced by the category sentinel.
    pub fn new(category: RiskCategory, raw_score: f64, alerts: Vec<String>) -> Self {
        let alerts = if alerts.is_empty() {
            vec![category.default_alert().to_string()]
        } else {
            alerts
        };

        Self {
            category: category.name().to_string(),
            score: round_dp(raw_score, 1),
            weight: category.weight(),
            alerts,
        }
    }

    pub fn weighted_score(&self) -> f64 {
        self.score * self.weight
    }
}

/// Discrete risk tiers of the normalized score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryLow,
    Controlled,
    Elevated,
    Critical,
    Extreme,
}

impl RiskTier {
    /// Display label. Kept apart from the tier itself so callers can render
    /// their own presentation.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::VeryLow => "✅ Very Low Risk",
            RiskTier::Controlled => "✅ Controlled Risk",
            RiskTier::Elevated => "⚠️ Elevated Risk",
            RiskTier::Critical => "🔴 Critical Risk",
            RiskTier::Extreme => "🚨 Extreme Risk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskTier::VeryLow => "Extremely safe position, operate normally.",
            RiskTier::Controlled => "Manageable risk, monitor regularly.",
            RiskTier::Elevated => "Heightened attention, consider reducing exposure.",
            RiskTier::Critical => "Reduce exposure immediately, monitor 24/7.",
            RiskTier::Extreme => "Reduce exposure as much as possible, high systemic risk.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub tier: RiskTier,
    pub label: String,
    pub description: String,
}

impl From<RiskTier> for ClassificationResult {
    fn from(tier: RiskTier) -> Self {
        Self {
            tier,
            label: tier.label().to_string(),
            description: tier.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub top_alert: String,
}

/// Final output of the consolidated risk analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    /// Normalized 0-10 score, rounded to two decimals. Not clamped.
    pub final_score: f64,
    pub classification: ClassificationResult,
    pub categories: Vec<CategoryResult>,
    pub summary: ReportSummary,
}

/// Result shape returned by the RSI, divergence and trend collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRiskResult {
    #[serde(default)]
    pub component: String,
    pub score: f64,
    pub max_score: f64,
    pub alerts: Vec<String>,
    /// Indicator values per timeframe (RSI collaborator)
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
    /// Divergences per timeframe (divergence collaborator)
    #[serde(default)]
    pub detected_divergences: BTreeMap<String, DivergenceDetail>,
    #[serde(default)]
    pub details: SubRiskDetails,
}

impl SubRiskResult {
    /// A zero-score result with no alerts.
    pub fn empty(component: &str, max_score: f64) -> Self {
        Self {
            component: component.to_string(),
            score: 0.0,
            max_score,
            alerts: Vec::new(),
            values: BTreeMap::new(),
            detected_divergences: BTreeMap::new(),
            details: SubRiskDetails::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceDetail {
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubRiskDetails {
    /// Trend strength score the trend risk was inverted from
    pub original_strength_score: Option<f64>,
}

/// Score of one technical sub-component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiOverboughtSummary {
    pub score: f64,
    pub max_score: f64,
    pub values: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiDivergenceSummary {
    pub score: f64,
    pub max_score: f64,
    pub divergences: BTreeMap<String, DivergenceDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRiskSummary {
    pub score: f64,
    pub max_score: f64,
    pub original_strength_score: f64,
}

/// Collaborator outputs passed through by the technical calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicatorSummary {
    pub rsi_overbought: RsiOverboughtSummary,
    pub rsi_divergence: RsiDivergenceSummary,
    pub trend_risk: TrendRiskSummary,
}

/// Full technical breakdown behind the technical category result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub result: CategoryResult,
    pub components: Vec<ComponentScore>,
    pub indicators: TechnicalIndicatorSummary,
}
