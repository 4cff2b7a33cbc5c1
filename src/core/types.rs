use serde::{Deserialize, Serialize};

/// Number of distinct line colors the chart cycles through.
pub const CHART_PALETTE_SIZE: usize = 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GrowthRule {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    FlatAnnualIncrement { amount_per_month: f64 },
    CompoundAnnualPercent { percent: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub horizon_years: u32,
    #[serde(default)]
    pub growth_rule: GrowthRule,
}

/// Balances are in whole display units; the identity
/// `final_balance == round(principal) + total_contributed + total_interest_earned`
/// holds exactly because interest is the residual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub monthly_balances: Vec<i64>,
    pub final_balance: i64,
    pub total_contributed: i64,
    pub total_interest_earned: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub input: ScenarioInput,
    pub result: ScenarioResult,
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSeries {
    pub label: String,
    pub points: Vec<i64>,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub max_months: u32,
    pub series: Vec<NamedSeries>,
}
