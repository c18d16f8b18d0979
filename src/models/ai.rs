use serde::{Deserialize, Serialize};

use crate::models::plan::PlanDay;

/// Itinerary produced by the AI planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(default)]
    pub plan: Vec<PlanDay>,
}

/// Spending analysis produced by the AI budget advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    #[serde(default)]
    pub consumption_trend: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub budget_summary: String,
    #[serde(default)]
    pub risk_warning: String,
}
