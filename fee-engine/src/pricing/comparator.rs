//! Side-by-side profitability across every marketplace

use serde::Serialize;
use shared::models::{CalculationResult, CostInput, PlatformRule};

use super::calculator::compute_result;

/// One platform's result in the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub platform: PlatformRule,
    pub result: CalculationResult,
    /// Highest profit of the table, and strictly profitable
    pub is_best: bool,
}

/// Run the forward calculation on every rule, most profitable first
///
/// Each platform is priced at its own default commission: an override only
/// belongs to the platform it was typed for. An empty kit quantity counts as
/// one unit here. Ties keep catalog order.
pub fn compare_all_platforms(rules: &[PlatformRule], input: &CostInput) -> Vec<ComparisonRow> {
    let mut input = input.without_custom_commission();
    if input.quantity == 0 {
        input.quantity = 1;
    }

    let mut rows: Vec<ComparisonRow> = rules
        .iter()
        .map(|rule| ComparisonRow {
            platform: rule.clone(),
            result: compute_result(rule, &input),
            is_best: false,
        })
        .collect();

    rows.sort_by(|a, b| b.result.profit.total_cmp(&a.result.profit));

    if let Some(top) = rows.first_mut()
        && top.result.profit > 0.0
    {
        top.is_best = true;
    }

    rows
}
