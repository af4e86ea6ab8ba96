//! Scale per-unit economics to a planned sales volume

use shared::models::{CostInput, PlatformRule, ScenarioProjection};

use super::calculator::compute_result;
use super::money::{sum, times, to_decimal, to_f64};

/// Project revenue, total cost and profit over `unit_volume` sales
///
/// Margin and ROI are the per-unit values and do not depend on volume.
/// Totals saturate at the Decimal range.
pub fn project_scenario(
    rule: &PlatformRule,
    input: &CostInput,
    unit_volume: u32,
) -> ScenarioProjection {
    let unit = compute_result(rule, input);
    let unit_cost = sum([
        to_decimal(unit.total_product_cost),
        to_decimal(unit.total_deductions),
    ]);

    ScenarioProjection {
        projected_revenue: to_f64(times(to_decimal(input.sale_price), unit_volume)),
        total_cost: to_f64(times(unit_cost, unit_volume)),
        projected_profit: to_f64(times(to_decimal(unit.profit), unit_volume)),
        margin: unit.margin,
        roi: unit.roi,
    }
}
