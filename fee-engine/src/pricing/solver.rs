//! Reverse pricing: sale price needed for a target net margin
//!
//! Every percentage deduction (commission, tax, marketing) plus the target
//! margin is folded into one rate `r`; every currency-fixed cost into `F`.
//! Then `price = F / (1 - r)`, which only exists while `r < 1`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{CostInput, PlatformRule, PriceSolution};

use super::calculator::commission_rate;
use super::money::{percent_of, sum, times, to_decimal, to_f64};

/// Solve `fixed_costs / (1 - rate)` where `rate` is a fraction (0.25 = 25%)
///
/// Returns `Infeasible` when `rate >= 1`, the price would be negative, or
/// it does not fit in a `Decimal`.
pub fn price_for_rate(fixed_costs: Decimal, rate: Decimal) -> PriceSolution {
    if rate >= Decimal::ONE {
        tracing::trace!(%rate, "variable rate at or above 100%, no price exists");
        return PriceSolution::Infeasible;
    }
    match fixed_costs.checked_div(Decimal::ONE.saturating_sub(rate)) {
        Some(price) if price >= Decimal::ZERO => PriceSolution::Feasible(to_f64(price)),
        _ => PriceSolution::Infeasible,
    }
}

/// Sale price at which the net margin equals `target_margin_percent`
///
/// Cost, other costs and the entered shipping cost are held at their current
/// values. The platform's fixed fee is always included: the threshold is not
/// re-checked against the solved price, and the platform's shipping policy is
/// not applied to the shipping input.
pub fn solve_price_for_margin(
    rule: &PlatformRule,
    input: &CostInput,
    target_margin_percent: f64,
) -> PriceSolution {
    let total_product_cost = times(to_decimal(input.cost), input.units());

    let fixed_costs = sum([
        total_product_cost,
        to_decimal(input.other_costs),
        to_decimal(input.shipping_cost),
        to_decimal(rule.default_fixed_fee),
    ]);

    let rate = sum([
        to_decimal(commission_rate(rule, input)),
        to_decimal(input.tax_rate),
        to_decimal(input.marketing_rate),
        to_decimal(target_margin_percent),
    ]) / Decimal::ONE_HUNDRED;

    price_for_rate(fixed_costs, rate)
}

/// Prices and volume projection for a target margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlan {
    pub target_margin: f64,
    pub volume: u32,
    /// Price for a 0% margin
    pub break_even_price: PriceSolution,
    pub target_price: PriceSolution,
    pub projected_revenue: f64,
    pub projected_profit: f64,
}

/// Break-even and target prices, projected over `volume` units
///
/// Projected values are zero when the target price is infeasible.
pub fn plan_for_target(
    rule: &PlatformRule,
    input: &CostInput,
    target_margin_percent: f64,
    volume: u32,
) -> TargetPlan {
    let break_even_price = solve_price_for_margin(rule, input, 0.0);
    let target_price = solve_price_for_margin(rule, input, target_margin_percent);

    let (projected_revenue, projected_profit) = match target_price {
        PriceSolution::Feasible(price) => {
            let revenue = times(to_decimal(price), volume);
            let profit = percent_of(revenue, to_decimal(target_margin_percent));
            (to_f64(revenue), to_f64(profit))
        }
        PriceSolution::Infeasible => (0.0, 0.0),
    };

    TargetPlan {
        target_margin: target_margin_percent,
        volume,
        break_even_price,
        target_price,
        projected_revenue,
        projected_profit,
    }
}
