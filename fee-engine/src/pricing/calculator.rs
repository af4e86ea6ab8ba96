//! Forward fee calculation
//!
//! Given a platform rule and a resolved cost input, compute every deduction
//! and the resulting profit, margin, ROI and break-even price.
//!
//! # Calculation Steps
//! 1. units = kit quantity (kits) or 1; product cost = cost * units
//! 2. shipping per the platform's shipping policy
//! 3. commission = price * (custom or default rate)
//! 4. fixed fee when `always_apply_fixed`, or price below `threshold`
//! 5. tax and marketing as percentages of price
//! 6. deductions, net revenue, profit, margin, ROI, break-even
//!
//! The function is total: zero price gives zero margin, zero product cost
//! gives zero ROI, amounts beyond the Decimal range saturate, and an
//! unreachable break-even is reported as [`PriceSolution::Infeasible`].

use rust_decimal::prelude::*;
use shared::models::{CalculationResult, CostInput, PlatformRule, PriceSolution};

use super::money::{percent_of, ratio_percent, sum, times, to_decimal, to_f64};
use super::shipping::effective_shipping;
use super::solver::price_for_rate;

/// Commission rate in effect: the override when set, else the platform default
pub fn commission_rate(rule: &PlatformRule, input: &CostInput) -> f64 {
    input.custom_commission.unwrap_or(rule.default_commission)
}

/// Compute the full deduction breakdown for one sale
pub fn compute_result(rule: &PlatformRule, input: &CostInput) -> CalculationResult {
    let sale_price = to_decimal(input.sale_price);
    let total_product_cost = times(to_decimal(input.cost), input.units());
    let shipping = to_decimal(effective_shipping(
        rule,
        input.sale_price,
        input.shipping_cost,
    ));
    let other_costs = to_decimal(input.other_costs);

    let commission_rate = to_decimal(commission_rate(rule, input));
    let tax_rate = to_decimal(input.tax_rate);
    let marketing_rate = to_decimal(input.marketing_rate);

    let commission_value = percent_of(sale_price, commission_rate);
    let fixed_fee_value = if rule.fixed_fee_applies(input.sale_price) {
        to_decimal(rule.default_fixed_fee)
    } else {
        Decimal::ZERO
    };
    let tax_value = percent_of(sale_price, tax_rate);
    let marketing_value = percent_of(sale_price, marketing_rate);

    let total_deductions = sum([
        commission_value,
        fixed_fee_value,
        tax_value,
        marketing_value,
        shipping,
        other_costs,
    ]);
    let net_revenue = sale_price.saturating_sub(total_deductions);
    let profit = net_revenue.saturating_sub(total_product_cost);

    let margin = ratio_percent(profit, sale_price);
    let roi = ratio_percent(profit, total_product_cost);

    // Break-even only checks the threshold for the fixed fee; platforms that
    // always charge it are treated as fee-free here.
    let threshold = rule.threshold.unwrap_or(0.0);
    let break_even_fixed_fee = if input.sale_price < threshold {
        to_decimal(rule.default_fixed_fee)
    } else {
        Decimal::ZERO
    };
    let hard_costs = sum([total_product_cost, shipping, other_costs, break_even_fixed_fee]);
    let variable_rate = sum([commission_rate, tax_rate, marketing_rate]) / Decimal::ONE_HUNDRED;
    let break_even = price_for_rate(hard_costs, variable_rate);

    if !break_even.is_feasible() {
        tracing::debug!(
            platform = %rule.id,
            %variable_rate,
            "break-even undefined: variable rate reaches 100%"
        );
    }

    CalculationResult {
        commission_value: to_f64(commission_value),
        fixed_fee_value: to_f64(fixed_fee_value),
        tax_value: to_f64(tax_value),
        marketing_value: to_f64(marketing_value),
        shipping_value: to_f64(shipping),
        total_deductions: to_f64(total_deductions),
        total_product_cost: to_f64(total_product_cost),
        net_revenue: to_f64(net_revenue),
        profit: to_f64(profit),
        margin: to_f64(margin),
        roi: to_f64(roi),
        break_even,
    }
}
