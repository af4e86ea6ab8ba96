//! Properties of the fee engine across the whole built-in catalog

use fee_engine::pricing::{commission_rate, effective_shipping, is_shipping_locked};
use fee_engine::{
    PlatformCatalog, compare_all_platforms, compute_result, project_scenario,
    solve_price_for_margin,
};
use shared::models::{CalculatorState, CostInput, PriceSolution};

const EPS: f64 = 1e-6;

fn inputs() -> Vec<CostInput> {
    let base = CalculatorState::default().resolve();
    let mut out = Vec::new();
    for price in [0.0, 9.9, 35.0, 78.99, 79.0, 129.9, 499.0] {
        for shipping in [0.0, 12.5, 24.9] {
            out.push(CostInput {
                sale_price: price,
                shipping_cost: shipping,
                ..base.clone()
            });
        }
    }
    out.push(CostInput {
        is_kit: true,
        quantity: 4,
        sale_price: 150.0,
        ..base.clone()
    });
    out.push(CostInput::default());
    out
}

#[test]
fn profit_reconciles_with_deductions() {
    let catalog = PlatformCatalog::builtin();
    for rule in catalog.rules() {
        for input in inputs() {
            let r = compute_result(rule, &input);
            let shipping = effective_shipping(rule, input.sale_price, input.shipping_cost);
            let expected = input.sale_price
                - (r.commission_value
                    + r.fixed_fee_value
                    + r.tax_value
                    + r.marketing_value
                    + shipping
                    + input.other_costs)
                - r.total_product_cost;
            assert!(
                (r.profit - expected).abs() < EPS,
                "{} at {}: {} != {}",
                rule.id,
                input.sale_price,
                r.profit,
                expected
            );
            assert!(r.margin.is_finite() && r.roi.is_finite());
        }
    }
}

#[test]
fn zero_denominators_give_zero_ratios() {
    let catalog = PlatformCatalog::builtin();
    for rule in catalog.rules() {
        let no_price = CostInput {
            sale_price: 0.0,
            ..CalculatorState::default().resolve()
        };
        assert_eq!(compute_result(rule, &no_price).margin, 0.0);

        let no_cost = CostInput {
            cost: 0.0,
            ..CalculatorState::default().resolve()
        };
        assert_eq!(compute_result(rule, &no_cost).roi, 0.0);
    }
}

#[test]
fn locked_shipping_is_never_charged() {
    let catalog = PlatformCatalog::builtin();
    for rule in catalog.rules() {
        for input in inputs() {
            let r = compute_result(rule, &input);
            if is_shipping_locked(rule, input.sale_price) {
                assert_eq!(r.shipping_value, 0.0, "{}", rule.id);
            } else {
                assert_eq!(r.shipping_value, input.shipping_cost, "{}", rule.id);
            }
        }
    }
}

#[test]
fn comparator_is_sorted_and_flags_at_most_one() {
    let catalog = PlatformCatalog::builtin();
    for input in inputs() {
        let rows = compare_all_platforms(catalog.rules(), &input);
        assert_eq!(rows.len(), catalog.rules().len());
        for pair in rows.windows(2) {
            assert!(pair[0].result.profit >= pair[1].result.profit);
        }
        let best: Vec<_> = rows.iter().filter(|r| r.is_best).collect();
        assert!(best.len() <= 1);
        if let Some(best) = best.first() {
            assert_eq!(best.platform.id, rows[0].platform.id);
            assert!(best.result.profit > 0.0);
        } else {
            assert!(rows[0].result.profit <= 0.0);
        }
    }
}

#[test]
fn projection_is_linear_in_volume() {
    let catalog = PlatformCatalog::builtin();
    let input = CalculatorState::default().resolve();
    for rule in catalog.rules() {
        let unit = project_scenario(rule, &input, 1);
        for volume in [0u32, 7, 250] {
            let p = project_scenario(rule, &input, volume);
            let v = f64::from(volume);
            assert!((p.projected_revenue - unit.projected_revenue * v).abs() < EPS);
            assert!((p.total_cost - unit.total_cost * v).abs() < EPS);
            assert!((p.projected_profit - unit.projected_profit * v).abs() < EPS);
            assert_eq!(p.margin, unit.margin);
            assert_eq!(p.roi, unit.roi);
        }
    }
}

#[test]
fn solver_matches_forward_model_on_seller_paid_platforms() {
    // Platforms that always charge the fixed fee and let the seller pay
    // shipping: forward and inverse models share every term.
    let catalog = PlatformCatalog::builtin();
    let input = CostInput {
        cost: 40.0,
        shipping_cost: 15.0,
        tax_rate: 6.0,
        marketing_rate: 2.0,
        other_costs: 3.0,
        ..CostInput::default()
    };
    for id in ["shopee_std", "amazon", "magalu", "tiktok"] {
        let rule = catalog.get(id).unwrap();
        for target in [0.0, 10.0, 25.0] {
            let price = solve_price_for_margin(rule, &input, target)
                .price()
                .unwrap();
            let check = compute_result(
                rule,
                &CostInput {
                    sale_price: price,
                    ..input.clone()
                },
            );
            assert!(
                (check.margin - target).abs() < EPS,
                "{id} target {target}: margin {}",
                check.margin
            );
        }
    }
}

#[test]
fn solver_reports_unreachable_targets() {
    let catalog = PlatformCatalog::builtin();
    let input = CostInput {
        cost: 15.0,
        sale_price: 35.0,
        tax_rate: 30.0,
        marketing_rate: 15.0,
        custom_commission: Some(60.0),
        ..CostInput::default()
    };
    let rule = catalog.get("ml_premium").unwrap();
    assert_eq!(commission_rate(rule, &input), 60.0);
    assert_eq!(
        solve_price_for_margin(rule, &input, 10.0),
        PriceSolution::Infeasible
    );
    // Forward calculation still works on the same input
    let r = compute_result(rule, &input);
    assert!(r.profit.is_finite());
}

#[test]
fn mercado_livre_premium_reference_sale() {
    let catalog = PlatformCatalog::builtin();
    let rule = catalog.get("ml_premium").unwrap();
    let input = CalculatorState::default().resolve();
    let r = compute_result(rule, &input);

    assert!((r.commission_value - 6.65).abs() < EPS);
    assert!((r.fixed_fee_value - 6.75).abs() < EPS);
    assert!((r.tax_value - 1.4).abs() < EPS);
    assert!((r.marketing_value - 1.75).abs() < EPS);
    assert!((r.total_deductions - 18.3).abs() < EPS);
    assert!((r.total_product_cost - 15.0).abs() < EPS);
    assert!((r.profit - 1.7).abs() < EPS);
    assert!((r.margin - 4.857_142_857).abs() < EPS);
    assert!((r.roi - 11.333_333_333).abs() < EPS);

    let at_threshold = compute_result(
        rule,
        &CostInput {
            sale_price: 79.0,
            shipping_cost: 21.0,
            ..input
        },
    );
    assert_eq!(at_threshold.fixed_fee_value, 0.0);
    assert_eq!(at_threshold.shipping_value, 21.0);
}

#[test]
fn extreme_inputs_give_finite_results() {
    let catalog = PlatformCatalog::builtin();
    let extremes = [
        CostInput {
            cost: 1e25,
            is_kit: true,
            quantity: u32::MAX,
            sale_price: 50.0,
            ..CostInput::default()
        },
        CostInput {
            cost: 10.0,
            sale_price: f64::MAX,
            tax_rate: 1e30,
            ..CostInput::default()
        },
        CostInput {
            cost: -1e28,
            sale_price: 1e28,
            shipping_cost: 1e28,
            other_costs: 1e28,
            custom_commission: Some(-1e28),
            ..CostInput::default()
        },
    ];

    for rule in catalog.rules() {
        for input in &extremes {
            let r = compute_result(rule, input);
            for value in [r.total_deductions, r.profit, r.margin, r.roi] {
                assert!(value.is_finite(), "{}: {value}", rule.id);
            }
            let _ = solve_price_for_margin(rule, input, 20.0);
            let p = project_scenario(rule, input, u32::MAX);
            assert!(p.projected_profit.is_finite());
        }
    }
    let rows = compare_all_platforms(catalog.rules(), &extremes[0]);
    assert_eq!(rows.len(), catalog.rules().len());
}
