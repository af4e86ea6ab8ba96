//! Text and JSON rendering for CLI results
//!
//! Amounts are rounded to cents only here; everything upstream keeps full
//! precision.

use std::fmt::Write as _;

use serde::Serialize;
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{Client, PlanningScenario, PlatformRule, PriceSolution, SavedSimulation};

use crate::metrics::{AdStats, ClientSummary, WeeklyComparison};
use crate::pricing::{ComparisonRow, TargetPlan, round_money};
use crate::services::Calculation;

/// Print `data` as the JSON success envelope, or as text
pub fn emit<T, F>(json: bool, data: &T, render: F) -> AppResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        let body = serde_json::to_string_pretty(&ApiResponse::success(data))
            .map_err(|e| AppError::internal(format!("Failed to encode response: {e}")))?;
        println!("{body}");
    } else {
        println!("{}", render(data));
    }
    Ok(())
}

/// Print an error as the JSON error envelope, or as a message on stderr
pub fn print_error(err: &AppError, json: bool) {
    if json {
        match serde_json::to_string_pretty(&ApiResponse::<()>::error(err)) {
            Ok(body) => println!("{body}"),
            Err(_) => eprintln!("error {}: {}", err.code.code(), err.message),
        }
    } else {
        eprintln!("error {}: {}", err.code.code(), err.message);
    }
}

pub fn money(value: f64) -> String {
    format!("R$ {:.2}", round_money(value))
}

pub fn percent(value: f64) -> String {
    format!("{:.2}%", round_money(value))
}

fn price(solution: &PriceSolution) -> String {
    match solution {
        PriceSolution::Feasible(p) => money(*p),
        PriceSolution::Infeasible => "inviável".to_string(),
    }
}

pub fn render_platforms(rules: &[PlatformRule]) -> String {
    let mut out = format!(
        "{:<14} {:<28} {:>10} {:>10} {:>10}\n",
        "ID", "PLATAFORMA", "COMISSÃO", "TAXA FIXA", "LIMITE"
    );
    for rule in rules {
        let threshold = match (rule.always_apply_fixed, rule.threshold) {
            (true, _) => "sempre".to_string(),
            (false, Some(t)) => format!("< {t:.2}"),
            (false, None) => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<14} {:<28} {:>10} {:>10} {:>10}",
            rule.id,
            rule.display_name(),
            percent(rule.default_commission),
            money(rule.default_fixed_fee),
            threshold
        );
    }
    out
}

pub fn render_calculation(calc: &Calculation) -> String {
    let r = &calc.result;
    let mut out = String::new();
    let _ = writeln!(out, "{}", calc.platform.display_name());
    let rows = [
        (format!("Comissão ({})", percent(calc.commission_rate)), r.commission_value),
        ("Taxa fixa".to_string(), r.fixed_fee_value),
        ("Impostos".to_string(), r.tax_value),
        ("Marketing".to_string(), r.marketing_value),
        (calc.shipping_label.to_string(), r.shipping_value),
        ("Total de deduções".to_string(), r.total_deductions),
        ("Custo do produto".to_string(), r.total_product_cost),
        ("Receita líquida".to_string(), r.net_revenue),
        ("Lucro".to_string(), r.profit),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<32} {:>14}", money(value));
    }
    let _ = writeln!(out, "  {:<32} {:>14}", "Margem", percent(r.margin));
    let _ = writeln!(out, "  {:<32} {:>14}", "ROI", percent(r.roi));
    let _ = write!(out, "  {:<32} {:>14}", "Ponto de equilíbrio", price(&r.break_even));
    out
}

pub fn render_comparison(rows: &[ComparisonRow]) -> String {
    let mut out = format!(
        "{:<28} {:>12} {:>12} {:>10}\n",
        "PLATAFORMA", "DEDUÇÕES", "LUCRO", "MARGEM"
    );
    for row in rows {
        let marker = if row.is_best { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:<28} {:>12} {:>12} {:>10}{marker}",
            row.platform.display_name(),
            money(row.result.total_deductions),
            money(row.result.profit),
            percent(row.result.margin)
        );
    }
    out
}

pub fn render_plan(plan: &TargetPlan) -> String {
    format!(
        "Preço mínimo (0%):        {}\n\
         Preço para {}:   {}\n\
         Receita em {} un.:        {}\n\
         Lucro em {} un.:          {}",
        price(&plan.break_even_price),
        percent(plan.target_margin),
        price(&plan.target_price),
        plan.volume,
        money(plan.projected_revenue),
        plan.volume,
        money(plan.projected_profit)
    )
}

pub fn render_history(history: &[SavedSimulation]) -> String {
    if history.is_empty() {
        return "Nenhuma simulação salva".to_string();
    }
    let mut out = String::new();
    for sim in history {
        let _ = writeln!(
            out,
            "{}  {:<24} {:<12} lucro {:>12}  margem {:>8}",
            sim.id,
            sim.product_name,
            sim.platform_id,
            money(sim.results_summary.profit),
            percent(sim.results_summary.margin)
        );
    }
    out
}

pub fn render_scenario(scenario: &PlanningScenario) -> String {
    let r = &scenario.current_results;
    format!(
        "{}  {:<24} {:<12} {:>6} un.  receita {:>12}  custo {:>12}  lucro {:>12}  margem {:>8}",
        scenario.id,
        scenario.product_name,
        scenario.platform_id,
        scenario.units(),
        money(r.projected_revenue),
        money(r.total_cost),
        money(r.projected_profit),
        percent(r.margin)
    )
}

pub fn render_scenarios(scenarios: &[PlanningScenario]) -> String {
    if scenarios.is_empty() {
        return "Nenhum cenário salvo".to_string();
    }
    scenarios
        .iter()
        .map(render_scenario)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_clients(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "Nenhum cliente".to_string();
    }
    let mut out = String::new();
    for client in clients {
        let status = if client.is_active { "ativo" } else { "inativo" };
        let _ = writeln!(
            out,
            "{}  {:<24} {:<8} {}",
            client.id,
            client.name,
            status,
            client.platforms.join(", ")
        );
    }
    out
}

fn render_stats(stats: &AdStats) -> String {
    format!(
        "receita {:>12}  investimento {:>12}  ROAS {:>6.2}  CTR {:>8}  conversão {:>8}  pedidos {}",
        money(stats.revenue),
        money(stats.ad_spend),
        stats.roas,
        percent(stats.ctr),
        percent(stats.conversion),
        stats.orders
    )
}

/// Overview totals plus the client ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub totals: AdStats,
    pub clients: Vec<ClientSummary>,
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = format!("Total: {}\n", render_stats(&dashboard.totals));
    for row in &dashboard.clients {
        let _ = writeln!(out, "  {:<24} {}", row.client.name, render_stats(&row.stats));
    }
    out
}

pub fn render_weekly(comparison: &WeeklyComparison) -> String {
    let line = |label: &str, week: &Option<crate::metrics::WeekStats>| match week {
        Some(w) => format!("{label} ({}): {}", w.week_start.format("%d/%m"), render_stats(&w.stats)),
        None => format!("{label} (--/--): sem dados"),
    };
    format!(
        "{}\n{}",
        line("Semana atual", &comparison.current),
        line("Semana anterior", &comparison.previous)
    )
}
