//! Calculator inputs and results
//!
//! `CalculatorState` is the editable form: every numeric field may be empty.
//! `CostInput` is what the fee engine consumes, with empties resolved to zero.

use crate::util::empty_as_none;
use serde::{Deserialize, Serialize};

/// Form state as typed by the user
///
/// `None` means the field is empty. It is kept empty for display and storage
/// and only read as zero when resolved into a [`CostInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub shipping_cost: Option<f64>,
    /// Tax rate (%)
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub tax_rate: Option<f64>,
    /// Marketing rate (%)
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub marketing_rate: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub other_costs: Option<f64>,
    /// Override of the platform's default commission (%)
    #[serde(default)]
    pub custom_commission: Option<f64>,
    #[serde(default)]
    pub is_kit: bool,
    /// Units per kit sale
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub quantity: Option<u32>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            cost: Some(15.0),
            sale_price: Some(35.0),
            shipping_cost: Some(0.0),
            tax_rate: Some(4.0),
            marketing_rate: Some(5.0),
            other_costs: Some(1.75),
            custom_commission: None,
            is_kit: false,
            quantity: Some(1),
        }
    }
}

impl CalculatorState {
    /// Resolve empties to zero
    pub fn resolve(&self) -> CostInput {
        CostInput::from(self)
    }
}

/// Fully numeric input for the fee engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInput {
    /// Unit product cost
    pub cost: f64,
    pub sale_price: f64,
    pub shipping_cost: f64,
    pub tax_rate: f64,
    pub marketing_rate: f64,
    pub other_costs: f64,
    pub custom_commission: Option<f64>,
    pub is_kit: bool,
    pub quantity: u32,
}

impl CostInput {
    /// Units sold per sale: the kit quantity for kits, 1 otherwise
    pub fn units(&self) -> u32 {
        if self.is_kit { self.quantity } else { 1 }
    }

    /// Same input without the commission override
    pub fn without_custom_commission(&self) -> Self {
        Self {
            custom_commission: None,
            ..self.clone()
        }
    }
}

impl From<&CalculatorState> for CostInput {
    fn from(state: &CalculatorState) -> Self {
        Self {
            cost: state.cost.unwrap_or(0.0),
            sale_price: state.sale_price.unwrap_or(0.0),
            shipping_cost: state.shipping_cost.unwrap_or(0.0),
            tax_rate: state.tax_rate.unwrap_or(0.0),
            marketing_rate: state.marketing_rate.unwrap_or(0.0),
            other_costs: state.other_costs.unwrap_or(0.0),
            custom_commission: state.custom_commission,
            is_kit: state.is_kit,
            quantity: state.quantity.unwrap_or(0),
        }
    }
}

/// Outcome of solving for a sale price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "price", rename_all = "snake_case")]
pub enum PriceSolution {
    Feasible(f64),
    /// Percentage deductions reach or exceed 100% of revenue
    Infeasible,
}

impl PriceSolution {
    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Feasible(price) => Some(*price),
            Self::Infeasible => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }
}

/// Per-sale deduction breakdown and profitability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub commission_value: f64,
    pub fixed_fee_value: f64,
    pub tax_value: f64,
    pub marketing_value: f64,
    /// Shipping actually charged to the seller after the platform policy
    pub shipping_value: f64,
    pub total_deductions: f64,
    /// `cost * units`
    pub total_product_cost: f64,
    pub net_revenue: f64,
    pub profit: f64,
    /// Net margin (%)
    pub margin: f64,
    /// Return on product cost (%)
    pub roi: f64,
    /// Minimum sale price at zero profit
    pub break_even: PriceSolution,
}

impl CalculationResult {
    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            profit: self.profit,
            margin: self.margin,
        }
    }
}

/// Result snapshot stored with a saved simulation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub profit: f64,
    pub margin: f64,
}

/// Volume projection of the per-unit economics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub projected_revenue: f64,
    pub total_cost: f64,
    pub projected_profit: f64,
    /// Per-unit margin (%), independent of volume
    pub margin: f64,
    /// Per-unit ROI (%), independent of volume
    pub roi: f64,
}
