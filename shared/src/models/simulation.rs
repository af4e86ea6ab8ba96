//! Saved simulations and planning scenarios
//!
//! Both are stored as JSON arrays, newest first.

use super::calculator::{CalculatorState, ResultsSummary, ScenarioProjection};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::util::{empty_as_none, new_record_id, now_millis};
use serde::{Deserialize, Serialize};

/// Longest accepted product name
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// A calculator run saved to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    pub id: String,
    /// Unix millis
    pub created_at: i64,
    pub product_name: String,
    pub platform_id: String,
    pub inputs: CalculatorState,
    pub results_summary: ResultsSummary,
}

impl SavedSimulation {
    /// New history entry with a fresh id and timestamp
    pub fn new(
        product_name: &str,
        platform_id: &str,
        inputs: CalculatorState,
        results_summary: ResultsSummary,
    ) -> AppResult<Self> {
        Ok(Self {
            id: new_record_id(),
            created_at: now_millis(),
            product_name: validate_product_name(product_name)?,
            platform_id: platform_id.to_string(),
            inputs,
            results_summary,
        })
    }
}

/// Volume plan for a product on one platform
///
/// `current_results` is recomputed whenever the platform or the target units
/// change; `saved_inputs` never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningScenario {
    pub id: String,
    pub created_at: i64,
    pub product_name: String,
    pub platform_id: String,
    /// Empty while the user is editing
    #[serde(default, deserialize_with = "empty_as_none::deserialize")]
    pub target_units: Option<u32>,
    pub saved_inputs: CalculatorState,
    pub current_results: ScenarioProjection,
}

impl PlanningScenario {
    /// New scenario with a fresh id and timestamp
    pub fn new(
        product_name: &str,
        platform_id: &str,
        target_units: Option<u32>,
        saved_inputs: CalculatorState,
        current_results: ScenarioProjection,
    ) -> AppResult<Self> {
        Ok(Self {
            id: new_record_id(),
            created_at: now_millis(),
            product_name: validate_product_name(product_name)?,
            platform_id: platform_id.to_string(),
            target_units,
            saved_inputs,
            current_results,
        })
    }

    /// Target units with an empty field read as zero
    pub fn units(&self) -> u32 {
        self.target_units.unwrap_or(0)
    }
}

fn validate_product_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::new(ErrorCode::ProductNameRequired));
    }
    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(AppError::validation(format!(
            "Product name is too long (max {MAX_PRODUCT_NAME_LEN})"
        ))
        .with_detail("field", "productName"));
    }
    Ok(name.to_string())
}
