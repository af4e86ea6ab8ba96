//! Input validation helpers
//!
//! Checks on numeric form fields and planning parameters. The fee engine
//! itself accepts any input; services run these before every calculation
//! and before anything is persisted.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::CalculatorState;

// ── Bounds ──────────────────────────────────────────────────────────

/// Maximum currency amount per field (R$ 1,000,000,000)
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Maximum percentage for tax, marketing, commission and target margin
pub const MAX_RATE: f64 = 100.0;

/// Maximum units per kit
pub const MAX_KIT_QUANTITY: u32 = 9999;

/// Maximum planned sales volume
pub const MAX_UNIT_VOLUME: u32 = 1_000_000;

// ── Validation helpers ──────────────────────────────────────────────

fn require_finite(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!("{field} must be a finite number"))
            .with_detail("field", field));
    }
    Ok(())
}

fn out_of_range(field: &str, max: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::ValueOutOfRange,
        format!("{field} exceeds maximum allowed ({max})"),
    )
    .with_detail("field", field)
}

/// Validate a value that is finite, not negative and at most `max`.
fn validate_bounded(value: f64, field: &str, max: f64) -> AppResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::validation(format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    if value > max {
        return Err(out_of_range(field, max));
    }
    Ok(())
}

/// Validate a currency amount
pub fn validate_amount(value: f64, field: &str) -> AppResult<()> {
    validate_bounded(value, field, MAX_AMOUNT)
}

/// Validate a percentage rate
pub fn validate_rate(value: f64, field: &str) -> AppResult<()> {
    validate_bounded(value, field, MAX_RATE)
}

/// Validate every numeric field of a calculator form (empty is fine)
pub fn validate_state(state: &CalculatorState) -> AppResult<()> {
    let amounts = [
        (state.cost, "cost"),
        (state.sale_price, "salePrice"),
        (state.shipping_cost, "shippingCost"),
        (state.other_costs, "otherCosts"),
    ];
    for (value, field) in amounts {
        if let Some(v) = value {
            validate_amount(v, field)?;
        }
    }

    let rates = [
        (state.tax_rate, "taxRate"),
        (state.marketing_rate, "marketingRate"),
        (state.custom_commission, "customCommission"),
    ];
    for (value, field) in rates {
        if let Some(v) = value {
            validate_rate(v, field)?;
        }
    }

    if let Some(quantity) = state.quantity
        && quantity > MAX_KIT_QUANTITY
    {
        return Err(out_of_range("quantity", MAX_KIT_QUANTITY));
    }
    Ok(())
}

/// Validate a target margin; negative targets (planned loss) are allowed
pub fn validate_target_margin(value: f64) -> AppResult<()> {
    require_finite(value, "targetMargin")?;
    if value.abs() > MAX_RATE {
        return Err(out_of_range("targetMargin", MAX_RATE));
    }
    Ok(())
}

/// Validate a planned sales volume
pub fn validate_volume(units: u32) -> AppResult<()> {
    if units > MAX_UNIT_VOLUME {
        return Err(out_of_range("targetUnits", MAX_UNIT_VOLUME));
    }
    Ok(())
}
