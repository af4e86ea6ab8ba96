//! Decimal helpers for fee arithmetic
//!
//! All fee math runs on `Decimal`; public results are `f64`. Results are NOT
//! rounded here: display rounding belongs to the caller (see [`round_money`]).
//!
//! Arithmetic saturates at `Decimal::MAX`/`Decimal::MIN` instead of
//! panicking, so the engine stays total for any finite input. Entry points
//! reject amounts that large before they get here (see `utils::validation`).

use rust_decimal::prelude::*;

/// Rounding for displayed currency (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// NaN reads as zero; values beyond the Decimal range (infinities included)
/// saturate to `Decimal::MAX`/`Decimal::MIN`.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    if value.is_nan() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(if value > 0.0 {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Convert Decimal back to f64
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// `amount * rate / 100`
#[inline]
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount.saturating_mul(rate / Decimal::ONE_HUNDRED)
}

/// `amount * units`
#[inline]
pub fn times(amount: Decimal, units: u32) -> Decimal {
    amount.saturating_mul(Decimal::from(units))
}

/// Saturating sum
pub fn sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// `part / whole * 100`, or zero when `whole` is not positive
#[inline]
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Round a currency amount for display
pub fn round_money(value: f64) -> f64 {
    to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // 0.1 + 0.2 != 0.3 in f64
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::MAX);
        assert_eq!(to_decimal(1e29), Decimal::MAX);
        assert_eq!(to_decimal(-1e29), Decimal::MIN);
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(times(Decimal::MAX, 2), Decimal::MAX);
        assert_eq!(times(to_decimal(2.5), 4), to_decimal(10.0));
        assert_eq!(sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(sum([to_decimal(1.25), to_decimal(2.5)]), to_decimal(3.75));
        assert_eq!(
            to_f64(percent_of(Decimal::MAX, to_decimal(50.0))),
            to_f64(Decimal::MAX / Decimal::from(2))
        );
        assert_eq!(
            ratio_percent(Decimal::MAX, to_decimal(0.001)),
            Decimal::MAX
        );
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(to_f64(percent_of(to_decimal(35.0), to_decimal(19.0))), 6.65);
    }

    #[test]
    fn test_ratio_percent_zero_guard() {
        assert_eq!(ratio_percent(to_decimal(5.0), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio_percent(to_decimal(5.0), to_decimal(-1.0)), Decimal::ZERO);
        assert_eq!(to_f64(ratio_percent(to_decimal(5.0), to_decimal(20.0))), 25.0);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(4.857142857), 4.86);
        assert_eq!(round_money(-1.234), -1.23);
        assert_eq!(round_money(18.3), 18.3);
    }
}
