//! Currency rounding conventions.
//!
//! Payroll amounts are whole rupees. Most figures round half away from zero;
//! ESI contributions always round up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole unit, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("1249.5").unwrap()), Decimal::from(1250));
/// assert_eq!(round_currency(Decimal::from_str("1249.49").unwrap()), Decimal::from(1249));
/// assert_eq!(round_currency(Decimal::from_str("-2.5").unwrap()), Decimal::from(-3));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds up to the next whole unit.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_up_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_up_currency(Decimal::from_str("112.01").unwrap()), Decimal::from(113));
/// assert_eq!(round_up_currency(Decimal::from(165)), Decimal::from(165));
/// ```
pub fn round_up_currency(value: Decimal) -> Decimal {
    value.ceil()
}
