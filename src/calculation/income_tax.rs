//! Simplified monthly income tax withholding.
//!
//! One flat slab on annualised gross after the standard deduction. This is a
//! withholding estimate, not a full progressive computation.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::AuditStep;

/// Standard deduction from annual income.
pub const STANDARD_DEDUCTION: Decimal = Decimal::from_parts(50000, 0, 0, false, 0);

/// Annual income below which no tax is withheld.
pub const TAX_THRESHOLD: Decimal = Decimal::from_parts(700000, 0, 0, false, 0);

/// Rate applied to income above the threshold.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// The result of the income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Tax withheld this month.
    pub amount: Decimal,
    /// Annualised taxable income.
    pub annual_taxable: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly income tax withholding.
///
/// `annual = gross * 12 - 50000`; above 700000 the monthly tax is
/// `round((annual - 700000) * 0.10 / 12)`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_income_tax(Decimal::from(50000), 1).amount, Decimal::ZERO);
/// // 100000 * 12 - 50000 = 1150000; (1150000 - 700000) * 0.10 / 12 = 3750
/// assert_eq!(calculate_income_tax(Decimal::from(100000), 1).amount, Decimal::from(3750));
/// ```
pub fn calculate_income_tax(gross: Decimal, step_number: u32) -> IncomeTaxResult {
    let annual_taxable = gross * Decimal::from(12) - STANDARD_DEDUCTION;
    let amount = if annual_taxable > TAX_THRESHOLD {
        round_currency((annual_taxable - TAX_THRESHOLD) * TAX_RATE / Decimal::from(12))
    } else {
        Decimal::ZERO
    };

    let reasoning = if amount.is_zero() {
        format!(
            "Annual taxable {} within threshold {}",
            annual_taxable, TAX_THRESHOLD
        )
    } else {
        format!(
            "({} - {}) x {} / 12 = {}",
            annual_taxable, TAX_THRESHOLD, TAX_RATE, amount
        )
    };

    IncomeTaxResult {
        amount,
        annual_taxable,
        audit_step: AuditStep {
            step_number,
            rule_id: "income_tax".to_string(),
            rule_name: "Income Tax (TDS)".to_string(),
            statute_ref: "Income Tax Act 1961, s.192".to_string(),
            input: serde_json::json!({ "gross": gross.to_string() }),
            output: serde_json::json!({
                "annual_taxable": annual_taxable.to_string(),
                "amount": amount.to_string()
            }),
            reasoning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_below_threshold_is_zero() {
        // 62500 * 12 - 50000 = 700000, not above threshold
        let result = calculate_income_tax(dec("62500"), 1);
        assert_eq!(result.annual_taxable, dec("700000"));
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_just_above_threshold() {
        // 62501 * 12 - 50000 = 700012; 12 * 0.10 / 12 = 0.1
        let result = calculate_income_tax(dec("62501"), 1);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_of_monthly_tax() {
        // 80000 * 12 - 50000 = 910000; 210000 * 0.10 / 12 = 1750
        assert_eq!(calculate_income_tax(dec("80000"), 1).amount, dec("1750"));
        // 70000 * 12 - 50000 = 790000; 90000 * 0.10 / 12 = 750
        assert_eq!(calculate_income_tax(dec("70000"), 1).amount, dec("750"));
        // 70001 -> 790012; 90012 * 0.1 / 12 = 750.1
        assert_eq!(calculate_income_tax(dec("70001"), 1).amount, dec("750"));
    }

    #[test]
    fn test_zero_gross() {
        let result = calculate_income_tax(Decimal::ZERO, 1);
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.annual_taxable, dec("-50000"));
    }
}
