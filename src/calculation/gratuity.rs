//! Gratuity accrual.
//!
//! Gratuity is payable on exit at 15 days' wages per completed year, with a
//! month taken as 26 working days. The monthly accrual is one twelfth of that.
//! It is reported for provisioning only and is not deducted from pay.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::{AuditStep, PayComponents};

/// The result of the gratuity accrual, including the audit step.
#[derive(Debug, Clone)]
pub struct GratuityResult {
    /// Accrual for the period.
    pub accrual: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly gratuity accrual on earned basic and DA.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_gratuity_accrual;
/// use payroll_engine::models::PayComponents;
/// use rust_decimal::Decimal;
///
/// let earned = PayComponents { basic: Decimal::from(26000), ..PayComponents::default() };
/// // 26000 * 15 / 26 / 12 = 1250
/// assert_eq!(calculate_gratuity_accrual(&earned, 1).accrual, Decimal::from(1250));
/// ```
pub fn calculate_gratuity_accrual(earned: &PayComponents, step_number: u32) -> GratuityResult {
    let wage = earned.basic + earned.da;
    let accrual = round_currency(wage * Decimal::from(15) / Decimal::from(26) / Decimal::from(12));

    GratuityResult {
        accrual,
        audit_step: AuditStep {
            step_number,
            rule_id: "gratuity_accrual".to_string(),
            rule_name: "Gratuity Accrual".to_string(),
            statute_ref: "Payment of Gratuity Act 1972, s.4(2)".to_string(),
            input: serde_json::json!({
                "basic": earned.basic.to_string(),
                "da": earned.da.to_string()
            }),
            output: serde_json::json!({ "accrual": accrual.to_string() }),
            reasoning: format!("({} x 15 / 26) / 12 = {}", wage, accrual),
        },
    }
}
