//! Fine and advance recovery.
//!
//! Recoveries come out of code gross wages (gross less statutory deductions).
//! A fine is always deducted in full. The advance installment is reduced so
//! that, together with the fine, it never exceeds what is left, and optionally
//! never exceeds half of code gross wages.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::{AuditStep, CalculationOptions};

/// The result of recovery capping, including the audit step.
#[derive(Debug, Clone)]
pub struct RecoveryResult {
    /// Gross less statutory deductions, floored at zero.
    pub code_gross_wages: Decimal,
    /// Fine deducted.
    pub fine: Decimal,
    /// Advance installment actually recovered.
    pub advance_recovery: Decimal,
    /// Statutory deductions plus fine plus advance.
    pub total_deductions: Decimal,
    /// Gross less total deductions.
    pub net_pay: Decimal,
    /// Remark recorded when the installment was reduced.
    pub remark: Option<String>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Caps the advance installment and assembles the final totals.
///
/// # Arguments
///
/// * `gross` - Gross earnings for the period
/// * `statutory_total` - EPF + VPF + ESI + PT + income tax + LWF
/// * `fine` - Fine levied for the period
/// * `installment_due` - Advance installment due before capping
/// * `options` - Whether the 50% restriction applies
/// * `step_number` - The step number for the audit trace
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::cap_recoveries;
/// use payroll_engine::models::CalculationOptions;
/// use rust_decimal::Decimal;
///
/// let result = cap_recoveries(
///     Decimal::from(10000),
///     Decimal::from(2000),
///     Decimal::from(1000),
///     Decimal::from(9000),
///     &CalculationOptions::default(),
///     1,
/// );
/// assert_eq!(result.advance_recovery, Decimal::from(7000));
/// assert_eq!(result.net_pay, Decimal::ZERO);
/// ```
pub fn cap_recoveries(
    gross: Decimal,
    statutory_total: Decimal,
    fine: Decimal,
    installment_due: Decimal,
    options: &CalculationOptions,
    step_number: u32,
) -> RecoveryResult {
    let code_gross_wages = (gross - statutory_total).max(Decimal::ZERO);
    let target = installment_due.max(Decimal::ZERO);

    let mut advance = target;
    let mut limit_reason = None;

    if options.restrict_advance_to_50_percent {
        let half_cap =
            (round_currency(code_gross_wages * Decimal::new(5, 1)) - fine).max(Decimal::ZERO);
        if advance > half_cap {
            advance = half_cap;
            limit_reason = Some("50% of code gross wages");
        }
    }

    if fine > code_gross_wages {
        if advance > Decimal::ZERO {
            limit_reason = Some("fine exceeds code gross wages");
        }
        advance = Decimal::ZERO;
    } else if advance > code_gross_wages - fine {
        advance = code_gross_wages - fine;
        limit_reason = Some("code gross wages after fine");
    }

    let remark = limit_reason.map(|reason| {
        format!(
            "Advance recovery limited to {} of {} due ({})",
            advance, target, reason
        )
    });

    let total_deductions = statutory_total + fine + advance;
    let net_pay = gross - total_deductions;

    let audit_step = AuditStep {
        step_number,
        rule_id: "recovery".to_string(),
        rule_name: "Fine & Advance Recovery".to_string(),
        statute_ref: "Payment of Wages Act 1936, s.7-8".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "statutory_total": statutory_total.to_string(),
            "fine": fine.to_string(),
            "installment_due": target.to_string(),
            "restrict_advance_to_50_percent": options.restrict_advance_to_50_percent
        }),
        output: serde_json::json!({
            "code_gross_wages": code_gross_wages.to_string(),
            "advance_recovery": advance.to_string(),
            "total_deductions": total_deductions.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: match limit_reason {
            Some(reason) => format!(
                "Installment {} limited to {} by {}; net {}",
                target, advance, reason, net_pay
            ),
            None => format!(
                "Fine {} and installment {} recovered in full from {}; net {}",
                fine, advance, code_gross_wages, net_pay
            ),
        },
    };

    RecoveryResult {
        code_gross_wages,
        fine,
        advance_recovery: advance,
        total_deductions,
        net_pay,
        remark,
        audit_step,
    }
}
