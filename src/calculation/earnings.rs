//! Leave wage and gross earnings.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::{AuditStep, ComponentSet, Earnings, PayComponents};

/// The result of assembling gross earnings, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossEarningsResult {
    /// The earnings breakdown for the period.
    pub earnings: Earnings,
    /// Unprorated sum of the leave-wage components.
    pub leave_wage_base: Decimal,
    /// Unprorated sum of every component.
    pub standard_monthly_gross: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Assembles gross earnings from prorated components and leave encashment.
///
/// The leave wage is computed on the full monthly rate of the selected
/// components: `round(leave_wage_base / days_in_month * encashed_days)`.
/// Bonus is carried on the payslip but is not paid through monthly payroll.
///
/// # Arguments
///
/// * `monthly` - The unprorated pay structure
/// * `prorated` - The same structure after proration
/// * `leave_wage_components` - Components making up the daily leave wage
/// * `encashed_days` - Earned-leave days encashed this period
/// * `days_in_month` - Calendar days in the period
/// * `step_number` - The step number for the audit trace
pub fn calculate_gross_earnings(
    monthly: &PayComponents,
    prorated: &PayComponents,
    leave_wage_components: &ComponentSet,
    encashed_days: Decimal,
    days_in_month: u32,
    step_number: u32,
) -> GrossEarningsResult {
    let leave_wage_base = monthly.sum_of(leave_wage_components);
    let leave_encashment = if encashed_days > Decimal::ZERO {
        round_currency(leave_wage_base / Decimal::from(days_in_month) * encashed_days)
    } else {
        Decimal::ZERO
    };
    let standard_monthly_gross = monthly.total();
    let bonus = Decimal::ZERO;
    let gross = prorated.total() + bonus + leave_encashment;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_earnings".to_string(),
        rule_name: "Gross Earnings".to_string(),
        statute_ref: "Payment of Wages Act 1936, s.2(vi)".to_string(),
        input: serde_json::json!({
            "prorated_total": prorated.total().to_string(),
            "leave_wage_base": leave_wage_base.to_string(),
            "encashed_days": encashed_days.to_string(),
            "days_in_month": days_in_month
        }),
        output: serde_json::json!({
            "leave_encashment": leave_encashment.to_string(),
            "gross": gross.to_string(),
            "standard_monthly_gross": standard_monthly_gross.to_string()
        }),
        reasoning: format!(
            "Prorated {} + encashment {} ({} days at {}/{}) = {}",
            prorated.total(),
            leave_encashment,
            encashed_days,
            leave_wage_base,
            days_in_month,
            gross
        ),
    };

    GrossEarningsResult {
        earnings: Earnings {
            components: prorated.clone(),
            bonus,
            leave_encashment,
            gross,
        },
        leave_wage_base,
        standard_monthly_gross,
        audit_step,
    }
}
