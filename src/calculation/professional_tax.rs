//! Professional Tax.
//!
//! States assess Professional Tax either monthly on the month's gross, or
//! half-yearly on six months of income. Half-yearly tax is spread evenly over
//! the months the employee works in the block.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::jurisdiction::Jurisdiction;
use super::rounding::round_currency;
use crate::config::{PtCycle, PtSlab};
use crate::models::{AuditStep, PayPeriod};

/// The result of a Professional Tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ProfessionalTaxResult {
    /// Tax deducted this month.
    pub amount: Decimal,
    /// Income the slab was looked up on.
    pub assessed_income: Decimal,
    /// Months in the half-year block the tax is spread over (1 when monthly).
    pub months_worked: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the amount for the first slab containing `income`, or zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::slab_amount;
/// use payroll_engine::config::PtSlab;
/// use rust_decimal::Decimal;
///
/// let slabs = vec![
///     PtSlab { min: Decimal::ZERO, max: Some(Decimal::from(7500)), amount: Decimal::ZERO },
///     PtSlab { min: Decimal::from(7501), max: None, amount: Decimal::from(200) },
/// ];
/// assert_eq!(slab_amount(&slabs, Decimal::from(7500)), Decimal::ZERO);
/// assert_eq!(slab_amount(&slabs, Decimal::from(9000)), Decimal::from(200));
/// ```
pub fn slab_amount(slabs: &[PtSlab], income: Decimal) -> Decimal {
    slabs
        .iter()
        .find(|slab| slab.contains(income))
        .map(|slab| slab.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Calculates the monthly Professional Tax deduction.
///
/// # Arguments
///
/// * `jurisdiction` - The resolved cycle and slabs
/// * `gross` - Gross earnings for the month (monthly cycle)
/// * `standard_monthly_gross` - Unprorated monthly gross (half-yearly cycle)
/// * `period` - The pay period
/// * `date_of_joining` - Used to count the months worked in a half-year block
/// * `step_number` - The step number for the audit trace
pub fn calculate_professional_tax(
    jurisdiction: &Jurisdiction<'_>,
    gross: Decimal,
    standard_monthly_gross: Decimal,
    period: &PayPeriod,
    date_of_joining: Option<NaiveDate>,
    step_number: u32,
) -> ProfessionalTaxResult {
    let (amount, assessed_income, months_worked, reasoning) = match jurisdiction.cycle {
        PtCycle::Monthly => {
            let amount = slab_amount(jurisdiction.slabs, gross);
            (
                amount,
                gross,
                1,
                format!("Monthly slab on gross {} = {}", gross, amount),
            )
        }
        PtCycle::HalfYearly => {
            let months = period.half_year_block().months_remaining_from(date_of_joining);
            let income = standard_monthly_gross * Decimal::from(months);
            let half_year_tax = slab_amount(jurisdiction.slabs, income);
            let amount = round_currency(half_year_tax / Decimal::from(months));
            (
                amount,
                income,
                months,
                format!(
                    "Half-yearly slab on {} x {} months = {} gives {}; {} per month",
                    standard_monthly_gross, months, income, half_year_tax, amount
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "professional_tax".to_string(),
        rule_name: "Professional Tax".to_string(),
        statute_ref: match jurisdiction.state {
            Some(state) => format!("{} Professional Tax Act", state.name()),
            None => "Professional Tax (default slabs)".to_string(),
        },
        input: serde_json::json!({
            "cycle": jurisdiction.cycle,
            "gross": gross.to_string(),
            "standard_monthly_gross": standard_monthly_gross.to_string(),
            "date_of_joining": date_of_joining.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "assessed_income": assessed_income.to_string(),
            "months_worked": months_worked,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    ProfessionalTaxResult {
        amount,
        assessed_income,
        months_worked,
        audit_step,
    }
}
