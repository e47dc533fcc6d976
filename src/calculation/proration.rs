//! Payable days and proration of earnings.
//!
//! Payable days come from attendance (present days plus paid leave), capped at
//! the calendar length of the month. An employee who left before the period
//! starts is paid nothing; one who leaves inside the period is paid on the
//! attendance supplied, which is trusted to already reflect the exit.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::models::{Attendance, AuditStep, PayComponents, PayPeriod};

/// Remark recorded when the employee left before the period.
pub const LEFT_PREVIOUS_PERIOD_REMARK: &str = "Left Service (Previous Period)";

/// The result of resolving payable days, including the audit step.
#[derive(Debug, Clone)]
pub struct PayableDaysResult {
    /// Days to be paid, in `[0, days_in_month]`.
    pub payable_days: Decimal,
    /// The employee left service during the period.
    pub left_service: bool,
    /// Exit remark for the payslip.
    pub remark: Option<String>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of prorating pay components, including the audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// Each component prorated and rounded independently.
    pub components: PayComponents,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Determines payable days for the period.
///
/// `payable_days = present + earned + sick + casual`, clamped to
/// `[0, days_in_month]`. A date of leaving before the period start forces zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payable_days;
/// use payroll_engine::models::{Attendance, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(4, 2025).unwrap();
/// let attendance = Attendance {
///     present_days: Decimal::from(28),
///     earned_leave: Decimal::from(5),
///     ..Attendance::default()
/// };
///
/// let result = calculate_payable_days(&attendance, &period, None, 1);
/// assert_eq!(result.payable_days, Decimal::from(30));
/// ```
pub fn calculate_payable_days(
    attendance: &Attendance,
    period: &PayPeriod,
    date_of_leaving: Option<NaiveDate>,
    step_number: u32,
) -> PayableDaysResult {
    let days_in_month = Decimal::from(period.days_in_month());
    let claimed = attendance.paid_days();
    let attended = claimed.clamp(Decimal::ZERO, days_in_month);

    let (payable_days, left_service, remark) = match date_of_leaving {
        Some(dol) if dol < period.start_date() => (
            Decimal::ZERO,
            false,
            Some(LEFT_PREVIOUS_PERIOD_REMARK.to_string()),
        ),
        Some(dol) if period.contains_date(dol) => (
            attended,
            true,
            Some(format!("Left Service on {}", dol.format("%d-%m-%Y"))),
        ),
        _ => (attended, false, None),
    };

    let reasoning = match &remark {
        Some(r) if payable_days.is_zero() && !left_service => {
            format!("{} - no days payable", r)
        }
        _ if claimed > days_in_month => format!(
            "{} attended/leave days capped at {} days in month",
            claimed, days_in_month
        ),
        _ => format!(
            "{} present + {} EL + {} SL + {} CL = {} payable days",
            attendance.present_days,
            attendance.earned_leave,
            attendance.sick_leave,
            attendance.casual_leave,
            payable_days
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "payable_days".to_string(),
        rule_name: "Payable Days".to_string(),
        statute_ref: "Payment of Wages Act 1936, s.3".to_string(),
        input: serde_json::json!({
            "present_days": attendance.present_days.to_string(),
            "earned_leave": attendance.earned_leave.to_string(),
            "sick_leave": attendance.sick_leave.to_string(),
            "casual_leave": attendance.casual_leave.to_string(),
            "days_in_month": period.days_in_month(),
            "date_of_leaving": date_of_leaving.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "payable_days": payable_days.to_string(),
            "left_service": left_service
        }),
        reasoning,
    };

    PayableDaysResult {
        payable_days,
        left_service,
        remark,
        audit_step,
    }
}

/// Prorates every pay component by `payable_days / days_in_month`.
///
/// Each component is rounded on its own; the rounded components are not
/// adjusted to match a rounded total.
pub fn prorate_components(
    pay: &PayComponents,
    payable_days: Decimal,
    days_in_month: u32,
    step_number: u32,
) -> ProrationResult {
    let days = Decimal::from(days_in_month);
    let components = if payable_days == days {
        pay.map(round_currency)
    } else {
        pay.map(|amount| round_currency(amount * payable_days / days))
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "proration".to_string(),
        rule_name: "Earnings Proration".to_string(),
        statute_ref: "Payment of Wages Act 1936, s.3".to_string(),
        input: serde_json::json!({
            "monthly_total": pay.total().to_string(),
            "payable_days": payable_days.to_string(),
            "days_in_month": days_in_month
        }),
        output: serde_json::json!({
            "prorated_total": components.total().to_string()
        }),
        reasoning: format!(
            "Each component x {}/{} rounded to whole rupees: {} -> {}",
            payable_days,
            days_in_month,
            pay.total(),
            components.total()
        ),
    };

    ProrationResult {
        components,
        audit_step,
    }
}
