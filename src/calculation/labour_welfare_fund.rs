//! Labour Welfare Fund.

use rust_decimal::Decimal;

use crate::config::LwfConfig;
use crate::models::{AuditStep, PayPeriod};

/// The result of an LWF calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct LabourWelfareFundResult {
    /// Employee contribution.
    pub employee: Decimal,
    /// Employer contribution.
    pub employer: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the flat LWF contributions.
///
/// Charged only when LWF is enabled, the cycle falls due in the period's
/// month, and the employee has earnings.
pub fn calculate_lwf(
    config: &LwfConfig,
    period: &PayPeriod,
    gross: Decimal,
    step_number: u32,
) -> LabourWelfareFundResult {
    let due = config.cycle.is_due_in(period.month());
    let applies = config.enabled && due && gross > Decimal::ZERO;

    let (employee, employer) = if applies {
        (config.employee_amount, config.employer_amount)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let reasoning = if !config.enabled {
        "LWF not enabled".to_string()
    } else if !due {
        format!("LWF ({:?}) not due in month {}", config.cycle, period.month())
    } else if !applies {
        "No earnings this period".to_string()
    } else {
        format!("Flat LWF: employee {}, employer {}", employee, employer)
    };

    LabourWelfareFundResult {
        employee,
        employer,
        audit_step: AuditStep {
            step_number,
            rule_id: "lwf".to_string(),
            rule_name: "Labour Welfare Fund".to_string(),
            statute_ref: "State Labour Welfare Fund Acts".to_string(),
            input: serde_json::json!({
                "enabled": config.enabled,
                "cycle": config.cycle,
                "month": period.month(),
                "gross": gross.to_string()
            }),
            output: serde_json::json!({
                "employee": employee.to_string(),
                "employer": employer.to_string()
            }),
            reasoning,
        },
    }
}
