//! Employee State Insurance contributions.
//!
//! Coverage is decided at the start of each contribution period (April and
//! October). An employee already covered continues to contribute for the rest
//! of the period even when wages rise above the ceiling.

use rust_decimal::Decimal;

use super::rounding::round_up_currency;
use super::wage_basis::WageBasis;
use crate::config::EsiConfig;
use crate::models::{AuditStep, Employee, PayPeriod};

/// Remark recorded when an employee falls out of ESI coverage.
pub const OUT_OF_COVERAGE_REMARK: &str = "IP is out of coverage";

/// ESI figures for the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EsiContributions {
    /// Wage the contribution is computed on.
    pub esi_wage: Decimal,
    /// Employee contribution.
    pub employee: Decimal,
    /// Employer contribution.
    pub employer: Decimal,
    /// The ESI wage differs from gross by more than one rupee.
    pub code_wages_used: bool,
    /// The employee dropped out of coverage this period.
    pub out_of_coverage: bool,
}

/// The result of an ESI calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct EsiResult {
    /// The calculated contributions.
    pub contributions: EsiContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates ESI contributions.
///
/// The ESI wage is the PF wage, or the Code-88 wage when the employee makes no
/// PF contribution. Both contributions are rounded up to the next rupee.
///
/// # Arguments
///
/// * `employee` - The employee, for exemption and PF status
/// * `basis` - The PF wage basis
/// * `gross` - Gross earnings for the period
/// * `period` - The pay period, to detect the start of a contribution period
/// * `config` - ESI rates and ceiling
/// * `step_number` - The step number for the audit trace
pub fn calculate_esi(
    employee: &Employee,
    basis: &WageBasis,
    gross: Decimal,
    period: &PayPeriod,
    config: &EsiConfig,
    step_number: u32,
) -> EsiResult {
    let make_step = |input: serde_json::Value, output: serde_json::Value, reasoning: String| {
        AuditStep {
            step_number,
            rule_id: "esi".to_string(),
            rule_name: "ESI Contributions".to_string(),
            statute_ref: "ESI Act 1948, s.39".to_string(),
            input,
            output,
            reasoning,
        }
    };

    if employee.is_esi_exempt {
        return EsiResult {
            contributions: EsiContributions::default(),
            audit_step: make_step(
                serde_json::json!({ "is_esi_exempt": true }),
                serde_json::json!({ "employee": "0", "employer": "0" }),
                "Employee is ESI exempt".to_string(),
            ),
        };
    }

    let esi_wage = if employee.is_out_of_pf() {
        basis.code_wage()
    } else {
        basis.base_pf_wage
    };
    let code_wages_used = (esi_wage - gross).abs() > Decimal::ONE;
    let input = serde_json::json!({
        "esi_wage": esi_wage.to_string(),
        "gross": gross.to_string(),
        "ceiling": config.ceiling.to_string(),
        "month": period.month()
    });

    if esi_wage > config.ceiling && period.is_esi_contribution_period_start() {
        return EsiResult {
            contributions: EsiContributions {
                esi_wage,
                code_wages_used,
                out_of_coverage: true,
                ..EsiContributions::default()
            },
            audit_step: make_step(
                input,
                serde_json::json!({ "employee": "0", "employer": "0", "out_of_coverage": true }),
                format!(
                    "ESI wage {} exceeds ceiling {} at the start of a contribution period",
                    esi_wage, config.ceiling
                ),
            ),
        };
    }

    let employee_share = round_up_currency(esi_wage * config.employee_rate);
    let employer_share = round_up_currency(esi_wage * config.employer_rate);

    let reasoning = if esi_wage > config.ceiling {
        format!(
            "ESI wage {} above ceiling mid-period: coverage continues, {} + {}",
            esi_wage, employee_share, employer_share
        )
    } else {
        format!(
            "{} x {} = {}, {} x {} = {} (rounded up)",
            esi_wage,
            config.employee_rate,
            employee_share,
            esi_wage,
            config.employer_rate,
            employer_share
        )
    };

    EsiResult {
        contributions: EsiContributions {
            esi_wage,
            employee: employee_share,
            employer: employer_share,
            code_wages_used,
            out_of_coverage: false,
        },
        audit_step: make_step(
            input,
            serde_json::json!({
                "employee": employee_share.to_string(),
                "employer": employer_share.to_string(),
                "code_wages_used": code_wages_used
            }),
            reasoning,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeferredPension, PayComponents};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_basis(wage_a: &str, wage_d: &str, base: &str) -> WageBasis {
        WageBasis {
            wage_a: dec(wage_a),
            wage_c: Decimal::ZERO,
            wage_d: dec(wage_d),
            base_pf_wage: dec(base),
            is_code88: dec(wage_d) > Decimal::ZERO,
            higher_base_applied: false,
        }
    }

    fn employee() -> Employee {
        Employee::new("E001", PayComponents::default())
    }

    fn period(month: u32) -> PayPeriod {
        PayPeriod::new(month, 2025).unwrap()
    }

    #[test]
    fn test_contributions_round_up() {
        let basis = create_test_basis("15000", "0", "15000");
        let result = calculate_esi(
            &employee(),
            &basis,
            dec("15000"),
            &period(5),
            &EsiConfig::default(),
            1,
        );

        // 15000 * 0.0075 = 112.5, 15000 * 0.0325 = 487.5
        assert_eq!(result.contributions.employee, dec("113"));
        assert_eq!(result.contributions.employer, dec("488"));
        assert!(!result.contributions.code_wages_used);
    }

    #[test]
    fn test_above_ceiling_in_april_drops_coverage() {
        let basis = create_test_basis("22000", "0", "22000");
        let result = calculate_esi(
            &employee(),
            &basis,
            dec("22000"),
            &period(4),
            &EsiConfig::default(),
            1,
        );

        assert_eq!(result.contributions.employee, Decimal::ZERO);
        assert_eq!(result.contributions.employer, Decimal::ZERO);
        assert!(result.contributions.out_of_coverage);
    }

    #[test]
    fn test_above_ceiling_in_october_drops_coverage() {
        let basis = create_test_basis("22000", "0", "22000");
        let result = calculate_esi(
            &employee(),
            &basis,
            dec("22000"),
            &period(10),
            &EsiConfig::default(),
            1,
        );
        assert!(result.contributions.out_of_coverage);
    }

    #[test]
    fn test_above_ceiling_mid_period_keeps_contributing() {
        let basis = create_test_basis("22000", "0", "22000");
        let result = calculate_esi(
            &employee(),
            &basis,
            dec("22000"),
            &period(7),
            &EsiConfig::default(),
            1,
        );

        // 22000 * 0.0075 = 165, 22000 * 0.0325 = 715
        assert_eq!(result.contributions.employee, dec("165"));
        assert_eq!(result.contributions.employer, dec("715"));
        assert!(!result.contributions.out_of_coverage);
    }

    #[test]
    fn test_exempt_employee_pays_nothing() {
        let mut employee = employee();
        employee.is_esi_exempt = true;
        let basis = create_test_basis("10000", "0", "10000");
        let result = calculate_esi(
            &employee,
            &basis,
            dec("10000"),
            &period(5),
            &EsiConfig::default(),
            1,
        );
        assert_eq!(result.contributions, EsiContributions::default());
    }

    #[test]
    fn test_code_wages_flag_when_basis_differs_from_gross() {
        let basis = create_test_basis("8000", "2000", "10000");
        let result = calculate_esi(
            &employee(),
            &basis,
            dec("16000"),
            &period(5),
            &EsiConfig::default(),
            1,
        );

        assert!(result.contributions.code_wages_used);
        assert_eq!(result.contributions.esi_wage, dec("10000"));
    }

    #[test]
    fn test_opted_out_employee_uses_code_wage() {
        let mut employee = employee();
        employee.deferred_pension = DeferredPension::OptOut;
        // higher-contribution override set the PF wage above the Code-88 wage
        let basis = create_test_basis("8000", "1000", "14000");
        let result = calculate_esi(
            &employee,
            &basis,
            dec("18000"),
            &period(5),
            &EsiConfig::default(),
            1,
        );

        assert_eq!(result.contributions.esi_wage, dec("9000"));
        // 9000 * 0.0075 = 67.5
        assert_eq!(result.contributions.employee, dec("68"));
    }
}
