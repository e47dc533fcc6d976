//! EPF, EPS and VPF contributions.
//!
//! The employer's PF share is split: the EPS pension share is carved out of
//! it and the rest goes to EPF. Deferred-pension elections are applied last.

use rust_decimal::Decimal;

use super::pension_policy::{PensionFlags, PensionWagePolicy};
use super::rounding::round_currency;
use super::wage_basis::WageBasis;
use crate::config::StatutoryConfig;
use crate::models::{AuditStep, ContributionType, DeferredPension, Employee};

/// EPS contribution rate on the pension wage.
pub const EPS_RATE: Decimal = Decimal::from_parts(833, 0, 0, false, 4);

/// PF figures for the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PfContributions {
    /// PF wage after deferred-pension overrides.
    pub pf_wage: Decimal,
    /// Allowances were folded into the PF wage.
    pub is_code88: bool,
    /// EPF wage (J).
    pub epf_wage: Decimal,
    /// EPS wage (K).
    pub eps_wage: Decimal,
    /// Employee EPF deduction.
    pub epf_employee: Decimal,
    /// Voluntary PF deduction.
    pub vpf: Decimal,
    /// Employer EPF share after the EPS carve-out.
    pub epf_employer: Decimal,
    /// Employer EPS share.
    pub eps_employer: Decimal,
    /// The pension policy applied, if contributions were made at all.
    pub policy: Option<PensionWagePolicy>,
}

/// The result of a PF calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ProvidentFundResult {
    /// The calculated contributions.
    pub contributions: PfContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates EPF, EPS and VPF for an employee.
///
/// The EPF wage is the full PF wage when the employer contributes on higher
/// wages (individually or through the organisation scheme), the ceiling-capped
/// wage for regular employee contributions, and the full wage otherwise.
/// PF-exempt employees and employees who opted out of PF contribute nothing.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_provident_fund, calculate_wage_basis};
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{Employee, PayComponents};
/// use rust_decimal::Decimal;
///
/// let pay = PayComponents { basic: Decimal::from(15000), ..PayComponents::default() };
/// let employee = Employee::new("E001", pay.clone());
/// let config = StatutoryConfig::default();
/// let basis = calculate_wage_basis(&pay, Decimal::from(15000), &config.higher_contribution, 1);
///
/// let result = calculate_provident_fund(&employee, &basis.basis, &config, 2);
/// assert_eq!(result.contributions.epf_employee, Decimal::from(1800));
/// assert_eq!(result.contributions.eps_employer, Decimal::from(1250));
/// assert_eq!(result.contributions.epf_employer, Decimal::from(550));
/// ```
pub fn calculate_provident_fund(
    employee: &Employee,
    basis: &WageBasis,
    config: &StatutoryConfig,
    step_number: u32,
) -> ProvidentFundResult {
    let pf = &config.pf;
    let higher = &config.higher_contribution;
    let elections = &employee.higher_pension;

    if employee.is_out_of_pf() {
        let reason = if employee.is_pf_exempt {
            "Employee is PF exempt"
        } else {
            "Employee opted out of PF after EPS maturity"
        };
        return ProvidentFundResult {
            contributions: PfContributions::default(),
            audit_step: AuditStep {
                step_number,
                rule_id: "provident_fund".to_string(),
                rule_name: "EPF/EPS Contributions".to_string(),
                statute_ref: "EPF & MP Act 1952, s.6".to_string(),
                input: serde_json::json!({
                    "is_pf_exempt": employee.is_pf_exempt,
                    "deferred_pension": employee.deferred_pension
                }),
                output: serde_json::json!({ "pf_wage": "0" }),
                reasoning: format!("{} - no PF contributions", reason),
            },
        };
    }

    let base = basis.base_pf_wage;
    let employer_on_full_wage = elections.employer_contribution == ContributionType::Higher
        || (higher.enabled && higher.mode.includes_employer());
    let epf_wage = if employer_on_full_wage {
        base
    } else if elections.employee_contribution == ContributionType::Regular {
        base.min(pf.ceiling)
    } else {
        base
    };

    let flags = PensionFlags::from_employee(employee);
    let policy = PensionWagePolicy::lookup(flags, epf_wage, base, pf.ceiling);
    let eps_wage = policy.eps_wage(epf_wage, pf.ceiling);

    // Every mode puts the employee share on the higher wage
    let employee_basis = if higher.enabled {
        base
    } else {
        epf_wage
    };
    let epf_employee = round_currency(employee_basis * pf.employee_rate);
    let vpf = if employee.vpf_rate > Decimal::ZERO {
        round_currency(employee_basis * employee.vpf_rate)
    } else {
        Decimal::ZERO
    };

    let eps_employer = if eps_wage.is_zero() {
        Decimal::ZERO
    } else if flags.higher_pension_opted {
        round_currency(eps_wage * EPS_RATE)
    } else {
        round_currency(eps_wage.min(pf.ceiling) * EPS_RATE)
    };
    let employer_share = round_currency(epf_wage * pf.employer_rate);
    let mut epf_employer = employer_share - eps_employer;
    let mut eps_employer = eps_employer;

    if employee.deferred_pension == DeferredPension::WithoutEps {
        epf_employer += eps_employer;
        eps_employer = Decimal::ZERO;
    }

    let contributions = PfContributions {
        pf_wage: base,
        is_code88: basis.is_code88,
        epf_wage,
        eps_wage,
        epf_employee,
        vpf,
        epf_employer,
        eps_employer,
        policy: Some(policy),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "provident_fund".to_string(),
        rule_name: "EPF/EPS Contributions".to_string(),
        statute_ref: "EPF & MP Act 1952, s.6; EPS 1995, para 3".to_string(),
        input: serde_json::json!({
            "base_pf_wage": base.to_string(),
            "ceiling": pf.ceiling.to_string(),
            "contributed_before_2014": flags.contributed_before_2014,
            "member_before_amendment": flags.member_before_amendment,
            "employee_contribution": flags.employee_contribution,
            "employer_contribution": flags.employer_contribution,
            "higher_pension_opted": flags.higher_pension_opted,
            "deferred_pension": employee.deferred_pension
        }),
        output: serde_json::json!({
            "epf_wage": epf_wage.to_string(),
            "eps_wage": eps_wage.to_string(),
            "policy": policy,
            "epf_employee": epf_employee.to_string(),
            "vpf": vpf.to_string(),
            "epf_employer": epf_employer.to_string(),
            "eps_employer": eps_employer.to_string()
        }),
        reasoning: format!(
            "J = {}, K = {} ({:?}); employee {} on {}, employer {} EPF + {} EPS{}",
            epf_wage,
            eps_wage,
            policy,
            epf_employee,
            employee_basis,
            epf_employer,
            eps_employer,
            if employee.deferred_pension == DeferredPension::WithoutEps {
                " (pension share credited to EPF)"
            } else {
                ""
            }
        ),
    };

    ProvidentFundResult {
        contributions,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HigherContributionMode;
    use crate::models::{ComponentSet, HigherPension, PayComponents};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_basis(base: &str) -> WageBasis {
        WageBasis {
            wage_a: dec(base),
            wage_c: Decimal::ZERO,
            wage_d: Decimal::ZERO,
            base_pf_wage: dec(base),
            is_code88: false,
            higher_base_applied: false,
        }
    }

    fn create_test_employee() -> Employee {
        let mut employee = Employee::new("E001", PayComponents::default());
        employee.date_of_joining = NaiveDate::from_ymd_opt(2019, 6, 1);
        employee
    }

    #[test]
    fn test_regular_employee_at_ceiling() {
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(
            &create_test_employee(),
            &create_test_basis("15000"),
            &config,
            1,
        );
        let c = result.contributions;

        assert_eq!(c.epf_wage, dec("15000"));
        assert_eq!(c.eps_wage, dec("15000"));
        assert_eq!(c.epf_employee, dec("1800"));
        assert_eq!(c.eps_employer, dec("1250"));
        assert_eq!(c.epf_employer, dec("550"));
        assert_eq!(c.policy, Some(PensionWagePolicy::WithinCeiling));
    }

    #[test]
    fn test_new_joiner_above_ceiling_has_no_eps() {
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(
            &create_test_employee(),
            &create_test_basis("30000"),
            &config,
            1,
        );
        let c = result.contributions;

        assert_eq!(c.epf_wage, dec("15000"));
        assert_eq!(c.eps_wage, Decimal::ZERO);
        assert_eq!(c.epf_employee, dec("1800"));
        assert_eq!(c.eps_employer, Decimal::ZERO);
        assert_eq!(c.epf_employer, dec("1800"));
    }

    #[test]
    fn test_pre_2014_member_capped_at_ceiling() {
        let mut employee = create_test_employee();
        employee.date_of_joining = NaiveDate::from_ymd_opt(2010, 4, 1);
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(&employee, &create_test_basis("30000"), &config, 1);
        let c = result.contributions;

        assert_eq!(c.epf_wage, dec("15000"));
        assert_eq!(c.eps_wage, dec("15000"));
        assert_eq!(c.eps_employer, dec("1250"));
        assert_eq!(c.epf_employer, dec("550"));
    }

    #[test]
    fn test_grandfathered_higher_pension() {
        let mut employee = create_test_employee();
        employee.date_of_joining = NaiveDate::from_ymd_opt(2008, 1, 1);
        employee.higher_pension = HigherPension {
            contributed_before_2014: true,
            employee_contribution: ContributionType::Higher,
            employer_contribution: ContributionType::Higher,
            higher_pension_opted: true,
        };
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(&employee, &create_test_basis("30000"), &config, 1);
        let c = result.contributions;

        assert_eq!(c.policy, Some(PensionWagePolicy::Grandfathered));
        assert_eq!(c.epf_wage, dec("30000"));
        assert_eq!(c.eps_wage, dec("30000"));
        assert_eq!(c.epf_employee, dec("3600"));
        // 30000 * 0.0833 = 2499
        assert_eq!(c.eps_employer, dec("2499"));
        assert_eq!(c.epf_employer, dec("1101"));
    }

    #[test]
    fn test_employee_higher_contribution_without_employer() {
        let mut employee = create_test_employee();
        employee.higher_pension.employee_contribution = ContributionType::Higher;
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(&employee, &create_test_basis("20000"), &config, 1);
        let c = result.contributions;

        // C = Higher keeps J at the full wage; post-2014 joiner above ceiling
        assert_eq!(c.epf_wage, dec("20000"));
        assert_eq!(c.epf_employee, dec("2400"));
        assert_eq!(c.eps_wage, Decimal::ZERO);
        assert_eq!(c.epf_employer, dec("2400"));
    }

    #[test]
    fn test_vpf_on_employee_basis() {
        let mut employee = create_test_employee();
        employee.vpf_rate = dec("0.05");
        let config = StatutoryConfig::default();
        let result = calculate_provident_fund(&employee, &create_test_basis("12000"), &config, 1);
        assert_eq!(result.contributions.vpf, dec("600"));
    }

    #[test]
    fn test_org_scheme_by_employee_uses_full_base_for_employee_only() {
        let mut config = StatutoryConfig::default();
        config.higher_contribution.enabled = true;
        config.higher_contribution.components = ComponentSet::all();
        config.higher_contribution.mode = HigherContributionMode::ByEmployee;

        let result = calculate_provident_fund(
            &create_test_employee(),
            &create_test_basis("25000"),
            &config,
            1,
        );
        let c = result.contributions;

        assert_eq!(c.epf_employee, dec("3000"));
        assert_eq!(c.epf_wage, dec("15000"));
        assert_eq!(c.epf_employer, dec("1800"));
    }

    #[test]
    fn test_org_scheme_by_employee_and_employer_uses_full_base() {
        let mut config = StatutoryConfig::default();
        config.higher_contribution.enabled = true;
        config.higher_contribution.components = ComponentSet::all();
        config.higher_contribution.mode = HigherContributionMode::ByEmployeeAndEmployer;

        let result = calculate_provident_fund(
            &create_test_employee(),
            &create_test_basis("25000"),
            &config,
            1,
        );
        let c = result.contributions;

        assert_eq!(c.epf_wage, dec("25000"));
        assert_eq!(c.epf_employee, dec("3000"));
        assert_eq!(c.epf_employer, dec("3000"));
    }

    #[test]
    fn test_opt_out_zeroes_everything() {
        let mut employee = create_test_employee();
        employee.deferred_pension = DeferredPension::OptOut;
        let mut basis = create_test_basis("15000");
        basis.is_code88 = true;

        let result =
            calculate_provident_fund(&employee, &basis, &StatutoryConfig::default(), 1);
        assert_eq!(result.contributions, PfContributions::default());
        assert!(!result.contributions.is_code88);
        assert!(result.audit_step.reasoning.contains("opted out"));
    }

    #[test]
    fn test_pf_exempt_zeroes_everything() {
        let mut employee = create_test_employee();
        employee.is_pf_exempt = true;
        let result = calculate_provident_fund(
            &employee,
            &create_test_basis("15000"),
            &StatutoryConfig::default(),
            1,
        );
        assert_eq!(result.contributions.epf_employee, Decimal::ZERO);
        assert_eq!(result.contributions.pf_wage, Decimal::ZERO);
        assert!(result.contributions.policy.is_none());
    }

    #[test]
    fn test_without_eps_credits_pension_share_to_epf() {
        let mut employee = create_test_employee();
        employee.deferred_pension = DeferredPension::WithoutEps;
        let result = calculate_provident_fund(
            &employee,
            &create_test_basis("15000"),
            &StatutoryConfig::default(),
            1,
        );
        let c = result.contributions;

        assert_eq!(c.eps_employer, Decimal::ZERO);
        assert_eq!(c.epf_employer, dec("1800"));
        assert_eq!(c.epf_employee, dec("1800"));
    }
}
