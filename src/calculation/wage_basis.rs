//! PF wage basis under the Code on Wages.
//!
//! Allowances beyond half of gross are treated as wages. The excess is added
//! to the core wage (basic, DA, retaining allowance) to form the PF wage.

use rust_decimal::Decimal;

use super::rounding::round_currency;
use crate::config::HigherContributionConfig;
use crate::models::{AuditStep, PayComponents};

/// The wage split and PF basis for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageBasis {
    /// Core wage: prorated basic + DA + retaining allowance.
    pub wage_a: Decimal,
    /// Gross minus the core wage.
    pub wage_c: Decimal,
    /// Allowances in excess of half of gross.
    pub wage_d: Decimal,
    /// PF wage before any ceiling.
    pub base_pf_wage: Decimal,
    /// Allowances were folded into the PF wage.
    pub is_code88: bool,
    /// The higher-contribution base replaced the Code-88 base.
    pub higher_base_applied: bool,
}

impl WageBasis {
    /// `round(wage_a + wage_d)`, the Code-88 wage regardless of any
    /// higher-contribution override.
    pub fn code_wage(&self) -> Decimal {
        round_currency(self.wage_a + self.wage_d)
    }
}

/// The result of the wage basis calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WageBasisResult {
    /// The computed basis.
    pub basis: WageBasis,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the PF wage basis.
///
/// `wage_d = wage_c - gross/2` when allowances exceed half of gross, else 0.
/// With the higher-contribution scheme enabled, the rounded sum of the
/// selected prorated components replaces the basis when it is larger.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_wage_basis;
/// use payroll_engine::config::HigherContributionConfig;
/// use payroll_engine::models::PayComponents;
/// use rust_decimal::Decimal;
///
/// let earned = PayComponents {
///     basic: Decimal::from(10000),
///     hra: Decimal::from(15000),
///     ..PayComponents::default()
/// };
/// let result = calculate_wage_basis(
///     &earned,
///     Decimal::from(25000),
///     &HigherContributionConfig::default(),
///     1,
/// );
/// assert_eq!(result.basis.base_pf_wage, Decimal::from(12500));
/// assert!(result.basis.is_code88);
/// ```
pub fn calculate_wage_basis(
    earned: &PayComponents,
    gross: Decimal,
    higher: &HigherContributionConfig,
    step_number: u32,
) -> WageBasisResult {
    let half_gross = gross * Decimal::new(5, 1);
    let wage_a = earned.core_wage();
    let wage_c = gross - wage_a;
    let wage_d = if wage_c > half_gross {
        wage_c - half_gross
    } else {
        Decimal::ZERO
    };

    let code_wage = round_currency(wage_a + wage_d);
    let mut basis = WageBasis {
        wage_a,
        wage_c,
        wage_d,
        base_pf_wage: code_wage,
        is_code88: wage_d > Decimal::ZERO,
        higher_base_applied: false,
    };

    let alternate = higher
        .enabled
        .then(|| round_currency(earned.sum_of(&higher.components)));
    if let Some(alt) = alternate.filter(|alt| *alt > code_wage) {
        basis.base_pf_wage = alt;
        basis.is_code88 = false;
        basis.higher_base_applied = true;
    }

    let reasoning = if basis.higher_base_applied {
        format!(
            "Higher-contribution base {} exceeds Code-88 wage {} and replaces it",
            basis.base_pf_wage, code_wage
        )
    } else if basis.is_code88 {
        format!(
            "Allowances {} exceed half of gross {} by {}: PF wage {} + {} = {}",
            wage_c, half_gross, wage_d, wage_a, wage_d, basis.base_pf_wage
        )
    } else {
        format!(
            "Allowances {} within half of gross {}: PF wage = core wage {}",
            wage_c, half_gross, basis.base_pf_wage
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pf_wage_basis".to_string(),
        rule_name: "PF Wage Basis (Code on Wages)".to_string(),
        statute_ref: "Code on Wages 2019, s.2(y)".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "core_wage": wage_a.to_string(),
            "higher_contribution_enabled": higher.enabled,
            "alternate_base": alternate.map(|a| a.to_string())
        }),
        output: serde_json::json!({
            "wage_c": wage_c.to_string(),
            "wage_d": wage_d.to_string(),
            "base_pf_wage": basis.base_pf_wage.to_string(),
            "is_code88": basis.is_code88
        }),
        reasoning,
    };

    WageBasisResult { basis, audit_step }
}
