//! EPS pension wage policy.
//!
//! The pension wage depends on five facts about the member: whether they
//! contributed before September 2014, whether their membership predates the
//! 2014-09-01 amendment, the employee and employer contribution types, and
//! whether higher pension was opted. [`PensionWagePolicy::lookup`] turns those
//! facts into one of five named outcomes, checked in a fixed order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ContributionType, Employee};

/// First day of the amended EPS regime.
pub fn eps_amendment_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 9, 1).unwrap_or(NaiveDate::MIN)
}

/// The facts the pension table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PensionFlags {
    /// A: contributed to EPF before September 2014.
    pub contributed_before_2014: bool,
    /// B: EPF membership started before 2014-09-01.
    pub member_before_amendment: bool,
    /// C: employee contribution type.
    pub employee_contribution: ContributionType,
    /// D: employer contribution type.
    pub employer_contribution: ContributionType,
    /// E: higher pension opted.
    pub higher_pension_opted: bool,
}

impl PensionFlags {
    /// Reads the flags from an employee record.
    ///
    /// An unknown membership date counts as post-amendment.
    pub fn from_employee(employee: &Employee) -> Self {
        let hp = &employee.higher_pension;
        Self {
            contributed_before_2014: hp.contributed_before_2014,
            member_before_amendment: employee
                .epf_membership_start()
                .is_some_and(|d| d < eps_amendment_date()),
            employee_contribution: hp.employee_contribution,
            employer_contribution: hp.employer_contribution,
            higher_pension_opted: hp.higher_pension_opted,
        }
    }
}

/// How the EPS wage is derived from the EPF wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionWagePolicy {
    /// Pre-amendment member with full higher elections: pension on the full
    /// EPF wage.
    Grandfathered,
    /// Post-amendment joiner above the ceiling: not eligible for EPS.
    ExcludedAboveCeiling,
    /// EPF wage is within the ceiling: pension on the EPF wage.
    WithinCeiling,
    /// Pension wage limited to the ceiling.
    CappedAtCeiling,
    /// Higher pension opted by a pre-2014 contributor: pension on the full
    /// EPF wage.
    UncappedByOption,
}

impl PensionWagePolicy {
    /// Selects the policy for a member.
    ///
    /// Rules are checked in order and the first match wins:
    ///
    /// | Policy | Condition |
    /// |---|---|
    /// | `Grandfathered` | A, C = Higher, D = Higher, E and B |
    /// | `ExcludedAboveCeiling` | not A, not B, PF wage above ceiling |
    /// | `WithinCeiling` | EPF wage at or below ceiling |
    /// | `CappedAtCeiling` | not A, or not E |
    /// | `UncappedByOption` | otherwise (A and E) |
    pub fn lookup(
        flags: PensionFlags,
        epf_wage: Decimal,
        base_pf_wage: Decimal,
        ceiling: Decimal,
    ) -> Self {
        let a = flags.contributed_before_2014;
        let b = flags.member_before_amendment;
        let e = flags.higher_pension_opted;
        let c_higher = flags.employee_contribution == ContributionType::Higher;
        let d_higher = flags.employer_contribution == ContributionType::Higher;

        if a && c_higher && d_higher && e && b {
            PensionWagePolicy::Grandfathered
        } else if !a && !b && base_pf_wage > ceiling {
            PensionWagePolicy::ExcludedAboveCeiling
        } else if epf_wage <= ceiling {
            PensionWagePolicy::WithinCeiling
        } else if !a || !e {
            PensionWagePolicy::CappedAtCeiling
        } else {
            PensionWagePolicy::UncappedByOption
        }
    }

    /// The EPS wage under this policy.
    pub fn eps_wage(self, epf_wage: Decimal, ceiling: Decimal) -> Decimal {
        match self {
            PensionWagePolicy::Grandfathered
            | PensionWagePolicy::WithinCeiling
            | PensionWagePolicy::UncappedByOption => epf_wage,
            PensionWagePolicy::ExcludedAboveCeiling => Decimal::ZERO,
            PensionWagePolicy::CappedAtCeiling => ceiling,
        }
    }
}
