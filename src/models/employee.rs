//! Employee model and related types.
//!
//! This module defines the [`Employee`] master record, the closed set of
//! [`EarningComponent`]s that make up monthly pay, and the pension elections
//! that drive the EPF/EPS decision table.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single earnings component of the monthly pay structure.
///
/// Every selection of components (leave wage base, higher contribution base)
/// is expressed in terms of this enum, and [`PayComponents::amount`] matches it
/// exhaustively, so adding a component forces every selection site to be
/// revisited by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningComponent {
    /// Basic pay.
    Basic,
    /// Dearness allowance.
    Da,
    /// Retaining allowance.
    RetainingAllowance,
    /// House rent allowance.
    Hra,
    /// Conveyance allowance.
    Conveyance,
    /// Washing and attire allowance.
    WashingAttire,
    /// First special allowance.
    SpecialAllowance1,
    /// Second special allowance.
    SpecialAllowance2,
    /// Third special allowance.
    SpecialAllowance3,
}

impl EarningComponent {
    /// All components in payslip order.
    pub const ALL: [EarningComponent; 9] = [
        EarningComponent::Basic,
        EarningComponent::Da,
        EarningComponent::RetainingAllowance,
        EarningComponent::Hra,
        EarningComponent::Conveyance,
        EarningComponent::WashingAttire,
        EarningComponent::SpecialAllowance1,
        EarningComponent::SpecialAllowance2,
        EarningComponent::SpecialAllowance3,
    ];

    /// Returns true for the components that form the core wage
    /// (basic, DA and retaining allowance).
    pub fn is_core_wage(self) -> bool {
        matches!(
            self,
            EarningComponent::Basic | EarningComponent::Da | EarningComponent::RetainingAllowance
        )
    }
}

/// A typed selection of earnings components.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ComponentSet, EarningComponent};
///
/// let set: ComponentSet = [EarningComponent::Basic, EarningComponent::Da].into_iter().collect();
/// assert!(set.contains(EarningComponent::Da));
/// assert!(!set.contains(EarningComponent::Hra));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSet(BTreeSet<EarningComponent>);

impl ComponentSet {
    /// Creates an empty selection.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Creates a selection containing every component.
    pub fn all() -> Self {
        EarningComponent::ALL.into_iter().collect()
    }

    /// Returns true if the component is selected.
    pub fn contains(&self, component: EarningComponent) -> bool {
        self.0.contains(&component)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the selected components in payslip order.
    pub fn iter(&self) -> impl Iterator<Item = EarningComponent> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<EarningComponent> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = EarningComponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Monthly amounts for each earnings component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Basic pay.
    #[serde(default)]
    pub basic: Decimal,
    /// Dearness allowance.
    #[serde(default)]
    pub da: Decimal,
    /// Retaining allowance.
    #[serde(default)]
    pub retaining_allowance: Decimal,
    /// House rent allowance.
    #[serde(default)]
    pub hra: Decimal,
    /// Conveyance allowance.
    #[serde(default)]
    pub conveyance: Decimal,
    /// Washing and attire allowance.
    #[serde(default)]
    pub washing_attire: Decimal,
    /// First special allowance.
    #[serde(default)]
    pub special_allowance_1: Decimal,
    /// Second special allowance.
    #[serde(default)]
    pub special_allowance_2: Decimal,
    /// Third special allowance.
    #[serde(default)]
    pub special_allowance_3: Decimal,
}

impl PayComponents {
    /// Returns the amount of a single component.
    pub fn amount(&self, component: EarningComponent) -> Decimal {
        match component {
            EarningComponent::Basic => self.basic,
            EarningComponent::Da => self.da,
            EarningComponent::RetainingAllowance => self.retaining_allowance,
            EarningComponent::Hra => self.hra,
            EarningComponent::Conveyance => self.conveyance,
            EarningComponent::WashingAttire => self.washing_attire,
            EarningComponent::SpecialAllowance1 => self.special_allowance_1,
            EarningComponent::SpecialAllowance2 => self.special_allowance_2,
            EarningComponent::SpecialAllowance3 => self.special_allowance_3,
        }
    }

    /// Sums the selected components.
    pub fn sum_of(&self, selection: &ComponentSet) -> Decimal {
        selection.iter().map(|c| self.amount(c)).sum()
    }

    /// Sums every component.
    pub fn total(&self) -> Decimal {
        EarningComponent::ALL.iter().map(|c| self.amount(*c)).sum()
    }

    /// Sums basic, DA and retaining allowance.
    pub fn core_wage(&self) -> Decimal {
        EarningComponent::ALL
            .iter()
            .filter(|c| c.is_core_wage())
            .map(|c| self.amount(*c))
            .sum()
    }

    /// Builds a new set of components by applying `f` to every amount.
    pub fn map(&self, mut f: impl FnMut(Decimal) -> Decimal) -> Self {
        Self {
            basic: f(self.basic),
            da: f(self.da),
            retaining_allowance: f(self.retaining_allowance),
            hra: f(self.hra),
            conveyance: f(self.conveyance),
            washing_attire: f(self.washing_attire),
            special_allowance_1: f(self.special_allowance_1),
            special_allowance_2: f(self.special_allowance_2),
            special_allowance_3: f(self.special_allowance_3),
        }
    }
}

/// Whether a PF contribution is made on the capped or the full wage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    /// Contribution on wages capped at the EPF ceiling.
    #[default]
    Regular,
    /// Contribution on the full wage.
    Higher,
}

/// The employee's higher-pension elections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HigherPension {
    /// The employee was contributing to EPF before September 2014.
    #[serde(default)]
    pub contributed_before_2014: bool,
    /// Employee-side contribution type.
    #[serde(default)]
    pub employee_contribution: ContributionType,
    /// Employer-side contribution type.
    #[serde(default)]
    pub employer_contribution: ContributionType,
    /// The employee opted for pension on higher wages.
    #[serde(default)]
    pub higher_pension_opted: bool,
}

/// Deferred-pension election made after EPS maturity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeferredPension {
    /// No election.
    #[default]
    #[serde(rename = "none")]
    None,
    /// The employee left PF entirely.
    #[serde(rename = "opt_out")]
    OptOut,
    /// PF continues but the pension share is credited to EPF.
    #[serde(rename = "without_eps")]
    WithoutEps,
}

/// Represents an employee subject to payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text branch or city label used to resolve Professional Tax.
    #[serde(default)]
    pub branch: String,
    /// Monthly pay structure.
    pub pay: PayComponents,
    /// Date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Date of joining.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    /// Date of leaving, if the employee has exited.
    #[serde(default)]
    pub date_of_leaving: Option<NaiveDate>,
    /// EPF membership date; the date of joining is used when absent.
    #[serde(default)]
    pub epf_membership_date: Option<NaiveDate>,
    /// The employee is exempt from PF.
    #[serde(default)]
    pub is_pf_exempt: bool,
    /// The employee is exempt from ESI.
    #[serde(default)]
    pub is_esi_exempt: bool,
    /// Voluntary PF rate (e.g., 0.05 for 5%).
    #[serde(default)]
    pub vpf_rate: Decimal,
    /// Higher-pension elections.
    #[serde(default)]
    pub higher_pension: HigherPension,
    /// Deferred-pension election.
    #[serde(default)]
    pub deferred_pension: DeferredPension,
}

impl Employee {
    /// Returns true if the employee makes no PF contribution at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{DeferredPension, Employee, PayComponents};
    ///
    /// let mut employee = Employee::new("E001", PayComponents::default());
    /// assert!(!employee.is_out_of_pf());
    ///
    /// employee.deferred_pension = DeferredPension::OptOut;
    /// assert!(employee.is_out_of_pf());
    /// ```
    pub fn is_out_of_pf(&self) -> bool {
        self.is_pf_exempt || self.deferred_pension == DeferredPension::OptOut
    }

    /// Creates an employee with the given pay structure and no elections.
    pub fn new(id: impl Into<String>, pay: PayComponents) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            branch: String::new(),
            pay,
            date_of_birth: None,
            date_of_joining: None,
            date_of_leaving: None,
            epf_membership_date: None,
            is_pf_exempt: false,
            is_esi_exempt: false,
            vpf_rate: Decimal::ZERO,
            higher_pension: HigherPension::default(),
            deferred_pension: DeferredPension::None,
        }
    }

    /// The date EPF membership started, falling back to the date of joining.
    pub fn epf_membership_start(&self) -> Option<NaiveDate> {
        self.epf_membership_date.or(self.date_of_joining)
    }

    /// Completed years of age on the given date, if the date of birth is known.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        let mut age = date.year() - dob.year();
        if (date.month(), date.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_pay() -> PayComponents {
        PayComponents {
            basic: dec("15000"),
            da: dec("2000"),
            retaining_allowance: dec("500"),
            hra: dec("6000"),
            conveyance: dec("1600"),
            washing_attire: dec("400"),
            special_allowance_1: dec("1000"),
            special_allowance_2: dec("0"),
            special_allowance_3: dec("250"),
        }
    }

    #[test]
    fn test_deserialize_employee_with_defaults() {
        let json = r#"{
            "id": "E001",
            "name": "Asha Rao",
            "branch": "Pune Plant",
            "pay": { "basic": "20000", "hra": "8000" },
            "date_of_joining": "2019-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "E001");
        assert_eq!(employee.pay.basic, dec("20000"));
        assert_eq!(employee.pay.da, Decimal::ZERO);
        assert_eq!(employee.deferred_pension, DeferredPension::None);
        assert_eq!(
            employee.higher_pension.employee_contribution,
            ContributionType::Regular
        );
        assert!(!employee.is_esi_exempt);
    }

    #[test]
    fn test_deserialize_pension_elections() {
        let json = r#"{
            "id": "E002",
            "pay": { "basic": "30000" },
            "higher_pension": {
                "contributed_before_2014": true,
                "employee_contribution": "higher",
                "employer_contribution": "higher",
                "higher_pension_opted": true
            },
            "deferred_pension": "without_eps"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.higher_pension.contributed_before_2014);
        assert_eq!(
            employee.higher_pension.employer_contribution,
            ContributionType::Higher
        );
        assert_eq!(employee.deferred_pension, DeferredPension::WithoutEps);
    }

    #[test]
    fn test_amount_matches_each_field() {
        let pay = create_test_pay();
        assert_eq!(pay.amount(EarningComponent::Basic), dec("15000"));
        assert_eq!(pay.amount(EarningComponent::Hra), dec("6000"));
        assert_eq!(pay.amount(EarningComponent::WashingAttire), dec("400"));
        assert_eq!(pay.amount(EarningComponent::SpecialAllowance3), dec("250"));
    }

    #[test]
    fn test_total_equals_sum_of_all_components() {
        let pay = create_test_pay();
        assert_eq!(pay.total(), dec("26750"));
        assert_eq!(pay.total(), pay.sum_of(&ComponentSet::all()));
    }

    #[test]
    fn test_core_wage_is_basic_da_and_retaining() {
        let pay = create_test_pay();
        assert_eq!(pay.core_wage(), dec("17500"));
    }

    #[test]
    fn test_sum_of_selection() {
        let pay = create_test_pay();
        let selection: ComponentSet = [EarningComponent::Basic, EarningComponent::Conveyance]
            .into_iter()
            .collect();
        assert_eq!(pay.sum_of(&selection), dec("16600"));
        assert_eq!(pay.sum_of(&ComponentSet::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_component_set_serializes_as_list() {
        let set: ComponentSet = [EarningComponent::Da, EarningComponent::Basic]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["basic","da"]"#);
    }

    #[test]
    fn test_map_applies_to_every_component() {
        let doubled = create_test_pay().map(|v| v * Decimal::TWO);
        assert_eq!(doubled.total(), dec("53500"));
    }

    #[test]
    fn test_epf_membership_falls_back_to_joining_date() {
        let mut employee = Employee::new("E001", create_test_pay());
        employee.date_of_joining = NaiveDate::from_ymd_opt(2012, 4, 1);
        assert_eq!(employee.epf_membership_start(), employee.date_of_joining);

        employee.epf_membership_date = NaiveDate::from_ymd_opt(2015, 1, 1);
        assert_eq!(
            employee.epf_membership_start(),
            NaiveDate::from_ymd_opt(2015, 1, 1)
        );
    }

    #[test]
    fn test_age_on_counts_completed_years() {
        let mut employee = Employee::new("E001", create_test_pay());
        employee.date_of_birth = NaiveDate::from_ymd_opt(1967, 5, 20);

        let before_birthday = NaiveDate::from_ymd_opt(2025, 5, 19).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        assert_eq!(employee.age_on(before_birthday), Some(57));
        assert_eq!(employee.age_on(on_birthday), Some(58));
    }

    #[test]
    fn test_age_unknown_without_birth_date() {
        let employee = Employee::new("E001", create_test_pay());
        let date = NaiveDate::from_ymd_opt(2025, 5, 19).unwrap();
        assert_eq!(employee.age_on(date), None);
    }

    #[test]
    fn test_pf_exempt_is_out_of_pf() {
        let mut employee = Employee::new("E001", create_test_pay());
        employee.is_pf_exempt = true;
        assert!(employee.is_out_of_pf());
    }
}
