//! Configuration types for statutory payroll.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML configuration files. A [`StatutoryConfig`] is
//! read-only for a calculation and is passed by reference into every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentSet, EarningComponent, IndianState};

/// Provident Fund rates and wage ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfConfig {
    /// Employee EPF rate (e.g., 0.12).
    pub employee_rate: Decimal,
    /// Employer EPF rate (e.g., 0.12), before the EPS carve-out.
    pub employer_rate: Decimal,
    /// EPF wage ceiling (e.g., 15000).
    pub ceiling: Decimal,
}

impl Default for PfConfig {
    fn default() -> Self {
        Self {
            employee_rate: Decimal::new(12, 2),
            employer_rate: Decimal::new(12, 2),
            ceiling: Decimal::from(15000),
        }
    }
}

/// Who contributes on the higher (uncapped) wage when the higher-contribution
/// scheme is enabled. The employee always does; the mode decides the employer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HigherContributionMode {
    /// Only the employee contributes on the higher wage.
    #[default]
    ByEmployee,
    /// Both employee and employer contribute on the higher wage.
    ByEmployeeAndEmployer,
}

impl HigherContributionMode {
    /// Returns true if the employer contributes on the higher wage.
    pub fn includes_employer(self) -> bool {
        self == HigherContributionMode::ByEmployeeAndEmployer
    }
}

/// Organisation-wide higher PF contribution scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HigherContributionConfig {
    /// Whether the scheme is active.
    #[serde(default)]
    pub enabled: bool,
    /// Components that make up the alternate PF wage.
    #[serde(default)]
    pub components: ComponentSet,
    /// Who contributes on the higher wage.
    #[serde(default)]
    pub mode: HigherContributionMode,
}

/// Employee State Insurance rates and coverage ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsiConfig {
    /// Employee ESI rate (e.g., 0.0075).
    pub employee_rate: Decimal,
    /// Employer ESI rate (e.g., 0.0325).
    pub employer_rate: Decimal,
    /// Coverage ceiling (e.g., 21000).
    pub ceiling: Decimal,
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            employee_rate: Decimal::new(75, 4),
            employer_rate: Decimal::new(325, 4),
            ceiling: Decimal::from(21000),
        }
    }
}

/// How often Professional Tax is assessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PtCycle {
    /// Slab looked up on each month's gross.
    #[default]
    Monthly,
    /// Slab looked up on the half-year income (April-September, October-March).
    HalfYearly,
}

/// A Professional Tax slab: income in `[min, max]` pays `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtSlab {
    /// Lower bound (inclusive).
    pub min: Decimal,
    /// Upper bound (inclusive); open-ended when absent.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Tax for the slab.
    pub amount: Decimal,
}

impl PtSlab {
    /// Returns true if the income falls inside the slab.
    pub fn contains(&self, income: Decimal) -> bool {
        income >= self.min && self.max.is_none_or(|max| income <= max)
    }
}

/// Professional Tax rules for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePreset {
    /// The state the preset applies to.
    pub state: IndianState,
    /// Assessment cycle.
    #[serde(default)]
    pub cycle: PtCycle,
    /// Ordered slabs; the first inclusive match wins. Empty for states that
    /// levy no Professional Tax.
    #[serde(default)]
    pub slabs: Vec<PtSlab>,
}

/// Professional Tax defaults and the state preset table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxConfig {
    /// Cycle used when the branch matches no known state.
    #[serde(default)]
    pub default_cycle: PtCycle,
    /// Slabs used when the branch matches no known state.
    #[serde(default)]
    pub default_slabs: Vec<PtSlab>,
    /// State presets, usually loaded from `pt_presets.yaml`.
    #[serde(default)]
    pub presets: Vec<StatePreset>,
}

impl ProfessionalTaxConfig {
    /// Returns the preset for a state, if configured.
    pub fn preset_for(&self, state: IndianState) -> Option<&StatePreset> {
        self.presets.iter().find(|p| p.state == state)
    }
}

/// Months in which the Labour Welfare Fund is deducted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LwfCycle {
    /// Every month.
    Monthly,
    /// June and December.
    #[default]
    HalfYearly,
    /// December only.
    Yearly,
}

impl LwfCycle {
    /// Returns true if the deduction falls due in the given month.
    pub fn is_due_in(self, month: u32) -> bool {
        match self {
            LwfCycle::Monthly => true,
            LwfCycle::HalfYearly => month == 6 || month == 12,
            LwfCycle::Yearly => month == 12,
        }
    }
}

/// Labour Welfare Fund settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LwfConfig {
    /// Whether LWF is deducted at all.
    #[serde(default)]
    pub enabled: bool,
    /// When it falls due.
    #[serde(default)]
    pub cycle: LwfCycle,
    /// Flat employee contribution.
    #[serde(default)]
    pub employee_amount: Decimal,
    /// Flat employer contribution.
    #[serde(default)]
    pub employer_amount: Decimal,
}

fn default_leave_wage_components() -> ComponentSet {
    [EarningComponent::Basic, EarningComponent::Da]
        .into_iter()
        .collect()
}

/// The complete statutory configuration for a payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::default();
/// assert_eq!(config.pf.ceiling, Decimal::from(15000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConfig {
    /// Provident Fund settings.
    #[serde(default)]
    pub pf: PfConfig,
    /// Higher PF contribution scheme.
    #[serde(default)]
    pub higher_contribution: HigherContributionConfig,
    /// ESI settings.
    #[serde(default)]
    pub esi: EsiConfig,
    /// Professional Tax settings.
    #[serde(default)]
    pub professional_tax: ProfessionalTaxConfig,
    /// Labour Welfare Fund settings.
    #[serde(default)]
    pub lwf: LwfConfig,
    /// Components whose unprorated sum is the daily leave wage base.
    #[serde(default = "default_leave_wage_components")]
    pub leave_wage_components: ComponentSet,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self {
            pf: PfConfig::default(),
            higher_contribution: HigherContributionConfig::default(),
            esi: EsiConfig::default(),
            professional_tax: ProfessionalTaxConfig::default(),
            lwf: LwfConfig::default(),
            leave_wage_components: default_leave_wage_components(),
        }
    }
}

impl StatutoryConfig {
    /// Checks that the configuration is structurally valid.
    ///
    /// This is a precondition of every payroll run and must be checked before
    /// any employee is calculated. Rates must lie in `[0, 1]`; ceilings, flat
    /// amounts and slab bounds must not be negative; every slab must have
    /// `min <= max`.
    pub fn validate(&self) -> EngineResult<()> {
        check_rate("pf.employee_rate", self.pf.employee_rate)?;
        check_rate("pf.employer_rate", self.pf.employer_rate)?;
        check_non_negative("pf.ceiling", self.pf.ceiling)?;

        check_rate("esi.employee_rate", self.esi.employee_rate)?;
        check_rate("esi.employer_rate", self.esi.employer_rate)?;
        check_non_negative("esi.ceiling", self.esi.ceiling)?;

        check_non_negative("lwf.employee_amount", self.lwf.employee_amount)?;
        check_non_negative("lwf.employer_amount", self.lwf.employer_amount)?;

        if self.higher_contribution.enabled && self.higher_contribution.components.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "higher_contribution.components".to_string(),
                message: "must select at least one component when enabled".to_string(),
            });
        }

        check_slabs(
            "professional_tax.default_slabs",
            &self.professional_tax.default_slabs,
        )?;
        for preset in &self.professional_tax.presets {
            check_slabs(
                &format!("professional_tax.presets.{}", preset.state.name()),
                &preset.slabs,
            )?;
        }

        Ok(())
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("rate {} must be between 0 and 1", rate),
        });
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("value {} must not be negative", value),
        });
    }
    Ok(())
}

fn check_slabs(field: &str, slabs: &[PtSlab]) -> EngineResult<()> {
    for (index, slab) in slabs.iter().enumerate() {
        let slab_field = format!("{}[{}]", field, index);
        check_non_negative(&slab_field, slab.min)?;
        check_non_negative(&slab_field, slab.amount)?;
        if let Some(max) = slab.max.filter(|max| *max < slab.min) {
            return Err(EngineError::InvalidConfig {
                field: slab_field,
                message: format!("max {} is below min {}", max, slab.min),
            });
        }
    }
    Ok(())
}
