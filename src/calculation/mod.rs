//! Calculation logic for the payroll engine.
//!
//! Each statutory rule lives in its own module and returns a `*Result` carrying
//! the figures it produced and an audit step. [`calculate`] composes them, in
//! order: payable days and proration, gross earnings, PF wage basis, PF and
//! pension, ESI, Professional Tax, income tax, LWF, recovery capping, and
//! gratuity accrual. The leave snapshot is built alongside.

mod earnings;
mod engine;
mod esi;
mod gratuity;
mod income_tax;
mod jurisdiction;
mod labour_welfare_fund;
mod leave_snapshot;
mod pension_policy;
mod professional_tax;
mod proration;
mod provident_fund;
mod recovery;
mod rounding;
mod wage_basis;

pub use earnings::{GrossEarningsResult, calculate_gross_earnings};
pub use engine::calculate;
pub use esi::{EsiContributions, EsiResult, OUT_OF_COVERAGE_REMARK, calculate_esi};
pub use gratuity::{GratuityResult, calculate_gratuity_accrual};
pub use income_tax::{
    IncomeTaxResult, STANDARD_DEDUCTION, TAX_RATE, TAX_THRESHOLD, calculate_income_tax,
};
pub use jurisdiction::{
    Jurisdiction, JurisdictionResult, JurisdictionSource, match_state, resolve_jurisdiction,
};
pub use labour_welfare_fund::{LabourWelfareFundResult, calculate_lwf};
pub use leave_snapshot::{LeaveSnapshotResult, build_leave_snapshot};
pub use pension_policy::{PensionFlags, PensionWagePolicy, eps_amendment_date};
pub use professional_tax::{ProfessionalTaxResult, calculate_professional_tax, slab_amount};
pub use proration::{
    LEFT_PREVIOUS_PERIOD_REMARK, PayableDaysResult, ProrationResult, calculate_payable_days,
    prorate_components,
};
pub use provident_fund::{EPS_RATE, PfContributions, ProvidentFundResult, calculate_provident_fund};
pub use recovery::{RecoveryResult, cap_recoveries};
pub use rounding::{round_currency, round_up_currency};
pub use wage_basis::{WageBasis, WageBasisResult, calculate_wage_basis};
