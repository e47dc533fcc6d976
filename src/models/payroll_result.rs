//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture every output of a monthly calculation: the earnings
//! and deductions breakdown, employer contributions, the wage bases used for
//! statutory contributions, the frozen leave snapshot, and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LeaveLedger, PayComponents};

/// Lifecycle tag of a payroll result.
///
/// The engine always emits [`PayrollStatus::Draft`]; finalizing is done by the
/// payroll run workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Calculated but not yet confirmed.
    #[default]
    Draft,
    /// Confirmed and frozen.
    Finalized,
}

/// Earnings for the period after proration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Each component prorated and rounded independently.
    pub components: PayComponents,
    /// Bonus paid in the period.
    pub bonus: Decimal,
    /// Earned leave encashment.
    pub leave_encashment: Decimal,
    /// Gross earnings (components + bonus + encashment).
    pub gross: Decimal,
}

/// Employee-side deductions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Employee EPF contribution.
    pub epf: Decimal,
    /// Voluntary PF contribution.
    pub vpf: Decimal,
    /// Employee ESI contribution.
    pub esi: Decimal,
    /// Professional Tax.
    pub professional_tax: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Employee Labour Welfare Fund contribution.
    pub lwf: Decimal,
    /// Fine recovered.
    pub fine: Decimal,
    /// Salary advance recovered.
    pub advance_recovery: Decimal,
    /// Sum of the statutory deductions (EPF, VPF, ESI, PT, IT, LWF).
    pub statutory_total: Decimal,
    /// All deductions.
    pub total: Decimal,
}

/// Employer-side contributions; not deducted from the employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer EPF share (after any EPS carve-out).
    pub epf: Decimal,
    /// Employer EPS share.
    pub eps: Decimal,
    /// Employer ESI contribution.
    pub esi: Decimal,
    /// Employer Labour Welfare Fund contribution.
    pub lwf: Decimal,
}

impl EmployerContributions {
    /// Sum of all employer contributions.
    pub fn total(&self) -> Decimal {
        self.epf + self.eps + self.esi + self.lwf
    }
}

/// Wage bases used by the statutory calculators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageBases {
    /// PF wage after the allowance cap-back rule.
    pub pf_wage: Decimal,
    /// Wage on which EPF was computed.
    pub epf_wage: Decimal,
    /// Wage on which EPS was computed.
    pub eps_wage: Decimal,
    /// Wage on which ESI was assessed.
    pub esi_wage: Decimal,
    /// Unprorated monthly gross used for half-yearly Professional Tax.
    pub standard_monthly_gross: Decimal,
    /// Gross left after statutory deductions, available for recoveries.
    pub code_gross_wages: Decimal,
}

/// Flags describing how the result was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFlags {
    /// Allowances exceeded half of gross and were folded into the PF wage.
    pub is_code88: bool,
    /// The ESI basis differs from gross earnings.
    pub is_esi_code_wages_used: bool,
    /// The employee left service during the period.
    pub left_service: bool,
}

/// Frozen copy of the leave ledger as of a calculation.
///
/// Only read access is offered; the snapshot is the historical record and stays
/// independent of later edits to the live ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveSnapshot(LeaveLedger);

impl LeaveSnapshot {
    pub(crate) fn new(ledger: LeaveLedger) -> Self {
        Self(ledger)
    }

    /// The frozen ledger.
    pub fn ledger(&self) -> &LeaveLedger {
        &self.0
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statutory reference for this rule.
    pub statute_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a monthly payroll calculation.
///
/// `net_pay` always equals `earnings.gross - deductions.total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the result is for.
    pub employee_id: String,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Days in the calendar month.
    pub days_in_month: u32,
    /// Days paid for, in `[0, days_in_month]`.
    pub payable_days: Decimal,
    /// Earnings breakdown.
    pub earnings: Earnings,
    /// Deductions breakdown.
    pub deductions: Deductions,
    /// Employer contributions.
    pub employer_contributions: EmployerContributions,
    /// Wage bases used by the statutory calculators.
    pub wage_bases: WageBases,
    /// Informational gratuity accrual; not part of any total.
    pub gratuity_accrual: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// Calculation flags.
    pub flags: PayrollFlags,
    /// Remarks for the payslip.
    pub remarks: Vec<String>,
    /// Leave ledger frozen as of this calculation.
    pub leave_snapshot: LeaveSnapshot,
    /// Lifecycle status.
    pub status: PayrollStatus,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Gross earnings plus employer contributions.
    pub fn employer_cost(&self) -> Decimal {
        self.earnings.gross + self.employer_contributions.total()
    }
}
