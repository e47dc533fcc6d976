//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod inputs;
mod ledger;
mod pay_period;
mod payroll_result;
mod state;

pub use attendance::Attendance;
pub use employee::{
    ComponentSet, ContributionType, DeferredPension, EarningComponent, Employee, HigherPension,
    PayComponents,
};
pub use inputs::{CalculationOptions, EmployeeRecords};
pub use ledger::{
    AdvanceLedger, CasualLeaveAccount, EarnedLeaveAccount, FineRecord, LeaveLedger,
    SickLeaveAccount,
};
pub use pay_period::{HalfYearBlock, PayPeriod, month_ordinal};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, Deductions, Earnings, EmployerContributions,
    LeaveSnapshot, PayrollFlags, PayrollResult, PayrollStatus, WageBases,
};
pub use state::IndianState;
