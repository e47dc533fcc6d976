//! Payroll runs over many employees.
//!
//! [`run_payroll`] checks run preconditions and calculates a whole period in
//! parallel. [`finalize`] freezes a draft result and carries its ledgers
//! forward.

mod batch;
mod finalize;

pub use batch::{
    BatchFailure, BatchOutcome, EPS_MATURITY_AGE, EmployeeEntry, PayrollRun, RunSummary,
    run_payroll, unresolved_pension_maturity,
};
pub use finalize::{FinalizedPayroll, finalize};
