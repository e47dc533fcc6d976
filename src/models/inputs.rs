//! Per-employee period inputs and calculation options.

use serde::{Deserialize, Serialize};

use super::{AdvanceLedger, Attendance, LeaveLedger};

/// The records supplied for one employee for one period.
///
/// Any record may be absent: missing attendance means the employee was present
/// for the whole month, and missing ledgers are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecords {
    /// Attendance for the period.
    #[serde(default)]
    pub attendance: Option<Attendance>,
    /// Leave ledger before this period.
    #[serde(default)]
    pub leave_ledger: Option<LeaveLedger>,
    /// Salary advance ledger before this period.
    #[serde(default)]
    pub advance_ledger: Option<AdvanceLedger>,
}

/// Options that change how a calculation is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// Limit fine plus advance recovery to half of code gross wages.
    #[serde(default)]
    pub restrict_advance_to_50_percent: bool,
}
