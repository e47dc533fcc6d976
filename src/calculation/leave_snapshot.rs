//! Frozen leave snapshot.
//!
//! The snapshot records the leave ledger as it stands after this period's
//! attendance. It is a copy; the caller's ledger is left untouched.

use crate::models::{Attendance, AuditStep, LeaveLedger, LeaveSnapshot};

/// The result of building a leave snapshot, including the audit step.
#[derive(Debug, Clone)]
pub struct LeaveSnapshotResult {
    /// The frozen ledger.
    pub snapshot: LeaveSnapshot,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Builds the leave snapshot for the period.
///
/// Availed and encashed days are taken from attendance and balances are
/// recomputed: EL = opening + eligible - encashed - availed,
/// SL = eligible - availed, CL = accumulation - availed.
pub fn build_leave_snapshot(
    ledger: &LeaveLedger,
    attendance: &Attendance,
    step_number: u32,
) -> LeaveSnapshotResult {
    let mut frozen = ledger.clone();

    let earned = &mut frozen.earned;
    earned.availed = attendance.earned_leave;
    earned.encashed = attendance.encashed_days;
    earned.balance = earned.opening + earned.eligible - earned.encashed - earned.availed;

    frozen.sick.availed = attendance.sick_leave;
    frozen.sick.balance = frozen.sick.eligible - frozen.sick.availed;

    frozen.casual.availed = attendance.casual_leave;
    frozen.casual.balance = frozen.casual.accumulation - frozen.casual.availed;

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_snapshot".to_string(),
        rule_name: "Leave Snapshot".to_string(),
        statute_ref: "Shops & Establishments Acts".to_string(),
        input: serde_json::json!({
            "earned_leave": attendance.earned_leave.to_string(),
            "encashed_days": attendance.encashed_days.to_string(),
            "sick_leave": attendance.sick_leave.to_string(),
            "casual_leave": attendance.casual_leave.to_string()
        }),
        output: serde_json::json!({
            "el_balance": frozen.earned.balance.to_string(),
            "sl_balance": frozen.sick.balance.to_string(),
            "cl_balance": frozen.casual.balance.to_string()
        }),
        reasoning: format!(
            "Balances after period: EL {}, SL {}, CL {}",
            frozen.earned.balance, frozen.sick.balance, frozen.casual.balance
        ),
    };

    LeaveSnapshotResult {
        snapshot: LeaveSnapshot::new(frozen),
        audit_step,
    }
}
