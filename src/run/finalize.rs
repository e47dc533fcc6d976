//! Finalizing a draft result.
//!
//! Finalizing freezes a draft and projects the ledgers the employee would carry
//! into the next period. Nothing is persisted and the inputs are not modified.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AdvanceLedger, LeaveLedger, PayrollResult, PayrollStatus};

/// A finalized result with the ledgers carried forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedPayroll {
    /// The result, with status [`PayrollStatus::Finalized`].
    pub result: PayrollResult,
    /// The advance ledger after this period's recovery, if there was one.
    pub advance_ledger: Option<AdvanceLedger>,
    /// The leave ledger as frozen in the result's snapshot.
    pub leave_ledger: LeaveLedger,
}

/// Finalizes a draft result and projects its ledgers.
///
/// The advance ledger is moved on by the advance recovered
/// (`paid_amount + recovery`, `balance - recovery`); the leave ledger is the
/// result's snapshot.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{
///     AdvanceLedger, CalculationOptions, Employee, EmployeeRecords, PayComponents, PayPeriod,
///     PayrollStatus,
/// };
/// use payroll_engine::run::finalize;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "E001",
///     PayComponents { basic: Decimal::from(20000), ..PayComponents::default() },
/// );
/// let advance = AdvanceLedger {
///     monthly_installment: Decimal::from(1000),
///     balance: Decimal::from(5000),
///     ..AdvanceLedger::default()
/// };
/// let records = EmployeeRecords {
///     advance_ledger: Some(advance.clone()),
///     ..EmployeeRecords::default()
/// };
/// let draft = calculate(
///     &employee,
///     &StatutoryConfig::default(),
///     &PayPeriod::new(3, 2025).unwrap(),
///     &records,
///     &CalculationOptions::default(),
///     &[],
/// );
///
/// let finalized = finalize(&draft, Some(&advance));
/// assert_eq!(finalized.result.status, PayrollStatus::Finalized);
/// assert_eq!(finalized.advance_ledger.unwrap().balance, Decimal::from(4000));
/// ```
pub fn finalize(draft: &PayrollResult, advance_ledger: Option<&AdvanceLedger>) -> FinalizedPayroll {
    let recovered = draft.deductions.advance_recovery;
    debug!(
        employee_id = %draft.employee_id,
        advance_recovery = %recovered,
        "Finalizing payroll result"
    );

    FinalizedPayroll {
        result: PayrollResult {
            status: PayrollStatus::Finalized,
            ..draft.clone()
        },
        advance_ledger: advance_ledger.map(|ledger| ledger.after_recovery(recovered)),
        leave_ledger: draft.leave_snapshot.ledger().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate;
    use crate::config::StatutoryConfig;
    use crate::models::{
        Attendance, CalculationOptions, Employee, EmployeeRecords, PayComponents, PayPeriod,
        SickLeaveAccount,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_draft(records: &EmployeeRecords) -> PayrollResult {
        let employee = Employee::new(
            "E001",
            PayComponents {
                basic: dec("25000"),
                ..PayComponents::default()
            },
        );
        calculate(
            &employee,
            &StatutoryConfig::default(),
            &PayPeriod::new(4, 2025).unwrap(),
            records,
            &CalculationOptions::default(),
            &[],
        )
    }

    #[test]
    fn test_advance_ledger_moves_by_recovery() {
        let advance = AdvanceLedger {
            opening: dec("10000"),
            total_advance: dec("10000"),
            monthly_installment: dec("2500"),
            paid_amount: dec("5000"),
            balance: dec("5000"),
        };
        let records = EmployeeRecords {
            advance_ledger: Some(advance.clone()),
            ..EmployeeRecords::default()
        };
        let draft = create_test_draft(&records);
        let finalized = finalize(&draft, Some(&advance));
        let ledger = finalized.advance_ledger.unwrap();

        assert_eq!(ledger.paid_amount, dec("7500"));
        assert_eq!(ledger.balance, dec("2500"));
        assert_eq!(advance.balance, dec("5000"));
    }

    #[test]
    fn test_leave_ledger_comes_from_snapshot() {
        let records = EmployeeRecords {
            attendance: Some(Attendance {
                present_days: dec("28"),
                sick_leave: dec("2"),
                ..Attendance::default()
            }),
            leave_ledger: Some(LeaveLedger {
                sick: SickLeaveAccount {
                    eligible: dec("7"),
                    ..SickLeaveAccount::default()
                },
                ..LeaveLedger::default()
            }),
            ..EmployeeRecords::default()
        };
        let draft = create_test_draft(&records);
        let finalized = finalize(&draft, None);

        assert_eq!(finalized.leave_ledger.sick.balance, dec("5"));
        assert!(finalized.advance_ledger.is_none());
    }

    #[test]
    fn test_draft_is_left_untouched() {
        let draft = create_test_draft(&EmployeeRecords::default());
        let finalized = finalize(&draft, None);

        assert_eq!(draft.status, PayrollStatus::Draft);
        assert_eq!(finalized.result.status, PayrollStatus::Finalized);
        assert_eq!(finalized.result.net_pay, draft.net_pay);
    }
}
