//! Leave and advance ledgers, and fine records.
//!
//! Ledgers are cumulative, externally owned state. The engine reads them and
//! reports what it would consume; it never mutates the caller's copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// Earned leave account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedLeaveAccount {
    /// Balance brought forward.
    #[serde(default)]
    pub opening: Decimal,
    /// Leave credited for the year.
    #[serde(default)]
    pub eligible: Decimal,
    /// Days encashed.
    #[serde(default)]
    pub encashed: Decimal,
    /// Days availed.
    #[serde(default)]
    pub availed: Decimal,
    /// Remaining balance.
    #[serde(default)]
    pub balance: Decimal,
}

/// Sick leave account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickLeaveAccount {
    /// Leave credited for the year.
    #[serde(default)]
    pub eligible: Decimal,
    /// Days availed.
    #[serde(default)]
    pub availed: Decimal,
    /// Remaining balance.
    #[serde(default)]
    pub balance: Decimal,
}

/// Casual leave account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasualLeaveAccount {
    /// Leave accumulated so far.
    #[serde(default)]
    pub accumulation: Decimal,
    /// Days availed.
    #[serde(default)]
    pub availed: Decimal,
    /// Remaining balance.
    #[serde(default)]
    pub balance: Decimal,
}

/// Per-employee leave ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLedger {
    /// Earned leave.
    #[serde(default)]
    pub earned: EarnedLeaveAccount,
    /// Sick leave.
    #[serde(default)]
    pub sick: SickLeaveAccount,
    /// Casual leave.
    #[serde(default)]
    pub casual: CasualLeaveAccount,
}

/// Per-employee salary advance ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceLedger {
    /// Balance brought forward.
    #[serde(default)]
    pub opening: Decimal,
    /// Total advance granted.
    #[serde(default)]
    pub total_advance: Decimal,
    /// Agreed monthly installment.
    #[serde(default)]
    pub monthly_installment: Decimal,
    /// Amount recovered so far.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Outstanding balance.
    #[serde(default)]
    pub balance: Decimal,
}

impl AdvanceLedger {
    /// The installment due this period: the agreed installment, limited to the
    /// outstanding balance and never negative.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::AdvanceLedger;
    /// use rust_decimal::Decimal;
    ///
    /// let ledger = AdvanceLedger {
    ///     monthly_installment: Decimal::from(2000),
    ///     balance: Decimal::from(1500),
    ///     ..AdvanceLedger::default()
    /// };
    /// assert_eq!(ledger.installment_due(), Decimal::from(1500));
    /// ```
    pub fn installment_due(&self) -> Decimal {
        self.monthly_installment
            .min(self.balance)
            .max(Decimal::ZERO)
    }

    /// Returns the ledger as it stands after recovering `amount`.
    pub fn after_recovery(&self, amount: Decimal) -> Self {
        Self {
            paid_amount: self.paid_amount + amount,
            balance: self.balance - amount,
            ..self.clone()
        }
    }
}

/// A fine levied on an employee for a specific period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineRecord {
    /// The employee fined.
    pub employee_id: String,
    /// The period the fine is recovered in.
    pub period: PayPeriod,
    /// Fine amount.
    pub amount: Decimal,
    /// Reason recorded for the fine.
    #[serde(default)]
    pub reason: String,
}

impl FineRecord {
    /// Returns true if this fine is recoverable from the employee in the period.
    pub fn applies_to(&self, employee_id: &str, period: &PayPeriod) -> bool {
        self.employee_id == employee_id && self.period == *period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_installment_due_is_installment_when_balance_covers_it() {
        let ledger = AdvanceLedger {
            monthly_installment: dec("2000"),
            balance: dec("10000"),
            ..AdvanceLedger::default()
        };
        assert_eq!(ledger.installment_due(), dec("2000"));
    }

    #[test]
    fn test_installment_due_never_negative() {
        let ledger = AdvanceLedger {
            monthly_installment: dec("2000"),
            balance: dec("-50"),
            ..AdvanceLedger::default()
        };
        assert_eq!(ledger.installment_due(), Decimal::ZERO);
    }

    #[test]
    fn test_after_recovery_leaves_original_untouched() {
        let ledger = AdvanceLedger {
            opening: dec("10000"),
            total_advance: dec("10000"),
            monthly_installment: dec("2000"),
            paid_amount: dec("4000"),
            balance: dec("6000"),
        };
        let updated = ledger.after_recovery(dec("2000"));

        assert_eq!(updated.paid_amount, dec("6000"));
        assert_eq!(updated.balance, dec("4000"));
        assert_eq!(updated.total_advance, dec("10000"));
        assert_eq!(ledger.balance, dec("6000"));
    }

    #[test]
    fn test_fine_applies_only_to_matching_employee_and_period() {
        let period = PayPeriod::new(6, 2025).unwrap();
        let fine = FineRecord {
            employee_id: "E001".to_string(),
            period,
            amount: dec("500"),
            reason: "Damage to equipment".to_string(),
        };

        assert!(fine.applies_to("E001", &period));
        assert!(!fine.applies_to("E002", &period));
        assert!(!fine.applies_to("E001", &PayPeriod::new(7, 2025).unwrap()));
    }

    #[test]
    fn test_deserialize_leave_ledger_with_missing_accounts() {
        let json = r#"{ "earned": { "opening": "12", "eligible": "15" } }"#;
        let ledger: LeaveLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.earned.opening, dec("12"));
        assert_eq!(ledger.sick, SickLeaveAccount::default());
        assert_eq!(ledger.casual.balance, Decimal::ZERO);
    }
}
