//! Attendance model.
//!
//! Attendance is the authoritative source of what an employee actually worked
//! and consumed in a period; ledgers are reconciled against it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly attendance for one employee.
///
/// All counts are in days and may be fractional (half days).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Days present at work.
    #[serde(default)]
    pub present_days: Decimal,
    /// Earned leave availed.
    #[serde(default)]
    pub earned_leave: Decimal,
    /// Sick leave availed.
    #[serde(default)]
    pub sick_leave: Decimal,
    /// Casual leave availed.
    #[serde(default)]
    pub casual_leave: Decimal,
    /// Loss-of-pay days.
    #[serde(default)]
    pub lop_days: Decimal,
    /// Earned leave days encashed this period.
    #[serde(default)]
    pub encashed_days: Decimal,
}

impl Attendance {
    /// Attendance for an employee present every day of the month.
    ///
    /// This is the record assumed when the register has no row for the employee.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Attendance;
    /// use rust_decimal::Decimal;
    ///
    /// let attendance = Attendance::full_month(30);
    /// assert_eq!(attendance.present_days, Decimal::from(30));
    /// assert_eq!(attendance.paid_days(), Decimal::from(30));
    /// ```
    pub fn full_month(days_in_month: u32) -> Self {
        Self {
            present_days: Decimal::from(days_in_month),
            ..Self::default()
        }
    }

    /// Present days plus paid leave (earned, sick, casual).
    pub fn paid_days(&self) -> Decimal {
        self.present_days + self.earned_leave + self.sick_leave + self.casual_leave
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
    fn test_paid_days_excludes_lop_and_encashment() {
        let attendance = Attendance {
            present_days: dec("20"),
            earned_leave: dec("2"),
            sick_leave: dec("1.5"),
            casual_leave: dec("1"),
            lop_days: dec("5"),
            encashed_days: dec("3"),
        };
        assert_eq!(attendance.paid_days(), dec("24.5"));
    }

    #[test]
    fn test_deserialize_partial_record_defaults_to_zero() {
        let attendance: Attendance = serde_json::from_str(r#"{"present_days": "22"}"#).unwrap();
        assert_eq!(attendance.present_days, dec("22"));
        assert_eq!(attendance.sick_leave, Decimal::ZERO);
        assert_eq!(attendance.encashed_days, Decimal::ZERO);
    }

    #[test]
    fn test_full_month_has_no_leave() {
        let attendance = Attendance::full_month(31);
        assert_eq!(attendance.paid_days(), dec("31"));
        assert_eq!(attendance.lop_days, Decimal::ZERO);
    }
}
