//! Request types for the payroll engine API.
//!
//! `/calculate` takes one employee with their records for a period.
//! `/payroll-runs` takes a whole [`PayrollRun`](crate::run::PayrollRun).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationOptions, Employee, EmployeeRecords, FineRecord, PayPeriod};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee master record.
    pub employee: Employee,
    /// The pay period, as `{ "month": .., "year": .. }`.
    pub period: PayPeriod,
    /// Attendance and ledgers; any may be omitted.
    #[serde(flatten)]
    pub records: EmployeeRecords,
    /// Fines levied on this employee for this period.
    #[serde(default)]
    pub fines: Vec<FineRequest>,
    /// Calculation options.
    #[serde(default)]
    pub options: CalculationOptions,
}

/// A fine in a single-employee request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineRequest {
    /// Fine amount.
    pub amount: Decimal,
    /// Reason recorded for the fine.
    #[serde(default)]
    pub reason: String,
}

impl CalculationRequest {
    /// Fine records for the request's employee and period.
    pub fn fine_records(&self) -> Vec<FineRecord> {
        self.fines
            .iter()
            .map(|fine| FineRecord {
                employee_id: self.employee.id.clone(),
                period: self.period,
                amount: fine.amount,
                reason: fine.reason.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_deserializes() {
        let json = r#"{
            "employee": { "id": "E001", "pay": { "basic": "20000" } },
            "period": { "month": 4, "year": 2025 }
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.employee.id, "E001");
        assert_eq!(request.period.month(), 4);
        assert!(request.records.attendance.is_none());
        assert!(request.fines.is_empty());
        assert!(!request.options.restrict_advance_to_50_percent);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let json = r#"{
            "employee": { "id": "E001", "pay": {} },
            "period": { "month": 13, "year": 2025 }
        }"#;
        let err = serde_json::from_str::<CalculationRequest>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid payroll period"));
    }

    #[test]
    fn test_fines_are_bound_to_employee_and_period() {
        let json = r#"{
            "employee": { "id": "E007", "pay": {} },
            "period": { "month": 9, "year": 2025 },
            "attendance": { "present_days": "20" },
            "fines": [{ "amount": "250", "reason": "Late" }]
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let fines = request.fine_records();

        assert_eq!(fines.len(), 1);
        assert!(fines[0].applies_to("E007", &PayPeriod::new(9, 2025).unwrap()));
        assert_eq!(fines[0].amount, Decimal::from(250));
        assert!(request.records.attendance.is_some());
    }
}
