//! Payroll batch runs.
//!
//! A run calculates every employee for one period. Preconditions (valid
//! configuration, resolved EPS maturity) are checked before any employee is
//! processed. Employees are then calculated in parallel; a calculation that
//! panics is reported as a failure for that employee and the rest of the run
//! carries on.

use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::calculate;
use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationOptions, DeferredPension, Employee, EmployeeRecords, FineRecord, PayPeriod,
    PayrollResult,
};

/// Age at which EPS membership matures.
pub const EPS_MATURITY_AGE: u32 = 58;

/// One employee and their records for the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeEntry {
    /// The employee master record.
    pub employee: Employee,
    /// Attendance and ledgers for the period.
    #[serde(flatten)]
    pub records: EmployeeRecords,
}

/// Everything needed to run payroll for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The pay period.
    pub period: PayPeriod,
    /// Employees to calculate.
    pub employees: Vec<EmployeeEntry>,
    /// Fines levied; only those for the run's period apply.
    #[serde(default)]
    pub fines: Vec<FineRecord>,
    /// Calculation options applied to every employee.
    #[serde(default)]
    pub options: CalculationOptions,
}

/// An employee whose calculation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee affected.
    pub employee_id: String,
    /// Description of the failure.
    pub message: String,
}

impl From<BatchFailure> for EngineError {
    fn from(failure: BatchFailure) -> Self {
        EngineError::CalculationError {
            employee_id: failure.employee_id,
            message: failure.message,
        }
    }
}

/// Totals across the successful results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of employees calculated.
    pub headcount: usize,
    /// Sum of gross earnings.
    pub total_gross: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Sum of gross plus employer contributions.
    pub employer_cost: Decimal,
}

impl RunSummary {
    /// Totals the given results.
    pub fn from_results(results: &[PayrollResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.headcount += 1;
            summary.total_gross += result.earnings.gross;
            summary.total_deductions += result.deductions.total;
            summary.total_net += result.net_pay;
            summary.employer_cost += result.employer_cost();
            summary
        })
    }
}

/// The outcome of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The pay period.
    pub period: PayPeriod,
    /// Draft results, in input order.
    pub results: Vec<PayrollResult>,
    /// Employees whose calculation failed.
    pub failures: Vec<BatchFailure>,
    /// Totals over `results`.
    pub summary: RunSummary,
}

/// Returns the employees who have reached EPS maturity by the end of the
/// period without a deferred-pension election.
///
/// PF-exempt employees and employees without a date of birth are never
/// reported.
pub fn unresolved_pension_maturity<'a, I>(employees: I, as_of: NaiveDate) -> Vec<String>
where
    I: IntoIterator<Item = &'a Employee>,
{
    employees
        .into_iter()
        .filter(|e| !e.is_pf_exempt && e.deferred_pension == DeferredPension::None)
        .filter(|e| e.age_on(as_of).is_some_and(|age| age >= EPS_MATURITY_AGE))
        .map(|e| e.id.clone())
        .collect()
}

/// Runs payroll for every employee in the run.
///
/// # Errors
///
/// * [`EngineError::InvalidConfig`] if the configuration fails validation
/// * [`EngineError::PensionMaturityUnresolved`] if any employee has reached
///   EPS maturity without a deferred-pension election
///
/// Individual calculation failures do not fail the run; they are reported in
/// [`BatchOutcome::failures`].
pub fn run_payroll(run: &PayrollRun, config: &StatutoryConfig) -> EngineResult<BatchOutcome> {
    config.validate()?;

    let employees = run.employees.iter().map(|e| &e.employee);
    let blocked = unresolved_pension_maturity(employees, run.period.end_date());
    if !blocked.is_empty() {
        warn!(
            month = run.period.month(),
            year = run.period.year(),
            blocked = blocked.len(),
            "Payroll run blocked on EPS maturity"
        );
        return Err(EngineError::PensionMaturityUnresolved {
            employee_ids: blocked,
        });
    }

    let outcomes: Vec<Result<PayrollResult, BatchFailure>> = run
        .employees
        .par_iter()
        .map(|entry| calculate_isolated(entry, run, config))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => {
                warn!(
                    employee_id = %failure.employee_id,
                    error = %failure.message,
                    "Employee calculation failed"
                );
                failures.push(failure);
            }
        }
    }

    let summary = RunSummary::from_results(&results);
    info!(
        month = run.period.month(),
        year = run.period.year(),
        headcount = summary.headcount,
        failures = failures.len(),
        total_net = %summary.total_net,
        "Payroll run completed"
    );

    Ok(BatchOutcome {
        period: run.period,
        results,
        failures,
        summary,
    })
}

fn calculate_isolated(
    entry: &EmployeeEntry,
    run: &PayrollRun,
    config: &StatutoryConfig,
) -> Result<PayrollResult, BatchFailure> {
    catch_unwind(AssertUnwindSafe(|| {
        calculate(
            &entry.employee,
            config,
            &run.period,
            &entry.records,
            &run.options,
            &run.fines,
        )
    }))
    .map_err(|payload| BatchFailure {
        employee_id: entry.employee.id.clone(),
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "calculation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayComponents;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_entry(id: &str, basic: &str) -> EmployeeEntry {
        let mut employee = Employee::new(
            id,
            PayComponents {
                basic: dec(basic),
                ..PayComponents::default()
            },
        );
        employee.date_of_birth = NaiveDate::from_ymd_opt(1990, 5, 1);
        EmployeeEntry {
            employee,
            records: EmployeeRecords::default(),
        }
    }

    fn create_test_run(entries: Vec<EmployeeEntry>) -> PayrollRun {
        PayrollRun {
            period: PayPeriod::new(8, 2025).unwrap(),
            employees: entries,
            fines: Vec::new(),
            options: CalculationOptions::default(),
        }
    }

    #[test]
    fn test_run_calculates_every_employee_in_order() {
        let run = create_test_run(vec![
            create_test_entry("E1", "20000"),
            create_test_entry("E2", "12000"),
            create_test_entry("E3", "40000"),
        ]);
        let outcome = run_payroll(&run, &StatutoryConfig::default()).unwrap();

        let ids: Vec<&str> = outcome.results.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.summary.headcount, 3);
        assert_eq!(outcome.summary.total_gross, dec("72000"));
    }

    #[test]
    fn test_summary_totals_are_consistent() {
        let run = create_test_run(vec![
            create_test_entry("E1", "20000"),
            create_test_entry("E2", "15000"),
        ]);
        let outcome = run_payroll(&run, &StatutoryConfig::default()).unwrap();
        let s = &outcome.summary;

        assert_eq!(s.total_net, s.total_gross - s.total_deductions);
        assert!(s.employer_cost > s.total_gross);
    }

    #[test]
    fn test_invalid_config_rejected_before_any_calculation() {
        let mut config = StatutoryConfig::default();
        config.pf.ceiling = dec("-1");
        let run = create_test_run(vec![create_test_entry("E1", "20000")]);

        match run_payroll(&run, &config) {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "pf.ceiling"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_employee_reaching_58_blocks_run() {
        let mut senior = create_test_entry("E9", "30000");
        senior.employee.date_of_birth = NaiveDate::from_ymd_opt(1967, 8, 31);
        let run = create_test_run(vec![create_test_entry("E1", "20000"), senior]);

        match run_payroll(&run, &StatutoryConfig::default()) {
            Err(EngineError::PensionMaturityUnresolved { employee_ids }) => {
                assert_eq!(employee_ids, vec!["E9".to_string()]);
            }
            other => panic!("Expected PensionMaturityUnresolved, got {:?}", other),
        }
    }

    #[test]
    fn test_maturity_resolved_by_election_or_exemption() {
        let as_of = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let mut elected = create_test_entry("E1", "30000").employee;
        elected.date_of_birth = NaiveDate::from_ymd_opt(1960, 1, 1);
        elected.deferred_pension = DeferredPension::WithoutEps;
        let mut exempt = create_test_entry("E2", "30000").employee;
        exempt.date_of_birth = NaiveDate::from_ymd_opt(1960, 1, 1);
        exempt.is_pf_exempt = true;
        let mut turns_58_next_month = create_test_entry("E3", "30000").employee;
        turns_58_next_month.date_of_birth = NaiveDate::from_ymd_opt(1967, 9, 1);
        let mut unknown_age = create_test_entry("E4", "30000").employee;
        unknown_age.date_of_birth = None;

        let blocked = unresolved_pension_maturity(
            [&elected, &exempt, &turns_58_next_month, &unknown_age],
            as_of,
        );
        assert!(blocked.is_empty());
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload = catch_unwind(|| -> u32 { panic!("boom") }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = catch_unwind(|| -> u32 { panic!("code {}", 7) }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "code 7");
    }

    #[test]
    fn test_failure_converts_to_calculation_error() {
        let failure = BatchFailure {
            employee_id: "E1".to_string(),
            message: "overflow".to_string(),
        };
        let error: EngineError = failure.into();
        assert_eq!(
            error.to_string(),
            "Calculation error for employee 'E1': overflow"
        );
    }

    #[test]
    fn test_empty_run() {
        let run = create_test_run(Vec::new());
        let outcome = run_payroll(&run, &StatutoryConfig::default()).unwrap();
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.summary, RunSummary::default());
    }
}
