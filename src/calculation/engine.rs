//! Monthly payroll calculation.
//!
//! [`calculate`] composes the individual calculators into a complete
//! [`PayrollResult`] for one employee and one period. It is pure: it performs
//! no I/O, reads no clock and never fails.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::earnings::calculate_gross_earnings;
use super::esi::{OUT_OF_COVERAGE_REMARK, calculate_esi};
use super::gratuity::calculate_gratuity_accrual;
use super::income_tax::calculate_income_tax;
use super::jurisdiction::resolve_jurisdiction;
use super::labour_welfare_fund::calculate_lwf;
use super::leave_snapshot::build_leave_snapshot;
use super::professional_tax::calculate_professional_tax;
use super::proration::{calculate_payable_days, prorate_components};
use super::provident_fund::calculate_provident_fund;
use super::recovery::cap_recoveries;
use super::wage_basis::calculate_wage_basis;
use crate::config::StatutoryConfig;
use crate::models::{
    Attendance, AuditStep, AuditTrace, AuditWarning, CalculationOptions, Deductions, Earnings,
    Employee, EmployeeRecords, EmployerContributions, FineRecord, LeaveLedger, PayComponents,
    PayPeriod, PayrollFlags, PayrollResult, PayrollStatus, WageBases,
};

/// Collects audit steps and hands out step numbers.
#[derive(Debug, Default)]
struct StepLog {
    steps: Vec<AuditStep>,
}

impl StepLog {
    fn next(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    fn push(&mut self, step: AuditStep) {
        self.steps.push(step);
    }
}

/// Calculates one employee's pay for one period.
///
/// The configuration is assumed to have passed [`StatutoryConfig::validate`].
/// Missing attendance is treated as a full month present and missing ledgers
/// as empty. The result is always [`PayrollStatus::Draft`].
///
/// # Arguments
///
/// * `employee` - The employee master record
/// * `config` - Statutory rates, ceilings and presets
/// * `period` - The pay period
/// * `records` - Attendance and ledgers for the period
/// * `options` - Calculation options
/// * `fines` - Fine records; every one for this employee and period is summed
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{
///     CalculationOptions, Employee, EmployeeRecords, PayComponents, PayPeriod,
/// };
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "E001",
///     PayComponents { basic: Decimal::from(20000), ..PayComponents::default() },
/// );
/// let period = PayPeriod::new(1, 2025).unwrap();
///
/// let result = calculate(
///     &employee,
///     &StatutoryConfig::default(),
///     &period,
///     &EmployeeRecords::default(),
///     &CalculationOptions::default(),
///     &[],
/// );
///
/// assert_eq!(result.deductions.epf, Decimal::from(1800));
/// assert_eq!(result.net_pay, result.earnings.gross - result.deductions.total);
/// ```
pub fn calculate(
    employee: &Employee,
    config: &StatutoryConfig,
    period: &PayPeriod,
    records: &EmployeeRecords,
    options: &CalculationOptions,
    fines: &[FineRecord],
) -> PayrollResult {
    let days_in_month = period.days_in_month();
    let attendance = records
        .attendance
        .clone()
        .unwrap_or_else(|| Attendance::full_month(days_in_month));
    let empty_ledger = LeaveLedger::default();
    let leave_ledger = records.leave_ledger.as_ref().unwrap_or(&empty_ledger);
    let installment_due = records
        .advance_ledger
        .as_ref()
        .map(|ledger| ledger.installment_due())
        .unwrap_or(Decimal::ZERO);

    let mut log = StepLog::default();
    let mut remarks = Vec::new();
    let mut warnings = Vec::new();

    let days = calculate_payable_days(&attendance, period, employee.date_of_leaving, log.next());
    log.push(days.audit_step);
    remarks.extend(days.remark);
    let payable_days = days.payable_days;

    let snapshot = build_leave_snapshot(leave_ledger, &attendance, log.next());
    log.push(snapshot.audit_step);

    if payable_days.is_zero() {
        debug!(employee_id = %employee.id, "No payable days, emitting zero result");
        return PayrollResult {
            employee_id: employee.id.clone(),
            month: period.month(),
            year: period.year(),
            days_in_month,
            payable_days,
            earnings: Earnings::default(),
            deductions: Deductions::default(),
            employer_contributions: EmployerContributions::default(),
            wage_bases: WageBases::default(),
            gratuity_accrual: Decimal::ZERO,
            net_pay: Decimal::ZERO,
            flags: PayrollFlags {
                left_service: days.left_service,
                ..PayrollFlags::default()
            },
            remarks,
            leave_snapshot: snapshot.snapshot,
            status: PayrollStatus::Draft,
            audit_trace: AuditTrace {
                steps: log.steps,
                warnings,
            },
        };
    }

    let prorated = prorate_components(&employee.pay, payable_days, days_in_month, log.next());
    log.push(prorated.audit_step);
    let earned: PayComponents = prorated.components;

    let gross_result = calculate_gross_earnings(
        &employee.pay,
        &earned,
        &config.leave_wage_components,
        attendance.encashed_days,
        days_in_month,
        log.next(),
    );
    log.push(gross_result.audit_step);
    let earnings = gross_result.earnings;
    let gross = earnings.gross;

    let basis = calculate_wage_basis(&earned, gross, &config.higher_contribution, log.next());
    log.push(basis.audit_step);
    let basis = basis.basis;
    debug!(
        employee_id = %employee.id,
        base_pf_wage = %basis.base_pf_wage,
        is_code88 = basis.is_code88,
        "Resolved PF wage basis"
    );

    let pf = calculate_provident_fund(employee, &basis, config, log.next());
    log.push(pf.audit_step);
    let pf = pf.contributions;
    debug!(employee_id = %employee.id, policy = ?pf.policy, "Applied pension wage policy");

    let esi = calculate_esi(employee, &basis, gross, period, &config.esi, log.next());
    log.push(esi.audit_step);
    let esi = esi.contributions;
    if esi.out_of_coverage {
        remarks.push(OUT_OF_COVERAGE_REMARK.to_string());
    }

    let jurisdiction = resolve_jurisdiction(&employee.branch, &config.professional_tax, log.next());
    log.push(jurisdiction.audit_step);
    let pt = calculate_professional_tax(
        &jurisdiction.jurisdiction,
        gross,
        gross_result.standard_monthly_gross,
        period,
        employee.date_of_joining,
        log.next(),
    );
    log.push(pt.audit_step);

    let income_tax = calculate_income_tax(gross, log.next());
    log.push(income_tax.audit_step);

    let lwf = calculate_lwf(&config.lwf, period, gross, log.next());
    log.push(lwf.audit_step);

    let statutory_total =
        pf.epf_employee + pf.vpf + esi.employee + pt.amount + income_tax.amount + lwf.employee;
    let fine: Decimal = fines
        .iter()
        .filter(|f| f.applies_to(&employee.id, period))
        .map(|f| f.amount)
        .sum();

    let recovery = cap_recoveries(
        gross,
        statutory_total,
        fine,
        installment_due,
        options,
        log.next(),
    );
    log.push(recovery.audit_step);
    remarks.extend(recovery.remark);

    if recovery.net_pay < Decimal::ZERO {
        warn!(
            employee_id = %employee.id,
            net_pay = %recovery.net_pay,
            fine = %fine,
            "Net pay is negative"
        );
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Net pay {} is negative (fine {}, code gross wages {})",
                recovery.net_pay, fine, recovery.code_gross_wages
            ),
            severity: "high".to_string(),
        });
    }

    let gratuity = calculate_gratuity_accrual(&earned, log.next());
    log.push(gratuity.audit_step);

    PayrollResult {
        employee_id: employee.id.clone(),
        month: period.month(),
        year: period.year(),
        days_in_month,
        payable_days,
        deductions: Deductions {
            epf: pf.epf_employee,
            vpf: pf.vpf,
            esi: esi.employee,
            professional_tax: pt.amount,
            income_tax: income_tax.amount,
            lwf: lwf.employee,
            fine,
            advance_recovery: recovery.advance_recovery,
            statutory_total,
            total: recovery.total_deductions,
        },
        employer_contributions: EmployerContributions {
            epf: pf.epf_employer,
            eps: pf.eps_employer,
            esi: esi.employer,
            lwf: lwf.employer,
        },
        wage_bases: WageBases {
            pf_wage: pf.pf_wage,
            epf_wage: pf.epf_wage,
            eps_wage: pf.eps_wage,
            esi_wage: esi.esi_wage,
            standard_monthly_gross: gross_result.standard_monthly_gross,
            code_gross_wages: recovery.code_gross_wages,
        },
        earnings,
        gratuity_accrual: gratuity.accrual,
        net_pay: recovery.net_pay,
        flags: PayrollFlags {
            is_code88: pf.is_code88,
            is_esi_code_wages_used: esi.code_wages_used,
            left_service: days.left_service,
        },
        remarks,
        leave_snapshot: snapshot.snapshot,
        status: PayrollStatus::Draft,
        audit_trace: AuditTrace {
            steps: log.steps,
            warnings,
        },
    }
}
