//! Monthly payroll period model.
//!
//! This module contains the [`PayPeriod`] type that anchors every calculation to
//! a calendar month, and the [`HalfYearBlock`] used by half-yearly Professional
//! Tax cycles.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Wire form of a period, validated on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PeriodSpec {
    month: u32,
    year: i32,
}

/// A validated calendar month for which payroll is calculated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2, 2024).unwrap();
/// assert_eq!(period.days_in_month(), 29);
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert!(PayPeriod::new(13, 2024).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodSpec", into = "PeriodSpec")]
pub struct PayPeriod {
    month: u32,
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates the period for the given month (1-12) and year.
    ///
    /// Returns `InvalidPeriod` if the month is out of range or the year is not
    /// representable.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { month, year };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end_date = start_date
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            month,
            year,
            start_date,
            end_date,
        })
    }

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the period.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of calendar days in the period.
    pub fn days_in_month(&self) -> u32 {
        self.end_date.day()
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true in April and October, the months in which an ESI
    /// contribution period begins.
    pub fn is_esi_contribution_period_start(&self) -> bool {
        self.month == 4 || self.month == 10
    }

    /// Returns the half-year block (April-September or October-March) that
    /// contains this period.
    pub fn half_year_block(&self) -> HalfYearBlock {
        let (start_year, start_month) = match self.month {
            4..=9 => (self.year, 4),
            10..=12 => (self.year, 10),
            _ => (self.year - 1, 10),
        };
        let start = month_ordinal(start_year, start_month);
        HalfYearBlock {
            start,
            end: start + 5,
        }
    }
}

impl TryFrom<PeriodSpec> for PayPeriod {
    type Error = EngineError;

    fn try_from(spec: PeriodSpec) -> Result<Self, Self::Error> {
        Self::new(spec.month, spec.year)
    }
}

impl From<PayPeriod> for PeriodSpec {
    fn from(period: PayPeriod) -> Self {
        Self {
            month: period.month,
            year: period.year,
        }
    }
}

/// Counts months since year zero so month spans can be computed by subtraction.
pub fn month_ordinal(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

/// A six-month block expressed as inclusive month ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfYearBlock {
    /// Ordinal of the first month of the block.
    pub start: i64,
    /// Ordinal of the last month of the block.
    pub end: i64,
}

impl HalfYearBlock {
    /// Months from `max(date's month, block start)` to block end inclusive,
    /// clamped to `[1, 6]`.
    pub fn months_remaining_from(&self, date: Option<NaiveDate>) -> u32 {
        let from = date
            .map(|d| month_ordinal(d.year(), d.month()).max(self.start))
            .unwrap_or(self.start);
        let months = (self.end - from + 1).clamp(1, 6);
        // clamped to 1..=6 above
        months as u32
    }
}
