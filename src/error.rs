//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Business-rule edge cases never surface here: the calculation itself is
//! infallible and returns zeroed or capped results instead. Errors are reserved
//! for configuration preconditions and batch orchestration.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/statutory.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/statutory.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A statutory configuration value is structurally invalid.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The requested payroll period does not exist.
    #[error("Invalid payroll period {month}/{year}")]
    InvalidPeriod {
        /// The requested month (1-12).
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// One or more employees crossed the EPS maturity age without a
    /// deferred-pension election, so the run cannot start.
    #[error("EPS maturity unresolved for employees: {}", employee_ids.join(", "))]
    PensionMaturityUnresolved {
        /// The employees blocking the run.
        employee_ids: Vec<String>,
    },

    /// A calculation for a single employee failed unexpectedly.
    #[error("Calculation error for employee '{employee_id}': {message}")]
    CalculationError {
        /// The employee whose calculation failed.
        employee_id: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/statutory.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/statutory.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "pf.ceiling".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration 'pf.ceiling': must not be negative"
        );
    }

    #[test]
    fn test_invalid_period_displays_month_and_year() {
        let error = EngineError::InvalidPeriod {
            month: 13,
            year: 2025,
        };
        assert_eq!(error.to_string(), "Invalid payroll period 13/2025");
    }

    #[test]
    fn test_pension_maturity_lists_employees() {
        let error = EngineError::PensionMaturityUnresolved {
            employee_ids: vec!["E001".to_string(), "E007".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "EPS maturity unresolved for employees: E001, E007"
        );
    }

    #[test]
    fn test_calculation_error_displays_employee_and_message() {
        let error = EngineError::CalculationError {
            employee_id: "E001".to_string(),
            message: "attempt to divide by zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation error for employee 'E001': attempt to divide by zero"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod { month: 0, year: 2025 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
