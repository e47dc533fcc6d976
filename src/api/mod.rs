//! HTTP API for the payroll engine.
//!
//! `POST /calculate` computes one employee's draft result for a period.
//! `POST /payroll-runs` computes a whole period and returns per-employee
//! results, failures and a run summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, FineRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
