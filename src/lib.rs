//! Statutory payroll engine for Indian labour-law regimes
//!
//! This crate calculates monthly pay for an employee under the Employees'
//! Provident Fund and Pension schemes, ESI, state Professional Tax and Labour
//! Welfare Fund, and the Code on Wages 2019 wage definition. Every figure in a
//! [`models::PayrollResult`] is backed by an audit step naming the rule that
//! produced it.
//!
//! - [`calculation`] holds the per-employee pipeline and its rule modules.
//! - [`run`] evaluates a whole period in parallel and finalizes results.
//! - [`config`] loads the statutory rates, ceilings and state presets.
//! - [`api`] exposes both over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod run;
