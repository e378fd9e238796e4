//! Payroll engine for the Argentine vineyard workers' collective agreement.
//!
//! This crate computes a worker's monthly net pay under CCT 154/91
//! (Obreros de Viña): category multiplier, seniority scale, overtime at the
//! 50% and 100% premiums, fixed allowances, and the statutory deductions,
//! returning an itemized breakdown with a full audit trace.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::calculate_breakdown;
