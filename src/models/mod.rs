//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod input;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, PayBreakdown,
};
pub use input::CalculationInput;
