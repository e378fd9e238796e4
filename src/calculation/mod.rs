//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for determining a
//! monthly pay breakdown: category base resolution, the seniority
//! multiplier with its fallback policy, the presenteeism and annual
//! complement bonuses, overtime pay at the 50% and 100% premiums, the
//! statutory deductions, the solidarity contribution, the funeral-fund
//! contribution, and the orchestrator that assembles the full breakdown.

mod annual_complement;
mod breakdown;
mod category_base;
mod funeral;
mod overtime;
mod presenteeism;
mod seniority;
mod solidarity;
mod statutory;

pub use annual_complement::{AnnualComplementResult, calculate_annual_complement};
pub use breakdown::calculate_breakdown;
pub use category_base::{CategoryBaseResult, resolve_category_base};
pub use funeral::{FuneralResult, calculate_funeral_contribution};
pub use overtime::{OvertimeResult, calculate_overtime};
pub use presenteeism::{PresenteeismResult, calculate_presenteeism};
pub use seniority::{SeniorityResult, apply_seniority};
pub use solidarity::{SolidarityResult, calculate_solidarity};
pub use statutory::{StatutoryResult, calculate_statutory_deductions};
