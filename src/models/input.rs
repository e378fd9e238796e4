//! Calculation input model.
//!
//! This module defines the [`CalculationInput`] struct describing one
//! month of work to liquidate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The inputs for one monthly pay calculation.
///
/// Hour counts and the seniority index are unsigned, so the engine's
/// "non-negative integers only" contract holds by construction. A seniority
/// index beyond the end of the configured scale is not an error; it falls
/// back to the no-seniority multiplier.
///
/// # Example
///
/// ```
/// use convenio_engine::models::CalculationInput;
/// use chrono::NaiveDate;
///
/// let input = CalculationInput {
///     category_code: "obrero_comun".to_string(),
///     seniority_index: 2,
///     overtime_hours_100: 4,
///     overtime_hours_50: 6,
///     period: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
/// };
/// assert_eq!(input.total_overtime_hours(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The job category code (e.g., "obrero_comun").
    pub category_code: String,
    /// The seniority scale index (elapsed years / years-per-step, floored).
    pub seniority_index: u32,
    /// Overtime hours worked at the 100% premium.
    pub overtime_hours_100: u32,
    /// Overtime hours worked at the 50% premium.
    pub overtime_hours_50: u32,
    /// The pay period; selects the effective constants snapshot.
    pub period: NaiveDate,
}

impl CalculationInput {
    /// Returns the total overtime hours across both premium rates.
    pub fn total_overtime_hours(&self) -> u32 {
        self.overtime_hours_100 + self.overtime_hours_50
    }
}
