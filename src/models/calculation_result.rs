//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayBreakdown`] record of monetary line items,
//! the [`CalculationResult`] wrapper, and the audit trace structures that
//! capture every decision taken during a calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CalculationInput;

/// The itemized monthly pay breakdown.
///
/// Every field is a monetary amount in pesos, computed with decimal
/// arithmetic and no intermediate rounding; the presentation layer rounds
/// for display. The record has no identity beyond its computed values and
/// is recreated wholesale on every calculation.
///
/// # Example
///
/// ```
/// use convenio_engine::models::PayBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = PayBreakdown::default();
/// assert_eq!(breakdown.net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Base salary adjusted by the category factor.
    pub category_base: Decimal,
    /// Category base adjusted by the seniority multiplier.
    pub base_with_seniority: Decimal,
    /// The seniority bonus (base with seniority minus category base).
    pub seniority_bonus: Decimal,
    /// Presenteeism bonus, computed on the flat base salary.
    pub presenteeism_bonus: Decimal,
    /// Annual complement (Art. 4) bonus, computed on the category base.
    pub annual_complement_bonus: Decimal,
    /// The first fixed remunerative incentive.
    pub incentive_first: Decimal,
    /// The second fixed remunerative incentive.
    pub incentive_second: Decimal,
    /// Gross overtime pay at the 50% premium.
    pub overtime_pay_50: Decimal,
    /// Gross overtime pay at the 100% premium.
    pub overtime_pay_100: Decimal,
    /// The gross remunerative subtotal (overtime included).
    pub gross_remunerative: Decimal,
    /// Pension deduction on the gross remunerative subtotal.
    pub pension_deduction: Decimal,
    /// Law 19032 health-institute levy on the gross remunerative subtotal.
    pub law_19032_deduction: Decimal,
    /// Health-insurance contribution on the gross remunerative subtotal.
    pub health_insurance_deduction: Decimal,
    /// Solidarity contribution on the category base.
    pub solidarity_deduction: Decimal,
    /// Sum of the statutory deductions plus the solidarity contribution.
    pub total_remunerative_deductions: Decimal,
    /// Net remunerative subtotal after all remunerative deductions.
    pub net_remunerative: Decimal,
    /// The fixed non-remunerative monthly allowance.
    pub non_remunerative_allowance: Decimal,
    /// The fixed meal/refreshment allowance.
    pub meal_allowance: Decimal,
    /// Funeral-fund contribution (a fraction of one day's flat wage).
    pub funeral_contribution: Decimal,
    /// Net overtime pay at the 50% premium, for display only.
    pub overtime_pay_50_net: Decimal,
    /// Net overtime pay at the 100% premium, for display only.
    pub overtime_pay_100_net: Decimal,
    /// The final net ("take-home") pay, floored at zero.
    pub net_pay: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation but may
/// require attention, such as a floored negative net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation process for
/// transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a pay calculation.
///
/// Wraps the breakdown with the echoed input, a calculation id, a
/// timestamp, the engine version, and the full audit trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The input this result was computed from.
    pub input: CalculationInput,
    /// The itemized pay breakdown.
    pub breakdown: PayBreakdown,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
