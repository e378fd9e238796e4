//! Seniority multiplier application.
//!
//! This module applies the seniority scale multiplier to the category base.
//! An index beyond the end of the scale is not an error: the multiplier
//! falls back to 1.00 (no seniority), and the fallback is recorded in the
//! audit step.

use rust_decimal::Decimal;

use crate::config::SeniorityScale;
use crate::models::AuditStep;

/// The result of applying the seniority multiplier, including the audit step.
#[derive(Debug, Clone)]
pub struct SeniorityResult {
    /// The multiplier that was applied.
    pub factor: Decimal,
    /// True if the index was out of range and the multiplier fell back to 1.00.
    pub fell_back: bool,
    /// The category base scaled by the multiplier.
    pub base_with_seniority: Decimal,
    /// The seniority bonus (base with seniority minus category base).
    pub seniority_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the seniority multiplier for a scale index to the category base.
///
/// # Arguments
///
/// * `scale` - The seniority scale from the agreement configuration
/// * `category_base` - The base salary scaled by the category factor
/// * `seniority_index` - The scale index (elapsed years / years-per-step)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `SeniorityResult`. The operation is total: an out-of-range
/// index yields the no-seniority multiplier instead of failing, with
/// `fell_back` set so callers can surface a warning.
///
/// # Examples
///
/// ```
/// use convenio_engine::calculation::apply_seniority;
/// use convenio_engine::config::SeniorityScale;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let scale = SeniorityScale {
///     years_per_step: 3,
///     factors: vec![
///         Decimal::from_str("1.00").unwrap(),
///         Decimal::from_str("1.025").unwrap(),
///     ],
/// };
///
/// let result = apply_seniority(&scale, Decimal::from_str("400000").unwrap(), 1, 1);
/// assert_eq!(result.base_with_seniority, Decimal::from_str("410000.000").unwrap());
/// assert_eq!(result.seniority_bonus, Decimal::from_str("10000.000").unwrap());
/// assert!(!result.fell_back);
/// ```
pub fn apply_seniority(
    scale: &SeniorityScale,
    category_base: Decimal,
    seniority_index: u32,
    step_number: u32,
) -> SeniorityResult {
    let (factor, fell_back) = match scale.factor_at(seniority_index) {
        Some(factor) => (factor, false),
        None => (Decimal::ONE, true),
    };

    let base_with_seniority = category_base * factor;
    let seniority_bonus = base_with_seniority - category_base;

    let audit_step = AuditStep {
        step_number,
        rule_id: "seniority".to_string(),
        rule_name: "Seniority Multiplier".to_string(),
        input: serde_json::json!({
            "category_base": category_base.normalize().to_string(),
            "seniority_index": seniority_index,
            "scale_steps": scale.len()
        }),
        output: serde_json::json!({
            "factor": factor.normalize().to_string(),
            "fell_back": fell_back,
            "base_with_seniority": base_with_seniority.normalize().to_string(),
            "seniority_bonus": seniority_bonus.normalize().to_string()
        }),
        reasoning: if fell_back {
            format!(
                "Index {} is outside the {}-step scale; using factor 1 (no seniority)",
                seniority_index,
                scale.len()
            )
        } else {
            format!(
                "${} x {} = ${} (bonus ${})",
                category_base.normalize(),
                factor.normalize(),
                base_with_seniority.normalize(),
                seniority_bonus.normalize()
            )
        },
    };

    SeniorityResult {
        factor,
        fell_back,
        base_with_seniority,
        seniority_bonus,
        audit_step,
    }
}
