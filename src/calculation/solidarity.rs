//! Solidarity contribution calculation.
//!
//! The solidarity contribution is computed on the category base, not on
//! the gross remunerative subtotal.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of calculating the solidarity contribution, including the audit step.
#[derive(Debug, Clone)]
pub struct SolidarityResult {
    /// The contribution amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the solidarity contribution.
///
/// # Arguments
///
/// * `category_base` - The base salary scaled by the category factor
/// * `rate` - The solidarity rate (e.g., 0.015)
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_solidarity(
    category_base: Decimal,
    rate: Decimal,
    step_number: u32,
) -> SolidarityResult {
    let amount = category_base * rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "solidarity".to_string(),
        rule_name: "Solidarity Contribution".to_string(),
        input: serde_json::json!({
            "category_base": category_base.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} (computed on the category base)",
            category_base.normalize(),
            rate.normalize(),
            amount.normalize()
        ),
    };

    SolidarityResult { amount, audit_step }
}
