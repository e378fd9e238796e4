//! Annual complement (Art. 4) bonus calculation.
//!
//! The annual complement is paid on the category base, before the
//! seniority multiplier is applied.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of calculating the annual complement, including the audit step.
#[derive(Debug, Clone)]
pub struct AnnualComplementResult {
    /// The bonus amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the annual complement bonus.
///
/// # Arguments
///
/// * `category_base` - The base salary scaled by the category factor
/// * `rate` - The annual complement rate (e.g., 0.0532)
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_annual_complement(
    category_base: Decimal,
    rate: Decimal,
    step_number: u32,
) -> AnnualComplementResult {
    let amount = category_base * rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "annual_complement".to_string(),
        rule_name: "Annual Complement (Art. 4)".to_string(),
        input: serde_json::json!({
            "category_base": category_base.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} (computed on the category base, pre-seniority)",
            category_base.normalize(),
            rate.normalize(),
            amount.normalize()
        ),
    };

    AnnualComplementResult { amount, audit_step }
}
