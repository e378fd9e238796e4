//! Presenteeism bonus calculation.
//!
//! The agreement pays the presenteeism bonus on the flat base salary, not
//! on the category- or seniority-adjusted figure.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of calculating the presenteeism bonus, including the audit step.
#[derive(Debug, Clone)]
pub struct PresenteeismResult {
    /// The bonus amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the presenteeism bonus.
///
/// # Arguments
///
/// * `base_salary` - The flat base salary of the effective snapshot
/// * `rate` - The presenteeism rate (e.g., 0.05)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use convenio_engine::calculation::calculate_presenteeism;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_presenteeism(
///     Decimal::from_str("400000").unwrap(),
///     Decimal::from_str("0.05").unwrap(),
///     1,
/// );
/// assert_eq!(result.amount, Decimal::from_str("20000.00").unwrap());
/// ```
pub fn calculate_presenteeism(
    base_salary: Decimal,
    rate: Decimal,
    step_number: u32,
) -> PresenteeismResult {
    let amount = base_salary * rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "presenteeism".to_string(),
        rule_name: "Presenteeism Bonus".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} (computed on the flat base salary)",
            base_salary.normalize(),
            rate.normalize(),
            amount.normalize()
        ),
    };

    PresenteeismResult { amount, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_five_percent_of_base() {
        let result = calculate_presenteeism(dec("400000"), dec("0.05"), 1);

        assert_eq!(result.amount, dec("20000"));
        assert_eq!(result.audit_step.rule_id, "presenteeism");
    }

    #[test]
    fn test_official_base_salary() {
        let result = calculate_presenteeism(dec("401009"), dec("0.05"), 1);

        assert_eq!(result.amount, dec("20050.45"));
    }

    #[test]
    fn test_zero_rate_gives_zero() {
        let result = calculate_presenteeism(dec("400000"), dec("0"), 1);

        assert_eq!(result.amount, dec("0"));
    }

    #[test]
    fn test_reasoning_notes_flat_base() {
        let result = calculate_presenteeism(dec("400000"), dec("0.05"), 4);

        assert!(result.audit_step.reasoning.contains("flat base salary"));
        assert_eq!(result.audit_step.step_number, 4);
    }
}
