//! Funeral-fund contribution calculation.
//!
//! The contribution is a configured fraction of one day's flat wage,
//! independent of the remunerative subtotal. The fraction comes from the
//! constants snapshot; historical agreement periods carried different
//! values.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of calculating the funeral-fund contribution, including the audit step.
#[derive(Debug, Clone)]
pub struct FuneralResult {
    /// The contribution amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the funeral-fund contribution.
///
/// One day's wage is the flat base salary over the pay days per month;
/// the contribution is the configured fraction of that day's wage.
///
/// # Arguments
///
/// * `base_salary` - The flat base salary of the effective snapshot
/// * `days_per_month` - Pay days per month (validated non-zero at load)
/// * `fraction` - The funeral-fund fraction (e.g., 0.40)
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_funeral_contribution(
    base_salary: Decimal,
    days_per_month: Decimal,
    fraction: Decimal,
    step_number: u32,
) -> FuneralResult {
    let daily_wage = base_salary / days_per_month;
    let amount = daily_wage * fraction;

    let audit_step = AuditStep {
        step_number,
        rule_id: "funeral_fund".to_string(),
        rule_name: "Funeral Fund Contribution".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "days_per_month": days_per_month.normalize().to_string(),
            "fraction": fraction.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_wage": daily_wage.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "One day's flat wage ${} x {} = ${}",
            daily_wage.normalize(),
            fraction.normalize(),
            amount.normalize()
        ),
    };

    FuneralResult { amount, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_forty_percent_of_a_day() {
        let result = calculate_funeral_contribution(dec("400000"), dec("25"), dec("0.40"), 1);

        assert_eq!(result.amount, dec("6400"));
        assert_eq!(result.audit_step.rule_id, "funeral_fund");
    }

    #[test]
    fn test_official_base_salary() {
        let result = calculate_funeral_contribution(dec("401009"), dec("25"), dec("0.40"), 1);

        assert_eq!(result.amount, dec("6416.144"));
    }

    #[test]
    fn test_independent_of_category_factor() {
        // The contribution uses the flat base salary; two categories with
        // the same snapshot pay the same amount.
        let a = calculate_funeral_contribution(dec("400000"), dec("25"), dec("0.40"), 1);
        let b = calculate_funeral_contribution(dec("400000"), dec("25"), dec("0.40"), 2);

        assert_eq!(a.amount, b.amount);
    }

    #[test]
    fn test_alternative_configured_fraction() {
        let result =
            calculate_funeral_contribution(dec("400000"), dec("25"), dec("0.0215"), 1);

        assert_eq!(result.amount, dec("344"));
    }
}
