//! Statutory deduction calculation.
//!
//! The three statutory deductions (pension, the law-19032 health-institute
//! levy, and the health-insurance contribution) are each computed
//! per-component on the gross remunerative subtotal.

use rust_decimal::Decimal;

use crate::config::PercentageRates;
use crate::models::AuditStep;

/// The result of calculating the statutory deductions, including the audit step.
#[derive(Debug, Clone)]
pub struct StatutoryResult {
    /// The pension deduction.
    pub pension: Decimal,
    /// The law 19032 health-institute levy.
    pub law_19032: Decimal,
    /// The health-insurance contribution.
    pub health_insurance: Decimal,
    /// The sum of the three statutory deductions.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the statutory deductions on the gross remunerative subtotal.
///
/// # Arguments
///
/// * `gross_remunerative` - The gross remunerative subtotal (overtime included)
/// * `rates` - The percentage rates of the effective snapshot
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_statutory_deductions(
    gross_remunerative: Decimal,
    rates: &PercentageRates,
    step_number: u32,
) -> StatutoryResult {
    let pension = gross_remunerative * rates.pension;
    let law_19032 = gross_remunerative * rates.law_19032;
    let health_insurance = gross_remunerative * rates.health_insurance;
    let total = pension + law_19032 + health_insurance;

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "gross_remunerative": gross_remunerative.normalize().to_string(),
            "pension_rate": rates.pension.normalize().to_string(),
            "law_19032_rate": rates.law_19032.normalize().to_string(),
            "health_insurance_rate": rates.health_insurance.normalize().to_string()
        }),
        output: serde_json::json!({
            "pension": pension.normalize().to_string(),
            "law_19032": law_19032.normalize().to_string(),
            "health_insurance": health_insurance.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "On ${}: pension ${}, law 19032 ${}, health insurance ${} (total ${})",
            gross_remunerative.normalize(),
            pension.normalize(),
            law_19032.normalize(),
            health_insurance.normalize(),
            total.normalize()
        ),
    };

    StatutoryResult {
        pension,
        law_19032,
        health_insurance,
        total,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_rates() -> PercentageRates {
        PercentageRates {
            presenteeism: dec("0.05"),
            annual_complement: dec("0.0532"),
            solidarity: dec("0.015"),
            pension: dec("0.11"),
            law_19032: dec("0.03"),
            health_insurance: dec("0.03"),
        }
    }

    #[test]
    fn test_deductions_on_round_gross() {
        let rates = create_test_rates();
        let result = calculate_statutory_deductions(dec("516280"), &rates, 1);

        assert_eq!(result.pension, dec("56790.80"));
        assert_eq!(result.law_19032, dec("15488.40"));
        assert_eq!(result.health_insurance, dec("15488.40"));
        assert_eq!(result.total, dec("87767.60"));
    }

    #[test]
    fn test_total_matches_component_sum() {
        let rates = create_test_rates();
        let result = calculate_statutory_deductions(dec("523280"), &rates, 1);

        assert_eq!(
            result.total,
            result.pension + result.law_19032 + result.health_insurance
        );
    }

    #[test]
    fn test_zero_gross_gives_zero_deductions() {
        let rates = create_test_rates();
        let result = calculate_statutory_deductions(dec("0"), &rates, 1);

        assert_eq!(result.total, dec("0"));
    }

    #[test]
    fn test_audit_output_carries_components() {
        let rates = create_test_rates();
        let result = calculate_statutory_deductions(dec("516280"), &rates, 7);

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(
            result.audit_step.output["pension"].as_str().unwrap(),
            "56790.8"
        );
        assert_eq!(
            result.audit_step.output["total"].as_str().unwrap(),
            "87767.6"
        );
    }
}
