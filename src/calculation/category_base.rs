//! Category base resolution.
//!
//! This module resolves a job category by code and computes the category
//! base: the agreement base salary scaled by the category factor.

use rust_decimal::Decimal;

use crate::config::AgreementConfig;
use crate::error::EngineResult;
use crate::models::AuditStep;

/// The result of resolving the category base, including the audit step.
#[derive(Debug, Clone)]
pub struct CategoryBaseResult {
    /// The category factor that was applied.
    pub factor: Decimal,
    /// The base salary scaled by the category factor.
    pub category_base: Decimal,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves a category by code and computes the category base.
///
/// # Arguments
///
/// * `config` - The agreement configuration containing the category catalog
/// * `category_code` - The category code (e.g., "obrero_comun")
/// * `base_salary` - The base salary of the effective constants snapshot
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `CategoryBaseResult` containing the factor, the category base,
/// and an audit step, or a `CategoryNotFound` error if the code is not in
/// the catalog.
pub fn resolve_category_base(
    config: &AgreementConfig,
    category_code: &str,
    base_salary: Decimal,
    step_number: u32,
) -> EngineResult<CategoryBaseResult> {
    let category = config.category(category_code)?;
    let category_base = base_salary * category.factor;

    let audit_step = AuditStep {
        step_number,
        rule_id: "category_base".to_string(),
        rule_name: "Category Base".to_string(),
        input: serde_json::json!({
            "category_code": category_code,
            "category_name": category.name,
            "base_salary": base_salary.normalize().to_string(),
            "factor": category.factor.normalize().to_string()
        }),
        output: serde_json::json!({
            "category_base": category_base.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} ({})",
            base_salary.normalize(),
            category.factor.normalize(),
            category_base.normalize(),
            category.name
        ),
    };

    Ok(CategoryBaseResult {
        factor: category.factor,
        category_base,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AgreementMetadata, AllowanceAmounts, Category, IncentiveAmounts, PercentageRates,
        RateSnapshot, SeniorityScale, WorkdayParams,
    };
    use crate::error::EngineError;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config() -> AgreementConfig {
        let metadata = AgreementMetadata {
            code: "CCT 154/91".to_string(),
            name: "Obreros de Viña".to_string(),
            version: "2025-10-01".to_string(),
            source_url: "https://example.com".to_string(),
        };

        let mut categories = HashMap::new();
        categories.insert(
            "obrero_comun".to_string(),
            Category {
                name: "Obrero Común".to_string(),
                description: "General vineyard labourer".to_string(),
                factor: dec("1.00"),
            },
        );
        categories.insert(
            "mecanico".to_string(),
            Category {
                name: "Mecánico".to_string(),
                description: "Mechanic".to_string(),
                factor: dec("1.25"),
            },
        );

        let seniority = SeniorityScale {
            years_per_step: 3,
            factors: vec![dec("1.00"), dec("1.025"), dec("1.05")],
        };

        let snapshots = vec![RateSnapshot {
            effective_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            base_salary: dec("400000"),
            allowances: AllowanceAmounts {
                non_remunerative: dec("100000"),
                meal: dec("50000"),
            },
            incentives: IncentiveAmounts {
                first: dec("30000"),
                second: dec("35000"),
            },
            percentages: PercentageRates {
                presenteeism: dec("0.05"),
                annual_complement: dec("0.0532"),
                solidarity: dec("0.015"),
                pension: dec("0.11"),
                law_19032: dec("0.03"),
                health_insurance: dec("0.03"),
            },
            workday: WorkdayParams {
                days_per_month: dec("25"),
                hours_per_shift: dec("8"),
                overtime_premium_50: dec("1.5"),
                overtime_premium_100: dec("2.0"),
            },
            funeral_fund_fraction: dec("0.40"),
        }];

        AgreementConfig::new(metadata, categories, seniority, snapshots).unwrap()
    }

    #[test]
    fn test_common_labourer_keeps_base_salary() {
        let config = create_test_config();

        let result =
            resolve_category_base(&config, "obrero_comun", dec("400000"), 1).unwrap();

        assert_eq!(result.factor, dec("1.00"));
        assert_eq!(result.category_base, dec("400000"));
        assert_eq!(result.audit_step.rule_id, "category_base");
        assert_eq!(result.audit_step.step_number, 1);
    }

    #[test]
    fn test_mechanic_scales_base_by_factor() {
        let config = create_test_config();

        let result = resolve_category_base(&config, "mecanico", dec("400000"), 1).unwrap();

        assert_eq!(result.factor, dec("1.25"));
        assert_eq!(result.category_base, dec("500000"));
    }

    #[test]
    fn test_unknown_category_returns_error() {
        let config = create_test_config();

        let result = resolve_category_base(&config, "unknown", dec("400000"), 1);

        assert!(result.is_err());
        match result.unwrap_err() {
            EngineError::CategoryNotFound { code } => {
                assert_eq!(code, "unknown");
            }
            other => panic!("Expected CategoryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_reasoning_shows_arithmetic() {
        let config = create_test_config();

        let result = resolve_category_base(&config, "mecanico", dec("400000"), 1).unwrap();

        assert!(result.audit_step.reasoning.contains("$400000"));
        assert!(result.audit_step.reasoning.contains("1.25"));
        assert!(result.audit_step.reasoning.contains("$500000"));
    }

    #[test]
    fn test_audit_step_input_carries_category_name() {
        let config = create_test_config();

        let result = resolve_category_base(&config, "mecanico", dec("400000"), 3).unwrap();

        assert_eq!(
            result.audit_step.input["category_name"].as_str().unwrap(),
            "Mecánico"
        );
        assert_eq!(result.audit_step.step_number, 3);
    }
}
