//! Monthly breakdown orchestration.
//!
//! This module assembles the full pay breakdown by running every
//! calculation rule in agreement order and aggregating the audit steps,
//! warnings, and subtotals into a [`CalculationResult`].

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AgreementConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationInput, CalculationResult, PayBreakdown,
};

use super::annual_complement::calculate_annual_complement;
use super::category_base::resolve_category_base;
use super::funeral::calculate_funeral_contribution;
use super::overtime::calculate_overtime;
use super::presenteeism::calculate_presenteeism;
use super::seniority::apply_seniority;
use super::solidarity::calculate_solidarity;
use super::statutory::calculate_statutory_deductions;

/// Calculates the full monthly pay breakdown for one input.
///
/// The calculation is a pure arithmetic pipeline with no shared state
/// across invocations; each call allocates and returns one fresh result.
/// The only recoverable anomaly inside the pipeline is an out-of-range
/// seniority index, which falls back to the no-seniority multiplier and
/// emits a warning. Error returns occur before the pipeline starts: an
/// unknown category code, or a period earlier than every configured
/// constants snapshot.
///
/// The gross remunerative subtotal includes overtime pay, so overtime
/// passes through the statutory deductions with the rest of the
/// remunerative items. The final net step adds the non-remunerative
/// allowances, subtracts the funeral-fund contribution, and floors the
/// result at zero; it does not add overtime a second time.
///
/// # Arguments
///
/// * `input` - The month to liquidate
/// * `config` - The agreement configuration
///
/// # Example
///
/// ```no_run
/// use convenio_engine::calculation::calculate_breakdown;
/// use convenio_engine::config::ConfigLoader;
/// use convenio_engine::models::CalculationInput;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cct154")?;
/// let input = CalculationInput {
///     category_code: "obrero_comun".to_string(),
///     seniority_index: 2,
///     overtime_hours_100: 0,
///     overtime_hours_50: 4,
///     period: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
/// };
///
/// let result = calculate_breakdown(&input, loader.config())?;
/// println!("Net pay: ${}", result.breakdown.net_pay);
/// # Ok::<(), convenio_engine::error::EngineError>(())
/// ```
pub fn calculate_breakdown(
    input: &CalculationInput,
    config: &AgreementConfig,
) -> EngineResult<CalculationResult> {
    let start = Instant::now();
    let snapshot = config.constants_for(input.period)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Step 1: category base
    let category =
        resolve_category_base(config, &input.category_code, snapshot.base_salary, 1)?;
    let category_base = category.category_base;
    steps.push(category.audit_step);

    // Step 2: seniority multiplier
    let seniority = apply_seniority(config.seniority(), category_base, input.seniority_index, 2);
    if seniority.fell_back {
        warnings.push(AuditWarning {
            code: "SENIORITY_INDEX_OUT_OF_RANGE".to_string(),
            message: format!(
                "Seniority index {} is beyond the {}-step scale; no seniority applied",
                input.seniority_index,
                config.seniority().len()
            ),
            severity: "low".to_string(),
        });
    }
    steps.push(seniority.audit_step);

    // Steps 3-4: remunerative bonuses
    let presenteeism =
        calculate_presenteeism(snapshot.base_salary, snapshot.percentages.presenteeism, 3);
    steps.push(presenteeism.audit_step);

    let annual_complement =
        calculate_annual_complement(category_base, snapshot.percentages.annual_complement, 4);
    steps.push(annual_complement.audit_step);

    // Step 5: overtime at both premiums
    let overtime = calculate_overtime(
        category_base,
        &snapshot.workday,
        snapshot.percentages.total_statutory(),
        input.overtime_hours_50,
        input.overtime_hours_100,
        5,
    );
    steps.push(overtime.audit_step);

    // Step 6: gross remunerative subtotal (overtime included)
    let gross_remunerative = seniority.base_with_seniority
        + presenteeism.amount
        + annual_complement.amount
        + snapshot.incentives.first
        + snapshot.incentives.second
        + overtime.pay_50
        + overtime.pay_100;

    steps.push(AuditStep {
        step_number: 6,
        rule_id: "gross_remunerative".to_string(),
        rule_name: "Gross Remunerative Subtotal".to_string(),
        input: serde_json::json!({
            "base_with_seniority": seniority.base_with_seniority.normalize().to_string(),
            "presenteeism_bonus": presenteeism.amount.normalize().to_string(),
            "annual_complement_bonus": annual_complement.amount.normalize().to_string(),
            "incentive_first": snapshot.incentives.first.normalize().to_string(),
            "incentive_second": snapshot.incentives.second.normalize().to_string(),
            "overtime_pay_50": overtime.pay_50.normalize().to_string(),
            "overtime_pay_100": overtime.pay_100.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_remunerative": gross_remunerative.normalize().to_string()
        }),
        reasoning: format!(
            "Sum of remunerative items, overtime included: ${}",
            gross_remunerative.normalize()
        ),
    });

    // Steps 7-9: deductions
    let statutory =
        calculate_statutory_deductions(gross_remunerative, &snapshot.percentages, 7);
    steps.push(statutory.audit_step);

    let solidarity = calculate_solidarity(category_base, snapshot.percentages.solidarity, 8);
    steps.push(solidarity.audit_step);

    let funeral = calculate_funeral_contribution(
        snapshot.base_salary,
        snapshot.workday.days_per_month,
        snapshot.funeral_fund_fraction,
        9,
    );
    steps.push(funeral.audit_step);

    // Step 10: net subtotals and the final net pay
    let total_remunerative_deductions = statutory.total + solidarity.amount;
    let net_remunerative = gross_remunerative - total_remunerative_deductions;

    let net_before_floor = net_remunerative
        + snapshot.allowances.non_remunerative
        + snapshot.allowances.meal
        - funeral.amount;
    let net_pay = net_before_floor.max(Decimal::ZERO);

    if net_pay != net_before_floor {
        warn!(
            category = %input.category_code,
            net_before_floor = %net_before_floor,
            "Net pay was negative; floored to zero"
        );
        warnings.push(AuditWarning {
            code: "NET_PAY_FLOORED".to_string(),
            message: format!(
                "Net pay {} was negative and floored to zero",
                net_before_floor.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number: 10,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "net_remunerative": net_remunerative.normalize().to_string(),
            "non_remunerative_allowance":
                snapshot.allowances.non_remunerative.normalize().to_string(),
            "meal_allowance": snapshot.allowances.meal.normalize().to_string(),
            "funeral_contribution": funeral.amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string(),
            "floored": net_pay != net_before_floor
        }),
        reasoning: format!(
            "${} + ${} + ${} - ${} = ${}",
            net_remunerative.normalize(),
            snapshot.allowances.non_remunerative.normalize(),
            snapshot.allowances.meal.normalize(),
            funeral.amount.normalize(),
            net_pay.normalize()
        ),
    });

    let breakdown = PayBreakdown {
        category_base,
        base_with_seniority: seniority.base_with_seniority,
        seniority_bonus: seniority.seniority_bonus,
        presenteeism_bonus: presenteeism.amount,
        annual_complement_bonus: annual_complement.amount,
        incentive_first: snapshot.incentives.first,
        incentive_second: snapshot.incentives.second,
        overtime_pay_50: overtime.pay_50,
        overtime_pay_100: overtime.pay_100,
        gross_remunerative,
        pension_deduction: statutory.pension,
        law_19032_deduction: statutory.law_19032,
        health_insurance_deduction: statutory.health_insurance,
        solidarity_deduction: solidarity.amount,
        total_remunerative_deductions,
        net_remunerative,
        non_remunerative_allowance: snapshot.allowances.non_remunerative,
        meal_allowance: snapshot.allowances.meal,
        funeral_contribution: funeral.amount,
        overtime_pay_50_net: overtime.pay_50_net,
        overtime_pay_100_net: overtime.pay_100_net,
        net_pay,
    };

    let duration = start.elapsed();
    debug!(
        category = %input.category_code,
        seniority_index = input.seniority_index,
        net_pay = %breakdown.net_pay,
        duration_us = duration.as_micros() as u64,
        "Calculated pay breakdown"
    );

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.clone(),
        breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: duration.as_micros() as u64,
        },
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

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_snapshot() -> RateSnapshot {
        RateSnapshot {
            effective_date: ymd(2025, 10, 1),
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
        }
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

        AgreementConfig::new(metadata, categories, seniority, vec![test_snapshot()]).unwrap()
    }

    fn create_input(
        category: &str,
        seniority_index: u32,
        hours_100: u32,
        hours_50: u32,
    ) -> CalculationInput {
        CalculationInput {
            category_code: category.to_string(),
            seniority_index,
            overtime_hours_100: hours_100,
            overtime_hours_50: hours_50,
            period: ymd(2025, 10, 1),
        }
    }

    /// BD-001: common labourer, first seniority step, no overtime
    #[test]
    fn test_common_labourer_first_seniority_step() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 1, 0, 0);

        let result = calculate_breakdown(&input, &config).unwrap();
        let b = &result.breakdown;

        assert_eq!(b.category_base, dec("400000"));
        assert_eq!(b.base_with_seniority, dec("410000"));
        assert_eq!(b.seniority_bonus, dec("10000"));
        assert_eq!(b.presenteeism_bonus, dec("20000"));
        assert_eq!(b.annual_complement_bonus, dec("21280"));
        assert_eq!(b.incentive_first, dec("30000"));
        assert_eq!(b.incentive_second, dec("35000"));
        assert_eq!(b.gross_remunerative, dec("516280"));
        assert_eq!(b.pension_deduction, dec("56790.80"));
        assert_eq!(b.law_19032_deduction, dec("15488.40"));
        assert_eq!(b.health_insurance_deduction, dec("15488.40"));
        assert_eq!(b.solidarity_deduction, dec("6000"));
        assert_eq!(b.total_remunerative_deductions, dec("93767.60"));
        assert_eq!(b.net_remunerative, dec("422512.40"));
        assert_eq!(b.funeral_contribution, dec("6400"));
        assert_eq!(b.net_pay, dec("566112.40"));
    }

    /// BD-002: overtime enters the gross subtotal and the deductions
    #[test]
    fn test_overtime_folded_into_taxable_gross() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 0, 2, 3);

        let result = calculate_breakdown(&input, &config).unwrap();
        let b = &result.breakdown;

        // Hourly rate 2000: 3h at x1.5 = 9000, 2h at x2.0 = 8000
        assert_eq!(b.overtime_pay_50, dec("9000"));
        assert_eq!(b.overtime_pay_100, dec("8000"));
        assert_eq!(b.gross_remunerative, dec("523280"));
        assert_eq!(b.total_remunerative_deductions, dec("94957.60"));
        assert_eq!(b.net_remunerative, dec("428322.40"));
        assert_eq!(b.net_pay, dec("571922.40"));

        // Net display figures at the combined 17% statutory rate
        assert_eq!(b.overtime_pay_50_net, dec("7470"));
        assert_eq!(b.overtime_pay_100_net, dec("6640"));
    }

    /// BD-003: category factor scales the base and the hourly rate
    #[test]
    fn test_mechanic_category_factor() {
        let config = create_test_config();
        let input = create_input("mecanico", 0, 0, 1);

        let result = calculate_breakdown(&input, &config).unwrap();
        let b = &result.breakdown;

        assert_eq!(b.category_base, dec("500000"));
        // Hourly rate 2500: 1h at x1.5
        assert_eq!(b.overtime_pay_50, dec("3750"));
        // Presenteeism stays on the flat base salary
        assert_eq!(b.presenteeism_bonus, dec("20000"));
        // Funeral contribution stays on the flat base salary
        assert_eq!(b.funeral_contribution, dec("6400"));
    }

    /// BD-004: index zero means no seniority bonus
    #[test]
    fn test_seniority_index_zero_gives_no_bonus() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 0, 0, 0);

        let result = calculate_breakdown(&input, &config).unwrap();
        let b = &result.breakdown;

        assert_eq!(b.seniority_bonus, dec("0"));
        assert_eq!(b.base_with_seniority, b.category_base);
        assert!(result.audit_trace.warnings.is_empty());
    }

    /// BD-005: out-of-range index equals the index-zero result, plus a warning
    #[test]
    fn test_seniority_index_out_of_range_falls_back() {
        let config = create_test_config();

        let at_zero = calculate_breakdown(&create_input("obrero_comun", 0, 0, 0), &config)
            .unwrap();
        let past_end = calculate_breakdown(&create_input("obrero_comun", 99, 0, 0), &config)
            .unwrap();

        assert_eq!(at_zero.breakdown, past_end.breakdown);
        assert_eq!(past_end.audit_trace.warnings.len(), 1);
        assert_eq!(
            past_end.audit_trace.warnings[0].code,
            "SENIORITY_INDEX_OUT_OF_RANGE"
        );
    }

    /// BD-006: last valid index applies the maximum multiplier
    #[test]
    fn test_last_seniority_index_applies_maximum() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 2, 0, 0);

        let result = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(result.breakdown.base_with_seniority, dec("420000"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_reconciliation_identity() {
        let config = create_test_config();
        let input = create_input("mecanico", 2, 4, 6);

        let result = calculate_breakdown(&input, &config).unwrap();
        let b = &result.breakdown;

        assert_eq!(
            b.gross_remunerative,
            b.net_remunerative + b.total_remunerative_deductions
        );
        assert_eq!(
            b.total_remunerative_deductions,
            b.pension_deduction
                + b.law_19032_deduction
                + b.health_insurance_deduction
                + b.solidarity_deduction
        );
    }

    #[test]
    fn test_identical_inputs_give_identical_breakdowns() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 1, 2, 3);

        let first = calculate_breakdown(&input, &config).unwrap();
        let second = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(first.breakdown, second.breakdown);
        assert_ne!(first.calculation_id, second.calculation_id);
    }

    #[test]
    fn test_unknown_category_returns_error() {
        let config = create_test_config();
        let input = create_input("capataz", 0, 0, 0);

        let result = calculate_breakdown(&input, &config);

        assert!(matches!(
            result,
            Err(EngineError::CategoryNotFound { code }) if code == "capataz"
        ));
    }

    #[test]
    fn test_period_before_all_snapshots_returns_error() {
        let config = create_test_config();
        let mut input = create_input("obrero_comun", 0, 0, 0);
        input.period = ymd(2020, 1, 1);

        let result = calculate_breakdown(&input, &config);

        assert!(matches!(result, Err(EngineError::RatesNotFound { .. })));
    }

    #[test]
    fn test_negative_net_pay_floored_with_warning() {
        // Pathological but valid snapshot: each statutory rate is within
        // [0, 1] yet their sum exceeds 1, driving the net negative.
        let metadata = AgreementMetadata {
            code: "CCT 154/91".to_string(),
            name: "Obreros de Viña".to_string(),
            version: "test".to_string(),
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
        let seniority = SeniorityScale {
            years_per_step: 3,
            factors: vec![dec("1.00")],
        };
        let mut snapshot = test_snapshot();
        snapshot.base_salary = dec("1000");
        snapshot.allowances.non_remunerative = dec("0");
        snapshot.allowances.meal = dec("0");
        snapshot.incentives.first = dec("0");
        snapshot.incentives.second = dec("0");
        snapshot.percentages.pension = dec("0.9");
        snapshot.percentages.law_19032 = dec("0.9");
        snapshot.percentages.health_insurance = dec("0.9");
        let config =
            AgreementConfig::new(metadata, categories, seniority, vec![snapshot]).unwrap();

        let input = create_input("obrero_comun", 0, 0, 0);
        let result = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(result.breakdown.net_pay, Decimal::ZERO);
        assert!(result.breakdown.net_remunerative < Decimal::ZERO);
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "NET_PAY_FLOORED")
        );
    }

    #[test]
    fn test_audit_trace_has_ten_ordered_steps() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 1, 2, 3);

        let result = calculate_breakdown(&input, &config).unwrap();
        let steps = &result.audit_trace.steps;

        assert_eq!(steps.len(), 10);
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());

        assert_eq!(steps[0].rule_id, "category_base");
        assert_eq!(steps[1].rule_id, "seniority");
        assert_eq!(steps[2].rule_id, "presenteeism");
        assert_eq!(steps[3].rule_id, "annual_complement");
        assert_eq!(steps[4].rule_id, "overtime");
        assert_eq!(steps[5].rule_id, "gross_remunerative");
        assert_eq!(steps[6].rule_id, "statutory_deductions");
        assert_eq!(steps[7].rule_id, "solidarity");
        assert_eq!(steps[8].rule_id, "funeral_fund");
        assert_eq!(steps[9].rule_id, "net_pay");
    }

    #[test]
    fn test_result_echoes_input_and_version() {
        let config = create_test_config();
        let input = create_input("obrero_comun", 1, 0, 0);

        let result = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(result.input, input);
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }
}
