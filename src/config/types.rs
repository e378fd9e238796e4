//! Configuration types for the collective agreement.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the agreement metadata,
//! the job category catalog, the seniority scale, and the effective-dated
//! constants snapshots.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Metadata about the collective agreement.
///
/// Contains identifying information about the agreement, including its
/// registry code, name, version, and source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementMetadata {
    /// The agreement registry code (e.g., "CCT 154/91").
    pub code: String,
    /// The human-readable name of the agreement.
    pub name: String,
    /// The version or effective period of the agreement.
    pub version: String,
    /// URL to the official agreement documentation.
    pub source_url: String,
}

/// A job category within the agreement.
///
/// Categories define the worker classifications and their multiplicative
/// pay factors over the base salary.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// The human-readable name of the category (e.g., "Obrero Común").
    pub name: String,
    /// A description of the category.
    pub description: String,
    /// The multiplicative factor applied to the base salary.
    pub factor: Decimal,
}

/// Categories configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Map of category code to category details.
    pub categories: HashMap<String, Category>,
}

/// The seniority scale: an ordered sequence of pay multipliers.
///
/// Index 0 is always 1.00 (no seniority); each subsequent index covers one
/// tranche of `years_per_step` years of service with a slightly larger
/// multiplier. Indexing is by position; callers map elapsed years to an
/// index with [`SeniorityScale::index_for_years`].
#[derive(Debug, Clone, Deserialize)]
pub struct SeniorityScale {
    /// Years of service covered by each step of the scale.
    pub years_per_step: u32,
    /// The multipliers, ordered by step.
    pub factors: Vec<Decimal>,
}

impl SeniorityScale {
    /// Returns the multiplier for a step index, if the index is in range.
    pub fn factor_at(&self, index: u32) -> Option<Decimal> {
        self.factors.get(index as usize).copied()
    }

    /// Returns the multiplier for a step index, falling back to 1.00 for
    /// any index beyond the end of the scale.
    ///
    /// # Examples
    ///
    /// ```
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
    /// assert_eq!(scale.factor(1), Decimal::from_str("1.025").unwrap());
    /// assert_eq!(scale.factor(99), Decimal::ONE);
    /// ```
    pub fn factor(&self, index: u32) -> Decimal {
        self.factor_at(index).unwrap_or(Decimal::ONE)
    }

    /// Maps elapsed years of service to a scale index (floor division).
    pub fn index_for_years(&self, years: u32) -> u32 {
        if self.years_per_step == 0 {
            return 0;
        }
        years / self.years_per_step
    }

    /// Returns the number of steps in the scale.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true if the scale has no steps.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Seniority configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SeniorityConfig {
    /// The seniority scale.
    pub seniority: SeniorityScale,
}

/// Fixed non-remunerative allowance amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowanceAmounts {
    /// The general non-remunerative monthly sum.
    pub non_remunerative: Decimal,
    /// The monthly meal/refreshment allowance.
    pub meal: Decimal,
}

/// Fixed incentive amounts paid on top of the base salary.
///
/// Both incentives are remunerative: they enter the gross subtotal and are
/// subject to the statutory deductions.
#[derive(Debug, Clone, Deserialize)]
pub struct IncentiveAmounts {
    /// The first fixed incentive amount.
    pub first: Decimal,
    /// The second fixed incentive amount.
    pub second: Decimal,
}

/// Named percentage rates of the agreement period.
///
/// All rates are fractions within [0, 1]; this invariant is enforced when
/// the configuration is assembled.
#[derive(Debug, Clone, Deserialize)]
pub struct PercentageRates {
    /// Presenteeism bonus rate, applied to the flat base salary.
    pub presenteeism: Decimal,
    /// Annual complement (Art. 4) rate, applied to the category base.
    pub annual_complement: Decimal,
    /// Solidarity contribution rate, applied to the category base.
    pub solidarity: Decimal,
    /// Pension deduction rate, applied to the gross remunerative subtotal.
    pub pension: Decimal,
    /// Law 19032 health-institute levy rate.
    pub law_19032: Decimal,
    /// Health-insurance contribution rate.
    pub health_insurance: Decimal,
}

impl PercentageRates {
    /// Returns the combined statutory deduction rate
    /// (pension + law 19032 + health insurance).
    pub fn total_statutory(&self) -> Decimal {
        self.pension + self.law_19032 + self.health_insurance
    }
}

/// Workday parameters used to derive the ordinary hourly rate.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkdayParams {
    /// Pay days per month (the jornal divisor).
    pub days_per_month: Decimal,
    /// Hours per ordinary shift.
    pub hours_per_shift: Decimal,
    /// Premium multiplier for 50% overtime hours.
    pub overtime_premium_50: Decimal,
    /// Premium multiplier for 100% overtime hours.
    pub overtime_premium_100: Decimal,
}

/// One immutable constants snapshot, effective from a specific date.
///
/// A snapshot is swapped wholesale when the agreement is updated; it is
/// never partially edited.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSnapshot {
    /// The date from which this snapshot is effective.
    pub effective_date: NaiveDate,
    /// The base salary for the lowest category without seniority.
    pub base_salary: Decimal,
    /// Fixed non-remunerative allowance amounts.
    pub allowances: AllowanceAmounts,
    /// Fixed remunerative incentive amounts.
    pub incentives: IncentiveAmounts,
    /// Named percentage rates.
    pub percentages: PercentageRates,
    /// Workday parameters.
    pub workday: WorkdayParams,
    /// Funeral-fund contribution as a fraction of one day's flat wage.
    pub funeral_fund_fraction: Decimal,
}

impl RateSnapshot {
    fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("percentages.presenteeism", self.percentages.presenteeism),
            (
                "percentages.annual_complement",
                self.percentages.annual_complement,
            ),
            ("percentages.solidarity", self.percentages.solidarity),
            ("percentages.pension", self.percentages.pension),
            ("percentages.law_19032", self.percentages.law_19032),
            (
                "percentages.health_insurance",
                self.percentages.health_insurance,
            ),
            ("funeral_fund_fraction", self.funeral_fund_fraction),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::InvalidRate {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let amounts = [
            ("base_salary", self.base_salary),
            ("allowances.non_remunerative", self.allowances.non_remunerative),
            ("allowances.meal", self.allowances.meal),
            ("incentives.first", self.incentives.first),
            ("incentives.second", self.incentives.second),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let divisors = [
            ("workday.days_per_month", self.workday.days_per_month),
            ("workday.hours_per_shift", self.workday.hours_per_shift),
        ];
        for (field, value) in divisors {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let premiums = [
            ("workday.overtime_premium_50", self.workday.overtime_premium_50),
            (
                "workday.overtime_premium_100",
                self.workday.overtime_premium_100,
            ),
        ];
        for (field, value) in premiums {
            if value < Decimal::ONE {
                return Err(EngineError::InvalidAmount {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// The complete agreement configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in an agreement configuration directory.
#[derive(Debug, Clone)]
pub struct AgreementConfig {
    /// Agreement metadata.
    metadata: AgreementMetadata,
    /// Job categories available under this agreement.
    categories: HashMap<String, Category>,
    /// The seniority scale.
    seniority: SeniorityScale,
    /// Constants snapshots by effective date (sorted oldest first).
    snapshots: Vec<RateSnapshot>,
}

impl AgreementConfig {
    /// Creates a new AgreementConfig from its component parts.
    ///
    /// Snapshots are sorted by effective date. Every snapshot is validated:
    /// percentage rates and the funeral fraction must lie within [0, 1],
    /// fixed amounts must be non-negative, workday divisors must be
    /// positive, and overtime premiums must be at least 1. Category factors
    /// must be non-negative.
    pub fn new(
        metadata: AgreementMetadata,
        categories: HashMap<String, Category>,
        seniority: SeniorityScale,
        snapshots: Vec<RateSnapshot>,
    ) -> EngineResult<Self> {
        for (code, category) in &categories {
            if category.factor < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field: format!("categories.{}.factor", code),
                    value: category.factor.to_string(),
                });
            }
        }
        for factor in &seniority.factors {
            if *factor < Decimal::ZERO {
                return Err(EngineError::InvalidAmount {
                    field: "seniority.factors".to_string(),
                    value: factor.to_string(),
                });
            }
        }
        for snapshot in &snapshots {
            snapshot.validate()?;
        }

        let mut sorted_snapshots = snapshots;
        sorted_snapshots.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Ok(Self {
            metadata,
            categories,
            seniority,
            snapshots: sorted_snapshots,
        })
    }

    /// Returns the agreement metadata.
    pub fn agreement(&self) -> &AgreementMetadata {
        &self.metadata
    }

    /// Returns all job categories.
    pub fn categories(&self) -> &HashMap<String, Category> {
        &self.categories
    }

    /// Gets a category by its code.
    pub fn category(&self, code: &str) -> EngineResult<&Category> {
        self.categories
            .get(code)
            .ok_or_else(|| EngineError::CategoryNotFound {
                code: code.to_string(),
            })
    }

    /// Returns the seniority scale.
    pub fn seniority(&self) -> &SeniorityScale {
        &self.seniority
    }

    /// Returns all constants snapshots.
    pub fn snapshots(&self) -> &[RateSnapshot] {
        &self.snapshots
    }

    /// Returns the constants snapshot effective for the given period.
    ///
    /// The most recent snapshot effective on or before the period date is
    /// selected. A period earlier than every snapshot is an error.
    pub fn constants_for(&self, period: NaiveDate) -> EngineResult<&RateSnapshot> {
        self.snapshots
            .iter()
            .rfind(|s| s.effective_date <= period)
            .ok_or(EngineError::RatesNotFound { period })
    }
}
