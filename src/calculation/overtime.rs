//! Overtime pay calculation.
//!
//! This module derives the ordinary hourly rate from the category base and
//! computes gross overtime pay at the 50% and 100% premiums, plus the net
//! figures after the combined statutory deduction rate. The gross amounts
//! enter the gross remunerative subtotal; the net figures exist for display
//! only.

use rust_decimal::Decimal;

use crate::config::WorkdayParams;
use crate::models::AuditStep;

/// The result of calculating overtime pay, including the audit step.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// One day's wage for the category (category base / days per month).
    pub daily_wage: Decimal,
    /// The ordinary hourly rate (daily wage / hours per shift).
    pub hourly_rate: Decimal,
    /// Gross overtime pay at the 50% premium.
    pub pay_50: Decimal,
    /// Gross overtime pay at the 100% premium.
    pub pay_100: Decimal,
    /// Net overtime pay at the 50% premium (display only).
    pub pay_50_net: Decimal,
    /// Net overtime pay at the 100% premium (display only).
    pub pay_100_net: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay at both premium rates.
///
/// The ordinary hourly rate is derived from the category base through the
/// workday parameters: one day's wage is the category base over the pay
/// days per month, and the hourly rate is the day's wage over the hours
/// per shift. Both divisors are validated non-zero at configuration load.
///
/// # Arguments
///
/// * `category_base` - The base salary scaled by the category factor
/// * `workday` - Workday parameters of the effective snapshot
/// * `total_statutory_rate` - The combined statutory deduction rate,
///   applied as a single flat rate to produce the net display figures
/// * `hours_50` - Overtime hours at the 50% premium
/// * `hours_100` - Overtime hours at the 100% premium
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_overtime(
    category_base: Decimal,
    workday: &WorkdayParams,
    total_statutory_rate: Decimal,
    hours_50: u32,
    hours_100: u32,
    step_number: u32,
) -> OvertimeResult {
    let daily_wage = category_base / workday.days_per_month;
    let hourly_rate = daily_wage / workday.hours_per_shift;

    let pay_50 = hourly_rate * Decimal::from(hours_50) * workday.overtime_premium_50;
    let pay_100 = hourly_rate * Decimal::from(hours_100) * workday.overtime_premium_100;

    let net_factor = Decimal::ONE - total_statutory_rate;
    let pay_50_net = pay_50 * net_factor;
    let pay_100_net = pay_100 * net_factor;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "category_base": category_base.normalize().to_string(),
            "days_per_month": workday.days_per_month.normalize().to_string(),
            "hours_per_shift": workday.hours_per_shift.normalize().to_string(),
            "hours_50": hours_50,
            "hours_100": hours_100,
            "total_statutory_rate": total_statutory_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_wage": daily_wage.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "pay_50": pay_50.normalize().to_string(),
            "pay_100": pay_100.normalize().to_string(),
            "pay_50_net": pay_50_net.normalize().to_string(),
            "pay_100_net": pay_100_net.normalize().to_string()
        }),
        reasoning: format!(
            "Hourly rate ${}: {} hours at x{} = ${}, {} hours at x{} = ${}",
            hourly_rate.normalize(),
            hours_50,
            workday.overtime_premium_50.normalize(),
            pay_50.normalize(),
            hours_100,
            workday.overtime_premium_100.normalize(),
            pay_100.normalize()
        ),
    };

    OvertimeResult {
        daily_wage,
        hourly_rate,
        pay_50,
        pay_100,
        pay_50_net,
        pay_100_net,
        audit_step,
    }
}
