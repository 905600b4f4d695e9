use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format::{format_inr, round_half_up};
use crate::model::Payroll;

/// One payroll row rendered for the payroll tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRow {
    #[schema(example = "EMP-001")]
    pub id: String,
    pub name: String,
    #[schema(example = "₹45,000")]
    pub monthly_salary: String,
    pub annual_package: String,
    pub mobile_recharge: String,
    #[schema(example = "₹300 · MH12AB1234")]
    pub fuel_expense: String,
    pub monthly_incentive: String,
    pub gift_voucher: String,
}

impl From<&Payroll> for PayrollRow {
    fn from(p: &Payroll) -> Self {
        Self {
            id: p.employee_id.clone(),
            name: p.employee_name.clone(),
            monthly_salary: format_inr(p.monthly_salary),
            annual_package: format_inr(p.annual_package),
            mobile_recharge: format_inr(p.mobile_recharge),
            fuel_expense: format!(
                "{} · {}",
                format_inr(p.fuel_expense.amount()),
                p.fuel_expense.vehicle()
            ),
            monthly_incentive: format_inr(p.monthly_incentive),
            gift_voucher: format_inr(p.gift_voucher),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub total_monthly: f64,
    pub total_annual: f64,
    pub average_monthly: f64,
    pub highest_monthly: f64,
    pub employee_count: usize,
}

pub fn summarize(payrolls: &[Payroll]) -> PayrollSummary {
    let total_monthly: f64 = payrolls.iter().map(|p| p.monthly_salary).sum();
    let total_annual: f64 = payrolls.iter().map(|p| p.annual_package).sum();
    let highest_monthly = payrolls
        .iter()
        .map(|p| p.monthly_salary)
        .fold(0.0_f64, f64::max);

    PayrollSummary {
        total_monthly,
        total_annual,
        average_monthly: round_half_up(total_monthly / payrolls.len().max(1) as f64),
        highest_monthly,
        employee_count: payrolls.len(),
    }
}

/// Allowance totals per category across all payroll records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTotals {
    pub total_monthly_salary: f64,
    pub total_recharge: f64,
    pub total_incentives: f64,
    pub total_vouchers: f64,
    pub total_fuel: f64,
    pub employee_count: usize,
}

pub fn salary_totals(payrolls: &[Payroll]) -> SalaryTotals {
    let sum = |f: fn(&Payroll) -> f64| payrolls.iter().map(f).sum::<f64>();

    SalaryTotals {
        total_monthly_salary: sum(|p| p.monthly_salary),
        total_recharge: sum(|p| p.mobile_recharge),
        total_incentives: sum(|p| p.monthly_incentive),
        total_vouchers: sum(|p| p.gift_voucher),
        total_fuel: sum(|p| p.fuel_expense.amount()),
        employee_count: payrolls.len(),
    }
}
