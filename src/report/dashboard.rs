//! Dashboard view-models.
//!
//! Several figures here are presentation heuristics rather than measurements
//! (the customer split, days to hire and the recruiting funnel). Those points
//! carry `estimated: true` so the frontend can label them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format::{clamped_percent, format_inr_thousands, round_half_up};
use crate::model::month::{abbreviate, months_before};
use crate::model::{Employee, FinancialData, Month, Payroll};

const PURPLE: &str = "#A020F0";
const VIOLET: &str = "#D400FF";
const PINK: &str = "#FF00CC";

const EMPLOYEE_CAPACITY: f64 = 50.0;
const MONTHLY_HIRE_TARGET: f64 = 10.0;
const YEARLY_HIRE_TARGET: f64 = 20.0;
const DAYS_TO_HIRE_CEILING: f64 = 30.0;
const PLACEHOLDER_DAYS_TO_HIRE: u32 = 5;
const CUSTOMERS_PER_RUPEE: f64 = 1.0 / 100.0;
const NEW_CUSTOMER_SHARE: f64 = 0.6;
const RETURNING_CUSTOMER_SHARE: f64 = 0.4;

/// (stage, base percentage) before scaling by headcount.
const FUNNEL_STAGES: [(&str, f64); 6] = [
    ("Application", 100.0),
    ("Phone Screen", 85.0),
    ("MGR Interview", 75.0),
    ("Onsite Interview", 65.0),
    ("Offer", 55.0),
    ("Hire", 45.0),
];
const FUNNEL_HEADCOUNT_BASE: f64 = 20.0;

fn text_tone(color: &str) -> String {
    format!("text-[{color}]")
}

fn bg_tone(color: &str) -> String {
    format!("bg-[{color}]")
}

fn gradient(from: &str, via: &str, to: &str) -> String {
    format!("from-[{from}]/20 via-[{via}]/20 to-[{to}]/20")
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopLinePoint {
    #[schema(example = "Jan")]
    pub month: String,
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStat {
    pub label: String,
    pub value: String,
    pub trend: String,
    pub trend_tone: String,
    pub progress: u32,
    pub progress_tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub month: String,
    pub new_customers: u64,
    pub returning_customers: u64,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub top_line_data: Vec<TopLinePoint>,
    pub summary_stats: Vec<SummaryStat>,
    pub lifetime_revenue_data: Vec<RevenuePoint>,
}

/// Year-over-year income change, `+12.5%` style. No prior income reads as `+0%`.
pub fn income_trend(current: f64, previous: f64) -> String {
    if previous <= 0.0 {
        return "+0%".to_string();
    }
    let change = (current - previous) / previous * 100.0;
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.1}%")
}

fn summary_stat(
    label: &str,
    value: String,
    trend: String,
    color: &str,
    progress: u32,
) -> SummaryStat {
    SummaryStat {
        label: label.to_string(),
        value,
        trend,
        trend_tone: text_tone(color),
        progress,
        progress_tone: bg_tone(color),
    }
}

/// Builds the overview from one year's financial records (already sorted by
/// month), the prior year's records, every payroll record and the active headcount.
pub fn overview(
    current: &[FinancialData],
    previous: &[FinancialData],
    payrolls: &[Payroll],
    active_employees: u64,
) -> Overview {
    let top_line_data = current
        .iter()
        .map(|r| TopLinePoint {
            month: abbreviate(&r.month),
            total_sales: round_half_up(r.income),
        })
        .collect();

    let total_income: f64 = current.iter().map(|r| r.income).sum();
    let total_expenses: f64 = current.iter().map(|r| r.expense).sum();
    let previous_income: f64 = previous.iter().map(|r| r.income).sum();
    let total_payroll: f64 = payrolls.iter().map(|p| p.monthly_salary).sum();
    let net_income = total_income - total_expenses;
    let headcount = active_employees as f64;

    let summary_stats = vec![
        summary_stat(
            "Revenue",
            format_inr_thousands(total_income),
            income_trend(total_income, previous_income),
            PURPLE,
            clamped_percent(total_income, total_income + total_expenses),
        ),
        summary_stat(
            "Employees",
            active_employees.to_string(),
            "Active staff".to_string(),
            VIOLET,
            clamped_percent(headcount, EMPLOYEE_CAPACITY),
        ),
        summary_stat(
            "Monthly Payroll",
            format_inr_thousands(total_payroll),
            "Total monthly".to_string(),
            PINK,
            clamped_percent(total_payroll, total_income),
        ),
        summary_stat(
            "Net Income",
            format_inr_thousands(net_income),
            "After expenses".to_string(),
            PURPLE,
            clamped_percent(net_income, total_income),
        ),
    ];

    Overview {
        top_line_data,
        summary_stats,
        lifetime_revenue_data: lifetime_revenue(current),
    }
}

/// Twelve calendar months; months without a record are zero.
/// Records whose month name is unrecognised are left out of the series.
fn lifetime_revenue(records: &[FinancialData]) -> Vec<RevenuePoint> {
    let mut income_by_month = [0.0_f64; 12];
    for r in records {
        if let Some(month) = Month::parse(&r.month) {
            income_by_month[(month.number() - 1) as usize] += r.income;
        }
    }

    Month::all()
        .zip(income_by_month)
        .map(|(month, income)| {
            let base = round_half_up(income * CUSTOMERS_PER_RUPEE).max(0.0);
            RevenuePoint {
                month: abbreviate(&month.to_string()),
                new_customers: round_half_up(base * NEW_CUSTOMER_SHARE) as u64,
                returning_customers: round_half_up(base * RETURNING_CUSTOMER_SHARE) as u64,
                estimated: true,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Hiring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HiringStat {
    pub label: String,
    pub value: String,
    pub subtitle: String,
    pub change: String,
    pub change_tone: String,
    pub gradient: String,
    pub progress: u32,
    pub progress_color: String,
    pub progress_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyMetric {
    #[schema(example = "January 2024")]
    pub month: String,
    pub hired: String,
    pub days_to_hire: String,
    pub status: String,
    pub status_tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FunnelStage {
    pub name: String,
    pub value: u32,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hiring {
    pub overview_stats: Vec<HiringStat>,
    pub monthly_metrics: Vec<MonthlyMetric>,
    pub funnel_data: Vec<FunnelStage>,
}

fn hired_in(employees: &[Employee], month_start: NaiveDate) -> usize {
    employees
        .iter()
        .filter(|e| {
            e.hire_date.year() == month_start.year() && e.hire_date.month() == month_start.month()
        })
        .count()
}

/// Hiring view-model as of `today`.
pub fn hiring(employees: &[Employee], today: NaiveDate) -> Hiring {
    let this_month = hired_in(employees, months_before(today, 0));
    let last_month = hired_in(employees, months_before(today, 1));
    let active = employees.iter().filter(|e| e.is_active()).count();
    let year_to_date = employees
        .iter()
        .filter(|e| e.hire_date.year() == today.year())
        .count();

    let days_to_hire = if employees.is_empty() {
        0
    } else {
        PLACEHOLDER_DAYS_TO_HIRE
    };

    let diff = this_month as i64 - last_month as i64;
    let sign = if diff >= 0 { "+" } else { "" };
    let target_share = round_half_up(this_month as f64 / MONTHLY_HIRE_TARGET * 100.0);
    let capacity_share = round_half_up(active as f64 / EMPLOYEE_CAPACITY * 100.0);
    let efficiency = clamped_percent(
        DAYS_TO_HIRE_CEILING - days_to_hire as f64,
        DAYS_TO_HIRE_CEILING,
    );

    let overview_stats = vec![
        HiringStat {
            label: "Hired".into(),
            value: this_month.to_string(),
            subtitle: "Offers accepted this month".into(),
            change: format!("{sign}{diff} vs last month"),
            change_tone: text_tone(PURPLE),
            gradient: gradient(PURPLE, VIOLET, PINK),
            progress: clamped_percent(this_month as f64, MONTHLY_HIRE_TARGET),
            progress_color: bg_tone(PURPLE),
            progress_label: format!("{target_share}% of monthly target"),
        },
        HiringStat {
            label: "Total Employees".into(),
            value: active.to_string(),
            subtitle: "Active staff members".into(),
            change: format!("{} total", employees.len()),
            change_tone: text_tone(VIOLET),
            gradient: gradient(VIOLET, PINK, PURPLE),
            progress: clamped_percent(active as f64, EMPLOYEE_CAPACITY),
            progress_color: bg_tone(VIOLET),
            progress_label: format!("{capacity_share}% capacity"),
        },
        HiringStat {
            label: "Days to Hire".into(),
            value: days_to_hire.to_string(),
            subtitle: "Average time from application".into(),
            change: "Current average".into(),
            change_tone: text_tone(PURPLE),
            gradient: gradient(PURPLE, VIOLET, PINK),
            progress: efficiency,
            progress_color: bg_tone(PURPLE),
            progress_label: format!("{efficiency}% efficiency"),
        },
        HiringStat {
            label: "New Hires (YTD)".into(),
            value: year_to_date.to_string(),
            subtitle: "Year to date".into(),
            change: "This year".into(),
            change_tone: text_tone(PINK),
            gradient: gradient(PINK, PURPLE, VIOLET),
            progress: clamped_percent(year_to_date as f64, YEARLY_HIRE_TARGET),
            progress_color: bg_tone(PINK),
            progress_label: "YTD progress".into(),
        },
    ];

    let monthly_metrics = (0..6)
        .rev()
        .map(|back| {
            let start = months_before(today, back);
            let hired = hired_in(employees, start);
            let filled = hired > 0;
            MonthlyMetric {
                month: format!("{} {}", Month::of(start), start.year()),
                hired: hired.to_string(),
                days_to_hire: if filled {
                    days_to_hire.to_string()
                } else {
                    "-".to_string()
                },
                status: if filled { "Filled" } else { "Planning" }.to_string(),
                status_tone: if filled {
                    format!("bg-[{PURPLE}]/20 text-[{PURPLE}]")
                } else {
                    format!("bg-[{VIOLET}]/20 text-[{VIOLET}]")
                },
            }
        })
        .collect();

    Hiring {
        overview_stats,
        monthly_metrics,
        funnel_data: funnel(active as f64),
    }
}

/// The first stage is pinned at 100; the rest scale with headcount.
fn funnel(active: f64) -> Vec<FunnelStage> {
    FUNNEL_STAGES
        .iter()
        .enumerate()
        .map(|(i, (name, base))| FunnelStage {
            name: name.to_string(),
            value: if i == 0 {
                *base as u32
            } else {
                round_half_up(base * active / FUNNEL_HEADCOUNT_BASE).clamp(0.0, 100.0) as u32
            },
            estimated: true,
        })
        .collect()
}
