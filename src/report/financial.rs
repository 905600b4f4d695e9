use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format::percentage_shares;
use crate::model::month::{abbreviate, compare_month_names};
use crate::model::{ExpenseBreakdown, FinancialData, IncomeBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyFigures {
    #[schema(example = "Jan")]
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IncomeSlice {
    pub label: String,
    pub value: f64,
}

/// Expense category with its whole-number percentage of total spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseSlice {
    pub name: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalytics {
    pub year: i32,
    pub monthly_summary: Vec<MonthlyFigures>,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_income: f64,
    pub income_breakdown: Vec<IncomeSlice>,
    pub expense_breakdown: Vec<ExpenseSlice>,
}

const CATEGORY_COLORS: [&str; 5] = ["#A020F0", "#D400FF", "#FF00CC", "#A020F0", "#D400FF"];

/// Calendar order, then insertion order for repeated months.
pub fn sort_by_month(records: &mut [FinancialData]) {
    records.sort_by(|a, b| compare_month_names(&a.month, &b.month).then(a.id.cmp(&b.id)));
}

/// Reduces one year's records into the analytics view-model.
/// `records` must already be narrowed to `year`.
pub fn analytics(year: i32, mut records: Vec<FinancialData>) -> FinancialAnalytics {
    sort_by_month(&mut records);

    let monthly_summary = records
        .iter()
        .map(|r| MonthlyFigures {
            month: abbreviate(&r.month),
            income: r.income,
            expense: r.expense,
        })
        .collect();

    let total_income: f64 = records.iter().map(|r| r.income).sum();
    let total_expense: f64 = records.iter().map(|r| r.expense).sum();

    let mut income = IncomeBreakdown::default();
    let mut spend = ExpenseBreakdown::default();
    for r in &records {
        income.add(&r.income_breakdown);
        spend.add(&r.expense_breakdown);
    }

    let categories = spend.categories();
    let amounts: Vec<f64> = categories.iter().map(|(_, amount)| *amount).collect();
    let shares = percentage_shares(&amounts);

    let expense_breakdown = categories
        .iter()
        .zip(shares)
        .zip(CATEGORY_COLORS)
        .map(|(((name, _), value), color)| ExpenseSlice {
            name: name.to_string(),
            value,
            color: color.to_string(),
        })
        .collect();

    FinancialAnalytics {
        year,
        monthly_summary,
        total_income,
        total_expense,
        net_income: total_income - total_expense,
        income_breakdown: vec![
            IncomeSlice { label: "Salary".into(), value: income.salary },
            IncomeSlice { label: "Business".into(), value: income.business },
            IncomeSlice { label: "Investment".into(), value: income.investment },
        ],
        expense_breakdown,
    }
}
