use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::format::{format_inr, round_half_up};
use crate::model::{Expense, Month};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub id: u64,
    pub month: String,
    pub year: i32,
    #[schema(example = "₹60,000")]
    pub office_rent: String,
    pub utilities: String,
    pub other: String,
    pub notes: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            month: e.month.clone(),
            year: e.year,
            office_rent: format_inr(e.office_rent),
            utilities: format_inr(e.utilities),
            other: format_inr(e.other),
            notes: e.notes.clone(),
        }
    }
}

/// Latest period first: year descending, then calendar month descending.
/// Unrecognised month names trail their year.
pub fn sort_latest_first(expenses: &mut [Expense]) {
    let rank = |e: &Expense| Month::parse(&e.month).map_or(0, Month::number);
    expenses.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| rank(b).cmp(&rank(a)))
            .then_with(|| a.month.cmp(&b.month))
    });
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_office_rent: f64,
    pub total_utilities: f64,
    pub total_other: f64,
    pub total_expenses: f64,
    pub average_monthly: f64,
    pub month_count: usize,
}

pub fn summarize(expenses: &[Expense]) -> ExpenseSummary {
    let total_office_rent: f64 = expenses.iter().map(|e| e.office_rent).sum();
    let total_utilities: f64 = expenses.iter().map(|e| e.utilities).sum();
    let total_other: f64 = expenses.iter().map(|e| e.other).sum();
    let total_expenses = total_office_rent + total_utilities + total_other;

    ExpenseSummary {
        total_office_rent,
        total_utilities,
        total_other,
        total_expenses,
        average_monthly: round_half_up(total_expenses / expenses.len().max(1) as f64),
        month_count: expenses.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpenseDraft;
    use chrono::Utc;

    fn expense(id: u64, month: &str, year: i32, rent: f64) -> Expense {
        Expense::from_draft(
            id,
            ExpenseDraft {
                month: month.into(),
                year,
                office_rent: rent,
                utilities: 1500.0,
                other: Some(250.5),
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn no_records_means_zero_average() {
        let summary = summarize(&[]);
        assert_eq!(summary.average_monthly, 0.0);
        assert_eq!(summary.month_count, 0);
        assert_eq!(summary.total_expenses, 0.0);
    }

    #[test]
    fn total_is_sum_of_categories() {
        let records = vec![expense(1, "January", 2024, 60000.0), expense(2, "February", 2024, 62000.0)];
        let summary = summarize(&records);

        assert_eq!(
            summary.total_expenses,
            summary.total_office_rent + summary.total_utilities + summary.total_other
        );
        assert_eq!(summary.total_other, 501.0);
        assert_eq!(summary.average_monthly, 62751.0);
        assert_eq!(summary.month_count, 2);
    }

    #[test]
    fn latest_period_sorts_first() {
        let mut records = vec![
            expense(1, "March", 2023, 1.0),
            expense(2, "January", 2024, 1.0),
            expense(3, "February", 2024, 1.0),
            expense(4, "December", 2023, 1.0),
        ];
        sort_latest_first(&mut records);
        let ids: Vec<u64> = records.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn row_formats_currency_and_defaults_notes() {
        let row = ExpenseRow::from(&expense(1, "January", 2024, 60000.0));
        assert_eq!(row.office_rent, "₹60,000");
        assert_eq!(row.utilities, "₹1,500");
        assert_eq!(row.other, "₹250.5");
        assert_eq!(row.notes, "");
    }
}
