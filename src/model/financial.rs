use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct IncomeBreakdown {
    pub salary: f64,
    pub business: f64,
    pub investment: f64,
}

impl IncomeBreakdown {
    pub fn add(&mut self, other: &IncomeBreakdown) {
        self.salary += other.salary;
        self.business += other.business;
        self.investment += other.investment;
    }

    pub fn is_non_negative(&self) -> bool {
        [self.salary, self.business, self.investment].iter().all(|v| *v >= 0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ExpenseBreakdown {
    pub housing: f64,
    pub transportation: f64,
    pub entertainment: f64,
    pub food: f64,
    pub other: f64,
}

impl ExpenseBreakdown {
    pub fn add(&mut self, other: &ExpenseBreakdown) {
        self.housing += other.housing;
        self.transportation += other.transportation;
        self.entertainment += other.entertainment;
        self.food += other.food;
        self.other += other.other;
    }

    pub fn is_non_negative(&self) -> bool {
        self.categories().iter().all(|(_, amount)| *amount >= 0.0)
    }

    /// Categories in display order.
    pub fn categories(&self) -> [(&'static str, f64); 5] {
        [
            ("Housing", self.housing),
            ("Transportation", self.transportation),
            ("Entertainment", self.entertainment),
            ("Food", self.food),
            ("Other", self.other),
        ]
    }
}

/// Income and spend for one month of one year.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub id: u64,
    #[schema(example = "January")]
    pub month: String,
    pub year: i32,
    pub income: f64,
    pub expense: f64,
    pub income_breakdown: IncomeBreakdown,
    pub expense_breakdown: ExpenseBreakdown,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialDraft {
    pub month: String,
    pub year: i32,
    pub income: f64,
    pub expense: f64,
    pub income_breakdown: Option<IncomeBreakdown>,
    pub expense_breakdown: Option<ExpenseBreakdown>,
}

impl FinancialData {
    pub fn from_draft(id: u64, draft: FinancialDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            month: draft.month,
            year: draft.year,
            income: draft.income,
            expense: draft.expense,
            income_breakdown: draft.income_breakdown.unwrap_or_default(),
            expense_breakdown: draft.expense_breakdown.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: FinancialDraft, now: DateTime<Utc>) {
        self.month = draft.month;
        self.year = draft.year;
        self.income = draft.income;
        self.expense = draft.expense;
        if let Some(b) = draft.income_breakdown {
            self.income_breakdown = b;
        }
        if let Some(b) = draft.expense_breakdown {
            self.expense_breakdown = b;
        }
        self.updated_at = now;
    }
}
