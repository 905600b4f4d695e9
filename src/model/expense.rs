use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Operating overhead for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    #[schema(example = "January")]
    pub month: String,
    pub year: i32,
    pub office_rent: f64,
    pub utilities: f64,
    pub other: f64,
    pub notes: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub month: String,
    pub year: i32,
    pub office_rent: f64,
    pub utilities: f64,
    pub other: Option<f64>,
    pub notes: Option<String>,
}

impl Expense {
    pub fn from_draft(id: u64, draft: ExpenseDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            month: draft.month,
            year: draft.year,
            office_rent: draft.office_rent,
            utilities: draft.utilities,
            other: draft.other.unwrap_or(0.0),
            notes: draft.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: ExpenseDraft, now: DateTime<Utc>) {
        self.month = draft.month;
        self.year = draft.year;
        self.office_rent = draft.office_rent;
        self.utilities = draft.utilities;
        if let Some(other) = draft.other {
            self.other = other;
        }
        if let Some(notes) = draft.notes {
            self.notes = notes;
        }
        self.updated_at = now;
    }
}
