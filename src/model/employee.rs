use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl TryFrom<String> for EmployeeStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "employeeId": "EMP-001",
        "name": "Asha Patil",
        "email": "asha.patil@clinic.in",
        "department": "Nursing",
        "position": "Head Nurse",
        "phone": "+91 98200 00000",
        "status": "active",
        "hireDate": "2024-01-15",
        "createdAt": "2024-01-15T09:00:00Z",
        "updatedAt": "2024-01-15T09:00:00Z"
    })
)]
pub struct Employee {
    pub id: u64,

    /// Business key, unique across employees
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    pub name: String,

    #[schema(format = "email")]
    pub email: String,

    #[schema(nullable = true)]
    pub department: Option<String>,

    #[schema(nullable = true)]
    pub position: Option<String>,

    #[schema(nullable = true)]
    pub phone: Option<String>,

    #[sqlx(try_from = "String")]
    pub status: EmployeeStatus,

    #[schema(value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Employee fields after validation, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub hire_date: Option<NaiveDate>,
}

impl Employee {
    pub fn from_draft(id: u64, draft: EmployeeDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            employee_id: draft.employee_id,
            name: draft.name,
            email: draft.email,
            department: draft.department,
            position: draft.position,
            phone: draft.phone,
            status: draft.status.unwrap_or_default(),
            hire_date: draft.hire_date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces required fields; optional ones only when supplied.
    pub fn apply(&mut self, draft: EmployeeDraft, now: DateTime<Utc>) {
        self.employee_id = draft.employee_id;
        self.name = draft.name;
        self.email = draft.email;
        if draft.department.is_some() {
            self.department = draft.department;
        }
        if draft.position.is_some() {
            self.position = draft.position;
        }
        if draft.phone.is_some() {
            self.phone = draft.phone;
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(hire_date) = draft.hire_date {
            self.hire_date = hire_date;
        }
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
