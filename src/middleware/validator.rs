//! Request body validation run before create/update handlers.
//!
//! Each resource payload implements [`Validate`]; handlers take
//! [`Validated<Payload>`] and receive the checked draft, or the request is
//! answered with a 400 before the handler runs.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::NaiveDate;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::serde_helpers::{optional_flexible_date, optional_string_or_number};
use crate::model::{
    EmployeeDraft, EmployeeStatus, ExpenseBreakdown, ExpenseDraft, FinancialDraft, FuelExpense,
    IncomeBreakdown, PayrollDraft,
};

pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ApiError>;
}

/// Extractor: JSON body deserialized as `T`, then validated.
pub struct Validated<T: Validate>(pub T::Output);

impl<T: Validate> Validated<T> {
    pub fn into_inner(self) -> T::Output {
        self.0
    }
}

impl<T> FromRequest for Validated<T>
where
    T: Validate + DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<T>::from_request(req, payload);
        Box::pin(async move {
            let body = body.await?;
            Ok(Validated(body.into_inner().validate()?))
        })
    }
}

/// Present and not blank.
fn text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// `local@domain.tld`: no whitespace, one `@`, a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "Asha Patil", value_type = String)]
    pub name: Option<String>,
    #[schema(example = "asha.patil@clinic.in", format = "email", value_type = String)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub status: Option<EmployeeStatus>,
    #[serde(default, deserialize_with = "optional_flexible_date")]
    #[schema(example = "2024-01-15", format = "date", value_type = Option<String>)]
    pub hire_date: Option<NaiveDate>,
}

impl Validate for EmployeePayload {
    type Output = EmployeeDraft;

    fn validate(self) -> Result<EmployeeDraft, ApiError> {
        let (Some(employee_id), Some(name), Some(email)) =
            (text(self.employee_id), text(self.name), text(self.email))
        else {
            return Err(ApiError::validation(
                "Missing required fields: employeeId, name, and email are required",
            ));
        };

        if !is_valid_email(&email) {
            return Err(ApiError::validation("Invalid email format"));
        }

        Ok(EmployeeDraft {
            employee_id,
            name,
            email,
            department: optional_text(self.department),
            position: optional_text(self.position),
            phone: optional_text(self.phone),
            status: self.status,
            hire_date: self.hire_date,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPayload {
    #[serde(default, deserialize_with = "optional_string_or_number")]
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "Asha Patil", value_type = String)]
    pub employee_name: Option<String>,
    #[schema(example = 45000.0, value_type = f64)]
    pub monthly_salary: Option<f64>,
    #[schema(example = 540000.0, value_type = f64)]
    pub annual_package: Option<f64>,
    pub mobile_recharge: Option<f64>,
    /// Either a bare amount or `{ amount, vehicleNumber }`
    #[schema(value_type = Option<Object>, example = json!({"amount": 300, "vehicleNumber": "MH12AB1234"}))]
    pub fuel_expense: Option<FuelExpense>,
    pub monthly_incentive: Option<f64>,
    pub gift_voucher: Option<f64>,
    #[schema(example = "January")]
    pub month: Option<String>,
    #[schema(example = 2024)]
    pub year: Option<i32>,
}

impl Validate for PayrollPayload {
    type Output = PayrollDraft;

    fn validate(self) -> Result<PayrollDraft, ApiError> {
        let (Some(employee_id), Some(employee_name), Some(monthly_salary), Some(annual_package)) = (
            text(self.employee_id),
            text(self.employee_name),
            self.monthly_salary,
            self.annual_package,
        ) else {
            return Err(ApiError::validation(
                "Missing required fields: employeeId, employeeName, monthlySalary, and annualPackage are required",
            ));
        };

        if monthly_salary < 0.0 || annual_package < 0.0 {
            return Err(ApiError::validation("Salary values must be non-negative"));
        }

        let allowances = [
            self.mobile_recharge,
            self.monthly_incentive,
            self.gift_voucher,
            self.fuel_expense.as_ref().map(FuelExpense::amount),
        ];
        if allowances.iter().flatten().any(|v| *v < 0.0) {
            return Err(ApiError::validation("Allowance values must be non-negative"));
        }

        Ok(PayrollDraft {
            employee_id,
            employee_name,
            monthly_salary,
            annual_package,
            mobile_recharge: self.mobile_recharge,
            fuel_expense: self.fuel_expense,
            monthly_incentive: self.monthly_incentive,
            gift_voucher: self.gift_voucher,
            month: text(self.month),
            year: self.year,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    #[schema(example = "January", value_type = String)]
    pub month: Option<String>,
    #[schema(example = 2024, value_type = i32)]
    pub year: Option<i32>,
    #[schema(example = 60000.0, value_type = f64)]
    pub office_rent: Option<f64>,
    #[schema(example = 8500.0, value_type = f64)]
    pub utilities: Option<f64>,
    pub other: Option<f64>,
    pub notes: Option<String>,
}

impl Validate for ExpensePayload {
    type Output = ExpenseDraft;

    fn validate(self) -> Result<ExpenseDraft, ApiError> {
        let (Some(month), Some(year), Some(office_rent), Some(utilities)) = (
            text(self.month),
            self.year.filter(|y| *y != 0),
            self.office_rent,
            self.utilities,
        ) else {
            return Err(ApiError::validation(
                "Missing required fields: month, year, officeRent, and utilities are required",
            ));
        };

        if office_rent < 0.0 || utilities < 0.0 || self.other.is_some_and(|o| o < 0.0) {
            return Err(ApiError::validation("Expense values must be non-negative"));
        }

        Ok(ExpenseDraft {
            month,
            year,
            office_rent,
            utilities,
            other: self.other,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPayload {
    #[schema(example = "January", value_type = String)]
    pub month: Option<String>,
    #[schema(example = 2024, value_type = i32)]
    pub year: Option<i32>,
    #[schema(example = 1000.0, value_type = f64)]
    pub income: Option<f64>,
    #[schema(example = 400.0, value_type = f64)]
    pub expense: Option<f64>,
    pub income_breakdown: Option<IncomeBreakdown>,
    pub expense_breakdown: Option<ExpenseBreakdown>,
}

impl Validate for FinancialPayload {
    type Output = FinancialDraft;

    fn validate(self) -> Result<FinancialDraft, ApiError> {
        let (Some(month), Some(year), Some(income), Some(expense)) = (
            text(self.month),
            self.year.filter(|y| *y != 0),
            self.income,
            self.expense,
        ) else {
            return Err(ApiError::validation(
                "Missing required fields: month, year, income, and expense are required",
            ));
        };

        let breakdowns_ok = self.income_breakdown.is_none_or(|b| b.is_non_negative())
            && self.expense_breakdown.is_none_or(|b| b.is_non_negative());
        if income < 0.0 || expense < 0.0 || !breakdowns_ok {
            return Err(ApiError::validation("Financial values must be non-negative"));
        }

        Ok(FinancialDraft {
            month,
            year,
            income,
            expense,
            income_breakdown: self.income_breakdown,
            expense_breakdown: self.expense_breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@clinic.example.in"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.b"));
        assert!(!is_valid_email("a @b.co"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b@c.co"));
    }

    #[test]
    fn employee_requires_id_name_and_email() {
        let payload: EmployeePayload = parse(json!({"employeeId": "E1", "name": "  "}));
        let err = payload.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: employeeId, name, and email are required"
        );
    }

    #[test]
    fn employee_numeric_id_is_accepted() {
        let payload: EmployeePayload =
            parse(json!({"employeeId": 42, "name": "Ravi", "email": "ravi@clinic.in"}));
        assert_eq!(payload.validate().unwrap().employee_id, "42");
    }

    #[test]
    fn employee_bad_email_is_rejected() {
        let payload: EmployeePayload =
            parse(json!({"employeeId": "E1", "name": "Ravi", "email": "ravi-at-clinic"}));
        assert_eq!(payload.validate().unwrap_err().to_string(), "Invalid email format");
    }

    #[test]
    fn payroll_zero_salary_is_present_not_missing() {
        let payload: PayrollPayload = parse(json!({
            "employeeId": "E1", "employeeName": "Ravi", "monthlySalary": 0, "annualPackage": 0
        }));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payroll_negative_salary_is_rejected() {
        let payload: PayrollPayload = parse(json!({
            "employeeId": "E1", "employeeName": "Ravi", "monthlySalary": -1, "annualPackage": 10
        }));
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Salary values must be non-negative"
        );
    }

    #[test]
    fn payroll_accepts_both_fuel_shapes() {
        let flat: PayrollPayload = parse(json!({
            "employeeId": "E1", "employeeName": "A", "monthlySalary": 1, "annualPackage": 12,
            "fuelExpense": 500
        }));
        assert_eq!(flat.validate().unwrap().fuel_expense, Some(FuelExpense::Flat(500.0)));

        let detailed: PayrollPayload = parse(json!({
            "employeeId": "E1", "employeeName": "A", "monthlySalary": 1, "annualPackage": 12,
            "fuelExpense": {"amount": 300, "vehicleNumber": "MH12AB1234"}
        }));
        assert_eq!(
            detailed.validate().unwrap().fuel_expense.map(|f| f.vehicle().to_string()),
            Some("MH12AB1234".to_string())
        );
    }

    #[test]
    fn expense_requires_month_year_rent_utilities() {
        let payload: ExpensePayload = parse(json!({"month": "January", "officeRent": 10}));
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Missing required fields: month, year, officeRent, and utilities are required"
        );
    }

    #[test]
    fn expense_negative_utilities_rejected() {
        let payload: ExpensePayload = parse(json!({
            "month": "January", "year": 2024, "officeRent": 10, "utilities": -5
        }));
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Expense values must be non-negative"
        );
    }

    #[test]
    fn financial_breakdowns_default_missing_fields() {
        let payload: FinancialPayload = parse(json!({
            "month": "March", "year": 2024, "income": 10, "expense": 4,
            "expenseBreakdown": {"housing": 3}
        }));
        let draft = payload.validate().unwrap();
        let breakdown = draft.expense_breakdown.unwrap();
        assert_eq!(breakdown.housing, 3.0);
        assert_eq!(breakdown.food, 0.0);
        assert!(draft.income_breakdown.is_none());
    }

    #[test]
    fn financial_negative_values_rejected() {
        let payload: FinancialPayload =
            parse(json!({"month": "March", "year": 2024, "income": -10, "expense": 4}));
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Financial values must be non-negative"
        );
    }

    #[test]
    fn financial_negative_breakdown_rejected() {
        let payload: FinancialPayload = parse(json!({
            "month": "March", "year": 2024, "income": 10, "expense": 50,
            "expenseBreakdown": {"housing": 100, "food": 100, "other": -150}
        }));
        assert_eq!(
            payload.validate().unwrap_err().to_string(),
            "Financial values must be non-negative"
        );

        let payload: FinancialPayload = parse(json!({
            "month": "March", "year": 2024, "income": 10, "expense": 4,
            "incomeBreakdown": {"salary": -1}
        }));
        assert!(payload.validate().is_err());
    }
}
