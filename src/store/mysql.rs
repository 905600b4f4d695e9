//! sqlx/MySQL backend.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde_json::Value;
use sqlx::{FromRow, MySqlPool, types::Json};
use tracing::debug;

use super::{
    EmployeeStore, ExpenseStore, FinancialStore, PayrollStore, StoreError, StoreResult,
};
use crate::model::{
    Employee, EmployeeDraft, Expense, ExpenseBreakdown, ExpenseDraft, FinancialData,
    FinancialDraft, FuelExpense, IncomeBreakdown, Month, Payroll, PayrollDraft, PayrollFilter,
};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

}

/// `DATETIME(6)` keeps microseconds; records returned from writes must match
/// what a later read decodes.
fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, email, department, position, phone, \
     status, hire_date, created_at, updated_at";

#[async_trait]
impl EmployeeStore for MySqlStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE employee_id = ?");
        Ok(sqlx::query_as::<_, Employee>(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_employee(&self, draft: EmployeeDraft) -> StoreResult<Employee> {
        let employee = Employee::from_draft(0, draft, stored_now());

        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (employee_id, name, email, department, position, phone, status, hire_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.position)
        .bind(&employee.phone)
        .bind(employee.status.to_string())
        .bind(employee.hire_date)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_id(),
            ..employee
        })
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        draft: EmployeeDraft,
    ) -> StoreResult<Option<Employee>> {
        let Some(mut employee) = self.find_employee(employee_id).await? else {
            return Ok(None);
        };
        employee.apply(draft, stored_now());

        sqlx::query(
            r#"
            UPDATE employees
            SET employee_id = ?, name = ?, email = ?, department = ?, position = ?, phone = ?,
                status = ?, hire_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.position)
        .bind(&employee.phone)
        .bind(employee.status.to_string())
        .bind(employee.hire_date)
        .bind(employee.updated_at)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(employee))
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active_employees(&self) -> StoreResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE status = 'active'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count.max(0) as u64)
    }
}

#[derive(FromRow)]
struct PayrollRow {
    id: u64,
    employee_id: String,
    employee_name: String,
    monthly_salary: f64,
    annual_package: f64,
    mobile_recharge: f64,
    fuel_expense: Option<Json<Value>>,
    monthly_incentive: f64,
    gift_voucher: f64,
    month: String,
    year: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PayrollRow> for Payroll {
    fn from(row: PayrollRow) -> Self {
        let fuel_expense = row
            .fuel_expense
            .map(|Json(value)| FuelExpense::from_value(&value))
            .unwrap_or_default();

        Payroll {
            id: row.id,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            monthly_salary: row.monthly_salary,
            annual_package: row.annual_package,
            mobile_recharge: row.mobile_recharge,
            fuel_expense,
            monthly_incentive: row.monthly_incentive,
            gift_voucher: row.gift_voucher,
            month: row.month,
            year: row.year,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PAYROLL_COLUMNS: &str = "id, employee_id, employee_name, monthly_salary, annual_package, \
     mobile_recharge, fuel_expense, monthly_incentive, gift_voucher, month, year, created_at, updated_at";

impl MySqlStore {
    async fn latest_payroll(&self, employee_id: &str) -> StoreResult<Option<Payroll>> {
        let sql = format!(
            "SELECT {PAYROLL_COLUMNS} FROM payrolls WHERE employee_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, PayrollRow>(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Payroll::from))
    }
}

#[async_trait]
impl PayrollStore for MySqlStore {
    async fn list_payrolls(&self, filter: &PayrollFilter) -> StoreResult<Vec<Payroll>> {
        let mut conditions = Vec::new();
        if filter.month.is_some() {
            conditions.push("month = ?");
        }
        if filter.year.is_some() {
            conditions.push("year = ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {PAYROLL_COLUMNS} FROM payrolls {where_clause} ORDER BY created_at DESC, id DESC"
        );
        debug!(sql = %sql, ?filter, "Fetching payrolls");

        let mut query = sqlx::query_as::<_, PayrollRow>(&sql);
        if let Some(month) = &filter.month {
            query = query.bind(month);
        }
        if let Some(year) = filter.year {
            query = query.bind(year);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Payroll::from).collect())
    }

    async fn insert_payroll(&self, draft: PayrollDraft) -> StoreResult<Payroll> {
        let now = stored_now();
        let today = now.date_naive();
        let payroll = Payroll::from_draft(0, draft, &Month::of(today).to_string(), today.year(), now);

        let result = sqlx::query(
            r#"
            INSERT INTO payrolls
            (employee_id, employee_name, monthly_salary, annual_package, mobile_recharge,
             fuel_expense, monthly_incentive, gift_voucher, month, year, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payroll.employee_id)
        .bind(&payroll.employee_name)
        .bind(payroll.monthly_salary)
        .bind(payroll.annual_package)
        .bind(payroll.mobile_recharge)
        .bind(Json(payroll.fuel_expense.to_value()))
        .bind(payroll.monthly_incentive)
        .bind(payroll.gift_voucher)
        .bind(&payroll.month)
        .bind(payroll.year)
        .bind(payroll.created_at)
        .bind(payroll.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Payroll {
            id: result.last_insert_id(),
            ..payroll
        })
    }

    async fn update_payroll(
        &self,
        employee_id: &str,
        draft: PayrollDraft,
    ) -> StoreResult<Option<Payroll>> {
        let Some(mut payroll) = self.latest_payroll(employee_id).await? else {
            return Ok(None);
        };
        payroll.apply(draft, stored_now());

        sqlx::query(
            r#"
            UPDATE payrolls
            SET employee_id = ?, employee_name = ?, monthly_salary = ?, annual_package = ?,
                mobile_recharge = ?, fuel_expense = ?, monthly_incentive = ?, gift_voucher = ?,
                month = ?, year = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&payroll.employee_id)
        .bind(&payroll.employee_name)
        .bind(payroll.monthly_salary)
        .bind(payroll.annual_package)
        .bind(payroll.mobile_recharge)
        .bind(Json(payroll.fuel_expense.to_value()))
        .bind(payroll.monthly_incentive)
        .bind(payroll.gift_voucher)
        .bind(&payroll.month)
        .bind(payroll.year)
        .bind(payroll.updated_at)
        .bind(payroll.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(payroll))
    }

    async fn delete_payroll(&self, employee_id: &str) -> StoreResult<bool> {
        let Some(payroll) = self.latest_payroll(employee_id).await? else {
            return Ok(false);
        };
        let result = sqlx::query("DELETE FROM payrolls WHERE id = ?")
            .bind(payroll.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

const EXPENSE_COLUMNS: &str =
    "id, month, year, office_rent, utilities, other, notes, created_at, updated_at";

impl MySqlStore {
    async fn find_expense(&self, id: u64) -> StoreResult<Option<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?");
        Ok(sqlx::query_as::<_, Expense>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}

#[async_trait]
impl ExpenseStore for MySqlStore {
    async fn list_expenses(&self) -> StoreResult<Vec<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses");
        Ok(sqlx::query_as::<_, Expense>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert_expense(&self, draft: ExpenseDraft) -> StoreResult<Expense> {
        let expense = Expense::from_draft(0, draft, stored_now());

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (month, year, office_rent, utilities, other, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.month)
        .bind(expense.year)
        .bind(expense.office_rent)
        .bind(expense.utilities)
        .bind(expense.other)
        .bind(&expense.notes)
        .bind(expense.created_at)
        .bind(expense.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(Expense {
            id: result.last_insert_id(),
            ..expense
        })
    }

    async fn update_expense(&self, id: u64, draft: ExpenseDraft) -> StoreResult<Option<Expense>> {
        let Some(mut expense) = self.find_expense(id).await? else {
            return Ok(None);
        };
        expense.apply(draft, stored_now());

        sqlx::query(
            r#"
            UPDATE expenses
            SET month = ?, year = ?, office_rent = ?, utilities = ?, other = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense.month)
        .bind(expense.year)
        .bind(expense.office_rent)
        .bind(expense.utilities)
        .bind(expense.other)
        .bind(&expense.notes)
        .bind(expense.updated_at)
        .bind(expense.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(expense))
    }

    async fn delete_expense(&self, id: u64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct FinancialRow {
    id: u64,
    month: String,
    year: i32,
    income: f64,
    expense: f64,
    income_salary: f64,
    income_business: f64,
    income_investment: f64,
    expense_housing: f64,
    expense_transportation: f64,
    expense_entertainment: f64,
    expense_food: f64,
    expense_other: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FinancialRow> for FinancialData {
    fn from(row: FinancialRow) -> Self {
        FinancialData {
            id: row.id,
            month: row.month,
            year: row.year,
            income: row.income,
            expense: row.expense,
            income_breakdown: IncomeBreakdown {
                salary: row.income_salary,
                business: row.income_business,
                investment: row.income_investment,
            },
            expense_breakdown: ExpenseBreakdown {
                housing: row.expense_housing,
                transportation: row.expense_transportation,
                entertainment: row.expense_entertainment,
                food: row.expense_food,
                other: row.expense_other,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const FINANCIAL_COLUMNS: &str = "id, month, year, income, expense, income_salary, income_business, \
     income_investment, expense_housing, expense_transportation, expense_entertainment, \
     expense_food, expense_other, created_at, updated_at";

#[async_trait]
impl FinancialStore for MySqlStore {
    async fn list_financial_for_year(&self, year: i32) -> StoreResult<Vec<FinancialData>> {
        let sql = format!("SELECT {FINANCIAL_COLUMNS} FROM financial_data WHERE year = ?");
        let rows = sqlx::query_as::<_, FinancialRow>(&sql)
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(FinancialData::from).collect())
    }

    async fn insert_financial(&self, draft: FinancialDraft) -> StoreResult<FinancialData> {
        let record = FinancialData::from_draft(0, draft, stored_now());
        let (inc, exp) = (record.income_breakdown, record.expense_breakdown);

        let result = sqlx::query(
            r#"
            INSERT INTO financial_data
            (month, year, income, expense, income_salary, income_business, income_investment,
             expense_housing, expense_transportation, expense_entertainment, expense_food,
             expense_other, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.month)
        .bind(record.year)
        .bind(record.income)
        .bind(record.expense)
        .bind(inc.salary)
        .bind(inc.business)
        .bind(inc.investment)
        .bind(exp.housing)
        .bind(exp.transportation)
        .bind(exp.entertainment)
        .bind(exp.food)
        .bind(exp.other)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(FinancialData {
            id: result.last_insert_id(),
            ..record
        })
    }

    async fn update_financial(
        &self,
        id: u64,
        draft: FinancialDraft,
    ) -> StoreResult<Option<FinancialData>> {
        let sql = format!("SELECT {FINANCIAL_COLUMNS} FROM financial_data WHERE id = ?");
        let Some(row) = sqlx::query_as::<_, FinancialRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let mut record = FinancialData::from(row);
        record.apply(draft, stored_now());
        let (inc, exp) = (record.income_breakdown, record.expense_breakdown);

        sqlx::query(
            r#"
            UPDATE financial_data
            SET month = ?, year = ?, income = ?, expense = ?, income_salary = ?, income_business = ?,
                income_investment = ?, expense_housing = ?, expense_transportation = ?,
                expense_entertainment = ?, expense_food = ?, expense_other = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&record.month)
        .bind(record.year)
        .bind(record.income)
        .bind(record.expense)
        .bind(inc.salary)
        .bind(inc.business)
        .bind(inc.investment)
        .bind(exp.housing)
        .bind(exp.transportation)
        .bind(exp.entertainment)
        .bind(exp.food)
        .bind(exp.other)
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn write_timestamps_carry_column_precision() {
        let now = stored_now();
        assert_eq!(now.nanosecond() % 1_000, 0);
    }
}
