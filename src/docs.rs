use crate::api::health::HealthResponse;
use crate::middleware::validator::{
    EmployeePayload, ExpensePayload, FinancialPayload, PayrollPayload,
};
use crate::model::{
    Employee, EmployeeStatus, Expense, ExpenseBreakdown, FinancialData, IncomeBreakdown, Payroll,
};
use crate::report::dashboard::{
    FunnelStage, Hiring, HiringStat, MonthlyMetric, Overview, RevenuePoint, SummaryStat,
    TopLinePoint,
};
use crate::report::expense::{ExpenseRow, ExpenseSummary};
use crate::report::financial::{ExpenseSlice, FinancialAnalytics, IncomeSlice, MonthlyFigures};
use crate::report::payroll::{PayrollRow, PayrollSummary, SalaryTotals};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Reports API",
        version = "1.0.0",
        description = r#"
## HR & Finance Reporting

Aggregate figures for an internal dashboard: staff, payroll, operating
expenses, monthly income/expense and a hiring overview.

### 🔹 Resources
- **Employees**: create, update, list and look up by business `employeeId`
- **Payroll**: per-cycle salary and allowances, with summary and allowance totals
- **Expenses**: monthly operating overhead with a category summary
- **Financial**: monthly income/expense and yearly analytics
- **Dashboard**: overview cards and hiring view-models

### 📦 Response Format
Every response is `{ success, data?, count?, message?, error? }`.
Amounts in list views are rendered as `₹` strings with Indian digit grouping.

Figures flagged `estimated: true` are presentation heuristics, not measurements.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::payroll::list_payrolls,
        crate::api::payroll::payroll_summary,
        crate::api::payroll::total_salaries,
        crate::api::payroll::create_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::delete_payroll,

        crate::api::expense::list_expenses,
        crate::api::expense::expense_summary,
        crate::api::expense::create_expense,
        crate::api::expense::update_expense,
        crate::api::expense::delete_expense,

        crate::api::financial::analytics,
        crate::api::financial::create_financial,
        crate::api::financial::update_financial,

        crate::api::dashboard::overview,
        crate::api::dashboard::hiring
    ),
    components(
        schemas(
            HealthResponse,
            Employee,
            EmployeeStatus,
            EmployeePayload,
            Payroll,
            PayrollPayload,
            PayrollRow,
            PayrollSummary,
            SalaryTotals,
            Expense,
            ExpensePayload,
            ExpenseRow,
            ExpenseSummary,
            FinancialData,
            FinancialPayload,
            IncomeBreakdown,
            ExpenseBreakdown,
            FinancialAnalytics,
            MonthlyFigures,
            IncomeSlice,
            ExpenseSlice,
            Overview,
            TopLinePoint,
            SummaryStat,
            RevenuePoint,
            Hiring,
            HiringStat,
            MonthlyMetric,
            FunnelStage
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Employee", description = "Employee records"),
        (name = "Payroll", description = "Payroll records and salary reports"),
        (name = "Expense", description = "Operating expense records and summary"),
        (name = "Financial", description = "Monthly income/expense and yearly analytics"),
        (name = "Dashboard", description = "Dashboard view-models"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/payroll/summary",
            "/api/expenses/{id}",
            "/api/financial/analytics",
            "/api/dashboard/hiring",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
