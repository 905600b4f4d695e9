use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::debug;

use super::financial::YearQuery;
use crate::{
    error::ApiResult,
    model::PayrollFilter,
    report::dashboard::{self as report, Hiring, Overview},
    report::financial::sort_by_month,
    response,
    store::{EmployeeStore, FinancialStore, PayrollStore},
};

/// Dashboard Overview
///
/// Reads financial data for the year and the one before, every payroll record
/// and the active headcount. The reads are independent; no snapshot is taken.
#[utoipa::path(
    get,
    path = "/api/dashboard/overview",
    params(YearQuery),
    responses(
        (status = 200, description = "Summary cards, top line and revenue series", body = Overview)
    ),
    tag = "Dashboard"
)]
pub async fn overview(
    financial: web::Data<dyn FinancialStore>,
    payrolls: web::Data<dyn PayrollStore>,
    employees: web::Data<dyn EmployeeStore>,
    query: web::Query<YearQuery>,
) -> ApiResult<HttpResponse> {
    let year = query.year_or_current()?;

    let mut current = financial.list_financial_for_year(year).await?;
    sort_by_month(&mut current);
    let previous = financial.list_financial_for_year(year - 1).await?;
    let payroll = payrolls.list_payrolls(&PayrollFilter::default()).await?;
    let active = employees.count_active_employees().await?;

    debug!(year, records = current.len(), active, "Building dashboard overview");
    Ok(response::ok(report::overview(&current, &previous, &payroll, active)))
}

/// Hiring Dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard/hiring",
    responses(
        (status = 200, description = "Hiring cards, six-month series and funnel", body = Hiring)
    ),
    tag = "Dashboard"
)]
pub async fn hiring(employees: web::Data<dyn EmployeeStore>) -> ApiResult<HttpResponse> {
    let staff = employees.list_employees().await?;
    let today = Utc::now().date_naive();

    debug!(employees = staff.len(), %today, "Building hiring dashboard");
    Ok(response::ok(report::hiring(&staff, today)))
}
