use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::IntoParams;

use crate::{
    error::{ApiError, ApiResult},
    middleware::validator::{PayrollPayload, Validated},
    model::{Payroll, PayrollFilter},
    report::payroll::{self as report, PayrollRow, PayrollSummary, SalaryTotals},
    response,
    store::PayrollStore,
};

const NOT_FOUND: &str = "Payroll record not found";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PayrollQuery {
    /// Month name as stored, e.g. `January`
    pub month: Option<String>,
    pub year: Option<i32>,
}

impl From<PayrollQuery> for PayrollFilter {
    fn from(q: PayrollQuery) -> Self {
        PayrollFilter {
            month: q.month.filter(|m| !m.trim().is_empty()),
            year: q.year,
        }
    }
}

/// List Payroll (display formatted)
#[utoipa::path(
    get,
    path = "/api/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Payroll rows with currency strings", body = [PayrollRow])
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    store: web::Data<dyn PayrollStore>,
    query: web::Query<PayrollQuery>,
) -> ApiResult<HttpResponse> {
    let filter = PayrollFilter::from(query.into_inner());
    let payrolls = store.list_payrolls(&filter).await?;
    debug!(count = payrolls.len(), filter = ?filter, "Fetched payroll");

    let rows: Vec<PayrollRow> = payrolls.iter().map(PayrollRow::from).collect();
    Ok(response::list(rows))
}

/// Payroll Summary
#[utoipa::path(
    get,
    path = "/api/payroll/summary",
    responses(
        (status = 200, description = "Salary totals, average and highest", body = PayrollSummary)
    ),
    tag = "Payroll"
)]
pub async fn payroll_summary(store: web::Data<dyn PayrollStore>) -> ApiResult<HttpResponse> {
    let payrolls = store.list_payrolls(&PayrollFilter::default()).await?;
    Ok(response::ok(report::summarize(&payrolls)))
}

/// Allowance Totals
#[utoipa::path(
    get,
    path = "/api/payroll/total-salaries",
    responses(
        (status = 200, description = "Sums per allowance category", body = SalaryTotals)
    ),
    tag = "Payroll"
)]
pub async fn total_salaries(store: web::Data<dyn PayrollStore>) -> ApiResult<HttpResponse> {
    let payrolls = store.list_payrolls(&PayrollFilter::default()).await?;
    Ok(response::ok(report::salary_totals(&payrolls)))
}

/// Create Payroll
#[utoipa::path(
    post,
    path = "/api/payroll",
    request_body = PayrollPayload,
    responses(
        (status = 201, description = "Payroll record created", body = Payroll),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "success": false,
            "error": "Salary values must be non-negative"
        }))
    ),
    tag = "Payroll"
)]
pub async fn create_payroll(
    store: web::Data<dyn PayrollStore>,
    payload: Validated<PayrollPayload>,
) -> ApiResult<HttpResponse> {
    let payroll = store.insert_payroll(payload.into_inner()).await?;
    info!(
        employee_id = %payroll.employee_id,
        month = %payroll.month,
        year = payroll.year,
        "Payroll record created"
    );
    Ok(response::created(payroll))
}

/// Update Payroll (latest record of the employee)
#[utoipa::path(
    put,
    path = "/api/payroll/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee id")
    ),
    request_body = PayrollPayload,
    responses(
        (status = 200, description = "Payroll record updated", body = Payroll),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Payroll record not found")
    ),
    tag = "Payroll"
)]
pub async fn update_payroll(
    store: web::Data<dyn PayrollStore>,
    path: web::Path<String>,
    payload: Validated<PayrollPayload>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    let payroll = store
        .update_payroll(&employee_id, payload.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(employee_id = %employee_id, id = payroll.id, "Payroll record updated");
    Ok(response::ok(payroll))
}

/// Delete Payroll (latest record of the employee)
#[utoipa::path(
    delete,
    path = "/api/payroll/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee id")
    ),
    responses(
        (status = 200, description = "Payroll record deleted"),
        (status = 404, description = "Payroll record not found")
    ),
    tag = "Payroll"
)]
pub async fn delete_payroll(
    store: web::Data<dyn PayrollStore>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    if !store.delete_payroll(&employee_id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(employee_id = %employee_id, "Payroll record deleted");
    Ok(response::deleted("Payroll record deleted successfully"))
}
