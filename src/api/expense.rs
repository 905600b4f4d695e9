use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::validator::{ExpensePayload, Validated},
    model::Expense,
    report::expense::{self as report, ExpenseRow, ExpenseSummary},
    response,
    store::ExpenseStore,
};

const NOT_FOUND: &str = "Expense record not found";

/// Record ids are numeric; anything else cannot name a record.
pub(crate) fn record_id(raw: &str, not_found: &str) -> ApiResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::not_found(not_found))
}

/// List Expenses (display formatted, latest month first)
#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "Expense rows with currency strings", body = [ExpenseRow])
    ),
    tag = "Expense"
)]
pub async fn list_expenses(store: web::Data<dyn ExpenseStore>) -> ApiResult<HttpResponse> {
    let mut expenses = store.list_expenses().await?;
    report::sort_latest_first(&mut expenses);
    debug!(count = expenses.len(), "Fetched expenses");

    let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
    Ok(response::list(rows))
}

/// Expense Summary
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    responses(
        (status = 200, description = "Category totals and monthly average", body = ExpenseSummary)
    ),
    tag = "Expense"
)]
pub async fn expense_summary(store: web::Data<dyn ExpenseStore>) -> ApiResult<HttpResponse> {
    let expenses = store.list_expenses().await?;
    Ok(response::ok(report::summarize(&expenses)))
}

/// Create Expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = ExpensePayload,
    responses(
        (status = 201, description = "Expense record created", body = Expense),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "success": false,
            "error": "Missing required fields: month, year, officeRent, and utilities are required"
        }))
    ),
    tag = "Expense"
)]
pub async fn create_expense(
    store: web::Data<dyn ExpenseStore>,
    payload: Validated<ExpensePayload>,
) -> ApiResult<HttpResponse> {
    let expense = store.insert_expense(payload.into_inner()).await?;
    info!(id = expense.id, month = %expense.month, year = expense.year, "Expense record created");
    Ok(response::created(expense))
}

/// Update Expense
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    params(
        ("id", Path, description = "Expense record id")
    ),
    request_body = ExpensePayload,
    responses(
        (status = 200, description = "Expense record updated", body = Expense),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Expense record not found")
    ),
    tag = "Expense"
)]
pub async fn update_expense(
    store: web::Data<dyn ExpenseStore>,
    path: web::Path<String>,
    payload: Validated<ExpensePayload>,
) -> ApiResult<HttpResponse> {
    let id = record_id(&path, NOT_FOUND)?;

    let expense = store
        .update_expense(id, payload.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "Expense record updated");
    Ok(response::ok(expense))
}

/// Delete Expense
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(
        ("id", Path, description = "Expense record id")
    ),
    responses(
        (status = 200, description = "Expense record deleted"),
        (status = 404, description = "Expense record not found")
    ),
    tag = "Expense"
)]
pub async fn delete_expense(
    store: web::Data<dyn ExpenseStore>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = record_id(&path, NOT_FOUND)?;

    if !store.delete_expense(id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(id, "Expense record deleted");
    Ok(response::deleted("Expense record deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_id_reads_as_missing() {
        assert_eq!(record_id(" 42 ", NOT_FOUND).unwrap(), 42);
        let err = record_id("abc", NOT_FOUND).unwrap_err();
        assert_eq!(err.to_string(), NOT_FOUND);
    }
}
