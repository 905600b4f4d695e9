use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::validator::{EmployeePayload, Validated},
    model::Employee,
    response,
    store::EmployeeStore,
};

const NOT_FOUND: &str = "Employee not found";

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn EmployeeStore>) -> ApiResult<HttpResponse> {
    let employees = store.list_employees().await?;
    debug!(count = employees.len(), "Fetched employees");
    Ok(response::list(employees))
}

/// Get Employee by business key
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee id, e.g. EMP-001")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false,
            "error": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    store
        .find_employee(&employee_id)
        .await?
        .map(response::ok)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing fields, bad email or duplicate employeeId", body = Object, example = json!({
            "success": false,
            "error": "Missing required fields: employeeId, name, and email are required"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    payload: Validated<EmployeePayload>,
) -> ApiResult<HttpResponse> {
    let employee = store.insert_employee(payload.into_inner()).await?;
    info!(employee_id = %employee.employee_id, "Employee created");
    Ok(response::created(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee id")
    ),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
    payload: Validated<EmployeePayload>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    let employee = store
        .update_employee(&employee_id, payload.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(employee_id = %employee_id, "Employee updated");
    Ok(response::ok(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Business employee id")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "success": true,
            "message": "Employee deleted successfully",
            "data": {}
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();

    if !store.delete_employee(&employee_id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(response::deleted("Employee deleted successfully"))
}
