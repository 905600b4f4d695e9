use actix_web::{HttpResponse, Responder, get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    #[schema(example = "ok")]
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        status: "ok",
        message: "Reports API is running",
    })
}

/// Service banner with the endpoint map.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "HRM Reports API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "dashboard": "/api/dashboard",
            "employees": "/api/employees",
            "payroll": "/api/payroll",
            "expenses": "/api/expenses",
            "financial": "/api/financial",
            "docs": "/swagger-ui/"
        }
    }))
}
