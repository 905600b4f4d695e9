use actix_web::{HttpResponse, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::IntoParams;

use super::expense::record_id;
use crate::{
    error::{ApiError, ApiResult},
    middleware::validator::{FinancialPayload, Validated},
    model::FinancialData,
    report::financial::{self as report, FinancialAnalytics},
    response,
    store::FinancialStore,
};

const NOT_FOUND: &str = "Financial data record not found";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Defaults to the current calendar year; must lie in 1..=9999
    pub year: Option<i32>,
}

const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

impl YearQuery {
    pub fn year_or_current(&self) -> ApiResult<i32> {
        let year = self.year.unwrap_or_else(|| Utc::now().year());
        if !YEARS.contains(&year) {
            return Err(ApiError::validation("Year must be between 1 and 9999"));
        }
        Ok(year)
    }
}

/// Financial Analytics for one year
#[utoipa::path(
    get,
    path = "/api/financial/analytics",
    params(YearQuery),
    responses(
        (status = 200, description = "Monthly figures, totals and breakdowns", body = FinancialAnalytics)
    ),
    tag = "Financial"
)]
pub async fn analytics(
    store: web::Data<dyn FinancialStore>,
    query: web::Query<YearQuery>,
) -> ApiResult<HttpResponse> {
    let year = query.year_or_current()?;
    let records = store.list_financial_for_year(year).await?;
    debug!(year, count = records.len(), "Building financial analytics");

    Ok(response::ok(report::analytics(year, records)))
}

/// Create Financial Data
#[utoipa::path(
    post,
    path = "/api/financial",
    request_body = FinancialPayload,
    responses(
        (status = 201, description = "Financial data record created", body = FinancialData),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "success": false,
            "error": "Financial values must be non-negative"
        }))
    ),
    tag = "Financial"
)]
pub async fn create_financial(
    store: web::Data<dyn FinancialStore>,
    payload: Validated<FinancialPayload>,
) -> ApiResult<HttpResponse> {
    let record = store.insert_financial(payload.into_inner()).await?;
    info!(id = record.id, month = %record.month, year = record.year, "Financial data created");
    Ok(response::created(record))
}

/// Update Financial Data
#[utoipa::path(
    put,
    path = "/api/financial/{id}",
    params(
        ("id", Path, description = "Financial data record id")
    ),
    request_body = FinancialPayload,
    responses(
        (status = 200, description = "Financial data record updated", body = FinancialData),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Financial data record not found")
    ),
    tag = "Financial"
)]
pub async fn update_financial(
    store: web::Data<dyn FinancialStore>,
    path: web::Path<String>,
    payload: Validated<FinancialPayload>,
) -> ApiResult<HttpResponse> {
    let id = record_id(&path, NOT_FOUND)?;

    let record = store
        .update_financial(id, payload.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    info!(id, "Financial data updated");
    Ok(response::ok(record))
}
