use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;
use serde_json::json;

/// Response envelope shared by every endpoint:
/// `{ success, data?, count?, message?, error? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            message: None,
            data: Some(data),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::data(data))
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::data(data))
}

pub fn list<T: Serialize>(data: Vec<T>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::list(data))
}

/// Removal acknowledgement; `data` is an empty object as the frontend expects.
pub fn deleted(message: &str) -> HttpResponse {
    HttpResponse::build(StatusCode::OK).json(json!({
        "success": true,
        "message": message,
        "data": {}
    }))
}
