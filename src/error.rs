use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use once_cell::sync::OnceCell;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

static EXPOSE_DETAIL: OnceCell<bool> = OnceCell::new();

/// Set once at startup. Until it is set, internal error detail stays hidden.
pub fn expose_error_detail(enabled: bool) {
    let _ = EXPOSE_DETAIL.set(enabled);
}

fn detail_exposed() -> bool {
    EXPOSE_DETAIL.get().copied().unwrap_or(false)
}

#[derive(Debug, Display)]
pub enum ApiError {
    /// Missing or invalid input (400)
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Resource absent by its lookup key (404)
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Anything unexpected (500)
    #[display(fmt = "{}", message)]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal<E: std::fmt::Debug + std::fmt::Display>(err: E) -> Self {
        Self::Internal {
            message: err.to_string(),
            detail: Some(format!("{err:?}")),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Duplicate(msg) => ApiError::Validation(msg),
            other => ApiError::internal(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.render(detail_exposed())
    }
}

impl ApiError {
    /// Error envelope; `detail` is attached to 500s only when `expose_detail` is set.
    pub fn render(&self, expose_detail: bool) -> HttpResponse {
        let mut body = json!({
            "success": false,
            "error": self.to_string(),
        });

        if let ApiError::Internal { message, detail } = self {
            error!(error = %message, "Request failed");
            if let Some(detail) = detail.as_ref().filter(|_| expose_detail) {
                body["detail"] = json!(detail);
            }
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
