use actix_web::{error::ResponseError, HttpResponse};
use log::error;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    ValidationError(String),
    Conflict(String),
    NotFound(String),
    DatabaseError(String),
    HashingError(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::HashingError(msg) => write!(f, "Hashing error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::HashingError(format!("bcrypt error: {}", err))
    }
}

/// Every failure leaves the server as `{ "success": false, "error": … }`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Unauthorized(msg) => {
                HttpResponse::Unauthorized().json(ErrorBody::new(msg.clone()))
            }
            ApiError::Forbidden(msg) => {
                HttpResponse::Forbidden().json(ErrorBody::new(msg.clone()))
            }
            ApiError::ValidationError(msg) => {
                HttpResponse::BadRequest().json(ErrorBody::new(msg.clone()))
            }
            ApiError::Conflict(msg) => {
                HttpResponse::Conflict().json(ErrorBody::new(msg.clone()))
            }
            ApiError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorBody::new(msg.clone()))
            }
            // 500-class details are logged server-side only; the client gets
            // a generic message.
            ApiError::DatabaseError(msg)
            | ApiError::HashingError(msg)
            | ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(ErrorBody::new("Internal server error"))
            }
        }
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DatabaseError(_)
            | ApiError::HashingError(_)
            | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
