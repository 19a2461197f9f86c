use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use log::error;

use crate::db::StoreError;
use crate::services::employee::ServiceError;
use crate::utils::validation::FieldError;

#[derive(Debug)]
pub enum AppError {
    Validation(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct ValidationErrorResponse<'a> {
    error: &'static str,
    fields: &'a [FieldError],
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(fields) => {
                write!(f, "Validation failed:")?;
                for field in fields {
                    write!(f, " {}: {};", field.field, field.message)?;
                }
                Ok(())
            }
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::UniqueViolation(msg) => AppError::Conflict(msg),
            StoreError::Database(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            ServiceError::Store(store) => store.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(fields) => response.json(ValidationErrorResponse {
                error: "Validation failed",
                fields,
            }),
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                response.json(ErrorResponse { error: msg.clone() })
            }
            AppError::DatabaseError(msg) => {
                error!("database failure: {}", msg);
                response.json(ErrorResponse { error: "Internal server error".to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::Validation(Vec::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::BadRequest("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("gone".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_not_found_keeps_message() {
        let err: AppError = ServiceError::NotFound(42).into();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Employee with id 42 does not exist"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn store_not_found_is_404() {
        let err: AppError = StoreError::NotFound(8).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err: AppError = ServiceError::Store(StoreError::UniqueViolation("email taken".into())).into();
        assert!(matches!(err, AppError::Conflict(msg) if msg == "email taken"));
    }
}
