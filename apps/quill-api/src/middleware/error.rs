//! Error handling - RFC 7807 compliant responses.

use actix_web::{
    HttpMessage, HttpRequest, HttpResponse, ResponseError,
    dev::ServiceResponse,
    error::JsonPayloadError,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
};
use quill_core::error::{DomainError, RepoError};
use quill_shared::ErrorResponse;
use std::fmt;

use crate::observability::RequestId;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ServiceUnavailable(detail) => {
                tracing::error!("Store unavailable: {}", detail);
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(self.problem())
    }
}

impl AppError {
    /// Problem details body for this error. Server-side details are not exposed.
    pub fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::ServiceUnavailable(_) => ErrorResponse::service_unavailable(),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        }
    }
}

/// Error handler middleware that stamps `AppError` bodies with the request
/// path (`instance`) and the request ID. Must be wrapped inside
/// `RequestIdMiddleware` so the ID is already in the request extensions.
pub fn problem_details<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(add_problem_context)
}

fn add_problem_context<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let Some(problem) = res
        .response()
        .error()
        .and_then(|err| err.as_error::<AppError>())
        .map(AppError::problem)
    else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let mut problem = problem.with_instance(res.request().path());
    if let Some(id) = res.request().extensions().get::<RequestId>() {
        problem = problem.with_request_id(id.as_str());
    }

    let status = res.status();
    let res = res.into_response(HttpResponse::build(status).json(problem));

    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => AppError::ServiceUnavailable(msg),
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Turns JSON body extraction failures into problem-details 400s.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
