//! Error types for campus-service

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Not connected with user {0}")]
    NotConnected(uuid::Uuid),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid group: {0}")]
    InvalidGroup(String),

    #[error("Message content is empty")]
    EmptyContent,

    #[error("User {0} is not a participant of this chat")]
    NotParticipant(uuid::Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_)
            | ServiceError::InvalidRange(_)
            | ServiceError::InvalidGroup(_)
            | ServiceError::EmptyContent => 400,
            ServiceError::Unauthorized => 401,
            ServiceError::NotConnected(_) | ServiceError::NotParticipant(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Config(_) | ServiceError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "INVALID_INPUT",
            ServiceError::InvalidRange(_) => "INVALID_RANGE",
            ServiceError::NotConnected(_) => "NOT_CONNECTED",
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::InvalidGroup(_) => "INVALID_GROUP",
            ServiceError::EmptyContent => "EMPTY_CONTENT",
            ServiceError::NotParticipant(_) => "NOT_PARTICIPANT",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::Config(_) => "CONFIG_ERROR",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "InvalidInputError",
            ServiceError::InvalidRange(_) => "InvalidRangeError",
            ServiceError::NotConnected(_) => "NotConnectedError",
            ServiceError::NotFound(_) => "NotFoundError",
            ServiceError::InvalidGroup(_) => "InvalidGroupError",
            ServiceError::EmptyContent => "EmptyContentError",
            ServiceError::NotParticipant(_) => "NotParticipantError",
            ServiceError::Conflict(_) => "ConflictError",
            ServiceError::Unauthorized => "UnauthorizedError",
            ServiceError::Config(_) => "ConfigError",
            ServiceError::Internal(_) => "InternalError",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            status: self.status_code(),
            code: self.error_code().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{kind} {id}"))
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    pub code: String,
    pub timestamp: String,
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(ServiceError::status_code(self))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if ServiceError::status_code(self) >= 500 {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(ResponseError::status_code(self)).json(self.to_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(ServiceError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(ServiceError::InvalidRange("x".into()).status_code(), 400);
        assert_eq!(ServiceError::NotConnected(Uuid::nil()).status_code(), 403);
        assert_eq!(ServiceError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ServiceError::InvalidGroup("x".into()).status_code(), 400);
        assert_eq!(ServiceError::EmptyContent.status_code(), 400);
        assert_eq!(ServiceError::Conflict("x".into()).status_code(), 409);
        assert_eq!(ServiceError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_error_response_body() {
        let err = ServiceError::not_found("post", "abc");
        let body = err.to_response();
        assert_eq!(body.status, 404);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.error, "NotFoundError");
        assert_eq!(body.message, "Not found: post abc");
    }

    #[test]
    fn test_actix_status_mapping() {
        let err = ServiceError::NotConnected(Uuid::new_v4());
        assert_eq!(ResponseError::status_code(&err), StatusCode::FORBIDDEN);
        assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
    }
}
