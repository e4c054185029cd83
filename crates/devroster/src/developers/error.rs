use std::fmt;

use axum::http::StatusCode as HttpStatus;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::repository::RepositoryError;

/// Wire-level error taxonomy returned in every failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoDeveloper,
    DuplicatedMemberId,
    LevelExperienceYearsNotMatched,
    InvalidRequest,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoDeveloper => "NO_DEVELOPER",
            Self::DuplicatedMemberId => "DUPLICATED_MEMBER_ID",
            Self::LevelExperienceYearsNotMatched => "LEVEL_EXPERIENCE_YEARS_NOT_MATCHED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Default human-readable message for the code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoDeveloper => "no developer is registered under that member id",
            Self::DuplicatedMemberId => "the member id is already registered",
            Self::LevelExperienceYearsNotMatched => {
                "experience years do not match the developer level"
            }
            Self::InvalidRequest => "the request is invalid",
            Self::InternalServerError => "the server failed to process the request",
        }
    }

    pub fn http_status(&self) -> HttpStatus {
        match self {
            Self::InternalServerError => HttpStatus::INTERNAL_SERVER_ERROR,
            _ => HttpStatus::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error kind raised by the developer lifecycle: a code plus a detail message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct DeveloperError {
    code: ErrorCode,
    message: String,
}

impl DeveloperError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn no_developer() -> Self {
        Self::new(ErrorCode::NoDeveloper)
    }

    pub fn duplicated_member_id() -> Self {
        Self::new(ErrorCode::DuplicatedMemberId)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalServerError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Body sent to clients. Internal failures only expose the generic message.
    pub fn body(&self) -> ErrorBody {
        let error_message = match self.code {
            ErrorCode::InternalServerError => self.code.message().to_string(),
            _ => self.message.clone(),
        };

        ErrorBody {
            error_code: self.code,
            error_message,
        }
    }
}

impl From<RepositoryError> for DeveloperError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => Self::duplicated_member_id(),
            RepositoryError::NotFound => Self::no_developer(),
            RepositoryError::Unavailable(detail) => Self::internal(detail),
        }
    }
}

/// Uniform `{errorCode, errorMessage}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: ErrorCode,
    pub error_message: String,
}

/// Attached to error responses so the router middleware can log the full detail.
#[derive(Debug, Clone)]
pub(crate) struct ErrorReport(pub(crate) DeveloperError);

impl IntoResponse for DeveloperError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        let body = self.body();
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport(self));
        response
    }
}
