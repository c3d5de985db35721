use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyNote,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

use crate::domain::{ActivityLogError, FleetError, NoteError};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::VehicleNotFound(_)
            | FleetError::StationNotFound(_)
            | FleetError::CrewMemberNotFound(_) => Self::not_found(err.to_string()),
            FleetError::InvalidInput(_) => Self::bad_request(err.to_string()),
            FleetError::Malformed(message) => {
                tracing::error!("Malformed fleet record: {}", message);
                Self::internal("malformed record")
            }
            FleetError::Storage(message) => {
                tracing::error!("Fleet operation failed: {}", message);
                Self::internal("fleet operation failed")
            }
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(_) => Self::not_found(err.to_string()),
            NoteError::EmptyContent => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::EmptyNote)
            }
            NoteError::Storage(message) => {
                tracing::error!("Note operation failed: {}", message);
                Self::internal("note operation failed")
            }
        }
    }
}

impl From<ActivityLogError> for ApiError {
    fn from(err: ActivityLogError) -> Self {
        match err {
            ActivityLogError::Storage(message) => {
                tracing::error!("Activity log read failed: {}", message);
                Self::internal("activity log unavailable")
            }
        }
    }
}
