use thiserror::Error;

use super::models::{CrewMemberId, NoteId, StationId, VehicleId};

/// Errors from fleet operations (vehicles, statuses, observations, crew).
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error("station {0} not found")]
    StationNotFound(StationId),
    #[error("crew member {0} not found")]
    CrewMemberNotFound(CrewMemberId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl FleetError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Errors from note loading and saving.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note {0} not found")]
    NotFound(NoteId),
    #[error("note content is empty")]
    EmptyContent,
    #[error("storage error: {0}")]
    Storage(String),
}

impl NoteError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Errors from the activity log store.
#[derive(Debug, Error)]
pub enum ActivityLogError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for FleetError {
    fn from(e: sqlx::Error) -> Self {
        FleetError::Storage(e.to_string())
    }
}

impl From<sqlx::Error> for NoteError {
    fn from(e: sqlx::Error) -> Self {
        NoteError::Storage(e.to_string())
    }
}

impl From<sqlx::Error> for ActivityLogError {
    fn from(e: sqlx::Error) -> Self {
        ActivityLogError::Storage(e.to_string())
    }
}
