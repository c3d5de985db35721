use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    domain::models::{ControllerId, OperatorContext, StationId},
    routes::ApiError,
};

pub const STATION_HEADER: &str = "x-station-id";
pub const CONTROLLER_HEADER: &str = "x-controller-id";

/// Extracts the caller's explicit station/controller selection from the
/// `x-station-id` and `x-controller-id` headers.
///
/// Both headers are optional. A header that is present but not a valid id is
/// rejected with 400 rather than silently ignored.
#[derive(Debug, Clone, Copy)]
pub struct Operator(pub OperatorContext);

#[async_trait]
impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let station_id = header_id(parts, STATION_HEADER)?.map(StationId::new);
        let controller_id = header_id(parts, CONTROLLER_HEADER)?.map(ControllerId::new);

        Ok(Operator(OperatorContext::new(station_id, controller_id)))
    }
}

fn header_id(parts: &Parts, name: &str) -> Result<Option<i32>, ApiError> {
    let Some(value) = parts.headers.get(name) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("invalid {name} header")))
}
