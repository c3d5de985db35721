pub(crate) mod error;
pub(crate) mod notes;
pub(crate) mod stations;
pub(crate) mod statuses;
pub(crate) mod vehicles;

pub(crate) use error::ApiError;
