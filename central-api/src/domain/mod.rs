mod error;
mod retention;

pub mod models;
pub mod ports;
pub mod services;

pub use error::*;
pub use retention::run_activity_log_retention;
