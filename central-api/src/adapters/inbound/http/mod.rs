mod operator;
mod responses;

pub use operator::{Operator, CONTROLLER_HEADER, STATION_HEADER};
pub use responses::*;
