mod activity_log;
mod crew;
mod notes;
mod observations;
mod stations;
mod vehicles;

pub use activity_log::*;
pub use crew::*;
pub use notes::*;
pub use observations::*;
pub use stations::*;
pub use vehicles::*;
