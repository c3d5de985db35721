mod activity_log;
mod crew;
mod fleet;
mod notes;

pub use activity_log::*;
pub use crew::*;
pub use fleet::*;
pub use notes::*;
