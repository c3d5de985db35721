mod activity;
mod board;
mod crew;
mod ids;
mod note;
mod observation;
mod station;
mod status;
mod vehicle;

pub use activity::*;
pub use board::*;
pub use crew::*;
pub use ids::*;
pub use note::*;
pub use observation::*;
pub use station::*;
pub use status::*;
pub use vehicle::*;
