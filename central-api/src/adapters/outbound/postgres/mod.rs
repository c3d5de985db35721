mod activity_log;
mod crew;
mod notes;
mod observations;
mod stations;
mod vehicles;

pub use activity_log::PostgresActivityLogRepository;
pub use crew::PostgresCrewRepository;
pub use notes::PostgresNoteRepository;
pub use observations::PostgresObservationRepository;
pub use stations::PostgresStationRepository;
pub use vehicles::PostgresVehicleRepository;
