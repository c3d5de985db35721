use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{
        PostgresActivityLogRepository, PostgresCrewRepository, PostgresNoteRepository,
        PostgresObservationRepository, PostgresStationRepository, PostgresVehicleRepository,
    },
    config::Settings,
    domain::{
        models::Locale,
        ports::inbound::{ActivityLogService, CrewService, FleetService, NoteService},
        services::{
            ActivityLogServiceImpl, AuditTrail, CrewServiceImpl, FleetServiceImpl,
            NoteServiceImpl,
        },
    },
};

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: Arc<dyn FleetService>,
    pub crew_service: Arc<dyn CrewService>,
    pub note_service: Arc<dyn NoteService>,
    pub activity_log_service: Arc<dyn ActivityLogService>,
    /// Language of status labels in responses.
    pub locale: Locale,
}

impl AppState {
    pub fn new(
        fleet_service: Arc<dyn FleetService>,
        crew_service: Arc<dyn CrewService>,
        note_service: Arc<dyn NoteService>,
        activity_log_service: Arc<dyn ActivityLogService>,
        locale: Locale,
    ) -> Self {
        Self {
            fleet_service,
            crew_service,
            note_service,
            activity_log_service,
            locale,
        }
    }

    /// Wire every service to its PostgreSQL repository.
    pub fn from_pool(pool: PgPool, settings: &Settings) -> Self {
        let locale = settings.application.locale;
        let vehicles = Arc::new(PostgresVehicleRepository::new(pool.clone()));
        let activity_log = Arc::new(PostgresActivityLogRepository::new(pool.clone()));
        let audit = AuditTrail::new(activity_log.clone(), locale);

        let fleet_service = FleetServiceImpl::new(
            Arc::clone(&vehicles),
            Arc::new(PostgresStationRepository::new(pool.clone())),
            Arc::new(PostgresObservationRepository::new(pool.clone())),
            audit.clone(),
        );
        let crew_service = CrewServiceImpl::new(
            Arc::new(PostgresCrewRepository::new(pool.clone())),
            vehicles,
            audit.clone(),
        );
        let note_service = NoteServiceImpl::new(Arc::new(PostgresNoteRepository::new(pool)), audit);
        let activity_log_service = ActivityLogServiceImpl::new(
            activity_log,
            settings.activity_log.window_hours,
            settings.activity_log.retention_days,
        );

        Self::new(
            Arc::new(fleet_service),
            Arc::new(crew_service),
            Arc::new(note_service),
            Arc::new(activity_log_service),
            locale,
        )
    }
}
