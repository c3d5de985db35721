//! Best-effort activity logging.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::domain::{
    models::{ActivityAction, Locale, NewActivityLogEntry, OperatorContext, StationId},
    ports::outbound::ActivityLogRepository,
};

/// Records audit entries without ever blocking or failing the caller.
///
/// [`AuditTrail::record`] is synchronous and returns nothing: the
/// write runs on a spawned task and a failure is only logged. Nothing is
/// recorded unless the operator context names a controller.
#[derive(Clone)]
pub struct AuditTrail {
    repository: Arc<dyn ActivityLogRepository>,
    locale: Locale,
}

impl AuditTrail {
    pub fn new(repository: Arc<dyn ActivityLogRepository>, locale: Locale) -> Self {
        Self { repository, locale }
    }

    /// Locale used for status labels in entry details.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Fire-and-forget append. Must be called from within a tokio runtime.
    pub fn record(
        &self,
        ctx: &OperatorContext,
        fallback_station: Option<StationId>,
        action: ActivityAction,
        detail: Option<String>,
    ) {
        let Some(controller_id) = ctx.controller_id else {
            tracing::trace!(%action, "no controller selected, skipping activity log");
            return;
        };

        let mut entry = NewActivityLogEntry::new(controller_id, action)
            .with_station(ctx.station_id.or(fallback_station));
        if let Some(detail) = detail {
            entry = entry.with_detail(detail);
        }

        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(e) = repository.append(&entry, &OffsetDateTime::now_utc()).await {
                tracing::warn!(
                    controller_id = %entry.controller_id,
                    action = %entry.action,
                    "Failed to append activity log entry: {}",
                    e
                );
            }
        });
    }
}
