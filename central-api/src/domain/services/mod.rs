mod activity_log;
mod audit;
mod crew;
mod fleet;
mod notes;

pub use activity_log::ActivityLogServiceImpl;
pub use audit::AuditTrail;
pub use crew::CrewServiceImpl;
pub use fleet::FleetServiceImpl;
pub use notes::NoteServiceImpl;

#[cfg(test)]
pub(crate) mod test_util {
    /// Let spawned audit writes run to completion.
    pub async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }
}
