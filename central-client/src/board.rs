//! Client-side view of a station's fleet board.
//!
//! Status changes are never applied optimistically: a vehicle keeps the
//! status the server last returned, and its [`SyncState`] tells the front-end
//! whether a change is in flight or failed.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    api::{ApiClient, StatusAction},
    notice::{self, Notice, NoticeTx},
    types::{Board, Selection, SyncState, Vehicle},
};

#[async_trait]
pub trait FleetApi: Send + Sync + 'static {
    async fn load_board(&self, station_id: i32) -> Result<Board>;

    async fn change_status(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        action: StatusAction,
    ) -> Result<Vehicle>;
}

#[async_trait]
impl FleetApi for ApiClient {
    async fn load_board(&self, station_id: i32) -> Result<Board> {
        self.board(station_id).await
    }

    async fn change_status(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        action: StatusAction,
    ) -> Result<Vehicle> {
        self.status_action(selection, vehicle_id, action).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedVehicle {
    pub vehicle: Vehicle,
    pub sync: SyncState,
}

pub struct BoardSession<A> {
    api: Arc<A>,
    selection: Selection,
    notices: NoticeTx,
    board: Option<Board>,
    vehicles: HashMap<i32, TrackedVehicle>,
}

impl<A: FleetApi> BoardSession<A> {
    pub fn new(api: Arc<A>, selection: Selection, notices: NoticeTx) -> Self {
        Self {
            api,
            selection,
            notices,
            board: None,
            vehicles: HashMap::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Switch station or controller. Vehicles of the previous station are
    /// dropped; call [`refresh`](Self::refresh) to load the new board.
    pub fn select(&mut self, selection: Selection) {
        if selection.station_id != self.selection.station_id {
            self.board = None;
            self.vehicles.clear();
        }
        self.selection = selection;
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn vehicle(&self, vehicle_id: i32) -> Option<&TrackedVehicle> {
        self.vehicles.get(&vehicle_id)
    }

    /// Reload the board of the selected station.
    ///
    /// A failed read is logged and the previous board is kept.
    pub async fn refresh(&mut self) {
        let Some(station_id) = self.selection.station_id else {
            return;
        };

        match self.api.load_board(station_id).await {
            Ok(board) => {
                let mut vehicles = HashMap::new();
                for entry in board.vehicles() {
                    // A failed change stays visible until the user retries.
                    let sync = match self.vehicles.get(&entry.vehicle.id) {
                        Some(tracked) if tracked.sync == SyncState::Failed => SyncState::Failed,
                        _ => SyncState::Synced,
                    };
                    vehicles.insert(
                        entry.vehicle.id,
                        TrackedVehicle {
                            vehicle: entry.vehicle.clone(),
                            sync,
                        },
                    );
                }
                self.vehicles = vehicles;
                self.board = Some(board);
            }
            Err(e) => {
                tracing::warn!(station_id, "Failed to load board: {:#}", e);
            }
        }
    }

    /// Send a status change for `vehicle_id` and record the outcome.
    ///
    /// On success the confirmed vehicle replaces the displayed one and the
    /// board is refetched.
    pub async fn apply(&mut self, vehicle_id: i32, action: StatusAction) -> SyncState {
        if let Some(tracked) = self.vehicles.get_mut(&vehicle_id) {
            tracked.sync = SyncState::Pending;
        }

        let result = self
            .api
            .change_status(&self.selection, vehicle_id, action)
            .await;

        match result {
            Ok(vehicle) => {
                self.replace_on_board(&vehicle);
                self.vehicles.insert(
                    vehicle_id,
                    TrackedVehicle {
                        vehicle,
                        sync: SyncState::Synced,
                    },
                );
                self.refresh().await;
                SyncState::Synced
            }
            Err(e) => {
                tracing::warn!(vehicle_id, ?action, "Status change failed: {:#}", e);
                if let Some(tracked) = self.vehicles.get_mut(&vehicle_id) {
                    tracked.sync = SyncState::Failed;
                }
                notice::publish(
                    &self.notices,
                    Notice::error("Could not update vehicle status"),
                );
                SyncState::Failed
            }
        }
    }

    fn replace_on_board(&mut self, vehicle: &Vehicle) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let entry = board
            .categories
            .iter_mut()
            .flat_map(|c| c.groups.iter_mut())
            .flat_map(|g| g.vehicles.iter_mut())
            .find(|v| v.vehicle.id == vehicle.id);
        if let Some(entry) = entry {
            entry.vehicle = vehicle.clone();
        }
    }
}
