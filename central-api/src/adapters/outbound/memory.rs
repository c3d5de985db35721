//! In-memory implementation of every outbound port, for tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        ActivityLogEntry, ActivityLogId, Controller, ControllerId, CrewAssignment, CrewMember,
        CrewMemberId, DailyNote, NewActivityLogEntry, NewObservation, NewVehicle, NoteId,
        NoteScope, ObservationId, Station, StationId, StatusChange, SubStation, SubStationId,
        Vehicle, VehicleDetails, VehicleId, VehicleObservation,
    },
    ports::outbound::{
        ActivityLogRepository, CrewRepository, NoteRepository, ObservationRepository,
        StationRepository, VehicleRepository,
    },
    ActivityLogError, FleetError, NoteError,
};

#[derive(Default)]
struct State {
    stations: Vec<Station>,
    sub_stations: Vec<SubStation>,
    controllers: Vec<Controller>,
    vehicles: Vec<Vehicle>,
    /// Stored status values that bypass `VehicleStatus`, keyed by vehicle.
    raw_statuses: HashMap<VehicleId, String>,
    observations: Vec<VehicleObservation>,
    crew_members: Vec<CrewMember>,
    assignments: Vec<CrewAssignment>,
    notes: Vec<DailyNote>,
    activity: Vec<ActivityLogEntry>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct Failures {
    status_writes: AtomicBool,
    activity_log: AtomicBool,
    note_writes: AtomicBool,
}

/// Shared in-memory store backing all repository ports.
///
/// Clones share state, so a test can keep one handle for assertions while the
/// service under test owns another.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    failures: Arc<Failures>,
    note_inserts: Arc<AtomicUsize>,
    note_updates: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(self, id: i32, name: &str) -> Self {
        self.state.write().unwrap().stations.push(Station {
            id: StationId::new(id),
            name: name.to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        });
        self
    }

    pub fn with_sub_station(self, id: i32, station_id: i32, name: &str) -> Self {
        self.state.write().unwrap().sub_stations.push(SubStation {
            id: SubStationId::new(id),
            station_id: StationId::new(station_id),
            name: name.to_string(),
        });
        self
    }

    pub fn with_controller(self, id: i32, station_id: i32, name: &str) -> Self {
        self.state.write().unwrap().controllers.push(Controller {
            id: ControllerId::new(id),
            station_id: StationId::new(station_id),
            name: name.to_string(),
            active: true,
        });
        self
    }

    pub fn with_vehicle(self, vehicle: Vehicle) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.next_id = state.next_id.max(vehicle.id.as_i32());
            state.vehicles.push(vehicle);
        }
        self
    }

    pub fn with_raw_status(self, id: i32, raw: &str) -> Self {
        self.state
            .write()
            .unwrap()
            .raw_statuses
            .insert(VehicleId::new(id), raw.to_string());
        self
    }

    pub fn with_crew_member(self, id: i32, station_id: i32, name: &str) -> Self {
        self.state.write().unwrap().crew_members.push(CrewMember {
            id: CrewMemberId::new(id),
            station_id: StationId::new(station_id),
            name: name.to_string(),
            rank: None,
        });
        self
    }

    pub fn with_note(self, note: DailyNote) -> Self {
        self.state.write().unwrap().notes.push(note);
        self
    }

    pub fn with_activity(self, entry: ActivityLogEntry) -> Self {
        self.state.write().unwrap().activity.push(entry);
        self
    }

    pub fn fail_status_writes(&self, fail: bool) {
        self.failures.status_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_activity_log(&self, fail: bool) {
        self.failures.activity_log.store(fail, Ordering::SeqCst);
    }

    pub fn fail_note_writes(&self, fail: bool) {
        self.failures.note_writes.store(fail, Ordering::SeqCst);
    }

    pub fn vehicle(&self, id: i32) -> Option<Vehicle> {
        self.state
            .read()
            .unwrap()
            .vehicles
            .iter()
            .find(|v| v.id.as_i32() == id)
            .cloned()
    }

    pub fn activity_entries(&self) -> Vec<ActivityLogEntry> {
        self.state.read().unwrap().activity.clone()
    }

    pub fn notes(&self) -> Vec<DailyNote> {
        self.state.read().unwrap().notes.clone()
    }

    pub fn note_inserts(&self) -> usize {
        self.note_inserts.load(Ordering::SeqCst)
    }

    pub fn note_updates(&self) -> usize {
        self.note_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn list_by_station(&self, station_id: &StationId) -> Result<Vec<Vehicle>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .vehicles
            .iter()
            .filter(|v| v.station_id == Some(*station_id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .vehicles
            .iter()
            .find(|v| v.id == *id)
            .cloned())
    }

    async fn raw_status(&self, id: &VehicleId) -> Result<Option<String>, FleetError> {
        let state = self.state.read().unwrap();
        if let Some(raw) = state.raw_statuses.get(id) {
            return Ok(Some(raw.clone()));
        }
        Ok(state
            .vehicles
            .iter()
            .find(|v| v.id == *id)
            .map(|v| v.status.to_string()))
    }

    async fn create(
        &self,
        vehicle: &NewVehicle,
        now: &OffsetDateTime,
    ) -> Result<Vehicle, FleetError> {
        let mut state = self.state.write().unwrap();
        let id = state.next_id();
        let mut created = Vehicle::new(id, vehicle.prefix.clone(), vehicle.category.clone(), *now)
            .with_station(vehicle.station_id);
        created.plate = vehicle.plate.clone();
        created.sub_station_id = vehicle.sub_station_id;
        state.vehicles.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &VehicleId,
        details: &VehicleDetails,
        now: &OffsetDateTime,
    ) -> Result<Option<Vehicle>, FleetError> {
        let mut state = self.state.write().unwrap();
        let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == *id) else {
            return Ok(None);
        };
        vehicle.prefix = details.prefix.clone();
        vehicle.category = details.category.clone();
        vehicle.plate = details.plate.clone();
        vehicle.station_id = details.station_id;
        vehicle.sub_station_id = details.sub_station_id;
        vehicle.updated_at = *now;
        Ok(Some(vehicle.clone()))
    }

    async fn set_status(
        &self,
        id: &VehicleId,
        change: &StatusChange,
    ) -> Result<Option<Vehicle>, FleetError> {
        if self.failures.status_writes.load(Ordering::SeqCst) {
            return Err(FleetError::storage("connection reset"));
        }
        let mut state = self.state.write().unwrap();
        let Some(vehicle) = state.vehicles.iter_mut().find(|v| v.id == *id) else {
            return Ok(None);
        };
        vehicle.status = change.status;
        vehicle.status_changed_at = vehicle.status_changed_at.max(change.changed_at);
        vehicle.updated_at = change.changed_at;
        let updated = vehicle.clone();
        state.raw_statuses.remove(id);
        Ok(Some(updated))
    }
}

#[async_trait]
impl StationRepository for InMemoryStore {
    async fn list_stations(&self) -> Result<Vec<Station>, FleetError> {
        Ok(self.state.read().unwrap().stations.clone())
    }

    async fn get_station(&self, id: &StationId) -> Result<Option<Station>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .stations
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn list_sub_stations(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<SubStation>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .sub_stations
            .iter()
            .filter(|s| s.station_id == *station_id)
            .cloned()
            .collect())
    }

    async fn list_controllers(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<Controller>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .controllers
            .iter()
            .filter(|c| c.station_id == *station_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ObservationRepository for InMemoryStore {
    async fn list_for_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<VehicleObservation>, FleetError> {
        let mut observations: Vec<_> = self
            .state
            .read()
            .unwrap()
            .observations
            .iter()
            .filter(|o| o.vehicle_id == *vehicle_id)
            .cloned()
            .collect();
        observations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(observations)
    }

    async fn latest_for_vehicles(
        &self,
        vehicle_ids: &[VehicleId],
    ) -> Result<HashMap<VehicleId, VehicleObservation>, FleetError> {
        let mut latest: HashMap<VehicleId, VehicleObservation> = HashMap::new();
        for observation in self.state.read().unwrap().observations.iter() {
            if !vehicle_ids.contains(&observation.vehicle_id) {
                continue;
            }
            let newer = latest
                .get(&observation.vehicle_id)
                .map(|current| {
                    (observation.created_at, observation.id) > (current.created_at, current.id)
                })
                .unwrap_or(true);
            if newer {
                latest.insert(observation.vehicle_id, observation.clone());
            }
        }
        Ok(latest)
    }

    async fn create(
        &self,
        observation: &NewObservation,
        now: &OffsetDateTime,
    ) -> Result<VehicleObservation, FleetError> {
        let mut state = self.state.write().unwrap();
        let created = VehicleObservation {
            id: ObservationId::new(state.next_id()),
            vehicle_id: observation.vehicle_id,
            controller_id: observation.controller_id,
            content: observation.content.clone(),
            created_at: *now,
        };
        state.observations.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl CrewRepository for InMemoryStore {
    async fn list_members(&self, station_id: &StationId) -> Result<Vec<CrewMember>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .crew_members
            .iter()
            .filter(|m| m.station_id == *station_id)
            .cloned()
            .collect())
    }

    async fn get_member(&self, id: &CrewMemberId) -> Result<Option<CrewMember>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .crew_members
            .iter()
            .find(|m| m.id == *id)
            .cloned())
    }

    async fn list_assignments(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<CrewAssignment>, FleetError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .assignments
            .iter()
            .filter(|a| a.vehicle_id == *vehicle_id)
            .cloned()
            .collect())
    }

    async fn assign(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
        role: &str,
        now: &OffsetDateTime,
    ) -> Result<CrewAssignment, FleetError> {
        let mut state = self.state.write().unwrap();
        let name = state
            .crew_members
            .iter()
            .find(|m| m.id == *crew_member_id)
            .map(|m| m.name.clone())
            .ok_or(FleetError::CrewMemberNotFound(*crew_member_id))?;
        state.assignments.retain(|a| a.crew_member_id != *crew_member_id);
        let assignment = CrewAssignment {
            crew_member_id: *crew_member_id,
            crew_member_name: name,
            vehicle_id: *vehicle_id,
            role: role.to_string(),
            assigned_at: *now,
        };
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn release(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
    ) -> Result<bool, FleetError> {
        let mut state = self.state.write().unwrap();
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.vehicle_id == *vehicle_id && a.crew_member_id == *crew_member_id));
        Ok(state.assignments.len() != before)
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn current(&self, scope: &NoteScope) -> Result<Option<DailyNote>, NoteError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .notes
            .iter()
            .filter(|n| n.scope == *scope)
            .max_by_key(|n| (n.updated_at, n.id))
            .cloned())
    }

    async fn insert(
        &self,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<DailyNote, NoteError> {
        if self.failures.note_writes.load(Ordering::SeqCst) {
            return Err(NoteError::storage("connection reset"));
        }
        self.note_inserts.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let note = DailyNote {
            id: NoteId::new(state.next_id()),
            scope: *scope,
            content: content.to_string(),
            updated_by: author,
            updated_at: *now,
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update(
        &self,
        id: &NoteId,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<Option<DailyNote>, NoteError> {
        if self.failures.note_writes.load(Ordering::SeqCst) {
            return Err(NoteError::storage("connection reset"));
        }
        self.note_updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        let Some(note) = state
            .notes
            .iter_mut()
            .find(|n| n.id == *id && n.scope == *scope)
        else {
            return Ok(None);
        };
        note.content = content.to_string();
        note.updated_by = author;
        note.updated_at = *now;
        Ok(Some(note.clone()))
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryStore {
    async fn append(
        &self,
        entry: &NewActivityLogEntry,
        now: &OffsetDateTime,
    ) -> Result<ActivityLogId, ActivityLogError> {
        if self.failures.activity_log.load(Ordering::SeqCst) {
            return Err(ActivityLogError::Storage("activity log unavailable".into()));
        }
        let mut state = self.state.write().unwrap();
        let id = ActivityLogId::new(i64::from(state.next_id()));
        let controller_name = state
            .controllers
            .iter()
            .find(|c| c.id == entry.controller_id)
            .map(|c| c.name.clone());
        state.activity.push(ActivityLogEntry {
            id,
            controller_id: entry.controller_id,
            controller_name,
            station_id: entry.station_id,
            action: entry.action.to_string(),
            detail: entry.detail.clone(),
            created_at: *now,
        });
        Ok(id)
    }

    async fn list_since(
        &self,
        station_id: &StationId,
        since: &OffsetDateTime,
    ) -> Result<Vec<ActivityLogEntry>, ActivityLogError> {
        let mut entries: Vec<_> = self
            .state
            .read()
            .unwrap()
            .activity
            .iter()
            .filter(|e| e.station_id == Some(*station_id) && e.created_at >= *since)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn purge_before(&self, cutoff: &OffsetDateTime) -> Result<u64, ActivityLogError> {
        let mut state = self.state.write().unwrap();
        let before = state.activity.len();
        state.activity.retain(|e| e.created_at >= *cutoff);
        Ok((before - state.activity.len()) as u64)
    }
}
