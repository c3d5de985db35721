use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use time::{macros::format_description, Date};

use crate::api::dto::{
    AddObservationRequest, AssignCrewRequest, CreateVehicleRequest, SaveNoteRequest,
    UpdateVehicleRequest,
};
use crate::types::{
    ActivityEntry, Board, Controller, CrewAssignment, CrewMember, CurrentNote, Note, NoteScope,
    Observation, Selection, Station, StatusLabel, SubStation, Vehicle, VehicleDetail,
};

const STATION_HEADER: &str = "x-station-id";
const CONTROLLER_HEADER: &str = "x-controller-id";

/// One of the four status buttons on a vehicle card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Advance,
    Lower,
    Reserve,
    Restore,
}

impl StatusAction {
    fn path_segment(&self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Lower => "lower",
            Self::Reserve => "reserve",
            Self::Restore => "restore",
        }
    }
}

pub(crate) fn format_date(date: Date) -> Result<String> {
    date.format(format_description!("[year]-[month]-[day]"))
        .context("Failed to format date")
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for path {}", path))
    }

    fn with_selection(request: RequestBuilder, selection: &Selection) -> RequestBuilder {
        let request = match selection.station_id {
            Some(id) => request.header(STATION_HEADER, id.to_string()),
            None => request,
        };
        match selection.controller_id {
            Some(id) => request.header(CONTROLLER_HEADER, id.to_string()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {}", call_name))?;

        response
            .error_for_status_ref()
            .with_context(|| format!("{} returned error", call_name))?;

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", call_name))
    }

    // ------------------------------------------------------------------------
    // Reference data
    // ------------------------------------------------------------------------

    pub async fn stations(&self) -> Result<Vec<Station>> {
        self.get_json(self.client.get(self.endpoint("/stations")?), "GET /stations")
            .await
    }

    pub async fn sub_stations(&self, station_id: i32) -> Result<Vec<SubStation>> {
        let path = format!("/stations/{station_id}/sub-stations");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    pub async fn controllers(&self, station_id: i32) -> Result<Vec<Controller>> {
        let path = format!("/stations/{station_id}/controllers");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    pub async fn crew_members(&self, station_id: i32) -> Result<Vec<CrewMember>> {
        let path = format!("/stations/{station_id}/crew");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    pub async fn statuses(&self) -> Result<Vec<StatusLabel>> {
        self.get_json(self.client.get(self.endpoint("/statuses")?), "GET /statuses")
            .await
    }

    pub async fn activity(&self, station_id: i32) -> Result<Vec<ActivityEntry>> {
        let path = format!("/stations/{station_id}/activity");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    // ------------------------------------------------------------------------
    // Board and vehicles
    // ------------------------------------------------------------------------

    pub async fn board(&self, station_id: i32) -> Result<Board> {
        let path = format!("/stations/{station_id}/board");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    pub async fn vehicle(&self, vehicle_id: i32) -> Result<VehicleDetail> {
        let path = format!("/vehicles/{vehicle_id}");
        self.get_json(self.client.get(self.endpoint(&path)?), &format!("GET {path}"))
            .await
    }

    pub async fn create_vehicle(
        &self,
        selection: &Selection,
        body: &CreateVehicleRequest<'_>,
    ) -> Result<Vehicle> {
        let request = self.client.post(self.endpoint("/vehicles")?).json(body);
        self.get_json(Self::with_selection(request, selection), "POST /vehicles")
            .await
    }

    pub async fn update_vehicle(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        body: &UpdateVehicleRequest,
    ) -> Result<Vehicle> {
        let path = format!("/vehicles/{vehicle_id}");
        let request = self.client.put(self.endpoint(&path)?).json(body);
        self.get_json(Self::with_selection(request, selection), &format!("PUT {path}"))
            .await
    }

    pub async fn status_action(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        action: StatusAction,
    ) -> Result<Vehicle> {
        let path = format!("/vehicles/{vehicle_id}/status/{}", action.path_segment());
        let request = self.client.post(self.endpoint(&path)?);
        self.get_json(Self::with_selection(request, selection), &format!("POST {path}"))
            .await
    }

    pub async fn add_observation(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        content: &str,
    ) -> Result<Observation> {
        let path = format!("/vehicles/{vehicle_id}/observations");
        let request = self
            .client
            .post(self.endpoint(&path)?)
            .json(&AddObservationRequest { content });
        self.get_json(Self::with_selection(request, selection), &format!("POST {path}"))
            .await
    }

    pub async fn assign_crew(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        crew_member_id: i32,
        role: &str,
    ) -> Result<CrewAssignment> {
        let path = format!("/vehicles/{vehicle_id}/crew");
        let request = self
            .client
            .post(self.endpoint(&path)?)
            .json(&AssignCrewRequest {
                crew_member_id,
                role,
            });
        self.get_json(Self::with_selection(request, selection), &format!("POST {path}"))
            .await
    }

    pub async fn release_crew(
        &self,
        selection: &Selection,
        vehicle_id: i32,
        crew_member_id: i32,
    ) -> Result<()> {
        let path = format!("/vehicles/{vehicle_id}/crew/{crew_member_id}");
        let request = self.client.delete(self.endpoint(&path)?);
        self.send(Self::with_selection(request, selection), &format!("DELETE {path}"))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------------

    pub async fn current_note(&self, scope: &NoteScope) -> Result<Option<Note>> {
        let request = match scope {
            NoteScope::Daily { station_id, date } => self
                .client
                .get(self.endpoint(&format!("/stations/{station_id}/notes/daily"))?)
                .query(&[("date", format_date(*date)?)]),
            NoteScope::Station { station_id } => self
                .client
                .get(self.endpoint(&format!("/stations/{station_id}/notes/station"))?),
        };

        let current: CurrentNote = self.get_json(request, "GET note").await?;
        Ok(current.note)
    }

    /// Save a note: update `id` when known, insert otherwise.
    pub async fn save_note(
        &self,
        selection: &Selection,
        id: Option<i32>,
        scope: &NoteScope,
        content: &str,
    ) -> Result<Note> {
        let body = SaveNoteRequest {
            id,
            station_id: scope.station_id(),
            date: scope.date().map(format_date).transpose()?,
            content,
        };
        let request = self.client.put(self.endpoint("/notes")?).json(&body);
        self.get_json(Self::with_selection(request, selection), "PUT /notes")
            .await
    }
}
