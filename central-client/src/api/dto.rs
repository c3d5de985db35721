use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNoteRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub station_id: i32,
    /// `YYYY-MM-DD`; omitted for the station note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest<'a> {
    pub prefix: &'a str,
    pub category: &'a str,
    pub plate: Option<&'a str>,
    pub station_id: i32,
    pub sub_station_id: Option<i32>,
}

/// Fields left `None` are unchanged. `Some(None)` clears a nullable field.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_station_id: Option<Option<i32>>,
}

#[derive(Debug, Serialize)]
pub struct AddObservationRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCrewRequest<'a> {
    pub crew_member_id: i32,
    pub role: &'a str,
}
