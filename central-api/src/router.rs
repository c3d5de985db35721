use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    adapters::inbound::http::{CONTROLLER_HEADER, STATION_HEADER},
    app_state::AppState,
    routes,
};

pub fn create(app_state: AppState, app_url: String) -> Router<()> {
    let app = Router::new()
        .route("/", get(|| async { "Central fleet board" }))
        .nest("/stations", routes::stations::router())
        .nest("/vehicles", routes::vehicles::router())
        .nest("/notes", routes::notes::router())
        .nest("/statuses", routes::statuses::router());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(STATION_HEADER),
            HeaderName::from_static(CONTROLLER_HEADER),
        ])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use time::macros::datetime;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryStore,
        domain::{
            models::{Locale, Vehicle, VehicleStatus},
            services::{
                test_util::settle, ActivityLogServiceImpl, AuditTrail, CrewServiceImpl,
                FleetServiceImpl, NoteServiceImpl,
            },
        },
    };

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_station(1, "Central")
            .with_sub_station(10, 1, "Destacamento A")
            .with_controller(7, 1, "Silva")
            .with_crew_member(100, 1, "Costa")
            .with_vehicle(
                Vehicle::new(1, "ABT-01", "ABT", datetime!(2026-01-01 08:00 UTC)).with_station(1),
            )
            .with_vehicle(
                Vehicle::new(2, "VUCI-02", "VUCI", datetime!(2026-01-01 08:00 UTC))
                    .with_station(1)
                    .with_sub_station(10)
                    .with_status(VehicleStatus::Down),
            )
    }

    fn app(store: &InMemoryStore) -> Router<()> {
        let shared = Arc::new(store.clone());
        let audit = AuditTrail::new(shared.clone(), Locale::En);
        let state = AppState::new(
            Arc::new(FleetServiceImpl::new(
                shared.clone(),
                shared.clone(),
                shared.clone(),
                audit.clone(),
            )),
            Arc::new(CrewServiceImpl::new(shared.clone(), shared.clone(), audit.clone())),
            Arc::new(NoteServiceImpl::new(shared.clone(), audit)),
            Arc::new(ActivityLogServiceImpl::new(shared, 24, 30)),
            Locale::En,
        );
        create(state, "http://localhost:5173".into())
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(STATION_HEADER, "1")
            .header(CONTROLLER_HEADER, "7");
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn advance_returns_next_status_with_label() {
        let store = store();

        let response = app(&store)
            .oneshot(request("POST", "/vehicles/1/status/advance", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "en_route");
        assert_eq!(body["statusLabel"], "En Route");
    }

    #[tokio::test]
    async fn advance_is_logged_and_visible_in_activity() {
        let store = store();
        let app = app(&store);

        app.clone()
            .oneshot(request("POST", "/vehicles/1/status/advance", None))
            .await
            .unwrap();
        settle().await;

        let response = app
            .oneshot(request("GET", "/stations/1/activity", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body[0]["action"], "Status changed");
        assert_eq!(body[0]["controllerName"], "Silva");
        assert_eq!(body[0]["detail"], "ABT-01 — En Route");
    }

    #[tokio::test]
    async fn restore_brings_lowered_vehicle_back() {
        let store = store();

        let response = app(&store)
            .oneshot(request("POST", "/vehicles/2/status/restore", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "available");
    }

    #[tokio::test]
    async fn status_write_failure_is_a_server_error() {
        let store = store();
        store.fail_status_writes(true);

        let response = app(&store)
            .oneshot(request("POST", "/vehicles/1/status/lower", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(store.vehicle(1).unwrap().status, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn unknown_vehicle_is_404() {
        let response = app(&store())
            .oneshot(request("POST", "/vehicles/99/status/advance", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_operator_header_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/vehicles/1/status/advance")
            .header(CONTROLLER_HEADER, "silva")
            .body(Body::empty())
            .unwrap();

        let response = app(&store()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn board_groups_by_category_and_sub_station() {
        let response = app(&store())
            .oneshot(request("GET", "/stations/1/board", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["station"]["name"], "Central");
        let categories = body["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["category"], "ABT");
        assert!(categories[0]["groups"][0]["subStation"].is_null());
        assert_eq!(
            categories[1]["groups"][0]["subStation"]["name"],
            "Destacamento A"
        );
        assert_eq!(categories[1]["groups"][0]["vehicles"][0]["prefix"], "VUCI-02");
    }

    #[tokio::test]
    async fn note_save_then_read_back() {
        let store = store();
        let app = app(&store);

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/notes",
                Some(json!({ "stationId": 1, "date": "2026-10-19", "content": "Turno A" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved = json_body(response).await;

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/notes",
                Some(json!({
                    "id": saved["id"],
                    "stationId": 1,
                    "date": "2026-10-19",
                    "content": "Turno A e B"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["id"], saved["id"]);

        let response = app
            .oneshot(request("GET", "/stations/1/notes/daily?date=2026-10-19", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["note"]["content"], "Turno A e B");
        assert_eq!(body["note"]["date"], "2026-10-19");
        assert_eq!(store.note_inserts(), 1);
    }

    #[tokio::test]
    async fn blank_note_is_rejected() {
        let response = app(&store())
            .oneshot(request(
                "PUT",
                "/notes",
                Some(json!({ "stationId": 1, "content": "   " })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "EMPTY_NOTE");
    }

    #[tokio::test]
    async fn station_note_is_empty_before_first_save() {
        let response = app(&store())
            .oneshot(request("GET", "/stations/1/notes/station", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["note"].is_null());
    }

    #[tokio::test]
    async fn bad_note_date_is_rejected() {
        let response = app(&store())
            .oneshot(request("GET", "/stations/1/notes/daily?date=19-10-2026", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn vehicle_detail_includes_crew_and_observations() {
        let store = store();
        let app = app(&store);

        app.clone()
            .oneshot(request(
                "POST",
                "/vehicles/1/crew",
                Some(json!({ "crewMemberId": 100, "role": "Chefe" })),
            ))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/vehicles/1/observations",
                Some(json!({ "content": "Sem combustível" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(request("GET", "/vehicles/1", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["vehicle"]["prefix"], "ABT-01");
        assert_eq!(body["crew"][0]["crewMemberName"], "Costa");
        assert_eq!(body["observations"][0]["content"], "Sem combustível");
    }

    #[tokio::test]
    async fn create_vehicle_starts_available() {
        let response = app(&store())
            .oneshot(request(
                "POST",
                "/vehicles",
                Some(json!({ "prefix": "VTTU-05", "category": "VTTU", "stationId": 1 })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["status"], "available");
        assert_eq!(body["statusLabel"], "Available");
    }

    #[tokio::test]
    async fn update_keeps_absent_fields_and_clears_null_ones() {
        let store = store();
        let app = app(&store);

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/vehicles/2",
                Some(json!({ "prefix": "VUCI-22" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["prefix"], "VUCI-22");
        assert_eq!(body["subStationId"], 10);

        let response = app
            .oneshot(request(
                "PUT",
                "/vehicles/2",
                Some(json!({ "subStationId": null })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["prefix"], "VUCI-22");
        assert!(body["subStationId"].is_null());
    }

    #[tokio::test]
    async fn statuses_lists_full_vocabulary() {
        let response = app(&store())
            .oneshot(request("GET", "/statuses", None))
            .await
            .unwrap();

        let body = json_body(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[1]["status"], "en_route");
        assert_eq!(entries[1]["labelPt"], "QTI");
        assert_eq!(entries[1]["cyclePosition"], 1);
        assert_eq!(entries[5]["status"], "down");
        assert_eq!(entries[5]["lowered"], true);
    }
}
