use crate::state::AppState;
use crate::views;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use commander_core::architecture::{self, Architecture};
use commander_core::catalog::Scenario;
use commander_core::incidents::BoardSummary;
use commander_core::stepper::StepController;
use serde::Deserialize;
use tracing::warn;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/architecture", get(architecture_view))
        .route("/demo", get(demo))
        .route("/incidents", get(incidents))
        .route("/api/scenarios", get(scenarios_json))
        .route("/api/architecture", get(architecture_json))
        .route("/api/incidents", get(incidents_json))
        .route("/api/incidents/select", post(select_incident))
        .fallback(not_found)
        .with_state(state)
}

#[derive(Clone, Debug, Deserialize)]
pub struct SelectIncident {
    pub id: String,
}

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(views::home(&state.catalog))
}

async fn architecture_view() -> Html<String> {
    Html(views::architecture(&architecture::architecture()))
}

/// Every visit starts a fresh session at the first scenario's first step.
async fn demo(State(state): State<AppState>) -> Html<String> {
    let ctl = StepController::new(state.catalog.clone());
    Html(views::demo(&ctl))
}

async fn incidents(State(state): State<AppState>) -> Html<String> {
    Html(views::incidents(&state.board_summary()))
}

async fn scenarios_json(State(state): State<AppState>) -> Json<Vec<Scenario>> {
    Json(state.catalog.scenarios().to_vec())
}

async fn architecture_json() -> Json<Architecture> {
    Json(architecture::architecture())
}

async fn incidents_json(State(state): State<AppState>) -> Json<BoardSummary> {
    Json(state.board_summary())
}

async fn select_incident(
    State(state): State<AppState>,
    Json(req): Json<SelectIncident>,
) -> StatusCode {
    match state.select_incident(&req.id) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(err) if err.is_unknown_id() => {
            warn!("rejected incident selection: {err}");
            StatusCode::NOT_FOUND
        }
        Err(err) => {
            warn!("incident selection failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::not_found(uri.path())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::builtin().expect("state")
    }

    #[tokio::test]
    async fn demo_starts_at_first_step() {
        let Html(html) = demo(State(state())).await;
        assert!(html.contains("Scenario 1: CPU Spike"));
        assert_eq!(html.matches("<small>Step ").count(), 1);
    }

    #[tokio::test]
    async fn select_known_incident_updates_board() {
        let state = state();
        let status = select_incident(
            State(state.clone()),
            Json(SelectIncident {
                id: "INC-2042".into(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(summary) = incidents_json(State(state)).await;
        assert_eq!(summary.selected_id, "INC-2042");
        assert_eq!(summary.active_count + summary.resolved_today, summary.incidents.len());
    }

    #[tokio::test]
    async fn select_unknown_incident_is_not_found() {
        let state = state();
        let status = select_incident(
            State(state.clone()),
            Json(SelectIncident {
                id: "INC-0000".into(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.board_summary().selected_id, "INC-2041");
    }

    #[tokio::test]
    async fn scenarios_json_lists_catalog_in_order() {
        let Json(scenarios) = scenarios_json(State(state())).await;
        let ids: Vec<_> = scenarios.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["cpu-spike", "memory-leak", "cascading-failure"]);
    }

    #[tokio::test]
    async fn ticks_show_up_in_board_summary() {
        let state = state();
        state.tick();
        state.tick();
        let Json(summary) = incidents_json(State(state)).await;
        assert_eq!(summary.ticks, 2);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (status, Html(html)) = not_found("/missing".parse().expect("uri")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("/missing"));
    }

    #[test]
    fn router_builds() {
        let _ = router(state());
    }
}
