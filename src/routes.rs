use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Router, routing::get};
use serde::Deserialize;
use tracing::{info, warn};

use crate::dropdown::fill_dropdowns;
use crate::error::ConsoleError;
use crate::grid::render_grid;
use crate::models::EntityKind;
use crate::services::form::form_fields;
use crate::services::timetable::{load_page, resolve_filter};
use crate::services::{FormValues, panels};
use crate::state::AppState;
use crate::toast::ToastKind;
use crate::views;

pub const MISSING_TIMETABLE_ID: &str = "No timetable ID provided in URL";

#[derive(Debug, Deserialize)]
struct TimetableQueryParams {
    id: Option<String>,
    by: Option<String>,
    entity: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/panels/{kind}", get(show_panel).post(submit_panel))
        .route("/generate", get(show_generate).post(run_generate))
        .route("/timetable", get(show_timetable))
        .route("/timetable/latest", get(latest_timetable))
        .route("/timetables", get(list_timetables))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn index() -> Redirect {
    Redirect::to(&panel_href(EntityKind::Departments))
}

fn panel_href(kind: EntityKind) -> String {
    format!("/panels/{}", kind.slug())
}

async fn render_panel(state: &AppState, kind: EntityKind, values: &FormValues) -> String {
    let view = panels::list(&state.api, kind).await;
    let dropdowns = fill_dropdowns(&state.cache.snapshot());
    let fields = form_fields(kind, &dropdowns, values);
    views::panel_page(&panels::sidebar(kind), &view, &fields, &state.toaster.active()).into_string()
}

async fn show_panel(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Html<String>, ConsoleError> {
    let kind: EntityKind = kind.parse()?;
    Ok(Html(render_panel(&state, kind, &FormValues::default()).await))
}

async fn submit_panel(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Form(values): Form<FormValues>,
) -> Result<Response, ConsoleError> {
    let kind: EntityKind = kind.parse()?;

    match panels::create(&state.api, &state.cache, kind, &values).await {
        Ok(()) => Ok(Redirect::to(&panel_href(kind)).into_response()),
        Err(e) => {
            warn!("create {} rejected: {}", kind, e);
            // API failures are toasted by the client already.
            if let ConsoleError::Validation(msg) = &e {
                state.toaster.notify(msg.clone(), ToastKind::Error);
            }
            let page = render_panel(&state, kind, &values).await;
            Ok((e.status_code(), Html(page)).into_response())
        }
    }
}

async fn show_generate(State(state): State<AppState>) -> Html<String> {
    Html(views::generate_page(&state.toaster.active()).into_string())
}

async fn run_generate(State(state): State<AppState>) -> Response {
    match state.api.generate().await {
        Ok(generated) => {
            info!("generated timetable #{}", generated.timetable_id);
            state.toaster.notify(generated.message, ToastKind::Success);
            Redirect::to(&format!("/timetable?id={}", generated.timetable_id)).into_response()
        }
        Err(e) => {
            let status = ConsoleError::from(e).status_code();
            let page = views::generate_page(&state.toaster.active());
            (status, Html(page.into_string())).into_response()
        }
    }
}

async fn show_timetable(
    State(state): State<AppState>,
    Query(params): Query<TimetableQueryParams>,
) -> Response {
    let id = params.id.as_deref().and_then(|raw| raw.trim().parse::<i64>().ok());
    let Some(id) = id else {
        state.toaster.notify(MISSING_TIMETABLE_ID, ToastKind::Error);
        let page = views::timetable_page(None, None, &state.toaster.active());
        return (StatusCode::BAD_REQUEST, Html(page.into_string())).into_response();
    };

    match load_page(&state.api, id).await {
        Ok(page) => {
            let filter = resolve_filter(&page.meta, params.by.as_deref(), params.entity.as_deref());
            let grid = filter.map(|f| render_grid(&page.timetable, &page.meta, f));
            let markup = views::timetable_page(Some(&page), grid.as_ref(), &state.toaster.active());
            Html(markup.into_string()).into_response()
        }
        Err(e) => {
            let status = ConsoleError::from(e).status_code();
            let page = views::timetable_page(None, None, &state.toaster.active());
            (status, Html(page.into_string())).into_response()
        }
    }
}

async fn latest_timetable(State(state): State<AppState>) -> Response {
    match state.api.latest_timetable().await {
        Ok(latest) => Redirect::to(&format!("/timetable?id={}", latest.id)).into_response(),
        Err(e) => {
            let status = ConsoleError::from(e).status_code();
            let page = views::timetable_page(None, None, &state.toaster.active());
            (status, Html(page.into_string())).into_response()
        }
    }
}

async fn list_timetables(State(state): State<AppState>) -> Response {
    match state.api.timetables().await {
        Ok(timetables) => {
            Html(views::timetables_page(&timetables, &state.toaster.active()).into_string()).into_response()
        }
        Err(e) => {
            let status = ConsoleError::from(e).status_code();
            let page = views::timetables_page(&[], &state.toaster.active());
            (status, Html(page.into_string())).into_response()
        }
    }
}
