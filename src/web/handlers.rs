use crate::export::{CSV_CONTENT_TYPE, to_csv};
use crate::pipeline::{self, ErrorKind};
use crate::web::page_view::PageView;
use crate::web::run_query::RunQuery;
use crate::web::state::{AppState, PAGE_TEMPLATE};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{instrument, warn};

pub const DOWNLOAD_PATH: &str = "/distances.csv";

#[instrument(skip_all, fields(sheet_url = %query.sheet_url))]
pub async fn page(State(state): State<AppState>, Query(query): Query<RunQuery>) -> Response {
    let defaults = state.config().reference();
    let mut view = PageView::new(&query, state.config());

    if let Some(sheet_url) = query.sheet_url() {
        view = match query.reference_point(defaults) {
            Err(err) => view.with_error("input", err.to_string()),
            Ok(reference) => match pipeline::run(state.source(), sheet_url, &reference).await {
                Ok(table) => {
                    let download_href = format!("{}?{}", DOWNLOAD_PATH, query.to_query_string(defaults));
                    view.with_table(sheet_url, &reference.label, &table, download_href)
                }
                Err(err) => view.with_run_error(&err),
            },
        };
    }

    match state.templates().render(PAGE_TEMPLATE, &view) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            warn!("⚠️ Unable to render the page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Unable to render the page").into_response()
        }
    }
}

#[instrument(skip_all, fields(sheet_url = %query.sheet_url))]
pub async fn download_csv(State(state): State<AppState>, Query(query): Query<RunQuery>) -> Response {
    let Some(sheet_url) = query.sheet_url() else {
        return (StatusCode::BAD_REQUEST, "Enter a Google Sheet URL").into_response();
    };

    let reference = match query.reference_point(state.config().reference()) {
        Ok(reference) => reference,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };

    let table = match pipeline::run(state.source(), sheet_url, &reference).await {
        Ok(table) => table,
        Err(err) => {
            let status = match err.kind() {
                ErrorKind::Access => StatusCode::FORBIDDEN,
                ErrorKind::Schema => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Unanticipated => StatusCode::BAD_GATEWAY,
            };
            return (status, err.user_message()).into_response();
        }
    };

    match to_csv(&table) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", state.config().export().file_name()),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            warn!("⚠️ Unable to export the results: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Unable to export the results: {}", err)).into_response()
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}
