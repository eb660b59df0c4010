use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{views, AppState};
use crate::records::{RecordPatch, Records};
use crate::stats;

/// Fields shared by the add and edit forms.  `hours` is typed, so
/// non-numeric input never reaches a handler: the form extractor
/// rejects it with the framework's default status.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordForm {
    name: String,
    project: String,
    hours: f64,
    date: String,
}

pub(crate) async fn index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let mut conn = state.conn.lock().await;
    let records = Records::new(&mut conn)
        .list_records()
        .map_err(internal_error)?;
    Ok(Html(views::index_page(&records)))
}

pub(crate) async fn add_form() -> Html<String> {
    Html(views::record_form_page(None))
}

pub(crate) async fn add(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut conn = state.conn.lock().await;
    let record = Records::new(&mut conn)
        .add_record(&form.name, &form.project, form.hours, &form.date)
        .map_err(internal_error)?;
    log::info!("Added record {} for {}", record.id, record.name);
    Ok(Redirect::to("/"))
}

pub(crate) async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let mut conn = state.conn.lock().await;
    let record = Records::new(&mut conn)
        .get_record(&id)
        .map_err(internal_error)?;
    Ok(match record {
        Some(record) => Html(views::record_form_page(Some(&record))).into_response(),
        None => Redirect::to("/").into_response(),
    })
}

pub(crate) async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut conn = state.conn.lock().await;
    let patch = RecordPatch {
        name: Some(&form.name),
        project: Some(&form.project),
        hours: Some(form.hours),
        date: Some(&form.date),
    };
    let updated = Records::new(&mut conn)
        .update_record(&id, patch)
        .map_err(internal_error)?;
    match updated {
        Some(record) => log::info!("Updated record {}", record.id),
        None => log::warn!("Edit of unknown record {id} ignored"),
    }
    Ok(Redirect::to("/"))
}

pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut conn = state.conn.lock().await;
    let removed = Records::new(&mut conn)
        .delete_record(&id)
        .map_err(internal_error)?;
    if removed {
        log::info!("Deleted record {id}");
    }
    Ok(Redirect::to("/"))
}

pub(crate) async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut conn = state.conn.lock().await;
    let stats = match Records::new(&mut conn).list_records() {
        Ok(records) => stats::dashboard_stats(&records),
        Err(err) => {
            // the dashboard is the one page that stays up when the
            // store is unreachable: it renders zeroes instead
            log::warn!("Dashboard degraded to an empty payload: {err}");
            stats::DashboardStats::default()
        }
    };
    Html(views::dashboard_page(&stats))
}

fn internal_error(err: anyhow::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
