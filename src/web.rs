// Axum front-end over the shared record store.
//
// Endpoints:
//   GET  /              list all records
//   GET  /add           blank record form
//   POST /add           create a record, redirect to /
//   GET  /edit/{id}     pre-filled record form
//   POST /edit/{id}     overwrite a record, redirect to /
//   GET  /delete/{id}   delete a record, redirect to /
//   GET  /dashboard     aggregated view

mod routes;
mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::sync::Mutex;

use crate::records::Conn;

pub struct AppState {
    conn: Mutex<Conn>,
}

impl AppState {
    pub fn new(conn: Conn) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit))
        .route("/delete/{id}", get(routes::delete))
        .route("/dashboard", get(routes::dashboard))
        .with_state(state)
}

pub async fn serve(listen_addr: &str, state: Arc<AppState>) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    log::info!("Web interface listening on http://{listen_addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
