use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
  entity::{RequestStatus, product_request},
  plugins::server::extract::{AdminAccess, AuthUser},
  prelude::*,
  state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RequestForm {
  pub title: String,
  pub note: Option<String>,
}

pub async fn create(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Json(form): Json<RequestForm>,
) -> Result<Json<product_request::Model>> {
  let request =
    app.sv().request.create(auth.user_id, &form.title, form.note).await?;
  Ok(Json(request))
}

pub async fn mine(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
) -> Result<Json<Vec<product_request::Model>>> {
  let requests = app.sv().request.by_user(auth.user_id).await?;
  Ok(Json(requests))
}

// --- admin ---

#[derive(Debug, Default, Deserialize)]
pub struct RequestFilter {
  pub status: Option<RequestStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusReq {
  pub status: RequestStatus,
}

pub async fn all(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Query(filter): Query<RequestFilter>,
) -> Result<Json<Vec<product_request::Model>>> {
  let requests = app.sv().request.all(filter.status).await?;
  Ok(Json(requests))
}

pub async fn set_status(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(req): Json<StatusReq>,
) -> Result<Json<product_request::Model>> {
  let request = app.sv().request.set_status(id, req.status).await?;
  Ok(Json(request))
}
