use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
  entity::contact,
  plugins::server::extract::AdminAccess,
  prelude::*,
  state::AppState,
  sv::contact::ContactForm,
};

pub async fn submit(
  State(app): State<Arc<AppState>>,
  Json(form): Json<ContactForm>,
) -> Result<Json<contact::Model>> {
  let message = app.sv().contact.submit(form).await?;
  Ok(Json(message))
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactFilter {
  #[serde(default)]
  pub unread: bool,
}

pub async fn all(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Query(filter): Query<ContactFilter>,
) -> Result<Json<Vec<contact::Model>>> {
  let messages = app.sv().contact.all(filter.unread).await?;
  Ok(Json(messages))
}

pub async fn mark_read(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().contact.mark_read(id).await?;
  Ok(Json(json::json!({ "success": true })))
}
