use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{entity::EventKind, prelude::*, state::AppState};

#[derive(Debug, Deserialize)]
pub struct EventReq {
  pub kind: EventKind,
  pub path: String,
  pub referrer: Option<String>,
  pub visitor: Option<String>,
}

/// Fire-and-forget tracking: the client never sees a failure here.
pub async fn track(
  State(app): State<Arc<AppState>>,
  Json(req): Json<EventReq>,
) -> StatusCode {
  let result = app
    .sv()
    .analytics
    .record(req.kind, &req.path, req.referrer, req.visitor)
    .await;

  if let Err(err) = result {
    debug!("Analytics event dropped: {err}");
  }

  StatusCode::NO_CONTENT
}
