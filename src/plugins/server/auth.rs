use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use crate::{
  entity::user,
  plugins::server::extract::{self, AuthUser},
  prelude::*,
  state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterReq {
  pub email: String,
  pub password: String,
  #[serde(default)]
  pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionRes {
  pub token: String,
  pub user: user::Model,
}

pub async fn register(
  State(app): State<Arc<AppState>>,
  Json(req): Json<RegisterReq>,
) -> Result<Json<SessionRes>> {
  let user = app
    .sv()
    .user
    .register(&req.email, &req.password, &req.display_name)
    .await?;

  info!(user = user.id, "Account registered");

  let token = app.open_session(&user);
  Ok(Json(SessionRes { token, user }))
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  Json(req): Json<LoginReq>,
) -> Result<Json<SessionRes>> {
  let user = app.sv().user.login(&req.email, &req.password).await?;

  let token = app.open_session(&user);
  Ok(Json(SessionRes { token, user }))
}

pub async fn logout(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<json::Value>> {
  if let Some(token) = extract::bearer(&headers) {
    app.drop_session(token);
  }

  Ok(Json(json::json!({ "success": true })))
}

pub async fn me(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
) -> Result<Json<user::Model>> {
  let user = app.sv().user.by_id(auth.user_id).await?;
  Ok(Json(user))
}
