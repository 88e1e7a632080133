use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;

use crate::{
  plugins::server::extract::AuthUser,
  prelude::*,
  state::AppState,
  sv::cart::CartSummary,
};

#[derive(Debug, Deserialize)]
pub struct AddItemReq {
  pub product_id: i32,
  #[serde(default = "one")]
  pub quantity: i32,
}

fn one() -> i32 {
  1
}

#[derive(Debug, Deserialize)]
pub struct QuantityReq {
  pub quantity: i32,
}

pub async fn get_cart(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
) -> Result<Json<CartSummary>> {
  let summary = app.sv().cart.summary(auth.user_id).await?;
  Ok(Json(summary))
}

pub async fn add_item(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Json(req): Json<AddItemReq>,
) -> Result<Json<CartSummary>> {
  app.sv().cart.add(auth.user_id, req.product_id, req.quantity).await?;

  let summary = app.sv().cart.summary(auth.user_id).await?;
  Ok(Json(summary))
}

pub async fn set_quantity(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Path(product_id): Path<i32>,
  Json(req): Json<QuantityReq>,
) -> Result<Json<CartSummary>> {
  app.sv().cart.set_quantity(auth.user_id, product_id, req.quantity).await?;

  let summary = app.sv().cart.summary(auth.user_id).await?;
  Ok(Json(summary))
}

pub async fn remove_item(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Path(product_id): Path<i32>,
) -> Result<Json<CartSummary>> {
  app.sv().cart.remove(auth.user_id, product_id).await?;

  let summary = app.sv().cart.summary(auth.user_id).await?;
  Ok(Json(summary))
}

pub async fn clear_cart(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
) -> Result<Json<json::Value>> {
  app.sv().cart.clear(auth.user_id).await?;
  Ok(Json(json::json!({ "success": true })))
}
