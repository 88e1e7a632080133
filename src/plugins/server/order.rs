use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{OrderStatus, order, order_item, shipping_method},
  plugins::server::extract::{AdminAccess, AuthUser},
  prelude::*,
  state::AppState,
  sv::order::CheckoutForm,
};

#[derive(Debug, Serialize)]
pub struct OrderDetail {
  #[serde(flatten)]
  pub order: order::Model,
  pub items: Vec<order_item::Model>,
}

pub async fn list_shipping_methods(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<shipping_method::Model>>> {
  let methods = app.sv().shipping.active().await?;
  Ok(Json(methods))
}

pub async fn checkout(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Json(form): Json<CheckoutForm>,
) -> Result<Json<OrderDetail>> {
  let sv = app.sv();

  let order = sv.order.checkout(auth.user_id, form).await?;
  let items = sv.order.items(order.id).await?;

  Ok(Json(OrderDetail { order, items }))
}

pub async fn my_orders(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
) -> Result<Json<Vec<order::Model>>> {
  let orders = app.sv().order.by_user(auth.user_id).await?;
  Ok(Json(orders))
}

pub async fn my_order(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Path(id): Path<i32>,
) -> Result<Json<OrderDetail>> {
  let sv = app.sv();

  let order = sv.order.for_user(auth.user_id, id).await?;
  let items = sv.order.items(order.id).await?;

  Ok(Json(OrderDetail { order, items }))
}

// --- admin ---

#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
  pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusReq {
  pub status: OrderStatus,
}

pub async fn all_orders(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<order::Model>>> {
  let orders = app.sv().order.all(filter.status).await?;
  Ok(Json(orders))
}

pub async fn admin_order(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<OrderDetail>> {
  let sv = app.sv();

  let order = sv.order.by_id(id).await?;
  let items = sv.order.items(order.id).await?;

  Ok(Json(OrderDetail { order, items }))
}

pub async fn set_order_status(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(req): Json<StatusReq>,
) -> Result<Json<order::Model>> {
  let order = app.sv().order.set_status(id, req.status).await?;
  Ok(Json(order))
}
