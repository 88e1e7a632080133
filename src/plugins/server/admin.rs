//! Admin-only handlers: coupons, store stats and database backup

use std::sync::Arc;

use axum::{
  Json,
  body::Body,
  extract::{Path, State},
  http::header,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;

use crate::{
  entity::{coupon, user},
  plugins::server::extract::AdminAccess,
  prelude::*,
  state::AppState,
  sv::{analytics::TrafficStats, coupon::CouponForm},
};

pub async fn all_users(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<user::Model>>> {
  let users = app.sv().user.all().await?;
  Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct UserPatch {
  pub is_admin: bool,
}

pub async fn set_user_admin(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<UserPatch>,
) -> Result<Json<json::Value>> {
  app.sv().user.set_admin(id, patch.is_admin).await?;
  Ok(Json(json::json!({ "success": true })))
}

pub async fn all_coupons(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<coupon::Model>>> {
  let coupons = app.sv().coupon.all().await?;
  Ok(Json(coupons))
}

pub async fn create_coupon(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<CouponForm>,
) -> Result<Json<coupon::Model>> {
  let coupon = app.sv().coupon.create(form).await?;
  Ok(Json(coupon))
}

#[derive(Debug, Deserialize)]
pub struct CouponPatch {
  pub is_active: bool,
}

pub async fn update_coupon(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<CouponPatch>,
) -> Result<Json<json::Value>> {
  app.sv().coupon.set_active(id, patch.is_active).await?;
  Ok(Json(json::json!({ "success": true })))
}

pub async fn delete_coupon(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().coupon.delete(id).await?;
  Ok(Json(json::json!({ "success": true })))
}

#[derive(Debug, Serialize)]
pub struct StoreStats {
  pub users: u64,
  pub products: u64,
  pub orders: u64,
  /// Cents, cancelled orders excluded
  pub revenue: i64,
  pub unread_contacts: u64,
  pub pending_requests: u64,
  pub traffic: TrafficStats,
}

pub async fn stats(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<StoreStats>> {
  let sv = app.sv();

  Ok(Json(StoreStats {
    users: sv.user.count().await?,
    products: sv.catalog.count_products().await?,
    orders: sv.order.count().await?,
    revenue: sv.order.revenue().await?,
    unread_contacts: sv.contact.count_unread().await?,
    pending_requests: sv.request.count_pending().await?,
    traffic: sv.analytics.traffic(10).await?,
  }))
}

/// Takes a fresh snapshot and streams it back to the admin.
pub async fn backup(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<impl IntoResponse> {
  let path = app
    .perform_backup()
    .await
    .map_err(|err| Error::Internal(format!("backup failed: {err:#}")))?;

  let file = tokio::fs::File::open(&path).await?;

  let filename = path
    .file_name()
    .and_then(|name| name.to_str())
    .unwrap_or("backup.db")
    .to_string();

  let stream = ReaderStream::new(file);
  let body = Body::from_stream(stream);

  let headers = [
    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
    (
      header::CONTENT_DISPOSITION,
      format!("attachment; filename=\"{}\"", filename),
    ),
  ];

  Ok((headers, body))
}
