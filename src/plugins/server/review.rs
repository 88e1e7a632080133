use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;

use crate::{
  entity::review,
  plugins::server::extract::{AdminAccess, AuthUser},
  prelude::*,
  state::AppState,
  sv::review::ProductReviews,
};

pub async fn for_product(
  State(app): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Json<ProductReviews>> {
  let sv = app.sv();

  let product = sv.catalog.by_slug(&slug).await?;
  let reviews = sv.review.approved_for(product.id).await?;

  Ok(Json(reviews))
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
  pub rating: i32,
  #[serde(default)]
  pub body: String,
}

pub async fn submit(
  State(app): State<Arc<AppState>>,
  auth: AuthUser,
  Path(slug): Path<String>,
  Json(form): Json<ReviewForm>,
) -> Result<Json<review::Model>> {
  let sv = app.sv();

  let product = sv.catalog.by_slug(&slug).await?;
  let review = sv
    .review
    .submit(auth.user_id, product.id, form.rating, form.body)
    .await?;

  Ok(Json(review))
}

// --- admin ---

#[derive(Debug, Deserialize)]
pub struct ApproveReq {
  pub is_approved: bool,
}

pub async fn pending(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<review::Model>>> {
  let reviews = app.sv().review.pending().await?;
  Ok(Json(reviews))
}

pub async fn set_approved(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(req): Json<ApproveReq>,
) -> Result<Json<json::Value>> {
  app.sv().review.set_approved(id, req.is_approved).await?;
  Ok(Json(json::json!({ "success": true })))
}

pub async fn delete(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().review.delete(id).await?;
  Ok(Json(json::json!({ "success": true })))
}
