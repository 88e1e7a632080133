use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
  entity::{category, product},
  plugins::server::extract::AdminAccess,
  prelude::*,
  state::AppState,
  sv::catalog::{ProductForm, ProductListing, ProductPatch, ProductQuery},
};

pub async fn list_products(
  State(app): State<Arc<AppState>>,
  Query(query): Query<ProductQuery>,
) -> Result<Json<ProductListing>> {
  let listing = app.sv().catalog.list(&query).await?;
  Ok(Json(listing))
}

pub async fn get_product(
  State(app): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Json<product::Model>> {
  let product = app.sv().catalog.by_slug(&slug).await?;
  Ok(Json(product))
}

pub async fn list_categories(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<category::Model>>> {
  let categories = app.sv().catalog.categories(false).await?;
  Ok(Json(categories))
}

// --- admin ---

pub async fn create_product(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<ProductForm>,
) -> Result<Json<product::Model>> {
  let product = app.sv().catalog.create_product(form).await?;
  Ok(Json(product))
}

pub async fn update_product(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<ProductPatch>,
) -> Result<Json<product::Model>> {
  let product = app.sv().catalog.update_product(id, patch).await?;
  Ok(Json(product))
}

pub async fn delete_product(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().catalog.delete_product(id).await?;
  Ok(Json(json::json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
  pub title: String,
  #[serde(default)]
  pub position: i32,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPatch {
  pub title: Option<String>,
  pub position: Option<i32>,
  pub is_active: Option<bool>,
}

pub async fn all_categories(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<category::Model>>> {
  let categories = app.sv().catalog.categories(true).await?;
  Ok(Json(categories))
}

pub async fn create_category(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<CategoryForm>,
) -> Result<Json<category::Model>> {
  let category =
    app.sv().catalog.create_category(&form.title, form.position).await?;
  Ok(Json(category))
}

pub async fn update_category(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<CategoryPatch>,
) -> Result<Json<category::Model>> {
  let category = app
    .sv()
    .catalog
    .update_category(id, patch.title, patch.position, patch.is_active)
    .await?;
  Ok(Json(category))
}

pub async fn delete_category(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().catalog.delete_category(id).await?;
  Ok(Json(json::json!({ "success": true })))
}
