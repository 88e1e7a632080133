//! CMS handlers: pages, home content, banners and shipping admin

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
  entity::{banner, home_content, page, shipping_method},
  plugins::server::extract::AdminAccess,
  prelude::*,
  state::AppState,
  sv::{
    banner::{BannerForm, BannerPatch},
    page::{HomeForm, PagePatch},
    shipping::{ShippingForm, ShippingPatch},
  },
};

pub async fn get_page(
  State(app): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Json<page::Model>> {
  let page = app.sv().page.by_slug(&slug).await?;
  Ok(Json(page))
}

pub async fn get_home(
  State(app): State<Arc<AppState>>,
) -> Result<Json<home_content::Model>> {
  let home = app.sv().page.home().await?;
  Ok(Json(home))
}

#[derive(Debug, Default, Deserialize)]
pub struct BannerQuery {
  pub placement: Option<String>,
}

pub async fn list_banners(
  State(app): State<Arc<AppState>>,
  Query(query): Query<BannerQuery>,
) -> Result<Json<Vec<banner::Model>>> {
  let placement = query.placement.as_deref().unwrap_or("home-hero");
  let banners = app.sv().banner.active_for(placement).await?;
  Ok(Json(banners))
}

// --- admin ---

pub async fn all_pages(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<page::Model>>> {
  let pages = app.sv().page.all().await?;
  Ok(Json(pages))
}

pub async fn upsert_page(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(slug): Path<String>,
  Json(patch): Json<PagePatch>,
) -> Result<Json<page::Model>> {
  let page = app.sv().page.upsert(&slug, patch).await?;
  Ok(Json(page))
}

pub async fn delete_page(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(slug): Path<String>,
) -> Result<Json<json::Value>> {
  app.sv().page.delete(&slug).await?;
  Ok(Json(json::json!({ "success": true })))
}

pub async fn set_home(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<HomeForm>,
) -> Result<Json<home_content::Model>> {
  let home = app.sv().page.set_home(form).await?;
  Ok(Json(home))
}

pub async fn all_banners(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<banner::Model>>> {
  let banners = app.sv().banner.all().await?;
  Ok(Json(banners))
}

pub async fn create_banner(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<BannerForm>,
) -> Result<Json<banner::Model>> {
  let banner = app.sv().banner.create(form).await?;
  Ok(Json(banner))
}

pub async fn update_banner(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<BannerPatch>,
) -> Result<Json<banner::Model>> {
  let banner = app.sv().banner.update(id, patch).await?;
  Ok(Json(banner))
}

pub async fn delete_banner(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().banner.delete(id).await?;
  Ok(Json(json::json!({ "success": true })))
}

pub async fn all_shipping_methods(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
) -> Result<Json<Vec<shipping_method::Model>>> {
  let methods = app.sv().shipping.all().await?;
  Ok(Json(methods))
}

pub async fn create_shipping_method(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Json(form): Json<ShippingForm>,
) -> Result<Json<shipping_method::Model>> {
  let method = app.sv().shipping.create(form).await?;
  Ok(Json(method))
}

pub async fn update_shipping_method(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
  Json(patch): Json<ShippingPatch>,
) -> Result<Json<shipping_method::Model>> {
  let method = app.sv().shipping.update(id, patch).await?;
  Ok(Json(method))
}

pub async fn delete_shipping_method(
  State(app): State<Arc<AppState>>,
  _admin: AdminAccess,
  Path(id): Path<i32>,
) -> Result<Json<json::Value>> {
  app.sv().shipping.delete(id).await?;
  Ok(Json(json::json!({ "success": true })))
}
