//! Storefront API - backend for a home-goods web shop
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the JSON REST API with rate limiting
//! - Plugin supervisor running the HTTP server and maintenance cron
//! - Tokio for async runtime

mod entity;
mod error;
mod plugins;
mod prelude;
mod state;
mod sv;
mod utils;

use std::{env, sync::Arc};

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{prelude::*, state::AppState};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "storefront=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:storefront.db?mode=rwc".into());

  let admin_key = env::var("ADMIN_KEY").ok().filter(|key| !key.is_empty());
  if admin_key.is_none() {
    warn!("ADMIN_KEY not set, header-based admin access disabled");
  }

  info!("Starting Storefront API v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(&db_url, admin_key).await);

  plugins::Host::new()
    .register(plugins::server::Plugin)
    .register(plugins::cron::Plugin)
    .run(app)
    .await;

  tokio::signal::ctrl_c().await.expect("Failed to install shutdown handler");
  info!("Shutting down");
}
