mod admin;
mod analytics;
mod auth;
mod cart;
mod catalog;
mod contact;
mod content;
mod extract;
mod order;
mod request;
mod review;

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
  Router,
  routing::{get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();

    let router = Router::new()
      .route("/health", get(health))
      // accounts & sessions
      .route("/api/auth/register", post(auth::register))
      .route("/api/auth/login", post(auth::login))
      .route("/api/auth/logout", post(auth::logout))
      .route("/api/auth/me", get(auth::me))
      // storefront
      .route("/api/products", get(catalog::list_products))
      .route("/api/products/{slug}", get(catalog::get_product))
      .route(
        "/api/products/{slug}/reviews",
        get(review::for_product).post(review::submit),
      )
      .route("/api/categories", get(catalog::list_categories))
      // page reads are public; writes go through the admin gate
      .route(
        "/api/pages/{slug}",
        get(content::get_page)
          .patch(content::upsert_page)
          .delete(content::delete_page),
      )
      .route("/api/home", get(content::get_home))
      .route("/api/banners", get(content::list_banners))
      .route("/api/shipping-methods", get(order::list_shipping_methods))
      .route("/api/contact", post(contact::submit))
      .route("/api/analytics/events", post(analytics::track))
      // cart & checkout
      .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
      .route("/api/cart/items", post(cart::add_item))
      .route(
        "/api/cart/items/{product_id}",
        patch(cart::set_quantity).delete(cart::remove_item),
      )
      .route("/api/orders", post(order::checkout).get(order::my_orders))
      .route("/api/orders/{id}", get(order::my_order))
      // product requests
      .route("/api/requests", post(request::create).get(request::mine))
      // admin CMS
      .route("/api/admin/products", post(catalog::create_product))
      .route(
        "/api/admin/products/{id}",
        patch(catalog::update_product).delete(catalog::delete_product),
      )
      .route(
        "/api/admin/categories",
        get(catalog::all_categories).post(catalog::create_category),
      )
      .route(
        "/api/admin/categories/{id}",
        patch(catalog::update_category).delete(catalog::delete_category),
      )
      .route(
        "/api/admin/shipping-methods",
        get(content::all_shipping_methods).post(content::create_shipping_method),
      )
      .route(
        "/api/admin/shipping-methods/{id}",
        patch(content::update_shipping_method)
          .delete(content::delete_shipping_method),
      )
      .route(
        "/api/admin/coupons",
        get(admin::all_coupons).post(admin::create_coupon),
      )
      .route(
        "/api/admin/coupons/{id}",
        patch(admin::update_coupon).delete(admin::delete_coupon),
      )
      .route("/api/admin/pages", get(content::all_pages))
      .route("/api/admin/home", put(content::set_home))
      .route(
        "/api/admin/banners",
        get(content::all_banners).post(content::create_banner),
      )
      .route(
        "/api/admin/banners/{id}",
        patch(content::update_banner).delete(content::delete_banner),
      )
      .route("/api/admin/contacts", get(contact::all))
      .route("/api/admin/contacts/{id}/read", post(contact::mark_read))
      .route("/api/admin/requests", get(request::all))
      .route("/api/admin/requests/{id}", patch(request::set_status))
      .route("/api/admin/reviews", get(review::pending))
      .route(
        "/api/admin/reviews/{id}",
        patch(review::set_approved).delete(review::delete),
      )
      .route("/api/admin/orders", get(order::all_orders))
      .route(
        "/api/admin/orders/{id}",
        get(order::admin_order).patch(order::set_order_status),
      )
      .route("/api/admin/users", get(admin::all_users))
      .route("/api/admin/users/{id}", patch(admin::set_user_admin))
      .route("/api/admin/stats", get(admin::stats))
      .route("/api/admin/backup", post(admin::backup))
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .with_state(app)
      .into_make_service_with_connect_info::<SocketAddr>();

    let port: u16 =
      std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .context("Failed to bind HTTP listener")?;
    info!("HTTP server listening on {addr}");

    let limiter = async {
      loop {
        time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    };

    let server = async {
      axum::serve(listener, router).await.context("Axum server error")
    };

    tokio::select! {
      result = server => {
        match &result {
          Ok(_) => info!("Server stopped gracefully"),
          Err(err) => error!("Server stopped with error: {err}"),
        }
        result
      }
      _ = limiter => {
        error!("Rate limiter cleaner stopped unexpectedly!");
        Ok(())
      }
    }
  }
}

async fn health() -> &'static str {
  "OK"
}
