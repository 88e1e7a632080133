//! Error types for the storefront API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Reasons a coupon is rejected at checkout
#[derive(Debug, PartialEq, Eq, Error)]
pub enum CouponError {
  #[error("coupon not found")]
  NotFound,
  #[error("coupon is not active")]
  Inactive,
  #[error("coupon usage limit reached")]
  Exhausted,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("email already registered")]
  EmailTaken,

  #[error("authentication required")]
  Unauthorized,

  #[error("admin access required")]
  Forbidden,

  #[error("user not found")]
  UserNotFound,

  #[error("product not found")]
  ProductNotFound,

  #[error("category not found")]
  CategoryNotFound,

  #[error("order not found")]
  OrderNotFound,

  #[error("page not found")]
  PageNotFound,

  #[error("shipping method not found")]
  ShippingMethodNotFound,

  #[error("request not found")]
  RequestNotFound,

  #[error("review not found")]
  ReviewNotFound,

  #[error("banner not found")]
  BannerNotFound,

  #[error("contact message not found")]
  ContactNotFound,

  #[error("cart is empty")]
  EmptyCart,

  #[error("not enough stock for `{0}`")]
  OutOfStock(String),

  #[error(transparent)]
  Coupon(#[from] CouponError),

  #[error("{0}")]
  Validation(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  fn status(&self) -> StatusCode {
    match self {
      Error::Database(_) | Error::Io(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
      Error::InvalidCredentials | Error::Unauthorized => {
        StatusCode::UNAUTHORIZED
      }
      Error::Forbidden => StatusCode::FORBIDDEN,
      Error::EmailTaken => StatusCode::CONFLICT,
      Error::UserNotFound
      | Error::ProductNotFound
      | Error::CategoryNotFound
      | Error::OrderNotFound
      | Error::PageNotFound
      | Error::ShippingMethodNotFound
      | Error::RequestNotFound
      | Error::ReviewNotFound
      | Error::BannerNotFound
      | Error::ContactNotFound => StatusCode::NOT_FOUND,
      Error::EmptyCart | Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::OutOfStock(_) => StatusCode::CONFLICT,
      Error::Coupon(CouponError::NotFound) => StatusCode::NOT_FOUND,
      Error::Coupon(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();

    // Internal details stay in the logs, not in the response body
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
      tracing::error!("request failed: {self}");
      "internal error".to_string()
    } else {
      self.to_string()
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, axum::Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
