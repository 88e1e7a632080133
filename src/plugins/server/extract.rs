//! Request extractors for session and admin authentication

use std::sync::Arc;

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};

use crate::{prelude::*, state::AppState};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Bearer token from the `Authorization` header, if any.
pub fn bearer(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

/// A logged-in account, resolved from the in-memory session table.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
  pub user_id: i32,
  pub is_admin: bool,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    app: &Arc<AppState>,
  ) -> Result<Self> {
    let token = bearer(&parts.headers).ok_or(Error::Unauthorized)?;
    let session = app.session(token).ok_or(Error::Unauthorized)?;

    Ok(AuthUser { user_id: session.user_id, is_admin: session.is_admin })
  }
}

/// Admin gate: an admin session, or the configured `X-Admin-Key`
/// header for headless CMS tooling.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequestParts<Arc<AppState>> for AdminAccess {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    app: &Arc<AppState>,
  ) -> Result<Self> {
    if let Some(expected) = app.admin_key.as_deref()
      && let Some(key) = parts.headers.get(ADMIN_KEY_HEADER)
      && key.as_bytes() == expected.as_bytes()
    {
      return Ok(AdminAccess);
    }

    let token = bearer(&parts.headers).ok_or(Error::Unauthorized)?;
    let session = app.session(token).ok_or(Error::Unauthorized)?;

    if session.is_admin { Ok(AdminAccess) } else { Err(Error::Forbidden) }
  }
}
