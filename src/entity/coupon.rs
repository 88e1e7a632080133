//! Coupon entity - percent or flat-amount discounts with usage limits

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub code: String,
  /// Percent off the subtotal; `amount` wins when both are set
  pub percent: Option<i32>,
  /// Flat amount off in cents
  pub amount: Option<i64>,
  pub starts_at: Option<NaiveDateTime>,
  pub expires_at: Option<NaiveDateTime>,
  pub max_uses: Option<i32>,
  pub used: i32,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
