//! Order entity - checkout snapshot with computed totals

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order lifecycle, updated directly by admins
#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  #[sea_orm(string_value = "pending")]
  Pending,
  #[sea_orm(string_value = "paid")]
  Paid,
  #[sea_orm(string_value = "shipped")]
  Shipped,
  #[sea_orm(string_value = "cancelled")]
  Cancelled,
}

impl Default for OrderStatus {
  fn default() -> Self {
    Self::Pending
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: i32,
  pub status: OrderStatus,
  pub recipient: String,
  pub phone: String,
  pub address: String,
  /// All money fields in cents
  pub subtotal: i64,
  pub shipping_fee: i64,
  pub discount: i64,
  pub total: i64,
  pub coupon_code: Option<String>,
  /// Shipping method title at checkout time
  pub shipping_title: String,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
  #[sea_orm(has_many = "super::order_item::Entity")]
  Items,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::order_item::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Items.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
