//! User entity - customer and admin accounts

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub display_name: String,
  pub is_admin: bool,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::order::Entity")]
  Orders,
  #[sea_orm(has_many = "super::cart_item::Entity")]
  CartItems,
  #[sea_orm(has_many = "super::product_request::Entity")]
  ProductRequests,
  #[sea_orm(has_many = "super::review::Entity")]
  Reviews,
}

impl Related<super::order::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Orders.def()
  }
}

impl Related<super::cart_item::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::CartItems.def()
  }
}

impl Related<super::product_request::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::ProductRequests.def()
  }
}

impl Related<super::review::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reviews.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
