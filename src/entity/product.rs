//! Product entity - catalog items with derived sale pricing

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub slug: String,
  pub title: String,
  pub description: String,
  /// Base price in cents
  pub price: i64,
  /// 0..=100; non-zero derives `sale_price`
  pub discount_percent: i32,
  pub sale_price: Option<i64>,
  pub stock: i32,
  pub is_active: bool,
  pub category_id: Option<i32>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl Model {
  /// Price a buyer actually pays, sale-aware.
  pub fn effective_price(&self) -> i64 {
    self.sale_price.unwrap_or(self.price)
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::category::Entity",
    from = "Column::CategoryId",
    to = "super::category::Column::Id"
  )]
  Category,
  #[sea_orm(has_many = "super::review::Entity")]
  Reviews,
  #[sea_orm(has_many = "super::cart_item::Entity")]
  CartItems,
}

impl Related<super::category::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Category.def()
  }
}

impl Related<super::review::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Reviews.def()
  }
}

impl Related<super::cart_item::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::CartItems.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
