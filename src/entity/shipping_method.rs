use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipping_methods")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  /// Flat fee in cents
  pub fee: i64,
  /// Subtotal at which the fee is waived
  pub free_over: Option<i64>,
  pub position: i32,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
}

impl Model {
  /// Fee charged for a cart subtotal, honoring the free threshold.
  pub fn fee_for(&self, subtotal: i64) -> i64 {
    match self.free_over {
      Some(threshold) if subtotal >= threshold => 0,
      _ => self.fee,
    }
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
