//! Banner entity - declarative promo blocks arranged by placement

use chrono::NaiveDateTime;
use json::Value;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banners")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  /// Client slot, e.g. `home-hero` or `sidebar`
  pub placement: String,
  /// Style/content objects; the server stores them opaquely
  pub content: Value,
  pub position: i32,
  pub is_active: bool,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
