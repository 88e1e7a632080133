//! PageView entity - fire-and-forget analytics events

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  #[sea_orm(string_value = "view")]
  View,
  #[sea_orm(string_value = "click")]
  Click,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page_views")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub kind: EventKind,
  pub path: String,
  pub referrer: Option<String>,
  /// Anonymous client token, if the client sent one
  pub visitor: Option<String>,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
