use serde::Deserialize;

use crate::{entity::shipping_method, prelude::*};

#[derive(Debug, Deserialize)]
pub struct ShippingForm {
  pub title: String,
  /// Cents
  pub fee: i64,
  pub free_over: Option<i64>,
  #[serde(default)]
  pub position: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShippingPatch {
  pub title: Option<String>,
  pub fee: Option<i64>,
  pub free_over: Option<Option<i64>>,
  pub position: Option<i32>,
  pub is_active: Option<bool>,
}

pub struct Shipping<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Shipping<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn active(&self) -> Result<Vec<shipping_method::Model>> {
    let methods = shipping_method::Entity::find()
      .filter(shipping_method::Column::IsActive.eq(true))
      .order_by_asc(shipping_method::Column::Position)
      .all(self.db)
      .await?;
    Ok(methods)
  }

  pub async fn all(&self) -> Result<Vec<shipping_method::Model>> {
    let methods = shipping_method::Entity::find()
      .order_by_asc(shipping_method::Column::Position)
      .all(self.db)
      .await?;
    Ok(methods)
  }

  pub async fn by_id(&self, id: i32) -> Result<shipping_method::Model> {
    shipping_method::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ShippingMethodNotFound)
  }

  pub async fn create(
    &self,
    form: ShippingForm,
  ) -> Result<shipping_method::Model> {
    let title = utils::required("title", &form.title)?.to_string();
    if form.fee < 0 {
      return Err(Error::validation("fee must not be negative"));
    }

    let method = shipping_method::ActiveModel {
      id: NotSet,
      title: Set(title),
      fee: Set(form.fee),
      free_over: Set(form.free_over),
      position: Set(form.position),
      is_active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(method.insert(self.db).await?)
  }

  pub async fn update(
    &self,
    id: i32,
    patch: ShippingPatch,
  ) -> Result<shipping_method::Model> {
    let method = self.by_id(id).await?;
    let mut active: shipping_method::ActiveModel = method.into();

    if let Some(title) = patch.title {
      active.title = Set(utils::required("title", &title)?.to_string());
    }
    if let Some(fee) = patch.fee {
      if fee < 0 {
        return Err(Error::validation("fee must not be negative"));
      }
      active.fee = Set(fee);
    }
    if let Some(free_over) = patch.free_over {
      active.free_over = Set(free_over);
    }
    if let Some(position) = patch.position {
      active.position = Set(position);
    }
    if let Some(is_active) = patch.is_active {
      active.is_active = Set(is_active);
    }

    Ok(active.update(self.db).await?)
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let method = self.by_id(id).await?;
    shipping_method::Entity::delete_by_id(method.id).exec(self.db).await?;
    Ok(())
  }
}
