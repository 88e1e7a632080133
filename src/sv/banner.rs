use serde::Deserialize;

use crate::{entity::banner, prelude::*};

#[derive(Debug, Deserialize)]
pub struct BannerForm {
  pub title: String,
  pub placement: String,
  /// Declarative style/content blocks, stored opaquely
  #[serde(default)]
  pub content: json::Value,
  #[serde(default)]
  pub position: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct BannerPatch {
  pub title: Option<String>,
  pub placement: Option<String>,
  pub content: Option<json::Value>,
  pub position: Option<i32>,
  pub is_active: Option<bool>,
}

pub struct Banner<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Banner<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn active_for(&self, placement: &str) -> Result<Vec<banner::Model>> {
    let banners = banner::Entity::find()
      .filter(banner::Column::IsActive.eq(true))
      .filter(banner::Column::Placement.eq(placement))
      .order_by_asc(banner::Column::Position)
      .all(self.db)
      .await?;
    Ok(banners)
  }

  pub async fn all(&self) -> Result<Vec<banner::Model>> {
    let banners = banner::Entity::find()
      .order_by_asc(banner::Column::Placement)
      .order_by_asc(banner::Column::Position)
      .all(self.db)
      .await?;
    Ok(banners)
  }

  pub async fn create(&self, form: BannerForm) -> Result<banner::Model> {
    let title = utils::required("title", &form.title)?.to_string();
    let placement = utils::required("placement", &form.placement)?.to_string();

    let now = Utc::now().naive_utc();
    let banner = banner::ActiveModel {
      id: NotSet,
      title: Set(title),
      placement: Set(placement),
      content: Set(form.content),
      position: Set(form.position),
      is_active: Set(true),
      created_at: Set(now),
      updated_at: Set(now),
    };

    Ok(banner.insert(self.db).await?)
  }

  pub async fn update(&self, id: i32, patch: BannerPatch) -> Result<banner::Model> {
    let banner = banner::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::BannerNotFound)?;

    let mut active: banner::ActiveModel = banner.into();

    if let Some(title) = patch.title {
      active.title = Set(utils::required("title", &title)?.to_string());
    }
    if let Some(placement) = patch.placement {
      active.placement =
        Set(utils::required("placement", &placement)?.to_string());
    }
    if let Some(content) = patch.content {
      active.content = Set(content);
    }
    if let Some(position) = patch.position {
      active.position = Set(position);
    }
    if let Some(is_active) = patch.is_active {
      active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(self.db).await?)
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let banner = banner::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::BannerNotFound)?;

    banner::Entity::delete_by_id(banner.id).exec(self.db).await?;
    Ok(())
  }
}
