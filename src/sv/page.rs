use serde::Deserialize;

use crate::{
  entity::{home_content, page},
  prelude::*,
};

#[derive(Debug, Default, Deserialize)]
pub struct PagePatch {
  pub title: Option<String>,
  pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomeForm {
  pub hero_title: String,
  #[serde(default)]
  pub hero_subtitle: String,
  #[serde(default)]
  pub sections: json::Value,
}

pub struct Page<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Page<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn by_slug(&self, slug: &str) -> Result<page::Model> {
    page::Entity::find_by_id(slug)
      .one(self.db)
      .await?
      .ok_or(Error::PageNotFound)
  }

  pub async fn all(&self) -> Result<Vec<page::Model>> {
    let pages = page::Entity::find()
      .order_by_asc(page::Column::Slug)
      .all(self.db)
      .await?;
    Ok(pages)
  }

  /// Applies a partial update to the page, creating the document when
  /// none exists yet.
  pub async fn upsert(&self, slug: &str, patch: PagePatch) -> Result<page::Model> {
    let slug = utils::slugify(utils::required("slug", slug)?);
    let now = Utc::now().naive_utc();

    match page::Entity::find_by_id(&slug).one(self.db).await? {
      Some(existing) => {
        let mut active: page::ActiveModel = existing.into();

        if let Some(title) = patch.title {
          active.title = Set(utils::required("title", &title)?.to_string());
        }
        if let Some(body) = patch.body {
          active.body = Set(body);
        }
        active.updated_at = Set(now);

        Ok(active.update(self.db).await?)
      }
      None => {
        // Creation needs at least a title
        let title = patch
          .title
          .as_deref()
          .map(str::trim)
          .filter(|title| !title.is_empty())
          .ok_or_else(|| Error::validation("missing field: title"))?
          .to_string();

        let page = page::ActiveModel {
          slug: Set(slug),
          title: Set(title),
          body: Set(patch.body.unwrap_or_default()),
          updated_at: Set(now),
        };

        Ok(page.insert(self.db).await?)
      }
    }
  }

  pub async fn delete(&self, slug: &str) -> Result<()> {
    let page = self.by_slug(slug).await?;
    page::Entity::delete_by_id(page.slug).exec(self.db).await?;
    Ok(())
  }

  /// The landing-page document, a defaulted blank when unset.
  pub async fn home(&self) -> Result<home_content::Model> {
    let content = home_content::Entity::find_by_id(home_content::SINGLETON_ID)
      .one(self.db)
      .await?;

    Ok(content.unwrap_or_else(|| home_content::Model {
      id: home_content::SINGLETON_ID,
      hero_title: String::new(),
      hero_subtitle: String::new(),
      sections: json::json!([]),
      updated_at: Utc::now().naive_utc(),
    }))
  }

  pub async fn set_home(&self, form: HomeForm) -> Result<home_content::Model> {
    let now = Utc::now().naive_utc();

    let exists = home_content::Entity::find_by_id(home_content::SINGLETON_ID)
      .one(self.db)
      .await?
      .is_some();

    let content = home_content::ActiveModel {
      id: Set(home_content::SINGLETON_ID),
      hero_title: Set(form.hero_title),
      hero_subtitle: Set(form.hero_subtitle),
      sections: Set(form.sections),
      updated_at: Set(now),
    };

    let content = if exists {
      content.update(self.db).await?
    } else {
      content.insert(self.db).await?
    };

    Ok(content)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::entity;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(entity::prelude::Page),
      schema.create_table_from_entity(entity::prelude::HomeContent),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  #[tokio::test]
  async fn test_upsert_creates_then_updates() {
    let db = setup_test_db().await;
    let sv = Page::new(&db);

    let created = sv
      .upsert(
        "about-us",
        PagePatch { title: Some("About us".into()), body: None },
      )
      .await
      .unwrap();
    assert_eq!(created.body, "");

    let updated = sv
      .upsert(
        "about-us",
        PagePatch { title: None, body: Some("We sell home goods.".into()) },
      )
      .await
      .unwrap();

    assert_eq!(updated.title, "About us");
    assert_eq!(updated.body, "We sell home goods.");
  }

  #[tokio::test]
  async fn test_upsert_create_requires_title() {
    let db = setup_test_db().await;
    let sv = Page::new(&db);

    assert!(matches!(
      sv.upsert("faq", PagePatch { title: None, body: Some("…".into()) }).await,
      Err(Error::Validation(_))
    ));
  }

  #[tokio::test]
  async fn test_home_defaults_until_set() {
    let db = setup_test_db().await;
    let sv = Page::new(&db);

    assert_eq!(sv.home().await.unwrap().hero_title, "");

    sv.set_home(HomeForm {
      hero_title: "Make it cozy".into(),
      hero_subtitle: String::new(),
      sections: json::json!([{ "kind": "featured" }]),
    })
    .await
    .unwrap();

    let home = sv.home().await.unwrap();
    assert_eq!(home.hero_title, "Make it cozy");
    assert_eq!(home.sections[0]["kind"], "featured");
  }
}
