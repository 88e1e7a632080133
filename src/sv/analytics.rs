use sea_orm::sea_query::Expr;
use serde::Serialize;

use crate::{
  entity::{EventKind, page_view},
  prelude::*,
};

#[derive(Debug, Serialize)]
pub struct TrafficStats {
  pub views: u64,
  pub clicks: u64,
  pub top_paths: Vec<PathHits>,
}

#[derive(Debug, Serialize)]
pub struct PathHits {
  pub path: String,
  pub hits: i64,
}

pub struct Analytics<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Analytics<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record(
    &self,
    kind: EventKind,
    path: &str,
    referrer: Option<String>,
    visitor: Option<String>,
  ) -> Result<()> {
    let path = utils::required("path", path)?.to_string();

    page_view::ActiveModel {
      id: NotSet,
      kind: Set(kind),
      path: Set(path),
      referrer: Set(referrer.filter(|referrer| !referrer.is_empty())),
      visitor: Set(visitor.filter(|visitor| !visitor.is_empty())),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(self.db)
    .await?;

    Ok(())
  }

  pub async fn count(&self, kind: EventKind) -> Result<u64> {
    let count = page_view::Entity::find()
      .filter(page_view::Column::Kind.eq(kind))
      .count(self.db)
      .await?;
    Ok(count)
  }

  pub async fn top_paths(&self, limit: u64) -> Result<Vec<PathHits>> {
    let rows: Vec<(String, i64)> = page_view::Entity::find()
      .select_only()
      .column(page_view::Column::Path)
      .column_as(Expr::col(page_view::Column::Id).count(), "hits")
      .group_by(page_view::Column::Path)
      .order_by_desc(Expr::col(page_view::Column::Id).count())
      .limit(limit)
      .into_tuple()
      .all(self.db)
      .await?;

    Ok(rows.into_iter().map(|(path, hits)| PathHits { path, hits }).collect())
  }

  pub async fn traffic(&self, top: u64) -> Result<TrafficStats> {
    Ok(TrafficStats {
      views: self.count(EventKind::View).await?,
      clicks: self.count(EventKind::Click).await?,
      top_paths: self.top_paths(top).await?,
    })
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
    let stmt = schema.create_table_from_entity(entity::prelude::PageView);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  #[tokio::test]
  async fn test_counts_and_top_paths() {
    let db = setup_test_db().await;
    let sv = Analytics::new(&db);

    for _ in 0..3 {
      sv.record(EventKind::View, "/products/teapot", None, None).await.unwrap();
    }
    sv.record(EventKind::View, "/", None, None).await.unwrap();
    sv.record(EventKind::Click, "/products/teapot", None, None).await.unwrap();

    let traffic = sv.traffic(5).await.unwrap();
    assert_eq!(traffic.views, 4);
    assert_eq!(traffic.clicks, 1);
    assert_eq!(traffic.top_paths[0].path, "/products/teapot");
    assert_eq!(traffic.top_paths[0].hits, 4);
  }
}
