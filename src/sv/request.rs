use crate::{
  entity::{RequestStatus, product_request},
  prelude::*,
};

pub struct Request<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Request<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    user_id: i32,
    title: &str,
    note: Option<String>,
  ) -> Result<product_request::Model> {
    let title = utils::required("title", title)?.to_string();

    let now = Utc::now().naive_utc();
    let request = product_request::ActiveModel {
      id: NotSet,
      user_id: Set(user_id),
      title: Set(title),
      note: Set(note.filter(|note| !note.trim().is_empty())),
      status: Set(RequestStatus::Pending),
      created_at: Set(now),
      updated_at: Set(now),
    };

    Ok(request.insert(self.db).await?)
  }

  pub async fn by_user(
    &self,
    user_id: i32,
  ) -> Result<Vec<product_request::Model>> {
    let requests = product_request::Entity::find()
      .filter(product_request::Column::UserId.eq(user_id))
      .order_by_desc(product_request::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(requests)
  }

  pub async fn all(
    &self,
    status: Option<RequestStatus>,
  ) -> Result<Vec<product_request::Model>> {
    let mut find = product_request::Entity::find()
      .order_by_desc(product_request::Column::CreatedAt);

    if let Some(status) = status {
      find = find.filter(product_request::Column::Status.eq(status));
    }

    Ok(find.all(self.db).await?)
  }

  /// Direct status write by an admin; all transitions are allowed.
  pub async fn set_status(
    &self,
    id: i32,
    status: RequestStatus,
  ) -> Result<product_request::Model> {
    let request = product_request::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::RequestNotFound)?;

    let request = product_request::ActiveModel {
      status: Set(status),
      updated_at: Set(Utc::now().naive_utc()),
      ..request.into()
    }
    .update(self.db)
    .await?;

    Ok(request)
  }

  pub async fn count_pending(&self) -> Result<u64> {
    let count = product_request::Entity::find()
      .filter(product_request::Column::Status.eq(RequestStatus::Pending))
      .count(self.db)
      .await?;
    Ok(count)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::entity::{self, user};

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    for stmt in [
      schema.create_table_from_entity(entity::prelude::User),
      schema.create_table_from_entity(entity::prelude::ProductRequest),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  async fn seed_user(db: &DatabaseConnection) -> i32 {
    user::ActiveModel {
      id: NotSet,
      email: Set("shopper@example.com".into()),
      password_hash: Set("x".into()),
      display_name: Set("Shopper".into()),
      is_admin: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
    .id
  }

  #[tokio::test]
  async fn test_created_pending_then_moderated() {
    let db = setup_test_db().await;
    let sv = Request::new(&db);
    let user = seed_user(&db).await;

    let request =
      sv.create(user, "Linen curtains", Some("120cm wide".into())).await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(sv.count_pending().await.unwrap(), 1);

    let request =
      sv.set_status(request.id, RequestStatus::Approved).await.unwrap();
    assert_eq!(request.status, RequestStatus::Approved);

    // Direct writes allow any jump, including back to pending
    let request =
      sv.set_status(request.id, RequestStatus::Pending).await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
  }

  #[tokio::test]
  async fn test_status_filter() {
    let db = setup_test_db().await;
    let sv = Request::new(&db);
    let user = seed_user(&db).await;

    let first = sv.create(user, "Wool rug", None).await.unwrap();
    sv.create(user, "Bamboo shelf", None).await.unwrap();

    sv.set_status(first.id, RequestStatus::Completed).await.unwrap();

    let done = sv.all(Some(RequestStatus::Completed)).await.unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "Wool rug");
  }
}
