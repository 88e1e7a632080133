use serde::Deserialize;

use crate::{entity::contact, prelude::*};

#[derive(Debug, Deserialize)]
pub struct ContactForm {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub subject: String,
  #[serde(default)]
  pub body: String,
}

pub struct Contact<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Contact<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Stores a contact-form submission. Each required field is checked
  /// before anything touches the database.
  pub async fn submit(&self, form: ContactForm) -> Result<contact::Model> {
    let name = utils::required("name", &form.name)?.to_string();
    let email = utils::required("email", &form.email)?.to_string();
    let subject = utils::required("subject", &form.subject)?.to_string();
    let body = utils::required("body", &form.body)?.to_string();

    if !email.contains('@') {
      return Err(Error::validation("invalid email address"));
    }

    let message = contact::ActiveModel {
      id: NotSet,
      name: Set(name),
      email: Set(email),
      subject: Set(subject),
      body: Set(body),
      is_read: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(message.insert(self.db).await?)
  }

  pub async fn all(&self, unread_only: bool) -> Result<Vec<contact::Model>> {
    let mut find =
      contact::Entity::find().order_by_desc(contact::Column::CreatedAt);

    if unread_only {
      find = find.filter(contact::Column::IsRead.eq(false));
    }

    Ok(find.all(self.db).await?)
  }

  pub async fn mark_read(&self, id: i32) -> Result<()> {
    let message = contact::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::ContactNotFound)?;

    contact::ActiveModel { is_read: Set(true), ..message.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn count_unread(&self) -> Result<u64> {
    let count = contact::Entity::find()
      .filter(contact::Column::IsRead.eq(false))
      .count(self.db)
      .await?;
    Ok(count)
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
    let stmt = schema.create_table_from_entity(entity::prelude::Contact);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  fn form(subject: &str) -> ContactForm {
    ContactForm {
      name: "Visitor".into(),
      email: "visitor@example.com".into(),
      subject: subject.into(),
      body: "Do you ship abroad?".into(),
    }
  }

  #[tokio::test]
  async fn test_missing_subject_is_validation_error() {
    let db = setup_test_db().await;
    let sv = Contact::new(&db);

    let err = sv.submit(form("  ")).await.unwrap_err();
    assert!(
      matches!(&err, Error::Validation(message) if message.contains("subject"))
    );
  }

  #[tokio::test]
  async fn test_submit_and_mark_read() {
    let db = setup_test_db().await;
    let sv = Contact::new(&db);

    let message = sv.submit(form("Shipping")).await.unwrap();
    assert_eq!(sv.count_unread().await.unwrap(), 1);

    sv.mark_read(message.id).await.unwrap();
    assert_eq!(sv.count_unread().await.unwrap(), 0);
    assert!(sv.all(true).await.unwrap().is_empty());
  }
}
