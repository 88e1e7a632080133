use argon2::{
  Argon2,
  password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    rand_core::OsRng,
  },
};

use crate::{entity::user, prelude::*};

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn register(
    &self,
    email: &str,
    password: &str,
    display_name: &str,
  ) -> Result<user::Model> {
    let email = email.trim().to_ascii_lowercase();
    if !email.contains('@') {
      return Err(Error::validation("invalid email address"));
    }
    if password.len() < 8 {
      return Err(Error::validation("password must be at least 8 characters"));
    }

    let existing = user::Entity::find()
      .filter(user::Column::Email.eq(&email))
      .one(self.db)
      .await?;
    if existing.is_some() {
      return Err(Error::EmailTaken);
    }

    let display_name = match display_name.trim() {
      "" => email.split('@').next().unwrap_or(&email).to_string(),
      name => name.to_string(),
    };

    let now = Utc::now().naive_utc();
    let user = user::ActiveModel {
      id: NotSet,
      email: Set(email),
      password_hash: Set(hash_password(password)?),
      display_name: Set(display_name),
      is_admin: Set(false),
      created_at: Set(now),
    };

    Ok(user.insert(self.db).await?)
  }

  pub async fn login(&self, email: &str, password: &str) -> Result<user::Model> {
    let email = email.trim().to_ascii_lowercase();

    let user = user::Entity::find()
      .filter(user::Column::Email.eq(&email))
      .one(self.db)
      .await?
      .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
      return Err(Error::InvalidCredentials);
    }

    Ok(user)
  }

  pub async fn by_id(&self, id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)
  }

  pub async fn all(&self) -> Result<Vec<user::Model>> {
    let users = user::Entity::find()
      .order_by_asc(user::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(users)
  }

  pub async fn set_admin(&self, id: i32, is_admin: bool) -> Result<()> {
    let user = self.by_id(id).await?;

    user::ActiveModel { is_admin: Set(is_admin), ..user.into() }
      .update(self.db)
      .await?;

    Ok(())
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(user::Entity::find().count(self.db).await?)
  }
}

fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);

  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|err| Error::Internal(format!("password hashing failed: {err}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
  PasswordHash::new(hash)
    .and_then(|parsed| {
      Argon2::default().verify_password(password.as_bytes(), &parsed)
    })
    .is_ok()
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::entity;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let stmt = schema.create_table_from_entity(entity::prelude::User);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  #[tokio::test]
  async fn test_register_and_login() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    let user =
      sv.register("shopper@example.com", "hunter2hunter2", "Shopper").await.unwrap();
    assert_eq!(user.email, "shopper@example.com");
    assert!(!user.is_admin);

    let logged_in =
      sv.login("shopper@example.com", "hunter2hunter2").await.unwrap();
    assert_eq!(logged_in.id, user.id);
  }

  #[tokio::test]
  async fn test_login_wrong_password() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    sv.register("shopper@example.com", "hunter2hunter2", "").await.unwrap();

    assert!(matches!(
      sv.login("shopper@example.com", "wrong-password").await,
      Err(Error::InvalidCredentials)
    ));
  }

  #[tokio::test]
  async fn test_duplicate_email() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    sv.register("shopper@example.com", "hunter2hunter2", "").await.unwrap();

    assert!(matches!(
      sv.register("Shopper@Example.Com", "hunter2hunter2", "").await,
      Err(Error::EmailTaken)
    ));
  }

  #[tokio::test]
  async fn test_short_password_rejected() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    assert!(matches!(
      sv.register("shopper@example.com", "short", "").await,
      Err(Error::Validation(_))
    ));
  }
}
